//! Argument identification: per predicate, collect argument roots from the
//! predicate root's outgoing edges and, for the three special predicate
//! types, from the template-specific governor/root relationship.

use crate::config::Config;
use crate::error::{PredPattError, PredPattResult};
use crate::rules::RuleProvenance;
use crate::schema::Relation;
use crate::token::Parse;
use crate::types::{Argument, Predicate, PredicateType};

/// Populate `predicate.arguments` with freshly-identified (not yet
/// phrase-assembled) arguments.
pub fn identify_arguments(predicate: &mut Predicate, parse: &Parse, config: &Config) -> PredPattResult<()> {
    let root_pos = predicate.position();

    for edge in parse.outgoing(root_pos) {
        if matches!(edge.relation, Relation::Nsubj | Relation::Nsubjpass | Relation::Dobj | Relation::Iobj) {
            predicate.arguments.push(Argument::new(
                parse.token(edge.dependent).clone(),
                RuleProvenance::G1(edge.clone()),
            ));
        } else if edge.relation.starts_with_nmod_or_is_obl()
            && !matches!(predicate.predicate_type, PredicateType::AdjectivalModifier)
        {
            predicate
                .arguments
                .push(Argument::new(parse.token(edge.dependent).clone(), RuleProvenance::H1));
        } else if matches!(edge.relation, Relation::Ccomp | Relation::Csubj | Relation::Csubjpass)
            || (config.cut && matches!(edge.relation, Relation::Xcomp))
        {
            predicate
                .arguments
                .push(Argument::new(parse.token(edge.dependent).clone(), RuleProvenance::K));
        }
    }

    for edge in parse.outgoing(root_pos) {
        if !matches!(edge.relation, Relation::Advmod) {
            continue;
        }
        for inner in parse.outgoing(edge.dependent) {
            let nmod_prefixed = matches!(
                inner.relation,
                Relation::Nmod | Relation::NmodPoss | Relation::NmodTmod | Relation::NmodNpmod
            );
            if nmod_prefixed || matches!(inner.relation, Relation::Obl) {
                predicate
                    .arguments
                    .push(Argument::new(parse.token(inner.dependent).clone(), RuleProvenance::H2));
            }
        }
    }

    match predicate.predicate_type {
        PredicateType::AdjectivalModifier => {
            let gov_pos = predicate.root.governor.ok_or_else(|| {
                PredPattError::InvariantViolation(format!(
                    "AdjectivalModifier predicate at position {} has no governor",
                    root_pos
                ))
            })?;
            predicate
                .arguments
                .push(Argument::new(parse.token(gov_pos).clone(), RuleProvenance::I));
        }
        PredicateType::Appositive => {
            let gov_pos = predicate.root.governor.ok_or_else(|| {
                PredPattError::InvariantViolation(format!(
                    "Appositive predicate at position {} has no governor",
                    root_pos
                ))
            })?;
            predicate
                .arguments
                .push(Argument::new(parse.token(gov_pos).clone(), RuleProvenance::J));
        }
        PredicateType::Possessive => {
            let gov_pos = predicate.root.governor.ok_or_else(|| {
                PredPattError::InvariantViolation(format!(
                    "Possessive predicate at position {} has no governor",
                    root_pos
                ))
            })?;
            predicate
                .arguments
                .push(Argument::new(parse.token(gov_pos).clone(), RuleProvenance::W1));
            predicate
                .arguments
                .push(Argument::new(predicate.root.clone(), RuleProvenance::W2));
        }
        PredicateType::Normal => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVersion;

    #[test]
    fn svo_predicate_gets_two_g1_arguments() {
        let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")];
        let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let mut pred = Predicate::new(parse.token(1).clone(), PredicateType::Normal, RuleProvenance::A1);
        identify_arguments(&mut pred, &parse, &Config::default()).unwrap();
        assert_eq!(pred.arguments.len(), 2);
        assert!(pred.arguments.iter().all(|a| matches!(a.rules[0], RuleProvenance::G1(_))));
        let mut positions: Vec<_> = pred.arguments.iter().map(|a| a.position()).collect();
        positions.sort();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn amod_predicate_without_governor_is_invariant_violation() {
        let tokens = [("red", "ADJ")];
        let parse = Parse::from_tokens_only(&tokens, SchemaVersion::V1);
        let mut pred = Predicate::new(parse.token(0).clone(), PredicateType::AdjectivalModifier, RuleProvenance::E);
        let err = identify_arguments(&mut pred, &parse, &Config::default()).unwrap_err();
        assert!(matches!(err, PredPattError::InvariantViolation(_)));
    }

    #[test]
    fn possessive_predicate_gets_w1_and_w2() {
        let tokens = [("John", "PROPN"), ("'s", "PART"), ("car", "NOUN")];
        let edges = [("nmod:poss", 2, 0), ("case", 0, 1), ("root", -1, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let mut pred = Predicate::new(parse.token(0).clone(), PredicateType::Possessive, RuleProvenance::V);
        identify_arguments(&mut pred, &parse, &Config::default()).unwrap();
        assert_eq!(pred.arguments.len(), 2);
        assert!(matches!(pred.arguments[0].rules[0], RuleProvenance::W1));
        assert_eq!(pred.arguments[0].position(), 2);
        assert!(matches!(pred.arguments[1].rules[0], RuleProvenance::W2));
        assert_eq!(pred.arguments[1].position(), 0);
    }
}
