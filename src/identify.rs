//! Predicate-root identification: a single left-to-right pass over the
//! parse's edges, nominating predicate roots and their type, plus a
//! breadth-first sweep that pulls in conjoined predicates.

use std::collections::VecDeque;

use crate::config::Config;
use crate::rules::{gov_looks_like_predicate, RuleProvenance};
use crate::schema::{PosTag, Relation};
use crate::token::{Parse, Token};
use crate::types::{Predicate, PredicateType};

/// Create a predicate at `root`'s position if none exists yet, else append
/// `rule` to the existing one.
fn nominate(
    predicates: &mut Vec<Predicate>,
    root: &Token,
    predicate_type: PredicateType,
    rule: RuleProvenance,
) {
    if let Some(existing) = predicates.iter_mut().find(|p| p.position() == root.position) {
        existing.rules.push(rule);
    } else {
        predicates.push(Predicate::new(root.clone(), predicate_type, rule));
    }
}

/// `qualified_conjoined_predicate(gov, dep)`: the dependent is a word, and
/// if the governor's POS is VERB the dependent's POS must also be VERB.
fn qualified_conjoined_predicate(governor: &Token, dependent: &Token) -> bool {
    if matches!(dependent.pos_tag, PosTag::Punct) {
        return false;
    }
    if matches!(governor.pos_tag, PosTag::Verb) {
        return matches!(dependent.pos_tag, PosTag::Verb);
    }
    true
}

/// Run predicate-root identification over `parse` under `config`, returning
/// predicates sorted by root position.
pub fn identify_predicates(parse: &Parse, config: &Config) -> Vec<Predicate> {
    let mut predicates: Vec<Predicate> = Vec::new();

    for edge in parse.edges() {
        let dependent = parse.token(edge.dependent);
        if matches!(dependent.pos_tag, PosTag::Punct) {
            continue;
        }
        let governor = parse.token(edge.governor);

        if config.resolve_appos && matches!(edge.relation, Relation::Appos) {
            nominate(&mut predicates, dependent, PredicateType::Appositive, RuleProvenance::D);
        }
        if config.resolve_poss && matches!(edge.relation, Relation::NmodPoss) {
            nominate(&mut predicates, dependent, PredicateType::Possessive, RuleProvenance::V);
        }
        if config.resolve_amod
            && matches!(edge.relation, Relation::Amod)
            && matches!(dependent.pos_tag, PosTag::Adj)
            && !matches!(governor.pos_tag, PosTag::Adj)
        {
            nominate(
                &mut predicates,
                dependent,
                PredicateType::AdjectivalModifier,
                RuleProvenance::E,
            );
        }

        if matches!(governor.governor_relation, Relation::Dep) {
            continue;
        }

        if matches!(edge.relation, Relation::Ccomp | Relation::Csubj | Relation::Csubjpass) {
            nominate(&mut predicates, dependent, PredicateType::Normal, RuleProvenance::A1);
        }
        if config.resolve_relcl
            && matches!(edge.relation, Relation::Advcl | Relation::Acl | Relation::AclRelcl)
        {
            nominate(&mut predicates, dependent, PredicateType::Normal, RuleProvenance::B);
        }
        if matches!(edge.relation, Relation::Xcomp) {
            nominate(&mut predicates, dependent, PredicateType::Normal, RuleProvenance::A2);
        }

        if gov_looks_like_predicate(edge, governor) {
            if matches!(edge.relation, Relation::Ccomp) && governor.governor_relation.is_arg_like() {
                // "we expressed [our hope that ...]" — the governor is itself
                // an argument, not a predicate.
            } else if matches!(governor.governor_relation, Relation::Xcomp) {
                if let Some(gg_pos) = governor.governor {
                    let gg = parse.token(gg_pos);
                    if !gg.hard_to_find_arguments() {
                        nominate(&mut predicates, governor, PredicateType::Normal, RuleProvenance::C(edge.clone()));
                    }
                }
            } else if !governor.hard_to_find_arguments() {
                nominate(&mut predicates, governor, PredicateType::Normal, RuleProvenance::C(edge.clone()));
            }
        }
    }

    predicates.sort_by_key(|p| p.position());

    let mut queue: VecDeque<usize> = predicates.iter().map(|p| p.position()).collect();
    while let Some(gov_pos) = queue.pop_front() {
        let governor = parse.token(gov_pos);
        for edge in parse.outgoing(gov_pos) {
            if !matches!(edge.relation, Relation::Conj) {
                continue;
            }
            let dependent = parse.token(edge.dependent);
            if !qualified_conjoined_predicate(governor, dependent) {
                continue;
            }
            let already_known = predicates.iter().any(|p| p.position() == dependent.position);
            nominate(&mut predicates, dependent, PredicateType::Normal, RuleProvenance::F);
            if !already_known {
                queue.push_back(dependent.position);
            }
        }
    }

    predicates.sort_by_key(|p| p.position());
    predicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVersion;

    #[test]
    fn simple_svo_nominates_verb_via_rule_c() {
        let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")];
        let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let preds = identify_predicates(&parse, &Config::default());
        // The nsubj edge's governor ("eat") satisfies the `core` branch of
        // `gov_looks_like_predicate` unconditionally, and "eat" is neither
        // xcomp-governed nor itself a hard-to-find-arguments root, so it
        // nominates via rule C.
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].position(), 1);
        assert!(preds[0].has_rule(&RuleProvenance::C(parse.outgoing(1)[0].clone())));
    }

    #[test]
    fn xcomp_dependent_is_nominated_with_a2() {
        let tokens = [("I", "PRON"), ("want", "VERB"), ("to", "PART"), ("leave", "VERB")];
        let edges = [("nsubj", 1, 0), ("root", -1, 1), ("mark", 3, 2), ("xcomp", 1, 3)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let preds = identify_predicates(&parse, &Config::default());
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].position(), 3);
        assert!(preds[0].has_rule(&RuleProvenance::A2));
    }

    #[test]
    fn conjunct_of_identified_predicate_gets_rule_f() {
        // "He said He runs and jumps" — "runs" is nominated directly (ccomp
        // dependent, rule A1), "jumps" only via its conj edge to "runs".
        let tokens = [
            ("He", "PRON"),
            ("said", "VERB"),
            ("He", "PRON"),
            ("runs", "VERB"),
            ("and", "CCONJ"),
            ("jumps", "VERB"),
        ];
        let edges = [
            ("nsubj", 1, 0),
            ("root", -1, 1),
            ("nsubj", 3, 2),
            ("ccomp", 1, 3),
            ("cc", 3, 4),
            ("conj", 3, 5),
        ];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let preds = identify_predicates(&parse, &Config::default());
        let jumps = preds.iter().find(|p| p.position() == 5).expect("jumps nominated via conj");
        assert!(jumps.has_rule(&RuleProvenance::F));
    }
}
