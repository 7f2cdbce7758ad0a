//! The extraction pipeline: an `Extractor` orchestrates the eleven phases of
//! predicate-argument extraction end-to-end over a [`Parse`] and [`Config`].

use std::collections::{HashMap, HashSet};

use crate::arguments::identify_arguments;
use crate::conjunction::resolve_predicate_conjunction;
use crate::config::Config;
use crate::coordination::expand_coordination;
use crate::error::PredPattResult;
use crate::identify::identify_predicates;
use crate::phrase::{assemble_argument_phrase, assemble_predicate_phrase, filter_simple_arguments, strip_argument, strip_predicate};
use crate::resolve::resolve_arguments;
use crate::rules::RuleProvenance;
use crate::schema::Relation;
use crate::token::Parse;
use crate::types::{Argument, Predicate, PredicateType};

/// Dummy English relative pronouns filtered from relcl-resolved predicates.
const RELCL_DUMMY_ARGS: [&str; 3] = ["that", "which", "who"];

/// Orchestrates the eleven-phase extraction pipeline. Stateless — every
/// extraction call constructs its own working state (event map,
/// resolved-so-far map) and publishes nothing beyond its return value.
pub struct Extractor;

impl Extractor {
    /// Run the full pipeline over `parse` under `config`, returning the
    /// extracted predicate instances.
    pub fn extract(parse: &Parse, config: &Config) -> PredPattResult<Vec<Predicate>> {
        // 1. Identify predicate roots.
        let mut predicates = identify_predicates(parse, config);
        tracing::debug!(count = predicates.len(), "identified predicate roots");

        // 3. Identify arguments per predicate (not yet phrase-assembled).
        for predicate in predicates.iter_mut() {
            identify_arguments(predicate, parse, config)?;
        }

        // 4. Resolve arguments: seven ordered sub-passes of cross-predicate
        // borrowing; xcomp merging may remove predicates.
        let mut predicates = resolve_arguments(predicates, parse, config)?;
        tracing::debug!(count = predicates.len(), "resolved arguments");

        // 5. Sort each predicate's arguments by root position.
        for predicate in predicates.iter_mut() {
            predicate.arguments.sort_by_key(|a| a.position());
        }
        predicates.sort_by_key(|p| p.position());

        // The full set of surviving predicate-root positions, needed by the
        // `N3` phrase-assembly filter regardless of processing order.
        let predicate_roots: HashSet<usize> = predicates.iter().map(|p| p.position()).collect();

        // 6-9 run one predicate at a time, in position order: phrase
        // assembly, simple-mode filtering, conjunction borrowing, and
        // coordination expansion. `resolved` accumulates the predicates
        // already fully phrase-assembled, since conjunction borrowing and
        // borrowed-argument token sharing both read an earlier predicate's
        // already-assembled tokens.
        let mut resolved: HashMap<usize, Predicate> = HashMap::new();
        let mut instances: Vec<Predicate> = Vec::new();

        for mut predicate in predicates {
            // 6. Assemble predicate & argument phrases.
            assemble_predicate_phrase(&mut predicate, parse, &predicate_roots, config);

            let mut arguments = std::mem::take(&mut predicate.arguments);
            for argument in arguments.iter_mut() {
                assemble_one_argument_phrase(&predicate, argument, parse, &resolved, config);
            }
            predicate.arguments = arguments;

            // 7. Simple mode: drop non-core arguments.
            if config.simple {
                filter_simple_arguments(&mut predicate, parse);
            }

            // 8. Conjunction resolution.
            if matches!(predicate.root.governor_relation, Relation::Conj) {
                resolve_predicate_conjunction(&mut predicate, parse, &resolved, config);
            }

            resolved.insert(predicate.position(), predicate.clone());

            // 9. Coordination expansion, appended to the output.
            if !predicate.tokens.is_empty() {
                instances.extend(expand_coordination(predicate, parse, config));
            }
        }

        // 10. Filter dummy English relative-pronoun arguments from any
        // relcl-resolved predicate.
        if config.resolve_relcl && config.borrow_arg_for_relcl {
            for instance in instances.iter_mut() {
                filter_relcl_dummy_args(instance);
            }
        }

        // 11. Final cleanup: re-sort, strip trivials, drop broken predicates.
        finalize(&mut instances, config);

        Ok(instances)
    }
}

/// Assemble one argument's phrase. A borrowed argument whose provenance
/// names a lender (`BorrowSubj`/`BorrowObj`/`CutBorrowX`) copies that
/// lender's already-assembled token span verbatim, so the lender keeps that
/// argument with the same token span after borrowing. Every other argument —
/// including rule-`L` xcomp-merged ones, whose original owner no longer
/// exists — gets its phrase assembled fresh relative to its new owner.
fn assemble_one_argument_phrase(
    predicate: &Predicate,
    argument: &mut Argument,
    parse: &Parse,
    resolved: &HashMap<usize, Predicate>,
    config: &Config,
) {
    if argument.is_borrowed {
        if let Some(lender_pos) = borrowed_from(argument) {
            if let Some(lender) = resolved.get(&lender_pos) {
                if let Some(source) = lender.arguments.iter().find(|a| a.position() == argument.position()) {
                    argument.tokens = source.tokens.clone();
                    return;
                }
            }
        }
    }
    assemble_argument_phrase(predicate, argument, parse, config);
}

/// The lending predicate's root position, if `argument`'s most recent rule
/// names one. Rule `L` (xcomp merge) carries no such context — its lender
/// predicate is removed entirely, so there is nothing to copy from.
fn borrowed_from(argument: &Argument) -> Option<usize> {
    match argument.rules.last() {
        Some(RuleProvenance::BorrowSubj { from, .. }) => Some(*from),
        Some(RuleProvenance::BorrowObj { from }) => Some(*from),
        Some(RuleProvenance::CutBorrowSubj { from }) => Some(*from),
        Some(RuleProvenance::CutBorrowObj { from }) => Some(*from),
        Some(RuleProvenance::CutBorrowOther { from }) => Some(*from),
        _ => None,
    }
}

/// Drop dummy relative-pronoun arguments ("that"/"which"/"who") from a
/// predicate tagged `PredResolveRelcl`.
fn filter_relcl_dummy_args(predicate: &mut Predicate) {
    if !predicate.has_rule(&RuleProvenance::PredResolveRelcl) {
        return;
    }
    let before = predicate.arguments.len();
    predicate
        .arguments
        .retain(|arg| !RELCL_DUMMY_ARGS.iter().any(|d| arg.root.text.eq_ignore_ascii_case(d)));
    if predicate.arguments.len() != before {
        predicate.rules.push(RuleProvenance::EnRelclDummyArgFilter);
    }
}

/// Final cleanup: re-sort instances and their arguments by position, strip
/// trivial boundary tokens from both, and drop broken predicates.
fn finalize(instances: &mut Vec<Predicate>, config: &Config) {
    for predicate in instances.iter_mut() {
        predicate.tokens.sort();
        strip_predicate(predicate, config);
        for argument in predicate.arguments.iter_mut() {
            argument.tokens.sort();
            strip_argument(argument, config);
        }
        predicate.arguments.sort_by_key(|a| a.position());
    }
    instances.sort_by_key(|p| p.position());

    instances.retain(|predicate| {
        if predicate.tokens.is_empty() {
            tracing::debug!(position = predicate.position(), "dropping broken predicate: empty tokens");
            return false;
        }
        if predicate.arguments.iter().any(|a| a.tokens.is_empty()) {
            tracing::debug!(position = predicate.position(), "dropping broken predicate: empty argument tokens");
            return false;
        }
        if matches!(predicate.predicate_type, PredicateType::Possessive) && predicate.arguments.len() != 2 {
            tracing::debug!(position = predicate.position(), "dropping broken predicate: poss without two arguments");
            return false;
        }
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVersion;

    #[test]
    fn svo_sentence_yields_one_predicate_with_two_g1_arguments() {
        // "I eat apples"
        let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")];
        let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let instances = Extractor::extract(&parse, &Config::default()).unwrap();

        assert_eq!(instances.len(), 1);
        let pred = &instances[0];
        assert_eq!(pred.position(), 1);
        assert_eq!(pred.arguments.len(), 2);
        let mut positions: Vec<_> = pred.arguments.iter().map(|a| a.position()).collect();
        positions.sort();
        assert_eq!(positions, vec![0, 2]);
        assert!(pred
            .arguments
            .iter()
            .all(|a| matches!(a.rules[0], RuleProvenance::G1(_))));
    }

    #[test]
    fn conjoined_predicate_borrows_subject_via_rule_f() {
        // "He runs and jumps"
        let tokens = [("He", "PRON"), ("runs", "VERB"), ("and", "CCONJ"), ("jumps", "VERB")];
        let edges = [("nsubj", 1, 0), ("root", -1, 1), ("cc", 1, 2), ("conj", 1, 3)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let instances = Extractor::extract(&parse, &Config::default()).unwrap();

        assert_eq!(instances.len(), 2);
        let jumps = instances.iter().find(|p| p.position() == 3).expect("jumps predicate");
        assert!(jumps.has_rule(&RuleProvenance::F));
        let subj = jumps.subject().expect("borrowed subject");
        assert_eq!(subj.position(), 0);
        assert!(subj.is_borrowed);
        assert!(subj
            .rules
            .iter()
            .any(|r| matches!(r, RuleProvenance::BorrowSubj { from: 1, via_object: false })));
    }

    #[test]
    fn adjectival_modifier_predicate_has_one_argument() {
        // "the red car"
        let tokens = [("the", "DET"), ("red", "ADJ"), ("car", "NOUN")];
        let edges = [("det", 2, 0), ("amod", 2, 1), ("root", -1, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let config = Config { resolve_amod: true, ..Config::default() };
        let instances = Extractor::extract(&parse, &config).unwrap();

        assert_eq!(instances.len(), 1);
        let red = &instances[0];
        assert!(matches!(red.predicate_type, PredicateType::AdjectivalModifier));
        assert_eq!(red.arguments.len(), 1);
        assert_eq!(red.arguments[0].position(), 2);
        assert!(red.arguments[0].has_rule_i());
    }

    #[test]
    fn possessive_predicate_has_two_arguments() {
        // "John 's car"
        let tokens = [("John", "PROPN"), ("'s", "PART"), ("car", "NOUN")];
        let edges = [("nmod:poss", 2, 0), ("case", 0, 1), ("root", -1, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let config = Config { resolve_poss: true, ..Config::default() };
        let instances = Extractor::extract(&parse, &config).unwrap();

        assert_eq!(instances.len(), 1);
        let john = &instances[0];
        assert!(matches!(john.predicate_type, PredicateType::Possessive));
        assert_eq!(john.arguments.len(), 2);
    }

    trait HasRuleI {
        fn has_rule_i(&self) -> bool;
    }
    impl HasRuleI for Argument {
        fn has_rule_i(&self) -> bool {
            self.rules.iter().any(|r| matches!(r, RuleProvenance::I))
        }
    }
}
