//! Coordination expansion: the cartesian product across each argument's
//! coordinate set (itself plus its `conj` siblings), one output instance per
//! combination.

use crate::config::Config;
use crate::phrase::{assemble_argument_phrase, strip_argument, strip_predicate};
use crate::rules::RuleProvenance;
use crate::schema::Relation;
use crate::token::Parse;
use crate::types::{Argument, Predicate, PredicateType};

fn cartesian_product(sets: &[Vec<Argument>]) -> Vec<Vec<Argument>> {
    let mut combinations: Vec<Vec<Argument>> = vec![Vec::new()];
    for set in sets {
        let mut next = Vec::with_capacity(combinations.len() * set.len().max(1));
        for combo in &combinations {
            for item in set {
                let mut extended = combo.clone();
                extended.push(item.clone());
                next.push(extended);
            }
        }
        combinations = next;
    }
    combinations
}

/// Expand `predicate`'s coordinated arguments into one instance per
/// combination, consuming the predicate (its single resolved copy is no
/// longer meaningful once expanded into N instances).
pub fn expand_coordination(mut predicate: Predicate, parse: &Parse, config: &Config) -> Vec<Predicate> {
    if !config.resolve_conj || matches!(predicate.predicate_type, PredicateType::AdjectivalModifier) {
        predicate.arguments.retain(|a| !a.tokens.is_empty());
        if predicate.arguments.is_empty() {
            return Vec::new();
        }
        return vec![predicate];
    }

    strip_predicate(&mut predicate, config);
    for arg in predicate.arguments.iter_mut() {
        if !arg.is_borrowed {
            strip_argument(arg, config);
        }
    }

    let mut coordinate_sets: Vec<Vec<Argument>> = Vec::new();
    for arg in predicate.arguments.clone() {
        // A non-borrowed argument whose phrase came up empty contributes no
        // coordinate set at all (not even itself).
        if !arg.is_borrowed && arg.tokens.is_empty() {
            continue;
        }
        let mut set = vec![arg.clone()];
        if !matches!(arg.root.governor_relation, Relation::Ccomp | Relation::Csubj) {
            for edge in parse.outgoing(arg.position()) {
                if matches!(edge.relation, Relation::Conj) {
                    let mut conjunct = Argument::new(parse.token(edge.dependent).clone(), RuleProvenance::M);
                    assemble_argument_phrase(&predicate, &mut conjunct, parse, config);
                    set.push(conjunct);
                }
            }
        }
        set.sort_by_key(|a| a.position());
        coordinate_sets.push(set);
    }

    cartesian_product(&coordinate_sets)
        .into_iter()
        .map(|args| {
            let mut instance = predicate.clone();
            instance.arguments = args;
            instance
        })
        .collect()
}
