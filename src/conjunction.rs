//! Predicate conjunction: post-processing applied to a predicate whose
//! governor-relation is `conj`, run once its own phrase has been assembled
//! but before coordination expansion. `resolved` holds every predicate at an
//! earlier position whose phrase assembly has already run, since the
//! positions this module needs to look up (a conjunct's governing predicate,
//! and the top of an xcomp chain) are always established earlier in the
//! position-ordered pipeline.

use std::collections::HashMap;

use crate::config::Config;
use crate::rules::RuleProvenance;
use crate::schema::Relation;
use crate::token::{Parse, Token};
use crate::types::Predicate;

fn share_subject(p: &Predicate, g: &Predicate) -> bool {
    match (p.subject(), g.subject()) {
        (Some(a), Some(b)) => a.position() == b.position(),
        _ => false,
    }
}

/// Climb the governor chain from `pos` past every token reached by an
/// `xcomp` edge, returning the first non-`xcomp`-governed ancestor. Every
/// `xcomp` dependent is unconditionally nominated as a predicate (rule
/// `A2`), so the chain's endpoint is always a registered predicate — it may
/// just not yet be in `resolved` if phrase assembly hasn't reached it,
/// though position ordering guarantees it has for any conjunct.
fn top_xcomp_position(pos: usize, parse: &Parse) -> Option<usize> {
    let mut cur = parse.token(pos).governor;
    while let Some(c) = cur {
        let candidate = parse.token(c);
        if matches!(candidate.governor_relation, Relation::Xcomp) {
            cur = candidate.governor;
        } else {
            break;
        }
    }
    cur
}

/// Apply both conjunction post-processing steps to `predicate`, whose
/// governor-relation must be `conj` (callers gate on this).
pub fn resolve_predicate_conjunction(
    predicate: &mut Predicate,
    parse: &Parse,
    resolved: &HashMap<usize, Predicate>,
    config: &Config,
) {
    borrow_aux_neg(predicate, parse, resolved);
    if !config.cut {
        borrow_top_xcomp_tokens(predicate, parse, resolved);
    }
}

/// Pull `neg` dependents of the governing predicate into a conjunct's
/// tokens, but only when the conjunct shares the governor's subject — e.g.
/// "He did make mistakes, but that was okay." shouldn't attach "did"'s
/// negation (there is none here, but the subject mismatch is the guard that
/// matters) to "okay".
fn borrow_aux_neg(predicate: &mut Predicate, parse: &Parse, resolved: &HashMap<usize, Predicate>) {
    let Some(gov_pos) = predicate.root.governor else { return };
    let Some(g) = resolved.get(&gov_pos) else { return };
    if !share_subject(predicate, g) {
        return;
    }
    for edge in parse.outgoing(gov_pos) {
        if matches!(edge.relation, Relation::Neg) {
            predicate.tokens.push(parse.token(edge.dependent).clone());
            predicate.rules.push(RuleProvenance::PredConjBorrowAuxNeg {
                from: gov_pos,
                token: edge.dependent,
            });
        }
    }
}

/// "They start firing and shooting" (`!cut`): borrow every token of the
/// xcomp chain's top predicate's phrase into this conjunct, except the
/// conjunct's own direct governor, that governor's `advmod` dependents, and
/// `case` dependents — yielding "start shooting" alongside "start firing".
fn borrow_top_xcomp_tokens(predicate: &mut Predicate, parse: &Parse, resolved: &HashMap<usize, Predicate>) {
    let Some(gov_pos) = predicate.root.governor else { return };
    if !matches!(parse.token(gov_pos).governor_relation, Relation::Xcomp) {
        return;
    }
    let Some(top_pos) = top_xcomp_position(predicate.position(), parse) else { return };
    let Some(g) = resolved.get(&top_pos) else { return };

    let borrowed: Vec<Token> = g
        .tokens
        .iter()
        .filter(|y| {
            if y.position == gov_pos {
                return false;
            }
            let is_advmod_of_gov = y.governor == Some(gov_pos) && matches!(y.governor_relation, Relation::Advmod);
            if is_advmod_of_gov {
                return false;
            }
            !matches!(y.governor_relation, Relation::Case)
        })
        .cloned()
        .collect();

    for token in borrowed {
        let position = token.position;
        predicate.tokens.push(token);
        predicate.rules.push(RuleProvenance::PredConjBorrowTokensXcomp { from: top_pos, token: position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleProvenance as R;
    use crate::schema::{PosTag, SchemaVersion};
    use crate::types::PredicateType;

    #[test]
    fn conjunct_sharing_subject_borrows_negation() {
        // "He did not run and did not jump" (simplified: shared subj "He",
        // neg on "run" borrowed into "jump").
        let tokens = [("He", "PRON"), ("not", "PART"), ("run", "VERB"), ("and", "CCONJ"), ("jump", "VERB")];
        let edges = [
            ("nsubj", 2, 0),
            ("neg", 2, 1),
            ("root", -1, 2),
            ("cc", 2, 3),
            ("conj", 2, 4),
        ];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();

        let mut run_pred = Predicate::new(parse.token(2).clone(), PredicateType::Normal, R::A1);
        run_pred
            .arguments
            .push(crate::types::Argument::new(parse.token(0).clone(), R::G1(parse.outgoing(2)[0].clone())));
        let mut jump_pred = Predicate::new(parse.token(4).clone(), PredicateType::Normal, R::F);
        jump_pred
            .arguments
            .push(crate::types::Argument::new(parse.token(0).clone(), R::G1(parse.outgoing(2)[0].clone())));

        let mut resolved = HashMap::new();
        resolved.insert(2usize, run_pred);

        resolve_predicate_conjunction(&mut jump_pred, &parse, &resolved, &Config::default());

        assert!(jump_pred.tokens.iter().any(|t| t.text == "not"));
        assert!(jump_pred.has_rule(&R::PredConjBorrowAuxNeg { from: 2, token: 1 }));
    }

    #[test]
    fn xcomp_conjunct_borrows_top_xcomp_tokens_excluding_its_own_governor() {
        let tokens = [
            ("They", "PRON"),
            ("start", "VERB"),
            ("firing", "VERB"),
            ("and", "CCONJ"),
            ("shooting", "VERB"),
        ];
        let edges = [
            ("nsubj", 1, 0),
            ("root", -1, 1),
            ("xcomp", 1, 2),
            ("cc", 2, 3),
            ("conj", 2, 4),
        ];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();

        let mut start_pred = Predicate::new(parse.token(1).clone(), PredicateType::Normal, R::A1);
        start_pred.tokens = vec![parse.token(1).clone(), parse.token(2).clone()];

        let mut shooting_pred = Predicate::new(parse.token(4).clone(), PredicateType::Normal, R::F);
        shooting_pred.tokens = vec![parse.token(4).clone()];

        let mut resolved = HashMap::new();
        resolved.insert(1usize, start_pred);

        resolve_predicate_conjunction(&mut shooting_pred, &parse, &resolved, &Config::default());

        assert!(shooting_pred.tokens.iter().any(|t| t.position == 1));
        assert!(!shooting_pred.tokens.iter().any(|t| t.position == 2));
        assert!(matches!(shooting_pred.root.pos_tag, PosTag::Verb));
    }
}
