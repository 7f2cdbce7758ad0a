//! Argument resolution: seven strictly-ordered sub-passes of cross-predicate
//! argument borrowing, operating on the full predicate list keyed by root
//! position for O(1) cross-lookup (the "event map").

use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::error::{PredPattError, PredPattResult};
use crate::rules::RuleProvenance;
use crate::schema::Relation;
use crate::token::Parse;
use crate::types::{Argument, Predicate, PredicateType};

/// "Top xcomp" (glossary): starting one level above `pos`, keep climbing
/// while the current position is itself reached via `xcomp` AND is (or was)
/// a registered predicate; stop and return the first position that breaks
/// either condition. `registered` is an immutable snapshot of every
/// predicate position identified before resolution began — not the
/// currently-live event map, which sub-pass 1 shrinks as it merges xcomp
/// predicates away. Using the live map here would make the climb depend on
/// `HashMap` iteration order: whichever of two chained xcomp predicates
/// happens to be merged first would make the other's climb stop short.
/// Returns `None` only if `pos` has no governor at all.
fn climb_past_xcomp(pos: usize, parse: &Parse, registered: &HashSet<usize>) -> Option<usize> {
    let mut cur = parse.token(pos).governor;
    while let Some(c) = cur {
        let ctok = parse.token(c);
        if matches!(ctok.governor_relation, Relation::Xcomp) && registered.contains(&c) {
            cur = ctok.governor;
        } else {
            break;
        }
    }
    cur
}

/// True if `pos`'s predicate root has an outgoing `mark` edge whose text is
/// "from" or "for" (the special advcl case of sub-passes 4 and 6).
fn has_from_for_mark(parse: &Parse, pos: usize) -> bool {
    parse.outgoing(pos).iter().any(|e| {
        matches!(e.relation, Relation::Mark) && {
            let text = &parse.token(e.dependent).text;
            text.eq_ignore_ascii_case("from") || text.eq_ignore_ascii_case("for")
        }
    })
}

fn borrow(arg: Argument, rule: RuleProvenance) -> Argument {
    let mut arg = arg;
    arg.is_borrowed = true;
    arg.rules.push(rule);
    arg
}

/// Run all seven resolution sub-passes, returning the (possibly shorter,
/// after xcomp merging) predicate list sorted by root position.
pub fn resolve_arguments(
    predicates: Vec<Predicate>,
    parse: &Parse,
    config: &Config,
) -> PredPattResult<Vec<Predicate>> {
    let mut map: HashMap<usize, Predicate> = predicates.into_iter().map(|p| (p.position(), p)).collect();
    // Snapshot of every predicate position identified before resolution
    // began; never mutated, unlike `map`. See `climb_past_xcomp`.
    let registered: HashSet<usize> = map.keys().copied().collect();

    fn invariant(position: usize, what: &str) -> PredPattError {
        PredPattError::InvariantViolation(format!(
            "predicate at position {} missing from resolution event map ({})",
            position, what
        ))
    }

    // 1. xcomp merge (only if !cut).
    if !config.cut {
        let mut xcomp_positions: Vec<usize> = map
            .values()
            .filter(|p| matches!(p.root.governor_relation, Relation::Xcomp))
            .map(|p| p.position())
            .collect();
        xcomp_positions.sort_unstable();
        for pos in xcomp_positions {
            if !map.contains_key(&pos) {
                continue;
            }
            let top_pos = match climb_past_xcomp(pos, parse, &registered).filter(|p| registered.contains(p)) {
                Some(p) => p,
                None => continue,
            };
            let mut removed = map.remove(&pos).ok_or_else(|| invariant(pos, "xcomp merge: source"))?;
            for arg in removed.arguments.drain(..) {
                let arg = borrow(arg, RuleProvenance::L);
                map.get_mut(&top_pos)
                    .ok_or_else(|| invariant(top_pos, "xcomp merge: top"))?
                    .arguments
                    .push(arg);
            }
        }
    }

    // 2. Relative-clause resolution.
    if config.resolve_relcl && config.borrow_arg_for_relcl {
        let positions: Vec<usize> = map
            .values()
            .filter(|p| matches!(p.root.governor_relation, Relation::Acl | Relation::AclRelcl))
            .map(|p| p.position())
            .collect();
        for pos in positions {
            let gov_pos = map.get(&pos).and_then(|p| p.root.governor);
            if let Some(gov_pos) = gov_pos {
                let gov_tok = parse.token(gov_pos).clone();
                let pred = map
                    .get_mut(&pos)
                    .ok_or_else(|| invariant(pos, "relcl resolution"))?;
                pred.arguments.push(Argument::new(gov_tok, RuleProvenance::ArgResolveRelcl));
                pred.rules.push(RuleProvenance::PredResolveRelcl);
            }
        }
    }

    // 3. Conjunct subject/object borrowing.
    let conj_positions: Vec<usize> = map
        .values()
        .filter(|p| matches!(p.root.governor_relation, Relation::Conj))
        .map(|p| p.position())
        .collect();
    for pos in conj_positions {
        let gov_pos = match map.get(&pos).and_then(|p| p.root.governor) {
            Some(g) if map.contains_key(&g) => g,
            _ => continue,
        };
        if map
            .get(&pos)
            .ok_or_else(|| invariant(pos, "conj borrow: subject check"))?
            .subject()
            .is_none()
        {
            let gov_subj = map
                .get(&gov_pos)
                .ok_or_else(|| invariant(gov_pos, "conj borrow: governor"))?
                .subject()
                .cloned();
            if let Some(subj) = gov_subj {
                let arg = borrow(subj, RuleProvenance::BorrowSubj { from: gov_pos, via_object: false });
                map.get_mut(&pos)
                    .ok_or_else(|| invariant(pos, "conj borrow: subject attach"))?
                    .arguments
                    .push(arg);
            } else if let Some(top_pos) = climb_past_xcomp(gov_pos, parse, &registered) {
                if let Some(subj) = map.get(&top_pos).and_then(|p| p.subject().cloned()) {
                    let arg = borrow(subj, RuleProvenance::BorrowSubj { from: top_pos, via_object: false });
                    map.get_mut(&pos)
                        .ok_or_else(|| invariant(pos, "conj borrow: top-xcomp subject attach"))?
                        .arguments
                        .push(arg);
                }
            }
        }
        // Checked after the subject-borrow above, matching the source's
        // sequential control flow: a subject borrowed just now already
        // makes this predicate's argument list non-empty.
        let args_empty = map
            .get(&pos)
            .ok_or_else(|| invariant(pos, "conj borrow: object check"))?
            .arguments
            .is_empty();
        if args_empty {
            let gov_obj = map
                .get(&gov_pos)
                .ok_or_else(|| invariant(gov_pos, "conj borrow: governor object"))?
                .object()
                .cloned();
            if let Some(obj) = gov_obj {
                let arg = borrow(obj, RuleProvenance::BorrowObj { from: gov_pos });
                map.get_mut(&pos)
                    .ok_or_else(|| invariant(pos, "conj borrow: object attach"))?
                    .arguments
                    .push(arg);
            }
        }
    }

    // 4. Adverbial-clause subject borrowing.
    let advcl_positions: Vec<usize> = map
        .values()
        .filter(|p| matches!(p.root.governor_relation, Relation::Advcl) && p.subject().is_none())
        .map(|p| p.position())
        .collect();
    for pos in advcl_positions {
        if has_from_for_mark(parse, pos) {
            continue;
        }
        let gov_pos = match map.get(&pos).and_then(|p| p.root.governor) {
            Some(g) => g,
            None => continue,
        };
        if let Some(subj) = map.get(&gov_pos).and_then(|p| p.subject().cloned()) {
            let arg = borrow(subj, RuleProvenance::BorrowSubj { from: gov_pos, via_object: false });
            map.get_mut(&pos)
                .ok_or_else(|| invariant(pos, "advcl subject borrow: attach"))?
                .arguments
                .push(arg);
        }
    }

    // 5. Cut-mode xcomp.
    if config.cut {
        let xcomp_positions: Vec<usize> = map
            .values()
            .filter(|p| matches!(p.root.governor_relation, Relation::Xcomp))
            .map(|p| p.position())
            .collect();
        for pos in xcomp_positions {
            let mut cur = map.get(&pos).and_then(|p| p.root.governor);
            let mut g_pos = None;
            while let Some(c) = cur {
                if map.contains_key(&c) {
                    g_pos = Some(c);
                    break;
                }
                cur = parse.token(c).governor;
            }
            let g_pos = match g_pos {
                Some(g) => g,
                None => continue,
            };
            let g = map
                .get(&g_pos)
                .ok_or_else(|| invariant(g_pos, "cut-mode xcomp: ancestor"))?;
            let obj = g.object().cloned();
            let subj = g.subject().cloned();
            let g_rel_adj_like = g.root.governor_relation.is_adj_like_mod();
            let g_gov = g.root.governor;
            if let Some(obj) = obj {
                let arg = borrow(obj, RuleProvenance::CutBorrowObj { from: g_pos });
                map.get_mut(&pos)
                    .ok_or_else(|| invariant(pos, "cut-mode xcomp: object attach"))?
                    .arguments
                    .push(arg);
            } else if let Some(subj) = subj {
                let arg = borrow(subj, RuleProvenance::CutBorrowSubj { from: g_pos });
                map.get_mut(&pos)
                    .ok_or_else(|| invariant(pos, "cut-mode xcomp: subject attach"))?
                    .arguments
                    .push(arg);
            } else if g_rel_adj_like {
                if let Some(gg_pos) = g_gov {
                    let tok = parse.token(gg_pos).clone();
                    let mut arg = Argument::new(tok, RuleProvenance::CutBorrowOther { from: g_pos });
                    arg.is_borrowed = true;
                    map.get_mut(&pos)
                        .ok_or_else(|| invariant(pos, "cut-mode xcomp: other attach"))?
                        .arguments
                        .push(arg);
                }
            }
        }
    }

    // 6. Special advcl (from/for) borrowing.
    let advcl_ff_positions: Vec<usize> = map
        .values()
        .filter(|p| matches!(p.root.governor_relation, Relation::Advcl) && p.subject().is_none())
        .map(|p| p.position())
        .collect();
    for pos in advcl_ff_positions {
        if !has_from_for_mark(parse, pos) {
            continue;
        }
        let gov_pos = match map.get(&pos).and_then(|p| p.root.governor) {
            Some(g) => g,
            None => continue,
        };
        if let Some(obj) = map.get(&gov_pos).and_then(|p| p.object().cloned()) {
            let arg = borrow(obj, RuleProvenance::BorrowSubj { from: gov_pos, via_object: true });
            map.get_mut(&pos)
                .ok_or_else(|| invariant(pos, "advcl from/for borrow: attach"))?
                .arguments
                .push(arg);
        }
    }

    // 7. General subject fallback.
    let fallback_positions: Vec<usize> = map
        .values()
        .filter(|p| {
            matches!(p.predicate_type, PredicateType::Normal)
                && p.subject().is_none()
                && !matches!(p.root.governor_relation, Relation::Csubj | Relation::Csubjpass)
                && !matches!(p.root.governor_relation, Relation::Acl | Relation::AclRelcl)
                && !p.arguments.iter().any(|a| a.is_borrowed)
        })
        .map(|p| p.position())
        .collect();
    for pos in fallback_positions {
        let gov_pos = match map.get(&pos).and_then(|p| p.root.governor) {
            Some(g) if map.contains_key(&g) => g,
            _ => continue,
        };
        let gov_subj = map
            .get(&gov_pos)
            .ok_or_else(|| invariant(gov_pos, "general subject fallback: governor"))?
            .subject()
            .cloned();
        if let Some(subj) = gov_subj {
            let arg = borrow(subj, RuleProvenance::BorrowSubj { from: gov_pos, via_object: false });
            map.get_mut(&pos)
                .ok_or_else(|| invariant(pos, "general subject fallback: attach"))?
                .arguments
                .push(arg);
        } else if let Some(top_pos) = climb_past_xcomp(pos, parse, &registered) {
            if let Some(subj) = map.get(&top_pos).and_then(|p| p.subject().cloned()) {
                let arg = borrow(subj, RuleProvenance::BorrowSubj { from: top_pos, via_object: false });
                map.get_mut(&pos)
                    .ok_or_else(|| invariant(pos, "general subject fallback: top-xcomp attach"))?
                    .arguments
                    .push(arg);
            }
        }
    }

    let mut out: Vec<Predicate> = map.into_values().collect();
    out.sort_by_key(|p| p.position());
    Ok(out)
}
