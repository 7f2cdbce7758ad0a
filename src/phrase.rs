//! Predicate and argument phrase assembly, simple-mode argument filtering,
//! and trivial-token boundary stripping. All three operate on a
//! predicate/argument pair whose resolution (`resolve.rs`) has already
//! finished — phrase assembly reads `predicate.arguments` but never adds or
//! removes entries.

use std::collections::HashSet;

use crate::config::Config;
use crate::rules::RuleProvenance;
use crate::schema::{PosTag, Relation};
use crate::token::{Parse, Token};
use crate::types::{Argument, Predicate, PredicateType};

/// Collect the predicate's phrase by breadth-first traversal from its root.
/// `predicate_roots` is the full set of identified predicate positions,
/// needed for the `N3` filter. Must run
/// before [`assemble_argument_phrase`], which relies on `predicate.tokens`
/// being populated to apply the `PredicateHas` filter.
pub fn assemble_predicate_phrase(
    predicate: &mut Predicate,
    parse: &Parse,
    predicate_roots: &HashSet<usize>,
    config: &Config,
) {
    if matches!(predicate.predicate_type, PredicateType::Possessive) {
        predicate.tokens = vec![predicate.root.clone()];
        return;
    }

    let root_pos = predicate.position();
    let arg_roots: HashSet<usize> = predicate.arguments.iter().map(|a| a.position()).collect();
    let mut new_rules = Vec::new();

    let positions = parse.subtree(root_pos, |edge| {
        if arg_roots.contains(&edge.dependent) {
            new_rules.push(RuleProvenance::N2);
            return false;
        }
        if predicate_roots.contains(&edge.dependent) && !matches!(edge.relation, Relation::Amod) {
            new_rules.push(RuleProvenance::N3);
            return false;
        }
        if edge.relation.is_pred_dep_to_drop() {
            new_rules.push(RuleProvenance::N4);
            return false;
        }
        let governor_is_xcomp_dependent =
            matches!(parse.token(edge.governor).governor_relation, Relation::Xcomp);
        if (edge.governor == root_pos || governor_is_xcomp_dependent)
            && matches!(edge.relation, Relation::Cc | Relation::Conj)
        {
            new_rules.push(RuleProvenance::N5);
            return false;
        }
        if config.simple {
            match edge.relation {
                Relation::Advmod => {
                    new_rules.push(RuleProvenance::Q);
                    return false;
                }
                Relation::Aux => {
                    new_rules.push(RuleProvenance::R);
                    return false;
                }
                _ => {}
            }
        }
        new_rules.push(RuleProvenance::N1);
        true
    });

    predicate.tokens = positions.into_iter().map(|p| parse.token(p).clone()).collect();
    predicate.rules.extend(new_rules);

    if config.simple {
        return;
    }

    // Hoist `case` subtrees of arguments into the predicate phrase, except
    // when this predicate is an ADJ_LIKE modifier targeting that very
    // argument (the argument IS the predicate's governor, so its case
    // marker belongs to it, not to the predicate).
    let arg_positions: Vec<usize> = predicate.arguments.iter().map(|a| a.position()).collect();
    for (i, &arg_pos) in arg_positions.iter().enumerate() {
        let targets_this_arg = predicate.root.governor_relation.is_adj_like_mod()
            && predicate.root.governor == Some(arg_pos);
        if targets_this_arg {
            continue;
        }
        let mut hoisted = Vec::new();
        for edge in parse.outgoing(arg_pos) {
            if matches!(edge.relation, Relation::Case) {
                let case_positions = parse.subtree(edge.dependent, |_| true);
                hoisted.extend(case_positions.iter().map(|p| parse.token(*p).clone()));
                predicate.rules.push(RuleProvenance::N6);
                predicate.arguments[i].rules.push(RuleProvenance::MoveCaseTokenToPred);
            }
        }
        predicate.tokens.extend(hoisted);
    }
}

/// Collect an argument's phrase by breadth-first traversal from its root.
/// Requires `predicate.tokens` to already be assembled.
pub fn assemble_argument_phrase(predicate: &Predicate, argument: &mut Argument, parse: &Parse, config: &Config) {
    let arg_pos = argument.position();
    let pred_governor = predicate.root.governor;
    let mut new_rules = Vec::new();

    let positions = parse.subtree(arg_pos, |edge| {
        if config.big_args {
            return true;
        }
        if predicate.tokens.iter().any(|t| t.position == edge.dependent) {
            new_rules.push(RuleProvenance::PredicateHas);
            return false;
        }
        if edge.governor == arg_pos && matches!(edge.relation, Relation::Case) {
            return false;
        }
        if config.resolve_appos && matches!(edge.relation, Relation::Appos) {
            new_rules.push(RuleProvenance::DropAppos);
            return false;
        }
        if matches!(edge.relation, Relation::Dep) {
            new_rules.push(RuleProvenance::DropUnknown);
            return false;
        }
        if Some(arg_pos) == pred_governor && edge.governor == arg_pos && edge.relation.is_special_arg_dep_to_drop() {
            new_rules.push(RuleProvenance::SpecialArgDropDirectDep);
            return false;
        }
        if config.resolve_conj && edge.governor == arg_pos {
            if matches!(edge.relation, Relation::Cc | Relation::CcPreconj) {
                new_rules.push(RuleProvenance::DropCc);
                return false;
            }
            if matches!(edge.relation, Relation::Conj) {
                new_rules.push(RuleProvenance::DropConj);
                return false;
            }
        }
        new_rules.push(RuleProvenance::CleanArgToken);
        true
    });

    argument.tokens = positions.into_iter().map(|p| parse.token(p).clone()).collect();
    argument.rules.extend(new_rules);
}

/// Simple-mode argument filtering: keep only core arguments once the
/// predicate phrase has been assembled.
pub fn filter_simple_arguments(predicate: &mut Predicate, parse: &Parse) {
    let pred_pos = predicate.position();
    let targets_governor = predicate.root.governor_relation.is_adj_like_mod();
    let pred_governor = predicate.root.governor;
    let is_poss = matches!(predicate.predicate_type, PredicateType::Possessive);
    let mut new_rules = Vec::new();

    predicate.arguments.retain(|arg| {
        if is_poss {
            return true;
        }
        if targets_governor && pred_governor == Some(arg.position()) {
            return true;
        }
        if arg.root.governor_relation.is_subj() {
            return true;
        }
        if arg.root.governor_relation.is_nmod() {
            new_rules.push(RuleProvenance::P1);
            return false;
        }
        match arg.root.governor {
            None => false,
            Some(g) => g == pred_pos || matches!(parse.token(g).governor_relation, Relation::Xcomp),
        }
    });

    predicate.rules.extend(new_rules);
}

/// Sort `tokens` by position, then (if `strip`) drop leading/trailing
/// trivial tokens and collapse runs of consecutive `punct`.
/// `is_argument` gates the one exception: a leading `mark` is kept when it's
/// immediately followed by a VERB, but only for arguments — a predicate
/// phrase never starts that way. Returns whether the token count changed.
fn strip_trivial_tokens(tokens: &mut Vec<Token>, is_argument: bool) -> bool {
    tokens.sort();
    let orig_len = tokens.len();

    loop {
        match tokens.first() {
            Some(first) if first.governor_relation.is_trivial() => {
                let keep_leading_mark = is_argument
                    && matches!(first.governor_relation, Relation::Mark)
                    && tokens.get(1).is_some_and(|t| matches!(t.pos_tag, PosTag::Verb));
                if keep_leading_mark {
                    break;
                }
                tokens.remove(0);
            }
            _ => break,
        }
    }
    loop {
        match tokens.last() {
            Some(last) if last.governor_relation.is_trivial() => {
                tokens.pop();
            }
            _ => break,
        }
    }

    let mut collapsed = Vec::with_capacity(tokens.len());
    for (i, tok) in tokens.iter().enumerate() {
        let repeated_punct = matches!(tok.governor_relation, Relation::Punct)
            && tokens.get(i + 1).is_some_and(|n| matches!(n.governor_relation, Relation::Punct));
        if !repeated_punct {
            collapsed.push(tok.clone());
        }
    }
    *tokens = collapsed;

    orig_len != tokens.len()
}

fn strip_phrase(tokens: &mut Vec<Token>, rules: &mut Vec<RuleProvenance>, is_argument: bool, config: &Config) {
    if config.big_args {
        return;
    }
    tokens.sort();
    if !config.strip {
        return;
    }
    if strip_trivial_tokens(tokens, is_argument) {
        rules.push(RuleProvenance::U);
    }
}

/// Strip a predicate's phrase boundaries.
pub fn strip_predicate(predicate: &mut Predicate, config: &Config) {
    strip_phrase(&mut predicate.tokens, &mut predicate.rules, false, config);
}

/// Strip an argument's phrase boundaries.
pub fn strip_argument(argument: &mut Argument, config: &Config) {
    strip_phrase(&mut argument.tokens, &mut argument.rules, true, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVersion;
    use proptest::prelude::*;

    #[test]
    fn predicate_phrase_excludes_argument_and_other_predicate_roots() {
        let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")];
        let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let mut pred = Predicate::new(parse.token(1).clone(), PredicateType::Normal, RuleProvenance::A1);
        pred.arguments.push(Argument::new(parse.token(0).clone(), RuleProvenance::G1(parse.outgoing(1)[0].clone())));
        pred.arguments.push(Argument::new(parse.token(2).clone(), RuleProvenance::G1(parse.outgoing(1)[1].clone())));

        assemble_predicate_phrase(&mut pred, &parse, &HashSet::from([1usize]), &Config::default());

        assert_eq!(pred.tokens.len(), 1);
        assert_eq!(pred.tokens[0].position, 1);
        assert!(pred.has_rule(&RuleProvenance::N2));
    }

    #[test]
    fn case_subtree_is_hoisted_from_argument_into_predicate() {
        // "chairman of Elsevier": predicate "chairman" (AMOD-style stand-in)
        // with nmod argument "Elsevier" whose case marker "of" hoists up.
        let tokens = [("chairman", "NOUN"), ("of", "ADP"), ("Elsevier", "PROPN")];
        let edges = [("root", -1, 0), ("nmod", 0, 2), ("case", 2, 1)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let mut pred = Predicate::new(parse.token(0).clone(), PredicateType::Normal, RuleProvenance::A1);
        pred.arguments.push(Argument::new(parse.token(2).clone(), RuleProvenance::H1));

        assemble_predicate_phrase(&mut pred, &parse, &HashSet::from([0usize]), &Config::default());

        assert!(pred.tokens.iter().any(|t| t.text == "of"));
        assert!(pred.has_rule(&RuleProvenance::N6));
        assert!(pred.arguments[0].rules.iter().any(|r| matches!(r, RuleProvenance::MoveCaseTokenToPred)));
    }

    #[test]
    fn simple_mode_drops_advmod_and_aux() {
        let tokens = [("I", "PRON"), ("have", "AUX"), ("really", "ADV"), ("left", "VERB")];
        let edges = [("nsubj", 3, 0), ("aux", 3, 1), ("advmod", 3, 2), ("root", -1, 3)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let mut pred = Predicate::new(parse.token(3).clone(), PredicateType::Normal, RuleProvenance::A1);
        pred.arguments.push(Argument::new(parse.token(0).clone(), RuleProvenance::G1(parse.outgoing(3)[0].clone())));

        let mut cfg = Config::default();
        cfg.simple = true;
        assemble_predicate_phrase(&mut pred, &parse, &HashSet::from([3usize]), &cfg);

        assert_eq!(pred.tokens.len(), 1);
        assert_eq!(pred.tokens[0].position, 3);
        assert!(pred.has_rule(&RuleProvenance::Q));
        assert!(pred.has_rule(&RuleProvenance::R));
    }

    #[test]
    fn argument_phrase_drops_conj_when_resolving_coordination() {
        let tokens = [("cats", "NOUN"), ("and", "CCONJ"), ("dogs", "NOUN")];
        let edges = [("root", -1, 0), ("cc", 0, 1), ("conj", 0, 2)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let pred = Predicate::new(parse.token(0).clone(), PredicateType::Normal, RuleProvenance::A1);
        let mut arg = Argument::new(parse.token(0).clone(), RuleProvenance::G1(parse.outgoing(0)[0].clone()));

        let mut cfg = Config::default();
        cfg.resolve_conj = true;
        assemble_argument_phrase(&pred, &mut arg, &parse, &cfg);

        assert_eq!(arg.tokens.len(), 1);
        assert!(arg.rules.iter().any(|r| matches!(r, RuleProvenance::DropCc)));
        assert!(arg.rules.iter().any(|r| matches!(r, RuleProvenance::DropConj)));
    }

    #[test]
    fn filter_simple_arguments_keeps_subject_drops_nmod() {
        let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN"), ("fork", "NOUN")];
        let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2), ("nmod", 1, 3)];
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        let mut pred = Predicate::new(parse.token(1).clone(), PredicateType::Normal, RuleProvenance::A1);
        pred.arguments.push(Argument::new(parse.token(0).clone(), RuleProvenance::G1(parse.outgoing(1)[0].clone())));
        pred.arguments.push(Argument::new(parse.token(3).clone(), RuleProvenance::H1));

        filter_simple_arguments(&mut pred, &parse);

        assert_eq!(pred.arguments.len(), 1);
        assert_eq!(pred.arguments[0].position(), 0);
        assert!(pred.has_rule(&RuleProvenance::P1));
    }

    #[test]
    fn strip_trivial_tokens_removes_boundary_punctuation() {
        let mut toks = vec![
            Token {
                position: 0,
                text: "said".into(),
                pos_tag: PosTag::Verb,
                governor: None,
                governor_relation: Relation::Root,
                outgoing: Vec::new(),
            },
            Token {
                position: 1,
                text: ";".into(),
                pos_tag: PosTag::Punct,
                governor: Some(0),
                governor_relation: Relation::Punct,
                outgoing: Vec::new(),
            },
            Token {
                position: 2,
                text: ".".into(),
                pos_tag: PosTag::Punct,
                governor: Some(0),
                governor_relation: Relation::Punct,
                outgoing: Vec::new(),
            },
        ];
        let changed = strip_trivial_tokens(&mut toks, false);
        assert!(changed);
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].text, "said");
    }

    proptest! {
        // Property 7 (spec strip idempotence): applying the boundary-strip
        // procedure a second time never changes an already-stripped list.
        #[test]
        fn strip_trivial_tokens_is_idempotent(tags in prop::collection::vec(0u8..6, 1..12)) {
            let tokens: Vec<Token> = tags
                .into_iter()
                .enumerate()
                .map(|(i, tag)| {
                    let (relation, pos_tag) = match tag {
                        0 => (Relation::Mark, PosTag::Sconj),
                        1 => (Relation::Cc, PosTag::Cconj),
                        2 => (Relation::Punct, PosTag::Punct),
                        3 => (Relation::Nsubj, PosTag::Noun),
                        4 => (Relation::Dobj, PosTag::Noun),
                        _ => (Relation::Root, PosTag::Verb),
                    };
                    Token {
                        position: i,
                        text: format!("t{i}"),
                        pos_tag,
                        governor: if i == 0 { None } else { Some(0) },
                        governor_relation: relation,
                        outgoing: Vec::new(),
                    }
                })
                .collect();

            let mut once = tokens.clone();
            strip_trivial_tokens(&mut once, true);
            let mut twice = once.clone();
            let changed_again = strip_trivial_tokens(&mut twice, true);

            prop_assert!(!changed_again);
            let once_positions: Vec<usize> = once.iter().map(|t| t.position).collect();
            let twice_positions: Vec<usize> = twice.iter().map(|t| t.position).collect();
            prop_assert_eq!(once_positions, twice_positions);
        }
    }
}
