//! Pretty-printing and the linearized flat-string format: a human-readable
//! tabular rendering plus a round-trippable flat-string encoding of one
//! extraction instance.

use std::fmt::Write as _;

use crate::schema::{PosTag, Relation};
use crate::types::{Argument, Predicate, PredicateType};

/// The i-th argument's placeholder name: `?a`, `?b`, ..., `?z`, `?a1`, ...
fn argument_name(i: usize) -> String {
    let letter = (b'a' + (i % 26) as u8) as char;
    if i >= 26 {
        format!("?{}{}", letter, i / 26)
    } else {
        format!("?{}", letter)
    }
}

/// Whichever of the predicate's tokens or arguments sort at `position`, for
/// interleaving the two in the pretty-printed predicate phrase.
enum Item<'p> {
    Token(&'p crate::token::Token),
    Arg(usize, &'p Argument),
}

impl Item<'_> {
    fn position(&self) -> usize {
        match self {
            Item::Token(t) => t.position,
            Item::Arg(_, a) => a.position(),
        }
    }
}

fn sorted_items(predicate: &Predicate) -> Vec<Item<'_>> {
    let mut items: Vec<Item<'_>> = predicate.tokens.iter().map(Item::Token).collect();
    items.extend(predicate.arguments.iter().enumerate().map(|(i, a)| Item::Arg(i, a)));
    items.sort_by_key(|i| i.position());
    items
}

/// The predicate-phrase string with `?a`/`?b`/... placeholders in place of
/// argument spans.
pub fn format_predicate(predicate: &Predicate) -> String {
    match predicate.predicate_type {
        PredicateType::Possessive => {
            let names: Vec<String> = (0..predicate.arguments.len()).map(argument_name).collect();
            format!("{} poss {}", names.first().cloned().unwrap_or_default(), names.get(1).cloned().unwrap_or_default())
        }
        PredicateType::Appositive | PredicateType::AdjectivalModifier => {
            let items = sorted_items(predicate);
            let gov = predicate.root.governor;
            let gov_index = items.iter().position(|it| matches!(it, Item::Arg(_, a) if Some(a.position()) == gov));

            let mut parts: Vec<String> = Vec::new();
            if let Some(idx) = gov_index {
                if let Item::Arg(i, _) = &items[idx] {
                    parts.push(argument_name(*i));
                }
                parts.push("is/are".to_string());
                for (idx2, item) in items.iter().enumerate() {
                    if idx2 == idx {
                        continue;
                    }
                    parts.push(render_item(item));
                }
            } else {
                // No argument matches the predicate's governor: fall back to
                // the first argument, matching `core/predicate.py`'s
                // `args[0]` fallback.
                if let Some((i, _)) = predicate.arguments.first().map(|a| (0usize, a)) {
                    parts.push(argument_name(i));
                }
                parts.push("is/are".to_string());
                for item in items.iter().skip(1) {
                    parts.push(render_item(item));
                }
            }
            parts.join(" ")
        }
        PredicateType::Normal => {
            let items = sorted_items(predicate);
            let insert_copula = matches!(predicate.root.governor_relation, Relation::Xcomp)
                && !matches!(predicate.root.pos_tag, PosTag::Verb | PosTag::Adj);

            let mut parts: Vec<String> = Vec::new();
            let mut inserted = false;
            for item in &items {
                let is_arg = matches!(item, Item::Arg(..));
                parts.push(render_item(item));
                if insert_copula && is_arg && !inserted {
                    parts.push("is/are".to_string());
                    inserted = true;
                }
            }
            parts.join(" ")
        }
    }
}

fn render_item(item: &Item<'_>) -> String {
    match item {
        Item::Token(t) => t.text.clone(),
        Item::Arg(i, _) => argument_name(*i),
    }
}

/// True if `argument`'s governing relation marks it as an embedded clause
/// rather than a plain noun phrase.
fn is_clausal(argument: &Argument) -> bool {
    matches!(
        argument.root.governor_relation,
        Relation::Ccomp | Relation::Csubj | Relation::Csubjpass | Relation::Xcomp
    )
}

/// Full multi-line pretty-print of one predicate instance. `verbose` appends
/// each item's rule-provenance chain in parentheses when true.
pub fn pprint_predicate(predicate: &Predicate, verbose: bool) -> String {
    let mut out = String::new();
    let pred_verbose = if verbose { format!(" {}", render_rules(&predicate.rules)) } else { String::new() };
    let _ = writeln!(out, "\t{}{}", format_predicate(predicate), pred_verbose);

    for (i, argument) in predicate.arguments.iter().enumerate() {
        let name = argument_name(i);
        let phrase = argument.to_string();
        let rendered = if is_clausal(argument)
            && matches!(predicate.predicate_type, PredicateType::Normal)
            && argument
                .root
                .governor
                .map(|g| predicate.tokens.iter().any(|t| t.position == g))
                .unwrap_or(false)
        {
            format!("SOMETHING := {phrase}")
        } else {
            phrase
        };
        let arg_verbose = if verbose { format!(" {}", render_rules(&argument.rules)) } else { String::new() };
        let _ = writeln!(out, "\t\t{name}: {rendered}{arg_verbose}");
    }
    out
}

fn render_rules(rules: &[crate::rules::RuleProvenance]) -> String {
    format!("({})", rules.iter().map(|r| r.name()).collect::<Vec<_>>().join(","))
}

/// Pretty-print an entire extraction result, one block per instance
/// separated by a blank line.
pub fn pprint(instances: &[Predicate], verbose: bool) -> String {
    instances
        .iter()
        .map(|p| pprint_predicate(p, verbose))
        .collect::<Vec<_>>()
        .join("\n")
}

const ARG_OPEN: &str = "^((";
const ARG_CLOSE: &str = "))$";
const PRED_OPEN: &str = "^(((";
const PRED_CLOSE: &str = ")))$";
const ARGPRED_OPEN: &str = "^(((:a";
const ARGPRED_CLOSE: &str = ")))$:a";
const ARG_SUF: &str = ":a";
const PRED_SUF: &str = ":p";
const HEADER_SUF: &str = "_h";
const SOMETHING: &str = "SOMETHING:a=";

/// Serialize one predicate instance to the round-trippable flat-string
/// format: bracket markers delimit predicate and argument spans, and a `:a`
/// / `:p` suffix (with a trailing `_h` on each span's head token) tags every
/// word with its role.
pub fn linearize(predicate: &Predicate) -> String {
    let mut out = Vec::new();
    flatten_predicate(predicate, false, &mut out);
    out.join(" ")
}

fn flatten_predicate(predicate: &Predicate, as_arg_value: bool, out: &mut Vec<String>) {
    let (open, close) = if as_arg_value { (ARGPRED_OPEN, ARGPRED_CLOSE) } else { (PRED_OPEN, PRED_CLOSE) };
    out.push(open.to_string());

    match predicate.predicate_type {
        PredicateType::Possessive => {
            let mut args = predicate.arguments.iter().collect::<Vec<_>>();
            args.sort_by_key(|a| a.position());
            if let Some(first) = args.first() {
                flatten_argument(first, out);
            }
            out.push(format!("poss{PRED_SUF}{HEADER_SUF}"));
            if let Some(second) = args.get(1) {
                flatten_argument(second, out);
            }
        }
        PredicateType::Appositive | PredicateType::AdjectivalModifier => {
            let gov = predicate.root.governor;
            let mut args = predicate.arguments.iter().collect::<Vec<_>>();
            args.sort_by_key(|a| a.position());
            let gov_idx = args.iter().position(|a| Some(a.position()) == gov);

            let mut items = build_token_arg_stream(predicate);
            if let Some(idx) = gov_idx {
                let gov_arg = args[idx];
                flatten_argument(gov_arg, out);
                out.push(format!("is/are{PRED_SUF}{HEADER_SUF}"));
                items.retain(|it| !matches!(it, Item::Arg(_, a) if a.position() == gov_arg.position()));
            } else {
                out.push(format!("is/are{PRED_SUF}{HEADER_SUF}"));
            }
            emit_items(&items, predicate, out);
        }
        PredicateType::Normal => {
            let items = build_token_arg_stream(predicate);
            emit_items(&items, predicate, out);
        }
    }

    out.push(close.to_string());
}

/// Sorted stream of the predicate's own tokens (as `Item::Token`) merged
/// with its arguments (as `Item::Arg`), for flattening.
fn build_token_arg_stream(predicate: &Predicate) -> Vec<Item<'_>> {
    sorted_items(predicate)
}

fn emit_items<'p>(items: &[Item<'p>], predicate: &'p Predicate, out: &mut Vec<String>) {
    let mut head_emitted = false;
    for item in items {
        match item {
            Item::Token(t) => {
                let suffix = if !head_emitted && t.position == predicate.root.position {
                    head_emitted = true;
                    format!("{PRED_SUF}{HEADER_SUF}")
                } else {
                    PRED_SUF.to_string()
                };
                out.push(format!("{}{}", t.text, suffix));
            }
            Item::Arg(_, a) => {
                if is_clausal(a)
                    && matches!(predicate.predicate_type, PredicateType::Normal)
                    && a.root
                        .governor
                        .map(|g| predicate.tokens.iter().any(|t| t.position == g))
                        .unwrap_or(false)
                {
                    out.push(SOMETHING.to_string());
                }
                flatten_argument(a, out);
            }
        }
    }
}

fn flatten_argument(argument: &Argument, out: &mut Vec<String>) {
    out.push(ARG_OPEN.to_string());
    let mut tokens = argument.tokens.clone();
    tokens.sort();
    for token in &tokens {
        let suffix = if token.position == argument.root.position {
            format!("{ARG_SUF}{HEADER_SUF}")
        } else {
            ARG_SUF.to_string()
        };
        out.push(format!("{}{}", token.text, suffix));
    }
    out.push(ARG_CLOSE.to_string());
}

/// Reconstruct predicates from a string produced by [`linearize`]. Positions
/// are assigned from the flat-string index; reconstructed tokens carry no
/// POS tag, since the flat format doesn't encode one.
pub fn parse_flat(input: &str) -> Vec<Predicate> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let mut position = 0usize;
    let mut predicates = Vec::new();
    let mut i = 0usize;
    while i < words.len() {
        if words[i] == PRED_OPEN || words[i] == ARGPRED_OPEN {
            let (predicate, consumed, next_pos) = parse_predicate_block(&words[i..], position);
            predicates.push(predicate);
            i += consumed;
            position = next_pos;
        } else {
            i += 1;
        }
    }
    predicates
}

fn parse_predicate_block(words: &[&str], start_position: usize) -> (Predicate, usize, usize) {
    use crate::rules::RuleProvenance;
    use crate::schema::Relation;
    use crate::token::Token;

    let mut position = start_position;
    let mut tokens: Vec<Token> = Vec::new();
    let mut root_position = start_position;
    let mut arguments: Vec<Argument> = Vec::new();
    let mut i = 1; // skip opening marker

    while i < words.len() {
        let word = words[i];
        if word == PRED_CLOSE || word == ARGPRED_CLOSE {
            i += 1;
            break;
        } else if word == ARG_OPEN {
            let (argument, consumed, next_pos) = parse_argument_block(&words[i..], position);
            arguments.push(argument);
            i += consumed;
            position = next_pos;
        } else if word == SOMETHING {
            i += 1;
        } else if let Some(rest) = word.strip_suffix(&format!("{PRED_SUF}{HEADER_SUF}")) {
            root_position = position;
            tokens.push(bare_token(position, rest));
            position += 1;
            i += 1;
        } else if let Some(rest) = word.strip_suffix(PRED_SUF) {
            tokens.push(bare_token(position, rest));
            position += 1;
            i += 1;
        } else {
            i += 1;
        }
    }

    let mut predicate = Predicate::new(
        tokens
            .iter()
            .find(|t| t.position == root_position)
            .cloned()
            .unwrap_or_else(|| bare_token(root_position, "")),
        PredicateType::Normal,
        RuleProvenance::A1,
    );
    predicate.tokens = tokens;
    predicate.arguments = arguments;
    let _ = Relation::Root;
    (predicate, i, position)
}

fn parse_argument_block(words: &[&str], start_position: usize) -> (Argument, usize, usize) {
    use crate::rules::RuleProvenance;
    use crate::token::Token;

    let mut position = start_position;
    let mut tokens: Vec<Token> = Vec::new();
    let mut root_position = start_position;
    let mut i = 1;

    while i < words.len() {
        let word = words[i];
        if word == ARG_CLOSE {
            i += 1;
            break;
        } else if let Some(rest) = word.strip_suffix(&format!("{ARG_SUF}{HEADER_SUF}")) {
            root_position = position;
            tokens.push(bare_token(position, rest));
            position += 1;
            i += 1;
        } else if let Some(rest) = word.strip_suffix(ARG_SUF) {
            tokens.push(bare_token(position, rest));
            position += 1;
            i += 1;
        } else {
            i += 1;
        }
    }

    let root = tokens
        .iter()
        .find(|t| t.position == root_position)
        .cloned()
        .unwrap_or_else(|| bare_token(root_position, ""));
    let mut argument = Argument::new(root, RuleProvenance::G1(crate::token::Edge {
        relation: crate::schema::Relation::Other(String::new()),
        governor: 0,
        dependent: 0,
    }));
    argument.tokens = tokens;
    (argument, i, position)
}

fn bare_token(position: usize, text: &str) -> crate::token::Token {
    crate::token::Token {
        position,
        text: text.to_string(),
        pos_tag: PosTag::X,
        governor: None,
        governor_relation: Relation::Root,
        outgoing: Vec::new(),
    }
}
