//! Output data model: predicate types, predicates, and arguments.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rules::RuleProvenance;
use crate::token::Token;

/// Which template governed a predicate's argument identification and
/// phrase-assembly behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateType {
    Normal,
    Possessive,
    Appositive,
    AdjectivalModifier,
}

/// An argument slot of a predicate: one root token plus the assembled token
/// span that realizes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argument {
    pub root: Token,
    pub tokens: Vec<Token>,
    pub rules: Vec<RuleProvenance>,
    /// True if this argument's root belongs to (or was originally extracted
    /// for) a different predicate, per the reference/borrowed-argument model
    /// to a different predicate.
    pub is_borrowed: bool,
}

impl Argument {
    /// A freshly-identified argument rooted at `root`, with no phrase tokens
    /// yet (phrase assembly runs later in the pipeline).
    pub fn new(root: Token, rule: RuleProvenance) -> Self {
        Self {
            root,
            tokens: Vec::new(),
            rules: vec![rule],
            is_borrowed: false,
        }
    }

    pub fn position(&self) -> usize {
        self.root.position
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = self.tokens.clone();
        tokens.sort();
        write!(
            f,
            "{}",
            tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}

/// One extracted predicate instance: a head, a type, an assembled token
/// span, and its resolved arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predicate {
    pub root: Token,
    pub predicate_type: PredicateType,
    pub tokens: Vec<Token>,
    pub arguments: Vec<Argument>,
    pub rules: Vec<RuleProvenance>,
}

impl Predicate {
    /// A freshly-identified predicate with only its root and type: arguments
    /// are attached during argument-identification, `tokens` during phrase
    /// assembly.
    pub fn new(root: Token, predicate_type: PredicateType, rule: RuleProvenance) -> Self {
        Self {
            root,
            predicate_type,
            tokens: Vec::new(),
            arguments: Vec::new(),
            rules: vec![rule],
        }
    }

    pub fn position(&self) -> usize {
        self.root.position
    }

    /// True if the predicate's provenance includes a rule of the same
    /// variant as `tag` (context ignored).
    pub fn has_rule(&self, tag: &RuleProvenance) -> bool {
        self.rules.iter().any(|r| r.same_rule(tag))
    }

    /// The predicate's subject argument, if one has been identified: an
    /// argument whose governing relation on its root is a SUBJ relation.
    pub fn subject(&self) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.root.governor_relation.is_subj())
    }

    pub fn subject_mut(&mut self) -> Option<&mut Argument> {
        self.arguments
            .iter_mut()
            .find(|a| a.root.governor_relation.is_subj())
    }

    /// The predicate's object argument, if one has been identified.
    pub fn object(&self) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.root.governor_relation.is_obj())
    }

    /// Whether a non-verb predicate phrase should still be rendered with the
    /// `is/are` copula, used by the pretty-printer. True if the root's POS is
    /// VERB/AUX, or the phrase already contains an `aux`/`cop` dependent of
    /// the root.
    pub fn looks_verbal(&self) -> bool {
        use crate::schema::PosTag;
        use crate::schema::Relation;
        if matches!(self.root.pos_tag, PosTag::Verb | PosTag::Aux) {
            return true;
        }
        self.root
            .outgoing
            .iter()
            .any(|e| matches!(e.relation, Relation::Aux | Relation::Cop))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = self.tokens.clone();
        tokens.sort();
        write!(
            f,
            "{}",
            tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}
