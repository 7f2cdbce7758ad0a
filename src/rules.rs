//! The rule taxonomy: every extraction decision is recorded as one
//! `RuleProvenance` value on the predicate or argument it affected, so a
//! downstream consumer can justify or filter an extraction after the fact.
//!
//! Two provenance values are equal iff they are the same variant — the
//! context each variant carries (an edge, a lender's root position, a
//! borrowed token) is for display only and never considered. Rendered names
//! are a fixed mapping, not derived by reflection, so that the exact
//! lowercase spelling (`a1`, `pred_conj_borrow_aux_neg`, ...) is a property
//! tested directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::Relation;
use crate::token::{Edge, Token};

/// One recorded extraction decision, naming the rule that made it plus any
/// context needed to render a diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RuleProvenance {
    // --- predicate-root rules ---
    /// `ccomp`/`csubj`/`csubjpass` dependent.
    A1,
    /// `xcomp` dependent.
    A2,
    /// `advcl`/`acl`/`acl:relcl` dependent.
    B,
    /// Governor of a core-arg-like edge (`gov_looks_like_predicate`).
    C(Edge),
    /// `appos` dependent.
    D,
    /// `amod` dependent whose POS is ADJ and whose governor's POS is not ADJ.
    E,
    /// `nmod:poss` dependent.
    V,
    /// Conjunct of an already-identified predicate.
    F,

    // --- argument-root rules ---
    /// Dependent of `nsubj`/`nsubjpass`/`dobj`/`iobj`.
    G1(Edge),
    /// Direct `nmod`/`obl` dependent of the predicate root.
    H1,
    /// `nmod`/`obl` dependent reached via an `advmod`.
    H2,
    /// Governor of an AMOD predicate.
    I,
    /// Governor of an APPOS predicate.
    J,
    /// Governor of an `nmod:poss` edge (POSS type).
    W1,
    /// Dependent of an `nmod:poss` edge — the predicate root itself (POSS type).
    W2,
    /// `ccomp`/`csubj`/`csubjpass` dependent, or `xcomp` dependent under cut mode.
    K,

    // --- resolution rules ---
    /// xcomp merge into the top xcomp predicate.
    L,
    /// Argument conjunct pulled in during coordination expansion.
    M,
    /// Relative-clause argument borrowed from the predicate's governor.
    ArgResolveRelcl,
    /// Predicate tagged as having undergone relative-clause resolution.
    PredResolveRelcl,
    /// Subject borrowed from `from` (the lending predicate's root position).
    /// `via_object` records the from/for advcl special case: the tag is
    /// `BorrowSubj` even though the borrowed argument is actually the
    /// lender's object.
    BorrowSubj { from: usize, via_object: bool },
    /// Object borrowed from `from`.
    BorrowObj { from: usize },
    /// Cut-mode: subject borrowed from the nearest ancestor predicate with one.
    CutBorrowSubj { from: usize },
    /// Cut-mode: object borrowed from the nearest ancestor predicate with one.
    CutBorrowObj { from: usize },
    /// Cut-mode: the ancestor's governor introduced as a fresh argument.
    CutBorrowOther { from: usize },
    /// Dummy English relative-pronoun argument (`that`/`which`/`who`)
    /// filtered from a relcl-resolved predicate.
    EnRelclDummyArgFilter,

    // --- phrase construction rules ---
    /// Predicate-phrase token included by tree traversal.
    N1,
    /// Excluded: dependent is an argument root of this predicate.
    N2,
    /// Excluded: dependent is the root of another predicate (non-`amod`).
    N3,
    /// Excluded: relation is in `PRED_DEPS_TO_DROP`.
    N4,
    /// Excluded: `cc`/`conj` edge handled by coordination or xcomp merging.
    N5,
    /// An argument's `case` dependents hoisted into the predicate phrase.
    N6,
    /// Argument-phrase token included unconditionally (non-filtering path).
    CleanArgToken,
    /// Excluded: `appos` subtree dropped from an argument phrase.
    DropAppos,
    /// Excluded: `dep` edge dropped from an argument phrase.
    DropUnknown,
    /// Excluded: `cc`/`cc:preconj` dropped (pulled back in by coordination).
    DropCc,
    /// Excluded: `conj` dropped (pulled back in by coordination).
    DropConj,
    /// Excluded: token already present in the predicate's phrase.
    PredicateHas,
    /// Excluded: direct dependent of an argument root that is also the
    /// predicate's governor, relation in `SPECIAL_ARG_DEPS_TO_DROP`.
    SpecialArgDropDirectDep,
    /// An argument's `case` subtree moved onto the predicate phrase.
    MoveCaseTokenToPred,

    // --- conjunction rules ---
    /// `neg` dependents of the governing predicate borrowed into a conjunct.
    PredConjBorrowAuxNeg { from: usize, token: usize },
    /// Tokens of `top_xcomp`'s phrase borrowed into a conjunct predicate.
    PredConjBorrowTokensXcomp { from: usize, token: usize },

    // --- simplification / cleanup rules ---
    /// Non-core argument dropped in simple mode.
    P1,
    /// `advmod` dropped from a simple predicate phrase.
    Q,
    /// `aux` dropped from a simple predicate phrase.
    R,
    /// Trivial tokens stripped from phrase boundaries.
    U,
}

impl RuleProvenance {
    /// The fixed lowercase spelling used in diagnostics and regression
    /// output.
    pub fn name(&self) -> &'static str {
        match self {
            RuleProvenance::A1 => "a1",
            RuleProvenance::A2 => "a2",
            RuleProvenance::B => "b",
            RuleProvenance::C(_) => "c",
            RuleProvenance::D => "d",
            RuleProvenance::E => "e",
            RuleProvenance::V => "v",
            RuleProvenance::F => "f",
            RuleProvenance::G1(_) => "g1",
            RuleProvenance::H1 => "h1",
            RuleProvenance::H2 => "h2",
            RuleProvenance::I => "i",
            RuleProvenance::J => "j",
            RuleProvenance::W1 => "w1",
            RuleProvenance::W2 => "w2",
            RuleProvenance::K => "k",
            RuleProvenance::L => "l",
            RuleProvenance::M => "m",
            RuleProvenance::ArgResolveRelcl => "arg_resolve_relcl",
            RuleProvenance::PredResolveRelcl => "pred_resolve_relcl",
            RuleProvenance::BorrowSubj { .. } => "borrow_subj",
            RuleProvenance::BorrowObj { .. } => "borrow_obj",
            RuleProvenance::CutBorrowSubj { .. } => "cut_borrow_subj",
            RuleProvenance::CutBorrowObj { .. } => "cut_borrow_obj",
            RuleProvenance::CutBorrowOther { .. } => "cut_borrow_other",
            RuleProvenance::EnRelclDummyArgFilter => "en_relcl_dummy_arg_filter",
            RuleProvenance::N1 => "n1",
            RuleProvenance::N2 => "n2",
            RuleProvenance::N3 => "n3",
            RuleProvenance::N4 => "n4",
            RuleProvenance::N5 => "n5",
            RuleProvenance::N6 => "n6",
            RuleProvenance::CleanArgToken => "clean_arg_token",
            RuleProvenance::DropAppos => "drop_appos",
            RuleProvenance::DropUnknown => "drop_unknown",
            RuleProvenance::DropCc => "drop_cc",
            RuleProvenance::DropConj => "drop_conj",
            RuleProvenance::PredicateHas => "predicate_has",
            RuleProvenance::SpecialArgDropDirectDep => "special_arg_drop_direct_dep",
            RuleProvenance::MoveCaseTokenToPred => "move_case_token_to_pred",
            RuleProvenance::PredConjBorrowAuxNeg { .. } => "pred_conj_borrow_aux_neg",
            RuleProvenance::PredConjBorrowTokensXcomp { .. } => "pred_conj_borrow_tokens_xcomp",
            RuleProvenance::P1 => "p1",
            RuleProvenance::Q => "q",
            RuleProvenance::R => "r",
            RuleProvenance::U => "u",
        }
    }

    /// Provenance equality: same variant, context ignored.
    pub fn same_rule(&self, other: &RuleProvenance) -> bool {
        self.name() == other.name()
    }
}

impl fmt::Display for RuleProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `gov_looks_like_predicate(edge)`: true if the edge's governor is a VERB
/// and the relation is `nmod`/`nmod:npmod`/`obl`/`obl:npmod`, OR the
/// relation is one of `nsubj`/`nsubjpass`/`csubj`/`csubjpass`/`dobj`/`iobj`/
/// `ccomp`/`xcomp`/`advcl`.
pub fn gov_looks_like_predicate(edge: &Edge, governor: &Token) -> bool {
    use crate::schema::PosTag;
    let nmod_like = matches!(governor.pos_tag, PosTag::Verb)
        && matches!(
            edge.relation,
            Relation::Nmod | Relation::NmodNpmod | Relation::Obl | Relation::OblNpmod
        );
    let core = matches!(
        edge.relation,
        Relation::Nsubj
            | Relation::Nsubjpass
            | Relation::Csubj
            | Relation::Csubjpass
            | Relation::Dobj
            | Relation::Iobj
            | Relation::Ccomp
            | Relation::Xcomp
            | Relation::Advcl
    );
    nmod_like || core
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_are_lowercase_and_stable() {
        assert_eq!(RuleProvenance::A1.name(), "a1");
        assert_eq!(
            RuleProvenance::PredConjBorrowAuxNeg { from: 0, token: 0 }.name(),
            "pred_conj_borrow_aux_neg"
        );
        assert_eq!(RuleProvenance::EnRelclDummyArgFilter.name(), "en_relcl_dummy_arg_filter");
    }

    #[test]
    fn equality_ignores_context() {
        let a = RuleProvenance::BorrowSubj { from: 1, via_object: false };
        let b = RuleProvenance::BorrowSubj { from: 99, via_object: true };
        assert!(a.same_rule(&b));
    }
}
