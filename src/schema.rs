//! Universal Dependencies schema: POS tags, relation constants, and the
//! named relation sets the rule cascade dispatches on.
//!
//! Two UD schema versions differ in spelling only (v1 `nsubjpass` vs v2
//! `nsubj:pass`, v1 `dobj` vs v2 `obj`, v1 folds `obl` into `nmod`, etc). We
//! model the relation itself as a single canonical [`Relation`] enum and push
//! the version-dependent surface spelling into [`SchemaVersion::parse`] and
//! [`SchemaVersion::label`], so the rule cascade never has to know which
//! schema produced the parse it's walking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal Dependencies part-of-speech tags.
///
/// Reference: <http://universaldependencies.org/u/pos/index.html>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Adj,
    Adv,
    Intj,
    Noun,
    Propn,
    Verb,
    Adp,
    Aux,
    Cconj,
    Det,
    Num,
    Part,
    Pron,
    Sconj,
    Punct,
    Sym,
    X,
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PosTag {
    /// The canonical UD string spelling (`"VERB"`, `"PUNCT"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adv => "ADV",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Propn => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Adp => "ADP",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Sconj => "SCONJ",
            PosTag::Punct => "PUNCT",
            PosTag::Sym => "SYM",
            PosTag::X => "X",
        }
    }
}

impl std::str::FromStr for PosTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ADJ" => PosTag::Adj,
            "ADV" => PosTag::Adv,
            "INTJ" => PosTag::Intj,
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::Propn,
            "VERB" => PosTag::Verb,
            "ADP" => PosTag::Adp,
            "AUX" => PosTag::Aux,
            "CCONJ" => PosTag::Cconj,
            "DET" => PosTag::Det,
            "NUM" => PosTag::Num,
            "PART" => PosTag::Part,
            "PRON" => PosTag::Pron,
            "SCONJ" => PosTag::Sconj,
            "PUNCT" => PosTag::Punct,
            "SYM" => PosTag::Sym,
            _ => PosTag::X,
        })
    }
}

/// The active Universal Dependencies relation schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaVersion {
    V1,
    V2,
}

/// A canonical dependency relation, independent of the surface spelling used
/// by either schema version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Nsubj,
    Nsubjpass,
    Csubj,
    Csubjpass,
    Dobj,
    Iobj,
    Nmod,
    NmodPoss,
    NmodTmod,
    NmodNpmod,
    Obl,
    OblNpmod,
    Appos,
    Amod,
    Advmod,
    Ccomp,
    Xcomp,
    Advcl,
    Acl,
    AclRelcl,
    Aux,
    Auxpass,
    Cop,
    Neg,
    Mark,
    Case,
    Cc,
    Conj,
    CcPreconj,
    Punct,
    Parataxis,
    Dep,
    Fixed,
    Root,
    /// A relation outside the set the rule cascade cares about (e.g. `det`,
    /// `compound`, `nummod`). Carried verbatim so phrase rendering can still
    /// show the original dependency label.
    Other(String),
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SchemaVersion::V2.label(self))
    }
}

impl SchemaVersion {
    /// Parse a raw CoNLL-style relation label (e.g. `"nsubj:pass"`,
    /// `"acl:relcl"`) under this schema into a canonical [`Relation`].
    pub fn parse(&self, label: &str) -> Relation {
        match (self, label) {
            (_, "nsubj") => Relation::Nsubj,
            (SchemaVersion::V1, "nsubjpass") | (SchemaVersion::V2, "nsubj:pass") => {
                Relation::Nsubjpass
            }
            (_, "csubj") => Relation::Csubj,
            (SchemaVersion::V1, "csubjpass") | (SchemaVersion::V2, "csubj:pass") => {
                Relation::Csubjpass
            }
            (SchemaVersion::V1, "dobj") | (SchemaVersion::V2, "obj") => Relation::Dobj,
            (_, "iobj") => Relation::Iobj,
            (_, "nmod") => Relation::Nmod,
            (_, "nmod:poss") => Relation::NmodPoss,
            (_, "nmod:tmod") => Relation::NmodTmod,
            (_, "nmod:npmod") => Relation::NmodNpmod,
            (SchemaVersion::V2, "obl") => Relation::Obl,
            (SchemaVersion::V2, "obl:npmod") => Relation::OblNpmod,
            (_, "appos") => Relation::Appos,
            (_, "amod") => Relation::Amod,
            (_, "advmod") => Relation::Advmod,
            (_, "ccomp") => Relation::Ccomp,
            (_, "xcomp") => Relation::Xcomp,
            (_, "advcl") => Relation::Advcl,
            (_, "acl:relcl") => Relation::AclRelcl,
            (_, "acl") => Relation::Acl,
            (_, "aux") => Relation::Aux,
            (SchemaVersion::V1, "auxpass") | (SchemaVersion::V2, "aux:pass") => Relation::Auxpass,
            (_, "cop") => Relation::Cop,
            (_, "neg") => Relation::Neg,
            (_, "mark") => Relation::Mark,
            (_, "case") => Relation::Case,
            (_, "cc") => Relation::Cc,
            (_, "conj") => Relation::Conj,
            (_, "cc:preconj") => Relation::CcPreconj,
            (_, "punct") => Relation::Punct,
            (_, "parataxis") => Relation::Parataxis,
            (_, "dep") => Relation::Dep,
            (_, "fixed") => Relation::Fixed,
            (_, "root") => Relation::Root,
            (_, other) => Relation::Other(other.to_string()),
        }
    }

    /// Render a canonical relation back to this schema's surface spelling.
    pub fn label(&self, rel: &Relation) -> String {
        match (self, rel) {
            (_, Relation::Nsubj) => "nsubj".into(),
            (SchemaVersion::V1, Relation::Nsubjpass) => "nsubjpass".into(),
            (SchemaVersion::V2, Relation::Nsubjpass) => "nsubj:pass".into(),
            (_, Relation::Csubj) => "csubj".into(),
            (SchemaVersion::V1, Relation::Csubjpass) => "csubjpass".into(),
            (SchemaVersion::V2, Relation::Csubjpass) => "csubj:pass".into(),
            (SchemaVersion::V1, Relation::Dobj) => "dobj".into(),
            (SchemaVersion::V2, Relation::Dobj) => "obj".into(),
            (_, Relation::Iobj) => "iobj".into(),
            (SchemaVersion::V1, Relation::Obl) => "nmod".into(),
            (SchemaVersion::V2, Relation::Obl) => "obl".into(),
            (SchemaVersion::V1, Relation::OblNpmod) => "nmod:npmod".into(),
            (SchemaVersion::V2, Relation::OblNpmod) => "obl:npmod".into(),
            (_, Relation::Nmod) => "nmod".into(),
            (_, Relation::NmodPoss) => "nmod:poss".into(),
            (_, Relation::NmodTmod) => "nmod:tmod".into(),
            (_, Relation::NmodNpmod) => "nmod:npmod".into(),
            (_, Relation::Appos) => "appos".into(),
            (_, Relation::Amod) => "amod".into(),
            (_, Relation::Advmod) => "advmod".into(),
            (_, Relation::Ccomp) => "ccomp".into(),
            (_, Relation::Xcomp) => "xcomp".into(),
            (_, Relation::Advcl) => "advcl".into(),
            (_, Relation::AclRelcl) => "acl:relcl".into(),
            (_, Relation::Acl) => "acl".into(),
            (_, Relation::Aux) => "aux".into(),
            (SchemaVersion::V1, Relation::Auxpass) => "auxpass".into(),
            (SchemaVersion::V2, Relation::Auxpass) => "aux:pass".into(),
            (_, Relation::Cop) => "cop".into(),
            (_, Relation::Neg) => "neg".into(),
            (_, Relation::Mark) => "mark".into(),
            (_, Relation::Case) => "case".into(),
            (_, Relation::Cc) => "cc".into(),
            (_, Relation::Conj) => "conj".into(),
            (_, Relation::CcPreconj) => "cc:preconj".into(),
            (_, Relation::Punct) => "punct".into(),
            (_, Relation::Parataxis) => "parataxis".into(),
            (_, Relation::Dep) => "dep".into(),
            (_, Relation::Fixed) => "fixed".into(),
            (_, Relation::Root) => "root".into(),
            (_, Relation::Other(s)) => s.clone(),
        }
    }
}

impl Relation {
    /// `SUBJ = {nsubj, csubj, nsubjpass, csubjpass}`
    pub fn is_subj(&self) -> bool {
        matches!(
            self,
            Relation::Nsubj | Relation::Csubj | Relation::Nsubjpass | Relation::Csubjpass
        )
    }

    /// `OBJ = {dobj, iobj}`
    pub fn is_obj(&self) -> bool {
        matches!(self, Relation::Dobj | Relation::Iobj)
    }

    /// `NMODS = {nmod, obl, nmod:npmod, nmod:tmod}`
    pub fn is_nmod(&self) -> bool {
        matches!(
            self,
            Relation::Nmod | Relation::Obl | Relation::NmodNpmod | Relation::NmodTmod
        )
    }

    /// `ADJ_LIKE_MODS = {amod, appos, acl, acl:relcl}`
    pub fn is_adj_like_mod(&self) -> bool {
        matches!(
            self,
            Relation::Amod | Relation::Appos | Relation::Acl | Relation::AclRelcl
        )
    }

    /// `ARG_LIKE = NMODS ∪ {nsubj, csubj, csubjpass, dobj, iobj}`
    pub fn is_arg_like(&self) -> bool {
        self.is_nmod()
            || matches!(
                self,
                Relation::Nsubj | Relation::Csubj | Relation::Csubjpass | Relation::Dobj | Relation::Iobj
            )
    }

    /// `TRIVIALS = {mark, cc, punct}`
    pub fn is_trivial(&self) -> bool {
        matches!(self, Relation::Mark | Relation::Cc | Relation::Punct)
    }

    /// `PRED_DEPS_TO_DROP = {ccomp, csubj, advcl, acl, acl:relcl, nmod:tmod, parataxis, appos, dep}`
    pub fn is_pred_dep_to_drop(&self) -> bool {
        matches!(
            self,
            Relation::Ccomp
                | Relation::Csubj
                | Relation::Advcl
                | Relation::Acl
                | Relation::AclRelcl
                | Relation::NmodTmod
                | Relation::Parataxis
                | Relation::Appos
                | Relation::Dep
        )
    }

    /// `SPECIAL_ARG_DEPS_TO_DROP = {nsubj, dobj, iobj, csubj, csubjpass, neg,
    /// aux, advcl, auxpass, ccomp, cop, mark, fixed, parataxis}`
    pub fn is_special_arg_dep_to_drop(&self) -> bool {
        matches!(
            self,
            Relation::Nsubj
                | Relation::Dobj
                | Relation::Iobj
                | Relation::Csubj
                | Relation::Csubjpass
                | Relation::Neg
                | Relation::Aux
                | Relation::Advcl
                | Relation::Auxpass
                | Relation::Ccomp
                | Relation::Cop
                | Relation::Mark
                | Relation::Fixed
                | Relation::Parataxis
        )
    }

    /// `HARD_TO_FIND_ARGS = {amod, dep, conj, acl, acl:relcl, advcl}`
    pub fn is_hard_to_find_arg(&self) -> bool {
        matches!(
            self,
            Relation::Amod
                | Relation::Dep
                | Relation::Conj
                | Relation::Acl
                | Relation::AclRelcl
                | Relation::Advcl
        )
    }

    /// True for a predicate root's direct `nmod`/`obl`-family dependent
    /// (rule `H1`): relation starts with `nmod` or equals `obl`/`obl:npmod`.
    /// Deliberately broader than `H2`'s own nmod/obl check (see
    /// `arguments::identify_arguments`), which excludes `obl:npmod`.
    pub fn starts_with_nmod_or_is_obl(&self) -> bool {
        matches!(
            self,
            Relation::Nmod | Relation::NmodPoss | Relation::NmodTmod | Relation::NmodNpmod
                | Relation::Obl | Relation::OblNpmod
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_v2_spelling_differs_for_core_relations() {
        assert_eq!(SchemaVersion::V1.label(&Relation::Nsubjpass), "nsubjpass");
        assert_eq!(SchemaVersion::V2.label(&Relation::Nsubjpass), "nsubj:pass");
        assert_eq!(SchemaVersion::V1.label(&Relation::Dobj), "dobj");
        assert_eq!(SchemaVersion::V2.label(&Relation::Dobj), "obj");
    }

    #[test]
    fn parse_is_schema_invariant_for_shared_spellings() {
        assert_eq!(SchemaVersion::V1.parse("nmod:poss"), Relation::NmodPoss);
        assert_eq!(SchemaVersion::V2.parse("nmod:poss"), Relation::NmodPoss);
    }

    #[test]
    fn v1_obl_folds_into_nmod() {
        assert_eq!(SchemaVersion::V1.label(&Relation::Obl), "nmod");
    }

    #[test]
    fn unknown_relation_is_preserved() {
        assert_eq!(
            SchemaVersion::V1.parse("det"),
            Relation::Other("det".to_string())
        );
    }

    #[test]
    fn named_relation_sets_classify_expected_members() {
        assert!(Relation::Nsubjpass.is_subj());
        assert!(Relation::Dobj.is_obj());
        assert!(Relation::Obl.is_nmod());
        assert!(Relation::AclRelcl.is_adj_like_mod());
        assert!(Relation::Nsubj.is_arg_like());
        assert!(Relation::Punct.is_trivial());
        assert!(Relation::Appos.is_pred_dep_to_drop());
        assert!(Relation::Fixed.is_special_arg_dep_to_drop());
        assert!(Relation::Conj.is_hard_to_find_arg());
    }
}
