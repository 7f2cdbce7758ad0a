//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::schema::SchemaVersion;

/// Flat configuration record controlling the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Which UD relation set applies.
    pub schema: SchemaVersion,

    /// Enable rule `B`, relative-clause argument borrowing, dummy-arg filtering.
    pub resolve_relcl: bool,

    /// Gate on the borrowing half of relcl resolution.
    pub borrow_arg_for_relcl: bool,

    /// Enable the Appositive predicate type and appos-drop in argument phrases.
    pub resolve_appos: bool,

    /// Enable the AdjectivalModifier predicate type.
    pub resolve_amod: bool,

    /// Enable the Possessive predicate type.
    pub resolve_poss: bool,

    /// Enable coordination expansion and conj-drop in argument phrases.
    pub resolve_conj: bool,

    /// Treat xcomp as an independent predicate (argument resolution sub-pass 5
    /// instead of xcomp merging in sub-pass 1).
    pub cut: bool,

    /// Drop non-core arguments and advmod/aux from the predicate phrase.
    pub simple: bool,

    /// Strip trivial punctuation/markers from phrase boundaries.
    pub strip: bool,

    /// Disable all filtering in argument-phrase assembly.
    pub big_args: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: SchemaVersion::V1,
            resolve_relcl: false,
            borrow_arg_for_relcl: true,
            resolve_appos: false,
            resolve_amod: false,
            resolve_poss: false,
            resolve_conj: false,
            cut: false,
            simple: false,
            strip: true,
            big_args: false,
        }
    }
}

impl Config {
    /// All resolution phases on — the `all` preset used across the
    /// end-to-end regression scenarios.
    pub fn all() -> Self {
        Self {
            resolve_relcl: true,
            resolve_appos: true,
            resolve_amod: true,
            resolve_poss: true,
            resolve_conj: true,
            ..Default::default()
        }
    }

    /// The `cut` preset: `all()` plus `cut` mode for xcomp.
    pub fn cut() -> Self {
        Self {
            cut: true,
            ..Self::all()
        }
    }

    /// The `simple` preset: `all()` plus simplification of predicate phrases.
    pub fn simple() -> Self {
        Self {
            simple: true,
            ..Self::all()
        }
    }

    /// The `norelcl` preset: `all()` with relative-clause resolution disabled.
    pub fn norelcl() -> Self {
        Self {
            resolve_relcl: false,
            ..Self::all()
        }
    }
}
