//! # predpatt - Predicate-Argument Extraction over Universal Dependencies
//!
//! This crate extracts a flat, simplified predicate-argument structure from
//! a Universal Dependencies parse. It maps syntactic dependents (subjects,
//! objects, obliques, clausal complements) onto argument slots of a
//! predicate, resolving the cross-predicate sharing introduced by relative
//! clauses, coordination, and control constructions.
//!
//! ## Overview
//!
//! A [`Parse`] (tokens plus dependency edges) is fed through an
//! [`Extractor`], which runs the eleven-phase pipeline documented in the
//! design notes: predicate-root identification, argument identification,
//! cross-predicate resolution, phrase assembly, conjunction handling,
//! coordination expansion, and trivial-token stripping.
//!
//! ```text
//! tokens + edges                 Config
//!        ↓                          ↓
//!      Parse ───────────────> Extractor::extract
//!                                   ↓
//!                          Vec<Predicate>
//!                                   ↓
//!                    render::pprint / render::linearize
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use predpatt::{Config, Extractor, Parse, SchemaVersion};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")];
//! let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)];
//! let parse = Parse::build(&tokens, &edges, SchemaVersion::V1)?;
//!
//! let instances = Extractor::extract(&parse, &Config::default())?;
//! assert_eq!(instances.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration presets
//!
//! | Preset | Effect |
//! |---|---|
//! | [`Config::default`] | v1 schema, relcl/appos/amod/poss/conj resolution off |
//! | [`Config::all`] | every resolution flag on |
//! | [`Config::cut`] | xcomp treated as an independent predicate |
//! | [`Config::simple`] | only core arguments, no advmod/aux in predicate phrase |
//! | [`Config::norelcl`] | `all()` with relative-clause resolution disabled |

pub mod arguments;
pub mod config;
pub mod conjunction;
pub mod coordination;
pub mod engine;
pub mod error;
pub mod identify;
pub mod phrase;
pub mod render;
pub mod resolve;
pub mod rules;
pub mod schema;
pub mod token;
pub mod types;

// Re-export main types
pub use config::Config;
pub use engine::Extractor;
pub use error::{PredPattError, PredPattResult};
pub use token::{Edge, Parse, Token};
pub use types::{Argument, Predicate, PredicateType};

// Re-export schema and rule-provenance types for convenience
pub use rules::RuleProvenance;
pub use schema::{PosTag, Relation, SchemaVersion};
