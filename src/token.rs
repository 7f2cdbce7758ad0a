//! The in-memory dependency tree: tokens, edges, and the parse that owns
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PredPattError, PredPattResult};
use crate::schema::{PosTag, Relation, SchemaVersion};

/// A single edge of the dependency tree: `relation` labels the arc from
/// `governor` to `dependent`, both token positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub relation: Relation,
    pub governor: usize,
    pub dependent: usize,
}

/// A token in the parse. Identity is by `position` within a single [`Parse`]
/// — `text`/`pos_tag` are immutable surface properties fixed at
/// construction, while `governor`/`governor_relation`/`outgoing` are set
/// exactly once when the parse is materialized from edge triples and are
/// read-only for the remainder of extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub position: usize,
    pub text: String,
    pub pos_tag: PosTag,
    pub governor: Option<usize>,
    pub governor_relation: Relation,
    pub outgoing: Vec<Edge>,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}
impl Eq for Token {}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Token {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.position.cmp(&other.position)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Token {
    /// `token.hard_to_find_arguments()`: true iff the token's
    /// governor-relation is in `HARD_TO_FIND_ARGS` and none of its outgoing
    /// edges carry a `SUBJ` or `OBJ` relation.
    pub fn hard_to_find_arguments(&self) -> bool {
        self.governor_relation.is_hard_to_find_arg()
            && !self
                .outgoing
                .iter()
                .any(|e| e.relation.is_subj() || e.relation.is_obj())
    }
}

/// The dependency tree for one sentence: an ordered token sequence plus
/// derived `governor_of`/`dependents_of` maps for O(1) lookup, and the
/// schema version fixed at construction.
#[derive(Debug, Clone)]
pub struct Parse {
    pub tokens: Vec<Token>,
    pub schema: SchemaVersion,
    governor_of: Vec<Option<usize>>,
    dependents_of: Vec<Vec<usize>>,
}

impl Parse {
    /// Build a parse from primitive inputs: tokens as `(text, pos_tag)`
    /// pairs, edges as `(relation_label, governor_index, dependent_index)`
    /// with `governor_index == -1` meaning "syntactic root", and the schema
    /// version the relation labels were written against.
    pub fn build(
        tokens: &[(&str, &str)],
        edges: &[(&str, i64, i64)],
        schema: SchemaVersion,
    ) -> PredPattResult<Self> {
        let n = tokens.len();
        let mut built: Vec<Token> = tokens
            .iter()
            .enumerate()
            .map(|(i, (text, pos))| Token {
                position: i,
                text: (*text).to_string(),
                pos_tag: pos.parse().unwrap_or(PosTag::X),
                governor: None,
                governor_relation: Relation::Root,
                outgoing: Vec::new(),
            })
            .collect();

        let mut governor_of: Vec<Option<usize>> = vec![None; n];
        let mut dependents_of: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (rel_label, gov_idx, dep_idx) in edges {
            let dep = usize::try_from(*dep_idx).map_err(|_| PredPattError::MalformedParse {
                position: *dep_idx,
                reason: "dependent index out of range".to_string(),
            })?;
            if dep >= n {
                return Err(PredPattError::MalformedParse {
                    position: *dep_idx,
                    reason: "dependent index out of range".to_string(),
                });
            }

            let relation = schema.parse(rel_label);

            if *gov_idx < 0 {
                built[dep].governor = None;
                built[dep].governor_relation = Relation::Root;
                continue;
            }
            let gov = usize::try_from(*gov_idx).map_err(|_| PredPattError::MalformedParse {
                position: *gov_idx,
                reason: "governor index out of range".to_string(),
            })?;
            if gov >= n {
                return Err(PredPattError::MalformedParse {
                    position: *gov_idx,
                    reason: "governor index out of range".to_string(),
                });
            }

            built[dep].governor = Some(gov);
            built[dep].governor_relation = relation.clone();
            governor_of[dep] = Some(gov);
            dependents_of[gov].push(dep);

            built[gov].outgoing.push(Edge {
                relation,
                governor: gov,
                dependent: dep,
            });
        }

        let roots = built.iter().filter(|t| t.governor.is_none()).count();
        if n > 0 && roots == 0 {
            return Err(PredPattError::MalformedParse {
                position: -1,
                reason: "no syntactic root: every token has a governor".to_string(),
            });
        }

        let mut parse = Parse {
            tokens: built,
            schema,
            governor_of,
            dependents_of,
        };
        parse.normalize_conjunctions();
        Ok(parse)
    }

    /// Build a parse with a single flat root and no dependency edges. Useful
    /// for unit-testing phrase assembly in isolation; not part of the
    /// extraction contract.
    pub fn from_tokens_only(tokens: &[(&str, &str)], schema: SchemaVersion) -> Self {
        Parse::build(tokens, &[], schema).expect("flat parse never malformed")
    }

    pub fn token(&self, position: usize) -> &Token {
        &self.tokens[position]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn governor_of(&self, position: usize) -> Option<usize> {
        self.governor_of.get(position).copied().flatten()
    }

    /// Dependent token positions of `position`, in declaration order.
    pub fn dependents_of(&self, position: usize) -> &[usize] {
        self.dependents_of
            .get(position)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Outgoing edges of `position`, in declaration order.
    pub fn outgoing(&self, position: usize) -> &[Edge] {
        &self.tokens[position].outgoing
    }

    /// The single token with no governor — the syntactic root.
    pub fn root(&self) -> Option<&Token> {
        self.tokens.iter().find(|t| t.governor.is_none())
    }

    /// All edges of the parse, in declaration order (governor-major).
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.tokens.iter().flat_map(|t| t.outgoing.iter())
    }

    /// Breadth-first collection of token positions in the subtree rooted at
    /// `start`, following only edges for which `follow` returns true.
    pub fn subtree<F>(&self, start: usize, mut follow: F) -> Vec<usize>
    where
        F: FnMut(&Edge) -> bool,
    {
        let mut seen = vec![start];
        let mut queue = std::collections::VecDeque::from([start]);
        while let Some(cur) = queue.pop_front() {
            for edge in self.outgoing(cur) {
                if follow(edge) {
                    seen.push(edge.dependent);
                    queue.push_back(edge.dependent);
                }
            }
        }
        seen
    }

    /// Detect head-final `conj` chains: some UD releases attach `B conj-> A`
    /// when `A` precedes `B` in the sentence. The rule cascade assumes
    /// conjuncts point back at an earlier conjunct, so such parses are
    /// logged as non-standard rather than silently misread; callers that
    /// need the rewrite should normalize their CoNLL-U source, which is
    /// outside this engine's scope.
    pub fn normalize_conjunctions(&mut self) {
        for edge in self.edges() {
            if matches!(edge.relation, Relation::Conj) && edge.governor > edge.dependent {
                tracing::debug!(
                    governor = edge.governor,
                    dependent = edge.dependent,
                    "head-final conj edge: conjunct ordering may not match the cascade's expectations"
                );
            }
        }
    }
}
