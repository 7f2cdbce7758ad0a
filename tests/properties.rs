//! Two remaining properties from spec §8 not covered by the other
//! integration tests: schema invariance (v1 and v2 agree on parses that only
//! use relations spelled identically in both) and borrowed-argument
//! integrity (a lender keeps its own argument, unchanged, after lending it).

use predpatt::render::pprint;
use predpatt::{Config, Extractor, Parse, SchemaVersion};

#[test]
fn shared_spelling_relations_extract_identically_under_both_schemas() {
    // "I eat apples": nsubj/dobj/root are spelled the same in v1 and v2, so
    // the extraction must be schema-invariant here.
    let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")];
    let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)];

    let v1 = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
    let v2 = Parse::build(&tokens, &edges, SchemaVersion::V2).unwrap();

    for config in [Config::default(), Config::all(), Config::cut(), Config::simple()] {
        let out_v1 = Extractor::extract(&v1, &config).unwrap();
        let out_v2 = Extractor::extract(&v2, &config).unwrap();
        assert_eq!(pprint(&out_v1, false), pprint(&out_v2, false), "mismatch under {config:?}");
    }
}

#[test]
fn lender_keeps_its_argument_after_conjunct_borrows_it() {
    // "He runs and jumps": "jumps" borrows "He" as subject from "runs", but
    // "runs" must still have its own (non-borrowed) subject with the same
    // token span.
    let tokens = [("He", "PRON"), ("runs", "VERB"), ("and", "CCONJ"), ("jumps", "VERB")];
    let edges = [("nsubj", 1, 0), ("root", -1, 1), ("cc", 1, 2), ("conj", 1, 3)];
    let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
    let instances = Extractor::extract(&parse, &Config::default()).unwrap();

    let runs = instances.iter().find(|p| p.position() == 1).expect("lender predicate");
    let jumps = instances.iter().find(|p| p.position() == 3).expect("borrower predicate");

    let lender_subj = runs.subject().expect("lender keeps its own subject");
    assert!(!lender_subj.is_borrowed);
    assert_eq!(lender_subj.position(), 0);

    let borrower_subj = jumps.subject().expect("borrower has a subject");
    assert!(borrower_subj.is_borrowed);
    assert_eq!(borrower_subj.position(), 0);
    assert_eq!(
        lender_subj.tokens.iter().map(|t| t.position).collect::<Vec<_>>(),
        borrower_subj.tokens.iter().map(|t| t.position).collect::<Vec<_>>(),
        "borrowed argument shares the lender's assembled token span"
    );
}
