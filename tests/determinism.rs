//! Determinism property: for a fixed Parse and Config, extraction returns
//! byte-identical pretty-printed output across repeated runs.

use predpatt::render::pprint;
use predpatt::{Config, Extractor, Parse, SchemaVersion};

fn corpus() -> Vec<(Vec<(&'static str, &'static str)>, Vec<(&'static str, i64, i64)>)> {
    vec![
        (
            vec![("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")],
            vec![("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)],
        ),
        (
            vec![("He", "PRON"), ("runs", "VERB"), ("and", "CCONJ"), ("jumps", "VERB")],
            vec![("nsubj", 1, 0), ("root", -1, 1), ("cc", 1, 2), ("conj", 1, 3)],
        ),
        (
            vec![("I", "PRON"), ("want", "VERB"), ("to", "PART"), ("leave", "VERB")],
            vec![("nsubj", 1, 0), ("root", -1, 1), ("mark", 3, 2), ("xcomp", 1, 3)],
        ),
        (
            vec![("the", "DET"), ("red", "ADJ"), ("car", "NOUN")],
            vec![("det", 2, 0), ("amod", 2, 1), ("root", -1, 2)],
        ),
    ]
}

fn presets() -> Vec<Config> {
    vec![Config::default(), Config::all(), Config::cut(), Config::simple(), Config::norelcl()]
}

#[test]
fn extraction_is_byte_identical_across_repeated_runs() {
    for (tokens, edges) in corpus() {
        let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
        for config in presets() {
            let first = Extractor::extract(&parse, &config).unwrap();
            let second = Extractor::extract(&parse, &config).unwrap();
            assert_eq!(pprint(&first, false), pprint(&second, false), "mismatch under {config:?}");
        }
    }
}

#[test]
fn extraction_is_stable_across_config_clones() {
    let tokens = [("I", "PRON"), ("eat", "VERB"), ("apples", "NOUN")];
    let edges = [("nsubj", 1, 0), ("root", -1, 1), ("dobj", 1, 2)];
    let parse = Parse::build(&tokens, &edges, SchemaVersion::V1).unwrap();
    let config = Config::all();
    let a = Extractor::extract(&parse, &config).unwrap();
    let b = Extractor::extract(&parse, &config.clone()).unwrap();
    assert_eq!(pprint(&a, false), pprint(&b, false));
}
