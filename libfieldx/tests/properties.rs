//! Property tests for the tokenizer and the auto extractor.

use std::collections::{BTreeMap, HashMap};

use libfieldx::{encode, extract, parse_key_value_pairs, Fields, Format};
use proptest::prelude::*;
use serde_json::Value;

/// Tokens made only of characters the tokenizer never treats specially.
fn plain_token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./-]{1,16}"
}

fn to_fields(map: &BTreeMap<String, String>) -> Fields {
    map.iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

proptest! {
    #[test]
    fn never_panics_and_keys_are_non_empty(raw in "\\PC*") {
        let pairs = parse_key_value_pairs(&raw);
        prop_assert!(pairs.keys().all(|k| !k.is_empty()));
    }

    #[test]
    fn lone_token_is_a_bare_key(token in plain_token()) {
        let pairs = parse_key_value_pairs(&token);
        let expected: HashMap<String, String> =
            [(token.clone(), String::new())].into_iter().collect();
        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn separated_pairs_are_recovered(
        map in prop::collection::btree_map(plain_token(), plain_token(), 0..8),
        sep in prop::sample::select(vec![",", ", ", ";", "&", " ", "\t", "\n"]),
        assign in prop::sample::select(vec!["=", ":", ": "]),
    ) {
        let line = map
            .iter()
            .map(|(k, v)| format!("{}{}{}", k, assign, v))
            .collect::<Vec<_>>()
            .join(sep);
        let pairs: BTreeMap<String, String> = parse_key_value_pairs(&line).into_iter().collect();
        prop_assert_eq!(pairs, map);
    }

    #[test]
    fn auto_prefers_json_objects(
        map in prop::collection::btree_map("\\PC{0,8}", "\\PC{0,8}", 0..6),
    ) {
        let raw = serde_json::to_string(&map).unwrap();
        let fields = extract(&raw, "auto").unwrap().unwrap();
        prop_assert_eq!(fields, to_fields(&map));
    }

    #[test]
    fn kvp_encoding_reads_back(
        map in prop::collection::btree_map("\\PC{1,12}", "\\PC{1,12}", 0..6),
    ) {
        let line = encode(&to_fields(&map), Format::Kvp);
        let pairs: BTreeMap<String, String> = parse_key_value_pairs(&line).into_iter().collect();
        prop_assert_eq!(pairs, map);
    }
}
