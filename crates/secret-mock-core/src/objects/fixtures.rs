//! Canned "standard objects" for conformance tests

use std::collections::HashMap;

use super::collection::SecretCollection;
use super::item::SecretItem;

fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Build the standard fixture set
///
/// Two collections:
/// - "english": unlocked, the default alias, three numbered items with
///   secrets `111`/`222`/`333`
/// - "spanish": locked, three numbered items with secrets
///   `uno`/`dos`/`tres`
///
/// The attribute scheme (`number`, `string`, `even`) is what conformance
/// suites search on.
pub fn standard_objects() -> Vec<SecretCollection> {
    let mut english = SecretCollection::new("english", "English").with_alias("default");
    english.add_item(
        "item_one",
        SecretItem::new(
            "Item One",
            attrs(&[("number", "1"), ("string", "one"), ("even", "false")]),
            b"111".to_vec(),
        ),
    );
    english.add_item(
        "item_two",
        SecretItem::new(
            "Item Two",
            attrs(&[("number", "2"), ("string", "two"), ("even", "true")]),
            b"222".to_vec(),
        ),
    );
    english.add_item(
        "item_three",
        SecretItem::new(
            "Item Three",
            attrs(&[("number", "3"), ("string", "three"), ("even", "false")]),
            b"333".to_vec(),
        ),
    );

    let mut spanish = SecretCollection::new("spanish", "Spanish").locked();
    spanish.add_item(
        "item_uno",
        SecretItem::new(
            "Item Uno",
            attrs(&[("number", "1"), ("string", "uno"), ("even", "false")]),
            b"uno".to_vec(),
        ),
    );
    spanish.add_item(
        "item_dos",
        SecretItem::new(
            "Item Dos",
            attrs(&[("number", "2"), ("string", "dos"), ("even", "true")]),
            b"dos".to_vec(),
        ),
    );
    spanish.add_item(
        "item_tres",
        SecretItem::new(
            "Item Tres",
            attrs(&[("number", "3"), ("string", "tres"), ("even", "false")]),
            b"tres".to_vec(),
        ),
    );

    vec![english, spanish]
}
