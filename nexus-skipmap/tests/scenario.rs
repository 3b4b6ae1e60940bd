//! End-to-end walkthrough of a string-keyed map.

use nexus_skipmap::{SkipMap, SkipMapError};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn build() -> SkipMap<String, i32> {
    let mut map = SkipMap::with_rng(3, SmallRng::seed_from_u64(2024));
    *map.get_or_default("kewuaa".to_string()) = 1;
    map.insert("1".to_string(), 111);
    map.insert("9".to_string(), 999);
    map.insert("5".to_string(), 555);
    map.insert("hello".to_string(), 0);
    map
}

#[test]
fn keys_come_back_sorted() {
    let map = build();
    assert_eq!(map.len(), 5);

    let pairs: Vec<(&str, i32)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(
        pairs,
        [("1", 111), ("5", 555), ("9", 999), ("hello", 0), ("kewuaa", 1)]
    );
}

#[test]
fn find_then_remove() {
    let mut map = build();
    assert_eq!(map.find("5").value(), &555);

    let successor = map.remove("5");
    assert_eq!(successor.key(), "9");

    assert_eq!(map.len(), 4);
    assert!(map.find("5").is_end());
    assert_eq!(map["hello"], 0);

    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["1", "9", "hello", "kewuaa"]);
}

#[test]
fn remove_absent_and_last() {
    let mut map = build();
    assert!(map.remove("nope").is_end());
    assert_eq!(map.len(), 5);

    assert!(map.remove("kewuaa").is_end());
    assert_eq!(map.last().map(|(k, _)| k.as_str()), Some("hello"));
}

#[test]
fn read_only_lookup_of_missing_key() {
    let map = build();
    assert_eq!(map.try_get("missing"), Err(SkipMapError::KeyNotFound));
    assert_eq!(map.get("missing"), None);
    assert_eq!(map.find("missing").try_get(), Err(SkipMapError::EmptyCursor));
}

#[test]
fn dump_shows_every_level() {
    let map = build();
    let dump = map.dump().to_string();
    let lines: Vec<_> = dump.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("level   3: "));
    assert!(lines[1].starts_with("level   2: "));
    assert_eq!(
        lines[2],
        "level   1: |    1    ||    5    ||    9    ||  hello  || kewuaa  |"
    );
    assert_eq!(
        lines[3],
        "value    : |   111   ||   555   ||   999   ||    0    ||    1    |"
    );
}

#[test]
fn clear_then_reuse() {
    let mut map = build();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.iter().count(), 0);

    map.insert("again".to_string(), 7);
    assert_eq!(map.len(), 1);
    assert_eq!(map["again"], 7);
}
