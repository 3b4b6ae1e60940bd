//! Walkthrough of the basic map operations with structure dumps.
//!
//! Run with: cargo run --bin skipmap_demo

use nexus_skipmap::SkipMap;

fn report(map: &SkipMap<String, i32>, key: &str) {
    match map.find(key).get() {
        Some((_, value)) => println!("found {key} -> {value}"),
        None => println!("{key} not found"),
    }
}

fn main() {
    let mut map: SkipMap<String, i32> = SkipMap::new(3);

    *map.get_or_default("kewuaa".to_string()) = 1;
    map.insert("1".to_string(), 111);
    map.insert("9".to_string(), 999);
    map.insert("5".to_string(), 555);
    map.insert("hello".to_string(), 0);
    println!("{}", map.dump());

    report(&map, "5");
    map.remove("5");
    println!("{}", map.dump());
    report(&map, "5");

    for (key, value) in &map {
        println!("{key}: {value}");
    }
    println!("{}", map["hello"]);
}
