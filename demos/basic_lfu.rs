//! LFU walkthrough: frequency counts, tie-breaking, and the cache dump.
//!
//! Run with: `cargo run --example basic_lfu`

use evictkit::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut cache = LfuCache::new(DEFAULT_CAPACITY);
    cache.put("A", "Hello");
    cache.put("B", "World");
    cache.put("C", "Holberton");
    cache.put("D", "School");
    print!("{}", cache.dump());

    println!("{:?}", cache.get(&"B"));
    cache.put("E", "Battery");
    print!("{}", cache.dump());

    cache.put("C", "Street");
    print!("{}", cache.dump());

    println!("{:?}", cache.get(&"A"));
    println!("{:?}", cache.get(&"B"));
    println!("{:?}", cache.get(&"C"));

    cache.put("F", "Mission");
    print!("{}", cache.dump());

    cache.put("G", "San Francisco");
    print!("{}", cache.dump());

    for key in cache.keys() {
        println!("{key}: used {} times", cache.frequency(key).unwrap_or(0));
    }
}
