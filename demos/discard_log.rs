//! Collecting evictions with a listener instead of reading the log.
//!
//! Run with: `cargo run --example discard_log`

use evictkit::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("evictkit=info")
        .init();

    let log = DiscardLog::new();
    let mut lru = LruCache::new(2).with_listener(log.clone());
    lru.put("A", 1);
    lru.put("B", 2);
    lru.get(&"A");
    lru.put("C", 3);
    println!("lru discarded {:?}", log.take());

    let mut total = 0;
    let mut mru = MruCache::new(2).with_listener(FnListener(move |key: &&str, value: &i32| {
        total += value;
        println!("mru dropped {key} (running total {total})");
    }));
    for (i, key) in ["A", "B", "C", "D"].into_iter().enumerate() {
        mru.put(key, i as i32);
    }
}
