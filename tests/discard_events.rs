// ==============================================
// DISCARD EVENT TESTS (integration)
// ==============================================
//
// Captures the tracing output of evictions with a recording layer and checks
// target, level, message and fields.

use std::fmt;
use std::sync::{Arc, Mutex};

use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
use evictkit::listener::DISCARD_TARGET;
use evictkit::policy::lru::LruCache;
use evictkit::traits::CoreCache;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

#[derive(Debug, Clone)]
struct Captured {
    target: String,
    level: Level,
    message: String,
    policy: String,
    key: String,
}

#[derive(Default)]
struct Fields {
    message: String,
    policy: String,
    key: String,
}

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "policy" => self.policy = value.to_string(),
            _ => self.record_debug(field, &value),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "policy" => self.policy = format!("{value:?}"),
            "key" => self.key = format!("{value:?}"),
            _ => {},
        }
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Captured>>>);

impl Recorder {
    fn discards(&self) -> Vec<Captured> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.target == DISCARD_TARGET)
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let meta = event.metadata();
        self.0.lock().unwrap().push(Captured {
            target: meta.target().to_string(),
            level: *meta.level(),
            message: fields.message,
            policy: fields.policy,
            key: fields.key,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Recorder {
    let recorder = Recorder::default();
    let subscriber = Registry::default().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    recorder
}

#[test]
fn eviction_emits_info_event_with_fields() {
    let recorder = capture(|| {
        let mut cache = LruCache::new(1);
        cache.put("A", 1);
        cache.put("B", 2);
    });

    let discards = recorder.discards();
    assert_eq!(discards.len(), 1);
    let event = &discards[0];
    assert_eq!(event.level, Level::INFO);
    assert_eq!(event.message, "DISCARD: \"A\"");
    assert_eq!(event.policy, "lru");
    assert_eq!(event.key, "\"A\"");
}

#[test]
fn one_event_per_eviction_for_each_policy() {
    for policy in CachePolicy::ALL.into_iter().filter(|p| p.is_bounded()) {
        let recorder = capture(|| {
            let mut cache: Cache<u32, u32> = CacheBuilder::new().capacity(2).build(policy);
            for k in 0u32..5 {
                cache.put(k, k);
            }
            cache.clear();
        });

        let discards = recorder.discards();
        assert_eq!(discards.len(), 3, "{policy}");
        assert!(discards.iter().all(|e| e.policy == policy.as_str()));
    }
}

#[test]
fn none_input_emits_no_discard() {
    let recorder = capture(|| {
        let mut cache = LruCache::new(1);
        cache.put(1u8, 1u8);
        cache.put_opt(Some(2), None);
        cache.put_opt(None, Some(3));
    });
    assert!(recorder.discards().is_empty());
}

#[test]
fn update_emits_no_discard() {
    let recorder = capture(|| {
        let mut cache = LruCache::new(1);
        cache.put('x', 1);
        cache.put('x', 2);
    });
    assert!(recorder.discards().is_empty());
}
