// ==============================================
// EVICTION SCENARIOS (integration)
// ==============================================
//
// The reference walkthroughs for each policy, run against the concrete
// types and through the `Cache` façade.

use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
use evictkit::listener::DiscardLog;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lifo::LifoCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::mru::MruCache;
use evictkit::policy::unbounded::UnboundedCache;
use evictkit::traits::{CoreCache, ReadOnlyCache};

type Step = (&'static str, &'static str);

/// Runs `("put" | "get", key)` steps on `cache`, with values derived from keys.
fn drive<C: CoreCache<&'static str, String>>(cache: &mut C, steps: &[Step]) {
    for (action, key) in steps {
        match *action {
            "put" => {
                cache.put(*key, key.to_lowercase());
            },
            "get" => {
                cache.get(key);
            },
            other => panic!("unknown step {other}"),
        }
    }
}

fn facade(policy: CachePolicy) -> (Cache<&'static str, String>, DiscardLog<&'static str>) {
    let log = DiscardLog::new();
    let cache = CacheBuilder::new()
        .capacity(2)
        .listener(log.clone())
        .build(policy);
    (cache, log)
}

const LIFO_STEPS: &[Step] = &[("put", "A"), ("put", "B"), ("put", "C")];
const RECENCY_STEPS: &[Step] = &[("put", "A"), ("put", "B"), ("get", "A"), ("put", "C")];
const LFU_STEPS: &[Step] = &[
    ("put", "A"),
    ("put", "B"),
    ("get", "A"),
    ("get", "A"),
    ("put", "C"),
];
const LFU_TIE_STEPS: &[Step] = &[("put", "A"), ("put", "B"), ("put", "C")];

mod concrete_types {
    use super::*;

    #[test]
    fn lifo_evicts_b() {
        let log = DiscardLog::new();
        let mut cache = LifoCache::new(2).with_listener(log.clone());
        drive(&mut cache, LIFO_STEPS);
        assert_eq!(log.keys(), vec!["B"]);
    }

    #[test]
    fn lru_evicts_b() {
        let log = DiscardLog::new();
        let mut cache = LruCache::new(2).with_listener(log.clone());
        drive(&mut cache, RECENCY_STEPS);
        assert_eq!(log.keys(), vec!["B"]);
    }

    #[test]
    fn mru_evicts_a() {
        let log = DiscardLog::new();
        let mut cache = MruCache::new(2).with_listener(log.clone());
        drive(&mut cache, RECENCY_STEPS);
        assert_eq!(log.keys(), vec!["A"]);
    }

    #[test]
    fn lfu_evicts_b() {
        let log = DiscardLog::new();
        let mut cache = LfuCache::new(2).with_listener(log.clone());
        drive(&mut cache, LFU_STEPS);
        assert_eq!(log.keys(), vec!["B"]);
    }

    #[test]
    fn lfu_tie_evicts_a() {
        let log = DiscardLog::new();
        let mut cache = LfuCache::new(2).with_listener(log.clone());
        drive(&mut cache, LFU_TIE_STEPS);
        assert_eq!(log.keys(), vec!["A"]);
    }

    #[test]
    fn unbounded_keeps_everything() {
        let mut cache = UnboundedCache::new();
        drive(&mut cache, LFU_STEPS);
        assert_eq!(cache.len(), 3);
    }
}

mod through_facade {
    use super::*;

    #[test]
    fn every_scenario_matches() {
        let cases: &[(CachePolicy, &[Step], &[&str])] = &[
            (CachePolicy::Lifo, LIFO_STEPS, &["B"]),
            (CachePolicy::Lru, RECENCY_STEPS, &["B"]),
            (CachePolicy::Mru, RECENCY_STEPS, &["A"]),
            (CachePolicy::Lfu, LFU_STEPS, &["B"]),
            (CachePolicy::Lfu, LFU_TIE_STEPS, &["A"]),
            (CachePolicy::Unbounded, LFU_STEPS, &[]),
        ];
        for (policy, steps, expected) in cases {
            let (mut cache, log) = facade(*policy);
            drive(&mut cache, steps);
            assert_eq!(log.keys(), expected.to_vec(), "{policy}");
            cache.check_invariants().unwrap();
        }
    }
}

mod contract {
    use super::*;

    #[test]
    fn put_then_get_returns_value() {
        for policy in CachePolicy::ALL {
            let (mut cache, _) = facade(policy);
            cache.put("k", "v".to_string());
            assert_eq!(cache.get(&"k").map(String::as_str), Some("v"), "{policy}");
            cache.put("k", "w".to_string());
            assert_eq!(cache.get(&"k").map(String::as_str), Some("w"), "{policy}");
        }
    }

    #[test]
    fn put_opt_with_none_is_a_no_op() {
        for policy in CachePolicy::ALL {
            let (mut cache, log) = facade(policy);
            cache.put("A", "a".into());
            cache.put("B", "b".into());
            let before = cache.keys().into_iter().copied().collect::<Vec<_>>();

            assert_eq!(cache.put_opt(None, Some("x".into())), None);
            assert_eq!(cache.put_opt(Some("C"), None), None);
            assert_eq!(cache.put_opt(None, None), None);

            let after = cache.keys().into_iter().copied().collect::<Vec<_>>();
            assert_eq!(before, after, "{policy}");
            assert!(!cache.contains(&"C"));
            assert!(log.is_empty(), "{policy}");
        }
    }

    #[test]
    fn get_opt_none_is_a_miss() {
        let (mut cache, _) = facade(CachePolicy::Lfu);
        cache.put("A", "a".into());
        assert_eq!(cache.get_opt(None), None);
        assert_eq!(cache.frequency(&"A"), Some(0));
        assert_eq!(cache.get_opt(Some(&"A")).map(String::as_str), Some("a"));
        assert_eq!(cache.frequency(&"A"), Some(1));
    }

    #[test]
    fn dump_lists_sorted_entries() {
        let (mut cache, _) = facade(CachePolicy::Lru);
        cache.put("B", "world".into());
        cache.put("A", "Hello".into());
        assert_eq!(
            cache.dump().to_string(),
            "Current cache:\nA: Hello\nB: world\n"
        );
    }
}
