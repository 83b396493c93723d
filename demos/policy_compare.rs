//! Runs one access trace through every policy and reports what each kept.
//!
//! Run with: `cargo run --example policy_compare -- [capacity] [policy...]`

use std::env;
use std::process::ExitCode;

use evictkit::prelude::*;

const TRACE: &[(&str, char)] = &[
    ("put", 'A'),
    ("put", 'B'),
    ("put", 'C'),
    ("get", 'A'),
    ("put", 'D'),
    ("get", 'A'),
    ("get", 'B'),
    ("put", 'E'),
    ("put", 'A'),
    ("put", 'F'),
    ("get", 'C'),
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args = env::args().skip(1);
    let capacity = match args.next().map(|s| s.parse::<usize>()) {
        Some(Ok(n)) => n,
        Some(Err(err)) => {
            eprintln!("invalid capacity: {err}");
            return ExitCode::FAILURE;
        },
        None => 3,
    };

    let names: Vec<String> = args.collect();
    let policies = if names.is_empty() {
        CachePolicy::ALL.to_vec()
    } else {
        match names.iter().map(|n| n.parse()).collect::<Result<Vec<CachePolicy>, _>>() {
            Ok(policies) => policies,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            },
        }
    };

    for policy in policies {
        let log = DiscardLog::new();
        let built = CacheBuilder::new()
            .capacity(capacity)
            .listener(log.clone())
            .try_build(policy);
        let mut cache: Cache<char, usize> = match built {
            Ok(cache) => cache,
            Err(err) => {
                eprintln!("{policy}: {err}");
                return ExitCode::FAILURE;
            },
        };

        let mut hits = 0;
        for (step, (action, key)) in TRACE.iter().enumerate() {
            match *action {
                "put" => {
                    cache.put(*key, step);
                },
                _ => {
                    if cache.get(key).is_some() {
                        hits += 1;
                    }
                },
            }
        }

        let kept: String = cache.keys().into_iter().collect();
        let evicted: String = log.keys().into_iter().collect();
        println!("{policy:>9}: hits={hits} kept(next victim first)={kept:<6} evicted={evicted}");
    }
    ExitCode::SUCCESS
}
