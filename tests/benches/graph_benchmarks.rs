//! # Social Graph Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | mention extraction, 1 000 tokens | < 100µs |
//! | candidate merge, 3 × 1 000 users | < 1ms |
//! | resolve_recipients, 500 friends + 500 subscribers | < 10ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fm_01_social_graph::algorithms::{extract_mentions, merge_candidates};
use fm_01_social_graph::{
    FriendshipApi, InMemoryGraphStore, RecipientApi, SocialGraphService, SubscriptionApi,
};
use shared_types::User;
use std::sync::Arc;
use std::time::Duration;

fn users(prefix: &str, count: usize) -> Vec<User> {
    (0..count)
        .map(|i| User::new(i as u64, format!("{}{}@example.com", prefix, i)))
        .collect()
}

fn bench_extract_mentions(c: &mut Criterion) {
    let mut group = c.benchmark_group("fm-01-mentions");

    for tokens in [10, 100, 1_000] {
        let text: String = (0..tokens)
            .map(|i| {
                if i % 4 == 0 {
                    format!("user{}@example.com ", i)
                } else {
                    "word ".to_string()
                }
            })
            .collect();

        group.throughput(Throughput::Elements(tokens as u64));
        group.bench_with_input(BenchmarkId::new("extract", tokens), &text, |b, text| {
            b.iter(|| black_box(extract_mentions(text)))
        });
    }
    group.finish();
}

fn bench_merge_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("fm-01-merge");

    for size in [10, 100, 1_000] {
        let friends = users("f", size);
        // half the subscribers are also friends
        let mut subscribers = users("s", size / 2);
        subscribers.extend(friends.iter().take(size / 2).cloned());
        let mentioned = users("m", size);

        group.throughput(Throughput::Elements((size * 3) as u64));
        group.bench_function(BenchmarkId::new("merge", size), |b| {
            b.iter(|| black_box(merge_candidates(&friends, &subscribers, &mentioned)))
        });
    }
    group.finish();
}

fn bench_resolve_recipients(c: &mut Criterion) {
    let mut group = c.benchmark_group("fm-01-recipients");
    group.measurement_time(Duration::from_secs(10));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");

    for size in [50, 500] {
        let mut emails = vec!["sender@example.com".to_string()];
        emails.extend((0..size).map(|i| format!("friend{}@example.com", i)));
        emails.extend((0..size).map(|i| format!("sub{}@example.com", i)));

        let store = Arc::new(InMemoryGraphStore::with_users(&emails));
        let service = SocialGraphService::new(store);
        rt.block_on(async {
            for i in 0..size {
                let friend = format!("friend{}@example.com", i);
                let subscriber = format!("sub{}@example.com", i);
                service
                    .create_friendship("sender@example.com", &friend)
                    .await
                    .expect("friendship");
                service
                    .subscribe(&subscriber, "sender@example.com")
                    .await
                    .expect("subscription");
                if i % 10 == 0 {
                    service
                        .block(&friend, "sender@example.com")
                        .await
                        .expect("block");
                }
            }
        });

        let text = "status update for friend1@example.com and sub2@example.com";
        group.throughput(Throughput::Elements((size * 2) as u64));
        group.bench_function(BenchmarkId::new("resolve", size), |b| {
            b.iter(|| {
                rt.block_on(async {
                    black_box(
                        service
                            .resolve_recipients("sender@example.com", text)
                            .await
                            .expect("recipients"),
                    )
                })
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_extract_mentions,
    bench_merge_candidates,
    bench_resolve_recipients
);
criterion_main!(benches);
