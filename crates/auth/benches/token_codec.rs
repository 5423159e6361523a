use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::Duration;
use sportiva_auth::{AccessClaims, Hs256TokenCodec, StaffRole, TokenCodec, TokenSubject};
use sportiva_core::{CustomerId, WorkerId};

fn worker_claims() -> AccessClaims {
    AccessClaims::issue_now(
        TokenSubject::Worker {
            worker_id: WorkerId::new(),
            role: StaffRole::Administrator,
        },
        "ana@sportiva.test",
        "Ana",
        Duration::hours(8),
    )
}

fn customer_claims() -> AccessClaims {
    AccessClaims::issue_now(
        TokenSubject::Customer {
            customer_id: CustomerId::new(),
        },
        "maria@example.test",
        "Maria",
        Duration::hours(8),
    )
}

fn bench_token_issue(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_issue");
    group.sample_size(1000);

    let codec = Hs256TokenCodec::new(b"bench-secret");

    group.bench_function("issue_worker", |b| {
        let claims = worker_claims();
        b.iter(|| codec.issue(black_box(&claims)).unwrap());
    });

    group.bench_function("issue_customer", |b| {
        let claims = customer_claims();
        b.iter(|| codec.issue(black_box(&claims)).unwrap());
    });

    group.finish();
}

fn bench_token_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_parse");
    group.sample_size(1000);

    let codec = Hs256TokenCodec::new(b"bench-secret");

    group.bench_function("parse_worker", |b| {
        let token = codec.issue(&worker_claims()).unwrap();
        b.iter(|| codec.parse(black_box(&token)).unwrap());
    });

    group.bench_function("parse_customer", |b| {
        let token = codec.issue(&customer_claims()).unwrap();
        b.iter(|| codec.parse(black_box(&token)).unwrap());
    });

    // Rejection has to stay cheap; it runs on every probe with a stale key.
    group.bench_function("parse_bad_signature", |b| {
        let foreign = Hs256TokenCodec::new(b"other-secret");
        let token = foreign.issue(&worker_claims()).unwrap();
        b.iter(|| codec.parse(black_box(&token)).unwrap_err());
    });

    group.finish();
}

criterion_group!(benches, bench_token_issue, bench_token_parse);
criterion_main!(benches);
