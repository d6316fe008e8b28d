/// Benchmarks for weekly aggregation, ranking and chart rendering at the
/// largest supported comparison (thirty repositories, a year of weeks).
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitcompare::analysis::{rank_repositories, unified_weekly_rows};
use gitcompare::plotting::render_weekly_chart;
use gitcompare::types::{Repo, RepoCommitSeries, WeeklyPoint, MAX_REPOSITORIES};

const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Build `MAX_REPOSITORIES` series of 52 weeks each with varied totals
fn full_comparison() -> (Vec<Repo>, Vec<RepoCommitSeries>) {
    let repos: Vec<Repo> = (0..MAX_REPOSITORIES)
        .map(|i| Repo::new(format!("owner{}", i % 7), format!("repo{i}")))
        .collect();
    let series = repos
        .iter()
        .enumerate()
        .map(|(i, repo)| {
            let weeks = (0..52)
                .map(|w| {
                    let commits = ((i as i64 * 31 + w * 17) % 97) as u64;
                    WeeklyPoint::new(1_700_000_000 + w * WEEK_SECONDS, commits)
                })
                .collect();
            RepoCommitSeries::new(repo.clone(), weeks)
        })
        .collect();
    (repos, series)
}

fn bench_aggregation(c: &mut Criterion) {
    let (repos, series) = full_comparison();
    let mut group = c.benchmark_group("aggregation");

    group.bench_function("unified_weekly_rows", |b| {
        b.iter(|| unified_weekly_rows(black_box(&series)))
    });

    group.bench_function("rank_repositories", |b| {
        b.iter(|| rank_repositories(black_box(&repos), black_box(&series)))
    });

    group.finish();
}

fn bench_plotting(c: &mut Criterion) {
    let (repos, series) = full_comparison();
    let rows = unified_weekly_rows(&series);
    let mut group = c.benchmark_group("plotting");
    group.sample_size(10);

    // Repeated calls hit the raster cache after the first render
    group.bench_function("render_weekly_chart_cached", |b| {
        b.iter(|| render_weekly_chart(black_box(&rows), black_box(&repos), false))
    });

    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_plotting);
criterion_main!(benches);
