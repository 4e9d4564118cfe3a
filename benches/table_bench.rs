//! Benchmarks for dashboard decoding and the user table
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use querylens::decode::decode_dashboard;
use querylens::metrics::user_rows;
use querylens::table::{sort_rows, SortDirection, SortKey, TableState};
use querylens::view::FetchRequest;
use querylens::{DateWindow, Effect, Event, UserSelection, ViewModel, ViewSettings, ViewState};

fn dashboard_body(users: usize) -> String {
    let users: Vec<_> = (0..users)
        .map(|i| {
            let total = 50 + (i * 37 % 900) as u64;
            let failed = total / (5 + (i % 7) as u64);
            let answered = total - failed;
            json!({
                "user_id": format!("u{:05}", i),
                "display_name": format!("User {}", i),
                "total_queries": total,
                "failed_queries": failed,
                "success_rate_pct": answered as f64 * 100.0 / total as f64,
                "confidence": {
                    "high": answered / 2,
                    "medium": answered / 3,
                    "low": answered - answered / 2 - answered / 3
                }
            })
        })
        .collect();

    json!({
        "metadata": {},
        "data": {
            "tenant_id": "bench",
            "window": {"start_date": "2026-01-19", "end_date": "2026-02-18"},
            "summary": {
                "total_queries": 100000, "failed_queries": 10000, "success_rate_pct": 90.0,
                "active_users": users.len(), "max_queries_per_user": 949, "min_queries_per_user": 50
            },
            "confidence_distribution": {
                "high": {"count": 45000, "pct_of_answered": 50.0},
                "medium": {"count": 30000, "pct_of_answered": 33.3},
                "low": {"count": 15000, "pct_of_answered": 16.7}
            },
            "query_timeseries": {
                "granularity": "day",
                "series": (0..30).map(|d| json!({
                    "date": format!("2026-02-{:02}", (d % 18) + 1),
                    "total_queries": 3000 + d * 10,
                    "failed_queries": 300
                })).collect::<Vec<_>>()
            },
            "user_query_stats": {
                "pagination": {"page": 1, "page_size": users.len(), "total_records": users.len()},
                "users": users
            }
        }
    })
    .to_string()
}

/// A view with the given dashboard body already applied
fn loaded_view(body: &str) -> ViewState {
    let window = DateWindow::parse("2026-01-19", "2026-02-18").unwrap();
    let mut view = ViewState::new(ViewSettings::default(), window).with_tenant("bench");
    for effect in view.handle(Event::Start) {
        if let Effect::Fetch(FetchRequest::Dashboard { token, .. }) = effect {
            view.handle(Event::DashboardLoaded {
                token,
                result: decode_dashboard(body),
            });
        }
    }
    view
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [25, 250, 2500] {
        let body = dashboard_body(size);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::new("dashboard", size), &body, |b, body| {
            b.iter(|| decode_dashboard(black_box(body)).unwrap())
        });
    }

    group.finish();
}

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("table");

    for size in [100, 1000, 10000] {
        let view = loaded_view(&dashboard_body(size));
        let rows = user_rows(view.dashboard());
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("sort_success_{}", size), |b| {
            b.iter(|| {
                let mut rows = rows.clone();
                sort_rows(black_box(&mut rows), SortKey::SuccessRate, SortDirection::Descending);
                rows
            })
        });

        let mut table = TableState::default();
        table.set_page_size(50).unwrap();
        table.go_to(3, usize::MAX);
        group.bench_function(format!("render_page_{}", size), |b| {
            b.iter(|| table.render(black_box(&rows), &UserSelection::All))
        });

        group.bench_function(format!("view_model_{}", size), |b| {
            b.iter(|| ViewModel::build(black_box(&view), &table))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_table);
criterion_main!(benches);
