use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use robot_path_editor::core::CubicBezier;
use robot_path_editor::{parse_path_document, ConstraintSolver, GeometryOptions, Line, NodeId};
use robot_path_editor::{PathModel, SegmentKind};
use std::hint::black_box;

fn bench_document_parsing(c: &mut Criterion) {
    let json_content = include_str!("../tests/fixtures/sample_path.json");

    c.bench_function("json_parse_sample_path", |b| {
        b.iter(|| {
            let path = parse_path_document(black_box(json_content), GeometryOptions::default())
                .expect("JSON parse failed");
            black_box(path.node_count())
        })
    });
}

fn bench_bezier_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("bezier_sampling");
    let options = GeometryOptions::default();

    for &scale in &[10.0f64, 100.0, 1000.0] {
        let curve = CubicBezier::new(
            DVec2::ZERO,
            DVec2::new(0.4 * scale, 0.6 * scale),
            DVec2::new(0.7 * scale, -0.3 * scale),
            DVec2::new(scale, 0.0),
        );

        group.bench_with_input(BenchmarkId::new("uniform", scale), &curve, |b, curve| {
            b.iter(|| black_box(curve.sample_uniform(options.bezier_fast_samples)).len())
        });
        group.bench_with_input(BenchmarkId::new("arc_length", scale), &curve, |b, curve| {
            b.iter(|| {
                black_box(curve.sample_by_arc_length(
                    options.bezier_sample_spacing,
                    options.quadrature_tolerance,
                ))
                .len()
            })
        });
    }

    group.finish();
}

fn build_query_points(count: usize) -> Vec<DVec2> {
    (0..count)
        .map(|i| {
            let x = (i % 100) as f64 + 0.37;
            let y = ((i * 7) % 100) as f64 + 0.63;
            DVec2::new(x, y)
        })
        .collect()
}

fn bench_constraint_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("constraint_solver");
    let query_points = build_query_points(1024);

    for &constraint_count in &[4usize, 32usize] {
        let mut solver = ConstraintSolver::default();
        solver.reset_constraints(DVec2::ZERO);
        for i in 0..constraint_count {
            let anchor = DVec2::new(i as f64 * 3.0, i as f64 * 5.0);
            solver.add_constraint(Line::new(anchor, i as f64 * 0.2), [NodeId(i as u64)]);
        }

        group.bench_function(BenchmarkId::new("constrain_position", constraint_count), |b| {
            b.iter(|| {
                let mut snapped = 0usize;
                for point in &query_points {
                    solver.constrain_position(black_box(*point));
                    if solver.snapped() {
                        snapped += 1;
                    }
                }
                black_box(snapped)
            })
        });
    }

    group.finish();
}

fn bench_path_drag(c: &mut Criterion) {
    let mut path = PathModel::new(DVec2::ZERO, GeometryOptions::default());
    for i in 1..=200 {
        let kind = match i % 3 {
            0 => SegmentKind::Straight,
            1 => SegmentKind::Arc,
            _ => SegmentKind::Bezier,
        };
        path.append_node(DVec2::new(i as f64 * 12.0, (i % 5) as f64 * 4.0), kind);
    }
    let target = path.node_ids()[100];

    c.bench_function("path_move_node_fast", |b| {
        path.begin_interaction();
        let mut step = 0.0f64;
        b.iter(|| {
            step += 0.01;
            path.move_node(target, DVec2::new(1200.0, step.sin()))
                .expect("move failed");
        });
        path.end_interaction();
    });
}

criterion_group!(
    core_benches,
    bench_document_parsing,
    bench_bezier_sampling,
    bench_constraint_solver,
    bench_path_drag
);
criterion_main!(core_benches);
