use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

use iss_tracker::{
    conversion::eci_to_geodetic, epoch_store::closest_state_vector, time::parse_oem_epoch,
    StateVector,
};

/// Fifteen days of state vectors at the feed's four-minute cadence.
fn synthetic_state_vectors() -> Vec<StateVector> {
    let radius = 6_771.0;
    let mean_motion = std::f64::consts::TAU / 5_554.0;

    (0..15 * 24 * 15)
        .map(|i| {
            let minutes = i * 4;
            let epoch = format!(
                "2023-{:03}T{:02}:{:02}:00.000Z",
                48 + minutes / 1_440,
                (minutes / 60) % 24,
                minutes % 60
            );
            let angle = mean_motion * (minutes as f64) * 60.0;
            let position = Vector3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
            let velocity = Vector3::new(-7.67 * angle.sin(), 7.67 * angle.cos(), 0.0);
            StateVector::new(&epoch, position, velocity).unwrap()
        })
        .collect()
}

fn bench_closest_epoch(c: &mut Criterion) {
    let state_vectors = synthetic_state_vectors();
    let instants = [
        "2023-047T00:00:00.000Z",
        "2023-055T13:37:00.000Z",
        "2023-070T00:00:00.000Z",
    ]
    .map(|e| parse_oem_epoch(e).unwrap());

    c.bench_function("closest_state_vector/15_days", |b| {
        b.iter(|| {
            for instant in instants {
                black_box(closest_state_vector(black_box(&state_vectors), instant));
            }
        })
    });
}

fn bench_eci_to_geodetic(c: &mut Criterion) {
    let state_vectors = synthetic_state_vectors();

    c.bench_function("eci_to_geodetic/15_days", |b| {
        b.iter(|| {
            for sv in &state_vectors {
                black_box(eci_to_geodetic(sv.position(), sv.instant()));
            }
        })
    });
}

criterion_group!(benches, bench_closest_epoch, bench_eci_to_geodetic);
criterion_main!(benches);
