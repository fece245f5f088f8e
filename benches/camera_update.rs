use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orbit_viewer::camera::{spherical_offset, OrbitCamera};
use orbit_viewer::config::CameraConfig;
use orbit_viewer::core::{Button, InputEvent, InputQueue};
use orbit_viewer::scene::Scene;

/// Queue a held modifier + button and `moves` cursor events
fn drag_events(button: Button, moves: usize) -> Vec<InputEvent> {
    let mut events = vec![
        InputEvent::Key {
            button: Button::AltLeft,
            pressed: true,
        },
        InputEvent::MouseButton { button, pressed: true },
    ];
    events.extend((0..moves).map(|i| InputEvent::CursorMoved {
        x: (i as f32 * 3.7) % 640.0,
        y: (i as f32 * 1.3) % 480.0,
    }));
    events
}

/// Benchmark: one frame of orbit/pan input of varying size
fn bench_camera_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("camera_frame");

    for (label, button) in [("orbit", Button::MouseLeft), ("pan", Button::MouseMiddle)] {
        for moves in [1, 16, 128] {
            let events = drag_events(button, moves);
            group.bench_with_input(BenchmarkId::new(label, moves), &events, |b, events| {
                let mut camera = OrbitCamera::new(CameraConfig::default());
                let mut queue = InputQueue::default();
                b.iter(|| {
                    for event in events {
                        queue.push(*event);
                    }
                    camera.update(&mut queue, black_box(0.016));
                    black_box(camera.view_matrix())
                });
            });
        }
    }

    group.finish();
}

/// Benchmark: spherical placement alone
fn bench_spherical_offset(c: &mut Criterion) {
    c.bench_function("spherical_offset", |b| {
        b.iter(|| spherical_offset(black_box(20.0), black_box(1.2), black_box(0.4)))
    });
}

/// Benchmark: per-frame matrices the renderer uploads
fn bench_frame_matrices(c: &mut Criterion) {
    let scene = Scene::desk();
    let camera = OrbitCamera::new(CameraConfig::default());

    c.bench_function("frame_matrices", |b| {
        b.iter(|| {
            let projection = camera.projection_matrix(black_box(640.0 / 480.0));
            let models = scene.model_matrices();
            let lamps = scene.lamp_transforms();
            black_box((projection, models, lamps))
        })
    });
}

criterion_group!(
    benches,
    bench_camera_frame,
    bench_spherical_offset,
    bench_frame_matrices
);
criterion_main!(benches);
