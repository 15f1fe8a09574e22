use std::time::Instant;

use crate::simulation::forces::{Gravity, LinearDrag};
use crate::simulation::states::{Body, NVec2, Shape};
use crate::simulation::world::World;

/// Helper to build a bounded world of `n` bodies, mixing boxes and circles
fn make_world(n: usize) -> World {
    let mut world = World::with_bounds(NVec2::new(0.0, 0.0), NVec2::new(1000.0, 1000.0));
    world.add_global_force(Gravity::new(NVec2::new(0.0, 600.0)));
    world.add_global_force(LinearDrag::new(0.001));

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            500.0 + (i_f * 0.37).sin() * 450.0,
            500.0 + (i_f * 0.13).cos() * 450.0,
        );
        let shape = if i % 2 == 0 { Shape::rect(20.0, 20.0) } else { Shape::circle(10.0) };

        world.add_body(
            Body::new(x, 1.0, shape)
                .with_velocity(NVec2::new((i_f * 0.07).sin() * 100.0, 0.0))
                .with_restitution(0.5),
        );
    }

    world
}

/// Benchmark `World::step` for a range of body counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() {
    println!("N,step_ms");

    let dt = 1.0 / 60.0;
    for n in [10, 25, 50, 100, 200, 400, 800] {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 100 { 200 } else { 20 };

        let mut world = make_world(n);

        // Warm up
        world.step(dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step(dt);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
