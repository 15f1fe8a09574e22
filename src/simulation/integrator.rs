//! Fixed-step time integration for rigid bodies
//!
//! Semi-implicit (symplectic) Euler: the velocity is advanced first from the
//! accumulated force, then the position is advanced with the *new* velocity.
//!
//! ```text
//! v = v_0 + (F / m) * dt
//! v = v * max(0, 1 - damping * dt)
//! x = x_0 + v * dt
//! ```

use super::states::Body;

/// Advance one body by `dt` and clear its force accumulator.
/// Immovable bodies only have their forces cleared.
pub fn semi_implicit_euler(body: &mut Body, dt: f64) {
    let inv_m = body.inverse_mass();
    if inv_m <= 0.0 {
        body.clear_forces();
        return;
    }

    // a = F / m
    let a = body.accumulated_force() * inv_m;

    // v_n+1 = v_n + a dt
    body.v += a * dt;

    // damping never reverses the body, it can only stop it
    body.v *= (1.0 - body.damping * dt).max(0.0);

    // x_n+1 = x_n + v_n+1 dt
    body.x += body.v * dt;

    body.clear_forces();
}

/// Integrate every body in order
pub fn integrate_bodies(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        semi_implicit_euler(b, dt);
    }
}

impl Body {
    /// See [`semi_implicit_euler`]
    pub fn integrate(&mut self, dt: f64) {
        semi_implicit_euler(self, dt);
    }
}
