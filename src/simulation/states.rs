//! Core state types for the rigid-body simulation.
//!
//! Defines the 2D body and its shape:
//! - `Body` holds position/velocity (`NVec2`), mass and material properties
//! - `Shape` is the collision footprint (axis-aligned box or circle)
//! - `SceneObject` pairs a named body handle with a renderer's own handle
//!
//! A body never destroys itself; the owning `World` removes it between steps.

use nalgebra::Vector2;

use crate::simulation::world::BodyHandle;

pub type NVec2 = Vector2<f64>;

/// Collision footprint of a body, centered on its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box given by its half extents
    Box { half_width: f64, half_height: f64 },
    /// Circle given by its radius
    Circle { radius: f64 },
}

impl Shape {
    /// Box from full width/height, the way editors usually size them
    pub fn rect(width: f64, height: f64) -> Self {
        Shape::Box {
            half_width: 0.5 * width,
            half_height: 0.5 * height,
        }
    }

    pub fn circle(radius: f64) -> Self {
        Shape::Circle { radius }
    }

    /// Half extents of the axis-aligned bounding box.
    /// A circle is bounded by the square of side `2r`
    pub fn half_extents(&self) -> NVec2 {
        match *self {
            Shape::Box { half_width, half_height } => NVec2::new(half_width, half_height),
            Shape::Circle { radius } => NVec2::new(radius, radius),
        }
    }
}

/// A single rigid body (no rotation)
///
/// `mass` is the only stored view of the body's inertia; the inverse mass is
/// derived from it on demand so the two can never disagree. A mass that is
/// `<= 0` or infinite marks the body as immovable (inverse mass 0).
#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position (center)
    pub v: NVec2, // velocity
    pub shape: Shape,
    pub restitution: f64, // bounce factor, not clamped
    pub damping: f64, // linear damping per unit time
    pub collidable: bool,
    mass: f64,
    force: NVec2, // accumulated for the current step
}

impl Body {
    /// Create a body at rest at `x`
    pub fn new(x: NVec2, mass: f64, shape: Shape) -> Self {
        Self {
            x,
            v: NVec2::zeros(),
            shape,
            restitution: 1.0,
            damping: 0.0,
            collidable: true,
            mass,
            force: NVec2::zeros(),
        }
    }

    /// Create an immovable body (infinite mass)
    pub fn fixed(x: NVec2, shape: Shape) -> Self {
        Self::new(x, f64::INFINITY, shape)
    }

    pub fn with_velocity(mut self, v: NVec2) -> Self {
        self.v = v;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    /// `1 / mass`, or 0 when the mass is `<= 0` or infinite
    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        if self.mass <= 0.0 || self.mass.is_infinite() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Set the mass through its inverse. `<= 0` or infinite makes the body immovable
    pub fn set_inverse_mass(&mut self, inverse_mass: f64) {
        self.mass = if inverse_mass <= 0.0 || inverse_mass.is_infinite() {
            f64::INFINITY
        } else {
            1.0 / inverse_mass
        };
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.inverse_mass() == 0.0
    }

    /// Add a force for the current step
    pub fn add_force(&mut self, f: NVec2) {
        self.force += f;
    }

    pub fn clear_forces(&mut self) {
        self.force = NVec2::zeros();
    }

    pub fn accumulated_force(&self) -> NVec2 {
        self.force
    }

    /// Add a velocity change directly (editor "nudge" buttons)
    pub fn nudge(&mut self, dv: NVec2) {
        self.v += dv;
    }

    /// Stop the body in place
    pub fn halt(&mut self) {
        self.v = NVec2::zeros();
    }

    /// Move the body and drop its velocity so it isn't launched on release
    pub fn teleport(&mut self, x: NVec2) {
        self.x = x;
        self.v = NVec2::zeros();
    }

    /// Full width and height of the bounding box
    pub fn extents(&self) -> NVec2 {
        2.0 * self.shape.half_extents()
    }

    /// Area used by drag: `width * height` of the bounding box
    pub fn reference_area(&self) -> f64 {
        let e = self.extents();
        e.x * e.y
    }
}

/// What a renderer keeps per drawn object: a name, the body it draws,
/// and whatever handle the renderer uses for its own resources
#[derive(Debug, Clone)]
pub struct SceneObject<R = ()> {
    pub name: String,
    pub body: BodyHandle,
    pub render_handle: Option<R>,
}

impl<R> SceneObject<R> {
    pub fn new(name: impl Into<String>, body: BodyHandle) -> Self {
        Self {
            name: name.into(),
            body,
            render_handle: None,
        }
    }

    pub fn with_render_handle(mut self, handle: R) -> Self {
        self.render_handle = Some(handle);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Shape {
        Shape::rect(1.0, 1.0)
    }

    #[test]
    fn inverse_mass_zero_for_degenerate_masses() {
        for m in [0.0, -3.0, f64::INFINITY, f64::NEG_INFINITY] {
            let b = Body::new(NVec2::zeros(), m, unit_box());
            assert_eq!(b.inverse_mass(), 0.0, "mass {m}");
            assert!(b.is_static());
        }
        let b = Body::new(NVec2::zeros(), 4.0, unit_box());
        assert_eq!(b.inverse_mass(), 0.25);
        assert!(!b.is_static());
    }

    #[test]
    fn set_inverse_mass_updates_mass() {
        let mut b = Body::new(NVec2::zeros(), 1.0, unit_box());
        b.set_inverse_mass(0.5);
        assert_eq!(b.mass(), 2.0);

        b.set_inverse_mass(0.0);
        assert!(b.mass().is_infinite());
        assert_eq!(b.inverse_mass(), 0.0);

        b.set_inverse_mass(-1.0);
        assert!(b.mass().is_infinite());

        b.set_mass(5.0);
        assert_eq!(b.inverse_mass(), 0.2);
    }

    #[test]
    fn forces_accumulate_and_clear() {
        let mut b = Body::new(NVec2::zeros(), 1.0, unit_box());
        b.add_force(NVec2::new(1.0, 2.0));
        b.add_force(NVec2::new(-3.0, 0.5));
        assert_eq!(b.accumulated_force(), NVec2::new(-2.0, 2.5));
        b.clear_forces();
        assert_eq!(b.accumulated_force(), NVec2::zeros());
    }

    #[test]
    fn circle_reference_area_is_bounding_square() {
        let b = Body::new(NVec2::zeros(), 1.0, Shape::circle(2.0));
        assert_eq!(b.extents(), NVec2::new(4.0, 4.0));
        assert_eq!(b.reference_area(), 16.0);

        let b = Body::new(NVec2::zeros(), 1.0, Shape::rect(20.0, 1.0));
        assert_eq!(b.reference_area(), 20.0);
    }

    #[test]
    fn teleport_drops_velocity() {
        let mut b = Body::new(NVec2::zeros(), 1.0, unit_box()).with_velocity(NVec2::new(3.0, 4.0));
        b.nudge(NVec2::new(1.0, 0.0));
        assert_eq!(b.v, NVec2::new(4.0, 4.0));
        b.teleport(NVec2::new(10.0, 10.0));
        assert_eq!(b.x, NVec2::new(10.0, 10.0));
        assert_eq!(b.v, NVec2::zeros());

        b.nudge(NVec2::new(0.0, -2.0));
        b.halt();
        assert_eq!(b.v, NVec2::zeros());
        assert_eq!(b.x, NVec2::new(10.0, 10.0));
    }

    #[test]
    fn scene_object_keeps_render_handle() {
        let mut world = crate::simulation::world::World::new();
        let h = world.add_body(Body::new(NVec2::zeros(), 1.0, unit_box()));
        let obj = SceneObject::new("ball", h).with_render_handle(7u32);
        assert_eq!(obj.name, "ball");
        assert_eq!(obj.body, h);
        assert_eq!(obj.render_handle, Some(7));
    }
}
