//! Global force generators for the rigid-body world
//!
//! Each generator implements [`ForceGenerator`] and adds its contribution to a
//! body's force accumulator. The world applies every generator to every body
//! once per step, in registration order. Generators are responsible for
//! skipping immovable bodies themselves.

use crate::simulation::states::{Body, NVec2};

/// Trait for force sources acting on a single [`Body`]
/// Implementations add their force with [`Body::add_force`]
pub trait ForceGenerator {
    fn apply(&self, body: &mut Body, dt: f64);
}

/// Ordered collection of force generators (gravity, drag, etc.)
/// The contributions of all terms are summed into each body's accumulator
#[derive(Default)]
pub struct ForceSet {
    terms: Vec<Box<dyn ForceGenerator + Send + Sync>>,
}

impl ForceSet {
    /// Add a force term
    pub fn push<T>(&mut self, term: T)
    where
        T: ForceGenerator + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply every term to `body`, in the order they were added
    pub fn apply_all(&self, body: &mut Body, dt: f64) {
        for term in &self.terms {
            term.apply(body, dt);
        }
    }
}

/// Uniform gravitational field
/// Adds `g * mass`, so every movable body accelerates by exactly `g`
#[derive(Debug, Clone, Copy)]
pub struct Gravity {
    pub g: NVec2, // acceleration
}

impl Gravity {
    pub fn new(g: NVec2) -> Self {
        Self { g }
    }
}

impl ForceGenerator for Gravity {
    fn apply(&self, body: &mut Body, _dt: f64) {
        if body.is_static() {
            return;
        }
        let f = self.g * body.mass();
        body.add_force(f);
    }
}

/// Velocity-proportional drag scaled by the body's reference area
/// `F = -coefficient * (width * height) * v`
#[derive(Debug, Clone, Copy)]
pub struct LinearDrag {
    pub coefficient: f64,
}

impl LinearDrag {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }
}

impl ForceGenerator for LinearDrag {
    fn apply(&self, body: &mut Body, _dt: f64) {
        if body.is_static() {
            return;
        }
        let areal_coefficient = -self.coefficient * body.reference_area();
        let f = body.v * areal_coefficient;
        body.add_force(f);
    }
}
