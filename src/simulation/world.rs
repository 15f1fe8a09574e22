//! The physics world: bodies, global forces, and the fixed step
//!
//! `World::step` runs one deterministic pass:
//! 1. apply every global force to every body (body order, then force order)
//! 2. integrate every body
//! 3. collect the collidable bodies, keeping world order
//! 4. detect and resolve collisions among them
//! 5. clamp movable bodies against the optional bounds
//!
//! Bodies and forces may only be added or removed between steps; holding
//! `&mut World` for the duration of `step` guarantees that.

use log::{debug, trace};

use crate::simulation::collision::{resolve_collisions, ContactSettings};
use crate::simulation::forces::{ForceGenerator, ForceSet};
use crate::simulation::integrator::integrate_bodies;
use crate::simulation::states::{Body, NVec2};

/// Stable identifier of a body inside one [`World`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u64);

#[derive(Default)]
pub struct World {
    bodies: Vec<Body>,
    handles: Vec<BodyHandle>, // parallel to `bodies`
    forces: ForceSet,
    next_handle: u64,
    pub min_bounds: Option<NVec2>,
    pub max_bounds: Option<NVec2>,
    pub contact_settings: ContactSettings,
    elapsed: f64,
    steps: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// World with an axis-aligned containment rectangle
    pub fn with_bounds(min: NVec2, max: NVec2) -> Self {
        Self {
            min_bounds: Some(min),
            max_bounds: Some(max),
            ..Self::default()
        }
    }

    /// Append a body; it is stepped after every body added before it
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;

        debug!("add body {:?} at {:?}, mass {}", handle, body.x, body.mass());
        self.bodies.push(body);
        self.handles.push(handle);
        handle
    }

    /// Remove a body, keeping the order of the others
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let idx = self.index_of(handle)?;
        self.handles.remove(idx);
        debug!("remove body {:?}", handle);
        Some(self.bodies.remove(idx))
    }

    /// Keep only the bodies for which `keep` returns true
    pub fn retain_bodies<F>(&mut self, mut keep: F)
    where
        F: FnMut(BodyHandle, &Body) -> bool,
    {
        let mask: Vec<bool> = self
            .handles
            .iter()
            .zip(&self.bodies)
            .map(|(h, b)| {
                let kept = keep(*h, b);
                if !kept {
                    debug!("remove body {:?}", h);
                }
                kept
            })
            .collect();

        let mut kept = mask.iter();
        self.bodies.retain(|_| *kept.next().unwrap_or(&true));
        let mut kept = mask.iter();
        self.handles.retain(|_| *kept.next().unwrap_or(&true));
    }

    pub fn add_global_force<T>(&mut self, force: T)
    where
        T: ForceGenerator + Send + Sync + 'static,
    {
        self.forces.push(force);
        debug!("global forces: {}", self.forces.len());
    }

    pub fn clear_global_forces(&mut self) {
        self.forces.clear();
    }

    pub fn global_forces(&self) -> &ForceSet {
        &self.forces
    }

    /// Bodies in world order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Handles in world order, matching [`World::bodies`]
    pub fn handles(&self) -> &[BodyHandle] {
        &self.handles
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.index_of(handle).map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.index_of(handle).map(move |i| &mut self.bodies[i])
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Simulated time advanced by all steps so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Advance the world by `dt`
    pub fn step(&mut self, dt: f64) {
        // Forces: every global force on every body, in order
        for body in self.bodies.iter_mut() {
            self.forces.apply_all(body, dt);
        }

        integrate_bodies(&mut self.bodies, dt);

        let collidable: Vec<usize> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.collidable)
            .map(|(i, _)| i)
            .collect();
        let contacts = resolve_collisions(&mut self.bodies, &collidable, &self.contact_settings);

        self.apply_bounds();

        self.elapsed += dt;
        self.steps += 1;
        trace!("step {} (t = {:.4}): {} contacts", self.steps, self.elapsed, contacts);
    }

    /// Clamp movable bodies into the bounds, reflecting the crossing velocity
    /// component scaled by the body's restitution. Min is checked before max
    fn apply_bounds(&mut self) {
        if self.min_bounds.is_none() && self.max_bounds.is_none() {
            return;
        }

        for body in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }
            let e = body.restitution;

            for axis in 0..2 {
                if let Some(min) = self.min_bounds {
                    if body.x[axis] < min[axis] {
                        body.x[axis] = min[axis];
                        body.v[axis] = -body.v[axis] * e;
                    }
                }
                if let Some(max) = self.max_bounds {
                    if body.x[axis] > max[axis] {
                        body.x[axis] = max[axis];
                        body.v[axis] = -body.v[axis] * e;
                    }
                }
            }
        }
    }

    fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.handles.iter().position(|h| *h == handle)
    }
}
