//! Run parameters for a scenario
//!
//! `Parameters` holds the settings the driver needs around `World::step`:
//! - fixed step size and end time,
//! - how often body states are reported

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64, // step size
    pub report_every: u64, // steps between reports, 0 = final state only
}

impl Parameters {
    /// Number of fixed steps needed to reach `t_end`
    pub fn step_count(&self) -> u64 {
        (self.t_end / self.h0).round() as u64
    }
}
