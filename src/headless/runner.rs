//! Headless driver for a `Scenario`
//!
//! Steps the world with the fixed `h0` until `t_end` and writes body states
//! as plain text lines:
//!
//! ```text
//! step t name x y vx vy
//! ```
//!
//! This is the batch replacement for an interactive viewer: the caller owns
//! the clock, the world only ever sees `step(h0)`.

use std::io::{self, Write};

use log::info;

use crate::simulation::scenario::Scenario;

/// What a finished run looked like
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub elapsed: f64,
    pub bodies: usize,
}

/// Run the scenario to completion, reporting every `report_every` steps and
/// always reporting the final state
pub fn run_headless<W: Write>(scenario: &mut Scenario, out: &mut W) -> io::Result<RunSummary> {
    let n_steps = scenario.parameters.step_count();
    let every = scenario.parameters.report_every;
    let dt = scenario.parameters.h0;

    info!("run_headless: {} bodies, {} steps of {}", scenario.world.len(), n_steps, dt);

    writeln!(out, "step t name x y vx vy")?;
    write_states(scenario, out)?;

    for step in 1..=n_steps {
        scenario.world.step(dt);

        if every > 0 && step % every == 0 && step != n_steps {
            write_states(scenario, out)?;
        }
    }
    if n_steps > 0 {
        write_states(scenario, out)?;
    }

    let summary = RunSummary {
        steps: scenario.world.step_count(),
        elapsed: scenario.world.elapsed(),
        bodies: scenario.world.len(),
    };
    info!("run_headless: done, t = {:.4}", summary.elapsed);
    Ok(summary)
}

fn write_states<W: Write>(scenario: &Scenario, out: &mut W) -> io::Result<()> {
    let world = &scenario.world;
    for (i, b) in world.bodies().iter().enumerate() {
        let name = scenario.name_of(i).unwrap_or("?");
        writeln!(
            out,
            "{} {:.6} {} {:.6} {:.6} {:.6} {:.6}",
            world.step_count(),
            world.elapsed(),
            name,
            b.x.x,
            b.x.y,
            b.v.x,
            b.v.y
        )?;
    }
    Ok(())
}
