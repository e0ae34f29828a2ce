//! Dynamic-programming heating-curve offset planner for heat-pump systems.
//!
//! Given a forecast horizon of prices, demand, outdoor temperature, and
//! radiation, [`plan`] computes a forward-looking sequence of heating-curve
//! offsets that minimizes electricity cost subject to water-temperature and
//! thermal-buffer constraints. The crate is a pure library: it consumes a
//! validated [`PlannerInput`] and returns a [`PlannerOutput`], with no
//! persistence, scheduling, or wire protocol of its own. A caller that needs
//! to align raw, irregularly-sampled forecasts to the planning horizon first
//! should use [`forecast::resample`]; [`plan`] itself expects series already
//! aligned to `horizon_steps`.

pub mod cop;
pub mod demand;
pub mod error;
pub mod forecast;
pub mod heat_loss;
pub mod input;
pub mod output;
pub mod planner;
pub mod pv;
pub mod result;
pub mod solar_gain;

pub use error::{ConfigError, NeverCancelled, PlanCancellation};
pub use input::{Humidity, PlannerInput};
pub use output::{PlannerOutput, Status};

use planner::{precompute, PlanSearchOutcome};

/// Plans heating-curve offsets over `input.horizon_steps`, honoring
/// `cancellation` between steps of the search.
///
/// Returns a degenerate-flat result with no search at all when the horizon
/// has no positive net heat demand; otherwise runs the dynamic-programming
/// search and, on success, recomputes the chosen path from scratch before
/// handing it back.
pub fn plan(input: &PlannerInput, cancellation: &dyn PlanCancellation) -> PlannerOutput {
    let series = precompute(input);
    let total_positive_demand: f64 = series
        .net_demand_kw
        .iter()
        .map(|&d| d.max(0.0))
        .sum::<f64>()
        * input.step_hours;

    if total_positive_demand <= 0.0 {
        return PlannerOutput {
            status: Status::DegenerateFlat,
            offsets: vec![0; input.horizon_steps],
            buffer: vec![input.initial_buffer_kwh; input.horizon_steps],
            supply_temp: input
                .base_supply_temp
                .iter()
                .copied()
                .collect(),
            cost_per_step: vec![0.0; input.horizon_steps],
            total_cost: 0.0,
            baseline_cost: 0.0,
            savings_per_step: vec![0.0; input.horizon_steps],
            total_savings: 0.0,
            warnings: vec!["no positive heat demand over the horizon; offsets hold at zero".into()],
        };
    }

    match planner::search(input, cancellation) {
        PlanSearchOutcome::Found(offsets) => result::extract(input, &offsets, Vec::new()),
        PlanSearchOutcome::Infeasible => PlannerOutput::fallback(
            Status::Infeasible,
            input.horizon_steps,
            input.initial_offset,
            input.initial_buffer_kwh,
            vec!["no admissible plan satisfies the buffer-debt and water-temperature bounds".into()],
        ),
        PlanSearchOutcome::Cancelled => PlannerOutput::fallback(
            Status::Cancelled,
            input.horizon_steps,
            input.initial_offset,
            input.initial_buffer_kwh,
            vec!["plan cancelled before completion".into()],
        ),
    }
}
