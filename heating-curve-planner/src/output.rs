use serde::{Deserialize, Serialize};

/// Outcome of a planning run. Every non-`Ok`/`DegenerateFlat` status carries
/// no partial offsets: the core never hands back a half-computed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Ok,
    DegenerateFlat,
    Infeasible,
    Cancelled,
}

/// Everything a caller needs to act on and explain a planning result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerOutput {
    pub status: Status,
    pub offsets: Vec<i32>,
    pub buffer: Vec<f64>,
    pub supply_temp: Vec<f64>,
    pub cost_per_step: Vec<f64>,
    pub total_cost: f64,
    pub baseline_cost: f64,
    pub savings_per_step: Vec<f64>,
    pub total_savings: f64,
    pub warnings: Vec<String>,
}

impl PlannerOutput {
    /// A broadcast fallback: the same offset at every step, zero cost,
    /// used by every non-`Ok` status per the error-handling policy.
    pub fn fallback(status: Status, horizon_steps: usize, initial_offset: i32, initial_buffer_kwh: f64, warnings: Vec<String>) -> Self {
        Self {
            status,
            offsets: vec![initial_offset; horizon_steps],
            buffer: vec![initial_buffer_kwh; horizon_steps],
            supply_temp: Vec::new(),
            cost_per_step: vec![0.0; horizon_steps],
            total_cost: 0.0,
            baseline_cost: 0.0,
            savings_per_step: vec![0.0; horizon_steps],
            total_savings: 0.0,
            warnings,
        }
    }
}
