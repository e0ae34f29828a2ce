use thiserror::Error;

/// Rejected at construction time, before any planning code runs. Every
/// variant carries the offending field so a caller can report exactly what
/// was wrong without re-deriving it from the input.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("horizon_steps must be in [1, 96], got {0}")]
    InvalidHorizon(usize),

    #[error("step_hours must be in (0, 2], got {0}")]
    InvalidStepHours(f64),

    #[error("series '{name}' has length {got}, expected {expected}")]
    SeriesLengthMismatch {
        name: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("water_min ({water_min}) must be less than water_max ({water_max})")]
    InvalidWaterBounds { water_min: f64, water_max: f64 },

    #[error("offset_min ({offset_min}) must be less than offset_max ({offset_max})")]
    InvalidOffsetBounds { offset_min: i32, offset_max: i32 },

    #[error("offset_step_max must be positive, got {0}")]
    InvalidOffsetStep(i32),

    #[error("initial_offset {initial_offset} is outside [{offset_min}, {offset_max}]")]
    InitialOffsetOutOfRange {
        initial_offset: i32,
        offset_min: i32,
        offset_max: i32,
    },

    #[error("storage_efficiency_eta must be in (0, 1], got {0}")]
    InvalidStorageEfficiency(f64),

    #[error("max_buffer_debt_kwh must be non-negative, got {0}")]
    InvalidMaxDebt(f64),

    #[error("terminal_penalty_lambda must be non-negative, got {0}")]
    InvalidTerminalPenalty(f64),

    #[error("initial_buffer_kwh ({initial_buffer_kwh}) is below -max_buffer_debt_kwh ({max_buffer_debt_kwh})")]
    InitialBufferBelowDebtCap {
        initial_buffer_kwh: f64,
        max_buffer_debt_kwh: f64,
    },
}

/// Checked by the planner between outer-loop iterations over `t`. A host
/// implements this over whatever cancellation primitive it already has
/// (an atomic flag, a channel, a deadline check); the planner never blocks on it.
pub trait PlanCancellation {
    fn is_cancelled(&self) -> bool;
}

/// Always-false cancellation token for callers that never cancel a plan.
pub struct NeverCancelled;

impl PlanCancellation for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}
