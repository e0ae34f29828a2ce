use heating_curve_model::ForecastSeries;

/// Native sampling step of a raw forecast, before it is aligned to the
/// planner's own step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeStep {
    Minutes5,
    Minutes15,
    Minutes30,
    Minutes60,
    /// Source does not report its own step; the resampler assumes the
    /// target step and emits a warning.
    Unknown,
}

impl NativeStep {
    fn hours(self, target_step_hours: f64) -> f64 {
        match self {
            NativeStep::Minutes5 => 5.0 / 60.0,
            NativeStep::Minutes15 => 15.0 / 60.0,
            NativeStep::Minutes30 => 30.0 / 60.0,
            NativeStep::Minutes60 => 1.0,
            NativeStep::Unknown => target_step_hours,
        }
    }
}

/// A forecast as received from outside the core, before it has been aligned
/// to the planning horizon's step.
#[derive(Debug, Clone)]
pub struct RawForecast {
    pub native_step: NativeStep,
    pub values: Vec<f64>,
}

impl RawForecast {
    pub fn new(native_step: NativeStep, values: Vec<f64>) -> Self {
        Self {
            native_step,
            values,
        }
    }
}

/// Outcome of a resample attempt. `Unavailable` is not an error: it is a
/// first-class result the caller folds into `PlannerOutput::status`.
#[derive(Debug, Clone)]
pub enum Resampled {
    Series {
        series: ForecastSeries,
        warnings: Vec<String>,
    },
    Unavailable,
}

/// Aligns a raw forecast to `horizon_steps` values of length `target_step_hours`.
///
/// Downsampling averages the covering target interval; upsampling linearly
/// interpolates between native samples (edges held constant); a native step
/// of `Unknown` is treated as already matching the target step, with a
/// warning. Missing values at the tail are forward-filled from the last
/// known sample. An empty source is unavailable.
pub fn resample(raw: &RawForecast, target_step_hours: f64, horizon_steps: usize) -> Resampled {
    if raw.values.is_empty() {
        return Resampled::Unavailable;
    }

    let mut warnings = Vec::new();
    if matches!(raw.native_step, NativeStep::Unknown) {
        warnings.push("forecast has unknown native step; assumed to match target step".into());
    }
    let native_step_hours = raw.native_step.hours(target_step_hours);

    let mut aligned = if (native_step_hours - target_step_hours).abs() < 1e-9 {
        raw.values.clone()
    } else if native_step_hours > target_step_hours {
        upsample_linear(&raw.values, native_step_hours, target_step_hours, horizon_steps)
    } else {
        downsample_mean(&raw.values, native_step_hours, target_step_hours, horizon_steps)
    };

    if aligned.len() < horizon_steps {
        warnings.push(format!(
            "forecast covers {} of {} required steps; tail forward-filled",
            aligned.len(),
            horizon_steps
        ));
        let last = *aligned.last().unwrap();
        aligned.resize(horizon_steps, last);
    } else if aligned.len() > horizon_steps {
        aligned.truncate(horizon_steps);
    }

    Resampled::Series {
        series: ForecastSeries::new(aligned),
        warnings,
    }
}

fn upsample_linear(
    values: &[f64],
    native_step_hours: f64,
    target_step_hours: f64,
    horizon_steps: usize,
) -> Vec<f64> {
    let mut out = Vec::with_capacity(horizon_steps);
    for step in 0..horizon_steps {
        let t_hours = step as f64 * target_step_hours;
        let native_index = t_hours / native_step_hours;
        let lower = native_index.floor() as usize;
        let frac = native_index - lower as f64;

        if lower >= values.len() {
            out.push(*values.last().unwrap());
            continue;
        }
        let upper = lower + 1;
        if upper >= values.len() {
            out.push(values[lower]);
        } else {
            out.push(values[lower] + frac * (values[upper] - values[lower]));
        }
    }
    out
}

fn downsample_mean(
    values: &[f64],
    native_step_hours: f64,
    target_step_hours: f64,
    horizon_steps: usize,
) -> Vec<f64> {
    let mut out = Vec::with_capacity(horizon_steps);
    for step in 0..horizon_steps {
        let window_start_hours = step as f64 * target_step_hours;
        let window_end_hours = window_start_hours + target_step_hours;
        let start_index = (window_start_hours / native_step_hours).floor() as usize;
        let end_index = ((window_end_hours / native_step_hours).ceil() as usize).max(start_index + 1);

        if start_index >= values.len() {
            out.push(*values.last().unwrap());
            continue;
        }
        let end_index = end_index.min(values.len());
        let window = &values[start_index..end_index];
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        out.push(mean);
    }
    out
}
