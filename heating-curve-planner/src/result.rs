use crate::input::PlannerInput;
use crate::output::{PlannerOutput, Status};
use crate::planner::{precompute, transition, OffsetIndependentSeries};

/// Replays a chosen offset path from scratch, independent of whatever
/// internal state produced it, and checks the result against the data
/// model's invariants before it is handed back to a caller.
pub fn extract(input: &PlannerInput, offsets: &[i32], warnings: Vec<String>) -> PlannerOutput {
    let series = precompute(input);

    let replay = match replay_path(input, &series, offsets) {
        Some(replay) => replay,
        None => {
            let mut warnings = warnings;
            warnings.push("recomputed path violated a data-model invariant; discarded".into());
            return PlannerOutput::fallback(
                Status::Infeasible,
                input.horizon_steps,
                input.initial_offset,
                input.initial_buffer_kwh,
                warnings,
            );
        }
    };

    let baseline_offsets = vec![0i32; input.horizon_steps];
    let baseline = replay_path(input, &series, &baseline_offsets)
        .map(|r| r.cost_per_step)
        .unwrap_or_else(|| vec![0.0; input.horizon_steps]);

    let total_cost: f64 = replay.cost_per_step.iter().sum();
    let baseline_cost: f64 = baseline.iter().sum();
    let savings_per_step: Vec<f64> = baseline
        .iter()
        .zip(replay.cost_per_step.iter())
        .map(|(base, actual)| base - actual)
        .collect();
    let total_savings = baseline_cost - total_cost;

    PlannerOutput {
        status: Status::Ok,
        offsets: offsets.to_vec(),
        buffer: replay.buffer,
        supply_temp: replay.supply_temp,
        cost_per_step: replay.cost_per_step,
        total_cost,
        baseline_cost,
        savings_per_step,
        total_savings,
        warnings,
    }
}

struct Replay {
    buffer: Vec<f64>,
    supply_temp: Vec<f64>,
    cost_per_step: Vec<f64>,
}

/// Forward recomputation of a single offset path. Returns `None` if the path
/// breaches the step-size limit, the water-temperature bounds, or the debt
/// cap at any step: a recomputation mismatch against the planner's own
/// bookkeeping, not a normal planning outcome.
fn replay_path(input: &PlannerInput, series: &OffsetIndependentSeries, offsets: &[i32]) -> Option<Replay> {
    if offsets.len() != input.horizon_steps {
        return None;
    }

    let mut buffer = vec![0.0; input.horizon_steps];
    let mut supply_temp = vec![0.0; input.horizon_steps];
    let mut cost_per_step = vec![0.0; input.horizon_steps];

    buffer[0] = input.initial_buffer_kwh;
    supply_temp[0] = input.base_supply_temp[0] + offsets[0] as f64;

    for t in 1..input.horizon_steps {
        let step = (offsets[t] - offsets[t - 1]).abs();
        if step > input.offset_step_max {
            return None;
        }
        let supply = input.base_supply_temp[t] + offsets[t] as f64;
        if supply < input.water_min || supply > input.water_max {
            return None;
        }

        let result = transition(input, series, t, offsets[t], buffer[t - 1]);
        if !result.buffer_after.is_finite() || result.buffer_after < -input.max_buffer_debt_kwh {
            return None;
        }

        buffer[t] = result.buffer_after;
        supply_temp[t] = supply;
        cost_per_step[t] = result.cost;
    }

    Some(Replay {
        buffer,
        supply_temp,
        cost_per_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cop::CopParams;
    use crate::input::Humidity;
    use crate::pv::PvConfig;
    use crate::solar_gain::GlazingConfig;
    use heating_curve_model::{BuildingEnvelope, EnergyLabel, ForecastSeries, VentilationType};

    fn base_input(horizon: usize) -> PlannerInput {
        let flat = |v: f64| ForecastSeries::new(vec![v; horizon]);
        PlannerInput {
            horizon_steps: horizon,
            step_hours: 1.0,
            base_supply_temp: flat(38.0),
            outdoor_temp: flat(2.0),
            radiation: flat(0.0),
            humidity: Humidity::default(),
            price_consumption: flat(0.25),
            price_production: None,
            baseline_load: flat(0.3),
            pv_production: None,
            envelope: BuildingEnvelope::new(120.0, 2.5, EnergyLabel::C, VentilationType::Natural),
            indoor_temp_c: 20.0,
            glazing: GlazingConfig {
                area_east_m2: 4.0,
                area_south_m2: 8.0,
                area_west_m2: 4.0,
                u_value: 1.2,
            },
            pv: PvConfig { wp_east: 0.0, wp_south: 0.0, wp_west: 0.0, tilt_deg: 35.0 },
            start_hour_of_day: 0.0,
            water_min: 25.0,
            water_max: 50.0,
            offset_min: -4,
            offset_max: 4,
            offset_step_max: 1,
            cop: CopParams::default(),
            storage_efficiency_eta: 0.5,
            max_buffer_debt_kwh: 5.0,
            terminal_penalty_lambda: 0.01,
            initial_offset: 0,
            initial_buffer_kwh: 0.0,
        }
        .validated()
        .unwrap()
    }

    #[test]
    fn zero_offset_path_has_zero_total_savings() {
        let input = base_input(6);
        let offsets = vec![0i32; 6];
        let output = extract(&input, &offsets, vec![]);
        assert_eq!(output.status, Status::Ok);
        assert!((output.total_savings).abs() < 1e-9);
        assert!((output.total_cost - output.baseline_cost).abs() < 1e-9);
    }

    #[test]
    fn oversized_step_is_rejected_by_replay() {
        let input = base_input(3);
        let offsets = vec![0, 3, 0];
        let output = extract(&input, &offsets, vec![]);
        assert_eq!(output.status, Status::Infeasible);
    }

    #[test]
    fn buffer_trajectory_has_one_entry_per_step() {
        let input = base_input(4);
        let offsets = vec![0, 1, 1, 0];
        let output = extract(&input, &offsets, vec![]);
        assert_eq!(output.buffer.len(), 4);
        assert_eq!(output.supply_temp.len(), 4);
        assert_eq!(output.cost_per_step.len(), 4);
    }
}
