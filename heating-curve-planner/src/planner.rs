use std::collections::BTreeMap;

use crate::cop::cop;
use crate::demand::{net_balance_kw, net_heat_demand_kw, select_price};
use crate::error::PlanCancellation;
use crate::heat_loss::heat_loss_series;
use crate::input::PlannerInput;
use crate::pv::pv_production_series;
use crate::solar_gain::solar_gain_series;

/// Outcome of the search phase. Carries only the chosen offset sequence;
/// buffer, cost, and supply temperature are recomputed independently by the
/// result extractor rather than trusted from the DP's internal bookkeeping.
pub enum PlanSearchOutcome {
    Found(Vec<i32>),
    Infeasible,
    Cancelled,
}

/// Per-step quantities that do not depend on the chosen offset, computed
/// once up front so the DP's inner loop only ever evaluates the transition
/// formula itself.
pub(crate) struct OffsetIndependentSeries {
    pub net_demand_kw: Vec<f64>,
    pub pv_kw: Vec<f64>,
    pub humidity_pct: Vec<f64>,
}

pub(crate) fn precompute(input: &PlannerInput) -> OffsetIndependentSeries {
    let heat_loss = heat_loss_series(
        input.envelope.htc_w_per_k(),
        input.indoor_temp_c,
        &input.outdoor_temp,
    );
    let solar_gain = solar_gain_series(
        &input.glazing,
        &input.radiation,
        input.start_hour_of_day,
        input.step_hours,
    );
    let net_demand_kw: Vec<f64> = heat_loss
        .iter()
        .zip(solar_gain.iter())
        .map(|(&loss, &gain)| net_heat_demand_kw(loss, gain))
        .collect();

    let pv_kw = match &input.pv_production {
        Some(series) => series.0.clone(),
        None => pv_production_series(
            &input.pv,
            &input.radiation,
            input.start_hour_of_day,
            input.step_hours,
        ),
    };

    let humidity_pct = (0..input.horizon_steps).map(|t| input.humidity.at(t)).collect();

    OffsetIndependentSeries {
        net_demand_kw,
        pv_kw,
        humidity_pct,
    }
}

fn supply_temp_admissible(base_supply_temp_c: f64, offset: i32, water_min: f64, water_max: f64) -> bool {
    let supply = base_supply_temp_c + offset as f64;
    supply >= water_min && supply <= water_max
}

/// Offsets that are admissible at at least one step; offsets that violate
/// the water-temperature bounds at every step are dropped once, up front.
pub(crate) fn globally_admissible_offsets(input: &PlannerInput) -> Vec<i32> {
    (input.offset_min..=input.offset_max)
        .filter(|&o| {
            (0..input.horizon_steps).any(|t| {
                supply_temp_admissible(input.base_supply_temp[t], o, input.water_min, input.water_max)
            })
        })
        .collect()
}

/// Result of a single transition, before admissibility/finiteness checks.
pub(crate) struct Transition {
    pub buffer_after: f64,
    pub electrical_draw_kwh: f64,
    pub cost: f64,
}

pub(crate) fn transition(input: &PlannerInput, series: &OffsetIndependentSeries, t: usize, offset: i32, buffer_before: f64) -> Transition {
    let d = series.net_demand_kw[t];
    let step_hours = input.step_hours;

    if d < 0.0 {
        let buffer_after = buffer_before + (-d) * step_hours;
        return Transition {
            buffer_after,
            electrical_draw_kwh: 0.0,
            cost: 0.0,
        };
    }

    let delta_b = offset as f64 * d * input.storage_efficiency_eta * step_hours;
    let debt_draw = if delta_b < 0.0 { -delta_b } else { 0.0 };
    let q_hp = (d * step_hours - debt_draw).max(0.0);

    let supply_temp = input.base_supply_temp[t] + offset as f64;
    let cop_value = cop(&input.cop, input.outdoor_temp[t], supply_temp, series.humidity_pct[t]);
    let electrical_draw_kwh = q_hp / cop_value;

    let net_balance = net_balance_kw(input.baseline_load[t], electrical_draw_kwh, step_hours, series.pv_kw[t]);
    let price_production = input.price_production.as_ref().map(|s| s[t]);
    let price = select_price(net_balance, input.price_consumption[t], price_production);

    Transition {
        buffer_after: buffer_before + delta_b,
        electrical_draw_kwh,
        cost: electrical_draw_kwh * price,
    }
}

#[derive(Clone, Copy)]
struct DpEntry {
    cost_so_far: f64,
    prev_offset: i32,
    prev_cum: i32,
    buffer_after_step: f64,
}

/// Forward tabular DP over `(offset, cumulative_offset_sum)`. The buffer is
/// tracked exactly (not discretized) inside each entry.
///
/// Layers are `BTreeMap`s, not `HashMap`s: both the outer reconstruction and
/// the inner per-key tie-break below must see predecessors in a fixed,
/// input-derived order, never `HashMap`'s per-process `RandomState` order,
/// or the Determinism law (§8) would only hold by accident.
pub fn search(input: &PlannerInput, cancellation: &dyn PlanCancellation) -> PlanSearchOutcome {
    let series = precompute(input);
    let admissible = globally_admissible_offsets(input);
    if admissible.is_empty() {
        return PlanSearchOutcome::Infeasible;
    }

    let mut layers: Vec<BTreeMap<(i32, i32), DpEntry>> = Vec::with_capacity(input.horizon_steps);
    let mut seed = BTreeMap::new();
    seed.insert(
        (input.initial_offset, input.initial_offset),
        DpEntry {
            cost_so_far: 0.0,
            prev_offset: input.initial_offset,
            prev_cum: input.initial_offset,
            buffer_after_step: input.initial_buffer_kwh,
        },
    );
    layers.push(seed);

    for t in 1..input.horizon_steps {
        if cancellation.is_cancelled() {
            return PlanSearchOutcome::Cancelled;
        }

        let mut layer: BTreeMap<(i32, i32), DpEntry> = BTreeMap::new();
        let prev_layer = &layers[t - 1];

        for (&(prev_offset, prev_cum), prev_entry) in prev_layer.iter() {
            for candidate in [prev_offset - 1, prev_offset, prev_offset + 1] {
                if candidate < input.offset_min || candidate > input.offset_max {
                    continue;
                }
                if !admissible.contains(&candidate) {
                    continue;
                }
                if !supply_temp_admissible(input.base_supply_temp[t], candidate, input.water_min, input.water_max) {
                    continue;
                }

                let result = transition(input, &series, t, candidate, prev_entry.buffer_after_step);
                if !result.buffer_after.is_finite() || !result.cost.is_finite() {
                    continue;
                }
                if result.buffer_after < -input.max_buffer_debt_kwh {
                    continue;
                }

                let new_cum = prev_cum + candidate;
                let new_cost = prev_entry.cost_so_far + result.cost;
                let key = (candidate, new_cum);

                let better = match layer.get(&key) {
                    None => true,
                    Some(existing) => {
                        new_cost < existing.cost_so_far
                            || (new_cost == existing.cost_so_far
                                && (candidate - prev_offset).abs()
                                    < (existing.prev_offset - candidate).abs())
                    }
                };
                if better {
                    layer.insert(
                        key,
                        DpEntry {
                            cost_so_far: new_cost,
                            prev_offset,
                            prev_cum,
                            buffer_after_step: result.buffer_after,
                        },
                    );
                }
            }
        }

        if layer.is_empty() {
            return PlanSearchOutcome::Infeasible;
        }
        layers.push(layer);
    }

    let last_layer = layers.last().unwrap();
    let best_key = last_layer
        .iter()
        .map(|(&(offset, cum), entry)| {
            let terminal_cost = entry.cost_so_far + input.terminal_penalty_lambda * entry.buffer_after_step.abs();
            // Tie-break per §4.7: (a) smaller |o'|, then (c) smaller cum_offset_sum.
            // (b) smaller |Δ offset| is already resolved per key when layers are
            // built below, since two histories colliding on the same (offset, cum)
            // key are deduped there; cum must stay signed here, not |cum| — two
            // mirrored paths with cum = +k and cum = -k are not the same tie.
            (terminal_cost, offset.abs(), cum, (offset, cum))
        })
        .min_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap()
                .then(a.1.cmp(&b.1))
                .then(a.2.cmp(&b.2))
        })
        .map(|(_, _, _, key)| key);

    let Some(mut key) = best_key else {
        return PlanSearchOutcome::Infeasible;
    };

    let mut offsets = vec![0i32; input.horizon_steps];
    for t in (1..input.horizon_steps).rev() {
        let entry = layers[t][&key];
        offsets[t] = key.0;
        key = (entry.prev_offset, entry.prev_cum);
    }
    offsets[0] = input.initial_offset;

    PlanSearchOutcome::Found(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cop::CopParams;
    use crate::error::NeverCancelled;
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
            outdoor_temp: flat(5.0),
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
    fn finds_a_path_for_a_simple_demand_profile() {
        let mut input = base_input(6);
        input.outdoor_temp = ForecastSeries::new(vec![0.0; 6]);
        match search(&input, &NeverCancelled) {
            PlanSearchOutcome::Found(offsets) => {
                assert_eq!(offsets.len(), 6);
                assert_eq!(offsets[0], input.initial_offset);
                for window in offsets.windows(2) {
                    assert!((window[1] - window[0]).abs() <= input.offset_step_max);
                }
            }
            _ => panic!("expected a feasible plan"),
        }
    }

    #[test]
    fn respects_bound_pre_filter_when_base_supply_is_high() {
        let mut input = base_input(6);
        input.base_supply_temp = ForecastSeries::new(vec![48.0; 6]);
        input.outdoor_temp = ForecastSeries::new(vec![0.0; 6]);
        let admissible = globally_admissible_offsets(&input);
        assert!(!admissible.contains(&3));
        assert!(!admissible.contains(&4));

        if let PlanSearchOutcome::Found(offsets) = search(&input, &NeverCancelled) {
            assert!(offsets.iter().all(|&o| o <= 2));
        }
    }

    #[test]
    fn infeasible_when_no_offset_is_admissible() {
        let mut input = base_input(3);
        input.base_supply_temp = ForecastSeries::new(vec![1000.0; 3]);
        input.water_min = 25.0;
        input.water_max = 50.0;
        assert!(matches!(search(&input, &NeverCancelled), PlanSearchOutcome::Infeasible));
    }

    #[test]
    fn cancellation_is_honored_between_steps() {
        struct AlwaysCancelled;
        impl PlanCancellation for AlwaysCancelled {
            fn is_cancelled(&self) -> bool {
                true
            }
        }
        let input = base_input(6);
        assert!(matches!(search(&input, &AlwaysCancelled), PlanSearchOutcome::Cancelled));
    }
}
