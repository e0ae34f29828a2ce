use std::env;

use anyhow::{Context, Result};
use heating_curve_model::{BuildingEnvelope, EnergyLabel, ForecastSeries, VentilationType};
use heating_curve_planner::cop::CopParams;
use heating_curve_planner::pv::PvConfig;
use heating_curve_planner::solar_gain::GlazingConfig;
use heating_curve_planner::{plan, Humidity, NeverCancelled, PlannerInput};

/// Builds a 24-step, hourly demo horizon for a cold winter night followed by
/// a cheap midday price dip, so the planner has something interesting to
/// trade off.
fn demo_input() -> Result<PlannerInput> {
    let horizon = 24;
    let outdoor_temp: Vec<f64> = (0..horizon)
        .map(|h| -4.0 - 3.0 * ((h as f64 - 4.0) / 12.0 * std::f64::consts::PI).cos())
        .collect();
    let radiation: Vec<f64> = (0..horizon)
        .map(|h| if (8..17).contains(&h) { 300.0 * ((h as f64 - 12.0).abs() / 5.0 * -1.0 + 1.0).max(0.0) } else { 0.0 })
        .collect();
    let price_consumption: Vec<f64> = (0..horizon)
        .map(|h| if (11..15).contains(&h) { 0.12 } else { 0.32 })
        .collect();

    PlannerInput {
        horizon_steps: horizon,
        step_hours: 1.0,
        base_supply_temp: ForecastSeries::new(vec![38.0; horizon]),
        outdoor_temp: ForecastSeries::new(outdoor_temp),
        radiation: ForecastSeries::new(radiation),
        humidity: Humidity::Constant(85.0),
        price_consumption: ForecastSeries::new(price_consumption),
        price_production: Some(ForecastSeries::new(vec![0.08; horizon])),
        baseline_load: ForecastSeries::new(vec![0.4; horizon]),
        pv_production: None,
        envelope: BuildingEnvelope::new(140.0, 2.5, EnergyLabel::C, VentilationType::Balanced),
        indoor_temp_c: 20.0,
        glazing: GlazingConfig {
            area_east_m2: 3.0,
            area_south_m2: 9.0,
            area_west_m2: 3.0,
            u_value: 1.1,
        },
        pv: PvConfig { wp_east: 1000.0, wp_south: 3000.0, wp_west: 1000.0, tilt_deg: 35.0 },
        start_hour_of_day: 0.0,
        water_min: 25.0,
        water_max: 50.0,
        offset_min: -4,
        offset_max: 4,
        offset_step_max: 1,
        cop: CopParams::default(),
        storage_efficiency_eta: 0.55,
        max_buffer_debt_kwh: 4.0,
        terminal_penalty_lambda: 0.02,
        initial_offset: 0,
        initial_buffer_kwh: 0.0,
    }
    .validated()
    .context("demo input failed validation")
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let verbose = args.get(1).map(|s| s.as_str()) == Some("--verbose");

    let input = match demo_input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error building demo input: {}", e);
            return;
        }
    };

    println!("Planning heating-curve offsets over {} steps...", input.horizon_steps);
    let output = plan(&input, &NeverCancelled);

    println!("Status: {:?}", output.status);
    println!("Total cost:     {:.3}", output.total_cost);
    println!("Baseline cost:  {:.3}", output.baseline_cost);
    println!("Total savings:  {:.3}", output.total_savings);

    if verbose {
        for (t, offset) in output.offsets.iter().enumerate() {
            println!(
                "  t={:>2}  offset={:>2}  buffer={:>6.2} kWh  cost={:.3}",
                t, offset, output.buffer[t], output.cost_per_step[t]
            );
        }
    }

    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }

    println!("Planning complete!");
}
