use heating_curve_model::ForecastSeries;

/// Instantaneous building heat loss in kW, never negative.
pub fn heat_loss_kw(htc_w_per_k: f64, indoor_temp_c: f64, outdoor_temp_c: f64) -> f64 {
    let delta = (indoor_temp_c - outdoor_temp_c).max(0.0);
    htc_w_per_k * delta / 1000.0
}

/// Heat loss over the whole horizon, kW per step.
pub fn heat_loss_series(
    htc_w_per_k: f64,
    indoor_temp_c: f64,
    outdoor_temp: &ForecastSeries,
) -> Vec<f64> {
    outdoor_temp
        .iter()
        .map(|&t_out| heat_loss_kw(htc_w_per_k, indoor_temp_c, t_out))
        .collect()
}
