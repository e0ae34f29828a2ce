use heating_curve_model::{ForecastSeries, Orientation, orientation_factor};
use serde::{Deserialize, Serialize};

/// Installed PV capacity by orientation, used as a production forecast
/// fallback when no external PV sensor provides one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PvConfig {
    pub wp_east: f64,
    pub wp_south: f64,
    pub wp_west: f64,
    pub tilt_deg: f64,
}

impl PvConfig {
    /// Tilt derating relative to the ideal ~35° tilt for this latitude band.
    pub fn eta_tilt(&self) -> f64 {
        (1.0 - 0.002 * (self.tilt_deg - 35.0).abs()).clamp(0.7, 1.0)
    }
}

/// Expected PV output at a single step, kW.
pub fn pv_production_kw(pv: &PvConfig, radiation_w_m2: f64, hour_of_day: f64) -> f64 {
    let weighted_wp = pv.wp_east * orientation_factor(Orientation::East, hour_of_day)
        + pv.wp_south * orientation_factor(Orientation::South, hour_of_day)
        + pv.wp_west * orientation_factor(Orientation::West, hour_of_day);
    radiation_w_m2 * weighted_wp * pv.eta_tilt() / 1_000_000.0
}

/// PV production over the whole horizon, kW per step.
pub fn pv_production_series(
    pv: &PvConfig,
    radiation: &ForecastSeries,
    start_hour_of_day: f64,
    step_hours: f64,
) -> Vec<f64> {
    radiation
        .iter()
        .enumerate()
        .map(|(t, &irradiance)| {
            let hour = start_hour_of_day + t as f64 * step_hours;
            pv_production_kw(pv, irradiance, hour)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_production_at_night() {
        let pv = PvConfig {
            wp_east: 1000.0,
            wp_south: 3000.0,
            wp_west: 1000.0,
            tilt_deg: 35.0,
        };
        assert_eq!(pv_production_kw(&pv, 0.0, 1.0), 0.0);
    }

    #[test]
    fn production_positive_at_midday_with_radiation() {
        let pv = PvConfig {
            wp_east: 1000.0,
            wp_south: 3000.0,
            wp_west: 1000.0,
            tilt_deg: 35.0,
        };
        assert!(pv_production_kw(&pv, 600.0, 13.0) > 0.0);
    }

    #[test]
    fn tilt_penalty_bounded() {
        let steep = PvConfig { wp_east: 0.0, wp_south: 1000.0, wp_west: 0.0, tilt_deg: 90.0 };
        let flat = PvConfig { wp_east: 0.0, wp_south: 1000.0, wp_west: 0.0, tilt_deg: 0.0 };
        assert!(steep.eta_tilt() < 1.0);
        assert!(flat.eta_tilt() < 1.0);
        assert!(steep.eta_tilt() >= 0.7 && flat.eta_tilt() >= 0.7);
    }
}
