use heating_curve_model::{ForecastSeries, Orientation, orientation_factor};
use serde::{Deserialize, Serialize};

/// Oriented glazing areas and glazing quality used to derive passive solar gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlazingConfig {
    pub area_east_m2: f64,
    pub area_south_m2: f64,
    pub area_west_m2: f64,
    pub u_value: f64,
}

impl GlazingConfig {
    /// Solar-heat-gain coefficient derived from the glazing's U-value band.
    /// Modern low-U glazing trades some solar transmission for insulation,
    /// so `g` decreases mildly as `u_value` improves below the single-pane band.
    pub fn shgc(&self) -> f64 {
        (0.85 - 0.05 * (self.u_value - 1.0)).clamp(0.3, 0.85)
    }
}

/// Passive solar gain through the oriented glazing at a single step, kW.
pub fn solar_gain_kw(glazing: &GlazingConfig, radiation_w_m2: f64, hour_of_day: f64) -> f64 {
    let g = glazing.shgc();
    let weighted_area = glazing.area_east_m2 * orientation_factor(Orientation::East, hour_of_day)
        + glazing.area_south_m2 * orientation_factor(Orientation::South, hour_of_day)
        + glazing.area_west_m2 * orientation_factor(Orientation::West, hour_of_day);
    g * weighted_area * radiation_w_m2 / 1000.0
}

/// Solar gain over the whole horizon, kW per step.
///
/// `start_hour_of_day` anchors step `0` to a clock hour so the orientation
/// factors line up with the radiation forecast; `step_hours` advances the
/// clock by one step per entry.
pub fn solar_gain_series(
    glazing: &GlazingConfig,
    radiation: &ForecastSeries,
    start_hour_of_day: f64,
    step_hours: f64,
) -> Vec<f64> {
    radiation
        .iter()
        .enumerate()
        .map(|(t, &irradiance)| {
            let hour = start_hour_of_day + t as f64 * step_hours;
            solar_gain_kw(glazing, irradiance, hour)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glazing() -> GlazingConfig {
        GlazingConfig {
            area_east_m2: 4.0,
            area_south_m2: 10.0,
            area_west_m2: 4.0,
            u_value: 1.2,
        }
    }

    #[test]
    fn no_gain_without_radiation() {
        assert_eq!(solar_gain_kw(&glazing(), 0.0, 13.0), 0.0);
    }

    #[test]
    fn gain_peaks_when_sun_faces_dominant_glazing() {
        let midday = solar_gain_kw(&glazing(), 500.0, 13.0);
        let midnight = solar_gain_kw(&glazing(), 500.0, 1.0);
        assert!(midday > midnight);
    }

    #[test]
    fn shgc_stays_within_bounds() {
        let low_u = GlazingConfig { u_value: 0.2, ..glazing() };
        let high_u = GlazingConfig { u_value: 6.0, ..glazing() };
        assert!((0.3..=0.85).contains(&low_u.shgc()));
        assert!((0.3..=0.85).contains(&high_u.shgc()));
    }
}
