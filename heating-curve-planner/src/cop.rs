use serde::{Deserialize, Serialize};

/// Parameters of the heat-pump coefficient-of-performance model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopParams {
    pub cop_base: f64,
    pub outdoor_coeff_alpha: f64,
    pub k_factor: f64,
    pub cop_compensation_f: f64,
    pub cop_floor: f64,
}

impl Default for CopParams {
    fn default() -> Self {
        Self {
            cop_base: 4.0,
            outdoor_coeff_alpha: 0.04,
            k_factor: 0.03,
            cop_compensation_f: 0.92,
            cop_floor: 0.5,
        }
    }
}

const DEFROST_T_ANCHORS: [f64; 6] = [-10.0, -7.0, 0.0, 3.0, 5.0, 6.0];
const DEFROST_D_AT_RH70: [f64; 6] = [1.00, 0.92, 0.80, 0.75, 0.90, 1.00];
const DEFROST_D_AT_RH100: [f64; 6] = [1.00, 0.88, 0.70, 0.60, 0.80, 1.00];

fn interpolate_table(t_out: f64, anchors: &[f64], table: &[f64]) -> f64 {
    if t_out <= anchors[0] {
        return table[0];
    }
    if t_out >= anchors[anchors.len() - 1] {
        return table[table.len() - 1];
    }
    for i in 0..anchors.len() - 1 {
        let (t0, t1) = (anchors[i], anchors[i + 1]);
        if t_out >= t0 && t_out <= t1 {
            let frac = (t_out - t0) / (t1 - t0);
            return table[i] + frac * (table[i + 1] - table[i]);
        }
    }
    unreachable!("t_out bracketed by clamps above")
}

/// Defrost derating of COP, bilinearly interpolated over outdoor temperature
/// and relative humidity. Relative humidity is clamped to `[70, 100]` before
/// interpolation; the table does not extend, or extrapolate, below 70%.
pub fn defrost_multiplier(t_outdoor_c: f64, relative_humidity_pct: f64) -> f64 {
    let rh = relative_humidity_pct.clamp(70.0, 100.0);
    let d_at_70 = interpolate_table(t_outdoor_c, &DEFROST_T_ANCHORS, &DEFROST_D_AT_RH70);
    let d_at_100 = interpolate_table(t_outdoor_c, &DEFROST_T_ANCHORS, &DEFROST_D_AT_RH100);
    let frac_rh = (rh - 70.0) / 30.0;
    d_at_70 + frac_rh * (d_at_100 - d_at_70)
}

/// Coefficient of performance at a given outdoor temperature and chosen
/// supply-water temperature, floored at `cop_floor`.
pub fn cop(params: &CopParams, t_outdoor_c: f64, supply_temp_c: f64, relative_humidity_pct: f64) -> f64 {
    let raw = (params.cop_base + params.outdoor_coeff_alpha * t_outdoor_c
        - params.k_factor * (supply_temp_c - 35.0))
        * params.cop_compensation_f;
    let derated = raw * defrost_multiplier(t_outdoor_c, relative_humidity_pct);
    derated.max(params.cop_floor)
}
