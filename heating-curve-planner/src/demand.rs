/// Net heat demand at a step: heat loss minus passive solar gain, kW.
/// May be negative when gain exceeds loss.
pub fn net_heat_demand_kw(heat_loss_kw: f64, solar_gain_kw: f64) -> f64 {
    heat_loss_kw - solar_gain_kw
}

/// Heat-pump electrical draw ignoring any buffer interaction: the simple
/// model used for standalone net-demand reporting and for the baseline-cost
/// comparison (offset held at zero). The DP planner (`planner` module) uses
/// its own buffer-adjusted draw for the actual optimization.
pub fn simple_electrical_draw_kwh(net_demand_kw: f64, step_hours: f64, cop: f64) -> f64 {
    net_demand_kw.max(0.0) * step_hours / cop
}

/// Household net balance at the meter: positive means importing, negative
/// means exporting surplus PV.
pub fn net_balance_kw(baseline_load_kw: f64, heat_pump_draw_kwh: f64, step_hours: f64, pv_kw: f64) -> f64 {
    baseline_load_kw + heat_pump_draw_kwh / step_hours - pv_kw
}

/// Selects the effective per-kWh price for a step: the consumption tariff
/// while importing, the feed-in tariff while net-exporting (falling back to
/// the consumption tariff when no feed-in tariff is configured).
pub fn select_price(net_balance_kw: f64, price_consumption: f64, price_production: Option<f64>) -> f64 {
    if net_balance_kw >= 0.0 {
        price_consumption
    } else {
        price_production.unwrap_or(price_consumption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_demand_can_go_negative_with_strong_gain() {
        assert_eq!(net_heat_demand_kw(2.0, 5.0), -3.0);
    }

    #[test]
    fn simple_draw_is_zero_without_positive_demand() {
        assert_eq!(simple_electrical_draw_kwh(-1.0, 1.0, 3.5), 0.0);
    }

    #[test]
    fn exporting_selects_feed_in_tariff() {
        let price = select_price(-0.5, 0.30, Some(0.08));
        assert_eq!(price, 0.08);
    }

    #[test]
    fn exporting_without_feed_in_tariff_falls_back_to_consumption() {
        let price = select_price(-0.5, 0.30, None);
        assert_eq!(price, 0.30);
    }

    #[test]
    fn importing_always_uses_consumption_tariff() {
        let price = select_price(0.2, 0.30, Some(0.08));
        assert_eq!(price, 0.30);
    }
}
