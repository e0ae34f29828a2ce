use serde::{Deserialize, Serialize};

/// Energy performance label, mapped to a fixed envelope U-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyLabel {
    APlusPlusPlus,
    APlusPlus,
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyLabel {
    /// Envelope U-value in W/(m²·K).
    pub fn u_value(&self) -> f64 {
        match self {
            EnergyLabel::APlusPlusPlus => 0.18,
            EnergyLabel::APlusPlus => 0.25,
            EnergyLabel::APlus => 0.35,
            EnergyLabel::A => 0.45,
            EnergyLabel::B => 0.60,
            EnergyLabel::C => 0.80,
            EnergyLabel::D => 1.00,
            EnergyLabel::E => 1.40,
            EnergyLabel::F => 1.80,
            EnergyLabel::G => 2.50,
        }
    }
}

/// Ventilation system type, mapped to a fixed ventilation heat-loss coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VentilationType {
    /// Infiltration only, no mechanical extraction.
    Natural,
    /// Extract-only mechanical ventilation.
    MechanicalExhaust,
    /// Supply and extract, no heat recovery.
    Balanced,
    /// Supply and extract with heat recovery.
    BalancedWithHeatRecovery,
}

impl VentilationType {
    /// Ventilation heat-loss coefficient in W/(m²·K) per metre of ceiling height.
    pub fn c_vent(&self) -> f64 {
        match self {
            VentilationType::Natural => 0.34,
            VentilationType::MechanicalExhaust => 0.28,
            VentilationType::Balanced => 0.20,
            VentilationType::BalancedWithHeatRecovery => 0.12,
        }
    }
}

/// Closed description of a building's thermal envelope, sufficient to derive
/// a heat transfer coefficient without any time-series data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingEnvelope {
    pub area_m2: f64,
    pub ceiling_height_m: f64,
    pub energy_label: EnergyLabel,
    pub ventilation_type: VentilationType,
}

impl BuildingEnvelope {
    pub fn new(
        area_m2: f64,
        ceiling_height_m: f64,
        energy_label: EnergyLabel,
        ventilation_type: VentilationType,
    ) -> Self {
        Self {
            area_m2,
            ceiling_height_m,
            energy_label,
            ventilation_type,
        }
    }

    /// Heat transfer coefficient, W/K, combining envelope transmission and ventilation losses.
    pub fn htc_w_per_k(&self) -> f64 {
        self.energy_label.u_value() * self.area_m2
            + self.ventilation_type.c_vent() * self.area_m2 * self.ceiling_height_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u_value_table_matches_fixed_spec() {
        assert_eq!(EnergyLabel::APlusPlusPlus.u_value(), 0.18);
        assert_eq!(EnergyLabel::G.u_value(), 2.50);
    }

    #[test]
    fn htc_increases_with_worse_label() {
        let good = BuildingEnvelope::new(100.0, 2.5, EnergyLabel::APlus, VentilationType::Balanced);
        let bad = BuildingEnvelope::new(100.0, 2.5, EnergyLabel::G, VentilationType::Natural);
        assert!(bad.htc_w_per_k() > good.htc_w_per_k());
    }

    #[test]
    fn htc_is_positive_for_any_label() {
        for label in [
            EnergyLabel::APlusPlusPlus,
            EnergyLabel::A,
            EnergyLabel::D,
            EnergyLabel::G,
        ] {
            let envelope = BuildingEnvelope::new(80.0, 2.6, label, VentilationType::Natural);
            assert!(envelope.htc_w_per_k() > 0.0);
        }
    }
}
