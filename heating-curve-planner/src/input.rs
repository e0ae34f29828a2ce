use heating_curve_model::{BuildingEnvelope, ForecastSeries};
use serde::{Deserialize, Serialize};

use crate::cop::CopParams;
use crate::error::ConfigError;
use crate::pv::PvConfig;
use crate::solar_gain::GlazingConfig;

/// Ambient relative humidity input to the defrost model: either a single
/// value held constant across the horizon, or a per-step forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Humidity {
    Constant(f64),
    Series(ForecastSeries),
}

impl Humidity {
    pub fn at(&self, step: usize) -> f64 {
        match self {
            Humidity::Constant(value) => *value,
            Humidity::Series(series) => series.get(step).unwrap_or(80.0),
        }
    }
}

impl Default for Humidity {
    fn default() -> Self {
        Humidity::Constant(80.0)
    }
}

/// Immutable record of everything the planner needs for one planning run.
/// Build the struct literal, then call [`PlannerInput::validated`], which
/// rejects malformed records before any planning code runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerInput {
    pub horizon_steps: usize,
    pub step_hours: f64,

    pub base_supply_temp: ForecastSeries,
    pub outdoor_temp: ForecastSeries,
    pub radiation: ForecastSeries,
    pub humidity: Humidity,
    pub price_consumption: ForecastSeries,
    pub price_production: Option<ForecastSeries>,
    pub baseline_load: ForecastSeries,
    pub pv_production: Option<ForecastSeries>,

    pub envelope: BuildingEnvelope,
    pub indoor_temp_c: f64,
    pub glazing: GlazingConfig,
    pub pv: PvConfig,
    pub start_hour_of_day: f64,

    pub water_min: f64,
    pub water_max: f64,
    pub offset_min: i32,
    pub offset_max: i32,
    pub offset_step_max: i32,

    pub cop: CopParams,
    pub storage_efficiency_eta: f64,
    pub max_buffer_debt_kwh: f64,
    pub terminal_penalty_lambda: f64,

    pub initial_offset: i32,
    pub initial_buffer_kwh: f64,
}

impl PlannerInput {
    /// Validates `self` against every constraint in the data model and
    /// returns it unchanged if it passes, or the first violation found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.horizon_steps < 1 || self.horizon_steps > 96 {
            return Err(ConfigError::InvalidHorizon(self.horizon_steps));
        }
        if !(self.step_hours > 0.0 && self.step_hours <= 2.0) {
            return Err(ConfigError::InvalidStepHours(self.step_hours));
        }

        self.check_series_length("base_supply_temp", self.base_supply_temp.len())?;
        self.check_series_length("outdoor_temp", self.outdoor_temp.len())?;
        self.check_series_length("radiation", self.radiation.len())?;
        self.check_series_length("price_consumption", self.price_consumption.len())?;
        self.check_series_length("baseline_load", self.baseline_load.len())?;
        if let Some(ref series) = self.price_production {
            self.check_series_length("price_production", series.len())?;
        }
        if let Some(ref series) = self.pv_production {
            self.check_series_length("pv_production", series.len())?;
        }
        if let Humidity::Series(ref series) = self.humidity {
            self.check_series_length("humidity", series.len())?;
        }

        if self.water_min >= self.water_max {
            return Err(ConfigError::InvalidWaterBounds {
                water_min: self.water_min,
                water_max: self.water_max,
            });
        }
        if self.offset_min >= self.offset_max {
            return Err(ConfigError::InvalidOffsetBounds {
                offset_min: self.offset_min,
                offset_max: self.offset_max,
            });
        }
        if self.offset_step_max < 1 {
            return Err(ConfigError::InvalidOffsetStep(self.offset_step_max));
        }
        if self.initial_offset < self.offset_min || self.initial_offset > self.offset_max {
            return Err(ConfigError::InitialOffsetOutOfRange {
                initial_offset: self.initial_offset,
                offset_min: self.offset_min,
                offset_max: self.offset_max,
            });
        }
        if !(self.storage_efficiency_eta > 0.0 && self.storage_efficiency_eta <= 1.0) {
            return Err(ConfigError::InvalidStorageEfficiency(self.storage_efficiency_eta));
        }
        if self.max_buffer_debt_kwh < 0.0 {
            return Err(ConfigError::InvalidMaxDebt(self.max_buffer_debt_kwh));
        }
        if self.terminal_penalty_lambda < 0.0 {
            return Err(ConfigError::InvalidTerminalPenalty(self.terminal_penalty_lambda));
        }
        if self.initial_buffer_kwh < -self.max_buffer_debt_kwh {
            return Err(ConfigError::InitialBufferBelowDebtCap {
                initial_buffer_kwh: self.initial_buffer_kwh,
                max_buffer_debt_kwh: self.max_buffer_debt_kwh,
            });
        }

        Ok(self)
    }

    fn check_series_length(&self, name: &'static str, got: usize) -> Result<(), ConfigError> {
        if got != self.horizon_steps {
            return Err(ConfigError::SeriesLengthMismatch {
                name,
                got,
                expected: self.horizon_steps,
            });
        }
        Ok(())
    }
}
