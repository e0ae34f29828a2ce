pub mod building;
pub mod forecast;
pub mod orientation;

pub use building::envelope::{BuildingEnvelope, EnergyLabel, VentilationType};
pub use forecast::ForecastSeries;
pub use orientation::{Orientation, orientation_factor};
