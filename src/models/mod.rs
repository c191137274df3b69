pub mod aggregate;
pub mod observation;

pub use aggregate::{FieldSummary, WeatherAggregate};
pub use observation::WeatherObservation;
