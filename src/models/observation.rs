use crate::utils::constants::{EXCLUDED_CLOUDS, LIGHTNING_ABSENT};

/// One daily weather observation as read from the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub temperature: f64,
    pub wind_speed: f64,
    /// Percentage, not range checked
    pub humidity: f64,
    /// 0 means no precipitation; the unit of larger values is not defined
    pub precipitation: i32,
    /// "Yes" or "No", compared exactly
    pub lightning: String,
    pub clouds: String,
}

impl WeatherObservation {
    pub fn new(
        temperature: f64,
        wind_speed: f64,
        humidity: f64,
        precipitation: i32,
        lightning: impl Into<String>,
        clouds: impl Into<String>,
    ) -> Self {
        Self {
            temperature,
            wind_speed,
            humidity,
            precipitation,
            lightning: lightning.into(),
            clouds: clouds.into(),
        }
    }

    pub fn has_precipitation(&self) -> bool {
        self.precipitation != 0
    }

    /// Anything other than an exact "No" counts as lightning.
    pub fn has_lightning(&self) -> bool {
        self.lightning != LIGHTNING_ABSENT
    }

    pub fn has_excluded_clouds(&self) -> bool {
        EXCLUDED_CLOUDS.contains(&self.clouds.as_str())
    }
}
