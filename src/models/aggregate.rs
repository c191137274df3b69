use crate::error::{ProcessingError, Result};

/// Average, extremes and median of one measured field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub median: f64,
}

impl FieldSummary {
    pub fn new(average: f64, max: f64, min: f64, median: f64) -> Self {
        Self {
            average,
            max,
            min,
            median,
        }
    }

    /// Values in report column order: average, max, min, median.
    pub fn values(&self) -> [f64; 4] {
        [self.average, self.max, self.min, self.median]
    }

    fn validate_relationships(&self, field: &str) -> Result<()> {
        // Mean of many floats can drift past an extreme by rounding
        let tolerance = 1e-9 * self.max.abs().max(self.min.abs()).max(1.0);

        // Negated so NaN fails too
        if !(self.min <= self.median && self.median <= self.max) {
            return Err(ProcessingError::SummaryValidation {
                message: format!(
                    "{} median {} is outside [{}, {}]",
                    field, self.median, self.min, self.max
                ),
            });
        }

        if !(self.average >= self.min - tolerance && self.average <= self.max + tolerance) {
            return Err(ProcessingError::SummaryValidation {
                message: format!(
                    "{} average {} is outside [{}, {}]",
                    field, self.average, self.min, self.max
                ),
            });
        }

        Ok(())
    }
}

/// Summary row for a set of launch-suitable observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherAggregate {
    pub temperature: FieldSummary,
    pub wind_speed: FieldSummary,
    pub humidity: FieldSummary,
}

impl WeatherAggregate {
    pub fn new(temperature: FieldSummary, wind_speed: FieldSummary, humidity: FieldSummary) -> Self {
        Self {
            temperature,
            wind_speed,
            humidity,
        }
    }

    /// The 12 report values, matching `REPORT_COLUMNS`.
    pub fn to_row(&self) -> [f64; 12] {
        let mut row = [0.0; 12];
        row[0..4].copy_from_slice(&self.temperature.values());
        row[4..8].copy_from_slice(&self.wind_speed.values());
        row[8..12].copy_from_slice(&self.humidity.values());
        row
    }

    pub fn validate_relationships(&self) -> Result<()> {
        self.temperature.validate_relationships("temperature")?;
        self.wind_speed.validate_relationships("wind speed")?;
        self.humidity.validate_relationships("humidity")?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Launch Weather Summary ===\n");
        for (name, field) in [
            ("Temperature", &self.temperature),
            ("Wind speed", &self.wind_speed),
            ("Humidity", &self.humidity),
        ] {
            summary.push_str(&format!(
                "{:<12} avg={:.2} min={} max={} median={}\n",
                name, field.average, field.min, field.max, field.median
            ));
        }

        summary
    }
}
