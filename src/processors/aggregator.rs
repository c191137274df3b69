use crate::error::{ProcessingError, Result};
use crate::models::{FieldSummary, WeatherAggregate, WeatherObservation};

/// Computes summary statistics over launch-suitable observations.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarise temperature, wind speed and humidity.
    ///
    /// Fails with [`ProcessingError::EmptyInput`] when there is nothing to
    /// summarise.
    pub fn aggregate(&self, observations: &[WeatherObservation]) -> Result<WeatherAggregate> {
        if observations.is_empty() {
            return Err(ProcessingError::EmptyInput);
        }

        let temperature = summarize(observations.iter().map(|o| o.temperature))?;
        let wind_speed = summarize(observations.iter().map(|o| o.wind_speed))?;
        let humidity = summarize(observations.iter().map(|o| o.humidity))?;

        let aggregate = WeatherAggregate::new(temperature, wind_speed, humidity);
        aggregate.validate_relationships()?;
        Ok(aggregate)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean, max, min and median of a series of values
pub fn summarize(values: impl IntoIterator<Item = f64>) -> Result<FieldSummary> {
    let mut sorted: Vec<f64> = values.into_iter().collect();
    if sorted.is_empty() {
        return Err(ProcessingError::EmptyInput);
    }

    let count = sorted.len() as f64;
    let sum: f64 = sorted.iter().sum();
    let mean = if sum.is_finite() {
        sum / count
    } else {
        // Sum overflowed; scale each value first
        sorted.iter().map(|v| v / count).sum()
    };

    sorted.sort_by(f64::total_cmp);
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    // Rounding in the sum can push the mean of near-equal values just past an extreme
    let average = mean.max(min).min(max);

    Ok(FieldSummary::new(average, max, min, median_of_sorted(&sorted)))
}

/// Median of values; sorts a copy and leaves the input untouched
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(ProcessingError::EmptyInput);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(median_of_sorted(&sorted))
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let count = sorted.len();
    if count % 2 == 0 {
        let (low, high) = (sorted[count / 2 - 1], sorted[count / 2]);
        let midpoint = (low + high) / 2.0;
        if midpoint.is_finite() {
            midpoint
        } else {
            low / 2.0 + high / 2.0
        }
    } else {
        sorted[count / 2]
    }
}
