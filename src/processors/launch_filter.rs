use crate::models::WeatherObservation;
use crate::utils::constants::{
    HUMIDITY_LIMIT, MAX_LAUNCH_TEMP, MAX_LAUNCH_WIND_SPEED, MIN_LAUNCH_TEMP, NO_PRECIPITATION,
};
use std::collections::BTreeMap;
use std::fmt;

/// First criterion an observation failed, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectionReason {
    TemperatureOutOfRange,
    WindTooStrong,
    HumidityTooHigh,
    Precipitation,
    Lightning,
    ExcludedClouds,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectionReason::TemperatureOutOfRange => "temperature outside [2, 31]",
            RejectionReason::WindTooStrong => "wind speed above 10",
            RejectionReason::HumidityTooHigh => "humidity 60 or above",
            RejectionReason::Precipitation => "precipitation",
            RejectionReason::Lightning => "lightning",
            RejectionReason::ExcludedClouds => "cumulus or nimbus clouds",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    pub total_records: usize,
    pub accepted_records: usize,
    pub rejections: BTreeMap<RejectionReason, usize>,
}

impl FilterReport {
    pub fn rejected_records(&self) -> usize {
        self.total_records - self.accepted_records
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Launch Filter Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", self.total_records));

        if self.total_records == 0 {
            return summary;
        }

        summary.push_str(&format!(
            "Suitable Records: {} ({:.1}%)\n",
            self.accepted_records,
            100.0 * self.accepted_records as f64 / self.total_records as f64
        ));
        summary.push_str(&format!("Rejected Records: {}\n", self.rejected_records()));

        for (reason, count) in &self.rejections {
            summary.push_str(&format!("  {}: {}\n", reason, count));
        }

        summary
    }
}

/// Selects observations that meet the fixed launch weather criteria.
pub struct LaunchFilter {
    min_temperature: f64,
    max_temperature: f64,
    max_wind_speed: f64,
    humidity_limit: f64,
}

impl LaunchFilter {
    pub fn new() -> Self {
        Self {
            min_temperature: MIN_LAUNCH_TEMP,
            max_temperature: MAX_LAUNCH_TEMP,
            max_wind_speed: MAX_LAUNCH_WIND_SPEED,
            humidity_limit: HUMIDITY_LIMIT,
        }
    }

    /// Check a single observation, returning the first failed criterion
    pub fn rejection_reason(&self, observation: &WeatherObservation) -> Option<RejectionReason> {
        // Written as positive range checks so NaN fails every criterion
        if !(self.min_temperature..=self.max_temperature).contains(&observation.temperature) {
            return Some(RejectionReason::TemperatureOutOfRange);
        }
        if !(observation.wind_speed <= self.max_wind_speed) {
            return Some(RejectionReason::WindTooStrong);
        }
        if !(observation.humidity < self.humidity_limit) {
            return Some(RejectionReason::HumidityTooHigh);
        }
        if observation.precipitation != NO_PRECIPITATION {
            return Some(RejectionReason::Precipitation);
        }
        if observation.has_lightning() {
            return Some(RejectionReason::Lightning);
        }
        if observation.has_excluded_clouds() {
            return Some(RejectionReason::ExcludedClouds);
        }

        None
    }

    pub fn is_suitable(&self, observation: &WeatherObservation) -> bool {
        self.rejection_reason(observation).is_none()
    }

    /// Keep the suitable observations in their original order
    pub fn filter(&self, observations: &[WeatherObservation]) -> Vec<WeatherObservation> {
        observations
            .iter()
            .filter(|o| self.is_suitable(o))
            .cloned()
            .collect()
    }

    /// Filter and count why the other observations were rejected
    pub fn filter_with_report(
        &self,
        observations: &[WeatherObservation],
    ) -> (Vec<WeatherObservation>, FilterReport) {
        let mut report = FilterReport {
            total_records: observations.len(),
            ..FilterReport::default()
        };
        let mut accepted = Vec::new();

        for observation in observations {
            match self.rejection_reason(observation) {
                None => {
                    report.accepted_records += 1;
                    accepted.push(observation.clone());
                }
                Some(reason) => *report.rejections.entry(reason).or_default() += 1,
            }
        }

        (accepted, report)
    }
}

impl Default for LaunchFilter {
    fn default() -> Self {
        Self::new()
    }
}
