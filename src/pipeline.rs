//! Load, filter, aggregate, write and send, one stage after another.
//!
//! Stage failures never escape as errors. [`ReportPipeline::run`] always
//! returns a [`PipelineOutcome`] saying where the run stopped, and the
//! caller decides what to print and which exit status to use.

use crate::error::ProcessingError;
use crate::mailer::{ReportEmail, ReportSender};
use crate::models::WeatherAggregate;
use crate::processors::{Aggregator, FilterReport, LaunchFilter};
use crate::readers::ObservationReader;
use crate::settings::Settings;
use crate::utils::progress::StageProgress;
use crate::writers::ReportWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Addresses for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Recipients {
    pub sender: String,
    pub receiver: String,
}

/// Everything produced once the aggregate exists
#[derive(Debug)]
pub struct RunSummary {
    pub filter_report: FilterReport,
    pub aggregate: WeatherAggregate,
    pub report_path: PathBuf,
    /// Set when the report file could not be written; the run still went on
    pub report_error: Option<ProcessingError>,
}

#[derive(Debug)]
pub enum PipelineOutcome {
    LoadFailed(ProcessingError),
    NoObservations,
    NoSuitableObservations(FilterReport),
    AggregationFailed(ProcessingError),
    /// Email delivery was disabled
    ReportWritten(RunSummary),
    SendFailed {
        summary: RunSummary,
        error: ProcessingError,
    },
    Sent(RunSummary),
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            PipelineOutcome::Sent(_) => true,
            PipelineOutcome::ReportWritten(summary) => summary.report_error.is_none(),
            _ => false,
        }
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            PipelineOutcome::ReportWritten(summary)
            | PipelineOutcome::SendFailed { summary, .. }
            | PipelineOutcome::Sent(summary) => Some(summary),
            _ => None,
        }
    }

    /// User-facing lines for this outcome, in the order the stages ran
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();

        if let Some(err) = self.summary().and_then(|s| s.report_error.as_ref()) {
            messages.push(format!("Failed to generate weather report file. {}", err));
        }

        match self {
            PipelineOutcome::LoadFailed(err) => {
                messages.push(format!("Failed to load weather data from file. {}", err));
            }
            PipelineOutcome::NoObservations => {
                messages.push(
                    "Failed to load weather data from file. The file contains no observations."
                        .to_string(),
                );
            }
            PipelineOutcome::NoSuitableObservations(_) => {
                messages.push("No suitable launch date found in weather data.".to_string());
            }
            PipelineOutcome::AggregationFailed(err) => {
                messages.push(format!("Failed to calculate weather aggregates. {}", err));
            }
            PipelineOutcome::ReportWritten(summary) => {
                if summary.report_error.is_none() {
                    messages.push(format!(
                        "Weather report written to {}",
                        summary.report_path.display()
                    ));
                }
            }
            PipelineOutcome::SendFailed { error, .. } => {
                messages.push(format!("Failed to send weather report email. {}", error));
            }
            PipelineOutcome::Sent(_) => {
                messages.push("Weather report sent successfully!".to_string());
            }
        }

        messages
    }
}

pub struct ReportPipeline<'a> {
    reader: ObservationReader,
    filter: LaunchFilter,
    aggregator: Aggregator,
    writer: ReportWriter,
    report_path: PathBuf,
    subject: String,
    body: String,
    sender: Option<&'a dyn ReportSender>,
    progress: StageProgress,
}

impl<'a> ReportPipeline<'a> {
    /// A pipeline that writes the report but sends nothing until a sender is attached
    pub fn new(settings: &Settings) -> Self {
        Self {
            reader: ObservationReader::new(),
            filter: LaunchFilter::new(),
            aggregator: Aggregator::new(),
            writer: ReportWriter::new(),
            report_path: settings.report_path(),
            subject: settings.report.subject.clone(),
            body: settings.report.body.clone(),
            sender: None,
            progress: StageProgress::silent(),
        }
    }

    pub fn with_report_path(mut self, report_path: PathBuf) -> Self {
        self.report_path = report_path;
        self
    }

    pub fn with_sender(mut self, sender: &'a dyn ReportSender) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_progress(mut self, progress: StageProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    pub fn run(&self, input: &Path, recipients: &Recipients) -> PipelineOutcome {
        let outcome = self.run_stages(input, recipients);
        self.progress.finish();
        outcome
    }

    fn run_stages(&self, input: &Path, recipients: &Recipients) -> PipelineOutcome {
        self.progress.stage("Loading weather data...");
        let observations = match self.reader.read_observations(input) {
            Ok(observations) => observations,
            Err(e) => {
                error!(path = %input.display(), error = %e, "Failed to load observations");
                return PipelineOutcome::LoadFailed(e);
            }
        };
        if observations.is_empty() {
            warn!(path = %input.display(), "Input file contains no observations");
            return PipelineOutcome::NoObservations;
        }
        info!(count = observations.len(), "Loaded observations");

        self.progress.stage("Filtering for launch conditions...");
        let (suitable, filter_report) = self.filter.filter_with_report(&observations);
        debug!("\n{}", filter_report.summary());
        if suitable.is_empty() {
            warn!(total = filter_report.total_records, "No observation meets launch criteria");
            return PipelineOutcome::NoSuitableObservations(filter_report);
        }
        info!(
            suitable = filter_report.accepted_records,
            rejected = filter_report.rejected_records(),
            "Filtered observations"
        );

        self.progress.stage("Calculating aggregates...");
        let aggregate = match self.aggregator.aggregate(&suitable) {
            Ok(aggregate) => aggregate,
            Err(e) => {
                error!(error = %e, "Failed to aggregate observations");
                return PipelineOutcome::AggregationFailed(e);
            }
        };
        debug!("\n{}", aggregate.summary());

        self.progress.stage("Writing weather report...");
        let report_error = match self.writer.write_report(&aggregate, &self.report_path) {
            Ok(()) => {
                info!(path = %self.report_path.display(), "Wrote weather report");
                None
            }
            Err(e) => {
                error!(path = %self.report_path.display(), error = %e, "Failed to write report");
                Some(e)
            }
        };

        let summary = RunSummary {
            filter_report,
            aggregate,
            report_path: self.report_path.clone(),
            report_error,
        };

        let Some(sender) = self.sender else {
            info!("Email delivery disabled");
            return PipelineOutcome::ReportWritten(summary);
        };

        self.progress.stage("Sending weather report email...");
        let email = ReportEmail {
            from: recipients.sender.clone(),
            to: recipients.receiver.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            attachment: self.report_path.clone(),
        };

        match sender.send_report(&email) {
            Ok(()) => {
                info!(to = %recipients.receiver, "Sent weather report");
                PipelineOutcome::Sent(summary)
            }
            Err(error) => {
                error!(to = %recipients.receiver, error = %error, "Failed to send report email");
                PipelineOutcome::SendFailed { summary, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::cell::RefCell;
    use tempfile::TempDir;

    const INPUT: &str = "\
Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds
10,5,40,0,No,Clear
20,8,50,0,No,Clear
25,4,30,0,Yes,Clear
15,3,20,0,No,Cumulus
";

    #[derive(Default)]
    struct RecordingSender {
        sent: RefCell<Vec<ReportEmail>>,
        fail: bool,
    }

    impl ReportSender for RecordingSender {
        fn send_report(&self, email: &ReportEmail) -> Result<()> {
            if self.fail {
                return Err(ProcessingError::InvalidFormat("relay refused".to_string()));
            }
            self.sent.borrow_mut().push(email.clone());
            Ok(())
        }
    }

    fn recipients() -> Recipients {
        Recipients {
            sender: "ops@example.com".to_string(),
            receiver: "director@example.com".to_string(),
        }
    }

    fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("weather.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_successful_run() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, INPUT);
        let report_path = dir.path().join("WeatherReport.csv");
        let sender = RecordingSender::default();

        let outcome = ReportPipeline::new(&Settings::default())
            .with_report_path(report_path.clone())
            .with_sender(&sender)
            .run(&input, &recipients());

        assert!(outcome.is_success());
        assert_eq!(outcome.messages(), vec!["Weather report sent successfully!"]);

        let summary = outcome.summary().unwrap();
        assert_eq!(summary.filter_report.accepted_records, 2);
        assert_eq!(summary.aggregate.temperature.average, 15.0);

        let sent = sender.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].attachment, report_path);
        assert_eq!(sent[0].subject, "Weather Report");
        assert!(report_path.exists());
    }

    #[test]
    fn test_load_failure() {
        let dir = TempDir::new().unwrap();
        let outcome = ReportPipeline::new(&Settings::default())
            .with_report_path(dir.path().join("WeatherReport.csv"))
            .run(&dir.path().join("missing.csv"), &recipients());

        assert!(matches!(outcome, PipelineOutcome::LoadFailed(_)));
        assert!(!outcome.is_success());
        assert!(outcome.messages()[0].starts_with("Failed to load weather data from file."));
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds\n",
        );

        let outcome = ReportPipeline::new(&Settings::default()).run(&input, &recipients());

        assert!(matches!(outcome, PipelineOutcome::NoObservations));
        assert!(outcome.messages()[0].starts_with("Failed to load weather data from file."));
    }

    #[test]
    fn test_nothing_suitable() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds\n40,5,40,0,No,Clear\n",
        );
        let report_path = dir.path().join("WeatherReport.csv");
        let sender = RecordingSender::default();

        let outcome = ReportPipeline::new(&Settings::default())
            .with_report_path(report_path.clone())
            .with_sender(&sender)
            .run(&input, &recipients());

        assert!(matches!(outcome, PipelineOutcome::NoSuitableObservations(_)));
        assert_eq!(
            outcome.messages(),
            vec!["No suitable launch date found in weather data."]
        );
        assert!(!report_path.exists());
        assert!(sender.sent.borrow().is_empty());
    }

    #[test]
    fn test_report_write_failure_still_sends() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, INPUT);
        // A directory where the report file should go makes the write fail
        let report_path = dir.path().join("occupied");
        std::fs::create_dir(&report_path).unwrap();
        let sender = RecordingSender::default();

        let outcome = ReportPipeline::new(&Settings::default())
            .with_report_path(report_path)
            .with_sender(&sender)
            .run(&input, &recipients());

        assert!(matches!(outcome, PipelineOutcome::Sent(_)));
        let messages = outcome.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Failed to generate weather report file."));
        assert_eq!(messages[1], "Weather report sent successfully!");
        assert_eq!(sender.sent.borrow().len(), 1);
    }

    #[test]
    fn test_send_failure_keeps_report() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, INPUT);
        let report_path = dir.path().join("WeatherReport.csv");
        let sender = RecordingSender {
            fail: true,
            ..RecordingSender::default()
        };

        let outcome = ReportPipeline::new(&Settings::default())
            .with_report_path(report_path.clone())
            .with_sender(&sender)
            .run(&input, &recipients());

        assert!(!outcome.is_success());
        assert!(matches!(outcome, PipelineOutcome::SendFailed { .. }));
        let messages = outcome.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Failed to send weather report email."));
        assert!(report_path.exists());
    }

    #[test]
    fn test_without_sender() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, INPUT);
        let report_path = dir.path().join("WeatherReport.csv");

        let pipeline = ReportPipeline::new(&Settings::default()).with_report_path(report_path.clone());
        assert_eq!(pipeline.report_path(), report_path.as_path());

        let outcome = pipeline.run(&input, &recipients());

        assert!(outcome.is_success());
        assert!(matches!(outcome, PipelineOutcome::ReportWritten(_)));
        assert!(outcome.messages()[0].starts_with("Weather report written to"));
    }
}
