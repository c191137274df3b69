use crate::error::Result;
use crate::models::WeatherAggregate;
use crate::utils::constants::REPORT_COLUMNS;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Writes the one-row summary report as comma-separated text.
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the report to a file, replacing any previous report
    pub fn write_report(&self, aggregate: &WeatherAggregate, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        self.write_to(aggregate, file)?;
        debug!(path = %path.display(), "Wrote weather report");

        Ok(())
    }

    /// Write the header and the single data row
    pub fn write_to<W: Write>(&self, aggregate: &WeatherAggregate, output: W) -> Result<()> {
        let mut writer = WriterBuilder::new().delimiter(b',').from_writer(output);

        writer.write_record(REPORT_COLUMNS)?;
        writer.write_record(aggregate.to_row().iter().map(|v| v.to_string()))?;
        writer.flush()?;

        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
