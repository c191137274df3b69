//! Runtime settings for report delivery.
//!
//! Settings are layered: built-in defaults, then an optional settings file,
//! then `LAUNCH_WEATHER__*` environment variables. Command line overrides are
//! applied by the caller afterwards.

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_EMAIL_BODY, DEFAULT_EMAIL_SUBJECT, DEFAULT_REPORT_FILE, DEFAULT_SMTP_HOST,
    DEFAULT_SMTP_PORT, ENV_PREFIX, ENV_SEPARATOR,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct SmtpSettings {
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct ReportSettings {
    #[validate(length(min = 1))]
    pub file_name: String,

    #[validate(length(min = 1))]
    pub subject: String,

    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub smtp: SmtpSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("smtp.host", DEFAULT_SMTP_HOST)?
            .set_default("smtp.port", DEFAULT_SMTP_PORT as i64)?
            .set_default("report.file_name", DEFAULT_REPORT_FILE)?
            .set_default("report.subject", DEFAULT_EMAIL_SUBJECT)?
            .set_default("report.body", DEFAULT_EMAIL_BODY)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.smtp.validate()?;
        self.report.validate()?;
        Ok(())
    }

    pub fn with_smtp_host(mut self, host: Option<String>) -> Self {
        if let Some(host) = host {
            self.smtp.host = host;
        }
        self
    }

    pub fn with_smtp_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.smtp.port = port;
        }
        self
    }

    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(&self.report.file_name)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            smtp: SmtpSettings {
                host: DEFAULT_SMTP_HOST.to_string(),
                port: DEFAULT_SMTP_PORT,
            },
            report: ReportSettings {
                file_name: DEFAULT_REPORT_FILE.to_string(),
                subject: DEFAULT_EMAIL_SUBJECT.to_string(),
                body: DEFAULT_EMAIL_BODY.to_string(),
            },
        }
    }
}
