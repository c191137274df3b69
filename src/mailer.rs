//! Email delivery of the weather report.

use crate::error::{ProcessingError, Result};
use crate::settings::SmtpSettings;
use crate::utils::constants::REPORT_CONTENT_TYPE;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::path::PathBuf;
use tracing::{debug, info};

/// A report email ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
}

impl ReportEmail {
    /// Build the MIME message, reading the attachment from disk
    pub fn to_message(&self) -> Result<Message> {
        let from: Mailbox = self.from.parse()?;
        let to: Mailbox = self.to.parse()?;

        let file_name = self
            .attachment
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Attachment path has no file name: {}",
                    self.attachment.display()
                ))
            })?;
        let content = std::fs::read(&self.attachment)?;
        let content_type = ContentType::parse(REPORT_CONTENT_TYPE)
            .map_err(|e| ProcessingError::InvalidFormat(e.to_string()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.as_str())
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(self.body.clone()),
                    )
                    .singlepart(Attachment::new(file_name).body(content, content_type)),
            )?;

        Ok(message)
    }
}

/// Something that can deliver a report email.
pub trait ReportSender {
    fn send_report(&self, email: &ReportEmail) -> Result<()>;
}

/// Sends reports through an authenticated STARTTLS SMTP relay.
///
/// The connection is only set up when a report is sent.
pub struct SmtpMailer {
    settings: SmtpSettings,
    credentials: Credentials,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings, username: &str, password: &str) -> Self {
        Self {
            settings,
            credentials: Credentials::new(username.to_string(), password.to_string()),
        }
    }

    fn transport(&self) -> Result<SmtpTransport> {
        let transport = SmtpTransport::starttls_relay(&self.settings.host)?
            .port(self.settings.port)
            .credentials(self.credentials.clone())
            .build();

        debug!(host = %self.settings.host, port = self.settings.port, "Configured SMTP transport");
        Ok(transport)
    }
}

impl ReportSender for SmtpMailer {
    fn send_report(&self, email: &ReportEmail) -> Result<()> {
        let message = email.to_message()?;
        let response = self.transport()?.send(&message)?;
        info!(to = %email.to, code = %response.code(), "Report email accepted");
        Ok(())
    }
}
