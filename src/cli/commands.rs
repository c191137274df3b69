use crate::cli::args::Cli;
use crate::error::Result;
use crate::mailer::SmtpMailer;
use crate::pipeline::{PipelineOutcome, Recipients, ReportPipeline};
use crate::settings::Settings;
use crate::utils::progress::StageProgress;
use std::process::ExitCode;
use tracing::debug;

pub fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::load(cli.config.as_deref())?
        .with_smtp_host(cli.smtp_host.clone())
        .with_smtp_port(cli.smtp_port);
    settings.validate()?;
    debug!(smtp = ?settings.smtp, "Loaded settings");

    let report_path = cli.output.clone().unwrap_or_else(|| settings.report_path());
    let recipients = Recipients {
        sender: cli.sender_email.clone(),
        receiver: cli.receiver_email.clone(),
    };

    let mailer = SmtpMailer::new(settings.smtp.clone(), &cli.sender_email, &cli.password);
    let mut pipeline = ReportPipeline::new(&settings)
        .with_report_path(report_path)
        .with_progress(StageProgress::new(cli.quiet));
    if !cli.no_email {
        pipeline = pipeline.with_sender(&mailer);
    }

    let outcome = pipeline.run(&cli.input_file, &recipients);

    if cli.verbose {
        print_details(&outcome);
    }
    for message in outcome.messages() {
        println!("{}", message);
    }

    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_details(outcome: &PipelineOutcome) {
    match outcome {
        PipelineOutcome::NoSuitableObservations(report) => {
            println!("\n{}", report.summary());
        }
        _ => {
            if let Some(summary) = outcome.summary() {
                println!("\n{}", summary.filter_report.summary());
                println!("{}", summary.aggregate.summary());
            }
        }
    }
}
