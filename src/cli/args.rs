use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "launch-weather")]
#[command(about = "Find launch-suitable weather in daily observations and email a summary report")]
#[command(version)]
pub struct Cli {
    #[arg(value_name = "FILE_NAME", help = "Input CSV file of daily weather observations")]
    pub input_file: PathBuf,

    #[arg(value_name = "SENDER_EMAIL", help = "Address the report is sent from")]
    pub sender_email: String,

    #[arg(value_name = "PASSWORD", help = "SMTP password for the sender address")]
    pub password: String,

    #[arg(value_name = "RECEIVER_EMAIL", help = "Address the report is sent to")]
    pub receiver_email: String,

    #[arg(
        short,
        long,
        help = "Report file path [default: WeatherReport.csv]"
    )]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "SMTP relay host [default: smtp.gmail.com]")]
    pub smtp_host: Option<String>,

    #[arg(long, help = "SMTP relay port [default: 587]")]
    pub smtp_port: Option<u16>,

    #[arg(long, default_value = "false", help = "Write the report without emailing it")]
    pub no_email: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Hide the progress spinner")]
    pub quiet: bool,
}
