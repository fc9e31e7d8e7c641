use std::path::PathBuf;

use clap::Parser;

/// Merge CSV rows into a text/HTML template pair and send the result over SMTP.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CliOptions {
    /// The CSV file containing data for the mail merge
    #[arg(long, value_name = "FILE")]
    pub csv: PathBuf,

    /// Email template to use for the mail merge
    #[arg(long, value_name = "NAME")]
    pub template: String,

    /// Name of the email sender (empty for an address-only From header)
    #[arg(long, value_name = "NAME")]
    pub mail_from_name: String,

    /// Email subject line
    #[arg(long, value_name = "TEXT")]
    pub subject: String,

    /// Send a single message to this address for testing
    #[arg(long, value_name = "EMAIL")]
    pub dry_run: Option<String>,

    /// Column containing recipient addresses
    ///
    /// Defaults to the first header whose name contains "email".
    #[arg(long, value_name = "COLUMN")]
    pub email_column: Option<String>,

    /// Directory holding the <template>.html / <template>.txt pair
    #[arg(long, value_name = "DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Abort the run on the first row that fails instead of skipping it
    #[arg(long)]
    pub strict: bool,
}
