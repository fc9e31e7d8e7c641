use std::process;

use clap::Parser;
use tracing::info;

use mailblast::cli::CliOptions;
use mailblast::config::SmtpConfig;
use mailblast::error::BlastError;
use mailblast::logging::init_console_tracing;
use mailblast::mailer::{self, Blast};
use mailblast::recipients::RecipientList;
use mailblast::template::{MailTemplate, TemplatePair};

fn main() {
    dotenvy::dotenv().ok();
    init_console_tracing();

    let opts = CliOptions::parse();

    if let Err(err) = run(&opts) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(opts: &CliOptions) -> Result<(), BlastError> {
    // SMTP settings first: a broken environment must fail before any file I/O.
    let config = SmtpConfig::from_env()?;

    let pair = TemplatePair::load(&opts.templates_dir, &opts.template)?;
    let template = MailTemplate::compile(&pair)?;

    let recipients = RecipientList::from_path(&opts.csv)?;
    let email_column = match &opts.email_column {
        Some(column) => column.clone(),
        None => recipients
            .detect_email_column()
            .ok_or(BlastError::NoEmailColumn)?
            .to_string(),
    };

    let from = mailer::sender_mailbox(&config.mail_from, &opts.mail_from_name)?;

    info!("{}: {} data rows", opts.csv.display(), recipients.rows.len());
    info!("using email template: {}", opts.template);
    info!("email subject: {}", opts.subject);
    info!("send email from: {from}");
    match &opts.dry_run {
        Some(addr) => info!("DRY RUN emails to: {addr}"),
        None => info!("send email to column: {email_column}"),
    }

    // Opened once, reused for every row; auth failures abort before any send.
    let transport = mailer::connect(&config)?;

    let blast = Blast {
        template: &template,
        from,
        subject: &opts.subject,
        email_column: &email_column,
        dry_run: opts.dry_run.as_deref(),
        strict: opts.strict,
    };
    let summary = blast.run(&transport, &recipients.rows)?;

    info!("done: {} sent, {} skipped", summary.sent, summary.skipped);
    Ok(())
}
