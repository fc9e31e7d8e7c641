use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};
use tracing::{info, instrument, warn};

use crate::config::{SmtpConfig, SmtpSecurity};
use crate::error::BlastError;
use crate::recipients::Row;
use crate::template::{MailTemplate, RenderedMessage};

/// Build the SMTP transport described by the config and verify it.
///
/// The transport is created once and reused for every message in the run;
/// a connection or authentication problem is fatal before any mail is sent.
pub fn connect(config: &SmtpConfig) -> Result<SmtpTransport, BlastError> {
    let creds = Credentials::new(config.user.clone(), config.passwd.clone());

    let builder = match config.security {
        SmtpSecurity::Tls => SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| BlastError::Smtp(e.to_string()))?,
        SmtpSecurity::None => SmtpTransport::builder_dangerous(&config.host),
    };

    let transport = builder.port(config.port).credentials(creds).build();

    match transport.test_connection() {
        Ok(true) => Ok(transport),
        Ok(false) => Err(BlastError::Smtp(format!(
            "{} did not accept the connection",
            config.host
        ))),
        Err(e) => Err(BlastError::Smtp(e.to_string())),
    }
}

/// Sender mailbox with an optional display name, `Name <addr>` style.
pub fn sender_mailbox(mail_from: &str, mail_from_name: &str) -> Result<Mailbox, BlastError> {
    let address: Address = mail_from
        .parse()
        .map_err(|_| BlastError::InvalidAddress(mail_from.to_string()))?;

    let name = if mail_from_name.is_empty() {
        None
    } else {
        Some(mail_from_name.to_string())
    };

    Ok(Mailbox::new(name, address))
}

/// Build the multipart/alternative message for one rendered row.
pub fn build_message(
    rendered: &RenderedMessage,
    from: &Mailbox,
    subject: &str,
) -> Result<Message, BlastError> {
    let to: Mailbox = rendered
        .mail_to
        .parse()
        .map_err(|_| BlastError::InvalidAddress(rendered.mail_to.clone()))?;

    let message = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .multipart(MultiPart::alternative_plain_html(
            rendered.text.clone(),
            rendered.html.clone(),
        ))?;

    Ok(message)
}

/// One mail merge run over a set of rows.
pub struct Blast<'a> {
    pub template: &'a MailTemplate,
    pub from: Mailbox,
    pub subject: &'a str,
    pub email_column: &'a str,
    /// When set, a single test message goes to this address instead of the
    /// real audience.
    pub dry_run: Option<&'a str>,
    /// Abort on the first per-row failure instead of skipping the row.
    pub strict: bool,
}

/// Outcome counts for a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BlastSummary {
    pub sent: usize,
    pub skipped: usize,
}

impl Blast<'_> {
    /// Render and send every row over `transport`, one message per row.
    ///
    /// In dry-run mode only the first row is rendered and sent, to the
    /// override address.
    #[instrument(skip_all, fields(rows = rows.len(), dry_run = self.dry_run.is_some()))]
    pub fn run<T>(&self, transport: &T, rows: &[Row]) -> Result<BlastSummary, BlastError>
    where
        T: Transport,
        T::Error: std::error::Error,
    {
        let mut summary = BlastSummary::default();

        for row in rows {
            match self.send_row(transport, row) {
                Ok(()) => summary.sent += 1,
                Err(err) if self.strict => return Err(err),
                Err(err) => {
                    summary.skipped += 1;
                    warn!("skipping row: {err}");
                }
            }

            if self.dry_run.is_some() {
                break;
            }
        }

        Ok(summary)
    }

    fn send_row<T>(&self, transport: &T, row: &Row) -> Result<(), BlastError>
    where
        T: Transport,
        T::Error: std::error::Error,
    {
        let cell = row.get(self.email_column).cloned().unwrap_or_default();

        // The row must carry a plausible recipient even when the message is
        // redirected by a dry run.
        let recipient: Address = cell
            .trim()
            .parse()
            .map_err(|_| BlastError::InvalidAddress(cell.clone()))?;

        let mail_to = match self.dry_run {
            Some(addr) => addr.to_string(),
            None => recipient.to_string(),
        };

        match self.dry_run {
            Some(_) => info!("mail to: {recipient} (dry run to: {mail_to})"),
            None => info!("mail to: {mail_to}"),
        }

        let (text, html) = self.template.render(row)?;
        let rendered = RenderedMessage {
            mail_to,
            text,
            html,
        };

        let message = build_message(&rendered, &self.from, self.subject)?;

        transport
            .send(&message)
            .map_err(|e| BlastError::Smtp(e.to_string()))?;

        Ok(())
    }
}
