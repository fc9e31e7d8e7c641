use std::env;

use serde::Deserialize;

use crate::error::BlastError;

// Environment variable names for the SMTP relay settings
pub const SMTP_HOST_ENV: &str = "SMTP_HOST";
pub const SMTP_PORT_ENV: &str = "SMTP_PORT";
pub const SMTP_USER_ENV: &str = "SMTP_USER";
pub const SMTP_PASSWD_ENV: &str = "SMTP_PASSWD";
pub const SMTP_SECURITY_ENV: &str = "SMTP_SECURITY";
pub const SMTP_MAIL_FROM_ENV: &str = "SMTP_MAIL_FROM";

const DEFAULT_PORT: u16 = 587;
const DEFAULT_MAIL_FROM: &str = "noreply@hakaru.org";

/// Connection security for the SMTP session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// STARTTLS upgrade on the submission port. The default.
    Tls,
    /// Plaintext connection, only suitable for a local relay.
    None,
}

/// SMTP relay settings, read once from the environment at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub passwd: String,
    pub security: SmtpSecurity,
    pub mail_from: String,
}

impl SmtpConfig {
    /// Read the `SMTP_*` variables from the process environment.
    pub fn from_env() -> Result<Self, BlastError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// An unset or empty required variable is a fatal configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BlastError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|value| !value.is_empty())
                .ok_or(BlastError::MissingEnv(var))
        };

        let host = required(SMTP_HOST_ENV)?;
        let user = required(SMTP_USER_ENV)?;
        let passwd = required(SMTP_PASSWD_ENV)?;

        let port = match lookup(SMTP_PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| BlastError::InvalidEnv {
                var: SMTP_PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let security = match lookup(SMTP_SECURITY_ENV).as_deref() {
            None | Some("") | Some("tls") => SmtpSecurity::Tls,
            Some("none") => SmtpSecurity::None,
            Some(other) => {
                return Err(BlastError::InvalidEnv {
                    var: SMTP_SECURITY_ENV,
                    value: other.to_string(),
                });
            }
        };

        let mail_from = lookup(SMTP_MAIL_FROM_ENV)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string());

        Ok(Self {
            host,
            port,
            user,
            passwd,
            security,
            mail_from,
        })
    }
}
