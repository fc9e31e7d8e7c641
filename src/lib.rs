// SPDX-License-Identifier: Apache-2.0
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mailer;
pub mod recipients;
pub mod template;
