// SPDX-License-Identifier: Apache-2.0
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tera::{Context, Tera};

use crate::error::BlastError;
use crate::recipients::Row;

/// Raw template sources for one template name, loaded once per run.
#[derive(Debug, Clone)]
pub struct TemplatePair {
    pub name: String,
    pub html: String,
    pub text: String,
}

impl TemplatePair {
    /// Read `<name>.html` and `<name>.txt` from the templates directory.
    ///
    /// Either file being absent aborts the run before any mail is sent.
    pub fn load(dir: &Path, name: &str) -> Result<Self, BlastError> {
        let html = read_template(dir, name, "html")?;
        let text = read_template(dir, name, "txt")?;
        Ok(Self {
            name: name.to_string(),
            html,
            text,
        })
    }
}

fn read_template(dir: &Path, name: &str, ext: &str) -> Result<String, BlastError> {
    let path = dir.join(format!("{name}.{ext}"));
    fs::read_to_string(&path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            BlastError::TemplateNotFound {
                name: name.to_string(),
                path,
            }
        } else {
            BlastError::Io { path, source }
        }
    })
}

/// A compiled template pair, shared read-only across the whole row loop.
///
/// The `.html` half is registered under its file name, so Tera's default
/// autoescaping applies to it and not to the plain-text half.
pub struct MailTemplate {
    tera: Tera,
    html_name: String,
    text_name: String,
}

impl MailTemplate {
    pub fn compile(pair: &TemplatePair) -> Result<Self, BlastError> {
        let html_name = format!("{}.html", pair.name);
        let text_name = format!("{}.txt", pair.name);

        let mut tera = Tera::default();
        tera.add_raw_template(&html_name, &pair.html)?;
        tera.add_raw_template(&text_name, &pair.text)?;

        Ok(Self {
            tera,
            html_name,
            text_name,
        })
    }

    /// Render both bodies for one row, returned as (text, html).
    ///
    /// Row fields are available top-level (`{{ name }}`) and under `data`
    /// (`{{ data.name }}`). A field the template references but the row does
    /// not supply is a render error.
    pub fn render(&self, row: &Row) -> Result<(String, String), BlastError> {
        let mut context = Context::new();
        for (key, value) in row {
            context.insert(key.as_str(), value);
        }
        context.insert("data", row);

        let text = self.tera.render(&self.text_name, &context)?;
        let html = self.tera.render(&self.html_name, &context)?;
        Ok((text, html))
    }
}

/// Rendered bodies plus the recipient drawn from the row.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub mail_to: String,
    pub text: String,
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(html: &str, text: &str) -> MailTemplate {
        let pair = TemplatePair {
            name: "test".to_string(),
            html: html.to_string(),
            text: text.to_string(),
        };
        MailTemplate::compile(&pair).unwrap()
    }

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renders_fields_into_both_bodies() {
        let template = compile("<p>Hi {{ name }}</p>", "Hi {{ name }}");
        let (text, html) = template.render(&row(&[("name", "Alice")])).unwrap();
        assert_eq!(text, "Hi Alice");
        assert_eq!(html, "<p>Hi Alice</p>");
    }

    #[test]
    fn fields_also_resolve_under_data() {
        let template = compile("{{ data.name }}", "{{ data.name }}");
        let (text, _) = template.render(&row(&[("name", "Bob")])).unwrap();
        assert_eq!(text, "Bob");
    }

    #[test]
    fn html_half_is_autoescaped() {
        let template = compile("{{ name }}", "{{ name }}");
        let (text, html) = template.render(&row(&[("name", "A & B")])).unwrap();
        assert_eq!(text, "A & B");
        assert_eq!(html, "A &amp; B");
    }

    #[test]
    fn missing_field_is_a_render_error() {
        let template = compile("Hi {{ name }}", "Hi {{ name }}");
        let result = template.render(&row(&[("email", "a@x.com")]));
        assert!(matches!(result, Err(BlastError::Template(_))));
    }

    #[test]
    fn invalid_template_syntax_fails_to_compile() {
        let pair = TemplatePair {
            name: "broken".to_string(),
            html: "{{ unclosed".to_string(),
            text: "fine".to_string(),
        };
        assert!(matches!(
            MailTemplate::compile(&pair),
            Err(BlastError::Template(_))
        ));
    }
}
