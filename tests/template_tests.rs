// SPDX-License-Identifier: Apache-2.0
use std::path::{Path, PathBuf};

use mailblast::error::BlastError;
use mailblast::template::{MailTemplate, TemplatePair};

fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/templates")
}

#[test]
fn loads_both_halves_of_the_pair() {
    let pair = TemplatePair::load(&templates_dir(), "hello").unwrap();
    assert!(pair.html.contains("{{ name }}"));
    assert!(pair.text.contains("{{ name }}"));
}

#[test]
fn missing_text_half_is_fatal() {
    // orphan.html exists, orphan.txt does not
    let err = TemplatePair::load(&templates_dir(), "orphan").unwrap_err();
    match err {
        BlastError::TemplateNotFound { name, path } => {
            assert_eq!(name, "orphan");
            assert!(path.ends_with("orphan.txt"));
        }
        other => panic!("expected TemplateNotFound, got {other}"),
    }
}

#[test]
fn unknown_template_name_is_fatal() {
    let err = TemplatePair::load(&templates_dir(), "no-such-template").unwrap_err();
    assert!(matches!(err, BlastError::TemplateNotFound { .. }));
}

#[test]
fn fixture_pair_renders_non_empty_bodies() {
    let pair = TemplatePair::load(&templates_dir(), "hello").unwrap();
    let template = MailTemplate::compile(&pair).unwrap();

    let row = [("name".to_string(), "Alice".to_string())]
        .into_iter()
        .collect();
    let (text, html) = template.render(&row).unwrap();

    assert!(!text.is_empty());
    assert!(!html.is_empty());
    assert!(text.contains("Hi Alice"));
    assert!(html.contains("Hi Alice"));
}
