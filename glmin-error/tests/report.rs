use glmin_attrs::ErrorKind;
use glmin_error::{Error, ErrorKind};

/// A delimiter that was never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unclosed `{}`", self.open),
    labels = ["opened here", "expected a match before this"],
    help = "add the matching delimiter",
)]
pub struct Unclosed {
    pub open: char,
}

/// An error with no explicit labels.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "something went wrong")]
pub struct Bare;

/// Renders the report without colors, so that it can be compared against plain text.
fn render_plain(err: &Error, input: &str) -> String {
    let rendered = err.render("input", input);
    String::from_utf8(strip_ansi_escapes::strip(rendered.as_bytes())).unwrap()
}

#[test]
fn message_uses_fields() {
    let err = Error::new(vec![0..1, 4..5], Unclosed { open: '(' });
    assert_eq!(err.kind.message(), "unclosed `(`");
    assert_eq!(err.to_string(), "unclosed `(` (at 0..1)");
}

#[test]
fn report_contains_labels_and_help() {
    let err = Error::new(vec![0..1, 3..4], Unclosed { open: '(' });
    let report = render_plain(&err, "(a+b");
    assert!(report.contains("unclosed `(`"));
    assert!(report.contains("opened here"));
    assert!(report.contains("add the matching delimiter"));
}

#[test]
fn extra_labels_are_dropped_without_spans() {
    let err = Error::new(vec![2..3], Unclosed { open: '[' });
    let report = render_plain(&err, "a[i");
    assert!(report.contains("opened here"));
    assert!(!report.contains("expected a match before this"));
}

#[test]
fn downcast_to_kind() {
    let err = Error::new(vec![], Bare);
    assert!(err.is::<Bare>());
    assert!(!err.is::<Unclosed>());
    assert_eq!(err.downcast_ref::<Bare>(), Some(&Bare));
    assert_eq!(err.to_string(), "something went wrong");
}
