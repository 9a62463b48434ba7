pub mod destination;
pub mod login;
pub mod source;
pub mod view;

pub use destination::DestinationForm;
pub use login::LoginForm;
pub use source::SourceForm;
pub use view::{ColumnField, ViewForm};

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// A single constraint violation, scoped to the input it belongs to. Field
/// names use the wire spelling (`tableName`, `serviceAccount`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local validation failed; nothing was sent.
    #[error("submission has validation errors")]
    Invalid(Vec<FieldError>),

    /// The backend rejected the request; the message is displayed as the
    /// top-level form error.
    #[error("{0}")]
    Api(String),

    /// A submission on this form is already in flight.
    #[error("a submission is already in flight")]
    InFlight,
}

impl SubmitError {
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SubmitError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

/// Mirrors disabling the submit button while a request is outstanding:
/// exactly one submission per form at a time.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

impl SubmitGuard {
    pub(crate) fn begin(&self) -> Option<SubmitPermit<'_>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(SubmitPermit { guard: self })
        }
    }
}

pub(crate) struct SubmitPermit<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::SeqCst);
    }
}

pub(crate) fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
