//! Submit handlers for the alert and telescope forms on the control page.

use shared::{
    domain::{DisablePolicy, FormId, Identifier},
    error::RequestError,
    protocol::Command,
};
use tracing::debug;

use crate::RequestSubmitter;

/// The inputs the handlers read from the page.
pub trait FormSource {
    /// Value of the checked `identifier` radio input, if any.
    fn checked_identifier(&self) -> Option<Identifier>;
    /// Content of the `move-args` text input.
    fn move_args(&self) -> String;
}

/// Form inputs held as plain values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub identifier: Option<Identifier>,
    pub move_args: String,
}

impl FormValues {
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(Identifier::new(identifier)),
            ..Self::default()
        }
    }

    pub fn with_move_args(move_args: impl Into<String>) -> Self {
        Self {
            move_args: move_args.into(),
            ..Self::default()
        }
    }
}

impl FormSource for FormValues {
    fn checked_identifier(&self) -> Option<Identifier> {
        self.identifier.clone()
    }

    fn move_args(&self) -> String {
        self.move_args.clone()
    }
}

/// The three form handlers, wired to one submitter.
///
/// Handlers return what a page submit handler would: `Some(false)` once a
/// submission was attempted, `None` when the handler bailed out before
/// submitting. Both suppress the form's default navigation.
#[derive(Clone)]
pub struct FormBindings {
    submitter: RequestSubmitter,
    disable_policy: DisablePolicy,
}

impl FormBindings {
    pub fn bind(submitter: RequestSubmitter, disable_policy: DisablePolicy) -> Self {
        debug!(
            forms = ?FormId::ALL,
            ?disable_policy,
            confirm_requests = submitter.options().confirm_requests,
            "form handlers bound"
        );
        Self {
            submitter,
            disable_policy,
        }
    }

    pub fn submitter(&self) -> &RequestSubmitter {
        &self.submitter
    }

    /// The checked identifier, or a "no alert selected" notice and `None`.
    pub fn get_identifier<S: FormSource + ?Sized>(&self, source: &S) -> Option<Identifier> {
        let identifier = source.checked_identifier();
        if identifier.is_none() {
            self.submitter.notify(&RequestError::NoSelection.to_string());
        }
        identifier
    }

    pub fn alert_enable<S: FormSource + ?Sized>(&self, source: &S) -> Option<bool> {
        let identifier = self.get_identifier(source)?;
        Some(
            self.submitter
                .submit_command(Command::enable_alert(&identifier)),
        )
    }

    pub fn alert_disable<S: FormSource + ?Sized>(&self, source: &S) -> Option<bool> {
        let identifier = self.get_identifier(source);
        if identifier.is_none() && self.disable_policy == DisablePolicy::RequireSelection {
            return None;
        }
        Some(
            self.submitter
                .submit_command(Command::disable_alert(identifier.as_ref())),
        )
    }

    /// Arguments go out exactly as typed, blank included.
    pub fn telescope_move<S: FormSource + ?Sized>(&self, source: &S) -> Option<bool> {
        Some(
            self.submitter
                .submit_command(Command::telescope_move(&source.move_args())),
        )
    }

    pub fn handle<S: FormSource + ?Sized>(&self, form: FormId, source: &S) -> Option<bool> {
        match form {
            FormId::AlertEnable => self.alert_enable(source),
            FormId::AlertDisable => self.alert_disable(source),
            FormId::TelescopeMove => self.telescope_move(source),
        }
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
