use std::fmt;

use crate::{domain::Identifier, error::RequestError};

/// Path of the request handler, relative to the control page.
pub const REQUEST_ENDPOINT: &str = "request.cgi";
/// Name of the single query parameter carrying the command text.
pub const REQUEST_PARAM: &str = "request";
/// Exact body the server sends when it accepts a command.
pub const SUCCESS_SENTINEL: &str = "ok\r\n";
/// Argument the control page put in a disable request when no alert was checked.
pub const MISSING_IDENTIFIER: &str = "undefined";

/// A plain-text instruction for the control daemon.
///
/// The grammar belongs to the server; this side only concatenates a verb and
/// an argument and never validates either.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(String);

impl Command {
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn enable_alert(identifier: &Identifier) -> Self {
        Self(format!("selector enablealert {identifier}"))
    }

    /// `None` yields what the unguarded disable form concatenated when nothing
    /// was checked: `selector disablealert undefined`.
    pub fn disable_alert(identifier: Option<&Identifier>) -> Self {
        let identifier = identifier
            .map(Identifier::as_str)
            .unwrap_or(MISSING_IDENTIFIER);
        Self(format!("selector disablealert {identifier}"))
    }

    pub fn telescope_move(args: &str) -> Self {
        Self(format!("telescope move {args}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text shown when the operator is asked to confirm this command.
    pub fn confirmation_prompt(&self) -> String {
        format!("Do you want to submit this request?\n\n{}\n", self.0)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseClass {
    Accepted,
    Rejected(String),
}

impl ResponseClass {
    pub fn into_result(self) -> Result<(), RequestError> {
        match self {
            ResponseClass::Accepted => Ok(()),
            ResponseClass::Rejected(body) => Err(RequestError::Rejected(body)),
        }
    }
}

/// The server has no error channel besides the body: anything other than the
/// exact sentinel, including a bare `ok` or `ok\n`, is a rejection.
pub fn classify_response(body: &str) -> ResponseClass {
    if body == SUCCESS_SENTINEL {
        ResponseClass::Accepted
    } else {
        ResponseClass::Rejected(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_selector_commands() {
        let id = Identifier::new("3");
        assert_eq!(Command::enable_alert(&id).as_str(), "selector enablealert 3");
        assert_eq!(
            Command::disable_alert(Some(&id)).as_str(),
            "selector disablealert 3"
        );
        assert_eq!(
            Command::disable_alert(None).as_str(),
            "selector disablealert undefined"
        );
    }

    #[test]
    fn move_arguments_are_passed_verbatim() {
        assert_eq!(
            Command::telescope_move("+10 -5.5 arcsec").as_str(),
            "telescope move +10 -5.5 arcsec"
        );
        assert_eq!(Command::telescope_move("").as_str(), "telescope move ");
    }

    #[test]
    fn only_the_exact_sentinel_is_accepted() {
        assert_eq!(classify_response("ok\r\n"), ResponseClass::Accepted);
        for body in ["ok", "ok\n", "OK\r\n", " ok\r\n", "", "error: unknown alert\r\n"] {
            assert_eq!(
                classify_response(body),
                ResponseClass::Rejected(body.to_string()),
                "body {body:?}"
            );
        }
    }

    #[test]
    fn rejection_surfaces_body_verbatim() {
        let err = classify_response("error: telescope is parked.\r\n")
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "error: telescope is parked.\r\n");
    }

    #[test]
    fn confirmation_prompt_wraps_command() {
        assert_eq!(
            Command::raw("telescope stop").confirmation_prompt(),
            "Do you want to submit this request?\n\ntelescope stop\n"
        );
    }
}
