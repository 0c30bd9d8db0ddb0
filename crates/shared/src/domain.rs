use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::error::RequestError;

/// Value of the checked `identifier` radio input: which alert a request targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    AlertEnable,
    AlertDisable,
    TelescopeMove,
}

impl FormId {
    pub const ALL: [FormId; 3] = [
        FormId::AlertEnable,
        FormId::AlertDisable,
        FormId::TelescopeMove,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormId::AlertEnable => "alert-enable",
            FormId::AlertDisable => "alert-disable",
            FormId::TelescopeMove => "telescope-move",
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormId {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches("form#");
        FormId::ALL
            .into_iter()
            .find(|form| form.as_str() == name)
            .ok_or_else(|| RequestError::UnknownForm(s.to_string()))
    }
}

/// What the alert-disable form does when no identifier is checked.
///
/// `Legacy` follows the page's always-taken guard: after the "no alert
/// selected" notice the request still goes out, with the unset identifier
/// rendered as `undefined`. `RequireSelection` aborts the way the
/// alert-enable form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisablePolicy {
    #[default]
    Legacy,
    RequireSelection,
}

impl FromStr for DisablePolicy {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "legacy" => Ok(DisablePolicy::Legacy),
            "require-selection" => Ok(DisablePolicy::RequireSelection),
            _ => Err(RequestError::UnknownPolicy(s.to_string())),
        }
    }
}
