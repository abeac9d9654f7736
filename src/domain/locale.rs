use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::GleanerError;

/// Browser locale of a session.
///
/// The listing renders the rating accessibility label in the session
/// language, so the locale selects which rating locator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Cs,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Cs => "cs",
        }
    }
}

impl FromStr for Locale {
    type Err = GleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "cs" => Ok(Locale::Cs),
            other => Err(GleanerError::InvalidLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
