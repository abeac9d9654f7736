use serde::{Deserialize, Serialize};

use crate::app::{GleanerError, Result};
use crate::domain::Locale;

/// Rating locator per locale.
///
/// The rating element is matched on a substring of its accessibility label,
/// which is written in the session language. A UI copy change breaks this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingLocators {
    pub en: String,
    pub cs: String,
}

impl Default for RatingLocators {
    fn default() -> Self {
        Self {
            en: r#"span.nt2C1d > div.pf5lIe > div[aria-label*="Rated"]"#.to_string(),
            cs: r#"span.nt2C1d > div.pf5lIe > div[aria-label*="Hodnocení"]"#.to_string(),
        }
    }
}

impl RatingLocators {
    pub fn for_locale(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Cs => &self.cs,
        }
    }
}

/// CSS selectors used to expand and extract reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// "Show full review" buttons
    pub expand_locator: String,

    /// Truncated review text
    pub short_review_locator: String,

    /// Expanded review text
    pub long_review_locator: String,

    /// Helpfulness count
    pub support_locator: String,

    /// Attribute carrying the rating label (default: aria-label)
    pub rating_attribute: String,

    pub rating_locator: RatingLocators,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            expand_locator: r#"button[jsname="gxjVle"]"#.to_string(),
            short_review_locator: r#"span[jsname="bN97Pc"]"#.to_string(),
            long_review_locator: r#"span[jsname="fbQN7e"]"#.to_string(),
            support_locator: r#"div[class="jUL89d y92BAb"]"#.to_string(),
            rating_attribute: "aria-label".to_string(),
            rating_locator: RatingLocators::default(),
        }
    }
}

/// Compile a configured selector, naming the offending field on failure.
pub(crate) fn compile(field: &str, selector: &str) -> Result<scraper::Selector> {
    scraper::Selector::parse(selector)
        .map_err(|e| GleanerError::Config(format!("Invalid {} {:?}: {}", field, selector, e)))
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<()> {
        compile("expand_locator", &self.expand_locator)?;
        compile("short_review_locator", &self.short_review_locator)?;
        compile("long_review_locator", &self.long_review_locator)?;
        compile("support_locator", &self.support_locator)?;
        compile("rating_locator.en", &self.rating_locator.en)?;
        compile("rating_locator.cs", &self.rating_locator.cs)?;
        Ok(())
    }
}
