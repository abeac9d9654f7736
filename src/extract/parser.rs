use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::app::{GleanerError, Result};
use crate::domain::Locale;
use crate::extract::config::{compile, ExtractConfig};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Locates review columns in a parsed snapshot.
///
/// Every column is returned in document order so columns line up by position.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    short_review: Selector,
    long_review: Selector,
    support: Selector,
    rating_en: Selector,
    rating_cs: Selector,
    rating_attribute: String,
}

impl DocumentParser {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            short_review: compile("short_review_locator", &config.short_review_locator)?,
            long_review: compile("long_review_locator", &config.long_review_locator)?,
            support: compile("support_locator", &config.support_locator)?,
            rating_en: compile("rating_locator.en", &config.rating_locator.en)?,
            rating_cs: compile("rating_locator.cs", &config.rating_locator.cs)?,
            rating_attribute: config.rating_attribute.clone(),
        })
    }

    /// Truncated review texts; empty where the review was expanded
    pub fn short_reviews(&self, document: &Html) -> Vec<String> {
        texts(document, &self.short_review)
    }

    /// Expanded review texts; empty where nothing was expanded
    pub fn long_reviews(&self, document: &Html) -> Vec<String> {
        texts(document, &self.long_review)
    }

    /// Raw helpfulness counts
    pub fn supports(&self, document: &Html) -> Vec<String> {
        texts(document, &self.support)
    }

    pub fn ratings(&self, document: &Html, locale: Locale) -> Result<Vec<u32>> {
        let selector = match locale {
            Locale::En => &self.rating_en,
            Locale::Cs => &self.rating_cs,
        };

        document
            .select(selector)
            .map(|element| {
                let label = element.value().attr(&self.rating_attribute).unwrap_or_default();
                parse_rating(label)
            })
            .collect()
    }
}

fn texts(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|element| element.text().collect::<String>())
        .collect()
}

/// Take the first run of digits in a free-text rating label.
pub fn parse_rating(label: &str) -> Result<u32> {
    DIGITS
        .find(label)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| GleanerError::MalformedRating(label.to_string()))
}
