use std::sync::Arc;

use chrono::{DateTime, Utc};
use scraper::Html;

/// Markup of the page captured at one instant.
///
/// The markup is stored unparsed so the snapshot can live inside a session
/// that moves between tasks; [`parse`](Self::parse) builds the DOM on demand.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    html: Arc<str>,
    captured_at: DateTime<Utc>,
}

impl DocumentSnapshot {
    pub fn new(html: String) -> Self {
        Self {
            html: html.into(),
            captured_at: Utc::now(),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn parse(&self) -> Html {
        Html::parse_document(&self.html)
    }
}
