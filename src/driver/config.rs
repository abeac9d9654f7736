use serde::{Deserialize, Serialize};

/// Browser launch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// User agent string to use
    pub user_agent: Option<String>,

    /// Extra command line flags passed to Chrome
    pub extra_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: None,
            extra_args: vec![
                "--no-sandbox".to_string(),
                "--disable-gpu".to_string(),
                "--disable-dev-shm-usage".to_string(),
            ],
        }
    }
}

impl BrowserSettings {
    /// Visible browser window, useful while adjusting locators
    pub fn headed() -> Self {
        Self {
            headless: false,
            ..Default::default()
        }
    }
}
