use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CampusBotError, Result};

/// One entry of the links menu: label plus external URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Note body preview length, in characters.
    pub notes_preview_chars: Option<usize>,
    /// How many notes the list view shows at most.
    pub notes_list_max: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Bot credential, handed to the transport; the core never reads it.
    pub token: Option<String>,
    pub webhook_url: Option<String>,
    pub links: Option<Vec<LinkEntry>>,
    pub views: Option<ViewConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| CampusBotError::Config(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| CampusBotError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn notes_preview_chars(&self) -> usize {
        self.views
            .as_ref()
            .and_then(|v| v.notes_preview_chars)
            .unwrap_or(50)
    }

    pub fn notes_list_max(&self) -> usize {
        self.views
            .as_ref()
            .and_then(|v| v.notes_list_max)
            .unwrap_or(10)
    }

    /// The links menu content, falling back to the stock set.
    pub fn links(&self) -> Vec<LinkEntry> {
        match &self.links {
            Some(links) if !links.is_empty() => links.clone(),
            _ => default_links(),
        }
    }
}

fn default_links() -> Vec<LinkEntry> {
    [
        ("🌐 Сайт колледжа", "https://example-college.ru"),
        ("📱 Соцсети", "https://vk.com/college"),
        ("📚 Библиотека", "https://library.college.ru"),
        ("💬 Чат студентов", "https://t.me/college_chat"),
        ("🎮 FunPay", "https://funpay.com"),
    ]
    .into_iter()
    .map(|(label, url)| LinkEntry {
        label: label.to_string(),
        url: url.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_sections_missing() {
        let config = Config::default();
        assert_eq!(config.notes_preview_chars(), 50);
        assert_eq!(config.notes_list_max(), 10);
        assert_eq!(config.links().len(), 5);
    }

    #[test]
    fn parses_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"views": {"notes_list_max": 3}}"#).unwrap();
        assert_eq!(config.notes_list_max(), 3);
        assert_eq!(config.notes_preview_chars(), 50);
    }

    #[test]
    fn loads_from_file_and_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"token": "t", "links": []}"#).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.token.as_deref(), Some("t"));
        // Empty links fall back to the stock set.
        assert_eq!(config.links().len(), 5);

        std::fs::write(&path, "not json").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
