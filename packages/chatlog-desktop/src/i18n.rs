//! UI strings
//!
//! A flat key → text catalog loaded once at startup. Unknown keys render as
//! the key itself.

use gpui::Global;
use serde_json::Value;
use std::collections::HashMap;
use std::env;

const EN: &str = include_str!("../i18n/en.json");

#[derive(Clone, Debug)]
pub struct I18n {
    locale: String,
    messages: HashMap<String, String>,
}

impl I18n {
    fn from_json(locale: String, raw: &str) -> Self {
        let messages = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect(),
            Ok(_) => {
                tracing::warn!("String catalog for {} is not a JSON object", locale);
                HashMap::new()
            }
            Err(e) => {
                tracing::warn!("Failed to parse string catalog for {}: {}", locale, e);
                HashMap::new()
            }
        };
        Self { locale, messages }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn t(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Look up `key` and substitute `{name}` placeholders.
    pub fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut value = self.t(key);
        for (param, replacement) in params {
            value = value.replace(&format!("{{{param}}}"), replacement);
        }
        value
    }
}

impl Global for I18n {}

fn detect_locale(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .map(|value| {
            let trimmed = value.trim();
            trimmed
                .split('.')
                .next()
                .unwrap_or(trimmed)
                .replace('-', "_")
                .to_lowercase()
        })
        .find(|normalized| !normalized.is_empty())
        .unwrap_or_else(|| "en".to_string())
}

pub fn init(cx: &mut gpui::App) {
    let locale = detect_locale(|key| env::var(key).ok());
    // English is the only bundled catalog
    let i18n = I18n::from_json(locale, EN);
    tracing::debug!("Loaded {} UI strings for locale {}", i18n.messages.len(), i18n.locale());
    cx.set_global(i18n);
}
