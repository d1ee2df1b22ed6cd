//! Content - the locale-partitioned updates document
//!
//! The surrounding site keeps its recent updates in one JSON document
//! partitioned by locale (`{ "en": [...], "zh": [...] }`), each entry
//! carrying the card fields (`title`, `summary`, `type`, `date`, `link`).
//! This module parses that document into `Card` lists; the carousel
//! itself only ever sees already-parsed cards.

use serde::{Deserialize, Serialize};

use crate::types::Card;

/// Supported content locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

/// The parsed updates document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatesDoc {
    #[serde(default)]
    pub en: Vec<Card>,
    #[serde(default)]
    pub zh: Vec<Card>,
}

impl UpdatesDoc {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Cards for one locale.
    pub fn cards(&self, locale: Locale) -> &[Card] {
        match locale {
            Locale::En => &self.en,
            Locale::Zh => &self.zh,
        }
    }

    /// Consume the document, keeping one locale's cards.
    pub fn into_cards(self, locale: Locale) -> Vec<Card> {
        match locale {
            Locale::En => self.en,
            Locale::Zh => self.zh,
        }
    }
}
