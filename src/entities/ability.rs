// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use super::NamedResource;
use crate::utils::clean_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_main_series: bool,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

impl Ability {
    pub fn short_effect(&self, language: &str) -> Option<String> {
        self.effect_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| clean_text(&entry.short_effect))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub short_effect: String,
    pub language: NamedResource,
}
