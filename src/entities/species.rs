// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use super::NamedResource;
use crate::utils::clean_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub genera: Vec<Genus>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub generation: Option<NamedResource>,
}

impl Species {
    /// The genus in the given language ("Seed Pokémon")
    pub fn genus(&self, language: &str) -> Option<&str> {
        self.genera
            .iter()
            .find(|genus| genus.language.name == language)
            .map(|genus| genus.genus.as_str())
    }

    /// First flavor text in the given language, cleaned for display
    pub fn flavor_text(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| clean_text(&entry.flavor_text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
    #[serde(default)]
    pub version: Option<NamedResource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_language_entries() {
        let species: Species = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "bulbasaur",
                "genera": [
                    { "genus": "たねポケモン", "language": { "name": "ja", "url": "" } },
                    { "genus": "Seed Pokémon", "language": { "name": "en", "url": "" } }
                ],
                "flavor_text_entries": [
                    { "flavor_text": "Une étrange graine", "language": { "name": "fr", "url": "" } },
                    { "flavor_text": "A strange seed was\nplanted on its\fback at birth.", "language": { "name": "en", "url": "" } }
                ],
                "generation": { "name": "generation-i", "url": "https://pokeapi.co/api/v2/generation/1/" }
            }"#,
        )
        .unwrap();

        assert_eq!(species.genus("en"), Some("Seed Pokémon"));
        assert_eq!(
            species.flavor_text("en").as_deref(),
            Some("A strange seed was planted on its back at birth.")
        );
        assert_eq!(species.genus("de"), None);
    }
}
