// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// Pokémon record as PokéAPI returns it, trimmed to what the viewer shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: i64,
    pub name: String,
    /// Decimetres
    #[serde(default)]
    pub height: i64,
    /// Hectograms
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub sprites: PokemonSprites,
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
}

impl Pokemon {
    /// Type names in slot order
    pub fn type_names(&self) -> Vec<String> {
        let mut slots: Vec<&PokemonTypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| slot.type_.name.clone()).collect()
    }

    /// Sprite for list cards: the small front sprite, falling back to the official artwork
    pub fn card_sprite(&self) -> Option<&str> {
        self.sprites
            .front_default
            .as_deref()
            .or_else(|| self.sprites.official_artwork())
    }

    /// Sprite for the detail page: the official artwork, falling back to the small front sprite
    pub fn artwork_sprite(&self) -> Option<&str> {
        self.sprites
            .official_artwork()
            .or(self.sprites.front_default.as_deref())
    }

    /// Whether the female form has its own sprite
    pub fn has_gender_differences(&self) -> bool {
        self.sprites.front_female.is_some()
    }

    /// Returns the total value of all the stats of the Pokémon
    pub fn total_stats(&self) -> i64 {
        self.stats.iter().map(|stat| stat.base_stat).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_female: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

impl PokemonSprites {
    pub fn official_artwork(&self) -> Option<&str> {
        self.other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonTypeSlot {
    pub slot: i64,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub stat: NamedResource,
    pub base_stat: i64,
    #[serde(default)]
    pub effort: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonAbility {
    pub ability: NamedResource,
    pub slot: i64,
    #[serde(default)]
    pub is_hidden: bool,
}
