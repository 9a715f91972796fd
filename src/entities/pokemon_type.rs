// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// A Pokémon type and how it interacts with the other types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub damage_relations: TypeRelations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub double_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedResource>,
}

impl TypeRelations {
    /// Names of the types that deal double damage to this one
    pub fn weak_to(&self) -> impl Iterator<Item = &str> {
        self.double_damage_from
            .iter()
            .map(|resource| resource.name.as_str())
    }
}
