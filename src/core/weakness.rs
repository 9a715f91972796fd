// SPDX-License-Identifier: GPL-3.0-only

use std::{collections::BTreeSet, sync::Arc};

use futures_util::future::try_join_all;
use thiserror::Error;

use super::{api::FetchError, cache::CachedDex};
use crate::entities::PokemonType;

/// Names of the types that deal double damage to a Pokémon
pub type Weaknesses = BTreeSet<String>;

/// One of the per-type lookups failed, so no weakness set was produced
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("could not load damage relations for type `{type_name}`: {source}")]
pub struct AggregationError {
    pub type_name: String,
    #[source]
    pub source: FetchError,
}

/// Fetches the damage relations of every type concurrently and unions their
/// `double_damage_from` entries.
///
/// Either every lookup succeeds and the full union is returned, or the first
/// failure is returned and nothing else. Lookups go through the cache, so
/// Pokémon sharing a type share its fetch.
pub async fn aggregate_weaknesses(
    dex: &CachedDex,
    type_names: &[String],
) -> Result<Weaknesses, AggregationError> {
    let types = try_join_all(type_names.iter().map(|type_name| async move {
        dex.pokemon_type(type_name)
            .await
            .map_err(|err| AggregationError {
                type_name: type_name.clone(),
                source: err,
            })
    }))
    .await?;

    Ok(union_weaknesses(types.iter().map(Arc::as_ref)))
}

/// Union of the types dealing double damage to any of `types`
pub fn union_weaknesses<'a>(types: impl IntoIterator<Item = &'a PokemonType>) -> Weaknesses {
    types
        .into_iter()
        .flat_map(|pokemon_type| pokemon_type.damage_relations.weak_to())
        .map(str::to_string)
        .collect()
}
