// SPDX-License-Identifier: GPL-3.0-only

use std::{fmt, str::FromStr};

use thiserror::Error;
use url::Url;

/// Parsed navigable location.
///
/// `/?offset=N` is the list page, `/pokemon/?id=N&offset=M` (or `/pokemon/N?offset=M`)
/// the detail page. The offset travels along so going back lands on the same list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    List { offset: i64 },
    Detail { id: i64, offset: i64 },
}

impl Default for Location {
    fn default() -> Self {
        Location::List { offset: 0 }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("`{0}` is not a valid location")]
    Malformed(String),

    #[error("there is no page at `{0}`")]
    UnknownPage(String),

    #[error("`{0}` is not a valid Pokémon id")]
    InvalidId(String),
}

/// Relative locations are resolved against this
const ORIGIN: &str = "http://dexview.local/";

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || LocationError::Malformed(input.to_string());
        let url = Url::parse(ORIGIN)
            .and_then(|origin| origin.join(input.trim()))
            .map_err(|_| malformed())?;

        let mut offset = 0;
        let mut query_id = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "offset" => offset = parse_offset(&value),
                "id" => query_id = Some(value.into_owned()),
                _ => {}
            }
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Location::List { offset }),
            ["pokemon"] => {
                let id = query_id.unwrap_or_default();
                Ok(Location::Detail {
                    id: parse_id(&id)?,
                    offset,
                })
            }
            ["pokemon", id] => Ok(Location::Detail {
                id: parse_id(id)?,
                offset,
            }),
            _ => Err(LocationError::UnknownPage(url.path().to_string())),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::List { offset } => write!(f, "/?offset={offset}"),
            Location::Detail { id, offset } => write!(f, "/pokemon/?id={id}&offset={offset}"),
        }
    }
}

/// Anything that is not a non-negative integer reads as the first page
fn parse_offset(value: &str) -> i64 {
    value.trim().parse::<i64>().map(|offset| offset.max(0)).unwrap_or(0)
}

fn parse_id(value: &str) -> Result<i64, LocationError> {
    match value.trim().parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(LocationError::InvalidId(value.to_string())),
    }
}
