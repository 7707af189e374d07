// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Override;

/// How many moves of the (usually very long) move list are kept
const MOVES_KEPT: usize = 10;

/// Main Pokémon structure with all the info we want to display about it
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<DetailStat>,
    pub height: i64,
    pub weight: i64,
    pub moves: Vec<String>,
    pub base_experience: Option<i64>,
    /// The untouched PokéApi payload this record was built from
    pub raw: Value,
    /// User personalization merged on top of the remote data
    pub personal: Override,
}

impl Debug for DetailRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("personal", &self.personal)
            .finish()
    }
}

/// A single base stat, named as PokéApi names it (`special-attack`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailStat {
    pub name: String,
    pub base_value: i64,
}

impl DetailRecord {
    /// Parses a PokéApi `/pokemon/{id}` payload to our own data structure.
    ///
    /// The payload is kept as is in `raw`.
    pub fn from_payload(raw: Value) -> Result<Self, serde_json::Error> {
        let pokemon = RawPokemon::deserialize(&raw)?;

        let image_url = pokemon
            .sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|artwork| artwork.front_default)
            .filter(|url| !url.is_empty())
            .or(pokemon.sprites.front_default);

        Ok(Self {
            id: pokemon.id,
            name: pokemon.name,
            image_url,
            types: pokemon.types.into_iter().map(|t| t.type_.name).collect(),
            abilities: pokemon
                .abilities
                .into_iter()
                .map(|a| a.ability.name)
                .collect(),
            stats: pokemon
                .stats
                .into_iter()
                .map(|s| DetailStat {
                    name: s.stat.name,
                    base_value: s.base_stat,
                })
                .collect(),
            height: pokemon.height,
            weight: pokemon.weight,
            moves: pokemon
                .moves
                .into_iter()
                .take(MOVES_KEPT)
                .map(|m| m.move_.name)
                .collect(),
            base_experience: pokemon.base_experience,
            raw,
            personal: Override::default(),
        })
    }

    /// Returns a copy of this record carrying `personal` as its whole personalization
    pub fn with_personal(&self, personal: Override) -> Self {
        let mut record = self.clone();
        record.personal = personal;
        record
    }

    /// Returns the total value of all the stats of the Pokémon
    pub fn total_stats(&self) -> i64 {
        self.stats.iter().map(|s| s.base_value).sum()
    }
}

#[derive(Deserialize)]
struct RawPokemon {
    id: i64,
    name: String,
    #[serde(default)]
    sprites: RawSprites,
    #[serde(default)]
    types: Vec<RawType>,
    #[serde(default)]
    abilities: Vec<RawAbility>,
    #[serde(default)]
    stats: Vec<RawStat>,
    #[serde(default)]
    height: i64,
    #[serde(default)]
    weight: i64,
    #[serde(default)]
    moves: Vec<RawMove>,
    #[serde(default)]
    base_experience: Option<i64>,
}

#[derive(Deserialize, Default)]
struct RawSprites {
    front_default: Option<String>,
    other: Option<RawOtherSprites>,
}

#[derive(Deserialize)]
struct RawOtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<RawSprite>,
}

#[derive(Deserialize)]
struct RawSprite {
    front_default: Option<String>,
}

#[derive(Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Deserialize)]
struct RawType {
    #[serde(rename = "type")]
    type_: RawNamed,
}

#[derive(Deserialize)]
struct RawAbility {
    ability: RawNamed,
}

#[derive(Deserialize)]
struct RawStat {
    base_stat: i64,
    stat: RawNamed,
}

#[derive(Deserialize)]
struct RawMove {
    #[serde(rename = "move")]
    move_: RawNamed,
}
