// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::utils::parse_pokemon_id;

/// Simple owned data structure, for displaying the Pokémon in the list page (main page)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub id: Option<i64>,
    pub name: String,
    pub source_url: String,
    pub image_url: Option<String>,
}

impl Debug for ListEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl ListEntry {
    /// Builds an entry from a `{name, url}` list result, deriving the id from the url
    /// and the artwork url from the id without any extra request.
    pub fn from_resource(name: String, url: String, artwork_base_url: &str) -> Self {
        let id = parse_pokemon_id(&url);
        let image_url = id
            .filter(|id| *id != 0)
            .map(|id| artwork_url(artwork_base_url, id));

        Self {
            id,
            name,
            source_url: url,
            image_url,
        }
    }
}

/// Applies the artwork template to a Pokémon id.
pub fn artwork_url(artwork_base_url: &str, id: i64) -> String {
    format!("{}/{id}.png", artwork_base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://sprites.example/official-artwork";

    #[test]
    fn derives_id_and_artwork() {
        let entry = ListEntry::from_resource(
            String::from("bulbasaur"),
            String::from("https://pokeapi.co/api/v2/pokemon/1/"),
            BASE,
        );

        assert_eq!(entry.id, Some(1));
        assert_eq!(
            entry.image_url.as_deref(),
            Some("https://sprites.example/official-artwork/1.png")
        );
    }

    #[test]
    fn unmatched_url_has_no_id_or_image() {
        let entry = ListEntry::from_resource(
            String::from("missingno"),
            String::from("https://pokeapi.co/api/v2/pokemon-form/xyz/"),
            BASE,
        );

        assert_eq!(entry.id, None);
        assert_eq!(entry.image_url, None);
        assert_eq!(entry.name, "missingno");
    }

    #[test]
    fn zero_id_has_no_image() {
        let entry = ListEntry::from_resource(
            String::from("zero"),
            String::from("https://pokeapi.co/api/v2/pokemon/0/"),
            BASE,
        );

        assert_eq!(entry.id, Some(0));
        assert_eq!(entry.image_url, None);
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        assert_eq!(artwork_url("https://a.b/art/", 7), "https://a.b/art/7.png");
    }
}
