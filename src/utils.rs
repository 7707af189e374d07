// SPDX-License-Identifier: GPL-3.0-only

/// Transforms a kebab-case string into a space-separated string where each word starts with an uppercase letter.
pub fn capitalize_string(input: &str) -> String {
    input
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            if let Some(first_char) = chars.next() {
                first_char.to_uppercase().collect::<String>() + chars.as_str()
            } else {
                String::new()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Helper to scale some data from PokeApi such as weight...
/// scales a number down by dividing it by 10, converting it to a floating-point
pub fn scale_numbers(num: i64) -> f64 {
    (num as f64) / 10.0
}

/// Extracts the numeric id from a PokéApi resource url such as `.../pokemon/25/`.
///
/// Only the final path segment is considered, with at most one trailing slash,
/// and the segment before it has to be `pokemon`.
pub fn parse_pokemon_id(url: &str) -> Option<i64> {
    let path = url.strip_suffix('/').unwrap_or(url);
    let mut segments = path.rsplit('/');

    let id = segments.next()?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match segments.next() {
        Some("pokemon") => id.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_kebab_case() {
        assert_eq!(capitalize_string("special-attack"), "Special Attack");
        assert_eq!(capitalize_string("bulbasaur"), "Bulbasaur");
        assert_eq!(capitalize_string(""), "");
    }

    #[test]
    fn scales_decimetres_and_hectograms() {
        assert_eq!(scale_numbers(69), 6.9);
        assert_eq!(scale_numbers(0), 0.0);
    }

    #[test]
    fn parses_ids_from_resource_urls() {
        assert_eq!(
            parse_pokemon_id("https://pokeapi.co/api/v2/pokemon/1/"),
            Some(1)
        );
        assert_eq!(
            parse_pokemon_id("https://pokeapi.co/api/v2/pokemon/10033"),
            Some(10033)
        );
    }

    #[test]
    fn rejects_urls_without_a_pokemon_id() {
        assert_eq!(parse_pokemon_id("https://pokeapi.co/api/v2/pokemon/"), None);
        assert_eq!(parse_pokemon_id("https://pokeapi.co/api/v2/ability/1/"), None);
        assert_eq!(
            parse_pokemon_id("https://pokeapi.co/api/v2/pokemon/mew/"),
            None
        );
        assert_eq!(parse_pokemon_id("https://pokeapi.co/api/v2/pokemon/1//"), None);
        assert_eq!(parse_pokemon_id(""), None);
    }
}
