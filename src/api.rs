// SPDX-License-Identifier: GPL-3.0-only

use anywho::{Error, anywho};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// A `{name, url}` pair as returned by PokéApi list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the `/pokemon` list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Where the catalog reads Pokémon from
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Retrieves up to `limit` entries of the Pokémon list
    async fn fetch_list(&self, limit: usize) -> Result<ListPage, Error>;

    /// Retrieves the raw detail payload of a Pokémon by id or name
    async fn fetch_detail(&self, key: &str) -> Result<Value, Error>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    async fn fetch_list(&self, limit: usize) -> Result<ListPage, Error> {
        (**self).fetch_list(limit).await
    }

    async fn fetch_detail(&self, key: &str) -> Result<Value, Error> {
        (**self).fetch_detail(key).await
    }
}

/// PokéApi over HTTP
#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl PokeApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: String) -> Result<T, Error> {
        tracing::debug!(%url, "requesting");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anywho!(
                "Request to {} failed. Status: {}",
                url,
                response.status()
            ));
        }

        Ok(response.json::<T>().await?)
    }
}

impl CatalogSource for PokeApi {
    async fn fetch_list(&self, limit: usize) -> Result<ListPage, Error> {
        self.get_json(format!("{}/pokemon?limit={limit}", self.base_url))
            .await
    }

    async fn fetch_detail(&self, key: &str) -> Result<Value, Error> {
        if key.trim().is_empty() || key.contains(['/', '?', '#']) {
            return Err(anywho!("Invalid Pokémon identifier: {key:?}"));
        }

        self.get_json(format!("{}/pokemon/{key}", self.base_url))
            .await
    }
}
