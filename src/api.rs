//! PokeAPI client

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::category::PokemonType;
use crate::error::FetchError;
use crate::state::{CardDetail, Item};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

/// Where the list pipeline gets the members of one type from.
#[async_trait]
pub trait TypeSource: Send + Sync {
    async fn fetch_type(&self, kind: PokemonType) -> Result<Vec<Item>, FetchError>;
}

#[derive(Clone, Debug)]
pub struct PokeApi {
    base: String,
    client: reqwest::Client,
}

impl PokeApi {
    /// `request_timeout` of `None` leaves requests unbounded.
    pub fn new(base: impl Into<String>, request_timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        Ok(Self {
            base: base.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn fetch_card(&self, url: &str) -> Result<CardDetail, FetchError> {
        let response: PokemonResponse = self.fetch_json(url).await?;
        let stat = |name: &str| {
            response
                .stats
                .iter()
                .find(|slot| slot.stat.name == name)
                .map(|slot| slot.base_stat)
                .unwrap_or(0)
        };
        Ok(CardDetail {
            hp: stat("hp"),
            attack: stat("attack"),
            defense: stat("defense"),
            primary_type: response
                .types
                .first()
                .map(|slot| slot.type_info.name.clone()),
            sprite_url: pointer_string(&response.sprites, "/front_default"),
            name: response.name,
        })
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Default for PokeApi {
    fn default() -> Self {
        Self {
            base: DEFAULT_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TypeSource for PokeApi {
    async fn fetch_type(&self, kind: PokemonType) -> Result<Vec<Item>, FetchError> {
        let url = format!("{}/type/{}", self.base, kind.slug());
        let response: TypeDetailResponse = self.fetch_json(&url).await?;
        Ok(response
            .pokemon
            .into_iter()
            .map(|entry| Item {
                name: entry.pokemon.name,
                url: entry.pokemon.url,
            })
            .collect())
    }
}

static API: OnceLock<Arc<PokeApi>> = OnceLock::new();

/// Installs the process-wide client used by the effect handler. Only the
/// first call takes effect.
pub fn install(api: PokeApi) {
    let base = api.base.clone();
    if API.set(Arc::new(api)).is_err() {
        tracing::warn!(%base, "api client already installed");
    }
}

pub fn shared() -> Arc<PokeApi> {
    API.get_or_init(|| Arc::new(PokeApi::default())).clone()
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
