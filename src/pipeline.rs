//! Fetch-merge pipeline behind the list screen.
//!
//! A concrete type is a single retrieval. The `All` sentinel fans out one
//! retrieval per type on a `JoinSet`, waits for every one of them, and merges
//! the lists in `PokemonType::ALL` order keeping the first occurrence of each
//! name. Any failing retrieval fails the whole fetch.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::api::TypeSource;
use crate::category::{Category, PokemonType};
use crate::error::FetchError;
use crate::state::Item;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum FetchState {
    #[default]
    Loading,
    Ready(Vec<Item>),
    Failed(FetchError),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn items(&self) -> Option<&[Item]> {
        match self {
            FetchState::Ready(items) => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<Vec<Item>, FetchError>> for FetchState {
    fn from(result: Result<Vec<Item>, FetchError>) -> Self {
        match result {
            Ok(items) => FetchState::Ready(items),
            Err(error) => FetchState::Failed(error),
        }
    }
}

/// The single observable slot of a pipeline instance. Every fetch gets a
/// generation from `begin`; results from older generations are dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchSlot {
    generation: u64,
    state: FetchState,
}

impl FetchSlot {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn items(&self) -> &[Item] {
        self.state.items().unwrap_or(&[])
    }

    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = FetchState::Loading;
        self.generation
    }

    /// Returns false when the result was stale or the generation already
    /// reached a terminal state.
    pub fn settle(&mut self, generation: u64, result: Result<Vec<Item>, FetchError>) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping stale list result"
            );
            return false;
        }
        self.state = result.into();
        true
    }
}

pub async fn fetch<S>(source: Arc<S>, category: Category) -> FetchState
where
    S: TypeSource + ?Sized + 'static,
{
    fetch_items(source, category).await.into()
}

pub async fn fetch_items<S>(source: Arc<S>, category: Category) -> Result<Vec<Item>, FetchError>
where
    S: TypeSource + ?Sized + 'static,
{
    match category {
        Category::Type(kind) => source.fetch_type(kind).await,
        Category::All => fetch_all_types(source).await,
    }
}

async fn fetch_all_types<S>(source: Arc<S>) -> Result<Vec<Item>, FetchError>
where
    S: TypeSource + ?Sized + 'static,
{
    let mut join_set = JoinSet::new();
    for (index, kind) in PokemonType::ALL.into_iter().enumerate() {
        let source = source.clone();
        join_set.spawn(async move { (index, kind, source.fetch_type(kind).await) });
    }

    let mut lists: Vec<Vec<Item>> = vec![Vec::new(); PokemonType::ALL.len()];
    while let Some(joined) = join_set.join_next().await {
        // Returning early drops the set, which aborts the remaining requests.
        let (index, kind, result) =
            joined.map_err(|err| FetchError::Network(format!("type fetch task failed: {err}")))?;
        match result {
            Ok(items) => lists[index] = items,
            Err(error) => {
                tracing::warn!(%kind, %error, "type fetch failed, dropping merged result");
                return Err(error);
            }
        }
    }

    let merged = merge_unique(lists);
    tracing::info!(count = merged.len(), "merged all types");
    Ok(merged)
}

/// Concatenates the lists in order and keeps the first item seen per name.
pub fn merge_unique<I>(lists: I) -> Vec<Item>
where
    I: IntoIterator<Item = Vec<Item>>,
{
    let mut unique: IndexMap<String, Item> = IndexMap::new();
    for item in lists.into_iter().flatten() {
        unique.entry(item.name.clone()).or_insert(item);
    }
    unique.into_values().collect()
}
