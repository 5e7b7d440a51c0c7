//! Async bodies of the effects. Each resolves to the action that reports
//! its outcome, so every spawned task ends in exactly one result action.

use std::sync::Arc;

use crate::action::Action;
use crate::api::{PokeApi, TypeSource};
use crate::category::Category;
use crate::pipeline;

pub async fn load_list<S>(source: Arc<S>, category: Category, generation: u64) -> Action
where
    S: TypeSource + ?Sized + 'static,
{
    match pipeline::fetch_items(source, category).await {
        Ok(pokemon) => Action::ListDidLoad {
            generation,
            pokemon,
        },
        Err(error) => Action::ListDidError { generation, error },
    }
}

pub async fn load_card(api: Arc<PokeApi>, name: String, url: String) -> Action {
    match api.fetch_card(&url).await {
        Ok(detail) => Action::CardDidLoad(detail),
        Err(error) => Action::CardDidError { name, error },
    }
}
