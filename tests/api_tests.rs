use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use typedex::action::Action;
use typedex::api::{PokeApi, TypeSource};
use typedex::category::{Category, PokemonType};
use typedex::error::FetchError;
use typedex::pipeline::{self, FetchState};
use typedex::tasks;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn type_body(server: &MockServer, names: &[&str]) -> serde_json::Value {
    let pokemon: Vec<_> = names
        .iter()
        .map(|name| {
            json!({
                "pokemon": { "name": name, "url": format!("{}/pokemon/{name}/", server.uri()) },
                "slot": 1
            })
        })
        .collect();
    json!({ "id": 10, "name": "fire", "pokemon": pokemon })
}

async fn mount_type(server: &MockServer, kind: PokemonType, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/type/{}", kind.slug())))
        .respond_with(ResponseTemplate::new(200).set_body_json(type_body(server, names)))
        .mount(server)
        .await;
}

fn names(items: &[typedex::state::Item]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

#[tokio::test]
async fn type_endpoint_is_listed_in_order() {
    let server = MockServer::start().await;
    mount_type(&server, PokemonType::Fire, &["charmander", "vulpix", "growlithe"]).await;

    let api = PokeApi::new(server.uri(), None).expect("client");
    let items = api.fetch_type(PokemonType::Fire).await.expect("fetch ok");

    assert_eq!(names(&items), vec!["charmander", "vulpix", "growlithe"]);
    assert_eq!(items[0].url, format!("{}/pokemon/charmander/", server.uri()));
}

#[tokio::test]
async fn http_status_maps_to_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/type/water"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri(), None).expect("client");
    let err = api.fetch_type(PokemonType::Water).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/type/grass"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"pokemon\": 3", "application/json"))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri(), None).expect("client");
    let err = api.fetch_type(PokemonType::Grass).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn card_reads_stats_type_and_sprite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/charizard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "charizard",
            "types": [
                { "slot": 1, "type": { "name": "fire", "url": "x" } },
                { "slot": 2, "type": { "name": "flying", "url": "y" } }
            ],
            "stats": [
                { "base_stat": 78, "stat": { "name": "hp", "url": "a" } },
                { "base_stat": 84, "stat": { "name": "attack", "url": "b" } },
                { "base_stat": 78, "stat": { "name": "defense", "url": "c" } },
                { "base_stat": 100, "stat": { "name": "speed", "url": "d" } }
            ],
            "sprites": { "front_default": "https://img/6.png" }
        })))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri(), None).expect("client");
    let card = api
        .fetch_card(&format!("{}/pokemon/charizard/", server.uri()))
        .await
        .expect("card");

    assert_eq!(card.name, "charizard");
    assert_eq!((card.hp, card.attack, card.defense), (78, 84, 78));
    assert_eq!(card.primary_type.as_deref(), Some("fire"));
    assert_eq!(card.sprite_url.as_deref(), Some("https://img/6.png"));
}

#[tokio::test]
async fn all_types_merges_without_duplicates() {
    let server = MockServer::start().await;
    for kind in PokemonType::ALL {
        let names: &[&str] = match kind {
            PokemonType::Fire => &["charmander", "charizard"],
            PokemonType::Dragon => &["dragonite", "charizard"],
            PokemonType::Steel => &["magnemite"],
            PokemonType::Electric => &["pikachu", "magnemite"],
            _ => &[],
        };
        mount_type(&server, kind, names).await;
    }

    let api = Arc::new(PokeApi::new(server.uri(), None).expect("client"));
    let state = pipeline::fetch(api, Category::All).await;

    let items = state.items().expect("ready");
    assert_eq!(
        names(items),
        vec!["charmander", "charizard", "pikachu", "magnemite", "dragonite"]
    );
}

#[tokio::test]
async fn all_types_fails_when_one_type_fails() {
    let server = MockServer::start().await;
    for kind in PokemonType::ALL {
        if kind != PokemonType::Ghost {
            mount_type(&server, kind, &["ditto"]).await;
        }
    }

    let api = Arc::new(PokeApi::new(server.uri(), None).expect("client"));
    let state = pipeline::fetch(api, Category::All).await;

    assert!(matches!(state, FetchState::Failed(FetchError::Network(_))));
}

#[tokio::test]
async fn load_list_echoes_generation() {
    let server = MockServer::start().await;
    mount_type(&server, PokemonType::Fairy, &["clefairy"]).await;
    let api = Arc::new(PokeApi::new(server.uri(), None).expect("client"));

    let loaded = tasks::load_list(api.clone(), Category::Type(PokemonType::Fairy), 7).await;
    assert!(matches!(
        loaded,
        Action::ListDidLoad { generation: 7, ref pokemon } if pokemon.len() == 1
    ));

    let failed = tasks::load_list(api, Category::Type(PokemonType::Dark), 8).await;
    assert!(matches!(failed, Action::ListDidError { generation: 8, .. }));
}
