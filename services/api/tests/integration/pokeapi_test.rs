use std::time::Duration;

use mockito::{Matcher, Server};

use pokedex_api::domain::repository::PokeApiPort;
use pokedex_api::error::PokedexError;
use pokedex_api::infra::pokeapi::HttpPokeApi;
use pokedex_testing::upstream::{generation_detail, species_detail, species_page};

fn client(base: &str) -> HttpPokeApi {
    HttpPokeApi::new(base, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn should_decode_species_payload() {
    let mut server = Server::new_async().await;
    let body = species_detail(25, "pikachu", &["electric"], Some("https://img/25.png"), None);
    let mock = server
        .mock("GET", "/pokemon/pikachu")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let payload = client(&server.url()).species("pikachu").await.unwrap();

    mock.assert_async().await;
    assert_eq!(payload.id, 25);
    assert_eq!(payload.types[0].kind.name, "electric");
}

#[tokio::test]
async fn should_ignore_trailing_slash_in_base_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/generation/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(generation_detail(&server.url(), 1, &[(1, "bulbasaur")]).to_string())
        .create_async()
        .await;

    let generation = client(&format!("{}/", server.url()))
        .generation(1)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(generation.pokemon_species[0].name, "bulbasaur");
}

#[tokio::test]
async fn should_forward_page_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/pokemon(\?.*)?$".to_owned()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("offset".to_owned(), "40".to_owned()),
            Matcher::UrlEncoded("limit".to_owned(), "10".to_owned()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(species_page(&server.url(), 1302, &["ekans"]).to_string())
        .create_async()
        .await;

    let page = client(&server.url()).species_page(40, 10).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.count, 1302);
    assert_eq!(page.results[0].name, "ekans");
}

#[tokio::test]
async fn should_map_404_to_upstream_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/pokemon/agumon")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let result = client(&server.url()).species("agumon").await;
    assert!(
        matches!(result, Err(PokedexError::UpstreamNotFound)),
        "expected UpstreamNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_map_server_errors_to_upstream_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/type")
        .with_status(503)
        .create_async()
        .await;

    match client(&server.url()).types().await {
        Err(PokedexError::Upstream(msg)) => assert!(msg.contains("503"), "{msg}"),
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn should_map_undecodable_body_to_upstream_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/type/10")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"pokemon": "not-a-list"}"#)
        .create_async()
        .await;

    let result = client(&server.url()).type_members(10).await;
    assert!(matches!(result, Err(PokedexError::Upstream(_))));
}

#[tokio::test]
async fn should_map_connection_failure_to_upstream_error() {
    // Nothing listens on the discard port.
    let result = client("http://127.0.0.1:9").generations(10).await;
    assert!(matches!(result, Err(PokedexError::Upstream(_))));
}
