//! PokeAPI response bodies for `mockito` mocks.
//!
//! Each builder returns the subset of the real PokeAPI payload the gateway
//! reads, with resource URLs rooted at `base` so follow-up links resolve to
//! the mock server.

use serde_json::{Value, json};

/// `GET /pokemon/{code}` body.
pub fn species_detail(
    id: u32,
    name: &str,
    types: &[&str],
    artwork: Option<&str>,
    front_default: Option<&str>,
) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            json!({
                "slot": i + 1,
                "type": { "name": t, "url": format!("https://pokeapi.co/api/v2/type/{t}/") },
            })
        })
        .collect();
    json!({
        "id": id,
        "name": name,
        "types": types,
        "sprites": {
            "front_default": front_default,
            "other": { "official-artwork": { "front_default": artwork } },
        },
    })
}

/// `GET /pokemon?offset&limit` body listing `names`.
pub fn species_page(base: &str, count: u32, names: &[&str]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .map(|n| json!({ "name": n, "url": format!("{base}/pokemon/{n}/") }))
        .collect();
    json!({
        "count": count,
        "next": format!("{base}/pokemon?offset=20&limit=20"),
        "previous": null,
        "results": results,
    })
}

/// `GET /type` body from `(id, name)` pairs.
pub fn type_list(base: &str, types: &[(u32, &str)]) -> Value {
    let results: Vec<Value> = types
        .iter()
        .map(|(id, name)| json!({ "name": name, "url": format!("{base}/type/{id}/") }))
        .collect();
    json!({ "count": results.len(), "next": null, "previous": null, "results": results })
}

/// `GET /generation?limit=10` body from `(id, slug)` pairs.
pub fn generation_list(base: &str, generations: &[(u32, &str)]) -> Value {
    let results: Vec<Value> = generations
        .iter()
        .map(|(id, name)| json!({ "name": name, "url": format!("{base}/generation/{id}/") }))
        .collect();
    json!({ "count": results.len(), "next": null, "previous": null, "results": results })
}

/// `GET /generation/{id}` body from `(species id, name)` pairs.
pub fn generation_detail(base: &str, id: u32, species: &[(u32, &str)]) -> Value {
    let species: Vec<Value> = species
        .iter()
        .map(|(sid, name)| json!({ "name": name, "url": format!("{base}/pokemon-species/{sid}/") }))
        .collect();
    json!({ "id": id, "name": format!("generation-{id}"), "pokemon_species": species })
}

/// `GET /type/{id}` body from `(pokemon id, name)` pairs.
pub fn type_detail(base: &str, id: u32, name: &str, pokemon: &[(u32, &str)]) -> Value {
    let pokemon: Vec<Value> = pokemon
        .iter()
        .enumerate()
        .map(|(i, (pid, pname))| {
            json!({
                "slot": i + 1,
                "pokemon": { "name": pname, "url": format!("{base}/pokemon/{pid}/") },
            })
        })
        .collect();
    json!({ "id": id, "name": name, "pokemon": pokemon })
}
