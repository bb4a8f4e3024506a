pub mod owned_pokemon;
pub mod owned_pokemon_types;
pub mod type_descriptors;
pub mod users;
