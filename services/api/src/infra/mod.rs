pub mod db;
pub mod pokeapi;
