mod helpers;
mod pokeapi_test;
mod repository_test;
mod type_catalog_test;
