pub use sea_orm_migration::MigratorTrait;
use sea_orm_migration::prelude::*;

mod m20260901_000001_create_users;
mod m20260901_000002_create_type_descriptors;
mod m20260901_000003_create_owned_pokemon;
mod m20260901_000004_create_owned_pokemon_types;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_users::Migration),
            Box::new(m20260901_000002_create_type_descriptors::Migration),
            Box::new(m20260901_000003_create_owned_pokemon::Migration),
            Box::new(m20260901_000004_create_owned_pokemon_types::Migration),
        ]
    }
}
