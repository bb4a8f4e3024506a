use sea_orm::entity::prelude::*;

/// Pokémon type taxonomy entry ("fire", "water", ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "type_descriptors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub label: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::owned_pokemon_types::Entity")]
    OwnedPokemonTypes,
}

impl Related<super::owned_pokemon_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnedPokemonTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
