use sea_orm::entity::prelude::*;

/// Link between an owned Pokémon and a type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "owned_pokemon_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub owned_pokemon_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub type_descriptor_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owned_pokemon::Entity",
        from = "Column::OwnedPokemonId",
        to = "super::owned_pokemon::Column::Id"
    )]
    OwnedPokemon,
    #[sea_orm(
        belongs_to = "super::type_descriptors::Entity",
        from = "Column::TypeDescriptorId",
        to = "super::type_descriptors::Column::Id"
    )]
    TypeDescriptor,
}

impl Related<super::owned_pokemon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnedPokemon.def()
    }
}

impl Related<super::type_descriptors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TypeDescriptor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
