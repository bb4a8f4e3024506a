use sea_orm::entity::prelude::*;

/// One Pokémon in a user's personal collection.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "owned_pokemon")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub species_code: String,
    pub name: String,
    pub image_url: Option<String>,
    pub in_battle_team: bool,
    pub favorite: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::owned_pokemon_types::Entity")]
    OwnedPokemonTypes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::owned_pokemon_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnedPokemonTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
