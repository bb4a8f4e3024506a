use sea_orm::entity::prelude::*;

/// Registered account. `password_hash` holds an argon2 PHC string.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub login: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::owned_pokemon::Entity")]
    OwnedPokemon,
}

impl Related<super::owned_pokemon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnedPokemon.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
