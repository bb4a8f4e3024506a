use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnedPokemon::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OwnedPokemon::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OwnedPokemon::OwnerId).integer().not_null())
                    .col(
                        ColumnDef::new(OwnedPokemon::SpeciesCode)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OwnedPokemon::Name).string_len(100).not_null())
                    .col(ColumnDef::new(OwnedPokemon::ImageUrl).string_len(255))
                    .col(
                        ColumnDef::new(OwnedPokemon::InBattleTeam)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(OwnedPokemon::Favorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OwnedPokemon::Table, OwnedPokemon::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Battle-team counts filter on (owner_id, in_battle_team).
        manager
            .create_index(
                Index::create()
                    .table(OwnedPokemon::Table)
                    .col(OwnedPokemon::OwnerId)
                    .col(OwnedPokemon::InBattleTeam)
                    .name("idx_owned_pokemon_owner_battle_team")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OwnedPokemon::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OwnedPokemon {
    Table,
    Id,
    OwnerId,
    SpeciesCode,
    Name,
    ImageUrl,
    InBattleTeam,
    Favorite,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
