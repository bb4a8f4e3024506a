use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnedPokemonTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OwnedPokemonTypes::OwnedPokemonId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OwnedPokemonTypes::TypeDescriptorId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(OwnedPokemonTypes::OwnedPokemonId)
                            .col(OwnedPokemonTypes::TypeDescriptorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OwnedPokemonTypes::Table, OwnedPokemonTypes::OwnedPokemonId)
                            .to(OwnedPokemon::Table, OwnedPokemon::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                OwnedPokemonTypes::Table,
                                OwnedPokemonTypes::TypeDescriptorId,
                            )
                            .to(TypeDescriptors::Table, TypeDescriptors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OwnedPokemonTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OwnedPokemonTypes {
    Table,
    OwnedPokemonId,
    TypeDescriptorId,
}

#[derive(Iden)]
enum OwnedPokemon {
    Table,
    Id,
}

#[derive(Iden)]
enum TypeDescriptors {
    Table,
    Id,
}
