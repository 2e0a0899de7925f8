use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildCounter::Table)
                    .if_not_exists()
                    .col(string(GuildCounter::GuildId))
                    .col(string(GuildCounter::Scope))
                    .col(integer(GuildCounter::Value))
                    .primary_key(
                        Index::create()
                            .col(GuildCounter::GuildId)
                            .col(GuildCounter::Scope),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildCounter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildCounter {
    Table,
    GuildId,
    Scope,
    Value,
}
