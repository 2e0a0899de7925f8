use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModerationCase::Table)
                    .if_not_exists()
                    .col(pk_auto(ModerationCase::Id))
                    .col(string(ModerationCase::GuildId))
                    .col(integer(ModerationCase::CaseId))
                    .col(string(ModerationCase::UserId))
                    .col(string(ModerationCase::ModeratorId))
                    .col(string(ModerationCase::Kind))
                    .col(text_null(ModerationCase::Reason))
                    .col(big_integer_null(ModerationCase::DurationMs))
                    .col(boolean(ModerationCase::Active).default(true))
                    .col(
                        timestamp(ModerationCase::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_moderation_case_guild_case")
                    .table(ModerationCase::Table)
                    .col(ModerationCase::GuildId)
                    .col(ModerationCase::CaseId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModerationCase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ModerationCase {
    Table,
    Id,
    GuildId,
    CaseId,
    UserId,
    ModeratorId,
    Kind,
    Reason,
    DurationMs,
    Active,
    CreatedAt,
}
