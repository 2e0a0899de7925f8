use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledAction::Table)
                    .if_not_exists()
                    .col(pk_auto(ScheduledAction::Id))
                    .col(string(ScheduledAction::GuildId))
                    .col(string(ScheduledAction::UserId))
                    .col(string(ScheduledAction::Kind))
                    .col(integer(ScheduledAction::CaseId))
                    .col(timestamp(ScheduledAction::ExecuteAt))
                    .col(
                        timestamp(ScheduledAction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scheduled_action_execute_at")
                    .table(ScheduledAction::Table)
                    .col(ScheduledAction::ExecuteAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledAction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduledAction {
    Table,
    Id,
    GuildId,
    UserId,
    Kind,
    CaseId,
    ExecuteAt,
    CreatedAt,
}
