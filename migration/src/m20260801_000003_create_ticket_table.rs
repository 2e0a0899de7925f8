use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string(Ticket::GuildId))
                    .col(integer(Ticket::TicketId))
                    .col(string(Ticket::ChannelId))
                    .col(string(Ticket::UserId))
                    .col(string(Ticket::Category))
                    .col(string(Ticket::Status).default("open"))
                    .col(timestamp_null(Ticket::ClosedAt))
                    .col(text_null(Ticket::Transcript))
                    .col(
                        timestamp(Ticket::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_guild_ticket")
                    .table(Ticket::Table)
                    .col(Ticket::GuildId)
                    .col(Ticket::TicketId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    GuildId,
    TicketId,
    ChannelId,
    UserId,
    Category,
    Status,
    ClosedAt,
    Transcript,
    CreatedAt,
}
