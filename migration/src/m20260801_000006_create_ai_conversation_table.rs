use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiConversation::Table)
                    .if_not_exists()
                    .col(pk_auto(AiConversation::Id))
                    .col(string(AiConversation::UserId))
                    .col(string(AiConversation::ChannelId))
                    .col(string_null(AiConversation::GuildId))
                    .col(json(AiConversation::Messages))
                    .col(integer(AiConversation::TokensUsed).default(0))
                    .col(string(AiConversation::Model))
                    .col(
                        timestamp(AiConversation::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_conversation_user_channel")
                    .table(AiConversation::Table)
                    .col(AiConversation::UserId)
                    .col(AiConversation::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiConversation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AiConversation {
    Table,
    Id,
    UserId,
    ChannelId,
    GuildId,
    Messages,
    TokensUsed,
    Model,
    UpdatedAt,
}
