use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StickyMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(StickyMessage::Id))
                    .col(string(StickyMessage::GuildId))
                    .col(string_uniq(StickyMessage::ChannelId))
                    .col(text(StickyMessage::Content))
                    .col(json_null(StickyMessage::Embed))
                    .col(string_null(StickyMessage::MessageId))
                    .col(boolean(StickyMessage::Enabled).default(true))
                    .col(
                        timestamp(StickyMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StickyMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StickyMessage {
    Table,
    Id,
    GuildId,
    ChannelId,
    Content,
    Embed,
    MessageId,
    Enabled,
    CreatedAt,
}
