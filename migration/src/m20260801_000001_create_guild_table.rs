use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guild::Table)
                    .if_not_exists()
                    .col(pk_auto(Guild::Id))
                    .col(string_uniq(Guild::GuildId))
                    .col(string(Guild::Prefix).default("!"))
                    .col(json(Guild::ModulesEnabled))
                    .col(json(Guild::Settings))
                    .col(string_null(Guild::WelcomeChannel))
                    .col(text_null(Guild::WelcomeMessage))
                    .col(json_null(Guild::WelcomeEmbed))
                    .col(string_null(Guild::TicketCategory))
                    .col(text_null(Guild::TicketMessage))
                    .col(boolean(Guild::Premium).default(false))
                    .col(
                        timestamp(Guild::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Guild::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guild::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Guild {
    Table,
    Id,
    GuildId,
    Prefix,
    ModulesEnabled,
    Settings,
    WelcomeChannel,
    WelcomeMessage,
    WelcomeEmbed,
    TicketCategory,
    TicketMessage,
    Premium,
    CreatedAt,
    UpdatedAt,
}
