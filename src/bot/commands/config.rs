//! Guild configuration commands.

use std::time::Duration;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommandOption, Permissions,
};
use serenity::async_trait;

use crate::{
    bot::{
        commands::{reply_text, string_option},
        Services,
    },
    data::guild::GuildRepository,
    dispatch::{Command, CommandSpec, ModuleCategory},
    error::AppError,
    realtime::GuildUpdateKind,
};

pub struct PrefixCommand;

static PREFIX_SPEC: CommandSpec = CommandSpec {
    name: "prefix",
    description: "Set the legacy command prefix for this server",
    category: ModuleCategory::Config,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::MANAGE_GUILD,
    bot_permissions: Permissions::empty(),
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for PrefixCommand {
    fn spec(&self) -> &'static CommandSpec {
        &PREFIX_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![CreateCommandOption::new(
            CommandOptionType::String,
            "prefix",
            "New prefix (1-5 characters)",
        )
        .required(true)]
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let Some(guild_id) = interaction.guild_id else {
            return Ok(());
        };
        let Some(prefix) = string_option(interaction, "prefix") else {
            return reply_text(ctx, interaction, "❌ Please provide a prefix!", true).await;
        };

        if prefix.is_empty() || prefix.len() > 5 || prefix.contains(char::is_whitespace) {
            return reply_text(
                ctx,
                interaction,
                "❌ The prefix must be 1-5 characters with no spaces.",
                true,
            )
            .await;
        }

        GuildRepository::new(&services.db)
            .set_prefix(guild_id.get(), prefix.to_string())
            .await?;

        services
            .broadcaster
            .guild_update(guild_id.get(), GuildUpdateKind::SettingsUpdated);

        reply_text(
            ctx,
            interaction,
            format!("✅ Prefix updated to `{}`", prefix),
            false,
        )
        .await
    }
}
