//! Utility commands. Always enabled regardless of guild module settings.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommandOption, CreateEmbed,
    Permissions, Timestamp,
};
use serenity::async_trait;

use crate::{
    bot::{
        commands::{reply_embed, reply_text, user_option},
        RegistryKey, Services,
    },
    dispatch::{Command, CommandSpec, ModuleCategory},
    error::AppError,
};

/// Milliseconds since a snowflake was minted; the closest thing to a
/// round-trip latency measurement available without a heartbeat probe.
fn snowflake_age_ms(created_at: Timestamp) -> i64 {
    (Utc::now().timestamp_millis() - created_at.unix_timestamp() * 1000).max(0)
}

pub struct PingCommand;

static PING_SPEC: CommandSpec = CommandSpec {
    name: "ping",
    description: "Check the bot's latency",
    category: ModuleCategory::Utility,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &[],
    prefix_enabled: true,
};

#[async_trait]
impl Command for PingCommand {
    fn spec(&self) -> &'static CommandSpec {
        &PING_SPEC
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        _services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let age_ms = snowflake_age_ms(interaction.id.created_at());
        reply_text(ctx, interaction, format!("🏓 Pong! `{}ms`", age_ms), false).await
    }

    async fn prefix_run(
        &self,
        ctx: &Context,
        _services: &Services,
        message: &serenity::all::Message,
        _args: &[&str],
    ) -> Result<(), AppError> {
        let age_ms = snowflake_age_ms(message.id.created_at());
        message
            .reply(&ctx.http, format!("🏓 Pong! `{}ms`", age_ms))
            .await?;
        Ok(())
    }
}

pub struct HelpCommand;

static HELP_SPEC: CommandSpec = CommandSpec {
    name: "help",
    description: "List every command by category",
    category: ModuleCategory::Utility,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &["commands"],
    prefix_enabled: true,
};

#[async_trait]
impl Command for HelpCommand {
    fn spec(&self) -> &'static CommandSpec {
        &HELP_SPEC
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let embed = help_embed(ctx, &services.dashboard_url).await;
        reply_embed(ctx, interaction, embed).await
    }

    async fn prefix_run(
        &self,
        ctx: &Context,
        services: &Services,
        message: &serenity::all::Message,
        _args: &[&str],
    ) -> Result<(), AppError> {
        let embed = help_embed(ctx, &services.dashboard_url).await;
        message
            .channel_id
            .send_message(&ctx.http, serenity::all::CreateMessage::new().embed(embed))
            .await?;
        Ok(())
    }
}

/// Builds the category -> command listing from the registry in context data.
async fn help_embed(ctx: &Context, dashboard_url: &str) -> CreateEmbed {
    let mut by_category: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();

    if let Some(registry) = ctx.data.read().await.get::<RegistryKey>() {
        for command in registry.iter() {
            let spec = command.spec();
            by_category
                .entry(spec.category.key())
                .or_default()
                .push(format!("`/{}` - {}", spec.name, spec.description));
        }
    }

    let mut embed = CreateEmbed::new()
        .colour(Colour::new(0x5865F2))
        .title("📚 Commands")
        .description(format!("Configure modules on the [dashboard]({})", dashboard_url))
        .timestamp(Timestamp::now());

    for (category, mut commands) in by_category {
        commands.sort();
        embed = embed.field(category, commands.join("\n"), false);
    }

    embed
}

pub struct ServerInfoCommand;

static SERVER_INFO_SPEC: CommandSpec = CommandSpec {
    name: "serverinfo",
    description: "Show information about this server",
    category: ModuleCategory::Utility,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for ServerInfoCommand {
    fn spec(&self) -> &'static CommandSpec {
        &SERVER_INFO_SPEC
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        _services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let Some(guild_id) = interaction.guild_id else {
            return Ok(());
        };

        let info = {
            guild_id.to_guild_cached(&ctx.cache).map(|guild| {
                (
                    guild.name.clone(),
                    guild.member_count,
                    guild.channels.len(),
                    guild.roles.len(),
                    guild.owner_id,
                    guild.id.created_at(),
                )
            })
        };

        let Some((name, members, channels, roles, owner_id, created_at)) = info else {
            return reply_text(ctx, interaction, "❌ Server data is not cached yet.", true).await;
        };

        let embed = CreateEmbed::new()
            .colour(Colour::new(0x5865F2))
            .title(name)
            .field("Members", members.to_string(), true)
            .field("Channels", channels.to_string(), true)
            .field("Roles", roles.to_string(), true)
            .field("Owner", format!("<@{}>", owner_id), true)
            .field("Created", format!("<t:{}:D>", created_at.unix_timestamp()), true)
            .timestamp(Timestamp::now());

        reply_embed(ctx, interaction, embed).await
    }
}

pub struct UserInfoCommand;

static USER_INFO_SPEC: CommandSpec = CommandSpec {
    name: "userinfo",
    description: "Show information about a user",
    category: ModuleCategory::Utility,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &["whois"],
    prefix_enabled: false,
};

#[async_trait]
impl Command for UserInfoCommand {
    fn spec(&self) -> &'static CommandSpec {
        &USER_INFO_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![CreateCommandOption::new(
            CommandOptionType::User,
            "user",
            "User to inspect (defaults to you)",
        )]
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        _services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let user = user_option(interaction, "user")
            .cloned()
            .unwrap_or_else(|| interaction.user.clone());

        let mut embed = CreateEmbed::new()
            .colour(Colour::new(0x5865F2))
            .title(user.tag())
            .thumbnail(user.face())
            .field("Id", user.id.to_string(), true)
            .field(
                "Created",
                format!("<t:{}:D>", user.id.created_at().unix_timestamp()),
                true,
            )
            .timestamp(Timestamp::now());

        if let Some(guild_id) = interaction.guild_id {
            if let Ok(member) = guild_id.member(ctx, user.id).await {
                if let Some(joined_at) = member.joined_at {
                    embed = embed.field("Joined", format!("<t:{}:D>", joined_at.unix_timestamp()), true);
                }
                embed = embed.field("Roles", member.roles.len().to_string(), true);
            }
        }

        reply_embed(ctx, interaction, embed).await
    }
}

pub struct AvatarCommand;

static AVATAR_SPEC: CommandSpec = CommandSpec {
    name: "avatar",
    description: "Show a user's avatar",
    category: ModuleCategory::Utility,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &["av"],
    prefix_enabled: false,
};

#[async_trait]
impl Command for AvatarCommand {
    fn spec(&self) -> &'static CommandSpec {
        &AVATAR_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![CreateCommandOption::new(
            CommandOptionType::User,
            "user",
            "User whose avatar to show (defaults to you)",
        )]
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        _services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let user = user_option(interaction, "user")
            .cloned()
            .unwrap_or_else(|| interaction.user.clone());

        let embed = CreateEmbed::new()
            .colour(Colour::new(0x5865F2))
            .title(format!("{}'s avatar", user.tag()))
            .image(user.face());

        reply_embed(ctx, interaction, embed).await
    }
}
