//! Moderation commands: each records a case through the moderation service
//! and reports it back with the case embed.

use std::time::Duration;

use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommandOption, CreateEmbed,
    GuildId, Permissions, Timestamp, User,
};
use serenity::async_trait;

use crate::{
    bot::{
        commands::{reply_embed, reply_text, string_option, user_option},
        Services,
    },
    dispatch::{Command, CommandSpec, ModuleCategory},
    error::AppError,
    service::moderation::{ModerationService, SanctionOutcome},
    util::duration::{format_duration, parse_duration},
};

/// Embed summarizing a freshly created case.
fn case_embed(
    case: &entity::moderation_case::Model,
    user: &User,
    moderator: &User,
) -> CreateEmbed {
    CreateEmbed::new()
        .colour(Colour::new(0xFEE75C))
        .title(format!(
            "Case #{} | {}",
            case.case_id,
            case.kind.as_str().to_uppercase()
        ))
        .field("User", format!("{} ({})", user.tag(), user.id), true)
        .field("Moderator", moderator.tag(), true)
        .field(
            "Reason",
            case.reason.as_deref().unwrap_or("No reason provided"),
            false,
        )
        .timestamp(Timestamp::now())
}

/// Appends the DM-delivery footnote when the subject could not be notified.
fn with_dm_note(embed: CreateEmbed, outcome: &SanctionOutcome) -> CreateEmbed {
    if outcome.dm.delivered() {
        embed
    } else {
        embed.field("Note", "Could not DM the user", false)
    }
}

/// Sanity checks shared by the sanction commands: no self/bot targeting,
/// and the actor must outrank the target when the target is still a member.
///
/// # Returns
/// - `Ok(None)` - Target is acceptable
/// - `Ok(Some(message))` - Rejection message to show the invoker
async fn check_target(
    ctx: &Context,
    interaction: &CommandInteraction,
    guild_id: GuildId,
    user: &User,
    verb: &str,
) -> Result<Option<String>, AppError> {
    if user.id == interaction.user.id {
        return Ok(Some(format!("❌ You cannot {} yourself!", verb)));
    }
    if user.id == ctx.cache.current_user().id {
        return Ok(Some(format!("❌ I cannot {} myself!", verb)));
    }

    // Hierarchy only applies while the target is still a member.
    let Ok(target_member) = guild_id.member(ctx, user.id).await else {
        return Ok(None);
    };
    let Some(actor_member) = interaction.member.as_deref() else {
        return Ok(None);
    };

    let outranked = {
        let Some(guild) = guild_id.to_guild_cached(&ctx.cache) else {
            return Ok(None);
        };
        let position = |member: &serenity::all::Member| {
            member
                .roles
                .iter()
                .filter_map(|role_id| guild.roles.get(role_id))
                .map(|role| role.position)
                .max()
                .unwrap_or(0)
        };
        position(&target_member) >= position(actor_member)
    };

    if outranked {
        return Ok(Some(format!("❌ You cannot {} this user!", verb)));
    }

    Ok(None)
}

fn guild_name(ctx: &Context, guild_id: GuildId) -> String {
    guild_id
        .to_guild_cached(&ctx.cache)
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| "this server".to_string())
}

pub struct WarnCommand;

static WARN_SPEC: CommandSpec = CommandSpec {
    name: "warn",
    description: "Warn a user",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::MODERATE_MEMBERS,
    bot_permissions: Permissions::empty(),
    aliases: &[],
    prefix_enabled: true,
};

#[async_trait]
impl Command for WarnCommand {
    fn spec(&self) -> &'static CommandSpec {
        &WARN_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![
            CreateCommandOption::new(CommandOptionType::User, "user", "User to warn")
                .required(true),
            CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for warning"),
        ]
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
        let Some(user) = user_option(interaction, "user") else {
            return reply_text(ctx, interaction, "❌ Please specify a user to warn!", true).await;
        };
        let user = user.clone();
        let reason = string_option(interaction, "reason").map(str::to_string);

        if let Some(message) = check_target(ctx, interaction, guild_id, &user, "warn").await? {
            return reply_text(ctx, interaction, message, true).await;
        }

        let outcome = ModerationService::new(&services.db, &services.broadcaster)
            .warn(
                &ctx.http,
                guild_id,
                &guild_name(ctx, guild_id),
                &user,
                &interaction.user,
                reason,
            )
            .await?;

        let embed = with_dm_note(case_embed(&outcome.case, &user, &interaction.user), &outcome);
        reply_embed(ctx, interaction, embed).await
    }

    async fn prefix_run(
        &self,
        ctx: &Context,
        services: &Services,
        message: &serenity::all::Message,
        args: &[&str],
    ) -> Result<(), AppError> {
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };
        let Some(user) = message.mentions.first().cloned() else {
            message
                .reply(&ctx.http, "❌ Please mention a user to warn!")
                .await?;
            return Ok(());
        };

        let reason = if args.len() > 1 {
            Some(args[1..].join(" "))
        } else {
            None
        };

        let outcome = ModerationService::new(&services.db, &services.broadcaster)
            .warn(
                &ctx.http,
                guild_id,
                &guild_name(ctx, guild_id),
                &user,
                &message.author,
                reason,
            )
            .await?;

        let embed = with_dm_note(case_embed(&outcome.case, &user, &message.author), &outcome);
        message
            .channel_id
            .send_message(&ctx.http, serenity::all::CreateMessage::new().embed(embed))
            .await?;
        Ok(())
    }
}

pub struct KickCommand;

static KICK_SPEC: CommandSpec = CommandSpec {
    name: "kick",
    description: "Kick a user from the server",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::KICK_MEMBERS,
    bot_permissions: Permissions::KICK_MEMBERS,
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for KickCommand {
    fn spec(&self) -> &'static CommandSpec {
        &KICK_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![
            CreateCommandOption::new(CommandOptionType::User, "user", "User to kick")
                .required(true),
            CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for kick"),
        ]
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
        let Some(user) = user_option(interaction, "user") else {
            return reply_text(ctx, interaction, "❌ Please specify a user to kick!", true).await;
        };
        let user = user.clone();
        let reason = string_option(interaction, "reason").map(str::to_string);

        if let Some(message) = check_target(ctx, interaction, guild_id, &user, "kick").await? {
            return reply_text(ctx, interaction, message, true).await;
        }

        let outcome = ModerationService::new(&services.db, &services.broadcaster)
            .kick(
                &ctx.http,
                guild_id,
                &guild_name(ctx, guild_id),
                &user,
                &interaction.user,
                reason,
            )
            .await?;

        let embed = with_dm_note(case_embed(&outcome.case, &user, &interaction.user), &outcome);
        reply_embed(ctx, interaction, embed).await
    }
}

pub struct MuteCommand;

static MUTE_SPEC: CommandSpec = CommandSpec {
    name: "mute",
    description: "Timeout a user",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::MODERATE_MEMBERS,
    bot_permissions: Permissions::MODERATE_MEMBERS,
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for MuteCommand {
    fn spec(&self) -> &'static CommandSpec {
        &MUTE_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![
            CreateCommandOption::new(CommandOptionType::User, "user", "User to mute")
                .required(true),
            CreateCommandOption::new(
                CommandOptionType::String,
                "duration",
                "Mute duration (e.g., 10m, 1h, 1d)",
            )
            .required(true),
            CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for mute"),
        ]
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
        let Some(user) = user_option(interaction, "user") else {
            return reply_text(ctx, interaction, "❌ Please specify a user to mute!", true).await;
        };
        let user = user.clone();
        let reason = string_option(interaction, "reason").map(str::to_string);

        let Some(duration) = string_option(interaction, "duration").and_then(parse_duration)
        else {
            return reply_text(
                ctx,
                interaction,
                "❌ Invalid duration format! Use: 10m, 1h, 1d, etc.",
                true,
            )
            .await;
        };

        if let Some(message) = check_target(ctx, interaction, guild_id, &user, "mute").await? {
            return reply_text(ctx, interaction, message, true).await;
        }

        let outcome = ModerationService::new(&services.db, &services.broadcaster)
            .mute(
                &ctx.http,
                guild_id,
                &guild_name(ctx, guild_id),
                &user,
                &interaction.user,
                reason,
                duration,
            )
            .await?;

        let embed = with_dm_note(case_embed(&outcome.case, &user, &interaction.user), &outcome)
            .field("Duration", format_duration(duration), true);
        reply_embed(ctx, interaction, embed).await
    }
}

pub struct UnmuteCommand;

static UNMUTE_SPEC: CommandSpec = CommandSpec {
    name: "unmute",
    description: "Remove a user's timeout",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::MODERATE_MEMBERS,
    bot_permissions: Permissions::MODERATE_MEMBERS,
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for UnmuteCommand {
    fn spec(&self) -> &'static CommandSpec {
        &UNMUTE_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![CreateCommandOption::new(CommandOptionType::User, "user", "User to unmute")
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
        let Some(user) = user_option(interaction, "user") else {
            return reply_text(ctx, interaction, "❌ Please specify a user to unmute!", true)
                .await;
        };
        let user = user.clone();

        ModerationService::new(&services.db, &services.broadcaster)
            .unmute(&ctx.http, guild_id, user.id.get())
            .await?;

        reply_text(
            ctx,
            interaction,
            format!("✅ {} has been unmuted.", user.tag()),
            false,
        )
        .await
    }
}

pub struct BanCommand;

static BAN_SPEC: CommandSpec = CommandSpec {
    name: "ban",
    description: "Ban a user from the server",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::BAN_MEMBERS,
    bot_permissions: Permissions::BAN_MEMBERS,
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for BanCommand {
    fn spec(&self) -> &'static CommandSpec {
        &BAN_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![
            CreateCommandOption::new(CommandOptionType::User, "user", "User to ban")
                .required(true),
            CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for ban"),
            CreateCommandOption::new(
                CommandOptionType::String,
                "duration",
                "Ban duration (e.g., 7d, 30d) - leave empty for permanent",
            ),
        ]
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
        let Some(user) = user_option(interaction, "user") else {
            return reply_text(ctx, interaction, "❌ Please specify a user to ban!", true).await;
        };
        let user = user.clone();
        let reason = string_option(interaction, "reason").map(str::to_string);

        let duration = match string_option(interaction, "duration") {
            Some(raw) => match parse_duration(raw) {
                Some(duration) => Some(duration),
                None => {
                    return reply_text(
                        ctx,
                        interaction,
                        "❌ Invalid duration format! Use: 1h, 7d, 30d, etc.",
                        true,
                    )
                    .await;
                }
            },
            None => None,
        };

        if let Some(message) = check_target(ctx, interaction, guild_id, &user, "ban").await? {
            return reply_text(ctx, interaction, message, true).await;
        }

        let outcome = ModerationService::new(&services.db, &services.broadcaster)
            .ban(
                &ctx.http,
                guild_id,
                &guild_name(ctx, guild_id),
                &user,
                &interaction.user,
                reason,
                duration,
            )
            .await?;

        let mut embed =
            with_dm_note(case_embed(&outcome.case, &user, &interaction.user), &outcome);
        if let Some(duration) = duration {
            embed = embed.field("Duration", format_duration(duration), true);
        }
        reply_embed(ctx, interaction, embed).await
    }
}

pub struct UnbanCommand;

static UNBAN_SPEC: CommandSpec = CommandSpec {
    name: "unban",
    description: "Unban a user by their id",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::BAN_MEMBERS,
    bot_permissions: Permissions::BAN_MEMBERS,
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for UnbanCommand {
    fn spec(&self) -> &'static CommandSpec {
        &UNBAN_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![CreateCommandOption::new(
            CommandOptionType::String,
            "user_id",
            "Id of the user to unban",
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
        let Some(user_id) = string_option(interaction, "user_id")
            .and_then(|raw| raw.parse::<u64>().ok())
        else {
            return reply_text(ctx, interaction, "❌ Please provide a valid user id!", true)
                .await;
        };

        ModerationService::new(&services.db, &services.broadcaster)
            .unban(&ctx.http, guild_id, user_id)
            .await?;

        reply_text(ctx, interaction, format!("✅ <@{}> has been unbanned.", user_id), false)
            .await
    }
}

pub struct CasesCommand;

static CASES_SPEC: CommandSpec = CommandSpec {
    name: "cases",
    description: "List a user's moderation cases",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::MODERATE_MEMBERS,
    bot_permissions: Permissions::empty(),
    aliases: &["history"],
    prefix_enabled: true,
};

#[async_trait]
impl Command for CasesCommand {
    fn spec(&self) -> &'static CommandSpec {
        &CASES_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![CreateCommandOption::new(
            CommandOptionType::User,
            "user",
            "User whose cases to list",
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
        let Some(user) = user_option(interaction, "user") else {
            return reply_text(ctx, interaction, "❌ Please specify a user!", true).await;
        };
        let user = user.clone();

        let cases = ModerationService::new(&services.db, &services.broadcaster)
            .cases_for_user(guild_id.get(), user.id.get())
            .await?;

        if cases.is_empty() {
            return reply_text(
                ctx,
                interaction,
                format!("✅ {} has no moderation cases.", user.tag()),
                false,
            )
            .await;
        }

        let lines: Vec<String> = cases
            .iter()
            .take(15)
            .map(|case| {
                format!(
                    "`#{}` **{}**{} - {}",
                    case.case_id,
                    case.kind.as_str(),
                    if case.active { "" } else { " (inactive)" },
                    case.reason.as_deref().unwrap_or("No reason provided")
                )
            })
            .collect();

        let embed = CreateEmbed::new()
            .colour(Colour::new(0x5865F2))
            .title(format!("Cases for {} ({} total)", user.tag(), cases.len()))
            .description(lines.join("\n"))
            .timestamp(Timestamp::now());

        reply_embed(ctx, interaction, embed).await
    }
}
