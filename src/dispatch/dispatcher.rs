use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::all::{
    Colour, CommandInteraction, Context, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, CreateMessage, GuildId,
    Message, Permissions, UserId,
};

use crate::{
    bot::Services,
    data::guild::GuildRepository,
    dispatch::{
        command::{Command, Invocation, InvocationKind},
        cooldown::CooldownGate,
        module::{ModuleCategory, ModuleGate},
        permission,
        registry::CommandRegistry,
    },
};

const GENERIC_FAILURE: &str = "❌ An error occurred while executing this command.";

/// Why an invocation was stopped before its handler ran.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// No such command. Slash invocations get a notice; prefix invocations
    /// are silently ignored.
    UnknownCommand { name: String },
    MissingUserPermissions(Vec<String>),
    MissingBotPermissions(Vec<String>),
    OnCooldown {
        command: String,
        remaining: Duration,
    },
    ModuleDisabled { category: ModuleCategory },
    /// A gate could not be evaluated (database failure). Surfaced as the
    /// generic failure notice.
    Internal,
}

impl Rejection {
    /// Short, human-readable message for the invoking user. Never exposes
    /// internals.
    pub fn user_message(&self, dashboard_url: &str) -> String {
        match self {
            Self::UnknownCommand { .. } => "❌ Unknown command.".to_string(),
            Self::MissingUserPermissions(missing) => format!(
                "❌ You need the following permissions: {}",
                missing.join(", ")
            ),
            Self::MissingBotPermissions(missing) => {
                format!("❌ I need the following permissions: {}", missing.join(", "))
            }
            Self::OnCooldown { command, remaining } => format!(
                "⏱️ Please wait {:.1} more seconds before using `{}` again.",
                remaining.as_secs_f32(),
                command
            ),
            Self::ModuleDisabled { category } => format!(
                "🔒 The **{}** module is disabled on this server.\n\nServer administrators can enable it via the dashboard: {}",
                category, dashboard_url
            ),
            Self::Internal => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Terminal state of one invocation's pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Completed,
    Failed,
    Rejected(Rejection),
    /// Not addressed to us (no prefix match, unknown prefix command, or a
    /// command not opted into the prefix surface).
    Ignored,
}

/// Owns all dispatch state: the command registry, the alias table and the
/// cooldown windows. Constructed once at startup and shared by `Arc` with
/// the event handler; handlers never reach for globals.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    cooldowns: CooldownGate,
    db: DatabaseConnection,
    dashboard_url: String,
    default_prefix: String,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        db: DatabaseConnection,
        dashboard_url: String,
        default_prefix: String,
    ) -> Self {
        Self {
            registry,
            cooldowns: CooldownGate::new(),
            db,
            dashboard_url,
            default_prefix,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs the gate pipeline for a normalized invocation.
    ///
    /// Order matches the interaction flow: resolution, actor permissions,
    /// bot permissions, cooldown, module toggle. The cooldown is only armed
    /// once the permission gates pass, so a denied user does not burn their
    /// window.
    ///
    /// # Returns
    /// - `Ok(command)` - All gates passed; the handler may run
    /// - `Err(rejection)` - Terminal for this invocation, no retry
    pub async fn check(&self, invocation: &Invocation) -> Result<Arc<dyn Command>, Rejection> {
        let Some(command) = self.registry.resolve(&invocation.command) else {
            return Err(Rejection::UnknownCommand {
                name: invocation.command.clone(),
            });
        };
        let spec = command.spec();

        let missing =
            permission::missing_permissions(invocation.member_permissions, spec.user_permissions);
        if !missing.is_empty() {
            return Err(Rejection::MissingUserPermissions(missing));
        }

        let missing =
            permission::missing_permissions(invocation.bot_permissions, spec.bot_permissions);
        if !missing.is_empty() {
            return Err(Rejection::MissingBotPermissions(missing));
        }

        if let Err(remaining) =
            self.cooldowns
                .check_and_arm(spec.name, invocation.user_id, spec.cooldown)
        {
            return Err(Rejection::OnCooldown {
                command: spec.name.to_string(),
                remaining,
            });
        }

        let enabled = ModuleGate::new(&self.db)
            .enabled(invocation.guild_id, spec.category)
            .await
            .map_err(|err| {
                tracing::error!("Module gate lookup failed for {}: {}", spec.name, err);
                Rejection::Internal
            })?;
        if !enabled {
            return Err(Rejection::ModuleDisabled {
                category: spec.category,
            });
        }

        Ok(command)
    }

    /// Full pipeline for a slash interaction: normalize, gate, run, catch.
    pub async fn dispatch_slash(
        &self,
        ctx: &Context,
        services: &Services,
        interaction: &CommandInteraction,
    ) -> DispatchOutcome {
        let Some(guild_id) = interaction.guild_id else {
            self.reply_slash(ctx, interaction, "❌ Commands can only be used in a server.")
                .await;
            return DispatchOutcome::Ignored;
        };

        let member_permissions = interaction
            .member
            .as_ref()
            .and_then(|member| member.permissions)
            .unwrap_or_default();
        // Discord attaches the bot's effective permissions to every guild
        // interaction; absent only outside guilds.
        let bot_permissions = interaction.app_permissions.unwrap_or(Permissions::all());

        let invocation = Invocation {
            kind: InvocationKind::Slash,
            command: interaction.data.name.clone(),
            guild_id: guild_id.get(),
            user_id: interaction.user.id.get(),
            member_permissions,
            bot_permissions,
        };

        let command = match self.check(&invocation).await {
            Ok(command) => command,
            Err(rejection) => {
                self.reject_slash(ctx, interaction, &rejection).await;
                return DispatchOutcome::Rejected(rejection);
            }
        };

        tracing::info!(
            invocation_id = interaction.id.get(),
            command = command.spec().name,
            source = ?invocation.kind,
            user_id = invocation.user_id,
            guild_id = invocation.guild_id,
            "dispatching command"
        );

        match command.slash_run(ctx, services, interaction).await {
            Ok(()) => DispatchOutcome::Completed,
            Err(err) => {
                tracing::error!(
                    invocation_id = interaction.id.get(),
                    "Slash command error [{}]: {}",
                    command.spec().name,
                    err
                );
                self.notify_slash_failure(ctx, interaction).await;
                DispatchOutcome::Failed
            }
        }
    }

    /// Full pipeline for a legacy prefix message. Unknown or non-prefix
    /// commands are silently ignored; everything else mirrors the slash
    /// path.
    pub async fn dispatch_prefix(
        &self,
        ctx: &Context,
        services: &Services,
        message: &Message,
    ) -> DispatchOutcome {
        let Some(guild_id) = message.guild_id else {
            return DispatchOutcome::Ignored;
        };

        let prefix = self.guild_prefix(guild_id.get()).await;
        let Some(body) = message.content.strip_prefix(&prefix) else {
            return DispatchOutcome::Ignored;
        };

        let mut parts = body.split_whitespace();
        let Some(name) = parts.next() else {
            return DispatchOutcome::Ignored;
        };
        let name = name.to_lowercase();
        let args: Vec<&str> = parts.collect();

        let Some(resolved) = self.registry.resolve(&name) else {
            return DispatchOutcome::Ignored;
        };
        if !resolved.spec().prefix_enabled {
            return DispatchOutcome::Ignored;
        }

        let member_permissions =
            guild_permissions(ctx, guild_id, message.author.id).await;
        let bot_user = ctx.cache.current_user().id;
        let bot_permissions = guild_permissions(ctx, guild_id, bot_user).await;

        let invocation = Invocation {
            kind: InvocationKind::Prefix,
            command: resolved.spec().name.to_string(),
            guild_id: guild_id.get(),
            user_id: message.author.id.get(),
            member_permissions,
            bot_permissions,
        };

        let command = match self.check(&invocation).await {
            Ok(command) => command,
            Err(rejection) => {
                let text = rejection.user_message(&self.dashboard_url);
                if let Err(err) = message.reply(&ctx.http, text).await {
                    tracing::warn!("Failed to send rejection reply: {}", err);
                }
                return DispatchOutcome::Rejected(rejection);
            }
        };

        tracing::info!(
            invocation_id = message.id.get(),
            command = command.spec().name,
            source = ?invocation.kind,
            user_id = invocation.user_id,
            guild_id = invocation.guild_id,
            "dispatching command"
        );

        match command.prefix_run(ctx, services, message, &args).await {
            Ok(()) => DispatchOutcome::Completed,
            Err(err) => {
                tracing::error!(
                    invocation_id = message.id.get(),
                    "Prefix command error [{}]: {}",
                    command.spec().name,
                    err
                );
                let notice = CreateMessage::new().content(GENERIC_FAILURE);
                if let Err(err) = message.channel_id.send_message(&ctx.http, notice).await {
                    tracing::warn!("Failed to send failure notice: {}", err);
                }
                DispatchOutcome::Failed
            }
        }
    }

    async fn guild_prefix(&self, guild_id: u64) -> String {
        match GuildRepository::new(&self.db).find_by_guild_id(guild_id).await {
            Ok(Some(guild)) if !guild.prefix.is_empty() => guild.prefix,
            Ok(_) => self.default_prefix.clone(),
            Err(err) => {
                tracing::error!("Prefix lookup failed for guild {}: {}", guild_id, err);
                self.default_prefix.clone()
            }
        }
    }

    async fn reject_slash(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
        rejection: &Rejection,
    ) {
        let message = match rejection {
            Rejection::ModuleDisabled { category } => {
                let embed = CreateEmbed::new()
                    .colour(Colour::new(0xFEE75C))
                    .title("🔒 Module Disabled")
                    .description(format!(
                        "The **{}** module is disabled on this server.\n\nServer administrators can enable it via the [Dashboard]({})",
                        category, self.dashboard_url
                    ));
                CreateInteractionResponseMessage::new().embed(embed).ephemeral(true)
            }
            other => CreateInteractionResponseMessage::new()
                .content(other.user_message(&self.dashboard_url))
                .ephemeral(true),
        };

        if let Err(err) = interaction
            .create_response(&ctx.http, CreateInteractionResponse::Message(message))
            .await
        {
            tracing::warn!("Failed to send rejection response: {}", err);
        }
    }

    async fn reply_slash(&self, ctx: &Context, interaction: &CommandInteraction, text: &str) {
        let message = CreateInteractionResponseMessage::new()
            .content(text)
            .ephemeral(true);
        if let Err(err) = interaction
            .create_response(&ctx.http, CreateInteractionResponse::Message(message))
            .await
        {
            tracing::warn!("Failed to send interaction response: {}", err);
        }
    }

    /// Sends the generic failure notice, falling back to a followup when the
    /// handler already responded or deferred.
    async fn notify_slash_failure(&self, ctx: &Context, interaction: &CommandInteraction) {
        let message = CreateInteractionResponseMessage::new()
            .content(GENERIC_FAILURE)
            .ephemeral(true);
        if interaction
            .create_response(&ctx.http, CreateInteractionResponse::Message(message))
            .await
            .is_err()
        {
            let followup = CreateInteractionResponseFollowup::new()
                .content(GENERIC_FAILURE)
                .ephemeral(true);
            if let Err(err) = interaction.create_followup(&ctx.http, followup).await {
                tracing::warn!("Failed to send failure followup: {}", err);
            }
        }
    }
}

/// Effective guild-level permissions for a member, read from the cache.
/// Falls back to no permissions when the guild or member is unavailable.
async fn guild_permissions(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Permissions {
    let member = match guild_id.member(ctx, user_id).await {
        Ok(member) => member,
        Err(err) => {
            tracing::debug!("Member fetch failed for {}: {}", user_id, err);
            return Permissions::empty();
        }
    };

    let Some(guild) = guild_id.to_guild_cached(&ctx.cache) else {
        return Permissions::empty();
    };
    guild.member_permissions(&member)
}
