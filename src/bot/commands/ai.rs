//! AI chat commands, backed by the conversation service.

use std::time::Duration;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommandOption,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    Permissions,
};
use serenity::async_trait;

use crate::{
    bot::{
        commands::{reply_text, string_option},
        Services,
    },
    dispatch::{Command, CommandSpec, ModuleCategory},
    error::AppError,
};

/// Discord message length ceiling.
const REPLY_LIMIT: usize = 2000;

pub struct ChatCommand;

static CHAT_SPEC: CommandSpec = CommandSpec {
    name: "chat",
    description: "Chat with the AI assistant",
    category: ModuleCategory::Ai,
    cooldown: Duration::from_secs(5),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for ChatCommand {
    fn spec(&self) -> &'static CommandSpec {
        &CHAT_SPEC
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![CreateCommandOption::new(
            CommandOptionType::String,
            "message",
            "What to say to the assistant",
        )
        .required(true)]
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let Some(message) = string_option(interaction, "message") else {
            return reply_text(ctx, interaction, "❌ Please provide a message!", true).await;
        };

        if !services.ai.available() {
            return reply_text(
                ctx,
                interaction,
                "❌ No AI provider is configured on this bot.",
                true,
            )
            .await;
        }

        // Providers are slow; acknowledge first.
        interaction
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
            )
            .await?;

        let reply = services
            .ai
            .chat(
                interaction.user.id.get(),
                interaction.channel_id.get(),
                interaction.guild_id.map(|id| id.get()),
                message,
            )
            .await?;

        let reply: String = reply.chars().take(REPLY_LIMIT).collect();
        interaction
            .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
            .await?;

        Ok(())
    }
}

pub struct ClearCommand;

static CLEAR_SPEC: CommandSpec = CommandSpec {
    name: "clear",
    description: "Forget your AI conversation in this channel",
    category: ModuleCategory::Ai,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &[],
    prefix_enabled: false,
};

#[async_trait]
impl Command for ClearCommand {
    fn spec(&self) -> &'static CommandSpec {
        &CLEAR_SPEC
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        let cleared = services
            .ai
            .clear(interaction.user.id.get(), interaction.channel_id.get())
            .await?;

        let text = if cleared {
            "🧹 Conversation cleared."
        } else {
            "✅ There was no conversation to clear."
        };
        reply_text(ctx, interaction, text, true).await
    }
}
