//! Command implementations, grouped by category the way they surface in
//! `/help`. `register_all` is the single place a new command is added.

pub mod ai;
pub mod config;
pub mod moderation;
pub mod utility;

use std::sync::Arc;

use serenity::all::{
    CommandInteraction, Context, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, ResolvedValue, User,
};

use crate::{dispatch::registry::CommandRegistry, error::AppError};

/// Registers every command with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(moderation::WarnCommand));
    registry.register(Arc::new(moderation::KickCommand));
    registry.register(Arc::new(moderation::MuteCommand));
    registry.register(Arc::new(moderation::UnmuteCommand));
    registry.register(Arc::new(moderation::BanCommand));
    registry.register(Arc::new(moderation::UnbanCommand));
    registry.register(Arc::new(moderation::CasesCommand));
    registry.register(Arc::new(utility::PingCommand));
    registry.register(Arc::new(utility::HelpCommand));
    registry.register(Arc::new(utility::ServerInfoCommand));
    registry.register(Arc::new(utility::UserInfoCommand));
    registry.register(Arc::new(utility::AvatarCommand));
    registry.register(Arc::new(config::PrefixCommand));
    registry.register(Arc::new(ai::ChatCommand));
    registry.register(Arc::new(ai::ClearCommand));
}

/// Resolved user option by name.
pub fn user_option<'a>(interaction: &'a CommandInteraction, name: &str) -> Option<&'a User> {
    interaction.data.options().into_iter().find_map(|option| {
        if option.name != name {
            return None;
        }
        match option.value {
            ResolvedValue::User(user, _) => Some(user),
            _ => None,
        }
    })
}

/// Resolved string option by name.
pub fn string_option<'a>(interaction: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    interaction.data.options().into_iter().find_map(|option| {
        if option.name != name {
            return None;
        }
        match option.value {
            ResolvedValue::String(value) => Some(value),
            _ => None,
        }
    })
}

/// Plain-text interaction reply.
pub async fn reply_text(
    ctx: &Context,
    interaction: &CommandInteraction,
    text: impl Into<String>,
    ephemeral: bool,
) -> Result<(), AppError> {
    let message = CreateInteractionResponseMessage::new()
        .content(text.into())
        .ephemeral(ephemeral);
    interaction
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

/// Embed interaction reply.
pub async fn reply_embed(
    ctx: &Context,
    interaction: &CommandInteraction,
    embed: CreateEmbed,
) -> Result<(), AppError> {
    let message = CreateInteractionResponseMessage::new().embed(embed);
    interaction
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}
