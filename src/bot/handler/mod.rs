mod interaction;

use std::sync::Arc;

use serenity::all::{
    ActivityData, Command as DiscordCommand, Context, EventHandler, Interaction, Member, Message,
    Ready,
};
use serenity::async_trait;

use crate::{
    bot::Services,
    dispatch::Dispatcher,
    service::{sticky::StickyService, welcome::WelcomeService},
};

/// Discord bot event handler. Owns the dispatcher and shared services; no
/// state lives outside this struct and the database.
pub struct Handler {
    pub dispatcher: Arc<Dispatcher>,
    pub services: Arc<Services>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord.
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);

        ctx.set_activity(Some(ActivityData::custom("/help · steward")));

        let commands: Vec<_> = self
            .dispatcher
            .registry()
            .iter()
            .map(|command| command.build())
            .collect();
        let count = commands.len();

        match DiscordCommand::set_global_commands(&ctx.http, commands).await {
            Ok(_) => tracing::info!("Registered {} global slash commands", count),
            Err(err) => {
                tracing::error!("Failed to register slash commands: {}", err);
                tracing::warn!("Bot will continue without slash commands");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                self.dispatcher
                    .dispatch_slash(&ctx, &self.services, &command)
                    .await;
            }
            Interaction::Component(component) => {
                interaction::handle_component(self, &ctx, component).await;
            }
            _ => {}
        }
    }

    async fn message(&self, ctx: Context, message: Message) {
        if message.author.bot || message.guild_id.is_none() {
            return;
        }

        if let Err(err) = StickyService::new(&self.services.db)
            .handle_message(&ctx.http, &message)
            .await
        {
            tracing::error!("Sticky handling failed: {}", err);
        }

        self.dispatcher
            .dispatch_prefix(&ctx, &self.services, &message)
            .await;
    }

    /// Called when a member joins a guild.
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        let (guild_name, member_count) = {
            match new_member.guild_id.to_guild_cached(&ctx.cache) {
                Some(guild) => (guild.name.clone(), guild.member_count),
                None => ("this server".to_string(), 0),
            }
        };

        if let Err(err) = WelcomeService::new(&self.services.db)
            .handle_member_join(&ctx.http, &new_member, &guild_name, member_count)
            .await
        {
            tracing::error!("Welcome message failed: {}", err);
        }
    }
}
