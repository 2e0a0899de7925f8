use std::time::Duration;

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateCommandOption, Message, Permissions,
};
use serenity::async_trait;

use crate::{bot::Services, dispatch::module::ModuleCategory, error::AppError};

/// Static declaration of a command: everything the dispatcher needs to gate
/// and register it, independent of the handler logic.
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub category: ModuleCategory,
    /// Minimum interval between uses by the same user.
    pub cooldown: Duration,
    /// Permissions the invoking member must hold.
    pub user_permissions: Permissions,
    /// Permissions the bot member must hold.
    pub bot_permissions: Permissions,
    /// Alternate names accepted on the prefix surface.
    pub aliases: &'static [&'static str],
    /// Whether the command is reachable through the legacy prefix surface.
    pub prefix_enabled: bool,
}

/// How an invocation arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    Slash,
    Prefix,
}

/// A normalized invocation, carrying exactly the data the gates need.
/// Building one is the event handler's job; gating never touches Discord.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub kind: InvocationKind,
    pub command: String,
    pub guild_id: u64,
    pub user_id: u64,
    pub member_permissions: Permissions,
    pub bot_permissions: Permissions,
}

/// A command handler. Implementations declare their spec statically and
/// receive the shared services plus the raw Discord objects for replying.
#[async_trait]
pub trait Command: Send + Sync {
    fn spec(&self) -> &'static CommandSpec;

    /// Option schema registered with Discord alongside the slash command.
    fn options(&self) -> Vec<CreateCommandOption> {
        Vec::new()
    }

    /// Builds the slash-command registration payload from the declaration.
    fn build(&self) -> CreateCommand {
        let spec = self.spec();
        let mut command = CreateCommand::new(spec.name).description(spec.description);
        if !spec.user_permissions.is_empty() {
            command = command.default_member_permissions(spec.user_permissions);
        }
        for option in self.options() {
            command = command.add_option(option);
        }
        command
    }

    async fn slash_run(
        &self,
        ctx: &Context,
        services: &Services,
        interaction: &CommandInteraction,
    ) -> Result<(), AppError>;

    /// Prefix-surface entry point. Only called when `spec().prefix_enabled`;
    /// the default is a no-op so slash-only commands need not implement it.
    async fn prefix_run(
        &self,
        ctx: &Context,
        services: &Services,
        message: &Message,
        args: &[&str],
    ) -> Result<(), AppError> {
        let _ = (ctx, services, message, args);
        Ok(())
    }
}
