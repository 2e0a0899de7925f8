use std::sync::Arc;
use std::time::Duration;

use serenity::all::{CommandInteraction, Context, Permissions};
use serenity::async_trait;

use crate::{
    bot::Services,
    dispatch::{
        command::{Command, CommandSpec, Invocation, InvocationKind},
        registry::CommandRegistry,
        Dispatcher, ModuleCategory, Rejection,
    },
    error::AppError,
};

mod cooldown;
mod dispatcher;
mod module;
mod permission;

/// Handler stub: the gate tests never execute a command body.
struct NoopCommand(&'static CommandSpec);

#[async_trait]
impl Command for NoopCommand {
    fn spec(&self) -> &'static CommandSpec {
        self.0
    }

    async fn slash_run(
        &self,
        _ctx: &Context,
        _services: &Services,
        _interaction: &CommandInteraction,
    ) -> Result<(), AppError> {
        Ok(())
    }
}

static GATED_SPEC: CommandSpec = CommandSpec {
    name: "sanction",
    description: "test sanction command",
    category: ModuleCategory::Moderation,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::BAN_MEMBERS,
    bot_permissions: Permissions::BAN_MEMBERS,
    aliases: &["punish"],
    prefix_enabled: true,
};

static OPEN_SPEC: CommandSpec = CommandSpec {
    name: "open",
    description: "test utility command",
    category: ModuleCategory::Utility,
    cooldown: Duration::from_secs(3),
    user_permissions: Permissions::empty(),
    bot_permissions: Permissions::empty(),
    aliases: &[],
    prefix_enabled: true,
};

fn test_registry() -> Arc<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(NoopCommand(&GATED_SPEC)));
    registry.register(Arc::new(NoopCommand(&OPEN_SPEC)));
    Arc::new(registry)
}

fn test_dispatcher(db: sea_orm::DatabaseConnection) -> Dispatcher {
    Dispatcher::new(
        test_registry(),
        db,
        "http://localhost:3000".to_string(),
        "!".to_string(),
    )
}

fn invocation(command: &str, user_id: u64, held: Permissions, bot: Permissions) -> Invocation {
    Invocation {
        kind: InvocationKind::Slash,
        command: command.to_string(),
        guild_id: 1,
        user_id,
        member_permissions: held,
        bot_permissions: bot,
    }
}
