use super::*;

use test_utils::{builder::TestBuilder, factory::guild::GuildFactory};

async fn dispatcher_with_guild_table() -> (Dispatcher, sea_orm::DatabaseConnection) {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.unwrap();
    (test_dispatcher(db.clone()), db)
}

/// Unknown names are rejected as such, after alias resolution.
#[tokio::test]
async fn unknown_command_is_rejected() {
    let (dispatcher, _db) = dispatcher_with_guild_table().await;

    let result = dispatcher
        .check(&invocation("nope", 1, Permissions::all(), Permissions::all()))
        .await;

    assert!(matches!(
        result.unwrap_err(),
        Rejection::UnknownCommand { name } if name == "nope"
    ));
}

/// Aliases resolve to the canonical command before gating.
#[tokio::test]
async fn alias_resolves_to_canonical_command() {
    let (dispatcher, db) = dispatcher_with_guild_table().await;
    GuildFactory::new(&db)
        .guild_id("1")
        .module("moderation", true)
        .build()
        .await
        .unwrap();

    let command = dispatcher
        .check(&invocation("punish", 1, Permissions::all(), Permissions::all()))
        .await
        .unwrap();

    assert_eq!(command.spec().name, "sanction");
}

/// Missing actor permissions are rejected with the missing names, before
/// any cooldown is armed.
#[tokio::test]
async fn missing_user_permissions_rejected() {
    let (dispatcher, _db) = dispatcher_with_guild_table().await;

    let result = dispatcher
        .check(&invocation("sanction", 1, Permissions::empty(), Permissions::all()))
        .await;

    let Err(Rejection::MissingUserPermissions(missing)) = result else {
        panic!("expected missing user permissions");
    };
    assert_eq!(missing, vec!["Ban Members".to_string()]);

    // The rejection did not arm the cooldown: a retry with permissions
    // reaches the module gate instead of a cooldown rejection.
    let result = dispatcher
        .check(&invocation("sanction", 1, Permissions::all(), Permissions::all()))
        .await;
    assert!(matches!(
        result.unwrap_err(),
        Rejection::ModuleDisabled { .. }
    ));
}

/// Missing bot permissions are rejected separately from actor permissions.
#[tokio::test]
async fn missing_bot_permissions_rejected() {
    let (dispatcher, _db) = dispatcher_with_guild_table().await;

    let result = dispatcher
        .check(&invocation("sanction", 1, Permissions::all(), Permissions::empty()))
        .await;

    assert!(matches!(
        result.unwrap_err(),
        Rejection::MissingBotPermissions(_)
    ));
}

/// The cooldown gate rejects a rapid second invocation with the remaining
/// time, and the window expires.
#[tokio::test(start_paused = true)]
async fn cooldown_applies_between_invocations() {
    let (dispatcher, _db) = dispatcher_with_guild_table().await;
    let ok = invocation("open", 1, Permissions::empty(), Permissions::empty());

    assert!(dispatcher.check(&ok).await.is_ok());

    let result = dispatcher.check(&ok).await;
    let Err(Rejection::OnCooldown { command, remaining }) = result else {
        panic!("expected a cooldown rejection");
    };
    assert_eq!(command, "open");
    assert!(remaining > std::time::Duration::ZERO);

    tokio::time::advance(std::time::Duration::from_millis(3100)).await;
    assert!(dispatcher.check(&ok).await.is_ok());
}

/// A gated category in an unconfigured guild is rejected as
/// module-disabled (fail-closed), and enabling the module opens the gate.
#[tokio::test]
async fn module_gate_fail_closed_until_enabled() {
    let (dispatcher, db) = dispatcher_with_guild_table().await;
    let inv = invocation("sanction", 1, Permissions::all(), Permissions::all());

    let result = dispatcher.check(&inv).await;
    assert!(matches!(
        result.unwrap_err(),
        Rejection::ModuleDisabled {
            category: ModuleCategory::Moderation
        }
    ));

    GuildFactory::new(&db)
        .guild_id("1")
        .module("moderation", true)
        .build()
        .await
        .unwrap();

    // New user id: the first attempt already armed user 1's cooldown.
    let inv = invocation("sanction", 2, Permissions::all(), Permissions::all());
    assert!(dispatcher.check(&inv).await.is_ok());
}

/// Rejection messages are short and human-readable.
#[test]
fn rejection_messages_are_user_facing() {
    let dashboard = "http://localhost:3000";

    let message = Rejection::OnCooldown {
        command: "ping".to_string(),
        remaining: std::time::Duration::from_millis(1500),
    }
    .user_message(dashboard);
    assert!(message.contains("1.5"));
    assert!(message.contains("ping"));

    let message = Rejection::ModuleDisabled {
        category: ModuleCategory::Moderation,
    }
    .user_message(dashboard);
    assert!(message.contains("moderation"));
    assert!(message.contains(dashboard));

    let message =
        Rejection::MissingUserPermissions(vec!["Ban Members".to_string()]).user_message(dashboard);
    assert!(message.contains("Ban Members"));
}
