use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::guild::GuildFactory};

use crate::dispatch::module::{ModuleCategory, ModuleGate};

/// A guild with no stored settings has every toggleable module disabled.
#[tokio::test]
async fn no_settings_is_fail_closed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let gate = ModuleGate::new(db);
    assert!(!gate.enabled(1, ModuleCategory::Moderation).await?);
    assert!(!gate.enabled(1, ModuleCategory::Ai).await?);

    Ok(())
}

/// A settings row without the key is still disabled.
#[tokio::test]
async fn missing_key_is_fail_closed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildFactory::new(db)
        .guild_id("1")
        .module("ai", true)
        .build()
        .await?;

    let gate = ModuleGate::new(db);
    assert!(!gate.enabled(1, ModuleCategory::Moderation).await?);
    assert!(gate.enabled(1, ModuleCategory::Ai).await?);

    Ok(())
}

/// An explicitly enabled module passes the gate; disabling it again closes
/// the gate.
#[tokio::test]
async fn respects_stored_toggle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildFactory::new(db)
        .guild_id("1")
        .module("moderation", true)
        .build()
        .await?;
    GuildFactory::new(db)
        .guild_id("2")
        .module("moderation", false)
        .build()
        .await?;

    let gate = ModuleGate::new(db);
    assert!(gate.enabled(1, ModuleCategory::Moderation).await?);
    assert!(!gate.enabled(2, ModuleCategory::Moderation).await?);

    Ok(())
}

/// Baseline categories bypass stored settings entirely.
#[tokio::test]
async fn always_enabled_categories_bypass_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let gate = ModuleGate::new(db);
    assert!(gate.enabled(1, ModuleCategory::Utility).await?);
    assert!(gate.enabled(1, ModuleCategory::Music).await?);
    assert!(gate.enabled(1, ModuleCategory::Dev).await?);

    Ok(())
}

/// Every category key round-trips through `from_key`.
#[test]
fn category_keys_round_trip() {
    for category in ModuleCategory::ALL {
        assert_eq!(ModuleCategory::from_key(category.key()), Some(category));
    }
    assert_eq!(ModuleCategory::from_key("leveling"), None);
}
