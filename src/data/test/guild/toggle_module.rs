use super::*;

/// Tests that the first toggle creates the settings row.
#[tokio::test]
async fn creates_row_on_first_toggle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    assert!(repo.find_by_guild_id(1).await?.is_none());

    let guild = repo.toggle_module(1, "moderation", true).await?;
    assert_eq!(guild.modules_enabled["moderation"], true);

    Ok(())
}

/// Tests that toggling updates the existing row and preserves other keys.
#[tokio::test]
async fn updates_existing_row() -> Result<(), DbErr> {
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

    let repo = GuildRepository::new(db);
    let guild = repo.toggle_module(1, "moderation", true).await?;
    assert_eq!(guild.modules_enabled["moderation"], true);
    assert_eq!(guild.modules_enabled["ai"], true);

    let guild = repo.toggle_module(1, "moderation", false).await?;
    assert_eq!(guild.modules_enabled["moderation"], false);

    Ok(())
}
