use super::*;

/// Tests prefix updates for new and existing guilds.
#[tokio::test]
async fn sets_prefix() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);

    // First write creates the row.
    let guild = repo.set_prefix(1, "?".to_string()).await?;
    assert_eq!(guild.prefix, "?");

    // Second write updates in place.
    let guild = repo.set_prefix(1, ">>".to_string()).await?;
    assert_eq!(guild.prefix, ">>");
    assert!(repo.find_by_guild_id(1).await?.is_some());

    Ok(())
}

/// Tests that the welcome mode switch stores one body and clears the other.
#[tokio::test]
async fn updates_welcome_configuration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);

    let guild = repo
        .update_welcome(
            1,
            Some("123".to_string()),
            Some("Welcome {user}!".to_string()),
            None,
        )
        .await?;
    assert_eq!(guild.welcome_channel.as_deref(), Some("123"));
    assert_eq!(guild.welcome_message.as_deref(), Some("Welcome {user}!"));

    let embed = serde_json::json!({ "title": "Hi" });
    let guild = repo
        .update_welcome(1, Some("123".to_string()), None, Some(embed.clone()))
        .await?;
    assert!(guild.welcome_message.is_none());
    assert_eq!(guild.welcome_embed, Some(embed));

    Ok(())
}

/// Tests that ticket configuration merges into the settings blob without
/// clobbering unrelated keys.
#[tokio::test]
async fn merges_ticket_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildFactory::new(db)
        .guild_id("1")
        .settings(serde_json::json!({ "panel_message_id": "555" }))
        .build()
        .await?;

    let repo = GuildRepository::new(db);
    let guild = repo
        .update_ticket_config(
            1,
            Some("999".to_string()),
            None,
            serde_json::json!({ "support_roles": ["1", "2"] }),
        )
        .await?;

    assert_eq!(guild.ticket_category.as_deref(), Some("999"));
    assert_eq!(guild.settings["support_roles"][0], "1");
    assert_eq!(guild.settings["panel_message_id"], "555");

    Ok(())
}
