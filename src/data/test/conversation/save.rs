use super::*;

fn window(messages: &[&str]) -> serde_json::Value {
    serde_json::json!(messages
        .iter()
        .enumerate()
        .map(|(i, content)| {
            serde_json::json!({
                "role": if i % 2 == 0 { "user" } else { "assistant" },
                "content": content,
            })
        })
        .collect::<Vec<_>>())
}

/// Tests creating a conversation and accumulating tokens across saves.
#[tokio::test]
async fn saves_and_accumulates_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AiConversation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConversationRepository::new(db);

    let saved = repo
        .save(1, 2, Some(3), window(&["hi", "hello"]), 25, "claude-3-5-sonnet-20241022")
        .await?;
    assert_eq!(saved.tokens_used, 25);
    assert_eq!(saved.guild_id.as_deref(), Some("3"));

    let saved = repo
        .save(1, 2, Some(3), window(&["hi", "hello", "more"]), 40, "claude-3-5-sonnet-20241022")
        .await?;
    assert_eq!(saved.tokens_used, 65);
    assert_eq!(saved.messages.as_array().unwrap().len(), 3);

    Ok(())
}

/// Tests that conversations are keyed by (user, channel).
#[tokio::test]
async fn keyed_by_user_and_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AiConversation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConversationRepository::new(db);
    repo.save(1, 2, None, window(&["a"]), 1, "m").await?;
    repo.save(1, 3, None, window(&["b"]), 1, "m").await?;

    assert!(repo.find(1, 2).await?.is_some());
    assert!(repo.find(1, 3).await?.is_some());
    assert!(repo.find(2, 2).await?.is_none());

    Ok(())
}

/// Tests clearing a conversation.
#[tokio::test]
async fn clears_conversation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AiConversation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConversationRepository::new(db);
    repo.save(1, 2, None, window(&["a"]), 1, "m").await?;

    assert_eq!(repo.clear(1, 2).await?, 1);
    assert!(repo.find(1, 2).await?.is_none());
    assert_eq!(repo.clear(1, 2).await?, 0);

    Ok(())
}
