use super::*;

/// Tests creating and replacing a channel's sticky.
#[tokio::test]
async fn upserts_sticky() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StickyMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = StickyRepository::new(db);

    let sticky = repo
        .upsert(1, 100, "Read the rules".to_string(), None)
        .await?;
    assert!(sticky.enabled);
    assert_eq!(sticky.content, "Read the rules");

    let replaced = repo
        .upsert(1, 100, "New content".to_string(), None)
        .await?;
    assert_eq!(replaced.id, sticky.id);
    assert_eq!(replaced.content, "New content");

    Ok(())
}

/// Tests that replacing a disabled sticky re-enables it.
#[tokio::test]
async fn upsert_reenables_disabled_sticky() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StickyMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    StickyFactory::new(db, "1")
        .channel_id("100")
        .disabled()
        .build()
        .await?;

    let repo = StickyRepository::new(db);
    let sticky = repo.upsert(1, 100, "Back".to_string(), None).await?;
    assert!(sticky.enabled);

    Ok(())
}

/// Tests repost bookkeeping and deletion.
#[tokio::test]
async fn tracks_message_id_and_deletes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StickyMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    StickyFactory::new(db, "1").channel_id("100").build().await?;

    let repo = StickyRepository::new(db);
    repo.set_message_id(100, 555).await?;
    let sticky = repo.find_by_channel(100).await?.unwrap();
    assert_eq!(sticky.message_id.as_deref(), Some("555"));

    assert!(repo.delete(100).await?);
    assert!(!repo.delete(100).await?);
    assert!(repo.find_by_channel(100).await?.is_none());

    Ok(())
}
