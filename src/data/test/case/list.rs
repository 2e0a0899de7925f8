use super::*;

/// Tests that the guild listing is limited and scoped to the guild.
#[tokio::test]
async fn lists_guild_cases() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for case_id in 1..=4 {
        CaseFactory::new(db, "1", case_id).build().await?;
    }
    CaseFactory::new(db, "2", 1).build().await?;

    let repo = CaseRepository::new(db);
    assert_eq!(repo.list_by_guild(1, 50).await?.len(), 4);
    assert_eq!(repo.list_by_guild(1, 2).await?.len(), 2);
    assert_eq!(repo.list_by_guild(2, 50).await?.len(), 1);

    Ok(())
}

/// Tests that the user listing only returns that user's cases.
#[tokio::test]
async fn lists_user_cases() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CaseFactory::new(db, "1", 1).user_id("42").build().await?;
    CaseFactory::new(db, "1", 2).user_id("42").build().await?;
    CaseFactory::new(db, "1", 3).user_id("43").build().await?;

    let cases = CaseRepository::new(db).list_by_user(1, 42).await?;
    assert_eq!(cases.len(), 2);
    assert!(cases.iter().all(|case| case.user_id == "42"));

    Ok(())
}
