use super::*;

/// Tests that deactivating flips `active` and nothing else.
#[tokio::test]
async fn deactivates_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CaseFactory::new(db, "7", 1)
        .kind(CaseKind::Ban)
        .build()
        .await?;

    let repo = CaseRepository::new(db);
    repo.deactivate(7, 1).await?;

    let case = repo.find_by_case_id(7, 1).await?.unwrap();
    assert!(!case.active);
    assert_eq!(case.kind, CaseKind::Ban);

    Ok(())
}

/// Tests that deactivating a missing case is a no-op rather than an error.
#[tokio::test]
async fn missing_case_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CaseRepository::new(db).deactivate(7, 99).await?;

    Ok(())
}
