use super::*;

/// Tests that the first warning creates the member row.
#[tokio::test]
async fn first_warning_creates_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Member)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let member = MemberRepository::new(db)
        .record_warning(1, 42, 1, Some("Spamming"))
        .await?;

    assert_eq!(member.warnings, 1);
    let history = member.infractions.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["case_id"], 1);
    assert_eq!(history[0]["reason"], "Spamming");

    Ok(())
}

/// Tests that repeated warnings increment the tally and append history.
#[tokio::test]
async fn repeated_warnings_accumulate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Member)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);
    repo.record_warning(1, 42, 1, None).await?;
    repo.record_warning(1, 42, 2, Some("Again")).await?;
    let member = repo.record_warning(1, 42, 3, None).await?;

    assert_eq!(member.warnings, 3);
    assert_eq!(member.infractions.as_array().unwrap().len(), 3);

    // Another user in the same guild starts fresh.
    let other = repo.record_warning(1, 43, 4, None).await?;
    assert_eq!(other.warnings, 1);

    Ok(())
}
