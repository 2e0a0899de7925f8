use super::*;

/// Tests the full allocation + insert flow: sequential case creations for
/// one guild get ids 1, 2, 3 with no gaps.
#[tokio::test]
async fn sequential_cases_get_increasing_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .with_table(entity::prelude::ModerationCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let counters = CounterRepository::new(db);
    let cases = CaseRepository::new(db);

    for expected in 1..=3 {
        let case_id = counters.next_id(1, CounterScope::Case).await?;
        let case = cases
            .create(1, case_id, 10, 20, CaseKind::Warn, None, None)
            .await?;
        assert_eq!(case.case_id, expected);
        assert!(case.active);
    }

    Ok(())
}

/// Tests that a created case stores every field it was given.
#[tokio::test]
async fn stores_all_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let case = CaseRepository::new(db)
        .create(
            5,
            1,
            111,
            222,
            CaseKind::Ban,
            Some("Raiding".to_string()),
            Some(604_800_000),
        )
        .await?;

    assert_eq!(case.guild_id, "5");
    assert_eq!(case.user_id, "111");
    assert_eq!(case.moderator_id, "222");
    assert_eq!(case.kind, CaseKind::Ban);
    assert_eq!(case.reason.as_deref(), Some("Raiding"));
    assert_eq!(case.duration_ms, Some(604_800_000));

    let fetched = CaseRepository::new(db).find_by_case_id(5, 1).await?;
    assert!(fetched.is_some());

    Ok(())
}
