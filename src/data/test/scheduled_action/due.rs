use super::*;

/// Tests that only actions whose time has passed are due, oldest first.
#[tokio::test]
async fn returns_due_actions_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ScheduledAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ScheduledActionFactory::new(db, "1", 1)
        .execute_at(Utc::now() - Duration::minutes(5))
        .build()
        .await?;
    ScheduledActionFactory::new(db, "1", 2)
        .execute_at(Utc::now() - Duration::minutes(30))
        .build()
        .await?;
    ScheduledActionFactory::new(db, "1", 3)
        .execute_at(Utc::now() + Duration::hours(1))
        .build()
        .await?;

    let due = ScheduledActionRepository::new(db).due(Utc::now()).await?;
    let case_ids: Vec<i32> = due.iter().map(|action| action.case_id).collect();
    assert_eq!(case_ids, vec![2, 1]);

    Ok(())
}

/// A pending reversal written before a "restart" is still found due by a
/// fresh repository over the same database: the schedule is durable, unlike
/// an in-process timer.
#[tokio::test]
async fn pending_actions_survive_restart() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ScheduledAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ScheduledActionRepository::new(db)
        .schedule(
            1,
            42,
            ScheduledActionKind::Unban,
            7,
            Utc::now() - Duration::seconds(1),
        )
        .await?;

    // A new repository instance models the post-restart process.
    let after_restart = ScheduledActionRepository::new(db);
    let due = after_restart.due(Utc::now()).await?;
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].case_id, 7);
    assert_eq!(due[0].kind, ScheduledActionKind::Unban);

    Ok(())
}

/// Tests that executed actions are removed from the schedule.
#[tokio::test]
async fn delete_removes_action() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ScheduledAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let action = ScheduledActionFactory::new(db, "1", 1).build().await?;

    let repo = ScheduledActionRepository::new(db);
    repo.delete(action.id).await?;
    assert!(repo.due(Utc::now()).await?.is_empty());

    Ok(())
}
