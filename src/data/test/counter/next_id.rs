use super::*;

/// Tests that the first allocation for a guild returns 1.
///
/// Expected: Ok(1)
#[tokio::test]
async fn first_id_is_one() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CounterRepository::new(db);
    assert_eq!(repo.next_id(1, CounterScope::Case).await?, 1);

    Ok(())
}

/// Tests that serialized allocations yield strictly increasing ids with no
/// gaps, starting at 1.
///
/// Expected: 1, 2, 3, 4, 5
#[tokio::test]
async fn serialized_ids_have_no_gaps() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CounterRepository::new(db);
    for expected in 1..=5 {
        assert_eq!(repo.next_id(42, CounterScope::Case).await?, expected);
    }

    Ok(())
}

/// Tests that the case and ticket scopes count independently.
#[tokio::test]
async fn scopes_are_independent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CounterRepository::new(db);
    assert_eq!(repo.next_id(1, CounterScope::Case).await?, 1);
    assert_eq!(repo.next_id(1, CounterScope::Case).await?, 2);
    assert_eq!(repo.next_id(1, CounterScope::Ticket).await?, 1);

    Ok(())
}

/// Tests that different guilds never share a sequence.
#[tokio::test]
async fn guilds_are_independent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CounterRepository::new(db);
    assert_eq!(repo.next_id(1, CounterScope::Case).await?, 1);
    assert_eq!(repo.next_id(2, CounterScope::Case).await?, 1);
    assert_eq!(repo.next_id(1, CounterScope::Case).await?, 2);

    Ok(())
}

/// Tests that `current` reads without allocating.
#[tokio::test]
async fn current_reflects_last_issued() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CounterRepository::new(db);
    assert_eq!(repo.current(9, CounterScope::Case).await?, 0);
    repo.next_id(9, CounterScope::Case).await?;
    repo.next_id(9, CounterScope::Case).await?;
    assert_eq!(repo.current(9, CounterScope::Case).await?, 2);
    assert_eq!(repo.current(9, CounterScope::Case).await?, 2);

    Ok(())
}
