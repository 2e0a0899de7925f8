use super::*;

/// Tests that concurrent allocations for the same guild never observe the
/// same id. The increment is a single atomic upsert, so interleaved tasks
/// must each receive a distinct value.
///
/// Expected: 10 allocations produce 10 distinct ids covering 1..=10
#[tokio::test]
async fn concurrent_allocations_never_collide() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let allocations = (0..10).map(|_| async move {
        CounterRepository::new(db).next_id(77, CounterScope::Case).await
    });
    let results = futures::future::join_all(allocations).await;

    let mut ids = results.into_iter().collect::<Result<Vec<i32>, DbErr>>()?;
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 10, "duplicate ids were allocated");
    assert_eq!(ids.first(), Some(&1));
    assert_eq!(ids.last(), Some(&10));

    Ok(())
}

/// Tests that concurrency across different guilds also stays collision-free
/// within each guild.
#[tokio::test]
async fn concurrent_allocations_across_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let allocations = (0..8).map(|i| {
        let guild_id = (i % 2) + 1;
        async move { CounterRepository::new(db).next_id(guild_id, CounterScope::Case).await }
    });
    let results = futures::future::join_all(allocations).await;
    let ids = results.into_iter().collect::<Result<Vec<i32>, DbErr>>()?;

    // 8 allocations over 2 guilds: each guild handed out 1..=4 exactly once.
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 1, 2, 2, 3, 3, 4, 4]);

    Ok(())
}
