use super::*;

/// Tests closing an open ticket: status flips, closed_at and transcript are
/// set.
#[tokio::test]
async fn closes_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    TicketFactory::new(db, "1", 1).build().await?;

    let repo = TicketRepository::new(db);
    let closed = repo
        .close(1, 1, Some("Ticket #1 closed by tester".to_string()))
        .await?
        .unwrap();

    assert_eq!(closed.status, TicketStatus::Closed);
    assert!(closed.closed_at.is_some());
    assert_eq!(
        closed.transcript.as_deref(),
        Some("Ticket #1 closed by tester")
    );

    Ok(())
}

/// Tests that closing an already-closed ticket does not error, leaves the
/// status closed and keeps the original closed_at.
#[tokio::test]
async fn double_close_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    TicketFactory::new(db, "1", 1).build().await?;

    let repo = TicketRepository::new(db);
    let first = repo.close(1, 1, None).await?.unwrap();
    let second = repo.close(1, 1, None).await?.unwrap();

    assert_eq!(second.status, TicketStatus::Closed);
    assert_eq!(second.closed_at, first.closed_at);

    Ok(())
}

/// Tests that closing a nonexistent ticket returns None.
#[tokio::test]
async fn missing_ticket_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(TicketRepository::new(db).close(1, 99, None).await?.is_none());

    Ok(())
}
