use super::*;

/// Tests that the open-ticket lookup ignores closed tickets.
#[tokio::test]
async fn finds_only_open_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    TicketFactory::new(db, "1", 1).user_id("42").closed().build().await?;
    TicketFactory::new(db, "1", 2).user_id("42").build().await?;

    let repo = TicketRepository::new(db);
    let open = repo.find_open_by_user(1, 42).await?.unwrap();
    assert_eq!(open.ticket_id, 2);

    repo.close(1, 2, None).await?;
    assert!(repo.find_open_by_user(1, 42).await?.is_none());

    Ok(())
}

/// Tests the channel lookup used by the close/claim buttons.
#[tokio::test]
async fn finds_by_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    TicketFactory::new(db, "1", 1).channel_id("987654321").build().await?;

    let repo = TicketRepository::new(db);
    assert!(repo.find_by_channel(987654321).await?.is_some());
    assert!(repo.find_by_channel(111111111).await?.is_none());

    Ok(())
}
