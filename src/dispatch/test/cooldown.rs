use std::time::Duration;

use crate::dispatch::cooldown::CooldownGate;

const WINDOW: Duration = Duration::from_secs(3);

/// A second invocation inside the window is rejected with the remaining
/// time; after the window elapses a third invocation passes.
#[tokio::test(start_paused = true)]
async fn window_blocks_then_expires() {
    let gate = CooldownGate::new();

    assert!(gate.check_and_arm("ping", 1, WINDOW).is_ok());

    let remaining = gate
        .check_and_arm("ping", 1, WINDOW)
        .expect_err("second use inside the window must be rejected");
    assert!(remaining <= WINDOW);
    assert!(remaining > Duration::ZERO);

    tokio::time::advance(WINDOW + Duration::from_millis(100)).await;

    assert!(gate.check_and_arm("ping", 1, WINDOW).is_ok());
}

/// Windows are per-user: another user is not affected.
#[tokio::test(start_paused = true)]
async fn windows_are_per_user() {
    let gate = CooldownGate::new();

    assert!(gate.check_and_arm("ping", 1, WINDOW).is_ok());
    assert!(gate.check_and_arm("ping", 2, WINDOW).is_ok());
    assert!(gate.check_and_arm("ping", 1, WINDOW).is_err());
}

/// Windows are per-command: the same user may use another command.
#[tokio::test(start_paused = true)]
async fn windows_are_per_command() {
    let gate = CooldownGate::new();

    assert!(gate.check_and_arm("ping", 1, WINDOW).is_ok());
    assert!(gate.check_and_arm("help", 1, WINDOW).is_ok());
}

/// Expired windows are forgotten, keeping the map bounded.
#[tokio::test(start_paused = true)]
async fn expired_windows_are_forgotten() {
    let gate = CooldownGate::new();

    gate.check_and_arm("ping", 1, WINDOW).unwrap();
    assert_eq!(gate.tracked(), 1);

    tokio::time::advance(WINDOW + Duration::from_millis(100)).await;
    // Let the forget task run.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    assert_eq!(gate.tracked(), 0);
}

/// A re-armed window is not wiped early by the previous window's forget
/// timer.
#[tokio::test(start_paused = true)]
async fn rearm_is_not_wiped_by_old_timer() {
    let gate = CooldownGate::new();

    gate.check_and_arm("ping", 1, WINDOW).unwrap();
    tokio::time::advance(WINDOW + Duration::from_millis(100)).await;
    tokio::task::yield_now().await;

    // Re-arm, then advance only past the FIRST window's horizon.
    gate.check_and_arm("ping", 1, WINDOW).unwrap();
    tokio::time::advance(Duration::from_millis(500)).await;
    tokio::task::yield_now().await;

    assert!(gate.check_and_arm("ping", 1, WINDOW).is_err());
}
