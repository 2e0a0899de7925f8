use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

/// Per-(command, user) rate limiting.
///
/// Windows live only in memory; each armed window schedules its own removal
/// so the map stays bounded. Entries are keyed by command name and user id,
/// matching the per-user cooldown the command surface promises.
#[derive(Clone, Default)]
pub struct CooldownGate {
    windows: Arc<Mutex<HashMap<(String, u64), Instant>>>,
}

impl CooldownGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the window for (command, user) and, if it has elapsed, arms a
    /// new one starting now.
    ///
    /// # Returns
    /// - `Ok(())` - No active window; a new one was recorded
    /// - `Err(remaining)` - Still inside the window; time left until it ends
    pub fn check_and_arm(
        &self,
        command: &str,
        user_id: u64,
        window: Duration,
    ) -> Result<(), Duration> {
        let key = (command.to_string(), user_id);
        let now = Instant::now();

        let armed_at = {
            let mut windows = self.windows.lock().unwrap();

            if let Some(started) = windows.get(&key) {
                let expires = *started + window;
                if now < expires {
                    return Err(expires - now);
                }
            }

            windows.insert(key.clone(), now);
            now
        };

        // Forget the record once the window elapses. A newer window start is
        // left alone so a re-arm is never wiped early.
        let windows = self.windows.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(armed_at + window).await;
            let mut windows = windows.lock().unwrap();
            if windows.get(&key) == Some(&armed_at) {
                windows.remove(&key);
            }
        });

        Ok(())
    }

    /// Number of currently tracked windows. Test hook.
    #[cfg(test)]
    pub fn tracked(&self) -> usize {
        self.windows.lock().unwrap().len()
    }
}
