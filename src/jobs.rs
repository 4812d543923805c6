use std::time::Duration;

use tokio::sync::watch;

use crate::db;
use crate::state::SharedState;

/// How often locked accounts are swept back open. Mirrors the lockout
/// policy: a lock is temporary and clears on the next sweep.
const UNLOCK_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Periodically unlock locked accounts until shutdown is signaled.
pub async fn run_unlock_job(state: SharedState, mut shutdown: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval(UNLOCK_INTERVAL);
    interval.tick().await; // first tick fires immediately; skip it

    tracing::info!("Account unlock job started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match db::users::unlock_all(&state.pool).await {
                    Ok(0) => {}
                    Ok(n) => tracing::info!("Unlocked {n} account(s)"),
                    Err(e) => tracing::error!("Unlock job error: {e}"),
                }
            }
            res = shutdown.changed() => {
                if res.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!("Account unlock job stopped");
}
