//! Wall-clock timing around arbitrary operations.

use std::future::Future;
use std::time::Instant;

use tracing::info;

/// Await `fut` and emit a timing event named `operation`.
pub async fn timed<F: Future>(operation: &str, fut: F) -> F::Output {
    let start = Instant::now();
    let output = fut.await;
    info!(operation, elapsed_ms = start.elapsed().as_millis() as u64, "timed");
    output
}

/// Run `f` and emit a timing event named `operation`.
pub fn timed_sync<T>(operation: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let output = f();
    info!(operation, elapsed_ms = start.elapsed().as_millis() as u64, "timed");
    output
}
