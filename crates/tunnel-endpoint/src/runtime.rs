//! Shared tokio runtime for blocking callers.
//!
//! Tunnel code often resolves endpoints from plain worker threads. Those
//! calls are driven on this runtime, which is created on first use.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get the shared runtime, creating it if needed.
pub fn get() -> Result<&'static Runtime> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("tunnel-endpoint-dns")
        .enable_all()
        .build()
        .map_err(|e| Error::Config(format!("Failed to create tokio runtime: {e}")))?;

    Ok(RUNTIME.get_or_init(|| runtime))
}

/// Block the current thread on a future using the shared runtime.
///
/// # Panics
///
/// Panics if called from within an async context, like
/// [`Runtime::block_on`].
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    Ok(get()?.block_on(future))
}

/// Spawn a future on the shared runtime.
pub fn spawn<F>(future: F) -> Result<JoinHandle<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    Ok(get()?.spawn(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_is_shared() {
        let first = get().unwrap() as *const Runtime;
        let second = get().unwrap() as *const Runtime;
        assert_eq!(first, second);
    }

    #[test]
    fn test_spawn_and_block_on() {
        let handle = spawn(async { 40 + 2 }).unwrap();
        let value = block_on(handle).unwrap().unwrap();
        assert_eq!(value, 42);
    }
}
