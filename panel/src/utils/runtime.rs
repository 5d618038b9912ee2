//! Tokio runtime access for confirmation watchers.
//!
//! Watchers are spawned from the event loop, which may or may not be running inside a
//! Tokio context (a game client's UI thread usually is not). [`spawn`] uses the ambient
//! runtime when there is one and a shared lazily built runtime otherwise.

use once_cell::sync::Lazy;
use std::future::Future;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

pub static FALLBACK_RT: Lazy<Runtime> = Lazy::new(|| {
    Runtime::new().expect("Failed to create Tokio runtime for confirmation watchers")
});

pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => handle.spawn(future),
        Err(_) => FALLBACK_RT.spawn(future),
    }
}
