use std::future::Future;

/// Run a future in the background, detached from the caller.
///
/// Native builds spawn onto the Tokio runtime the binary (or test) has entered.
/// On wasm32 the future runs on the browser event loop.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_task<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_task<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
