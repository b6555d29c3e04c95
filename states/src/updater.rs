use std::{
    any::{Any, TypeId, type_name},
    fmt::{Debug, Formatter},
    sync::Arc,
};

use flume::Sender;

pub(crate) type Update = (TypeId, Box<dyn Any + Send>);

/// Callback used to wake the frontend once an update is queued from a background task.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Cloneable handle that queues new values for states and computes.
///
/// Updates are applied by [`crate::StateCtx::sync_computes`], always on the thread that
/// owns the context.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    waker: Option<Waker>,
}

impl Debug for Updater {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("queued", &self.send.len())
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>, waker: Option<Waker>) -> Self {
        Self { send, waker }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        if self
            .send
            .send((TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            log::warn!(
                "Dropped update for {}: state context is gone",
                type_name::<T>()
            );
            return;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}
