//! Reactive state runtime for the source builder.
//!
//! Inputs live in [`State`]s, derived values in [`Compute`]s. A [`StateCtx`] owns both,
//! orders computes by their dependencies and re-runs a compute whenever something it
//! depends on changed. Async work reports back through an [`Updater`], whose messages are
//! applied on the next [`StateCtx::sync_computes`].

mod compute;
mod ctx;
mod dep;
mod graph;
mod spawn;
mod state;
mod state_sync_status;
mod time;
mod updater;

pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use graph::{DepRoute, Graph, TopologyError};
pub use spawn::spawn_task;
pub use state::{State, state_assign_impl};
pub use state_sync_status::StateSyncStatus;
pub use time::Time;
pub use updater::Updater;
