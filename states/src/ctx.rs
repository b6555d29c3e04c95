use std::{
    any::{TypeId, type_name},
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use flume::{Receiver, Sender};

use crate::{
    Compute, Dep, Graph, State, StateSyncStatus, TopologyError, Updater,
    updater::{Update, Waker},
};

pub(crate) struct StateSlot {
    pub(crate) value: Box<dyn State>,
    pub(crate) name: &'static str,
}

pub(crate) struct ComputeSlot {
    pub(crate) value: Box<dyn Compute>,
    pub(crate) name: &'static str,
    pub(crate) status: StateSyncStatus,
}

/// Owner of every state and compute of the application.
///
/// One frame of the frontend is:
/// 1. [`StateCtx::sync_computes`]: apply values queued through [`Updater`]s,
/// 2. render, reading through [`StateCtx::state`] and [`StateCtx::cached`],
///    writing through [`StateCtx::update`],
/// 3. [`StateCtx::run_computed`]: re-run computes whose dependencies changed.
pub struct StateCtx {
    states: BTreeMap<TypeId, StateSlot>,
    computes: BTreeMap<TypeId, ComputeSlot>,

    // computes in dependency order
    order: Vec<TypeId>,
    graph: Graph<TypeId>,

    // states and computes changed since the last `run_computed`
    dirty: BTreeSet<TypeId>,

    send: Sender<Update>,
    recv: Receiver<Update>,
    waker: Option<Waker>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            order: Vec::new(),
            graph: Graph::new(),
            dirty: BTreeSet::new(),
            send,
            recv,
            waker: None,
        }
    }

    /// Called every time an [`Updater`] queues a value, typically to request a repaint.
    ///
    /// Only updaters created after this call carry the waker.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.states.insert(
            id,
            StateSlot {
                value: Box::new(state),
                name: type_name::<T>(),
            },
        );
        self.dirty.insert(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let (state_deps, compute_deps) = compute.deps();

        self.graph.add_node(id);
        for dep in compute_deps {
            self.graph.route_to(*dep, id);
        }
        for dep in state_deps {
            if !self.states.contains_key(dep) {
                log::warn!(
                    "{} depends on a state that is not added yet",
                    type_name::<T>()
                );
            }
        }

        self.computes.insert(
            id,
            ComputeSlot {
                value: Box::new(compute),
                name: type_name::<T>(),
                status: StateSyncStatus::BeforeInit,
            },
        );

        match self.graph.topology_sort() {
            Ok(order) => self.order = order,
            Err(err) => log::error!("Compute order not updated for {}: {err}", type_name::<T>()),
        }
    }

    /// Checks that compute dependencies form a DAG.
    pub fn verify_deps(&self) -> Result<(), TopologyError<TypeId>> {
        self.graph.topology_sort().map(|_| ())
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone(), self.waker.clone())
    }

    pub fn try_state<T: State>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    /// Latest value of a compute, `None` if it was never recorded.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    /// Mutates a state in place and marks it dirty.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        let id = TypeId::of::<T>();
        let Some(slot) = self.states.get_mut(&id) else {
            log::warn!("Update for unregistered state {}", type_name::<T>());
            return;
        };
        if let Some(state) = slot.value.as_any_mut().downcast_mut::<T>() {
            f(state);
            self.dirty.insert(id);
        }
    }

    /// Applies every value queued through [`Updater`]s. Returns how many were applied.
    pub fn sync_computes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((id, value)) = self.recv.try_recv() {
            if let Some(slot) = self.computes.get_mut(&id) {
                if slot.value.assign_box(value) {
                    if slot.status != StateSyncStatus::BeforeInit {
                        slot.status = StateSyncStatus::Dirty;
                    }
                    self.dirty.insert(id);
                    applied += 1;
                } else {
                    log::debug!("{} refused a queued update", slot.name);
                }
            } else if let Some(slot) = self.states.get_mut(&id) {
                log::trace!("Applied queued update to {}", slot.name);
                slot.value.assign_box(value);
                self.dirty.insert(id);
                applied += 1;
            } else {
                log::warn!("Dropped update for unregistered type {id:?}");
            }
        }
        applied
    }

    /// Runs, in dependency order, every compute that was never run or whose
    /// dependencies changed since the previous call.
    pub fn run_computed(&mut self) {
        let dirty = std::mem::take(&mut self.dirty);
        let mut ran = Vec::new();

        for id in &self.order {
            let Some(slot) = self.computes.get(id) else {
                continue;
            };
            let (state_deps, compute_deps) = slot.value.deps();
            let should_run = slot.status == StateSyncStatus::BeforeInit
                || state_deps
                    .iter()
                    .chain(compute_deps.iter())
                    .any(|dep| dirty.contains(dep));

            if should_run {
                log::trace!("Running compute {}", slot.name);
                slot.value
                    .compute(Dep::new(&self.states, &self.computes), self.updater());
                ran.push(*id);
            }
        }

        for (id, slot) in self.computes.iter_mut() {
            if ran.contains(id) || dirty.contains(id) {
                slot.status = StateSyncStatus::Clean;
            }
        }
    }

    /// Alternates [`StateCtx::run_computed`] and [`StateCtx::sync_computes`] until no
    /// synchronous change is left to propagate.
    ///
    /// Results of spawned tasks that are still running are not awaited.
    pub fn settle(&mut self) {
        // each round moves changes at least one level down the DAG
        for _ in 0..=self.computes.len() {
            self.run_computed();
            if self.sync_computes() == 0 {
                return;
            }
        }
        log::debug!("State context still changing after settle");
    }

    pub fn status<T: Compute>(&self) -> Option<StateSyncStatus> {
        self.computes.get(&TypeId::of::<T>()).map(|slot| slot.status)
    }
}
