use std::any::{Any, TypeId, type_name};

use crate::{Dep, Updater};

/// `(state dependencies, compute dependencies)`, both as `TypeId`s.
pub type ComputeDeps = (&'static [TypeId], &'static [TypeId]);

/// A value derived from states and other computes.
///
/// `compute` never mutates `self`: it publishes the next value through the [`Updater`],
/// either right away or from a spawned task. The context applies it on the next sync.
pub trait Compute: Any + Send {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    /// Replace `self` with the boxed value delivered by an [`Updater`].
    ///
    /// Implementations may refuse an update (for example a result that belongs to an
    /// input that is no longer current); return `false` in that case.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) -> bool;
}

/// Default body for [`Compute::assign_box`]: downcast and overwrite.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) -> bool {
    match new_self.downcast::<T>() {
        Ok(value) => {
            *target = *value;
            true
        }
        Err(_) => {
            log::warn!("Ignored update with mismatched type for {}", type_name::<T>());
            false
        }
    }
}
