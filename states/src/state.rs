use std::any::{Any, type_name};

/// A piece of input data stored in [`crate::StateCtx`].
///
/// States are changed directly through [`crate::StateCtx::update`] or, from async work,
/// through [`crate::Updater::set`].
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replace `self` with the boxed value delivered by an [`crate::Updater`].
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Default body for [`State::assign_box`]: downcast and overwrite.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!("Ignored update with mismatched type for {}", type_name::<T>()),
    }
}
