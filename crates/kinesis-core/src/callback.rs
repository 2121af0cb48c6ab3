//! Host callbacks held weakly by the engines.
//!
//! The host owns a [`CallbackHandle`]; engines only keep the [`Callback`]
//! obtained from it. Once the host drops its handle (the scripting-side
//! function was collected, or its node went away) invoking the callback is a
//! silent no-op. A panicking callback is caught at the invocation site so the
//! calling state machine always finishes its transition.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

/// Strong, host-owned side of a callback.
pub struct CallbackHandle<T> {
    inner: Rc<dyn Fn(T)>,
}

impl<T: 'static> CallbackHandle<T> {
    pub fn new(f: impl Fn(T) + 'static) -> Self {
        Self { inner: Rc::new(f) }
    }

    /// Weak reference to hand to an engine.
    pub fn callback(&self) -> Callback<T> {
        Callback {
            target: Rc::downgrade(&self.inner),
        }
    }
}

impl<T> fmt::Debug for CallbackHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHandle").finish_non_exhaustive()
    }
}

/// Engine-side weak reference to a host callback.
pub struct Callback<T> {
    target: Weak<dyn Fn(T)>,
}

impl<T> Callback<T> {
    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Calls the host function. Returns `true` only if it ran to completion.
    pub fn invoke(&self, arg: T) -> bool {
        let Some(target) = self.target.upgrade() else {
            log::trace!("callback target dropped, skipping invocation");
            return false;
        };
        match catch_unwind(AssertUnwindSafe(|| target(arg))) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("host callback panicked; ignoring");
                false
            }
        }
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Fires an optional callback slot.
pub fn fire<T>(slot: &Option<Callback<T>>, arg: T) {
    if let Some(callback) = slot {
        callback.invoke(arg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn invokes_while_handle_alive() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handle = CallbackHandle::new(move |value: i32| sink.borrow_mut().push(value));
        let callback = handle.callback();

        assert!(callback.invoke(3));
        assert!(callback.clone().invoke(4));
        assert_eq!(*seen.borrow(), vec![3, 4]);
    }

    #[test]
    fn dropped_handle_turns_invocation_into_noop() {
        let handle = CallbackHandle::new(|_: ()| panic!("must not run"));
        let callback = handle.callback();
        drop(handle);

        assert!(!callback.is_alive());
        assert!(!callback.invoke(()));
    }

    #[test]
    fn panicking_callback_is_contained() {
        let handle = CallbackHandle::new(|_: ()| panic!("boom"));
        let callback = handle.callback();

        assert!(!callback.invoke(()));
        assert!(callback.is_alive());
    }
}
