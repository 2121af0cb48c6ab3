//! Callback sinks for assertions on what the engines reported.

use kinesis_core::{Callback, CallbackHandle};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Collects every payload passed to one callback.
///
/// The recorder owns the [`CallbackHandle`], so dropping it (or calling
/// [`release`](Self::release)) simulates the host collecting its function.
pub struct Recorder<T> {
    log: Rc<RefCell<Vec<T>>>,
    handle: Option<CallbackHandle<T>>,
}

impl<T: Clone + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Recorder<T> {
    pub fn new() -> Self {
        let log: Rc<RefCell<Vec<T>>> = Rc::default();
        let sink = Rc::clone(&log);
        let handle = CallbackHandle::new(move |value: T| sink.borrow_mut().push(value));
        Self {
            log,
            handle: Some(handle),
        }
    }

    /// Weak callback to hand to an engine. After [`release`](Self::release)
    /// the returned callback is already dead.
    pub fn callback(&self) -> Callback<T> {
        match &self.handle {
            Some(handle) => handle.callback(),
            None => CallbackHandle::new(|_: T| {}).callback(),
        }
    }

    /// Drops the strong handle; later invocations become no-ops.
    pub fn release(&mut self) {
        self.handle = None;
    }

    pub fn events(&self) -> Vec<T> {
        self.log.borrow().clone()
    }

    pub fn last(&self) -> Option<T> {
        self.log.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Returns the recorded payloads and clears the log.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl<T> fmt::Debug for Recorder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("recorded", &self.log.borrow().len())
            .field("alive", &self.handle.is_some())
            .finish()
    }
}

/// One ordered log shared by many callbacks, for asserting the sequence in
/// which different callbacks fired.
#[derive(Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<String>>>,
    handles: Vec<Box<dyn std::any::Any>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload-less callback that records `label`.
    pub fn signal(&mut self, label: &'static str) -> Callback<()> {
        let entries = Rc::clone(&self.entries);
        let handle = CallbackHandle::new(move |()| entries.borrow_mut().push(label.to_owned()));
        let callback = handle.callback();
        self.handles.push(Box::new(handle));
        callback
    }

    /// Callback that records `label(payload)` using the payload's `Debug`.
    pub fn callback<T: fmt::Debug + 'static>(&mut self, label: &'static str) -> Callback<T> {
        let entries = Rc::clone(&self.entries);
        let handle = CallbackHandle::new(move |value: T| {
            entries.borrow_mut().push(format!("{label}({value:?})"))
        });
        let callback = handle.callback();
        self.handles.push(Box::new(handle));
        callback
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Entries with any `(payload)` suffix stripped.
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| entry.split('(').next().unwrap_or(entry).to_owned())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.borrow().iter()).finish()
    }
}
