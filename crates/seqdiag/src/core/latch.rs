//! First-failure-wins error storage
//!
//! A fluent builder cannot return a `Result` from every call without breaking
//! the chain, so failures are parked here and inspected at the end.

/// Holds the first error reported to it and ignores every later one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLatch<E> {
    error: Option<E>,
}

impl<E> ErrorLatch<E> {
    pub fn new() -> Self {
        Self { error: None }
    }

    /// Latch `error` unless an error is already held
    ///
    /// Returns `true` when this call latched.
    pub fn fail(&mut self, error: E) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.error = Some(error);
        true
    }

    /// Whether an error has been latched
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// The latched error, if any
    pub fn get(&self) -> Option<&E> {
        self.error.as_ref()
    }
}

impl<E> Default for ErrorLatch<E> {
    fn default() -> Self {
        Self::new()
    }
}
