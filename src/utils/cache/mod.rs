//! Lazily recomputed derived values.
//!
//! A [`Derived`] holds a value computed from some other state. Mutations of
//! that state call [`Derived::invalidate`]; the next read recomputes it once
//! and later reads are served from the cache until the next invalidation.

#[derive(Debug, Clone)]
pub struct Derived<T> {
    value: Option<T>,
}

impl<T> Default for Derived<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Derived<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached value; the next read recomputes it.
    pub fn invalidate(&mut self) {
        self.value = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.value.is_none()
    }

    /// Cached value if it is current.
    pub fn peek(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutable access to a current value, for in-place patches.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Return the cached value, computing it first if dirty.
    pub fn get_or_compute(&mut self, compute: impl FnOnce() -> T) -> &T {
        self.value.get_or_insert_with(compute)
    }
}
