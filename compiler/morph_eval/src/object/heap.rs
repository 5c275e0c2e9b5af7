//! Shared heap storage for compound objects.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted storage with copy-on-write mutation.
///
/// Cloning an object clones the pointer. [`Heap::make_mut`] copies the
/// contents only when the allocation is shared, so a path write allocates
/// along the mutated spine and leaves sibling branches shared.
#[repr(transparent)]
pub struct Heap<T>(pub(crate) Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: Clone> Heap<T> {
    /// Mutable access, cloning the contents first if they are shared.
    #[inline]
    pub fn make_mut(&mut self) -> &mut T {
        Arc::make_mut(&mut self.0)
    }

    /// Take the contents, cloning only if shared.
    pub fn into_inner(self) -> T {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Heap::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
