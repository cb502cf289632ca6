use core::fmt;

use crate::locker::TrLocker;
use super::rwlock_::RwSpinLock;

/// Exclusive access to a [`RwSpinLock`], released when dropped.
#[must_use = "the write lock is released immediately if the guard is not held"]
pub struct WriterGuard<'a>(&'a RwSpinLock);

impl<'a> WriterGuard<'a> {
    pub(super) fn new(lock: &'a RwSpinLock) -> Self {
        WriterGuard(lock)
    }

    pub fn rwlock(&self) -> &'a RwSpinLock {
        self.0
    }
}

impl Drop for WriterGuard<'_> {
    fn drop(&mut self) {
        self.0.unlock()
    }
}

impl fmt::Debug for WriterGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WriterGuard({:?})", self.0)
    }
}

/// The exclusive side of a [`RwSpinLock`] seen as a [`TrLocker`].
#[derive(Clone, Copy, Debug)]
pub struct WLocker<'a>(&'a RwSpinLock);

impl<'a> WLocker<'a> {
    pub(super) const fn new(lock: &'a RwSpinLock) -> Self {
        WLocker(lock)
    }
}

impl TrLocker for WLocker<'_> {
    #[inline]
    fn lock(&self) {
        self.0.lock()
    }

    #[inline]
    fn unlock(&self) {
        self.0.unlock()
    }
}
