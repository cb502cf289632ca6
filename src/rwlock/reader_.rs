use core::fmt;

use crate::locker::TrLocker;
use super::rwlock_::RwSpinLock;

/// Shared access to a [`RwSpinLock`], released when dropped.
#[must_use = "the read lock is released immediately if the guard is not held"]
pub struct ReaderGuard<'a>(&'a RwSpinLock);

impl<'a> ReaderGuard<'a> {
    pub(super) fn new(lock: &'a RwSpinLock) -> Self {
        ReaderGuard(lock)
    }

    pub fn rwlock(&self) -> &'a RwSpinLock {
        self.0
    }
}

impl Drop for ReaderGuard<'_> {
    fn drop(&mut self) {
        self.0.runlock()
    }
}

impl fmt::Debug for ReaderGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReaderGuard({:?})", self.0)
    }
}

/// The shared side of a [`RwSpinLock`] seen as a [`TrLocker`].
///
/// `lock` maps to [`RwSpinLock::rlock`] and `unlock` to
/// [`RwSpinLock::runlock`].
///
/// # Example
/// ```
/// use spinlocks::{RwSpinLock, TrLocker};
///
/// let lock = RwSpinLock::new();
/// let r = lock.rlocker();
/// r.lock();
/// r.lock();
/// assert_eq!(lock.reader_count(), 2);
/// r.unlock();
/// r.unlock();
/// assert_eq!(lock.reader_count(), 0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RLocker<'a>(&'a RwSpinLock);

impl<'a> RLocker<'a> {
    pub(super) const fn new(lock: &'a RwSpinLock) -> Self {
        RLocker(lock)
    }
}

impl TrLocker for RLocker<'_> {
    #[inline]
    fn lock(&self) {
        self.0.rlock()
    }

    #[inline]
    fn unlock(&self) {
        self.0.runlock()
    }
}
