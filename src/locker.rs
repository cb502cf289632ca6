use core::fmt::{self, Debug};

/// The lockable capability: anything that can be acquired and released.
///
/// Generic code written against `TrLocker` works the same way over a
/// [`SpinLock`](crate::SpinLock) or over either side of a
/// [`RwSpinLock`](crate::RwSpinLock), through its
/// [`RLocker`](crate::RLocker) and [`WLocker`](crate::WLocker) views.
///
/// Every `lock` must be paired with exactly one `unlock` by the same caller.
/// Mismatched calls are not detected.
///
/// # Example
/// ```
/// use spinlocks::{RwSpinLock, SpinLock, TrLocker};
///
/// fn critical<L: TrLocker>(l: &L, n: &mut usize) {
///     l.lock();
///     *n += 1;
///     l.unlock();
/// }
///
/// let mut n = 0usize;
/// let spin = SpinLock::new();
/// let rw = RwSpinLock::new();
/// critical(&spin, &mut n);
/// critical(&rw.wlocker(), &mut n);
/// critical(&rw.rlocker(), &mut n);
/// assert_eq!(n, 3);
/// ```
pub trait TrLocker {
    fn lock(&self);

    fn unlock(&self);

    /// Acquire through this capability and return a guard that releases it
    /// when dropped.
    ///
    /// # Example
    /// ```
    /// use spinlocks::{SpinLock, TrLocker};
    ///
    /// let lock = SpinLock::new();
    /// {
    ///     let _g = lock.guard();
    ///     assert!(lock.is_locked());
    /// }
    /// assert!(!lock.is_locked());
    /// ```
    #[must_use]
    fn guard(&self) -> LockerGuard<'_, Self>
    where
        Self: Sized,
    {
        self.lock();
        LockerGuard(self)
    }
}

/// Releases the borrowed [`TrLocker`] on drop, including on unwinding.
#[must_use = "the lock is released immediately if the guard is not held"]
pub struct LockerGuard<'a, L: TrLocker>(&'a L);

impl<'a, L: TrLocker> LockerGuard<'a, L> {
    pub fn locker(&self) -> &'a L {
        self.0
    }
}

impl<L: TrLocker> Drop for LockerGuard<'_, L> {
    fn drop(&mut self) {
        self.0.unlock()
    }
}

impl<L: TrLocker + Debug> Debug for LockerGuard<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LockerGuard({:?})", self.0)
    }
}
