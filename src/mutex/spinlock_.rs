use core::{
    fmt::{self, Debug},
    hint,
    sync::atomic::{AtomicBool, Ordering},
};

use lock_api::{GuardSend, RawMutex};

use crate::locker::TrLocker;

/// A mutex owning its data, with RAII guards, backed by [`SpinLock`].
///
/// # Example
/// ```
/// use spinlocks::SpinMutex;
///
/// static COUNTER: SpinMutex<usize> = SpinMutex::const_new(
///     <spinlocks::SpinLock as spinlocks::x_deps::lock_api::RawMutex>::INIT,
///     0,
/// );
///
/// *COUNTER.lock() += 1;
/// assert_eq!(*COUNTER.lock(), 1);
/// ```
pub type SpinMutex<T> = lock_api::Mutex<SpinLock, T>;

pub type SpinMutexGuard<'a, T> = lock_api::MutexGuard<'a, SpinLock, T>;

/// An exclusive lock over a single atomic flag that busy-waits instead of
/// blocking.
///
/// The lock guards no data by itself; embed it next to whatever it protects,
/// or use [`SpinMutex`] to have it own the data.
#[derive(Default)]
pub struct SpinLock {
    locked_: AtomicBool,
}

impl SpinLock {
    pub const fn new() -> Self {
        SpinLock {
            locked_: AtomicBool::new(false),
        }
    }

    /// Attempt to acquire the lock without blocking the current thread.
    ///
    /// # Example
    /// ```
    /// use spinlocks::SpinLock;
    ///
    /// let lock = SpinLock::new();
    /// assert!(lock.try_lock());
    /// assert!(!lock.try_lock());
    /// lock.unlock();
    /// assert!(lock.try_lock());
    /// ```
    #[inline]
    pub fn try_lock(&self) -> bool {
        self.locked_
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Spin until the lock is acquired. There is no backoff and no yielding
    /// to the scheduler.
    pub fn lock(&self) {
        while !self.try_lock() {
            hint::spin_loop();
        }
    }

    /// Release the lock.
    ///
    /// The flag is cleared unconditionally: releasing a lock that is not held
    /// is a no-op, and releasing one held by another thread is not detected.
    #[inline]
    pub fn unlock(&self) {
        self.locked_.store(false, Ordering::SeqCst)
    }

    /// Tests if the lock is currently held.
    ///
    /// The result is out of date as soon as it is returned; do not use it for
    /// synchronization.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked_.load(Ordering::SeqCst)
    }
}

unsafe impl RawMutex for SpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: SpinLock = SpinLock::new();

    type GuardMarker = GuardSend;

    #[inline]
    fn lock(&self) {
        SpinLock::lock(self)
    }

    #[inline]
    fn try_lock(&self) -> bool {
        SpinLock::try_lock(self)
    }

    #[inline]
    unsafe fn unlock(&self) {
        SpinLock::unlock(self)
    }

    #[inline]
    fn is_locked(&self) -> bool {
        SpinLock::is_locked(self)
    }
}

impl TrLocker for SpinLock {
    #[inline]
    fn lock(&self) {
        SpinLock::lock(self)
    }

    #[inline]
    fn unlock(&self) {
        SpinLock::unlock(self)
    }
}

impl Debug for SpinLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[SpinLock: L({})]", self.is_locked())
    }
}
