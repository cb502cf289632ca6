use core::{
    fmt,
    hint,
    sync::atomic::{AtomicBool, AtomicI32, Ordering},
};

use super::{
    reader_::{RLocker, ReaderGuard},
    writer_::{WLocker, WriterGuard},
};

/// A reader-writer spinlock built on a Peterson-style handshake.
///
/// Three atomics make up the protocol:
///
/// * `wants_to_write` is claimed by compare-and-swap, so at most one writer
///   announces intent at a time;
/// * `readers` counts readers that are in, or trying to enter, the lock;
/// * `writable` is the turn flag. A reader stores `true` when it announces
///   itself, a writer stores `false` after claiming intent, and whichever
///   side wrote it last is the one that waits.
///
/// Once a writer has announced intent, newly arriving readers spin until the
/// writer releases, and the writer waits for the readers already inside to
/// drain. That wait is cut short by the turn flag: a reader arriving while
/// the writer drains stores `writable = true`, which lets the writer in even
/// though earlier readers still hold the lock. Mutual exclusion between a
/// writer and readers is therefore best effort, not guaranteed. The order of
/// the stores and loads below is load-bearing, and every access is `SeqCst`.
///
/// Like [`SpinLock`](crate::SpinLock), all waiting is busy waiting.
#[derive(Default)]
pub struct RwSpinLock {
    wants_to_write_: AtomicBool,
    readers_: AtomicI32,
    writable_: AtomicBool,
}

impl RwSpinLock {
    pub const fn new() -> Self {
        RwSpinLock {
            wants_to_write_: AtomicBool::new(false),
            readers_: AtomicI32::new(0),
            writable_: AtomicBool::new(false),
        }
    }

    /// Attempt to acquire shared access without blocking.
    ///
    /// The reader announces itself first and backs out if a writer holds or
    /// claims the lock, so this can fail spuriously when it races a writer
    /// that is itself about to give up.
    ///
    /// # Example
    /// ```
    /// use spinlocks::RwSpinLock;
    ///
    /// let lock = RwSpinLock::new();
    /// assert!(lock.try_rlock());
    /// assert!(lock.try_rlock());
    /// assert_eq!(lock.reader_count(), 2);
    /// lock.runlock();
    /// lock.runlock();
    ///
    /// lock.lock();
    /// assert!(!lock.try_rlock());
    /// assert_eq!(lock.reader_count(), 0);
    /// lock.unlock();
    /// ```
    pub fn try_rlock(&self) -> bool {
        self.readers_.fetch_add(1, Ordering::SeqCst);
        self.writable_.store(true, Ordering::SeqCst);
        if self.should_reader_wait_() {
            self.readers_.fetch_sub(1, Ordering::SeqCst);
            Self::_trace("RwSpinLock::try_rlock", self, "writer pending, backed out");
            return false;
        }
        true
    }

    /// Acquire shared access, spinning while a writer holds or has claimed
    /// the lock.
    pub fn rlock(&self) {
        self.readers_.fetch_add(1, Ordering::SeqCst);
        self.writable_.store(true, Ordering::SeqCst);
        if self.should_reader_wait_() {
            Self::_trace("RwSpinLock::rlock", self, "writer pending, spinning");
            while self.should_reader_wait_() {
                hint::spin_loop();
            }
        }
    }

    /// Release shared access.
    ///
    /// Must be paired with exactly one successful [`rlock`](Self::rlock) or
    /// [`try_rlock`](Self::try_rlock); an unmatched call corrupts the reader
    /// count.
    #[inline]
    pub fn runlock(&self) {
        self.readers_.fetch_sub(1, Ordering::SeqCst);
    }

    /// Attempt to acquire exclusive access without blocking.
    ///
    /// Fails immediately when another writer holds the intent flag, and
    /// withdraws the claim when readers are still active.
    ///
    /// # Example
    /// ```
    /// use spinlocks::RwSpinLock;
    ///
    /// let lock = RwSpinLock::new();
    /// lock.rlock();
    /// assert!(!lock.try_lock());
    /// assert!(!lock.is_write_locked());
    /// lock.runlock();
    ///
    /// assert!(lock.try_lock());
    /// assert!(!lock.try_lock());
    /// lock.unlock();
    /// ```
    pub fn try_lock(&self) -> bool {
        if !self.claim_write_intent_() {
            return false;
        }
        self.writable_.store(false, Ordering::SeqCst);
        if self.should_writer_wait_() {
            self.wants_to_write_.store(false, Ordering::SeqCst);
            Self::_trace("RwSpinLock::try_lock", self, "readers active, withdrew");
            return false;
        }
        true
    }

    /// Acquire exclusive access.
    ///
    /// Spins until this writer owns the intent flag, then until the readers
    /// that were already inside have drained or a newly arriving reader hands
    /// over the turn. Readers arriving after the claim wait for
    /// [`unlock`](Self::unlock).
    pub fn lock(&self) {
        if !self.claim_write_intent_() {
            Self::_trace("RwSpinLock::lock", self, "another writer holds intent, spinning");
            while !self.claim_write_intent_() {
                hint::spin_loop();
            }
        }
        self.writable_.store(false, Ordering::SeqCst);
        if self.should_writer_wait_() {
            Self::_trace("RwSpinLock::lock", self, "readers active, spinning");
            while self.should_writer_wait_() {
                hint::spin_loop();
            }
        }
    }

    /// Release exclusive access, letting waiting readers and writers proceed.
    ///
    /// Releasing a lock that is not write-held is a no-op.
    #[inline]
    pub fn unlock(&self) {
        self.wants_to_write_.store(false, Ordering::SeqCst)
    }

    /// Acquire shared access and return a guard that releases it on drop.
    ///
    /// # Example
    /// ```
    /// use spinlocks::RwSpinLock;
    ///
    /// let lock = RwSpinLock::new();
    /// {
    ///     let _r0 = lock.read();
    ///     let _r1 = lock.read();
    ///     assert_eq!(lock.reader_count(), 2);
    ///     assert!(lock.try_write().is_none());
    /// }
    /// assert_eq!(lock.reader_count(), 0);
    /// ```
    pub fn read(&self) -> ReaderGuard<'_> {
        self.rlock();
        ReaderGuard::new(self)
    }

    pub fn try_read(&self) -> Option<ReaderGuard<'_>> {
        if self.try_rlock() {
            Option::Some(ReaderGuard::new(self))
        } else {
            Option::None
        }
    }

    /// Acquire exclusive access and return a guard that releases it on drop.
    ///
    /// # Example
    /// ```
    /// use spinlocks::RwSpinLock;
    ///
    /// let lock = RwSpinLock::new();
    /// {
    ///     let _w = lock.write();
    ///     assert!(lock.is_write_locked());
    ///     assert!(lock.try_read().is_none());
    /// }
    /// assert!(!lock.is_write_locked());
    /// assert!(lock.try_read().is_some());
    /// ```
    pub fn write(&self) -> WriterGuard<'_> {
        self.lock();
        WriterGuard::new(self)
    }

    pub fn try_write(&self) -> Option<WriterGuard<'_>> {
        if self.try_lock() {
            Option::Some(WriterGuard::new(self))
        } else {
            Option::None
        }
    }

    /// A view of the shared side of this lock as a
    /// [`TrLocker`](crate::TrLocker).
    #[inline]
    pub const fn rlocker(&self) -> RLocker<'_> {
        RLocker::new(self)
    }

    /// A view of the exclusive side of this lock as a
    /// [`TrLocker`](crate::TrLocker).
    #[inline]
    pub const fn wlocker(&self) -> WLocker<'_> {
        WLocker::new(self)
    }

    /// Return the number of readers currently holding, or trying to acquire,
    /// the lock.
    ///
    /// This function provides no synchronization guarantees and so its result
    /// should be considered 'out of date' the instant it is called.
    #[inline]
    pub fn reader_count(&self) -> i32 {
        self.readers_.load(Ordering::SeqCst)
    }

    /// Tests if a writer holds the lock or has announced intent to take it.
    ///
    /// Like [`reader_count`](Self::reader_count), only a heuristic.
    #[inline]
    pub fn is_write_locked(&self) -> bool {
        self.wants_to_write_.load(Ordering::SeqCst)
    }

    #[inline]
    fn claim_write_intent_(&self) -> bool {
        self.wants_to_write_
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// A reader waits while a writer is pending and the turn flag still says
    /// the reader spoke last.
    #[inline]
    fn should_reader_wait_(&self) -> bool {
        self.wants_to_write_.load(Ordering::SeqCst)
            && self.writable_.load(Ordering::SeqCst)
    }

    /// A writer waits while readers are active and no reader has announced
    /// itself since the writer took its turn.
    #[inline]
    fn should_writer_wait_(&self) -> bool {
        self.readers_.load(Ordering::SeqCst) > 0
            && !self.writable_.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(super) fn is_writable(&self) -> bool {
        self.writable_.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    fn _trace(p: &'static str, x: &Self, what: &'static str) {
        log::trace!("[{p}] {x:?}: {what}")
    }

    #[cfg(not(test))]
    fn _trace(_: &'static str, _: &Self, _: &'static str) {}
}

impl fmt::Debug for RwSpinLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[RwSpinLock: W({}), R({}), Wr({})]",
            self.wants_to_write_.load(Ordering::SeqCst),
            self.readers_.load(Ordering::SeqCst),
            self.writable_.load(Ordering::SeqCst),
        )
    }
}
