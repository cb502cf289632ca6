#![no_std]

// We always pull in `std` during tests, because it's just easier
// to write tests when you can assume you're on a capable platform
#[cfg(test)]
extern crate std;

pub mod locker;
pub mod mutex;
pub mod rwlock;

#[cfg(test)]
mod smoke_tests_;

pub use locker::{LockerGuard, TrLocker};
pub use mutex::{SpinLock, SpinMutex, SpinMutexGuard};
pub use rwlock::{RLocker, ReaderGuard, RwSpinLock, WLocker, WriterGuard};

pub mod x_deps {
    pub use lock_api;
}
