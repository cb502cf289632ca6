mod spinlock_;

pub use spinlock_::{SpinLock, SpinMutex, SpinMutexGuard};
