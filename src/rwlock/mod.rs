mod rwlock_;
mod reader_;
mod writer_;


pub use rwlock_::RwSpinLock;
pub use reader_::{RLocker, ReaderGuard};
pub use writer_::{WLocker, WriterGuard};
