use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    vec::Vec,
};

use crate::TrLocker;

pub(crate) fn init_env_logger_() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every thread bumps a plain load/store counter under the lock. Lost updates
/// or overlapping critical sections show up as duplicated observations.
pub(crate) fn unique_increments_smoke_<L>(locker: &L, threads: usize)
where
    L: TrLocker + Sync,
{
    init_env_logger_();

    let value = AtomicUsize::new(0);
    let inside = AtomicUsize::new(0);
    let mut seen: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|id| {
                let value = &value;
                let inside = &inside;
                s.spawn(move || {
                    locker.lock();
                    let n = inside.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(n, 0, "thread #{id} entered an occupied section");
                    let v = value.load(Ordering::Relaxed) + 1;
                    thread::yield_now();
                    value.store(v, Ordering::Relaxed);
                    log::trace!("thread #{id} incremented counter to {v}");
                    inside.fetch_sub(1, Ordering::SeqCst);
                    locker.unlock();
                    v
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    seen.sort_unstable();
    assert_eq!(value.load(Ordering::SeqCst), threads);
    assert!(seen.into_iter().eq(1..=threads));
}

/// Two threads take turns through the same lock, one only acting on odd
/// values and the other only on even ones, until `TEST_MAX` is reached.
pub(crate) fn alternating_usize_smoke_<L>(locker: &L)
where
    L: TrLocker + Sync,
{
    init_env_logger_();

    const TEST_MAX: usize = 16;

    let value = AtomicUsize::new(0);
    let (v1, v2) = thread::scope(|s| {
        let t1 = s.spawn(|| testing_thread_work_(locker, &value, TEST_MAX, is_odd));
        let t2 = s.spawn(|| testing_thread_work_(locker, &value, TEST_MAX, is_even));
        (t1.join().unwrap(), t2.join().unwrap())
    });
    assert_eq!(v1.len(), TEST_MAX / 2);
    assert_eq!(v2.len(), TEST_MAX / 2);
    assert!(v1.into_iter().all(is_even));
    assert!(v2.into_iter().all(is_odd));
    assert_eq!(value.load(Ordering::SeqCst), TEST_MAX);

    fn is_even(u: usize) -> bool {
        u % 2 == 0
    }
    fn is_odd(u: usize) -> bool {
        u % 2 == 1
    }

    fn testing_thread_work_<L: TrLocker>(
        locker: &L,
        value: &AtomicUsize,
        max: usize,
        expect: fn(usize) -> bool,
    ) -> Vec<usize> {
        let mut c = 0usize;
        let mut vec = Vec::with_capacity(max / 2);
        loop {
            c += 1usize;
            let _g = locker.guard();
            let v = value.load(Ordering::Relaxed);
            if v >= max {
                log::info!("#{c} vec.len({}) exit with v({v})", vec.len());
                break;
            }
            if expect(v) {
                value.store(v + 1, Ordering::Relaxed);
                vec.push(v + 1);
            }
        }
        vec
    }
}
