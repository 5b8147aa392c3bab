//! First access to the process-wide defaults.
//!
//! This binary holds a single test, so nothing else in the process has
//! touched `defaults()` before the threads below race for it.

use std::sync::Barrier;
use std::thread;

use amqp_settings::defaults;

#[test]
fn concurrent_first_access_sees_one_instance() {
    const THREADS: usize = 16;
    let start = Barrier::new(THREADS);

    let addrs: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    start.wait();
                    std::ptr::from_ref(defaults()) as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(addrs.len(), THREADS);
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(defaults().host(), "127.0.0.1");
}
