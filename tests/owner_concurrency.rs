//! Concurrent resolution of the owner user id.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use host_diag::resolver::{MetadataError, OwnerIdResolver};

const THREADS: usize = 16;

#[test]
fn test_concurrent_callers_agree_on_user_id() {
    let lookups = Arc::new(AtomicUsize::new(0));
    let counter = lookups.clone();
    let resolver = Arc::new(OwnerIdResolver::new(
        move || -> Result<PathBuf, MetadataError> {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(50));
            Ok(PathBuf::from("/data/user/7/com.example.app"))
        },
    ));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let resolver = resolver.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                (resolver.user_id().unwrap(), resolver.is_owner().unwrap())
            })
        })
        .collect();

    let answers: Vec<(u32, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(answers.iter().all(|answer| *answer == (7, false)));
    assert_eq!(resolver.cached(), Some(7));
    // Racing callers may each read the path, but nobody reads it after the cache is set.
    let after_race = lookups.load(Ordering::SeqCst);
    assert!((1..=THREADS).contains(&after_race));
    assert_eq!(resolver.user_id().unwrap(), 7);
    assert_eq!(lookups.load(Ordering::SeqCst), after_race);
}
