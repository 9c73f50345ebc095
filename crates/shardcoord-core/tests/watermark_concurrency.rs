//! Cross-thread watermark tests.
//!
//! Many threads feed operation times into one shared registry with
//! arbitrary interleaving. Two properties must hold once they finish:
//!
//! - the stored watermark equals the maximum of everything fed in, and
//! - no reader ever observes the watermark moving backwards.

use std::sync::Arc;
use std::thread;

use shardcoord_core::{ConfigOpTime, ShardingContext};

#[test]
fn concurrent_advances_converge_on_the_maximum() {
    const WRITERS: u64 = 8;
    const ADVANCES_PER_WRITER: u64 = 200;

    let sharding = Arc::new(ShardingContext::new());

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let sharding = Arc::clone(&sharding);
            thread::spawn(move || {
                // Interleave epochs across writers so no single thread owns
                // the maximum, and feed each writer's times out of order.
                for seq in (0..ADVANCES_PER_WRITER).rev() {
                    sharding.advance_config_optime(ConfigOpTime::new(seq % 4, writer * 1000 + seq));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    // Highest epoch fed in is 3; within it the largest seq comes from the
    // last writer: seq % 4 == 3 peaks at ADVANCES_PER_WRITER - 1.
    let expected = ConfigOpTime::new(3, (WRITERS - 1) * 1000 + ADVANCES_PER_WRITER - 1);
    assert_eq!(sharding.config_optime(), expected);
}

#[test]
fn readers_never_observe_a_regression() {
    const WRITERS: u64 = 4;
    const READERS: usize = 2;
    const ADVANCES_PER_WRITER: u64 = 500;

    let sharding = Arc::new(ShardingContext::new());

    let writer_handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let sharding = Arc::clone(&sharding);
            thread::spawn(move || {
                for seq in 0..ADVANCES_PER_WRITER {
                    sharding.advance_config_optime(ConfigOpTime::new(writer, seq));
                }
            })
        })
        .collect();

    let reader_handles: Vec<_> = (0..READERS)
        .map(|_| {
            let sharding = Arc::clone(&sharding);
            thread::spawn(move || {
                let mut last = ConfigOpTime::default();
                for _ in 0..2000 {
                    let seen = sharding.config_optime();
                    assert!(seen >= last, "watermark regressed: {seen} < {last}");
                    last = seen;
                }
            })
        })
        .collect();

    for handle in writer_handles {
        handle.join().expect("writer thread panicked");
    }
    for handle in reader_handles {
        handle.join().expect("reader thread panicked");
    }

    assert_eq!(
        sharding.config_optime(),
        ConfigOpTime::new(WRITERS - 1, ADVANCES_PER_WRITER - 1)
    );
}

#[test]
fn advances_are_visible_to_reads_on_other_threads() {
    let sharding = Arc::new(ShardingContext::new());
    let t1 = ConfigOpTime::new(5, 1);
    sharding.advance_config_optime(t1);

    let observed = {
        let sharding = Arc::clone(&sharding);
        thread::spawn(move || sharding.config_optime())
            .join()
            .expect("reader thread panicked")
    };

    assert_eq!(observed, t1);
}
