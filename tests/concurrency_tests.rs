//! Concurrency tests for the writer pipeline
//!
//! These tests verify:
//! - Lines from concurrent producers are never interleaved
//! - Per-producer order is preserved through the writer
//! - Accepted order equals output order
//! - A stalled sink stalls every producer (no timeout exists)

use crossbeam_channel::{bounded, Receiver};
use log_service::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_concurrent_producers_do_not_interleave() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 200;

    let buffer = MemorySink::new();
    let service = Arc::new(LogService::new());
    service
        .set_service_name("stress")
        .set_level(LogLevel::Debug)
        .set_output(buffer.clone());

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    service.info(format!("producer={} seq={}", producer, seq));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer panicked");
    }
    service.flush().expect("flush");

    let lines = buffer.lines();
    assert_eq!(lines.len(), PRODUCERS * PER_PRODUCER);

    let mut next_seq = [0usize; PRODUCERS];
    for line in &lines {
        let fields: Vec<&str> = line.split(" | ").collect();
        assert_eq!(fields.len(), 4, "torn line: '{}'", line);
        assert_eq!(fields[0], "stress");
        assert_eq!(fields[2], "INFO");

        let mut parts = fields[3].split(' ');
        let producer: usize = parts.next().unwrap()["producer=".len()..].parse().unwrap();
        let seq: usize = parts.next().unwrap()["seq=".len()..].parse().unwrap();
        assert_eq!(seq, next_seq[producer], "producer {} out of order", producer);
        next_seq[producer] += 1;
    }
}

#[test]
fn test_accepted_order_is_output_order() {
    let buffer = MemorySink::new();
    let service = Arc::new(LogService::new());
    service.set_output(buffer.clone());

    // The rendezvous returns only after acceptance, so joining A before
    // starting B fixes the acceptance order.
    let a = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.info("first"))
    };
    a.join().expect("producer A panicked");

    let b = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.info("second"))
    };
    b.join().expect("producer B panicked");
    service.flush().expect("flush");

    let contents = buffer.contents();
    let first = contents.find("first").expect("first written");
    let second = contents.find("second").expect("second written");
    assert!(first < second);
}

/// Sink whose writes block until the test releases them.
struct GatedSink {
    gate: Receiver<()>,
    written: Arc<AtomicUsize>,
}

impl Sink for GatedSink {
    fn write_line(&mut self, _line: &str) -> log_service::Result<()> {
        let _ = self.gate.recv();
        self.written.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn flush(&mut self) -> log_service::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// There is no timeout on producers: a sink that stops making progress
/// blocks every caller until it resumes. This is the documented trade-off of
/// the zero-capacity hand-off.
#[test]
fn test_stalled_sink_blocks_producers() {
    let (release, gate) = bounded::<()>(0);
    let written = Arc::new(AtomicUsize::new(0));
    let returned = Arc::new(AtomicUsize::new(0));

    let service = Arc::new(LogService::with_config_and_sink(
        LogServiceConfig::default(),
        GatedSink {
            gate,
            written: Arc::clone(&written),
        },
    ));

    let producer = {
        let service = Arc::clone(&service);
        let returned = Arc::clone(&returned);
        thread::spawn(move || {
            for i in 0..2 {
                service.info(format!("blocked {}", i));
                returned.fetch_add(1, Ordering::SeqCst);
            }
        })
    };

    // First event is taken by the writer, which is now stuck in the sink;
    // the second cannot be handed off.
    thread::sleep(Duration::from_millis(100));
    assert_eq!(returned.load(Ordering::SeqCst), 1);
    assert_eq!(written.load(Ordering::SeqCst), 0);

    release.send(()).expect("writer waiting on gate");
    release.send(()).expect("writer waiting on gate");
    producer.join().expect("producer panicked");
    service.flush().expect("flush");

    assert_eq!(returned.load(Ordering::SeqCst), 2);
    assert_eq!(written.load(Ordering::SeqCst), 2);
}

/// Shutdown is bounded by its timeout even while a producer is stuck in the
/// hand-off behind a stalled sink.
#[test]
fn test_shutdown_with_stalled_sink_times_out() {
    let (release, gate) = bounded::<()>(0);
    let written = Arc::new(AtomicUsize::new(0));

    let service = Arc::new(LogService::with_config_and_sink(
        LogServiceConfig::default(),
        GatedSink {
            gate,
            written: Arc::clone(&written),
        },
    ));

    let producer = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            service.info("a");
            service.info("b");
        })
    };

    // Writer is stuck in the sink with "a"; the producer is blocked on "b"
    thread::sleep(Duration::from_millis(100));

    let start = Instant::now();
    let stopped = service.shutdown(Duration::from_millis(100));
    let elapsed = start.elapsed();

    assert!(!stopped, "shutdown should report the stalled writer");
    assert!(elapsed < Duration::from_secs(2), "shutdown took {:?}", elapsed);
    assert!(!service.is_running());

    // Once the sink resumes, the event already in the hand-off still lands
    release.send(()).expect("writer waiting on gate");
    release.send(()).expect("writer waiting on gate");
    producer.join().expect("producer panicked");

    // Dropping waits on the sink lock, which the writer holds until "b" is done
    drop(service);
    assert_eq!(written.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shutdown_while_producers_run() {
    let buffer = MemorySink::new();
    let service = Arc::new(LogService::new());
    service.set_output(buffer.clone());

    let handles: Vec<_> = (0..4)
        .map(|producer| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for seq in 0..100 {
                    service.info(format!("p{} s{}", producer, seq));
                }
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(5));
    assert!(service.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
    let written_at_shutdown = buffer.lines().len();

    for handle in handles {
        handle.join().expect("producer panicked");
    }

    // Everything accepted before shutdown was drained; nothing after it lands
    assert_eq!(buffer.lines().len(), written_at_shutdown);
    assert_eq!(service.metrics().written() as usize, written_at_shutdown);
}
