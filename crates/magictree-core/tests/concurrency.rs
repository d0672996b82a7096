//! Detection racing with extension.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use magictree_core::{Never, Node, Registry, Signature};

const READERS: usize = 8;

fn custom_input(i: usize) -> Vec<u8> {
    let mut input = format!("CUS{i:02}").into_bytes();
    input.push(0);
    input
}

#[test]
fn readers_never_observe_partial_extensions() {
    let registry = Arc::new(Registry::with_defaults());
    let done = Arc::new(AtomicBool::new(false));
    let start = Arc::new(Barrier::new(READERS + 1));

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let done = Arc::clone(&done);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                let mut checks = 0usize;
                while !done.load(Ordering::Acquire) || checks == 0 {
                    for i in 0..10 {
                        let mime = registry.detect(&custom_input(i));
                        let expected = format!("application/x-custom-{i}");
                        assert!(
                            mime.identifier() == "application/octet-stream"
                                || mime.identifier() == expected,
                            "unexpected {mime}"
                        );
                    }
                    assert_eq!(
                        registry.detect(b"\x1F\x8B\x08").identifier(),
                        "application/gzip"
                    );
                    checks += 1;
                }
            })
        })
        .collect();

    start.wait();
    for i in 0..10 {
        let magic = format!("CUS{i:02}").into_bytes();
        registry
            .extend_with(
                "application/octet-stream",
                Node::new(
                    format!("application/x-custom-{i}"),
                    "",
                    Signature::new(0, magic),
                ),
            )
            .unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }

    for i in 0..10 {
        assert_eq!(
            registry.detect(&custom_input(i)).identifier(),
            format!("application/x-custom-{i}")
        );
    }
}

#[test]
fn concurrent_extensions_are_all_applied() {
    let registry = Arc::new(Registry::with_defaults());
    let before = registry.len();

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..25 {
                    let magic = format!("W{w}N{i:02}").into_bytes();
                    registry
                        .extend_with(
                            "application/octet-stream",
                            Node::new(format!("application/x-w{w}-n{i}"), "", Signature::new(0, magic)),
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(registry.len(), before + 100);
    assert_eq!(
        registry.detect(b"W3N24\x00").identifier(),
        "application/x-w3-n24"
    );
}

#[test]
fn failure_sentinel_needs_no_lock() {
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));

    // Parks inside `detect`, holding the read side until released.
    let gate = {
        let entered = Arc::clone(&entered);
        let release = Arc::clone(&release);
        move |_: &[u8], _: u32| {
            entered.wait();
            release.wait();
            false
        }
    };
    let registry = Arc::new(Registry::new(
        Node::root().with_children([Node::new("application/x-gate", "", gate)]),
    ));

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || registry.detect(b"held"))
    };
    entered.wait();

    // A writer queued behind the reader blocks any new reader.
    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            registry.extend(
                "application/octet-stream",
                Never,
                "application/x-late",
                "",
                Vec::<String>::new(),
            )
        })
    };
    thread::sleep(Duration::from_millis(50));

    let sentinel = Registry::failure();
    assert_eq!(sentinel.identifier(), "application/octet-stream");
    assert!(sentinel.parent().is_none());

    release.wait();
    assert_eq!(reader.join().unwrap().identifier(), "application/octet-stream");
    writer.join().unwrap().unwrap();
    assert!(registry.lookup("application/x-late").is_some());
}
