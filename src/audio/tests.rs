use std::collections::VecDeque;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use super::clock::PlayClock;
use super::thread::skip_to_newest_load;
use super::types::AudioCmd;

#[test]
fn clock_accumulates_across_pauses() {
    let t0 = Instant::now();
    let mut c = PlayClock::default();
    assert!(!c.running());

    c.start(t0);
    c.pause(t0 + Duration::from_secs(3));
    assert_eq!(c.elapsed(t0 + Duration::from_secs(10)), Duration::from_secs(3));

    c.start(t0 + Duration::from_secs(10));
    assert_eq!(c.elapsed(t0 + Duration::from_secs(12)), Duration::from_secs(5));
}

#[test]
fn clock_start_while_running_keeps_elapsed() {
    let t0 = Instant::now();
    let mut c = PlayClock::default();
    c.start(t0);
    c.start(t0 + Duration::from_secs(4));
    assert_eq!(c.elapsed(t0 + Duration::from_secs(5)), Duration::from_secs(5));
}

#[test]
fn clock_reset_keeps_running_state() {
    let t0 = Instant::now();
    let mut c = PlayClock::default();
    c.start(t0);
    c.reset(Duration::from_secs(60), t0 + Duration::from_secs(1));
    assert!(c.running());
    assert_eq!(c.elapsed(t0 + Duration::from_secs(3)), Duration::from_secs(62));

    c.pause(t0 + Duration::from_secs(3));
    c.reset(Duration::from_secs(10), t0 + Duration::from_secs(4));
    assert!(!c.running());
    assert_eq!(c.elapsed(t0 + Duration::from_secs(9)), Duration::from_secs(10));

    c.clear();
    assert_eq!(c.elapsed(t0), Duration::ZERO);
}

#[test]
fn newer_load_supersedes_queued_playback_commands() {
    let (tx, rx) = mpsc::channel();
    tx.send(AudioCmd::Play).unwrap();
    tx.send(AudioCmd::SetVolume(0.5)).unwrap();
    tx.send(AudioCmd::Load("http://host/b.mp3".into())).unwrap();
    tx.send(AudioCmd::Play).unwrap();

    let mut backlog = VecDeque::new();
    assert!(skip_to_newest_load(&rx, &mut backlog));
    assert_eq!(backlog.len(), 3);
    assert!(matches!(backlog[0], AudioCmd::SetVolume(v) if v == 0.5));
    assert!(matches!(&backlog[1], AudioCmd::Load(uri) if uri == "http://host/b.mp3"));
    assert!(matches!(backlog[2], AudioCmd::Play));
}

#[test]
fn queue_without_load_is_kept_intact() {
    let (tx, rx) = mpsc::channel();
    tx.send(AudioCmd::Play).unwrap();
    tx.send(AudioCmd::Seek(Duration::from_secs(4))).unwrap();

    let mut backlog = VecDeque::new();
    assert!(!skip_to_newest_load(&rx, &mut backlog));
    assert_eq!(backlog.len(), 2);
    assert!(matches!(backlog[0], AudioCmd::Play));
}
