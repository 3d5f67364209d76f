use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use typerace::runtime::{FixedTicker, RaceEvent, Runner, TestEventSource};
use typerace::{CompletionReason, Mode, Race, SessionConfig};

fn key(c: KeyCode) -> RaceEvent {
    RaceEvent::Key(KeyEvent::new(c, KeyModifiers::NONE))
}

// Feeds runner events into a race the way a front-end would: keys edit a
// buffer and the whole buffer is handed over on each change.
fn drive(race: &mut Race, runner: &mut Runner<TestEventSource, FixedTicker>, max_steps: u32) {
    let mut buffer = String::new();
    for _ in 0..max_steps {
        match runner.step() {
            Some(RaceEvent::Tick) => race.on_tick(),
            Some(RaceEvent::Resize) => {}
            Some(RaceEvent::Key(key)) => {
                match key.code {
                    KeyCode::Char(c) => buffer.push(c),
                    KeyCode::Backspace => {
                        buffer.pop();
                    }
                    _ => continue,
                }
                race.input_changed(&buffer);
            }
            None => break,
        }
        if race.has_finished() {
            runner.stop_clock();
            break;
        }
    }
}

#[test]
fn headless_typing_flow_completes() {
    let mut race = Race::new(SessionConfig::new(Mode::Words, 1), "hi");

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key(KeyCode::Char('h'))).unwrap();
    tx.send(key(KeyCode::Char('i'))).unwrap();

    drive(&mut race, &mut runner, 100);

    assert!(race.has_finished(), "race should have finished typing");
    assert!(!runner.clock_running());
    let result = race.result().unwrap();
    assert_eq!(result.accuracy, 100.0);
    assert_eq!(result.reason, CompletionReason::TextCompleted);
}

#[test]
fn headless_backspace_flow() {
    let mut race = Race::new(SessionConfig::new(Mode::Quote, 0), "cat");

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for ev in [
        key(KeyCode::Char('c')),
        key(KeyCode::Char('b')),
        key(KeyCode::Backspace),
        key(KeyCode::Char('a')),
        key(KeyCode::Char('t')),
    ] {
        tx.send(ev).unwrap();
    }

    drive(&mut race, &mut runner, 100);

    assert!(race.has_finished());
    assert!(race.input().mistakes().is_empty());
    assert_eq!(race.result().unwrap().accuracy, 100.0);
}

#[test]
fn headless_timed_race_finishes_by_time() {
    let mut race = Race::new(SessionConfig::new(Mode::Time, 3), "hello");

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    tx.send(key(KeyCode::Char('h'))).unwrap();

    drive(&mut race, &mut runner, 50);

    assert!(race.has_finished(), "timed race should finish by timeout");
    let result = race.result().unwrap();
    assert_eq!(result.elapsed, 3);
    assert_eq!(result.reason, CompletionReason::TimeExpired);
    assert_eq!(race.input().len(), 1);
    drop(tx);
}
