//! End-to-end tests driving a full typing session against test doubles.

use heapless::Vec;

use hid_typist::config::{
    CHORD_SETTLE_DELAY_MS, INTER_KEY_DELAY_MS, SETTLE_DELAY_MS, STARTUP_DELAY_MS,
    TERMINAL_LAUNCH_DELAY_MS,
};
use hid_typist::hid::keyboard::KeyboardReport;
use hid_typist::hid::keymap::{
    KEY_A, KEY_COMMA, KEY_ENTER, KEY_PERIOD, KEY_SPACE, KEY_T, MOD_LEFT_ALT, MOD_LEFT_CTRL,
    MOD_LEFT_SHIFT,
};
use hid_typist::script::SCRIPT_LINES;
use hid_typist::sequencer::{Clock, ReportSink};
use hid_typist::session::SessionController;

#[derive(Default)]
struct RecordingSink {
    reports: Vec<KeyboardReport, 512>,
}

impl ReportSink for RecordingSink {
    fn is_ready(&self) -> bool {
        true
    }

    fn submit(&mut self, report: &KeyboardReport) {
        self.reports.push(*report).unwrap();
    }
}

#[derive(Default)]
struct RecordingClock {
    delays: Vec<u64, 512>,
}

impl Clock for RecordingClock {
    fn delay_ms(&mut self, ms: u64) {
        self.delays.push(ms).unwrap();
    }
}

/// Decode a key-down report back to the character it types.
fn decode(report: &KeyboardReport) -> char {
    let key = report.keycodes[0];
    let shifted = report.modifier & MOD_LEFT_SHIFT != 0;
    match key {
        KEY_A..=0x1D if shifted => (b'A' + (key - KEY_A)) as char,
        KEY_A..=0x1D => (b'a' + (key - KEY_A)) as char,
        KEY_SPACE => ' ',
        KEY_PERIOD => '.',
        KEY_COMMA => ',',
        KEY_ENTER => '\n',
        other => panic!("unexpected keycode {other:#04x}"),
    }
}

fn run_session(script: &[&str]) -> (RecordingSink, RecordingClock) {
    let mut session = SessionController::new(script);
    let mut sink = RecordingSink::default();
    let mut clock = RecordingClock::default();
    for _ in 0..64 {
        if session.is_done() {
            return (sink, clock);
        }
        session.poll(&mut sink, &mut clock);
    }
    panic!("session did not finish within the poll budget");
}

#[test]
fn default_script_is_typed_verbatim() {
    let (sink, _) = run_session(SCRIPT_LINES);

    // First keystroke is the terminal chord.
    assert_eq!(sink.reports[0].keycodes[0], KEY_T);
    assert_eq!(sink.reports[0].modifier, MOD_LEFT_CTRL | MOD_LEFT_ALT);

    // Everything after the chord decodes back to the script, one Enter
    // per line.  The default script only uses mappable characters, so
    // nothing is lost to the silent-skip policy.
    let typed: String = sink
        .reports
        .iter()
        .skip(2)
        .filter(|r| !r.is_empty())
        .map(decode)
        .collect();
    let mut expected = String::new();
    for line in SCRIPT_LINES {
        expected.push_str(line);
        expected.push('\n');
    }
    assert_eq!(typed, expected);
}

#[test]
fn every_key_down_is_released_before_the_next() {
    let (sink, _) = run_session(SCRIPT_LINES);

    let mut holding = false;
    for report in sink.reports.iter() {
        if report.is_empty() {
            holding = false;
        } else {
            assert!(!holding, "two key-down reports without a release between");
            holding = true;
        }
    }
    assert!(!holding, "session ended with a key still held");
}

#[test]
fn session_observes_only_the_design_delays() {
    let (_, clock) = run_session(SCRIPT_LINES);

    assert_eq!(clock.delays[0], STARTUP_DELAY_MS);
    assert_eq!(clock.delays[1], CHORD_SETTLE_DELAY_MS);
    assert_eq!(clock.delays[2], TERMINAL_LAUNCH_DELAY_MS);
    for &ms in clock.delays.iter().skip(3) {
        assert!(
            ms == SETTLE_DELAY_MS || ms == INTER_KEY_DELAY_MS,
            "unexpected delay {ms} ms"
        );
    }
}

#[test]
fn completed_session_stays_latched() {
    let mut session = SessionController::new(SCRIPT_LINES);
    let mut sink = RecordingSink::default();
    let mut clock = RecordingClock::default();
    while !session.is_done() {
        session.poll(&mut sink, &mut clock);
    }

    let transmitted = sink.reports.len();
    for _ in 0..100 {
        session.poll(&mut sink, &mut clock);
    }
    assert_eq!(sink.reports.len(), transmitted);
}

#[test]
fn report_count_matches_script_size() {
    let (sink, _) = run_session(SCRIPT_LINES);

    // 2 chord reports + 2 per keystroke, with one Enter per line and no
    // unmappable characters in the default script.
    let keystrokes: usize = SCRIPT_LINES
        .iter()
        .map(|line| line.chars().count() + 1)
        .sum();
    assert_eq!(sink.reports.len(), 2 + 2 * keystrokes);
}
