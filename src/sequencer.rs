//! Keystroke sequencer - turns a script line into a paced stream of
//! HID reports.
//!
//! Every logical keystroke becomes exactly two reports: a key-down
//! holding the single keycode plus its modifiers, then the all-zero
//! key-up.  The engine never reports two keys held at once; presses are
//! strictly serialized with fixed settle and inter-key delays between
//! them.
//!
//! [`LineTyper`] is the re-entrant core: an iterator of [`Step`]s that a
//! driver interprets one at a time.  The async firmware awaits each step
//! (delays become yield points); hosts with a blocking poll loop use
//! [`type_line`], which spins on transport readiness and blocks through
//! the delays.

use crate::config::{INTER_KEY_DELAY_MS, SETTLE_DELAY_MS};
use crate::hid::keyboard::KeyboardReport;
use crate::hid::keymap::{self, Keystroke, KEY_ENTER, MOD_NONE};

/// Report submission channel exposed by the transport.
///
/// The sequencer checks [`is_ready`](ReportSink::is_ready) before every
/// submission and treats [`submit`](ReportSink::submit) as
/// fire-and-forget; delivery acknowledgment is the transport's business.
pub trait ReportSink {
    /// `true` iff a new report may be submitted without being dropped.
    fn is_ready(&self) -> bool;

    /// Hand a report to the transport.
    fn submit(&mut self, report: &KeyboardReport);
}

/// Injected delay capability.
///
/// A blocking host loop implements this as a busy-wait; an async target
/// implements it as a yield point instead, so collaborators progress
/// during keystroke pacing.
pub trait Clock {
    fn delay_ms(&mut self, ms: u64);
}

/// One unit of sequencer output: either a report to transmit (after the
/// sink signals ready) or a delay to observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Report(KeyboardReport),
    Delay(u64),
}

/// Micro-phase within one keystroke's down/settle/up/pause cycle.
#[derive(Clone, Copy)]
enum Stage {
    Press,
    Settle,
    Release,
    Pause,
}

/// Iterator over the steps that type one script line.
///
/// Yields, for each mappable character in order: key-down, settle delay,
/// key-up, inter-key delay.  Unmappable characters are skipped without
/// emitting anything.  After the last character an Enter keystroke is
/// unconditionally appended, so a line of `N` characters with `M`
/// unmappable ones produces `2 * (N - M + 1)` reports.
pub struct LineTyper<'a> {
    chars: core::str::Chars<'a>,
    current: Option<Keystroke>,
    stage: Stage,
    enter_queued: bool,
    finished: bool,
}

impl<'a> LineTyper<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars(),
            current: None,
            stage: Stage::Press,
            enter_queued: false,
            finished: false,
        }
    }

    /// `true` once the final step (the pause after Enter's release) has
    /// been yielded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Next keystroke to type: the next mappable character, then Enter.
    fn next_keystroke(&mut self) -> Option<Keystroke> {
        while let Some(c) = self.chars.next() {
            let ks = keymap::map_char(c);
            if ks.is_mappable() {
                return Some(ks);
            }
        }
        if !self.enter_queued {
            self.enter_queued = true;
            return Some(Keystroke::new(KEY_ENTER, MOD_NONE));
        }
        None
    }
}

impl Iterator for LineTyper<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.finished {
            return None;
        }

        let ks = match self.current {
            Some(ks) => ks,
            None => match self.next_keystroke() {
                Some(ks) => {
                    self.current = Some(ks);
                    self.stage = Stage::Press;
                    ks
                }
                None => {
                    self.finished = true;
                    return None;
                }
            },
        };

        match self.stage {
            Stage::Press => {
                self.stage = Stage::Settle;
                Some(Step::Report(KeyboardReport::key_down(ks.keycode, ks.modifier)))
            }
            Stage::Settle => {
                self.stage = Stage::Release;
                Some(Step::Delay(SETTLE_DELAY_MS))
            }
            Stage::Release => {
                self.stage = Stage::Pause;
                Some(Step::Report(KeyboardReport::release()))
            }
            Stage::Pause => {
                self.current = None;
                // Enter is always the last keystroke of a line.
                if ks.keycode == KEY_ENTER {
                    self.finished = true;
                }
                Some(Step::Delay(INTER_KEY_DELAY_MS))
            }
        }
    }
}

/// Execute one step against the transport: spin until the sink is ready
/// before submitting, or block through the delay.
pub(crate) fn run_step<S: ReportSink, C: Clock>(step: Step, sink: &mut S, clock: &mut C) {
    match step {
        Step::Report(report) => {
            while !sink.is_ready() {
                core::hint::spin_loop();
            }
            sink.submit(&report);
        }
        Step::Delay(ms) => clock.delay_ms(ms),
    }
}

/// Type one full line (plus the trailing Enter), blocking form.
pub fn type_line<S: ReportSink, C: Clock>(line: &str, sink: &mut S, clock: &mut C) {
    for step in LineTyper::new(line) {
        run_step(step, sink, clock);
    }
}
