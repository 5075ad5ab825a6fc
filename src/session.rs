//! Session controller - the run-once state machine driving a whole
//! typing session.
//!
//! A session moves strictly forward: startup delay, terminal-opening
//! chord (Ctrl+Alt+T), each script line in declaration order, then
//! `Done`.  `Done` is the run-once latch; once reached the controller
//! performs no further transport activity no matter how often it is
//! invoked.  There is no reset short of constructing a new controller
//! (on hardware: a power cycle).

use crate::config::{CHORD_SETTLE_DELAY_MS, STARTUP_DELAY_MS, TERMINAL_LAUNCH_DELAY_MS};
use crate::hid::keyboard::KeyboardReport;
use crate::hid::keymap::{KEY_T, MOD_LEFT_ALT, MOD_LEFT_CTRL};
use crate::sequencer::{run_step, Clock, LineTyper, ReportSink, Step};

/// Where the session currently stands.  Transitions are monotonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    NotStarted,
    OpeningTerminal,
    TypingLine(usize),
    Done,
}

/// Output of [`SessionController::step`].  `Idle` means the session is
/// done and nothing will ever be emitted again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionStep {
    Report(KeyboardReport),
    Delay(u64),
    Idle,
}

/// Progress through the terminal-opening chord.
#[derive(Clone, Copy)]
enum ChordStage {
    Press,
    Settle,
    Release,
    Launch,
}

/// Owns the session phase and the in-progress line typer; borrows the
/// script store read-only.  Single writer of all session state.
pub struct SessionController<'a> {
    script: &'a [&'a str],
    phase: Phase,
    chord: ChordStage,
    typer: Option<LineTyper<'a>>,
}

impl<'a> SessionController<'a> {
    pub fn new(script: &'a [&'a str]) -> Self {
        Self {
            script,
            phase: Phase::NotStarted,
            chord: ChordStage::Press,
            typer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Transport hook for "report transmission completed" notifications.
    /// The engine paces itself with fixed delays and does not act on
    /// completion, but the hook stays in the interface for transports
    /// that deliver it.
    pub fn report_complete(&mut self) {}

    /// Produce the next report or delay, advancing internal state.
    ///
    /// This is the re-entrant, event-driven surface: each call returns
    /// exactly one step, and the caller decides how to wait.  Returns
    /// [`SessionStep::Idle`] forever once the session is done.
    pub fn step(&mut self) -> SessionStep {
        match self.phase {
            Phase::NotStarted => {
                // Gate the first keystroke behind a fixed startup delay
                // so the host finishes enumeration before typing begins.
                self.phase = Phase::OpeningTerminal;
                self.chord = ChordStage::Press;
                SessionStep::Delay(STARTUP_DELAY_MS)
            }
            Phase::OpeningTerminal => self.chord_step(),
            Phase::TypingLine(index) => self.line_step(index),
            Phase::Done => SessionStep::Idle,
        }
    }

    /// Blocking driver matching a host poll loop: each invocation either
    /// advances the session by exactly one phase transition (typing an
    /// entire line, or the whole chord) or is a no-op once done.
    pub fn poll<S: ReportSink, C: Clock>(&mut self, sink: &mut S, clock: &mut C) {
        let entry = self.phase;
        loop {
            let step = match self.step() {
                SessionStep::Report(report) => Step::Report(report),
                SessionStep::Delay(ms) => Step::Delay(ms),
                SessionStep::Idle => return,
            };
            run_step(step, sink, clock);
            if self.phase != entry {
                return;
            }
        }
    }

    /// Ctrl+Alt+T: chord down, settle, release, then a longer delay for
    /// the terminal to open and take focus.
    fn chord_step(&mut self) -> SessionStep {
        match self.chord {
            ChordStage::Press => {
                self.chord = ChordStage::Settle;
                SessionStep::Report(KeyboardReport::key_down(KEY_T, MOD_LEFT_CTRL | MOD_LEFT_ALT))
            }
            ChordStage::Settle => {
                self.chord = ChordStage::Release;
                SessionStep::Delay(CHORD_SETTLE_DELAY_MS)
            }
            ChordStage::Release => {
                self.chord = ChordStage::Launch;
                SessionStep::Report(KeyboardReport::release())
            }
            ChordStage::Launch => {
                self.enter_line(0);
                SessionStep::Delay(TERMINAL_LAUNCH_DELAY_MS)
            }
        }
    }

    fn line_step(&mut self, index: usize) -> SessionStep {
        let step = match self.typer.as_mut().and_then(|t| t.next()) {
            Some(step) => step,
            // Exhausted typer without a final step seen; move on.
            None => {
                self.enter_line(index + 1);
                return self.step();
            }
        };

        // Advance the phase together with the line's final step, so a
        // poll cycle ends exactly on the line boundary.
        if self.typer.as_ref().is_some_and(|t| t.is_finished()) {
            self.enter_line(index + 1);
        }

        match step {
            Step::Report(report) => SessionStep::Report(report),
            Step::Delay(ms) => SessionStep::Delay(ms),
        }
    }

    fn enter_line(&mut self, index: usize) {
        match self.script.get(index) {
            Some(line) => {
                self.phase = Phase::TypingLine(index);
                self.typer = Some(LineTyper::new(line));
            }
            None => {
                self.phase = Phase::Done;
                self.typer = None;
            }
        }
    }
}
