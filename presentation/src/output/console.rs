//! Console renderer for workflow runs
//!
//! Prints every appended message as it happens. Nested workflows are
//! indented one level per depth so the crew's conversation reads as a
//! block inside the outer one:
//!
//! ```text
//! ▶ project
//! ── #1 Planner ──
//!   1. write factorial ...
//!   ▶ crew
//!   ── #1 Developer ──
//!     fn factorial(n: u64) -> u64 { ... }
//!   ✓ crew finished: termination token after 6 turns
//! ── #3 DevCrew ──
//! ```

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use turnstile_application::{
    ConversationObserver, ParticipantKind, RunOutcome, StopReason, WorkflowError,
};
use turnstile_domain::{Message, ParticipantId, SEED_SOURCE};

const INDENT: &str = "  ";

/// Renders a run to stdout, with a spinner while a model is working
pub struct ConsoleRenderer {
    show_progress: bool,
    spinner: Mutex<Option<ProgressBar>>,
    /// Kind of the participant currently acting, per nesting depth
    acting: Mutex<HashMap<usize, ParticipantKind>>,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self {
            show_progress: true,
            spinner: Mutex::new(None),
            acting: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Turn ANSI colors off process-wide when `enabled` is false.
    pub fn configure_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix}{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, depth: usize, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(INDENT.repeat(depth));
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(previous) = spinner.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    /// Header plus indented body for one message.
    pub fn format_message(
        depth: usize,
        message: &Message,
        kind: Option<ParticipantKind>,
    ) -> String {
        let pad = INDENT.repeat(depth);
        let header = format!("── #{} {} ──", message.sequence, message.source);
        let mut out = format!("{}{}\n", pad, Self::paint_header(&message.source, kind, header));
        for line in message.content.lines() {
            out.push_str(&pad);
            out.push_str(INDENT);
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// One-line summary of a finished run.
    pub fn format_outcome(workflow: &str, depth: usize, outcome: &RunOutcome) -> String {
        let reason = match outcome.stop_reason {
            StopReason::TerminationToken => "termination token",
            StopReason::SelectorExhausted => "no next speaker",
        };
        format!(
            "{}{} {} finished: {} after {} turns",
            INDENT.repeat(depth),
            "✓".green().bold(),
            workflow.bold(),
            reason,
            outcome.turns
        )
    }

    pub fn format_failure(workflow: &str, depth: usize, error: &WorkflowError) -> String {
        format!(
            "{}{} {} failed: {}",
            INDENT.repeat(depth),
            "✗".red().bold(),
            workflow.bold(),
            error.to_string().red()
        )
    }

    fn paint_header(
        source: &ParticipantId,
        kind: Option<ParticipantKind>,
        text: String,
    ) -> ColoredString {
        match kind {
            _ if source == SEED_SOURCE => text.dimmed(),
            Some(ParticipantKind::Human) => text.magenta().bold(),
            Some(ParticipantKind::NestedWorkflow) => text.cyan().bold(),
            _ => text.yellow().bold(),
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationObserver for ConsoleRenderer {
    fn on_run_start(&self, workflow: &str, depth: usize) {
        println!(
            "{}{} {}",
            INDENT.repeat(depth),
            "▶".cyan().bold(),
            workflow.cyan().bold()
        );
    }

    fn on_turn_start(
        &self,
        _workflow: &str,
        depth: usize,
        participant: &ParticipantId,
        kind: ParticipantKind,
    ) {
        if let Ok(mut acting) = self.acting.lock() {
            acting.insert(depth, kind);
        }
        if self.show_progress && kind == ParticipantKind::LanguageModel {
            self.start_spinner(depth, format!("{} is thinking...", participant));
        }
    }

    fn on_message(&self, _workflow: &str, depth: usize, message: &Message) {
        self.clear_spinner();
        let kind = self
            .acting
            .lock()
            .ok()
            .and_then(|mut acting| acting.remove(&depth));
        // The human just typed this; echoing it again adds nothing.
        if kind == Some(ParticipantKind::Human) {
            return;
        }
        print!("{}", Self::format_message(depth, message, kind));
    }

    fn on_run_complete(&self, workflow: &str, depth: usize, outcome: &RunOutcome) {
        self.clear_spinner();
        println!("{}", Self::format_outcome(workflow, depth, outcome));
    }

    fn on_run_failed(&self, workflow: &str, depth: usize, error: &WorkflowError) {
        self.clear_spinner();
        eprintln!("{}", Self::format_failure(workflow, depth, error));
    }
}
