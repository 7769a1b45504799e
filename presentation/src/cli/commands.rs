//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the crew reports back to the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryArg {
    /// The crew's final message, verbatim
    Final,
    /// A model summary of the crew's whole conversation (default)
    Model,
}

/// CLI arguments for turnstile
#[derive(Parser, Debug)]
#[command(name = "turnstile")]
#[command(author, version, about = "Nested multi-agent build workflow with human review gates")]
#[command(long_about = r#"
Turnstile runs a two-level agent workflow on a task.

The outer workflow:
1. Planner drafts a step-by-step plan (ends with PLAN COMPLETE)
2. You review it: reply "approve" to hand it to the crew, anything else to re-plan
3. The crew runs, then you review its summary: "approve" sends the crew
   back to work on your notes, TERMINATE finishes

The crew (nested workflow):
  Developer -> Tester -> DocWriter, each reviewed by you.
  Reply "approve" or "good" to advance, anything else to retry the stage,
  and include FINALIZE to end the crew's run.

Configuration files are loaded from (in priority order):
1. TURNSTILE_* env vars  e.g. TURNSTILE_PROVIDER__BASE_URL
2. --config <path>       Explicit config file
3. ./turnstile.toml      Project-level config
4. ~/.config/turnstile/config.toml   Global config

Example:
  turnstile "build factorial function"
  turnstile --summary final --conversation-log run.jsonl "write a CSV parser"
"#)]
pub struct Cli {
    /// The task to give the planner (prompted for when omitted)
    pub task: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Cap on participant turns per workflow (overrides config)
    #[arg(long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// Write a JSONL transcript of every workflow to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// How the crew's result is reported to the outer workflow
    #[arg(long, value_enum)]
    pub summary: Option<SummaryArg>,

    /// Model for every role without an explicit override
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,
}
