//! Subcommands and their output.

use clap::Subcommand;
use nu_ansi_term::{Color, Style};
use serde::Serialize;
use serde_json::json;
use tapeworks_core::MachineConfig;
use tapeworks_programs::acceptor::{self, Acceptance};
use tapeworks_programs::handwritten::Handwritten;
use tapeworks_programs::increment::{self, Variant};
use tapeworks_programs::{beaver, countdown, text, Report};

use crate::error::Result;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the binary increment program
    Increment {
        /// Digits laid out after a leading blank
        #[arg(default_value = "001")]
        digits: String,

        /// Also flip digits on the way back
        #[arg(long)]
        flipping: bool,
    },

    /// Run the three-state busy beaver
    Beaver3,

    /// Run the four-state busy beaver
    Beaver4,

    /// Check whether INPUT, read from --head, starts with TARGET
    Accept {
        input: String,
        target: String,

        /// Cell to start reading from
        #[arg(long, default_value_t = 0)]
        head: usize,
    },

    /// Accept FIRST, then SECOND from where FIRST stopped
    Sequence {
        input: String,
        first: String,
        second: String,
    },

    /// Feed inputs to the hand-written "abc" acceptor, one after another
    Handwritten {
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Count down through a bare trampoline chain
    Countdown { start: u64 },
}

/// Renders command results as text or JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    pub json: bool,
    pub color: bool,
}

impl Printer {
    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        self.paint(Style::new().bold().fg(Color::Cyan), text)
    }

    fn verdict(&self, accepted: bool) -> String {
        if accepted {
            self.paint(Style::new().fg(Color::Green), "accepted")
        } else {
            self.paint(Style::new().fg(Color::Red), "rejected")
        }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn report<S: Serialize>(&self, report: &Report<S>) -> Result<String> {
        if self.json {
            return self.to_json(report);
        }
        Ok(format!(
            "{} {}\n{} {}\n{}",
            self.label("tape:"),
            report.rendered,
            self.label("head:"),
            report.head,
            report.statistics
        )
        .trim_end()
        .to_string())
    }

    pub fn acceptance(&self, acceptance: &Acceptance) -> Result<String> {
        if self.json {
            return self.to_json(acceptance);
        }
        Ok(format!(
            "{}\n{} {}",
            self.verdict(acceptance.accepted),
            self.label("head:"),
            acceptance.head
        ))
    }

    pub fn verdicts(&self, results: &[(String, bool)]) -> Result<String> {
        if self.json {
            let rows: Vec<_> = results
                .iter()
                .map(|(input, accepted)| json!({ "input": input, "accepted": accepted }))
                .collect();
            return self.to_json(&rows);
        }
        let lines: Vec<_> = results
            .iter()
            .map(|(input, accepted)| format!("{:?}: {}", input, self.verdict(*accepted)))
            .collect();
        Ok(lines.join("\n"))
    }

    pub fn countdown(&self, start: u64, invocations: u64) -> Result<String> {
        if self.json {
            return self.to_json(&json!({ "start": start, "invocations": invocations }));
        }
        Ok(format!("{} {}", self.label("invocations:"), invocations))
    }
}

/// Run `command` and render its result.
pub fn execute(command: &Command, config: MachineConfig, printer: &Printer) -> Result<String> {
    match command {
        Command::Increment { digits, flipping } => {
            let variant = if *flipping {
                Variant::Flipping
            } else {
                Variant::Plain
            };
            printer.report(&increment::run(digits, variant, config)?)
        }
        Command::Beaver3 => printer.report(&beaver::three_state(config)?),
        Command::Beaver4 => printer.report(&beaver::four_state(config)?),
        Command::Accept {
            input,
            target,
            head,
        } => {
            let result = acceptor::accept_with(
                config,
                *head,
                &text::sequence(input),
                &text::sequence(target),
            )?;
            printer.acceptance(&result)
        }
        Command::Sequence {
            input,
            first,
            second,
        } => {
            let result = acceptor::accept_sequence_with(
                config,
                &text::sequence(input),
                &text::sequence(first),
                &text::sequence(second),
            )?;
            printer.acceptance(&result)
        }
        Command::Handwritten { inputs } => {
            let mut machine = Handwritten::new(config)?;
            let mut results = Vec::with_capacity(inputs.len());
            for input in inputs {
                results.push((input.clone(), machine.check(input)?));
            }
            printer.verdicts(&results)
        }
        Command::Countdown { start } => printer.countdown(*start, countdown::countdown(*start)),
    }
}
