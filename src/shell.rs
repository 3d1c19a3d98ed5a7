//! Line-based wizard shell.
//!
//! Reads one command per line, applies it to the session and writes a short
//! reply plus the current step. Rendering is plain text.

use std::io::Write;

use chrono::{DateTime, Utc};
use tracing::debug;

use sw_app::input::{parse_line, CommandOutcome, InputLine, WizardCommand};
use sw_core::wizard::WizardController;

use crate::bootstrap::wiring::WizardSession;

pub const HELP: &str = "\
commands:
  complete [step] [json]   validate and complete a step, then advance
  data [step] <json>       store step data without completing
  skip [step]              skip the current step
  next | prev              move forward or back
  goto <step>              jump to a reachable step
  save                     save a draft now
  reset                    discard all progress and the stored draft
  status                   show progress
  quit                     leave (progress stays saved)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Continue,
    Quit,
}

/// Handle one input line.
pub async fn handle_line<W: Write>(
    session: &mut WizardSession,
    line: &str,
    out: &mut W,
) -> anyhow::Result<ShellAction> {
    let input = match parse_line(line) {
        Ok(input) => input,
        Err(err) => {
            writeln!(out, "error: {err}")?;
            return Ok(ShellAction::Continue);
        }
    };

    match input {
        InputLine::Empty => {}
        InputLine::Quit => return Ok(ShellAction::Quit),
        InputLine::Help => writeln!(out, "{HELP}")?,
        InputLine::Status => writeln!(out, "{}", render_status(&session.controller))?,
        InputLine::Command(WizardCommand::Reset) => {
            session.discard.execute(&mut session.controller).await?;
            writeln!(out, "progress discarded")?;
            write_current(&mut session.controller, out)?;
        }
        InputLine::Command(command) => match command.apply(&mut session.controller) {
            Ok(outcome) => {
                write_outcome(&outcome, out)?;
                write_current(&mut session.controller, out)?;
            }
            Err(rejection) => {
                debug!(%rejection, "shell command rejected");
                writeln!(out, "rejected: {rejection}")?;
                for error in rejection.validation_errors() {
                    writeln!(out, "  - {error}")?;
                }
            }
        },
    }
    Ok(ShellAction::Continue)
}

fn write_outcome<W: Write>(outcome: &CommandOutcome, out: &mut W) -> std::io::Result<()> {
    match outcome {
        CommandOutcome::Moved(_) => Ok(()),
        CommandOutcome::Finished => writeln!(out, "wizard complete"),
        CommandOutcome::DataUpdated(result) if result.is_valid => writeln!(out, "data stored"),
        CommandOutcome::DataUpdated(result) => {
            writeln!(out, "data stored with errors:")?;
            for error in &result.errors {
                writeln!(out, "  - {error}")?;
            }
            Ok(())
        }
        CommandOutcome::DraftSaved(snapshot) => match snapshot.saved_at_ms.and_then(format_ms) {
            Some(at) => writeln!(out, "draft saved at {at}"),
            None => writeln!(out, "draft saved"),
        },
        CommandOutcome::Reset => writeln!(out, "wizard reset"),
    }
}

/// Header for the current step, followed by its rendered content if any.
pub fn write_current<W: Write>(controller: &mut WizardController, out: &mut W) -> std::io::Result<()> {
    let progress = controller.progress();
    let step = controller.current_step();
    let position = controller
        .registry()
        .position(step.id())
        .map(|index| index + 1)
        .unwrap_or_default();

    let mut flags = Vec::new();
    if controller.is_completed(step.id()) {
        flags.push("done");
    }
    if step.is_optional() {
        flags.push("optional");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" ({})", flags.join(", "))
    };

    writeln!(
        out,
        "[{position}/{total}] {title} <{id}>{flags}  {percentage}%",
        total = progress.total_steps,
        title = step.title(),
        id = step.id(),
        percentage = progress.percentage,
    )?;
    if !step.description().is_empty() {
        writeln!(out, "  {}", step.description())?;
    }

    if let Some(view) = controller.render_current() {
        writeln!(out, "  {}", view.heading)?;
        for line in view.lines {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

pub fn render_status(controller: &WizardController) -> String {
    let progress = controller.progress();
    let completed: Vec<&str> = controller
        .completed_step_ids()
        .iter()
        .map(|id| id.as_str())
        .collect();
    let mut status = format!(
        "status: {:?}, step {}, {}% ({}/{} steps, {}/{} required)\ncompleted: [{}]",
        controller.status(),
        controller.current_step_id(),
        progress.percentage,
        progress.completed_count,
        progress.total_steps,
        progress.required_completed,
        progress.required_total,
        completed.join(", "),
    );
    if let Some(at) = controller.last_snapshot_at_ms().and_then(format_ms) {
        status.push_str(&format!("\nlast draft: {at}"));
    }
    status
}

fn format_ms(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
