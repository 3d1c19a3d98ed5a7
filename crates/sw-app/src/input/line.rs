//! Line-oriented input for text hosts.
//!
//! ```text
//! complete [step] [json]   data [step] <json>   skip [step]
//! next   prev   goto <step>   save   reset   status   help   quit
//! ```

use serde_json::Value;

use sw_core::ids::StepId;

use super::command::WizardCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum InputLine {
    Command(WizardCommand),
    Status,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLineError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("`{0}` needs a step id")]
    MissingStep(&'static str),
    #[error("`{0}` needs JSON data")]
    MissingData(&'static str),
    #[error("invalid JSON data: {0}")]
    InvalidJson(String),
}

pub fn parse_line(line: &str) -> Result<InputLine, ParseLineError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let parsed = match verb {
        "" => InputLine::Empty,
        "status" => InputLine::Status,
        "help" | "?" => InputLine::Help,
        "quit" | "exit" => InputLine::Quit,
        "next" => InputLine::Command(WizardCommand::Next),
        "prev" | "back" => InputLine::Command(WizardCommand::Previous),
        "save" => InputLine::Command(WizardCommand::SaveDraft),
        "reset" => InputLine::Command(WizardCommand::Reset),
        "skip" => InputLine::Command(WizardCommand::Skip(optional_step(rest))),
        "goto" => match optional_step(rest) {
            Some(step) => InputLine::Command(WizardCommand::GoTo(step)),
            None => return Err(ParseLineError::MissingStep("goto")),
        },
        "complete" | "done" => {
            let (step, data) = step_and_data(rest)?;
            InputLine::Command(WizardCommand::Complete { step, data })
        }
        "data" | "set" => match step_and_data(rest)? {
            (step, Some(data)) => InputLine::Command(WizardCommand::SetData { step, data }),
            (_, None) => return Err(ParseLineError::MissingData("data")),
        },
        other => return Err(ParseLineError::UnknownCommand(other.to_string())),
    };
    Ok(parsed)
}

fn optional_step(rest: &str) -> Option<StepId> {
    rest.split_whitespace().next().map(StepId::from)
}

/// `[step] [json]`; JSON starts at the first `{`, `[` or `"`.
fn step_and_data(rest: &str) -> Result<(Option<StepId>, Option<Value>), ParseLineError> {
    if rest.is_empty() {
        return Ok((None, None));
    }

    let (step, json) = if looks_like_json(rest) {
        (None, rest)
    } else {
        match rest.split_once(char::is_whitespace) {
            Some((step, json)) => (Some(StepId::from(step)), json.trim()),
            None => (Some(StepId::from(rest)), ""),
        }
    };

    if json.is_empty() {
        return Ok((step, None));
    }
    let data = serde_json::from_str(json).map_err(|e| ParseLineError::InvalidJson(e.to_string()))?;
    Ok((step, Some(data)))
}

fn looks_like_json(raw: &str) -> bool {
    raw.starts_with(['{', '[', '"'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_navigation_verbs() {
        assert_eq!(parse_line("next").unwrap(), InputLine::Command(WizardCommand::Next));
        assert_eq!(
            parse_line("  prev ").unwrap(),
            InputLine::Command(WizardCommand::Previous)
        );
        assert_eq!(
            parse_line("goto company").unwrap(),
            InputLine::Command(WizardCommand::GoTo(StepId::from("company")))
        );
        assert_eq!(parse_line("").unwrap(), InputLine::Empty);
        assert_eq!(parse_line("quit").unwrap(), InputLine::Quit);
    }

    #[test]
    fn parses_complete_with_and_without_step() {
        assert_eq!(
            parse_line(r#"complete {"name":"x"}"#).unwrap(),
            InputLine::Command(WizardCommand::Complete {
                step: None,
                data: Some(json!({ "name": "x" })),
            })
        );
        assert_eq!(
            parse_line(r#"complete A {"name": "x"}"#).unwrap(),
            InputLine::Command(WizardCommand::Complete {
                step: Some(StepId::from("A")),
                data: Some(json!({ "name": "x" })),
            })
        );
        assert_eq!(
            parse_line("complete").unwrap(),
            InputLine::Command(WizardCommand::Complete {
                step: None,
                data: None,
            })
        );
    }

    #[test]
    fn data_requires_json() {
        assert_eq!(
            parse_line("data A").unwrap_err(),
            ParseLineError::MissingData("data")
        );
        assert!(matches!(
            parse_line("data {nope").unwrap_err(),
            ParseLineError::InvalidJson(_)
        ));
    }

    #[test]
    fn goto_requires_step_and_unknown_verbs_fail() {
        assert_eq!(
            parse_line("goto").unwrap_err(),
            ParseLineError::MissingStep("goto")
        );
        assert_eq!(
            parse_line("fly away").unwrap_err(),
            ParseLineError::UnknownCommand("fly".to_string())
        );
    }
}
