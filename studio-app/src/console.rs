//! Line-oriented JSON console.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use studio_ipc::{SessionEvent, SessionInput};

/// Parse one console line. Blank lines and `#` comments yield None.
pub fn parse_line(line: &str) -> Result<Option<SessionInput>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let input = serde_json::from_str(line).with_context(|| format!("invalid input: {line}"))?;
    Ok(Some(input))
}

/// Forward inputs from `reader` until end of input or the session goes away.
pub fn read_inputs(reader: impl BufRead, input_tx: &Sender<SessionInput>) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("reading console input")?;

        let input = match parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                warn!("{e:#}");
                continue;
            }
        };

        debug!(input = input.name(), "Console input");
        if input_tx.send(input).is_err() {
            debug!("Session gone, stopping console input");
            break;
        }
    }
    Ok(())
}

/// Write every event as one JSON line until the session closes its channel.
pub fn write_events(event_rx: Receiver<SessionEvent>, mut out: impl Write) -> Result<()> {
    for event in event_rx {
        let line = serde_json::to_string(&event).context("encoding event")?;
        writeln!(out, "{line}").context("writing event")?;
        out.flush().context("flushing events")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_ipc::{event_channel, input_channel, ExternalEvent, SessionCommand, SourceMode};

    #[test]
    fn test_parse_line_skips_blank_and_comments() {
        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("   # admit the first guest").unwrap().is_none());
    }

    #[test]
    fn test_parse_line_reads_commands_and_events() {
        assert_eq!(
            parse_line(r#"{"Command":{"SetSource":"Both"}}"#).unwrap(),
            Some(SessionCommand::SetSource(SourceMode::Both).into())
        );
        assert_eq!(
            parse_line(r#"{"External":{"ViewerCountChanged":5}}"#).unwrap(),
            Some(ExternalEvent::ViewerCountChanged(5).into())
        );
        assert_eq!(
            parse_line(r#"{"Command":"SendChat"}"#).unwrap(),
            Some(SessionCommand::SendChat.into())
        );
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        assert!(parse_line("{not json").is_err());
    }

    #[test]
    fn test_read_inputs_skips_bad_lines() {
        let (input_tx, input_rx) = input_channel();
        let script = "# demo\n{\"Command\":\"CopyInvite\"}\nbogus\n{\"Command\":\"Shutdown\"}\n";

        read_inputs(script.as_bytes(), &input_tx).unwrap();

        let inputs: Vec<_> = input_rx.try_iter().collect();
        assert_eq!(
            inputs,
            vec![
                SessionCommand::CopyInvite.into(),
                SessionCommand::Shutdown.into()
            ]
        );
    }

    #[test]
    fn test_write_events_one_per_line() {
        let (event_tx, event_rx) = event_channel();
        event_tx.send(SessionEvent::Ready).unwrap();
        event_tx.send(SessionEvent::Shutdown).unwrap();
        drop(event_tx);

        let mut out = Vec::new();
        write_events(event_rx, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\"Ready\"\n\"Shutdown\"\n");
    }
}
