//! Incremental Server-Sent Events framing.
//!
//! Feed the parser one line at a time (a trailing LF must be removed; a
//! leftover CR from CRLF framing is tolerated); a blank line dispatches the
//! accumulated event. Only the `data` field matters for
//! this feed: comments and the `event`/`id`/`retry` fields are accepted and
//! ignored.

/// Accumulates `data:` lines into complete event payloads.
#[derive(Debug, Default)]
pub struct EventParser {
    data: Vec<String>,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one line of the stream. Returns the event payload when the
    /// line completes an event, `None` otherwise.
    ///
    /// Multiple `data:` lines in one event are joined with `\n` per the SSE
    /// spec. An event carrying no `data` field dispatches nothing.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        // The event-stream grammar allows CR, LF, and CRLF terminators; a
        // caller splitting on LF alone hands us lines with a trailing CR.
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            if self.data.is_empty() {
                return None;
            }
            return Some(self.data.drain(..).collect::<Vec<_>>().join("\n"));
        }

        // Comment line.
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            // A line without a colon is a field with an empty value.
            None => (line, ""),
        };

        if field == "data" {
            self.data.push(value.to_string());
        }
        None
    }
}
