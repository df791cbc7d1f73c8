//! Single forward pass over the client log.
//!
//! The scanner reads line by line, decodes each line as lossy UTF-8, and
//! runs a small state machine:
//!
//! - **Idle**: look for a marker line.
//! - **AwaitingJson**: a balanced-JSON marker was seen without a `{` on its
//!   line; the next non-blank line must open the object, otherwise the
//!   occurrence is dropped and that line is examined as a marker.
//! - **Balanced**: collecting an object until its braces balance. A new
//!   marker before that point means the payload was truncated.
//! - **Region**: collecting an until-next-marker payload.
//!
//! Incomplete payloads are dropped, never reported as errors. Only a read
//! failure aborts the pass.

use std::io::{BufRead, BufReader, Read};

use tracing::{debug, info};

use super::marker::{self, EventKind, PayloadPolicy};
use crate::core::ScanError;

/// One recognised event occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub kind: EventKind,
    /// Raw payload text (valid UTF-8 after lossy decoding).
    pub payload: Vec<u8>,
    /// Position among all occurrences of this scan, starting at 0.
    pub sequence: usize,
    /// 1-based line number of the marker.
    pub line: usize,
}

/// Brace-depth tracker for a JSON object spread over lines.
#[derive(Debug, Default)]
struct BalancedPayload {
    buf: String,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl BalancedPayload {
    /// Feed text; returns true once the outermost object closed.
    /// Anything after the closing brace is ignored.
    fn feed(&mut self, text: &str) -> bool {
        for c in text.chars() {
            self.buf.push(c);
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == '"' {
                    self.in_string = false;
                }
                continue;
            }
            match c {
                '"' => self.in_string = true,
                '{' => self.depth += 1,
                '}' => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.depth == 0 {
                        return true;
                    }
                }
                _ => {}
            }
        }
        self.buf.push('\n');
        false
    }
}

#[derive(Debug)]
enum State {
    Idle,
    AwaitingJson {
        kind: EventKind,
        line: usize,
    },
    Balanced {
        kind: EventKind,
        line: usize,
        payload: BalancedPayload,
    },
    Region {
        kind: EventKind,
        line: usize,
        buf: String,
    },
}

#[derive(Debug, Default)]
struct Collector {
    occurrences: Vec<Occurrence>,
}

impl Collector {
    fn push(&mut self, kind: EventKind, line: usize, payload: String) {
        debug!(%kind, line, bytes = payload.len(), "captured payload");
        let sequence = self.occurrences.len();
        self.occurrences.push(Occurrence {
            kind,
            payload: payload.into_bytes(),
            sequence,
            line,
        });
    }
}

/// Line-oriented scanner for the client log.
///
/// ```
/// use arena_assistant::logfile::{EventKind, LogScanner};
///
/// let log = "noise\n<== PlayerInventory.GetPlayerCardsV3(1)\n{\"payload\":{\"7\":2}}\n";
/// let found = LogScanner::new().scan(log.as_bytes()).unwrap();
///
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].kind, EventKind::Collection);
/// assert_eq!(found[0].line, 2);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LogScanner;

impl LogScanner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan the whole stream, returning every occurrence in stream order.
    pub fn scan<R: Read>(&self, reader: R) -> Result<Vec<Occurrence>, ScanError> {
        let mut reader = BufReader::new(reader);
        let mut raw = Vec::new();
        let mut state = State::Idle;
        let mut out = Collector::default();
        let mut line_no = 0usize;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            line_no += 1;
            while matches!(raw.last(), Some(b'\n' | b'\r')) {
                raw.pop();
            }
            let line = String::from_utf8_lossy(&raw);
            state = step(state, &line, line_no, &mut out);
        }

        finish(state, &mut out);
        info!(occurrences = out.occurrences.len(), lines = line_no, "log scanned");
        Ok(out.occurrences)
    }

    /// Scan for one kind only. Zero occurrences is `ScanError::NoOccurrence`.
    pub fn scan_kind<R: Read>(
        &self,
        reader: R,
        kind: EventKind,
    ) -> Result<Vec<Occurrence>, ScanError> {
        let found: Vec<_> = self
            .scan(reader)?
            .into_iter()
            .filter(|o| o.kind == kind)
            .collect();
        if found.is_empty() {
            return Err(ScanError::NoOccurrence(kind));
        }
        Ok(found)
    }
}

fn step(state: State, line: &str, line_no: usize, out: &mut Collector) -> State {
    match state {
        State::Idle => start(line, line_no, out),
        State::AwaitingJson { kind, line: at } => {
            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                return State::AwaitingJson { kind, line: at };
            }
            if trimmed.starts_with('{') {
                return open_balanced(kind, at, trimmed, out);
            }
            debug!(%kind, line = at, "marker without JSON payload");
            start(line, line_no, out)
        }
        State::Balanced {
            kind,
            line: at,
            mut payload,
        } => {
            if marker::recognize(line).is_some() {
                debug!(%kind, line = at, "payload truncated by next marker");
                return start(line, line_no, out);
            }
            if payload.feed(line) {
                out.push(kind, at, payload.buf);
                State::Idle
            } else {
                State::Balanced {
                    kind,
                    line: at,
                    payload,
                }
            }
        }
        State::Region {
            kind,
            line: at,
            mut buf,
        } => {
            if marker::is_boundary(line) {
                close_region(kind, at, buf, out);
                return start(line, line_no, out);
            }
            buf.push_str(line);
            buf.push('\n');
            State::Region { kind, line: at, buf }
        }
    }
}

fn start(line: &str, line_no: usize, out: &mut Collector) -> State {
    let Some(m) = marker::recognize(line) else {
        return State::Idle;
    };
    let rest = &line[m.end..];
    match m.kind.policy() {
        PayloadPolicy::BalancedJson => match rest.find('{') {
            Some(pos) => open_balanced(m.kind, line_no, &rest[pos..], out),
            None => State::AwaitingJson {
                kind: m.kind,
                line: line_no,
            },
        },
        PayloadPolicy::UntilNextMarker => {
            let mut buf = String::new();
            if !rest.trim().is_empty() {
                buf.push_str(rest.trim());
                buf.push('\n');
            }
            State::Region {
                kind: m.kind,
                line: line_no,
                buf,
            }
        }
    }
}

fn open_balanced(kind: EventKind, line: usize, text: &str, out: &mut Collector) -> State {
    let mut payload = BalancedPayload::default();
    if payload.feed(text) {
        out.push(kind, line, payload.buf);
        return State::Idle;
    }
    State::Balanced {
        kind,
        line,
        payload,
    }
}

fn close_region(kind: EventKind, line: usize, buf: String, out: &mut Collector) {
    if buf.trim().is_empty() {
        debug!(%kind, line, "empty payload region");
        return;
    }
    out.push(kind, line, buf);
}

fn finish(state: State, out: &mut Collector) {
    match state {
        State::Idle => {}
        State::AwaitingJson { kind, line } => {
            debug!(%kind, line, "marker without JSON payload at end of stream");
        }
        State::Balanced { kind, line, .. } => {
            debug!(%kind, line, "payload truncated at end of stream");
        }
        State::Region { kind, line, buf } => close_region(kind, line, buf, out),
    }
}
