use std::io::{BufRead, Lines};

use crate::base::{AccessRecord, AccessType};
use crate::error::{SimError, SimResult};

/// Parses one trace line: `<R|W> <hex address>`, with or without a `0x`
/// prefix. Tokens after the address are ignored. `line_no` is 1-based and
/// only used for error reporting.
pub fn parse_line(line_no: usize, line: &str) -> SimResult<AccessRecord> {
    let mut fields = line.split_whitespace();
    let (Some(kind), Some(addr)) = (fields.next(), fields.next()) else {
        return Err(SimError::malformed(
            line_no,
            line,
            "expected `<R|W> <hex address>`",
        ));
    };

    let access = match kind {
        "R" | "r" => AccessType::Read,
        "W" | "w" => AccessType::Write,
        _ => {
            return Err(SimError::malformed(
                line_no,
                line,
                format!("unknown access type '{}'", kind),
            ))
        }
    };

    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let addr = u32::from_str_radix(digits, 16).map_err(|err| {
        SimError::malformed(line_no, line, format!("bad address '{}': {}", addr, err))
    })?;

    Ok(AccessRecord { access, addr })
}

/// Lazily parses a trace, one record per line.
///
/// The first unparsable line (blank lines included) or read error is
/// yielded as an error and ends the iteration; records before it have
/// already been yielded.
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            done: false,
        }
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = SimResult<AccessRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let parsed = match self.lines.next()? {
            Ok(line) => {
                self.line_no += 1;
                parse_line(self.line_no, &line)
            }
            Err(err) => Err(err.into()),
        };
        self.done = parsed.is_err();
        Some(parsed)
    }
}
