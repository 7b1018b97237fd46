//! Interpolation Splitter
//!
//! Cuts the content of an interpolated literal into the runs of SQL text between `{expression}`
//! holes. Only those runs are tokenized; hole contents are C#, not SQL.
//!
//! Scanning rules, left to right:
//!
//! - Outside a hole, `{{` and `}}` are escaped braces. Both characters stay in the current run.
//! - `{` outside a hole ends the current run and opens a hole. Inside a hole, `{` nests one
//!   level deeper and `}` climbs one level; the hole closes when depth returns to zero and the
//!   next run starts right after that brace.
//! - Inside a hole, a `"` or `'` opens a nested string that lasts until the same quote comes
//!   back. In a nested string a backslash swallows the next character, so braces and quotes
//!   there never change the hole depth.
//! - At the end, the trailing run is kept only if no hole is open. An unbalanced `{` drops
//!   everything after it.
//!
//! Empty runs are omitted.

use super::ast::{SqlSegment, StringLiteralSpan};
use super::document::TextBuffer;
use std::ops::Range as ByteRange;

/// Byte ranges of the SQL runs in an interpolated literal's content.
pub fn split_interpolated(text: &str) -> Vec<ByteRange<usize>> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut run_start = 0;
    let mut depth = 0usize;
    let mut nested_quote: Option<u8> = None;
    let mut i = 0;

    let push_run = |runs: &mut Vec<ByteRange<usize>>, start: usize, end: usize| {
        if start < end {
            tracing::trace!(start, end, run = &text[start..end], "sql run");
            runs.push(start..end);
        }
    };

    while i < bytes.len() {
        let byte = bytes[i];

        if depth > 0 {
            if let Some(quote) = nested_quote {
                if byte == b'\\' && i + 1 < bytes.len() {
                    i += 2;
                    continue;
                }
                if byte == quote {
                    nested_quote = None;
                }
                i += 1;
                continue;
            }

            match byte {
                b'"' | b'\'' => nested_quote = Some(byte),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        run_start = i + 1;
                    }
                }
                _ => {}
            }
            i += 1;
            continue;
        }

        match byte {
            b'{' | b'}' if bytes.get(i + 1) == Some(&byte) => {
                i += 2;
                continue;
            }
            b'{' => {
                push_run(&mut runs, run_start, i);
                depth = 1;
            }
            _ => {}
        }
        i += 1;
    }

    if depth == 0 {
        push_run(&mut runs, run_start, bytes.len());
    } else {
        tracing::trace!(depth, "unbalanced interpolation hole, dropping tail");
    }

    runs
}

/// Turn a literal into the SQL segments fed to the tokenizer.
///
/// A verbatim literal is a single segment (when non-empty). An interpolated literal yields one
/// segment per run between holes. `index` is recorded on every segment as its origin.
pub fn segments_for<B: TextBuffer + ?Sized>(
    buffer: &B,
    literal: &StringLiteralSpan,
    index: usize,
) -> Vec<SqlSegment> {
    if !literal.is_interpolated() {
        if literal.range.is_empty() {
            return Vec::new();
        }
        return vec![SqlSegment::new(literal.range.clone(), index)];
    }

    let base = literal.range.span.start;
    split_interpolated(literal.raw(buffer))
        .into_iter()
        .map(|run| {
            SqlSegment::new(
                buffer.range_for(base + run.start, base + run.end),
                index,
            )
        })
        .collect()
}
