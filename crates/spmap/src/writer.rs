//! Depth-first text rendering of a [`Document`].
//!
//! The output is JSON-like rather than JSON: indentation is one tab per
//! level, text payloads only have lone backslashes doubled, and an empty
//! text payload is written as nothing at all. The writer does not validate
//! the tree; whatever is in the document is printed.
//!
//! The walk keeps its own stack, so nesting depth is bounded by memory and
//! not by the call stack.
use alloc::{vec, vec::Vec};
use core::fmt::{self, Write};

use bstr::ByteSlice;

use crate::document::{Document, NodeId, NodeKind, Scalar};

const TABS: &str = concat!(
    "\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t",
    "\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t",
    "\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t",
    "\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t",
);

/// Renders a [`Document`] as text or as raw bytes.
#[derive(Debug, Clone, Copy)]
pub struct DocumentWriter<'d> {
    document: &'d Document,
}

impl<'d> DocumentWriter<'d> {
    #[must_use]
    pub fn new(document: &'d Document) -> Self {
        Self { document }
    }

    /// Writes the whole document, starting at its root.
    ///
    /// Text payloads that are not valid UTF-8 are written with U+FFFD in
    /// place of each invalid sequence; [`DocumentWriter::write_bytes`] keeps
    /// them intact.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        self.walk(&mut TextSink(out))
    }

    /// Appends the whole document to `out`, copying text payloads byte for
    /// byte.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        // Appending to a `Vec` never fails.
        let _ = self.walk(&mut ByteSink(out));
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out);
        out
    }

    fn walk<S: Sink>(&self, out: &mut S) -> fmt::Result {
        let mut stack = vec![Step::Open {
            id: self.document.root(),
            is_last: true,
        }];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open { id, is_last } => {
                    let Some(node) = self.document.node(id) else {
                        continue;
                    };
                    write_indent(out, node.depth())?;
                    if let Some(name) = node.name() {
                        write!(out, "\"{name}\": ")?;
                    }
                    match node.kind() {
                        NodeKind::Object => out.write_str("{\n")?,
                        NodeKind::Array => out.write_str("[\n")?,
                        NodeKind::NameValuePair | NodeKind::Value => {}
                    }
                    if let Some(scalar) = node.scalar() {
                        write_scalar(out, scalar)?;
                    }

                    stack.push(Step::Close { id, is_last });
                    let children = node.children();
                    stack.extend(children.iter().enumerate().rev().map(|(i, &child)| {
                        Step::Open {
                            id: child,
                            is_last: i + 1 == children.len(),
                        }
                    }));
                }
                Step::Close { id, is_last } => {
                    let Some(node) = self.document.node(id) else {
                        continue;
                    };
                    match node.kind() {
                        NodeKind::Object => close(out, node.depth(), '}')?,
                        NodeKind::Array => close(out, node.depth(), ']')?,
                        NodeKind::NameValuePair | NodeKind::Value => {}
                    }
                    if node.parent().is_some() {
                        if !is_last {
                            out.write_char(',')?;
                        }
                        out.write_char('\n')?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Pending work for one node: its opening line, or everything after its
/// children.
#[derive(Debug, Clone, Copy)]
enum Step {
    Open { id: NodeId, is_last: bool },
    Close { id: NodeId, is_last: bool },
}

/// Output target that can also take raw text payload bytes.
trait Sink: Write {
    fn write_text(&mut self, bytes: &[u8]) -> fmt::Result;
}

struct TextSink<'w, W>(&'w mut W);

impl<W: Write> Write for TextSink<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.0.write_char(c)
    }
}

impl<W: Write> Sink for TextSink<'_, W> {
    fn write_text(&mut self, bytes: &[u8]) -> fmt::Result {
        write!(self.0, "{}", bytes.as_bstr())
    }
}

struct ByteSink<'v>(&'v mut Vec<u8>);

impl Write for ByteSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl Sink for ByteSink<'_> {
    fn write_text(&mut self, bytes: &[u8]) -> fmt::Result {
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

fn close<S: Sink>(out: &mut S, depth: usize, bracket: char) -> fmt::Result {
    write_indent(out, depth)?;
    out.write_char(bracket)
}

fn write_indent<S: Sink>(out: &mut S, depth: usize) -> fmt::Result {
    let mut left = depth;
    while left > 0 {
        let n = left.min(TABS.len());
        out.write_str(&TABS[..n])?;
        left -= n;
    }
    Ok(())
}

fn write_scalar<S: Sink>(out: &mut S, scalar: &Scalar) -> fmt::Result {
    match scalar {
        Scalar::Text(text) if text.is_empty() => Ok(()),
        Scalar::Text(text) => {
            out.write_char('"')?;
            write_escaped_text(text, out)?;
            out.write_char('"')
        }
        Scalar::Int(v) => write!(out, "{v}"),
        Scalar::Float(v) => write!(out, "{v}"),
    }
}

/// Doubles every lone backslash in `src`.
///
/// A backslash with another backslash right before or after it is taken to
/// be escaped already and is copied as is, so `a\\b` stays `a\\b` while
/// `a\b` becomes `a\\b`. Nothing else is escaped.
fn write_escaped_text<S: Sink>(src: &[u8], out: &mut S) -> fmt::Result {
    let mut run_start = 0;
    for (i, &b) in src.iter().enumerate() {
        if b != b'\\' {
            continue;
        }
        out.write_text(&src[run_start..i])?;
        let paired = (i > 0 && src[i - 1] == b'\\') || src.get(i + 1) == Some(&b'\\');
        out.write_str(if paired { "\\" } else { "\\\\" })?;
        run_start = i + 1;
    }
    out.write_text(&src[run_start..])
}
