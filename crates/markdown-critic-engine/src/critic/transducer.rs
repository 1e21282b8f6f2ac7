//! # Scanner / Transducer
//!
//! Drives the annotation state machine over a byte stream. Runs of bytes
//! that cannot start a delimiter are copied as-is; at a candidate byte the
//! next three bytes are matched against the current mode's delimiters.
//!
//! A delimiter is never classified against a truncated window: when fewer
//! than [`DELIMITER_LEN`] bytes remain at a candidate, they are held in a
//! [`BoundaryCarry`] and prepended to the next read. Output is therefore the
//! same for any chunking of the same input.

use std::io::{Read, Write};

use super::carry::{BoundaryCarry, CARRY_CAPACITY};
use super::context::{Context, Transition};
use super::delimiters::{DELIMITER_LEN, SUBSTITUTION_SEPARATOR};
use super::error::{CriticError, Result};
use super::filter::FilterPolicy;
use super::mode::{ContentKind, Mode, is_line_terminator};

pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// What to do with an annotation still open at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnclosedPolicy {
    /// Write the open annotation's closing fragment so output stays balanced.
    #[default]
    Close,
    /// Leave the annotation open, flushing held bytes as plain text.
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransduceOptions {
    pub policy: FilterPolicy,
    pub unclosed: UnclosedPolicy,
    /// Bytes requested per read. Values below 1 are treated as 1.
    pub buffer_size: usize,
}

impl Default for TransduceOptions {
    fn default() -> Self {
        Self {
            policy: FilterPolicy::show_all(),
            unclosed: UnclosedPolicy::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl TransduceOptions {
    pub fn with_policy(policy: FilterPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

/// Sink wrapper that checks every write against the filter policy.
struct Output<W> {
    sink: W,
    policy: FilterPolicy,
    written: usize,
}

impl<W: Write> Output<W> {
    fn emit(&mut self, bytes: &[u8], kind: ContentKind, mode: Mode) -> Result<()> {
        if bytes.is_empty() || !self.policy.visible(kind, mode) {
            return Ok(());
        }
        self.sink.write_all(bytes).map_err(CriticError::Write)?;
        self.written += bytes.len();
        Ok(())
    }

    fn text(&mut self, bytes: &[u8], mode: Mode) -> Result<()> {
        self.emit(bytes, ContentKind::Text, mode)
    }

    fn tag(&mut self, tag: &str, mode: Mode) -> Result<()> {
        self.emit(tag.as_bytes(), ContentKind::Tag, mode)
    }
}

/// Push-style transducer: feed it chunks, then [`finish`](Self::finish).
///
/// ```
/// use markdown_critic_engine::{Transducer, TransduceOptions};
///
/// let mut t = Transducer::new(Vec::new(), &TransduceOptions::default());
/// t.feed(b"a{").unwrap();
/// t.feed(b"--b--").unwrap();
/// t.feed(b"}c").unwrap();
/// assert_eq!(t.finish().unwrap(), b"a<del>b</del>c");
/// ```
pub struct Transducer<W> {
    out: Output<W>,
    ctx: Context,
    carry: BoundaryCarry,
    unclosed: UnclosedPolicy,
    consumed: usize,
}

impl<W: Write> Transducer<W> {
    pub fn new(sink: W, options: &TransduceOptions) -> Self {
        Self {
            out: Output {
                sink,
                policy: options.policy,
                written: 0,
            },
            ctx: Context::new(),
            carry: BoundaryCarry::new(),
            unclosed: options.unclosed,
            consumed: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.ctx.mode()
    }

    /// Total bytes fed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Total bytes that reached the sink so far.
    pub fn written(&self) -> usize {
        self.out.written
    }

    /// Processes the next chunk of input. Each call counts as one read.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.consumed += chunk.len();
        let mut rest = chunk;
        // Held bytes are settled against at most one delimiter's worth of
        // the chunk; anything still undecided goes back into the carry.
        while !self.carry.is_empty() {
            if rest.is_empty() {
                return Ok(());
            }
            let held = self.carry.take();
            let borrowed = rest.len().min(DELIMITER_LEN - held.len());
            let len = held.len() + borrowed;
            let mut window = [0u8; DELIMITER_LEN];
            window[..held.len()].copy_from_slice(held.as_slice());
            window[held.len()..len].copy_from_slice(&rest[..borrowed]);
            self.scan(&window[..len])?;
            rest = &rest[borrowed..];
        }
        self.scan(rest)
    }

    /// Flushes held bytes, settles any open annotation, and returns the sink.
    pub fn finish(mut self) -> Result<W> {
        let held = self.carry.take();
        match self.unclosed {
            UnclosedPolicy::Passthrough => {
                self.out.text(held.as_slice(), self.ctx.mode())?;
                if self.ctx.mode() != Mode::Normal {
                    log::warn!("end of input inside {:?} span, left open", self.ctx.mode());
                }
            }
            UnclosedPolicy::Close => {
                for &byte in held.as_slice() {
                    self.literal(byte)?;
                }
                let mode = self.ctx.mode();
                if let Some(transition) = self.ctx.close_unterminated() {
                    log::warn!("end of input inside {mode:?} span, closing it");
                    self.apply(transition)?;
                }
            }
        }
        self.out.sink.flush().map_err(CriticError::Write)?;
        Ok(self.out.sink)
    }

    fn scan(&mut self, window: &[u8]) -> Result<()> {
        let mut offset = 0;
        while offset < window.len() {
            let start = offset;
            while offset < window.len() && !self.ctx.is_operator_candidate(window[offset]) {
                offset += 1;
            }
            if offset > start {
                self.out.text(&window[start..offset], self.ctx.mode())?;
                // An awaiting insertion only lets line terminators through.
                self.ctx.note_line_break();
            }
            if offset == window.len() {
                break;
            }
            let rest = &window[offset..];
            if rest.len() < DELIMITER_LEN {
                self.carry.hold(rest);
                return Ok(());
            }
            offset += self.step(&rest[..DELIMITER_LEN])?;
        }
        Ok(())
    }

    /// Handles the candidate byte at the start of `lookahead`, returning how
    /// many bytes were consumed.
    fn step(&mut self, lookahead: &[u8]) -> Result<usize> {
        if let Some(transition) = self.ctx.transition(lookahead) {
            self.apply(transition)?;
            return Ok(DELIMITER_LEN);
        }
        let mode = self.ctx.mode();
        if let Some(tag) = self.ctx.open_insertion() {
            self.out.tag(tag, mode)?;
        }
        let separator = &lookahead[..SUBSTITUTION_SEPARATOR.len()];
        if let Some(transition) = self.ctx.separate(separator) {
            self.apply(transition)?;
            return Ok(SUBSTITUTION_SEPARATOR.len());
        }
        self.out.text(&lookahead[..1], mode)?;
        Ok(1)
    }

    /// Writes one byte as span content, opening a pending insertion first
    /// when the byte is content.
    fn literal(&mut self, byte: u8) -> Result<()> {
        let mode = self.ctx.mode();
        if is_line_terminator(byte) {
            self.out.text(&[byte], mode)?;
            self.ctx.note_line_break();
            return Ok(());
        }
        if let Some(tag) = self.ctx.open_insertion() {
            self.out.tag(tag, mode)?;
        }
        self.out.text(&[byte], mode)
    }

    fn apply(&mut self, transition: Transition) -> Result<()> {
        log::trace!(
            "delimiter tagged as {:?}, now in {:?}",
            transition.mode,
            self.ctx.mode()
        );
        if let Some(tag) = transition.tag {
            self.out.tag(tag, transition.mode)?;
        }
        Ok(())
    }
}

/// Streams `reader` through the transducer into `writer`, returning the
/// number of bytes read.
///
/// Any read or write error aborts immediately; held bytes are discarded.
pub fn transduce_with<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    options: &TransduceOptions,
) -> Result<usize> {
    let mut transducer = Transducer::new(writer, options);
    // Held bytes are copied in front of each read so a delimiter split
    // across reads is scanned contiguously.
    let mut buf = vec![0u8; CARRY_CAPACITY + options.buffer_size.max(1)];
    loop {
        let held = transducer.carry.take();
        let start = CARRY_CAPACITY - held.len();
        buf[start..CARRY_CAPACITY].copy_from_slice(held.as_slice());

        let n = reader
            .read(&mut buf[CARRY_CAPACITY..])
            .map_err(CriticError::Read)?;
        if n == 0 {
            transducer.carry = held;
            let consumed = transducer.consumed;
            transducer.finish()?;
            log::debug!("transduce finished after reading {consumed} bytes");
            return Ok(consumed);
        }
        transducer.consumed += n;
        transducer.scan(&buf[start..CARRY_CAPACITY + n])?;
    }
}

/// [`transduce_with`] using default options and the given filter policy.
pub fn transduce<R: Read, W: Write>(reader: R, writer: W, policy: &FilterPolicy) -> Result<usize> {
    transduce_with(reader, writer, &TransduceOptions::with_policy(*policy))
}
