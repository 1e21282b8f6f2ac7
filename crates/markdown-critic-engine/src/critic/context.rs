//! # Mode State Machine
//!
//! Tracks which annotation is open. Insertions (and the replacement half of
//! a substitution) carry a sub-state: their opening tag is deferred until
//! the first content byte, so that leading line breaks can select the
//! `break` styling.
//!
//! ```text
//!            {++            first content byte           ++}
//!   Normal ───────► Insert(Awaiting) ───────► Insert(Open) ───────► Normal
//!                        │  ▲ line terminator
//!                        └──┘ (broken_line = true)
//!
//!            {~~                    ~>                        ~~}
//!   Normal ───────► SubstitutionOriginal ───► SubstitutionReplacement ───► Normal
//!                   (behaves like Delete)     (behaves like Insert)
//! ```

use super::delimiters::{
    Annotation, DEL_CLOSE, DEL_OPEN, INS_BREAK_EMPTY, INS_BREAK_OPEN, INS_CLOSE, INS_EMPTY,
    INS_OPEN, SUBSTITUTION_SEPARATOR,
};
use super::mode::{Mode, is_line_terminator};

/// Whether an insertion's opening tag has been written yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionTag {
    /// No content byte seen. `broken_line` records a leading line terminator.
    Awaiting { broken_line: bool },
    /// The opening tag has been written.
    Open,
}

impl InsertionTag {
    const fn awaiting() -> Self {
        InsertionTag::Awaiting { broken_line: false }
    }

    /// Fragment that ends the insertion in this sub-state.
    const fn closing_tag(self) -> &'static str {
        match self {
            InsertionTag::Awaiting { broken_line: false } => INS_EMPTY,
            InsertionTag::Awaiting { broken_line: true } => INS_BREAK_EMPTY,
            InsertionTag::Open => INS_CLOSE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Insert(InsertionTag),
    Delete,
    SubstitutionOriginal,
    SubstitutionReplacement(InsertionTag),
    Comment,
    Highlight,
}

/// Outcome of consuming a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Fragment to emit, if any. Opening an insertion emits nothing.
    pub tag: Option<&'static str>,
    /// Mode the fragment is attributed to when filtering: the entered
    /// mode for openers, the left mode for closers.
    pub mode: Mode,
}

/// Annotation context for a single stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    state: State,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub const fn new() -> Self {
        Self {
            state: State::Normal,
        }
    }

    pub const fn mode(&self) -> Mode {
        match self.state {
            State::Normal => Mode::Normal,
            State::Insert(_) => Mode::Insert,
            State::Delete => Mode::Delete,
            State::SubstitutionOriginal => Mode::SubstitutionOriginal,
            State::SubstitutionReplacement(_) => Mode::SubstitutionReplacement,
            State::Comment => Mode::Comment,
            State::Highlight => Mode::Highlight,
        }
    }

    /// Insertion sub-state, `None` outside insertions.
    pub const fn insertion(&self) -> Option<InsertionTag> {
        match self.state {
            State::Insert(tag) | State::SubstitutionReplacement(tag) => Some(tag),
            _ => None,
        }
    }

    /// True while an insertion still waits for its first content byte.
    pub const fn awaiting_content(&self) -> bool {
        matches!(self.insertion(), Some(InsertionTag::Awaiting { .. }))
    }

    /// Bytes the scanner must stop at: the mode's operator, and while an
    /// insertion awaits content, any byte that is not a line terminator.
    pub const fn is_operator_candidate(&self, byte: u8) -> bool {
        byte == self.mode().operator() || (self.awaiting_content() && !is_line_terminator(byte))
    }

    /// Records that a line terminator was passed through before content.
    pub fn note_line_break(&mut self) {
        if let State::Insert(tag) | State::SubstitutionReplacement(tag) = &mut self.state
            && let InsertionTag::Awaiting { broken_line } = tag
        {
            *broken_line = true;
        }
    }

    /// Opens a pending insertion, returning the deferred tag to emit.
    pub fn open_insertion(&mut self) -> Option<&'static str> {
        let (State::Insert(tag) | State::SubstitutionReplacement(tag)) = &mut self.state else {
            return None;
        };
        let InsertionTag::Awaiting { broken_line } = *tag else {
            return None;
        };
        *tag = InsertionTag::Open;
        Some(if broken_line { INS_BREAK_OPEN } else { INS_OPEN })
    }

    /// Consumes a three-byte delimiter if it is valid in the current mode.
    ///
    /// Only the current mode's transitions are considered: delimiters of
    /// other annotations inside a span stay literal.
    pub fn transition(&mut self, lookahead: &[u8]) -> Option<Transition> {
        match self.state {
            State::Normal => {
                let annotation = Annotation::from_opener(lookahead)?;
                Some(self.enter(annotation))
            }
            State::Insert(tag) if lookahead == Annotation::Insertion.close() => {
                Some(self.leave_insertion(tag, Mode::Insert))
            }
            State::SubstitutionReplacement(tag) if lookahead == Annotation::Substitution.close() => {
                Some(self.leave_insertion(tag, Mode::SubstitutionReplacement))
            }
            State::Delete | State::Highlight | State::Comment => {
                let mode = self.mode();
                let annotation = mode.annotation()?;
                if lookahead != annotation.close() {
                    return None;
                }
                self.state = State::Normal;
                Some(Transition {
                    tag: annotation.static_tags().map(|(_, close)| close),
                    mode,
                })
            }
            _ => None,
        }
    }

    /// Consumes `~>` when inside the original half of a substitution.
    pub fn separate(&mut self, lookahead: &[u8]) -> Option<Transition> {
        if self.state != State::SubstitutionOriginal || lookahead != SUBSTITUTION_SEPARATOR {
            return None;
        }
        self.state = State::SubstitutionReplacement(InsertionTag::awaiting());
        Some(Transition {
            tag: Some(DEL_CLOSE),
            mode: Mode::SubstitutionOriginal,
        })
    }

    /// Forces the open annotation closed at end of input.
    pub fn close_unterminated(&mut self) -> Option<Transition> {
        let mode = self.mode();
        let tag = match self.state {
            State::Normal => return None,
            State::Insert(tag) | State::SubstitutionReplacement(tag) => tag.closing_tag(),
            State::Delete | State::SubstitutionOriginal => DEL_CLOSE,
            State::Highlight | State::Comment => {
                mode.annotation()?.static_tags().map(|(_, close)| close)?
            }
        };
        self.state = State::Normal;
        Some(Transition {
            tag: Some(tag),
            mode,
        })
    }

    fn enter(&mut self, annotation: Annotation) -> Transition {
        let (state, tag) = match annotation {
            Annotation::Insertion => (State::Insert(InsertionTag::awaiting()), None),
            Annotation::Substitution => (State::SubstitutionOriginal, Some(DEL_OPEN)),
            Annotation::Deletion => (State::Delete, Some(DEL_OPEN)),
            Annotation::Highlight => (State::Highlight, annotation.static_tags().map(|t| t.0)),
            Annotation::Comment => (State::Comment, annotation.static_tags().map(|t| t.0)),
        };
        self.state = state;
        Transition {
            tag,
            mode: self.mode(),
        }
    }

    fn leave_insertion(&mut self, tag: InsertionTag, mode: Mode) -> Transition {
        self.state = State::Normal;
        Transition {
            tag: Some(tag.closing_tag()),
            mode,
        }
    }
}
