use super::delimiters::Annotation;

/// The annotation currently being scanned. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Normal,
    Insert,
    Delete,
    /// The `{~~original` half of a substitution, before `~>`.
    SubstitutionOriginal,
    /// The `~>replacement~~}` half of a substitution.
    SubstitutionReplacement,
    Comment,
    Highlight,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Normal,
        Mode::Insert,
        Mode::Delete,
        Mode::SubstitutionOriginal,
        Mode::SubstitutionReplacement,
        Mode::Comment,
        Mode::Highlight,
    ];

    /// The annotation this mode belongs to, `None` outside any annotation.
    pub const fn annotation(self) -> Option<Annotation> {
        match self {
            Mode::Normal => None,
            Mode::Insert => Some(Annotation::Insertion),
            Mode::Delete => Some(Annotation::Deletion),
            Mode::SubstitutionOriginal | Mode::SubstitutionReplacement => {
                Some(Annotation::Substitution)
            }
            Mode::Comment => Some(Annotation::Comment),
            Mode::Highlight => Some(Annotation::Highlight),
        }
    }

    /// Leading byte of every delimiter that can end (or, in `Normal`, start)
    /// a span in this mode.
    pub const fn operator(self) -> u8 {
        match self.annotation() {
            None => Annotation::OPEN_BRACE,
            Some(annotation) => annotation.close()[0],
        }
    }

    /// Modes whose content is the edited (new) text.
    pub const fn is_edited(self) -> bool {
        matches!(self, Mode::Insert | Mode::SubstitutionReplacement)
    }

    /// Modes whose content is the original (removed) text.
    pub const fn is_original(self) -> bool {
        matches!(self, Mode::Delete | Mode::SubstitutionOriginal)
    }

    pub(crate) const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Whether a write is verbatim input or synthesized markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Text,
    Tag,
}

impl ContentKind {
    pub(crate) const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Line terminators keep an insertion in its "awaiting content" sub-state.
pub const fn is_line_terminator(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}
