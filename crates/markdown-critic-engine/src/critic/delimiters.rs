//! # Delimiter Table
//!
//! The fixed markup grammar. Each annotation owns its delimiters and the
//! fragments it emits; the scanner never hardcodes `{++` or `<del>`.
//!
//! | Open  | Close | Emitted                                        |
//! |-------|-------|------------------------------------------------|
//! | `{++` | `++}` | deferred `<ins>` / `<ins class="break">` … `</ins>` |
//! | `{--` | `--}` | `<del>` … `</del>`                             |
//! | `{~~` | `~~}` | `<del>` … `</del>` at `~>`, then as insertion  |
//! | `{==` | `==}` | `<mark>` … `</mark>`                           |
//! | `{>>` | `<<}` | `<span class="critic comment">` … `</span>`    |

/// Length of every opening and closing delimiter.
pub const DELIMITER_LEN: usize = 3;

/// Separates the original from the replacement inside a substitution.
pub const SUBSTITUTION_SEPARATOR: &[u8; 2] = b"~>";

pub const DEL_OPEN: &str = "<del>";
pub const DEL_CLOSE: &str = "</del>";
pub const INS_OPEN: &str = "<ins>";
pub const INS_BREAK_OPEN: &str = "<ins class=\"break\">";
pub const INS_CLOSE: &str = "</ins>";
/// Stands in for an insertion that never received a content byte.
pub const INS_EMPTY: &str = "<ins>&nbsp;</ins>";
pub const INS_BREAK_EMPTY: &str = "<ins class=\"break\">&nbsp;</ins>\n";
pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";
pub const COMMENT_OPEN: &str = "<span class=\"critic comment\">";
pub const COMMENT_CLOSE: &str = "</span>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Insertion,
    Deletion,
    Substitution,
    Highlight,
    Comment,
}

impl Annotation {
    pub const ALL: [Annotation; 5] = [
        Annotation::Insertion,
        Annotation::Deletion,
        Annotation::Substitution,
        Annotation::Highlight,
        Annotation::Comment,
    ];

    /// First byte of every opening delimiter.
    pub const OPEN_BRACE: u8 = b'{';

    pub const fn open(self) -> &'static [u8; DELIMITER_LEN] {
        match self {
            Annotation::Insertion => b"{++",
            Annotation::Deletion => b"{--",
            Annotation::Substitution => b"{~~",
            Annotation::Highlight => b"{==",
            Annotation::Comment => b"{>>",
        }
    }

    /// The comment closer mirrors its opener rather than repeating it.
    pub const fn close(self) -> &'static [u8; DELIMITER_LEN] {
        match self {
            Annotation::Insertion => b"++}",
            Annotation::Deletion => b"--}",
            Annotation::Substitution => b"~~}",
            Annotation::Highlight => b"==}",
            Annotation::Comment => b"<<}",
        }
    }

    /// Tags with no dependency on span content. Insertions are tagged by
    /// the state machine once it knows how the span begins.
    pub const fn static_tags(self) -> Option<(&'static str, &'static str)> {
        match self {
            Annotation::Deletion => Some((DEL_OPEN, DEL_CLOSE)),
            Annotation::Highlight => Some((MARK_OPEN, MARK_CLOSE)),
            Annotation::Comment => Some((COMMENT_OPEN, COMMENT_CLOSE)),
            Annotation::Insertion | Annotation::Substitution => None,
        }
    }

    /// Looks up the annotation opened by `bytes`, if any.
    pub fn from_opener(bytes: &[u8]) -> Option<Annotation> {
        Self::ALL.into_iter().find(|a| a.open().as_slice() == bytes)
    }
}
