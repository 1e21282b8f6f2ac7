//! # Output Filter
//!
//! Declarative visibility over two axes: the [`ContentKind`] of a write and
//! the [`Mode`] it was produced under. A write is emitted only when both are
//! visible. The filter never looks at scan state, so hiding content can
//! never change what the scanner recognizes.
//!
//! Policies are built by chaining named toggles onto [`FilterPolicy::show_all`];
//! later toggles override earlier ones for the fields they touch.
//!
//! ```
//! use markdown_critic_engine::{ContentKind, FilterPolicy, Mode};
//!
//! let policy = FilterPolicy::show_all().hide_edited().hide_tags();
//! assert!(policy.visible(ContentKind::Text, Mode::Delete));
//! assert!(!policy.visible(ContentKind::Text, Mode::Insert));
//! assert!(!policy.visible(ContentKind::Tag, Mode::Delete));
//! ```

use std::fmt;
use std::str::FromStr;

use super::mode::{ContentKind, Mode};

const ALL_KINDS: u8 = ContentKind::Text.bit() | ContentKind::Tag.bit();
const ALL_MODES: u8 = {
    let mut bits = 0;
    let mut i = 0;
    while i < Mode::ALL.len() {
        bits |= Mode::ALL[i].bit();
        i += 1;
    }
    bits
};
const ORIGINAL_MODES: u8 = Mode::Delete.bit() | Mode::SubstitutionOriginal.bit();
const EDITED_MODES: u8 = Mode::Insert.bit() | Mode::SubstitutionReplacement.bit();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterPolicy {
    visible_kinds: u8,
    visible_modes: u8,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::show_all()
    }
}

impl FilterPolicy {
    pub const fn show_all() -> Self {
        Self {
            visible_kinds: ALL_KINDS,
            visible_modes: ALL_MODES,
        }
    }

    /// Whether a write of `kind` produced under `mode` reaches the sink.
    pub const fn visible(&self, kind: ContentKind, mode: Mode) -> bool {
        self.visible_kinds & kind.bit() != 0 && self.visible_modes & mode.bit() != 0
    }

    /// Hides deletions and the original half of substitutions.
    pub const fn hide_original(self) -> Self {
        self.without_modes(ORIGINAL_MODES)
    }

    pub const fn show_original(self) -> Self {
        self.with_modes(ORIGINAL_MODES)
    }

    /// Hides insertions and the replacement half of substitutions.
    pub const fn hide_edited(self) -> Self {
        self.without_modes(EDITED_MODES)
    }

    pub const fn show_edited(self) -> Self {
        self.with_modes(EDITED_MODES)
    }

    /// Hides comments, and with them every tag.
    pub const fn hide_comments(self) -> Self {
        self.without_modes(Mode::Comment.bit()).hide_tags()
    }

    /// Shows comments, and with them every tag.
    pub const fn show_comments(self) -> Self {
        self.with_modes(Mode::Comment.bit()).show_tags()
    }

    /// Hides synthesized markup in every mode.
    pub const fn hide_tags(self) -> Self {
        Self {
            visible_kinds: self.visible_kinds & !ContentKind::Tag.bit(),
            ..self
        }
    }

    pub const fn show_tags(self) -> Self {
        Self {
            visible_kinds: self.visible_kinds | ContentKind::Tag.bit(),
            ..self
        }
    }

    /// The document as it was before the edits, annotations kept.
    pub const fn only_original(self) -> Self {
        self.show_original().hide_edited()
    }

    /// The document as it was before the edits, as plain source.
    pub const fn only_original_raw(self) -> Self {
        self.only_original().hide_comments().hide_tags()
    }

    /// The document as it reads after the edits, annotations kept.
    pub const fn only_edited(self) -> Self {
        self.show_edited().hide_original()
    }

    /// The document as it reads after the edits, as plain source.
    pub const fn only_edited_raw(self) -> Self {
        self.only_edited().hide_comments().hide_tags()
    }

    /// Applies `filters` in order to the show-all policy.
    pub fn from_filters(filters: &[Filter]) -> Self {
        filters
            .iter()
            .fold(Self::show_all(), |policy, filter| filter.apply(policy))
    }

    const fn with_modes(self, modes: u8) -> Self {
        Self {
            visible_modes: self.visible_modes | modes,
            ..self
        }
    }

    const fn without_modes(self, modes: u8) -> Self {
        Self {
            visible_modes: self.visible_modes & !modes,
            ..self
        }
    }
}

/// A named policy toggle, as accepted on the command line and in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    ShowAll,
    HideOriginal,
    ShowOriginal,
    HideEdited,
    ShowEdited,
    HideComments,
    ShowComments,
    HideTags,
    ShowTags,
    OnlyOriginal,
    OnlyOriginalRaw,
    OnlyEdited,
    OnlyEditedRaw,
}

impl Filter {
    pub const ALL: [Filter; 13] = [
        Filter::ShowAll,
        Filter::HideOriginal,
        Filter::ShowOriginal,
        Filter::HideEdited,
        Filter::ShowEdited,
        Filter::HideComments,
        Filter::ShowComments,
        Filter::HideTags,
        Filter::ShowTags,
        Filter::OnlyOriginal,
        Filter::OnlyOriginalRaw,
        Filter::OnlyEdited,
        Filter::OnlyEditedRaw,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Filter::ShowAll => "show-all",
            Filter::HideOriginal => "hide-original",
            Filter::ShowOriginal => "show-original",
            Filter::HideEdited => "hide-edited",
            Filter::ShowEdited => "show-edited",
            Filter::HideComments => "hide-comments",
            Filter::ShowComments => "show-comments",
            Filter::HideTags => "hide-tags",
            Filter::ShowTags => "show-tags",
            Filter::OnlyOriginal => "only-original",
            Filter::OnlyOriginalRaw => "only-original-raw",
            Filter::OnlyEdited => "only-edited",
            Filter::OnlyEditedRaw => "only-edited-raw",
        }
    }

    pub const fn apply(self, policy: FilterPolicy) -> FilterPolicy {
        match self {
            Filter::ShowAll => FilterPolicy::show_all(),
            Filter::HideOriginal => policy.hide_original(),
            Filter::ShowOriginal => policy.show_original(),
            Filter::HideEdited => policy.hide_edited(),
            Filter::ShowEdited => policy.show_edited(),
            Filter::HideComments => policy.hide_comments(),
            Filter::ShowComments => policy.show_comments(),
            Filter::HideTags => policy.hide_tags(),
            Filter::ShowTags => policy.show_tags(),
            Filter::OnlyOriginal => policy.only_original(),
            Filter::OnlyOriginalRaw => policy.only_original_raw(),
            Filter::OnlyEdited => policy.only_edited(),
            Filter::OnlyEditedRaw => policy.only_edited_raw(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}`")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}
