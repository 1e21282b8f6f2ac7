//! # CriticMarkup transducer
//!
//! Rewrites the five CriticMarkup annotations into HTML fragments while
//! copying every other byte through unchanged.
//!
//! ```text
//! reader ─► BoundaryCarry ─► scanner ─► Context (mode state machine)
//!                               │
//!                               └──► FilterPolicy ─► writer
//! ```
//!
//! ## Modules
//!
//! - [`delimiters`] - the fixed markup grammar and the fragments it emits
//! - [`carry`] - bytes held between reads so delimiters are never split
//! - [`context`] - which annotation is open, and deferred insertion tags
//! - [`transducer`] - the scan loop and stream entry points
//! - [`filter`] - which kinds of output reach the sink
//!
//! ```
//! use markdown_critic_engine::{FilterPolicy, transduce_str};
//!
//! let html = transduce_str("a {~~b~>c~~} d", &FilterPolicy::show_all());
//! assert_eq!(html, "a <del>b</del><ins>c</ins> d");
//!
//! let original = transduce_str("a {~~b~>c~~} d", &FilterPolicy::show_all().only_original_raw());
//! assert_eq!(original, "a b d");
//! ```

pub mod carry;
pub mod context;
pub mod delimiters;
pub mod error;
pub mod filter;
pub mod mode;
pub mod transducer;

#[cfg(test)]
mod tests;

pub use error::{CriticError, Result};
pub use filter::{Filter, FilterPolicy, UnknownFilter};
pub use mode::{ContentKind, Mode};
pub use transducer::{
    DEFAULT_BUFFER_SIZE, TransduceOptions, Transducer, UnclosedPolicy, transduce, transduce_with,
};

/// Transduces an in-memory byte slice.
///
/// The only failures the transducer reports come from its reader and
/// writer. Here there is no reader and the writer is a `Vec`, whose writes
/// always succeed, so the inner result is always `Ok`.
pub fn transduce_bytes(input: &[u8], options: &TransduceOptions) -> Vec<u8> {
    fn run(input: &[u8], options: &TransduceOptions) -> Result<Vec<u8>> {
        let mut transducer = Transducer::new(Vec::with_capacity(input.len()), options);
        transducer.feed(input)?;
        transducer.finish()
    }
    run(input, options).expect("in-memory transduce")
}

/// Transduces a string with default options.
pub fn transduce_str(input: &str, policy: &FilterPolicy) -> String {
    let out = transduce_bytes(input.as_bytes(), &TransduceOptions::with_policy(*policy));
    // Filtering only cuts at ASCII delimiters, so UTF-8 input stays valid.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
