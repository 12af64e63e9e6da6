//! Corpus data model.
//!
//! Rows move through these types strictly in order: a [`RawRecord`] read from a
//! source becomes a [`CandidateSentence`], which is either rejected by the
//! filter or promoted to an immutable [`SentenceRecord`].

mod difficulty;
mod record;

pub use difficulty::*;
pub use record::*;
