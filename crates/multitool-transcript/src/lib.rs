//! Transcript utilities for multitool
//!
//! This crate provides the leaf utilities behind the transcript tools:
//!
//! - [`video_id`] - canonical video identifier extraction from URL strings
//! - [`record`] - shape-agnostic field access over raw caption records
//! - [`source`] - the [`TranscriptSource`] seam plus an in-memory source
//! - [`youtube`] - the HTTP-backed production source
//! - [`fetch`] - the ordered language fallback chain and normalization
//! - [`text`] - head/middle/tail sectioning of long text
//!
//! ```text
//! url --extract_video_id--> id --fetch_transcript(source)--> FetchedTranscript
//!                                                               |
//!                                            full_text --sectionize--> excerpt
//! ```

pub mod error;
pub mod fetch;
pub mod record;
pub mod source;
pub mod text;
pub mod video_id;
pub mod youtube;

pub use error::{Error, Result};
pub use fetch::{FetchedTranscript, UNKNOWN_DURATION, fetch_transcript};
pub use record::{FieldSource, RawRecord, Snippet, TranscriptEntry, field_or};
pub use source::{StaticSource, StaticTrack, TrackInfo, TranscriptSource, select_track};
pub use text::{group_digits, sectionize};
pub use video_id::extract_video_id;
pub use youtube::YouTubeSource;
