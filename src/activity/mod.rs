//! Activity ingestion: FIT session decoding and record normalization.
//!
//! The decoder turns file bytes into loosely-typed session field maps;
//! the normalizer turns each of those into a canonical
//! [`ActivityRecord`] with imperial units and calendar keys.

pub mod decode;
pub mod normalize;
pub mod record;

pub use decode::{decode_file, decode_sessions, DecodeError, RawSession, RawValue};
pub use normalize::{normalize_session, normalize_sessions};
pub use record::{ActivityRecord, FieldValue};
