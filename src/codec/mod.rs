//! Bidirectional text serialization for analysis documents.
//!
//! The canonical text format is the wire contract for export/import:
//! `encode` renders a document deterministically, `decode` rebuilds one from
//! canonical (or compatible hand-edited) text on a best-effort basis. Both
//! are total: encoding never fails and decoding never rejects input.

pub mod decode;
pub mod encode;
pub mod grammar;

pub use decode::decode;
pub use encode::encode;
