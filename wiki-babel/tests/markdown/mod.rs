//! Markdown serialization tests
//!
//! Round trips run the output through the local comrak renderer and back into the serializer.

mod round_trip;
mod table;
