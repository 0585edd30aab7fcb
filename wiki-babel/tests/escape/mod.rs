//! Escape/unescape tests against an echoing renderer, plus style filter properties

mod markdown;
mod properties;
mod textile;
