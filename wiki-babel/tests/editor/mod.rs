//! Mode coordinator tests with an in-memory widget

mod coordinator;
mod paste;
