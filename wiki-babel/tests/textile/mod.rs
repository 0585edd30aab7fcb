//! Textile serialization tests

mod blocks;
mod inline;
mod tables;
