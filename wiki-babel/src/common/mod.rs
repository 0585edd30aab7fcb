//! Building blocks shared by the Textile and Markdown dialects: the rule engine that walks the
//! tree, style whitelisting, adjacency guarding, image references, and the escape rules both
//! dialects start from.

pub mod adjacency;
pub mod escape;
pub mod links;
pub mod rules;
pub mod style_filter;
pub mod text;
