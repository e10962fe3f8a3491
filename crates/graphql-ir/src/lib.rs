//! A minimal representation of a GraphQL type graph, together with the
//! machinery to build one on demand from typed identifiers and to prune
//! generated types that ended up empty.

pub mod ast;
pub mod schema;
