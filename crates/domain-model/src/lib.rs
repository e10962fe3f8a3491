//! The annotated domain model that the augmentation engine consumes: node,
//! interface, union and edge types, their fields, relationship metadata and
//! per-field directive annotations. This is read-only input, produced by an
//! external parser; the engine never mutates it.

pub mod configuration;
pub mod identifier;
pub mod types;

pub use configuration::{Configuration, LegacyAliasFlags};
pub use identifier::{Identifier, InvalidIdentifier};
pub use types::{
    DomainModel, EdgeType, Field, FieldName, FieldType, FilterableDirective, InterfaceType,
    NodeType, RelationshipDirection, RelationshipMeta, ScalarType, TargetType, TypeName, UnionType,
};
