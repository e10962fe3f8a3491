use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;

/// The name of a domain type (node, interface, union or edge type).
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
)]
pub struct TypeName(pub Identifier);

impl TypeName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// The name of a field within a domain type.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
)]
pub struct FieldName(pub Identifier);

impl FieldName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One annotated domain model, the sole input of an augmentation run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DomainModel {
    pub node_types: IndexMap<TypeName, NodeType>,
    pub interface_types: IndexMap<TypeName, InterfaceType>,
    pub union_types: IndexMap<TypeName, UnionType>,
    /// Relationship-property types; referenced by name from
    /// [`RelationshipMeta::properties`].
    pub edge_types: IndexMap<TypeName, EdgeType>,
}

/// The three kinds of domain type a relationship field may point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetType<'m> {
    Node(&'m NodeType),
    Interface(&'m InterfaceType),
    Union(&'m UnionType),
}

impl DomainModel {
    /// Resolves a relationship target name to its domain type, if any.
    pub fn lookup_target(&self, name: &TypeName) -> Option<TargetType<'_>> {
        if let Some(node_type) = self.node_types.get(name) {
            return Some(TargetType::Node(node_type));
        }
        if let Some(interface_type) = self.interface_types.get(name) {
            return Some(TargetType::Interface(interface_type));
        }
        self.union_types.get(name).map(TargetType::Union)
    }

    /// The interfaces a node type implements, derived from the interfaces'
    /// implementer sets.
    pub fn interfaces_of(&self, node_type_name: &TypeName) -> Vec<&InterfaceType> {
        self.interface_types
            .values()
            .filter(|interface_type| interface_type.implemented_by.contains(node_type_name))
            .collect()
    }
}

/// A concrete type: always has exactly one shape.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NodeType {
    pub name: TypeName,
    pub fields: IndexMap<FieldName, Field>,
}

/// An interface type. `fields` holds only the fields declared directly on the
/// interface, never fields added by individual implementers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: TypeName,
    pub fields: IndexMap<FieldName, Field>,
    pub implemented_by: BTreeSet<TypeName>,
}

/// A union type: a disjoint member set with no fields of its own.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UnionType {
    pub name: TypeName,
    pub members: BTreeSet<TypeName>,
}

/// Properties carried on the relationship itself rather than on either of its
/// endpoints. Edge types hold scalar fields only.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EdgeType {
    pub name: TypeName,
    pub fields: IndexMap<FieldName, Field>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: FieldName,
    pub field_type: FieldType,
    pub is_list: bool,
    pub is_required: bool,
    pub description: Option<String>,
    /// The raw `@filterable` annotation, if any. Absence is the common case;
    /// the classifier resolves it against the default policy.
    pub filterable: Option<FilterableDirective>,
}

impl Field {
    pub fn scalar(name: FieldName, scalar_type: ScalarType) -> Field {
        Field {
            name,
            field_type: FieldType::Scalar(scalar_type),
            is_list: false,
            is_required: true,
            description: None,
            filterable: None,
        }
    }

    pub fn reference(name: FieldName, target: TypeName, relationship: RelationshipMeta) -> Field {
        Field {
            name,
            field_type: FieldType::Reference {
                target,
                relationship,
            },
            is_list: true,
            is_required: true,
            description: None,
            filterable: None,
        }
    }

    pub fn with_filterable(mut self, filterable: FilterableDirective) -> Field {
        self.filterable = Some(filterable);
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    Scalar(ScalarType),
    Reference {
        target: TypeName,
        relationship: RelationshipMeta,
    },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarType {
    Boolean,
    DateTime,
    Float,
    Id,
    Int,
    String,
}

impl ScalarType {
    /// The GraphQL name this scalar surfaces as.
    pub fn graphql_name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "Boolean",
            ScalarType::DateTime => "DateTime",
            ScalarType::Float => "Float",
            ScalarType::Id => "ID",
            ScalarType::Int => "Int",
            ScalarType::String => "String",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.graphql_name())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RelationshipMeta {
    /// The label of the underlying edge in the backing store, e.g. `ACTED_IN`.
    pub edge_label: String,
    pub direction: RelationshipDirection,
    /// Name of the edge type carrying the relationship's own properties.
    pub properties: Option<TypeName>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationshipDirection {
    Outgoing,
    Incoming,
    Undirected,
}

/// The raw `@filterable(byValue:, byAggregate:)` annotation. Either argument
/// may be omitted; an omitted argument keeps the default policy for that
/// argument.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FilterableDirective {
    pub by_value: Option<bool>,
    pub by_aggregate: Option<bool>,
}
