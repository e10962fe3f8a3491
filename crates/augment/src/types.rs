//! Annotations attached to every generated schema node, plus the `TypeId`
//! inventory of generated types. Every generated type name is synthesized in
//! exactly one place, `TypeId::to_type_name`, from the (owner, field, role)
//! tuple carried by the id, so name collisions are impossible by construction.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum_macros::Display;

use domain_model::{FieldName, ScalarType, TypeName};
use graphql_ir::schema as gql_schema;
use graphql_ir::{ast, mk_name};

use crate::{Engine, Error};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ComparisonOperator {
    Eq,
    In,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    Includes,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum AggregationFunction {
    Average,
    AverageLength,
    Longest,
    LongestLength,
    Max,
    Min,
    Shortest,
    ShortestLength,
    Sum,
}

/// The existential quantifiers available when filtering a parent by its
/// relationships.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Quantifier {
    All,
    None,
    Single,
    Some,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum EventKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Annotations of the generated root fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Display)]
pub enum RootFieldAnnotation {
    ReadMany {
        type_name: TypeName,
    },
    Create {
        type_name: TypeName,
    },
    Update {
        type_name: TypeName,
    },
    Delete {
        type_name: TypeName,
    },
    Event {
        type_name: TypeName,
        event: EventKind,
    },
}

/// Annotations of the generated output fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Display)]
pub enum OutputAnnotation {
    RootField(RootFieldAnnotation),
    Field {
        name: FieldName,
        parent_type: TypeName,
    },
    RelationshipField {
        name: FieldName,
        parent_type: TypeName,
        target: TypeName,
    },
    ConnectionField {
        name: FieldName,
        parent_type: TypeName,
    },
    ConnectionEdges,
    ConnectionTotalCount,
    ConnectionAggregate,
    RelationshipNode,
    RelationshipProperties {
        edge_type: TypeName,
    },
    AggregateCount,
    AggregateNode,
    CountNodes,
    CountEdges,
    AggregatedField {
        name: FieldName,
    },
    Statistic {
        function: AggregationFunction,
    },
    DeletedNodesCount,
    DeletedRelationshipsCount,
}

/// Annotations of the generated input fields and arguments.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Display)]
pub enum InputAnnotation {
    LogicalOperator {
        operator: LogicalOperator,
    },
    ComparisonOperator {
        operator: ComparisonOperator,
    },
    /// The grouped operator-set slot for a scalar field on a `Where` input.
    ScalarFilter {
        name: FieldName,
        parent_type: TypeName,
    },
    /// A deprecated per-operator companion of a grouped scalar filter slot.
    LegacyScalarFilter {
        name: FieldName,
        parent_type: TypeName,
        operator: ComparisonOperator,
    },
    RelationshipFilter {
        name: FieldName,
        parent_type: TypeName,
        quantifier: Quantifier,
    },
    /// The existential filter slot for a relationship field on a `Where`
    /// input.
    RelationshipFilterField {
        name: FieldName,
        parent_type: TypeName,
    },
    ConnectionFilterField {
        name: FieldName,
        parent_type: TypeName,
    },
    UnionMemberFilter {
        member: TypeName,
    },
    TypenameIn,
    ConnectionNodePredicate,
    ConnectionEdgePredicate,
    AggregateFilter,
    AggregateCountFilter,
    AggregateNodeFilter,
    AggregateEdgeFilter,
    /// The grouped aggregation slot for a scalar field on a node or edge
    /// aggregation input.
    AggregationFilter {
        name: FieldName,
    },
    AggregationFunctionFilter {
        function: AggregationFunction,
    },
    LegacyAggregationFilter {
        name: FieldName,
        function: AggregationFunction,
        operator: ComparisonOperator,
    },
    SortField {
        name: FieldName,
        parent_type: TypeName,
    },
    CreateField {
        name: FieldName,
        parent_type: TypeName,
    },
    UpdateField {
        name: FieldName,
        parent_type: TypeName,
    },
    WhereArgument,
    SortArgument,
    CreateArgument,
    UpdateArgument,
    ConnectionWhereArgument,
    ConnectionSortArgument,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Display)]
pub enum EnumValueAnnotation {
    SortDirection { direction: SortDirection },
    Implementation { type_name: TypeName },
}

/// The node info attached to every generated field, argument and enum value.
/// Downstream consumers use it to interpret a schema node without re-deriving
/// its meaning from the node's name.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Display)]
pub enum Annotation {
    Output(OutputAnnotation),
    Input(InputAnnotation),
    EnumValue(EnumValueAnnotation),
}

/// Unique identifier of a generated type. Ids for per-field types carry the
/// owning type and field names; the id alone determines the generated name.
#[derive(Serialize, Clone, Debug, Hash, PartialEq, Eq)]
pub enum TypeId {
    QueryRoot,
    MutationRoot,
    SubscriptionRoot,
    OutputType {
        type_name: TypeName,
        graphql_type_name: ast::TypeName,
    },
    DateTimeScalar,
    WhereInput {
        type_name: TypeName,
        graphql_type_name: ast::TypeName,
    },
    SubscriptionWhereInput {
        type_name: TypeName,
        graphql_type_name: ast::TypeName,
    },
    SortInput {
        type_name: TypeName,
        graphql_type_name: ast::TypeName,
    },
    SortDirectionEnum,
    ImplementationsEnum {
        interface_name: TypeName,
        graphql_type_name: ast::TypeName,
    },
    CreateInput {
        type_name: TypeName,
        graphql_type_name: ast::TypeName,
    },
    UpdateInput {
        type_name: TypeName,
        graphql_type_name: ast::TypeName,
    },
    DeleteInfo,
    ScalarFilters {
        scalar: ScalarType,
    },
    ListFilters {
        scalar: ScalarType,
    },
    ScalarAggregationFilters {
        scalar: ScalarType,
    },
    ScalarAggregateSelection {
        scalar: ScalarType,
    },
    Count,
    RelationshipFilters {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    ConnectionWhere {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    ConnectionFilters {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    ConnectionAggregationInput {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    NodeAggregationWhereInput {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    EdgeAggregationWhereInput {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    Connection {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    Relationship {
        owner: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    // The selection aggregate encodes the target type as well, to keep it
    // apart from the filter-time aggregation input of the same field.
    AggregateSelection {
        owner: TypeName,
        target: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
    NodeAggregateSelection {
        owner: TypeName,
        target: TypeName,
        field: FieldName,
        graphql_type_name: ast::TypeName,
    },
}

impl Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_type_name().fmt(f)
    }
}

impl TypeId {
    pub fn to_type_name(&self) -> ast::TypeName {
        match self {
            TypeId::QueryRoot => ast::TypeName(mk_name!("Query")),
            TypeId::MutationRoot => ast::TypeName(mk_name!("Mutation")),
            TypeId::SubscriptionRoot => ast::TypeName(mk_name!("Subscription")),
            TypeId::DateTimeScalar => ast::TypeName(mk_name!("DateTime")),
            TypeId::SortDirectionEnum => ast::TypeName(mk_name!("SortDirection")),
            TypeId::DeleteInfo => ast::TypeName(mk_name!("DeleteInfo")),
            TypeId::Count => ast::TypeName(mk_name!("Count")),
            TypeId::ScalarFilters { scalar } => ast::TypeName(scalar_filters_name(*scalar)),
            TypeId::ListFilters { scalar } => ast::TypeName(list_filters_name(*scalar)),
            TypeId::ScalarAggregationFilters { scalar } => {
                ast::TypeName(scalar_aggregation_filters_name(*scalar))
            }
            TypeId::ScalarAggregateSelection { scalar } => {
                ast::TypeName(scalar_aggregate_selection_name(*scalar))
            }
            TypeId::OutputType {
                graphql_type_name, ..
            }
            | TypeId::WhereInput {
                graphql_type_name, ..
            }
            | TypeId::SubscriptionWhereInput {
                graphql_type_name, ..
            }
            | TypeId::SortInput {
                graphql_type_name, ..
            }
            | TypeId::ImplementationsEnum {
                graphql_type_name, ..
            }
            | TypeId::CreateInput {
                graphql_type_name, ..
            }
            | TypeId::UpdateInput {
                graphql_type_name, ..
            }
            | TypeId::RelationshipFilters {
                graphql_type_name, ..
            }
            | TypeId::ConnectionWhere {
                graphql_type_name, ..
            }
            | TypeId::ConnectionFilters {
                graphql_type_name, ..
            }
            | TypeId::ConnectionAggregationInput {
                graphql_type_name, ..
            }
            | TypeId::NodeAggregationWhereInput {
                graphql_type_name, ..
            }
            | TypeId::EdgeAggregationWhereInput {
                graphql_type_name, ..
            }
            | TypeId::Connection {
                graphql_type_name, ..
            }
            | TypeId::Relationship {
                graphql_type_name, ..
            }
            | TypeId::AggregateSelection {
                graphql_type_name, ..
            }
            | TypeId::NodeAggregateSelection {
                graphql_type_name, ..
            } => graphql_type_name.clone(),
        }
    }

    pub fn output_type(type_name: &TypeName) -> Result<TypeId, Error> {
        Ok(TypeId::OutputType {
            graphql_type_name: crate::mk_typename(type_name.as_str())?,
            type_name: type_name.clone(),
        })
    }

    pub fn where_input(type_name: &TypeName) -> Result<TypeId, Error> {
        Ok(TypeId::WhereInput {
            graphql_type_name: compose_type_name(&[type_name.as_str(), "Where"])?,
            type_name: type_name.clone(),
        })
    }

    pub fn subscription_where_input(type_name: &TypeName) -> Result<TypeId, Error> {
        Ok(TypeId::SubscriptionWhereInput {
            graphql_type_name: compose_type_name(&[type_name.as_str(), "SubscriptionWhere"])?,
            type_name: type_name.clone(),
        })
    }

    pub fn sort_input(type_name: &TypeName) -> Result<TypeId, Error> {
        Ok(TypeId::SortInput {
            graphql_type_name: compose_type_name(&[type_name.as_str(), "Sort"])?,
            type_name: type_name.clone(),
        })
    }

    pub fn implementations_enum(interface_name: &TypeName) -> Result<TypeId, Error> {
        Ok(TypeId::ImplementationsEnum {
            graphql_type_name: compose_type_name(&[interface_name.as_str(), "Implementation"])?,
            interface_name: interface_name.clone(),
        })
    }

    pub fn create_input(type_name: &TypeName) -> Result<TypeId, Error> {
        Ok(TypeId::CreateInput {
            graphql_type_name: compose_type_name(&[type_name.as_str(), "CreateInput"])?,
            type_name: type_name.clone(),
        })
    }

    pub fn update_input(type_name: &TypeName) -> Result<TypeId, Error> {
        Ok(TypeId::UpdateInput {
            graphql_type_name: compose_type_name(&[type_name.as_str(), "UpdateInput"])?,
            type_name: type_name.clone(),
        })
    }

    pub fn relationship_filters(owner: &TypeName, field: &FieldName) -> Result<TypeId, Error> {
        Ok(TypeId::RelationshipFilters {
            graphql_type_name: per_field_type_name(owner, field, "RelationshipFilters")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn connection_where(owner: &TypeName, field: &FieldName) -> Result<TypeId, Error> {
        Ok(TypeId::ConnectionWhere {
            graphql_type_name: per_field_type_name(owner, field, "ConnectionWhere")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn connection_filters(owner: &TypeName, field: &FieldName) -> Result<TypeId, Error> {
        Ok(TypeId::ConnectionFilters {
            graphql_type_name: per_field_type_name(owner, field, "ConnectionFilters")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn connection_aggregation_input(
        owner: &TypeName,
        field: &FieldName,
    ) -> Result<TypeId, Error> {
        Ok(TypeId::ConnectionAggregationInput {
            graphql_type_name: per_field_type_name(owner, field, "ConnectionAggregationInput")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn node_aggregation_where_input(
        owner: &TypeName,
        field: &FieldName,
    ) -> Result<TypeId, Error> {
        Ok(TypeId::NodeAggregationWhereInput {
            graphql_type_name: per_field_type_name(owner, field, "NodeAggregationWhereInput")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn edge_aggregation_where_input(
        owner: &TypeName,
        field: &FieldName,
    ) -> Result<TypeId, Error> {
        Ok(TypeId::EdgeAggregationWhereInput {
            graphql_type_name: per_field_type_name(owner, field, "EdgeAggregationWhereInput")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn connection(owner: &TypeName, field: &FieldName) -> Result<TypeId, Error> {
        Ok(TypeId::Connection {
            graphql_type_name: per_field_type_name(owner, field, "Connection")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn relationship(owner: &TypeName, field: &FieldName) -> Result<TypeId, Error> {
        Ok(TypeId::Relationship {
            graphql_type_name: per_field_type_name(owner, field, "Relationship")?,
            owner: owner.clone(),
            field: field.clone(),
        })
    }

    pub fn aggregate_selection(
        owner: &TypeName,
        target: &TypeName,
        field: &FieldName,
    ) -> Result<TypeId, Error> {
        Ok(TypeId::AggregateSelection {
            graphql_type_name: compose_type_name(&[
                owner.as_str(),
                target.as_str(),
                &capitalized(field.as_str()),
                "AggregateSelection",
            ])?,
            owner: owner.clone(),
            target: target.clone(),
            field: field.clone(),
        })
    }

    pub fn node_aggregate_selection(
        owner: &TypeName,
        target: &TypeName,
        field: &FieldName,
    ) -> Result<TypeId, Error> {
        Ok(TypeId::NodeAggregateSelection {
            graphql_type_name: compose_type_name(&[
                owner.as_str(),
                target.as_str(),
                &capitalized(field.as_str()),
                "NodeAggregateSelection",
            ])?,
            owner: owner.clone(),
            target: target.clone(),
            field: field.clone(),
        })
    }
}

fn compose_type_name(parts: &[&str]) -> Result<ast::TypeName, Error> {
    crate::mk_typename(&parts.concat())
}

fn per_field_type_name(
    owner: &TypeName,
    field: &FieldName,
    role: &str,
) -> Result<ast::TypeName, Error> {
    compose_type_name(&[owner.as_str(), &capitalized(field.as_str()), role])
}

fn scalar_filters_name(scalar: ScalarType) -> ast::Name {
    match scalar {
        ScalarType::Boolean => mk_name!("BooleanScalarFilters"),
        ScalarType::DateTime => mk_name!("DateTimeScalarFilters"),
        ScalarType::Float => mk_name!("FloatScalarFilters"),
        ScalarType::Id => mk_name!("IdScalarFilters"),
        ScalarType::Int => mk_name!("IntScalarFilters"),
        ScalarType::String => mk_name!("StringScalarFilters"),
    }
}

fn list_filters_name(scalar: ScalarType) -> ast::Name {
    match scalar {
        ScalarType::Boolean => mk_name!("BooleanListFilters"),
        ScalarType::DateTime => mk_name!("DateTimeListFilters"),
        ScalarType::Float => mk_name!("FloatListFilters"),
        ScalarType::Id => mk_name!("IdListFilters"),
        ScalarType::Int => mk_name!("IntListFilters"),
        ScalarType::String => mk_name!("StringListFilters"),
    }
}

fn scalar_aggregation_filters_name(scalar: ScalarType) -> ast::Name {
    match scalar {
        ScalarType::Boolean => mk_name!("BooleanScalarAggregationFilters"),
        ScalarType::DateTime => mk_name!("DateTimeScalarAggregationFilters"),
        ScalarType::Float => mk_name!("FloatScalarAggregationFilters"),
        ScalarType::Id => mk_name!("IdScalarAggregationFilters"),
        ScalarType::Int => mk_name!("IntScalarAggregationFilters"),
        ScalarType::String => mk_name!("StringScalarAggregationFilters"),
    }
}

fn scalar_aggregate_selection_name(scalar: ScalarType) -> ast::Name {
    match scalar {
        ScalarType::Boolean => mk_name!("BooleanAggregateSelection"),
        ScalarType::DateTime => mk_name!("DateTimeAggregateSelection"),
        ScalarType::Float => mk_name!("FloatAggregateSelection"),
        ScalarType::Id => mk_name!("IdAggregateSelection"),
        ScalarType::Int => mk_name!("IntAggregateSelection"),
        ScalarType::String => mk_name!("StringAggregateSelection"),
    }
}

/// References a scalar type, registering `DateTime` on first use. The five
/// built-in scalars are seeded by the build loop and need no registration.
pub(crate) fn register_scalar_type(
    builder: &mut gql_schema::Builder<Engine>,
    scalar: ScalarType,
) -> gql_schema::RegisteredTypeName {
    match scalar {
        ScalarType::Boolean => gql_schema::RegisteredTypeName::boolean(),
        ScalarType::Float => gql_schema::RegisteredTypeName::float(),
        ScalarType::Id => gql_schema::RegisteredTypeName::id(),
        ScalarType::Int => gql_schema::RegisteredTypeName::int(),
        ScalarType::String => gql_schema::RegisteredTypeName::string(),
        ScalarType::DateTime => builder.register_type(TypeId::DateTimeScalar),
    }
}

pub(crate) fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn lower_camel(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
