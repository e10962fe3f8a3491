//! The schema augmentation engine: derives the full auxiliary type graph
//! (filter, sort, mutation-input, aggregation and subscription-filter types)
//! for an annotated domain model. One model in, one type graph out; the
//! derivation is pure and recomputed in full on every run.

mod aggregation;
mod classify;
mod mutation_input;
mod mutation_root;
mod output_type;
mod query_root;
mod relationship;
mod scalar_filter;
mod sort;
mod subscription_root;
mod types;
mod where_input;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use domain_model::{
    Configuration, DomainModel, EdgeType, Field, FieldName, FieldType, ScalarType, TypeName,
};
use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use indexmap::IndexMap;

pub use classify::{classify_field, ClassifiedField, FieldClass, FilterPolicy};
pub use types::{
    AggregationFunction, Annotation, ComparisonOperator, EnumValueAnnotation, EventKind,
    InputAnnotation, LogicalOperator, OutputAnnotation, Quantifier, RootFieldAnnotation,
    SortDirection, TypeId,
};

/// The engine state for one augmentation run: the validated domain model plus
/// the run-level configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Engine {
    pub model: DomainModel,
    pub configuration: Configuration,
}

impl Engine {
    pub fn new(model: DomainModel, configuration: Configuration) -> Result<Self, Error> {
        validate(&model)?;
        Ok(Engine {
            model,
            configuration,
        })
    }

    /// Derives the complete type graph: a demand-driven build from the three
    /// root types, followed by the fixed-point prune of empty generated
    /// types. A malformed model aborts with the first error; a partially
    /// derived schema is never returned.
    pub fn augment(&self) -> Result<gql_schema::Schema<Engine>, Error> {
        let mut schema = gql_schema::build::build_schema(self)?;
        gql_schema::prune::prune_empty_types(&mut schema);
        Ok(schema)
    }

    pub(crate) fn domain_fields(
        &self,
        type_name: &TypeName,
    ) -> Result<&IndexMap<FieldName, Field>, Error> {
        if let Some(node_type) = self.model.node_types.get(type_name) {
            return Ok(&node_type.fields);
        }
        if let Some(interface_type) = self.model.interface_types.get(type_name) {
            return Ok(&interface_type.fields);
        }
        if let Some(edge_type) = self.model.edge_types.get(type_name) {
            return Ok(&edge_type.fields);
        }
        Err(Error::InternalTypeNotFound {
            type_name: type_name.clone(),
        })
    }

    pub(crate) fn field(
        &self,
        owner: &TypeName,
        field_name: &FieldName,
    ) -> Result<&Field, Error> {
        self.domain_fields(owner)?
            .get(field_name)
            .ok_or_else(|| Error::InternalFieldNotFound {
                type_name: owner.clone(),
                field_name: field_name.clone(),
            })
    }

    pub(crate) fn edge_type_of(
        &self,
        owner: &TypeName,
        field_name: &FieldName,
    ) -> Result<&EdgeType, Error> {
        let field = self.field(owner, field_name)?;
        let FieldType::Reference { relationship, .. } = &field.field_type else {
            return Err(Error::InternalFieldNotFound {
                type_name: owner.clone(),
                field_name: field_name.clone(),
            });
        };
        let Some(edge) = &relationship.properties else {
            return Err(Error::InternalFieldNotFound {
                type_name: owner.clone(),
                field_name: field_name.clone(),
            });
        };
        self.model
            .edge_types
            .get(edge)
            .ok_or_else(|| Error::UnknownEdgeType {
                type_name: owner.clone(),
                field_name: field_name.clone(),
                edge: edge.clone(),
            })
    }
}

/// Referential checks on the input model. Everything else the engine accepts
/// as-is: it derives type shape, it does not validate domain semantics.
fn validate(model: &DomainModel) -> Result<(), Error> {
    let field_owners = model
        .node_types
        .values()
        .map(|node_type| (&node_type.name, &node_type.fields))
        .chain(
            model
                .interface_types
                .values()
                .map(|interface_type| (&interface_type.name, &interface_type.fields)),
        );
    for (type_name, fields) in field_owners {
        for field in fields.values() {
            if let FieldType::Reference {
                target,
                relationship,
            } = &field.field_type
            {
                if model.lookup_target(target).is_none() {
                    return Err(Error::UnknownReferenceTarget {
                        type_name: type_name.clone(),
                        field_name: field.name.clone(),
                        target: target.clone(),
                    });
                }
                if let Some(edge) = &relationship.properties {
                    if !model.edge_types.contains_key(edge) {
                        return Err(Error::UnknownEdgeType {
                            type_name: type_name.clone(),
                            field_name: field.name.clone(),
                            edge: edge.clone(),
                        });
                    }
                }
            }
        }
    }

    for interface_type in model.interface_types.values() {
        for implementer in &interface_type.implemented_by {
            if !model.node_types.contains_key(implementer) {
                return Err(Error::UnknownInterfaceImplementer {
                    interface: interface_type.name.clone(),
                    implementer: implementer.clone(),
                });
            }
        }
    }

    for union_type in model.union_types.values() {
        for member in &union_type.members {
            if !model.node_types.contains_key(member) {
                return Err(Error::UnknownUnionMember {
                    union: union_type.name.clone(),
                    member: member.clone(),
                });
            }
        }
    }

    for edge_type in model.edge_types.values() {
        for field in edge_type.fields.values() {
            if !matches!(field.field_type, FieldType::Scalar(_)) {
                return Err(Error::EdgeFieldNotScalar {
                    type_name: edge_type.name.clone(),
                    field_name: field.name.clone(),
                });
            }
        }
    }

    Ok(())
}

impl gql_schema::SchemaContext for Engine {
    type NodeInfo = types::Annotation;
    type TypeId = types::TypeId;

    fn to_type_name(type_id: &Self::TypeId) -> ast::TypeName {
        type_id.to_type_name()
    }

    type SchemaError = Error;

    fn build_type_info(
        &self,
        builder: &mut gql_schema::Builder<Self>,
        type_id: &Self::TypeId,
    ) -> Result<gql_schema::TypeInfo<Self>, Error> {
        match type_id {
            TypeId::QueryRoot => query_root::query_root_schema(self, builder),
            TypeId::MutationRoot => mutation_root::mutation_root_schema(self, builder),
            TypeId::SubscriptionRoot => subscription_root::subscription_root_schema(self, builder),
            TypeId::OutputType { type_name, .. } => {
                output_type::output_type_schema(self, builder, type_name)
            }
            TypeId::DateTimeScalar => Ok(gql_schema::TypeInfo::Scalar(gql_schema::Scalar {
                name: type_id.to_type_name(),
                description: Some("An ISO 8601 encoded date and time".to_string()),
            })),
            TypeId::WhereInput { type_name, .. } => {
                where_input::where_input_schema(self, builder, type_name)
            }
            TypeId::SubscriptionWhereInput { type_name, .. } => {
                where_input::subscription_where_input_schema(self, builder, type_name)
            }
            TypeId::SortInput { type_name, .. } => {
                sort::sort_input_schema(self, builder, type_name)
            }
            TypeId::SortDirectionEnum => sort::sort_direction_schema(),
            TypeId::ImplementationsEnum { interface_name, .. } => {
                where_input::implementations_enum_schema(self, interface_name)
            }
            TypeId::CreateInput { type_name, .. } => {
                mutation_input::create_input_schema(self, builder, type_name)
            }
            TypeId::UpdateInput { type_name, .. } => {
                mutation_input::update_input_schema(self, builder, type_name)
            }
            TypeId::DeleteInfo => mutation_input::delete_info_schema(),
            TypeId::ScalarFilters { scalar } => {
                scalar_filter::scalar_filters_schema(builder, *scalar)
            }
            TypeId::ListFilters { scalar } => scalar_filter::list_filters_schema(builder, *scalar),
            TypeId::ScalarAggregationFilters { scalar } => {
                aggregation::scalar_aggregation_filters_schema(builder, *scalar)
            }
            TypeId::ScalarAggregateSelection { scalar } => {
                aggregation::scalar_aggregate_selection_schema(builder, *scalar)
            }
            TypeId::Count => aggregation::count_schema(),
            TypeId::RelationshipFilters { owner, field, .. } => {
                relationship::relationship_filters_schema(self, builder, owner, field)
            }
            TypeId::ConnectionWhere { owner, field, .. } => {
                relationship::connection_where_schema(self, builder, owner, field)
            }
            TypeId::ConnectionFilters { owner, field, .. } => {
                relationship::connection_filters_schema(self, builder, owner, field)
            }
            TypeId::ConnectionAggregationInput { owner, field, .. } => {
                relationship::connection_aggregation_input_schema(self, builder, owner, field)
            }
            TypeId::NodeAggregationWhereInput { owner, field, .. } => {
                aggregation::node_aggregation_where_input_schema(self, builder, owner, field)
            }
            TypeId::EdgeAggregationWhereInput { owner, field, .. } => {
                aggregation::edge_aggregation_where_input_schema(self, builder, owner, field)
            }
            TypeId::Connection { owner, field, .. } => {
                relationship::connection_schema(self, builder, owner, field)
            }
            TypeId::Relationship { owner, field, .. } => {
                relationship::relationship_schema(self, builder, owner, field)
            }
            TypeId::AggregateSelection {
                owner,
                target,
                field,
                ..
            } => aggregation::aggregate_selection_schema(self, builder, owner, target, field),
            TypeId::NodeAggregateSelection {
                owner,
                target,
                field,
                ..
            } => aggregation::node_aggregate_selection_schema(self, builder, owner, target, field),
        }
    }

    fn get_schema_entry_point(&self) -> gql_schema::EntryPoint<Self> {
        gql_schema::EntryPoint {
            query: TypeId::QueryRoot,
            mutation: Some(TypeId::MutationRoot),
            subscription: Some(TypeId::SubscriptionRoot),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "relationship field {field_name} of type {type_name} references unknown target type {target}"
    )]
    UnknownReferenceTarget {
        type_name: TypeName,
        field_name: FieldName,
        target: TypeName,
    },
    #[error(
        "relationship field {field_name} of type {type_name} references unknown edge type {edge}"
    )]
    UnknownEdgeType {
        type_name: TypeName,
        field_name: FieldName,
        edge: TypeName,
    },
    #[error("interface {interface} lists unknown implementing type {implementer}")]
    UnknownInterfaceImplementer {
        interface: TypeName,
        implementer: TypeName,
    },
    #[error("union {union} lists unknown member type {member}")]
    UnknownUnionMember { union: TypeName, member: TypeName },
    #[error("field {field_name} of edge type {type_name} must be a scalar field")]
    EdgeFieldNotScalar {
        type_name: TypeName,
        field_name: FieldName,
    },
    #[error("{scalar_type} values cannot be aggregated")]
    NotAggregatable { scalar_type: ScalarType },
    #[error("\"{name}\" is not a valid GraphQL name")]
    InvalidGraphQlName { name: String },
    #[error("internal error while building schema, type not found: {type_name}")]
    InternalTypeNotFound { type_name: TypeName },
    #[error(
        "internal error while building schema, field {field_name} not found in type {type_name}"
    )]
    InternalFieldNotFound {
        type_name: TypeName,
        field_name: FieldName,
    },
    #[error("internal error while building schema: {error}")]
    InternalBuildError {
        #[from]
        error: gql_schema::build::Error,
    },
}

impl From<ast::InvalidGraphQlName> for Error {
    fn from(error: ast::InvalidGraphQlName) -> Self {
        Error::InvalidGraphQlName { name: error.0 }
    }
}

pub fn mk_typename(name: &str) -> Result<ast::TypeName, Error> {
    match ast::Name::from_str(name) {
        Ok(name) => Ok(ast::TypeName(name)),
        Err(_) => Err(Error::InvalidGraphQlName {
            name: name.to_string(),
        }),
    }
}

pub(crate) fn mk_field_name(name: &str) -> Result<ast::Name, Error> {
    ast::Name::from_str(name).map_err(|_| Error::InvalidGraphQlName {
        name: name.to_string(),
    })
}
