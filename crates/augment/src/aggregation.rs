//! Aggregation surfaces: the shared per-scalar aggregation filter inputs, the
//! per-relationship node/edge aggregation where-inputs (filter shapes), and
//! the always-present aggregate selection objects (result shapes). Which
//! scalar kinds aggregate, and with which functions, is decided by one
//! declarative table.

use std::collections::{BTreeMap, BTreeSet};

use domain_model::{Field, FieldName, FieldType, ScalarType, TargetType, TypeName};
use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField, RegisteredTypeName};
use indexmap::IndexMap;

use crate::classify::{classify_field, FieldClass};
use crate::types::{
    register_scalar_type, AggregationFunction, Annotation, ComparisonOperator, InputAnnotation,
    OutputAnnotation, TypeId,
};
use crate::{mk_field_name, where_input, Engine, Error};

pub(crate) struct AggregationOperator {
    pub function: AggregationFunction,
    /// Field name inside the grouped aggregation filter input.
    pub group_field: &'static str,
    /// Infix of the deprecated flattened companion, e.g. `AVERAGE_LENGTH`.
    pub legacy_infix: &'static str,
    /// Scalar kind of the aggregated value, which decides the comparator set.
    pub result: ScalarType,
}

const fn operator(
    function: AggregationFunction,
    group_field: &'static str,
    legacy_infix: &'static str,
    result: ScalarType,
) -> AggregationOperator {
    AggregationOperator {
        function,
        group_field,
        legacy_infix,
        result,
    }
}

const STRING_AGGREGATION: [AggregationOperator; 3] = [
    operator(
        AggregationFunction::AverageLength,
        "averageLength",
        "AVERAGE_LENGTH",
        ScalarType::Float,
    ),
    operator(
        AggregationFunction::LongestLength,
        "longestLength",
        "LONGEST_LENGTH",
        ScalarType::Int,
    ),
    operator(
        AggregationFunction::ShortestLength,
        "shortestLength",
        "SHORTEST_LENGTH",
        ScalarType::Int,
    ),
];

const INT_AGGREGATION: [AggregationOperator; 4] = [
    operator(AggregationFunction::Min, "min", "MIN", ScalarType::Int),
    operator(AggregationFunction::Max, "max", "MAX", ScalarType::Int),
    operator(
        AggregationFunction::Average,
        "average",
        "AVERAGE",
        ScalarType::Float,
    ),
    operator(AggregationFunction::Sum, "sum", "SUM", ScalarType::Int),
];

const FLOAT_AGGREGATION: [AggregationOperator; 4] = [
    operator(AggregationFunction::Min, "min", "MIN", ScalarType::Float),
    operator(AggregationFunction::Max, "max", "MAX", ScalarType::Float),
    operator(
        AggregationFunction::Average,
        "average",
        "AVERAGE",
        ScalarType::Float,
    ),
    operator(AggregationFunction::Sum, "sum", "SUM", ScalarType::Float),
];

const DATE_TIME_AGGREGATION: [AggregationOperator; 2] = [
    operator(AggregationFunction::Min, "min", "MIN", ScalarType::DateTime),
    operator(AggregationFunction::Max, "max", "MAX", ScalarType::DateTime),
];

/// The kind → operator mapping. `Boolean` and `ID` never aggregate.
pub(crate) fn aggregation_operators(scalar: ScalarType) -> Option<&'static [AggregationOperator]> {
    match scalar {
        ScalarType::String => Some(&STRING_AGGREGATION),
        ScalarType::Int => Some(&INT_AGGREGATION),
        ScalarType::Float => Some(&FLOAT_AGGREGATION),
        ScalarType::DateTime => Some(&DATE_TIME_AGGREGATION),
        ScalarType::Boolean | ScalarType::Id => None,
    }
}

const LEGACY_COMPARATORS: [(ComparisonOperator, &str); 5] = [
    (ComparisonOperator::Eq, "EQUAL"),
    (ComparisonOperator::Gt, "GT"),
    (ComparisonOperator::Gte, "GTE"),
    (ComparisonOperator::Lt, "LT"),
    (ComparisonOperator::Lte, "LTE"),
];

pub(crate) struct SelectionStatistic {
    pub function: AggregationFunction,
    pub field: &'static str,
    pub result: ScalarType,
}

const fn statistic(
    function: AggregationFunction,
    field: &'static str,
    result: ScalarType,
) -> SelectionStatistic {
    SelectionStatistic {
        function,
        field,
        result,
    }
}

const STRING_STATISTICS: [SelectionStatistic; 2] = [
    statistic(AggregationFunction::Longest, "longest", ScalarType::String),
    statistic(AggregationFunction::Shortest, "shortest", ScalarType::String),
];

const INT_STATISTICS: [SelectionStatistic; 4] = [
    statistic(AggregationFunction::Min, "min", ScalarType::Int),
    statistic(AggregationFunction::Max, "max", ScalarType::Int),
    statistic(AggregationFunction::Average, "average", ScalarType::Float),
    statistic(AggregationFunction::Sum, "sum", ScalarType::Int),
];

const FLOAT_STATISTICS: [SelectionStatistic; 4] = [
    statistic(AggregationFunction::Min, "min", ScalarType::Float),
    statistic(AggregationFunction::Max, "max", ScalarType::Float),
    statistic(AggregationFunction::Average, "average", ScalarType::Float),
    statistic(AggregationFunction::Sum, "sum", ScalarType::Float),
];

const DATE_TIME_STATISTICS: [SelectionStatistic; 2] = [
    statistic(AggregationFunction::Min, "min", ScalarType::DateTime),
    statistic(AggregationFunction::Max, "max", ScalarType::DateTime),
];

pub(crate) fn selection_statistics(scalar: ScalarType) -> Option<&'static [SelectionStatistic]> {
    match scalar {
        ScalarType::String => Some(&STRING_STATISTICS),
        ScalarType::Int => Some(&INT_STATISTICS),
        ScalarType::Float => Some(&FLOAT_STATISTICS),
        ScalarType::DateTime => Some(&DATE_TIME_STATISTICS),
        ScalarType::Boolean | ScalarType::Id => None,
    }
}

pub(crate) fn is_aggregatable(field: &Field) -> bool {
    !field.is_list
        && matches!(
            &field.field_type,
            FieldType::Scalar(scalar) if aggregation_operators(*scalar).is_some()
        )
}

/// The field set aggregation is computed over: all fields for a concrete
/// target, only the interface's own declared fields for an interface target.
pub(crate) fn legal_aggregation_fields<'m>(
    engine: &'m Engine,
    target: &TypeName,
) -> Result<&'m IndexMap<FieldName, Field>, Error> {
    if let Some(node_type) = engine.model.node_types.get(target) {
        return Ok(&node_type.fields);
    }
    if let Some(interface_type) = engine.model.interface_types.get(target) {
        return Ok(&interface_type.fields);
    }
    Err(Error::InternalTypeNotFound {
        type_name: target.clone(),
    })
}

pub(crate) fn has_aggregatable_fields(engine: &Engine, target: &TypeName) -> Result<bool, Error> {
    Ok(legal_aggregation_fields(engine, target)?
        .values()
        .any(is_aggregatable))
}

/// The shared grouped aggregation filter input for one scalar kind, e.g.
/// `StringScalarAggregationFilters`.
pub fn scalar_aggregation_filters_schema(
    builder: &mut gql_schema::Builder<Engine>,
    scalar: ScalarType,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let operators = aggregation_operators(scalar).ok_or_else(|| Error::NotAggregatable {
        scalar_type: scalar,
    })?;
    let mut fields = BTreeMap::new();
    for operator in operators {
        let name = mk_field_name(operator.group_field)?;
        let filters = builder.register_type(TypeId::ScalarFilters {
            scalar: operator.result,
        });
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::AggregationFunctionFilter {
                    function: operator.function,
                }),
                ast::TypeContainer::named_null(filters),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::ScalarAggregationFilters { scalar }.to_type_name(),
            None,
            fields,
        ),
    ))
}

/// Predicates over the aggregated node values of a connection, restricted to
/// the target's legal field set.
pub fn node_aggregation_where_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let field = engine.field(owner, field_name)?;
    let classified = classify_field(&engine.model, owner, field)?;
    let target = match classified.class {
        FieldClass::Relationship { target, .. } => target,
        FieldClass::Scalar { .. } => {
            return Err(Error::InternalFieldNotFound {
                type_name: owner.clone(),
                field_name: field_name.clone(),
            })
        }
    };
    let legal_fields = match target {
        TargetType::Node(node_type) => &node_type.fields,
        TargetType::Interface(interface_type) => &interface_type.fields,
        TargetType::Union(union_type) => {
            return Err(Error::InternalTypeNotFound {
                type_name: union_type.name.clone(),
            })
        }
    };
    let type_id = TypeId::node_aggregation_where_input(owner, field_name)?;
    let mut fields = BTreeMap::new();
    where_input::add_logical_operators(builder, &type_id, &mut fields)?;
    add_aggregation_filter_fields(engine, builder, legal_fields, &mut fields)?;
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(type_id.to_type_name(), None, fields),
    ))
}

/// Predicates over the aggregated relationship properties of a connection.
pub fn edge_aggregation_where_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let edge_type = engine.edge_type_of(owner, field_name)?;
    let type_id = TypeId::edge_aggregation_where_input(owner, field_name)?;
    let mut fields = BTreeMap::new();
    where_input::add_logical_operators(builder, &type_id, &mut fields)?;
    add_aggregation_filter_fields(engine, builder, &edge_type.fields, &mut fields)?;
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(type_id.to_type_name(), None, fields),
    ))
}

/// Adds, per aggregatable scalar field of `source_fields`, the grouped
/// aggregation slot and (when the legacy toggle is on) the flattened
/// per-function-per-comparator aliases.
fn add_aggregation_filter_fields(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    source_fields: &IndexMap<FieldName, Field>,
    fields: &mut BTreeMap<ast::Name, InputField<Engine>>,
) -> Result<(), Error> {
    for field in source_fields.values() {
        let FieldType::Scalar(scalar) = &field.field_type else {
            continue;
        };
        let Some(operators) = aggregation_operators(*scalar) else {
            continue;
        };
        if field.is_list {
            continue;
        }

        let grouped_name = mk_field_name(field.name.as_str())?;
        let grouped_type = builder.register_type(TypeId::ScalarAggregationFilters {
            scalar: *scalar,
        });
        fields.insert(
            grouped_name.clone(),
            InputField::new(
                grouped_name,
                None,
                Annotation::Input(InputAnnotation::AggregationFilter {
                    name: field.name.clone(),
                }),
                ast::TypeContainer::named_null(grouped_type),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );

        if engine.configuration.legacy_aliases.aggregation_filter_aliases {
            for operator in operators {
                for (comparison, comparison_suffix) in LEGACY_COMPARATORS {
                    let alias_name = mk_field_name(&format!(
                        "{}_{}_{}",
                        field.name, operator.legacy_infix, comparison_suffix
                    ))?;
                    let operand = register_scalar_type(builder, operator.result);
                    fields.insert(
                        alias_name.clone(),
                        InputField::new(
                            alias_name,
                            None,
                            Annotation::Input(InputAnnotation::LegacyAggregationFilter {
                                name: field.name.clone(),
                                function: operator.function,
                                operator: comparison,
                            }),
                            ast::TypeContainer::named_null(operand),
                            None,
                            DeprecationStatus::new_deprecated(&format!(
                                "Please use the relevant generic filter {}: {{ {}: ... }}",
                                field.name, operator.group_field
                            )),
                        ),
                    );
                }
            }
        }
    }
    Ok(())
}

/// The shared `Count` object: distinct edge and node counts of a connection.
pub fn count_schema() -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for (name, annotation) in [
        (mk_field_name("nodes")?, OutputAnnotation::CountNodes),
        (mk_field_name("edges")?, OutputAnnotation::CountEdges),
    ] {
        fields.insert(
            name.clone(),
            gql_schema::Field::new(
                name,
                None,
                Annotation::Output(annotation),
                ast::TypeContainer::named_non_null(RegisteredTypeName::int()),
                BTreeMap::new(),
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::Count.to_type_name(),
        None,
        fields,
        BTreeSet::new(),
    )))
}

/// The shared read-only statistics object for one scalar kind, e.g.
/// `StringAggregateSelection`.
pub fn scalar_aggregate_selection_schema(
    builder: &mut gql_schema::Builder<Engine>,
    scalar: ScalarType,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let statistics = selection_statistics(scalar).ok_or_else(|| Error::NotAggregatable {
        scalar_type: scalar,
    })?;
    let mut fields = BTreeMap::new();
    for stat in statistics {
        let name = mk_field_name(stat.field)?;
        // Nullable: the statistics of an empty connection are undefined.
        fields.insert(
            name.clone(),
            gql_schema::Field::new(
                name,
                None,
                Annotation::Output(OutputAnnotation::Statistic {
                    function: stat.function,
                }),
                ast::TypeContainer::named_null(register_scalar_type(builder, stat.result)),
                BTreeMap::new(),
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::ScalarAggregateSelection { scalar }.to_type_name(),
        None,
        fields,
        BTreeSet::new(),
    )))
}

/// The always-present selection aggregate of a connection: a count plus node
/// statistics. This is a query-result shape and is never policy-gated.
pub fn aggregate_selection_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    target: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    let count_name = mk_field_name("count")?;
    fields.insert(
        count_name.clone(),
        gql_schema::Field::new(
            count_name,
            None,
            Annotation::Output(OutputAnnotation::AggregateCount),
            ast::TypeContainer::named_non_null(builder.register_type(TypeId::Count)),
            BTreeMap::new(),
            DeprecationStatus::NotDeprecated,
        ),
    );
    if has_aggregatable_fields(engine, target)? {
        let node_name = mk_field_name("node")?;
        let node_selection =
            builder.register_type(TypeId::node_aggregate_selection(owner, target, field_name)?);
        fields.insert(
            node_name.clone(),
            gql_schema::Field::new(
                node_name,
                None,
                Annotation::Output(OutputAnnotation::AggregateNode),
                ast::TypeContainer::named_non_null(node_selection),
                BTreeMap::new(),
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::aggregate_selection(owner, target, field_name)?.to_type_name(),
        None,
        fields,
        BTreeSet::new(),
    )))
}

/// Per-field statistics of the connected entities.
pub fn node_aggregate_selection_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    target: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for field in legal_aggregation_fields(engine, target)?.values() {
        let FieldType::Scalar(scalar) = &field.field_type else {
            continue;
        };
        if field.is_list || selection_statistics(*scalar).is_none() {
            continue;
        }
        let name = mk_field_name(field.name.as_str())?;
        let selection = builder.register_type(TypeId::ScalarAggregateSelection { scalar: *scalar });
        fields.insert(
            name.clone(),
            gql_schema::Field::new(
                name,
                None,
                Annotation::Output(OutputAnnotation::AggregatedField {
                    name: field.name.clone(),
                }),
                ast::TypeContainer::named_non_null(selection),
                BTreeMap::new(),
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::node_aggregate_selection(owner, target, field_name)?.to_type_name(),
        None,
        fields,
        BTreeSet::new(),
    )))
}
