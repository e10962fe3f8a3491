//! Comparison-operator sets for scalar fields: the shared grouped filter
//! input types, the list-valued variants, and the deprecated per-operator
//! aliases kept alongside the grouped slot. The operator inventory per scalar
//! kind lives in one declarative table.

use std::collections::BTreeMap;

use domain_model::{ScalarType, TypeName};
use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField, RegisteredType};

use crate::types::{register_scalar_type, Annotation, ComparisonOperator, InputAnnotation, TypeId};
use crate::{Engine, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OperandShape {
    Single,
    List,
}

pub(crate) struct ComparisonEntry {
    pub operator: ComparisonOperator,
    /// Field name inside the grouped operator-set input.
    pub group_field: &'static str,
    /// Suffix of the deprecated flattened companion on the owning `Where`.
    pub legacy_suffix: &'static str,
    pub operand: OperandShape,
}

const fn entry(
    operator: ComparisonOperator,
    group_field: &'static str,
    legacy_suffix: &'static str,
    operand: OperandShape,
) -> ComparisonEntry {
    ComparisonEntry {
        operator,
        group_field,
        legacy_suffix,
        operand,
    }
}

const TEXT_OPERATORS: [ComparisonEntry; 5] = [
    entry(ComparisonOperator::Eq, "eq", "_EQ", OperandShape::Single),
    entry(ComparisonOperator::In, "in", "_IN", OperandShape::List),
    entry(
        ComparisonOperator::Contains,
        "contains",
        "_CONTAINS",
        OperandShape::Single,
    ),
    entry(
        ComparisonOperator::StartsWith,
        "startsWith",
        "_STARTS_WITH",
        OperandShape::Single,
    ),
    entry(
        ComparisonOperator::EndsWith,
        "endsWith",
        "_ENDS_WITH",
        OperandShape::Single,
    ),
];

const ORDERED_OPERATORS: [ComparisonEntry; 6] = [
    entry(ComparisonOperator::Eq, "eq", "_EQ", OperandShape::Single),
    entry(ComparisonOperator::In, "in", "_IN", OperandShape::List),
    entry(ComparisonOperator::Gt, "gt", "_GT", OperandShape::Single),
    entry(ComparisonOperator::Gte, "gte", "_GTE", OperandShape::Single),
    entry(ComparisonOperator::Lt, "lt", "_LT", OperandShape::Single),
    entry(ComparisonOperator::Lte, "lte", "_LTE", OperandShape::Single),
];

const BOOLEAN_OPERATORS: [ComparisonEntry; 2] = [
    entry(ComparisonOperator::Eq, "eq", "_EQ", OperandShape::Single),
    entry(ComparisonOperator::In, "in", "_IN", OperandShape::List),
];

const LIST_OPERATORS: [ComparisonEntry; 2] = [
    entry(ComparisonOperator::Eq, "eq", "_EQ", OperandShape::List),
    entry(
        ComparisonOperator::Includes,
        "includes",
        "_INCLUDES",
        OperandShape::Single,
    ),
];

pub(crate) fn comparison_operators(scalar: ScalarType) -> &'static [ComparisonEntry] {
    match scalar {
        ScalarType::String | ScalarType::Id => &TEXT_OPERATORS,
        ScalarType::Int | ScalarType::Float | ScalarType::DateTime => &ORDERED_OPERATORS,
        ScalarType::Boolean => &BOOLEAN_OPERATORS,
    }
}

pub(crate) fn list_operators() -> &'static [ComparisonEntry] {
    &LIST_OPERATORS
}

fn operand_type(
    builder: &mut gql_schema::Builder<Engine>,
    scalar: ScalarType,
    shape: OperandShape,
) -> RegisteredType {
    let named = register_scalar_type(builder, scalar);
    match shape {
        OperandShape::Single => ast::TypeContainer::named_null(named),
        OperandShape::List => {
            ast::TypeContainer::list_null(ast::TypeContainer::named_non_null(named))
        }
    }
}

/// The shared grouped operator-set input for one scalar kind, e.g.
/// `StringScalarFilters`.
pub fn scalar_filters_schema(
    builder: &mut gql_schema::Builder<Engine>,
    scalar: ScalarType,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for operator in comparison_operators(scalar) {
        let name = crate::mk_field_name(operator.group_field)?;
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::ComparisonOperator {
                    operator: operator.operator,
                }),
                operand_type(builder, scalar, operator.operand),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::ScalarFilters { scalar }.to_type_name(),
            Some(format!(
                "Grouped comparison operators for {} values",
                scalar.graphql_name()
            )),
            fields,
        ),
    ))
}

/// The grouped operator-set input for list-valued scalar fields, e.g.
/// `StringListFilters`.
pub fn list_filters_schema(
    builder: &mut gql_schema::Builder<Engine>,
    scalar: ScalarType,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for operator in list_operators() {
        let name = crate::mk_field_name(operator.group_field)?;
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::ComparisonOperator {
                    operator: operator.operator,
                }),
                operand_type(builder, scalar, operator.operand),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::ListFilters { scalar }.to_type_name(),
            Some(format!(
                "Grouped comparison operators for lists of {} values",
                scalar.graphql_name()
            )),
            fields,
        ),
    ))
}

/// Adds one scalar field's filter surface to a `Where`-shaped input: the
/// grouped operator-set slot plus, when `emit_aliases` is set, the deprecated
/// per-operator companions. The aliases live and die with the grouped slot.
pub(crate) fn add_scalar_filter_fields(
    builder: &mut gql_schema::Builder<Engine>,
    parent_type: &TypeName,
    field: &domain_model::Field,
    scalar_type: ScalarType,
    emit_aliases: bool,
    fields: &mut BTreeMap<ast::Name, InputField<Engine>>,
) -> Result<(), Error> {
    let grouped_name = crate::mk_field_name(field.name.as_str())?;
    let grouped_type = if field.is_list {
        builder.register_type(TypeId::ListFilters {
            scalar: scalar_type,
        })
    } else {
        builder.register_type(TypeId::ScalarFilters {
            scalar: scalar_type,
        })
    };
    fields.insert(
        grouped_name.clone(),
        InputField::new(
            grouped_name,
            field.description.clone(),
            Annotation::Input(InputAnnotation::ScalarFilter {
                name: field.name.clone(),
                parent_type: parent_type.clone(),
            }),
            ast::TypeContainer::named_null(grouped_type),
            None,
            DeprecationStatus::NotDeprecated,
        ),
    );

    if emit_aliases {
        let entries = if field.is_list {
            list_operators()
        } else {
            comparison_operators(scalar_type)
        };
        for operator in entries {
            let alias_name =
                crate::mk_field_name(&format!("{}{}", field.name, operator.legacy_suffix))?;
            let operand = operand_type(builder, scalar_type, operator.operand);
            fields.insert(
                alias_name.clone(),
                InputField::new(
                    alias_name,
                    None,
                    Annotation::Input(InputAnnotation::LegacyScalarFilter {
                        name: field.name.clone(),
                        parent_type: parent_type.clone(),
                        operator: operator.operator,
                    }),
                    operand,
                    None,
                    DeprecationStatus::new_deprecated(&format!(
                        "Please use the relevant generic filter {}: {{ {}: ... }}",
                        field.name, operator.group_field
                    )),
                ),
            );
        }
    }
    Ok(())
}
