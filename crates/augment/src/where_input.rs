//! `Where` and `SubscriptionWhere` input types. Concrete types get the full
//! scalar and relationship filter surface, interfaces add an implementer
//! discriminator over their own declared fields, and unions get a per-member
//! map since traversal into a union must select a branch statically.

use std::collections::BTreeMap;

use domain_model::TypeName;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, EnumValue, InputField};
use graphql_ir::{ast, mk_name};

use crate::classify::{classify_field, FieldClass};
use crate::types::{
    Annotation, EnumValueAnnotation, InputAnnotation, LogicalOperator, TypeId,
};
use crate::{mk_field_name, relationship, scalar_filter, Engine, Error};

/// The self-referential combinator fields shared by every `Where`-shaped
/// input.
pub(crate) fn add_logical_operators(
    builder: &mut gql_schema::Builder<Engine>,
    type_id: &TypeId,
    fields: &mut BTreeMap<ast::Name, InputField<Engine>>,
) -> Result<(), Error> {
    let self_type = builder.register_type(type_id.clone());
    let list_of_self = ast::TypeContainer::list_null(ast::TypeContainer::named_non_null(
        self_type.clone(),
    ));
    for (name, operator, field_type) in [
        (mk_name!("AND"), LogicalOperator::And, list_of_self.clone()),
        (mk_name!("OR"), LogicalOperator::Or, list_of_self),
        (
            mk_name!("NOT"),
            LogicalOperator::Not,
            ast::TypeContainer::named_null(self_type),
        ),
    ] {
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::LogicalOperator { operator }),
                field_type,
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(())
}

pub fn where_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    type_name: &TypeName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let type_id = TypeId::where_input(type_name)?;
    let mut fields = BTreeMap::new();
    add_logical_operators(builder, &type_id, &mut fields)?;

    if let Some(union_type) = engine.model.union_types.get(type_name) {
        for member in &union_type.members {
            let name = mk_field_name(member.as_str())?;
            let member_where = builder.register_type(TypeId::where_input(member)?);
            fields.insert(
                name.clone(),
                InputField::new(
                    name,
                    None,
                    Annotation::Input(InputAnnotation::UnionMemberFilter {
                        member: member.clone(),
                    }),
                    ast::TypeContainer::named_null(member_where),
                    None,
                    DeprecationStatus::NotDeprecated,
                ),
            );
        }
        return Ok(gql_schema::TypeInfo::InputObject(
            gql_schema::InputObject::new(type_id.to_type_name(), None, fields),
        ));
    }

    if engine.model.interface_types.contains_key(type_name) {
        let name = mk_name!("typename_IN");
        let implementations =
            builder.register_type(TypeId::implementations_enum(type_name)?);
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::TypenameIn),
                ast::TypeContainer::list_null(ast::TypeContainer::named_non_null(
                    implementations,
                )),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    for field in engine.domain_fields(type_name)?.values() {
        let classified = classify_field(&engine.model, type_name, field)?;
        match classified.class {
            FieldClass::Scalar { scalar_type } => {
                if classified.policy.by_value {
                    scalar_filter::add_scalar_filter_fields(
                        builder,
                        type_name,
                        field,
                        scalar_type,
                        engine.configuration.legacy_aliases.scalar_comparison_aliases,
                        &mut fields,
                    )?;
                }
            }
            FieldClass::Relationship { .. } => {
                relationship::add_relationship_filter_fields(
                    builder,
                    type_name,
                    field,
                    &classified,
                    &mut fields,
                )?;
            }
        }
    }

    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(type_id.to_type_name(), None, fields),
    ))
}

/// The event filter for a node type's subscription operations. Scalar fields
/// only; relationship predicates cannot be evaluated against a single change
/// event.
pub fn subscription_where_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    type_name: &TypeName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let type_id = TypeId::subscription_where_input(type_name)?;
    let mut fields = BTreeMap::new();
    add_logical_operators(builder, &type_id, &mut fields)?;

    for field in engine.domain_fields(type_name)?.values() {
        let classified = classify_field(&engine.model, type_name, field)?;
        if let FieldClass::Scalar { scalar_type } = classified.class {
            if classified.policy.by_value {
                scalar_filter::add_scalar_filter_fields(
                    builder,
                    type_name,
                    field,
                    scalar_type,
                    engine.configuration.legacy_aliases.subscription_aliases,
                    &mut fields,
                )?;
            }
        }
    }

    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(type_id.to_type_name(), None, fields),
    ))
}

/// One value per implementing type, used to narrow an interface predicate by
/// implementer identity.
pub fn implementations_enum_schema(
    engine: &Engine,
    interface_name: &TypeName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let interface_type = engine.model.interface_types.get(interface_name).ok_or_else(|| {
        Error::InternalTypeNotFound {
            type_name: interface_name.clone(),
        }
    })?;
    let mut values = BTreeMap::new();
    for implementer in &interface_type.implemented_by {
        let value = mk_field_name(implementer.as_str())?;
        values.insert(
            value.clone(),
            EnumValue {
                value,
                description: None,
                deprecation_status: DeprecationStatus::NotDeprecated,
                info: Annotation::EnumValue(EnumValueAnnotation::Implementation {
                    type_name: implementer.clone(),
                }),
            },
        );
    }
    Ok(gql_schema::TypeInfo::Enum(gql_schema::Enum {
        name: TypeId::implementations_enum(interface_name)?.to_type_name(),
        description: None,
        values,
    }))
}
