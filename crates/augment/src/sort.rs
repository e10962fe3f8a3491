//! Sort inputs. Sorting is independent of the filter policy: every non-list
//! scalar field of a type is sortable, whatever its `@filterable` annotation
//! says.

use std::collections::BTreeMap;

use domain_model::{FieldType, TypeName};
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, EnumValue, InputField};
use graphql_ir::{ast, mk_name};

use crate::types::{Annotation, EnumValueAnnotation, InputAnnotation, SortDirection, TypeId};
use crate::{Engine, Error};

pub fn sort_direction_schema() -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut values = BTreeMap::new();
    for (name, direction) in [
        (mk_name!("ASC"), SortDirection::Ascending),
        (mk_name!("DESC"), SortDirection::Descending),
    ] {
        values.insert(
            name.clone(),
            EnumValue {
                value: name,
                description: None,
                deprecation_status: DeprecationStatus::NotDeprecated,
                info: Annotation::EnumValue(EnumValueAnnotation::SortDirection { direction }),
            },
        );
    }
    Ok(gql_schema::TypeInfo::Enum(gql_schema::Enum {
        name: TypeId::SortDirectionEnum.to_type_name(),
        description: None,
        values,
    }))
}

pub fn sort_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    type_name: &TypeName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for field in engine.domain_fields(type_name)?.values() {
        if field.is_list || !matches!(field.field_type, FieldType::Scalar(_)) {
            continue;
        }
        let name = crate::mk_field_name(field.name.as_str())?;
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::SortField {
                    name: field.name.clone(),
                    parent_type: type_name.clone(),
                }),
                ast::TypeContainer::named_null(
                    builder.register_type(TypeId::SortDirectionEnum),
                ),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::sort_input(type_name)?.to_type_name(),
            None,
            fields,
        ),
    ))
}
