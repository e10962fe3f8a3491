//! Mutation input types. Create and update inputs cover scalar fields only;
//! relationship wiring is carried out through dedicated mutations on the
//! owning side and is not part of the node payload.

use std::collections::BTreeMap;

use domain_model::{FieldType, TypeName};
use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField, RegisteredType, RegisteredTypeName};
use graphql_ir::mk_name;

use crate::types::{register_scalar_type, Annotation, InputAnnotation, OutputAnnotation, TypeId};
use crate::{mk_field_name, Engine, Error};

fn scalar_input_type(base: RegisteredTypeName, is_list: bool, is_required: bool) -> RegisteredType {
    let element = ast::TypeContainer::named_non_null(base.clone());
    match (is_list, is_required) {
        (true, true) => ast::TypeContainer::list_non_null(element),
        (true, false) => ast::TypeContainer::list_null(element),
        (false, true) => element,
        (false, false) => ast::TypeContainer::named_null(base),
    }
}

pub fn create_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    type_name: &TypeName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for field in engine.domain_fields(type_name)?.values() {
        let FieldType::Scalar(scalar) = &field.field_type else {
            continue;
        };
        let name = mk_field_name(field.name.as_str())?;
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                field.description.clone(),
                Annotation::Input(InputAnnotation::CreateField {
                    name: field.name.clone(),
                    parent_type: type_name.clone(),
                }),
                scalar_input_type(
                    register_scalar_type(builder, *scalar),
                    field.is_list,
                    field.is_required,
                ),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::create_input(type_name)?.to_type_name(),
            None,
            fields,
        ),
    ))
}

/// Every slot is nullable: omission means "leave unchanged".
pub fn update_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    type_name: &TypeName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for field in engine.domain_fields(type_name)?.values() {
        let FieldType::Scalar(scalar) = &field.field_type else {
            continue;
        };
        let name = mk_field_name(field.name.as_str())?;
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::UpdateField {
                    name: field.name.clone(),
                    parent_type: type_name.clone(),
                }),
                scalar_input_type(register_scalar_type(builder, *scalar), field.is_list, false),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::update_input(type_name)?.to_type_name(),
            None,
            fields,
        ),
    ))
}

/// The shared payload of delete mutations.
pub fn delete_info_schema() -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();
    for (name, annotation) in [
        (
            mk_name!("nodesDeleted"),
            OutputAnnotation::DeletedNodesCount,
        ),
        (
            mk_name!("relationshipsDeleted"),
            OutputAnnotation::DeletedRelationshipsCount,
        ),
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
        TypeId::DeleteInfo.to_type_name(),
        None,
        fields,
        std::collections::BTreeSet::new(),
    )))
}
