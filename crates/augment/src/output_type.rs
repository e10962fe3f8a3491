//! Output types for the domain types themselves: node objects, interfaces,
//! unions and relationship-property objects, including the per-relationship
//! connection fields and their traversal arguments.

use std::collections::{BTreeMap, BTreeSet};

use domain_model::{Field, FieldName, TargetType, TypeName};
use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField, RegisteredType, RegisteredTypeName};
use graphql_ir::mk_name;
use indexmap::IndexMap;

use crate::classify::{classify_field, target_type_name, FieldClass};
use crate::types::{register_scalar_type, Annotation, InputAnnotation, OutputAnnotation, TypeId};
use crate::{mk_field_name, Engine, Error};

pub(crate) fn output_field_type(
    base: RegisteredTypeName,
    is_list: bool,
    is_required: bool,
) -> RegisteredType {
    let element = ast::TypeContainer::named_non_null(base.clone());
    match (is_list, is_required) {
        (true, true) => ast::TypeContainer::list_non_null(element),
        (true, false) => ast::TypeContainer::list_null(element),
        (false, true) => element,
        (false, false) => ast::TypeContainer::named_null(base),
    }
}

pub fn output_type_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    type_name: &TypeName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let graphql_type_name = TypeId::output_type(type_name)?.to_type_name();

    if let Some(union_type) = engine.model.union_types.get(type_name) {
        let mut members = BTreeSet::new();
        for member in &union_type.members {
            members.insert(builder.register_type(TypeId::output_type(member)?));
        }
        return Ok(gql_schema::TypeInfo::Union(gql_schema::Union::new(
            graphql_type_name,
            None,
            members,
        )));
    }

    if let Some(interface_type) = engine.model.interface_types.get(type_name) {
        let fields = domain_type_fields(engine, builder, type_name, &interface_type.fields)?;
        let mut implemented_by = BTreeSet::new();
        for implementer in &interface_type.implemented_by {
            implemented_by.insert(builder.register_type(TypeId::output_type(implementer)?));
        }
        return Ok(gql_schema::TypeInfo::Interface(gql_schema::Interface::new(
            graphql_type_name,
            None,
            fields,
            implemented_by,
        )));
    }

    if let Some(node_type) = engine.model.node_types.get(type_name) {
        let fields = domain_type_fields(engine, builder, type_name, &node_type.fields)?;
        let mut interfaces = BTreeSet::new();
        for interface_type in engine.model.interfaces_of(type_name) {
            interfaces.insert(builder.register_type(TypeId::output_type(&interface_type.name)?));
        }
        return Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
            graphql_type_name,
            None,
            fields,
            interfaces,
        )));
    }

    if let Some(edge_type) = engine.model.edge_types.get(type_name) {
        let fields = domain_type_fields(engine, builder, type_name, &edge_type.fields)?;
        return Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
            graphql_type_name,
            None,
            fields,
            BTreeSet::new(),
        )));
    }

    Err(Error::InternalTypeNotFound {
        type_name: type_name.clone(),
    })
}

fn domain_type_fields(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    type_name: &TypeName,
    source_fields: &IndexMap<FieldName, Field>,
) -> Result<BTreeMap<ast::Name, gql_schema::Field<Engine>>, Error> {
    let mut fields = BTreeMap::new();
    for field in source_fields.values() {
        let classified = classify_field(&engine.model, type_name, field)?;
        match classified.class {
            FieldClass::Scalar { scalar_type } => {
                let name = mk_field_name(field.name.as_str())?;
                fields.insert(
                    name.clone(),
                    gql_schema::Field::new(
                        name,
                        field.description.clone(),
                        Annotation::Output(OutputAnnotation::Field {
                            name: field.name.clone(),
                            parent_type: type_name.clone(),
                        }),
                        output_field_type(
                            register_scalar_type(builder, scalar_type),
                            field.is_list,
                            field.is_required,
                        ),
                        BTreeMap::new(),
                        DeprecationStatus::NotDeprecated,
                    ),
                );
            }
            FieldClass::Relationship { target, meta } => {
                let target_name = target_type_name(&target);
                let name = mk_field_name(field.name.as_str())?;

                let mut arguments = BTreeMap::new();
                let where_name = mk_name!("where");
                let target_where = builder.register_type(TypeId::where_input(target_name)?);
                arguments.insert(
                    where_name.clone(),
                    InputField::new(
                        where_name,
                        None,
                        Annotation::Input(InputAnnotation::WhereArgument),
                        ast::TypeContainer::named_null(target_where),
                        None,
                        DeprecationStatus::NotDeprecated,
                    ),
                );
                if !matches!(target, TargetType::Union(_)) {
                    let sort_name = mk_name!("sort");
                    let target_sort = builder.register_type(TypeId::sort_input(target_name)?);
                    arguments.insert(
                        sort_name.clone(),
                        InputField::new(
                            sort_name,
                            None,
                            Annotation::Input(InputAnnotation::SortArgument),
                            ast::TypeContainer::list_null(ast::TypeContainer::named_non_null(
                                target_sort,
                            )),
                            None,
                            DeprecationStatus::NotDeprecated,
                        ),
                    );
                }

                let target_output = builder.register_type(TypeId::output_type(target_name)?);
                fields.insert(
                    name.clone(),
                    gql_schema::Field::new(
                        name,
                        field.description.clone(),
                        Annotation::Output(OutputAnnotation::RelationshipField {
                            name: field.name.clone(),
                            parent_type: type_name.clone(),
                            target: target_name.clone(),
                        }),
                        output_field_type(target_output, field.is_list, field.is_required),
                        arguments,
                        DeprecationStatus::NotDeprecated,
                    ),
                );

                // The connection view exists for concrete and interface
                // targets only; a union has no uniform edge shape.
                if !matches!(target, TargetType::Union(_)) {
                    let connection_name =
                        mk_field_name(&format!("{}Connection", field.name))?;
                    let mut connection_arguments = BTreeMap::new();
                    let connection_where_name = mk_name!("where");
                    let connection_where =
                        builder.register_type(TypeId::connection_where(type_name, &field.name)?);
                    connection_arguments.insert(
                        connection_where_name.clone(),
                        InputField::new(
                            connection_where_name,
                            None,
                            Annotation::Input(InputAnnotation::ConnectionWhereArgument),
                            ast::TypeContainer::named_null(connection_where),
                            None,
                            DeprecationStatus::NotDeprecated,
                        ),
                    );
                    if let Some(edge_type_name) = &meta.properties {
                        let connection_sort_name = mk_name!("sort");
                        let edge_sort =
                            builder.register_type(TypeId::sort_input(edge_type_name)?);
                        connection_arguments.insert(
                            connection_sort_name.clone(),
                            InputField::new(
                                connection_sort_name,
                                None,
                                Annotation::Input(InputAnnotation::ConnectionSortArgument),
                                ast::TypeContainer::list_null(
                                    ast::TypeContainer::named_non_null(edge_sort),
                                ),
                                None,
                                DeprecationStatus::NotDeprecated,
                            ),
                        );
                    }

                    let connection =
                        builder.register_type(TypeId::connection(type_name, &field.name)?);
                    fields.insert(
                        connection_name.clone(),
                        gql_schema::Field::new(
                            connection_name,
                            None,
                            Annotation::Output(OutputAnnotation::ConnectionField {
                                name: field.name.clone(),
                                parent_type: type_name.clone(),
                            }),
                            ast::TypeContainer::named_non_null(connection),
                            connection_arguments,
                            DeprecationStatus::NotDeprecated,
                        ),
                    );
                }
            }
        }
    }
    Ok(fields)
}
