//! The query root: one plural read field per node type, interface and union.
//! These fields are the reachability roots that pull the whole read-side type
//! graph into the schema.

use std::collections::{BTreeMap, BTreeSet};

use domain_model::TypeName;
use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField};
use graphql_ir::mk_name;

use crate::types::{
    lower_camel, Annotation, InputAnnotation, OutputAnnotation, RootFieldAnnotation, TypeId,
};
use crate::{mk_field_name, Engine, Error};

pub(crate) fn plural(type_name: &TypeName) -> String {
    lower_camel(type_name.as_str()) + "s"
}

pub fn query_root_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();

    let readable: Vec<(&TypeName, bool)> = engine
        .model
        .node_types
        .keys()
        .map(|name| (name, true))
        .chain(engine.model.interface_types.keys().map(|name| (name, true)))
        .chain(engine.model.union_types.keys().map(|name| (name, false)))
        .collect();

    for (type_name, sortable) in readable {
        let name = mk_field_name(&plural(type_name))?;

        let mut arguments = BTreeMap::new();
        let where_name = mk_name!("where");
        let where_input = builder.register_type(TypeId::where_input(type_name)?);
        arguments.insert(
            where_name.clone(),
            InputField::new(
                where_name,
                None,
                Annotation::Input(InputAnnotation::WhereArgument),
                ast::TypeContainer::named_null(where_input),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
        if sortable {
            let sort_name = mk_name!("sort");
            let sort_input = builder.register_type(TypeId::sort_input(type_name)?);
            arguments.insert(
                sort_name.clone(),
                InputField::new(
                    sort_name,
                    None,
                    Annotation::Input(InputAnnotation::SortArgument),
                    ast::TypeContainer::list_null(ast::TypeContainer::named_non_null(sort_input)),
                    None,
                    DeprecationStatus::NotDeprecated,
                ),
            );
        }

        let output = builder.register_type(TypeId::output_type(type_name)?);
        fields.insert(
            name.clone(),
            gql_schema::Field::new(
                name,
                None,
                Annotation::Output(OutputAnnotation::RootField(RootFieldAnnotation::ReadMany {
                    type_name: type_name.clone(),
                })),
                ast::TypeContainer::list_non_null(ast::TypeContainer::named_non_null(output)),
                arguments,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::QueryRoot.to_type_name(),
        None,
        fields,
        BTreeSet::new(),
    )))
}
