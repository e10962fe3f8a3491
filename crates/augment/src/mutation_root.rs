//! The mutation root: create/update/delete operations per node type.

use std::collections::{BTreeMap, BTreeSet};

use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField};
use graphql_ir::mk_name;

use crate::query_root::plural;
use crate::types::{
    capitalized, Annotation, InputAnnotation, OutputAnnotation, RootFieldAnnotation, TypeId,
};
use crate::{mk_field_name, Engine, Error};

pub fn mutation_root_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();

    for type_name in engine.model.node_types.keys() {
        let suffix = capitalized(&plural(type_name));
        let output = builder.register_type(TypeId::output_type(type_name)?);
        let node_list =
            ast::TypeContainer::list_non_null(ast::TypeContainer::named_non_null(output));

        // createXs(input: [XCreateInput!]!): [X!]!
        let create_name = mk_field_name(&format!("create{suffix}"))?;
        let mut create_arguments = BTreeMap::new();
        let input_name = mk_name!("input");
        let create_input = builder.register_type(TypeId::create_input(type_name)?);
        create_arguments.insert(
            input_name.clone(),
            InputField::new(
                input_name,
                None,
                Annotation::Input(InputAnnotation::CreateArgument),
                ast::TypeContainer::list_non_null(ast::TypeContainer::named_non_null(
                    create_input,
                )),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
        fields.insert(
            create_name.clone(),
            gql_schema::Field::new(
                create_name,
                None,
                Annotation::Output(OutputAnnotation::RootField(RootFieldAnnotation::Create {
                    type_name: type_name.clone(),
                })),
                node_list.clone(),
                create_arguments,
                DeprecationStatus::NotDeprecated,
            ),
        );

        // updateXs(where: XWhere, update: XUpdateInput): [X!]!
        let update_name = mk_field_name(&format!("update{suffix}"))?;
        let mut update_arguments = BTreeMap::new();
        let where_name = mk_name!("where");
        let where_input = builder.register_type(TypeId::where_input(type_name)?);
        update_arguments.insert(
            where_name.clone(),
            InputField::new(
                where_name,
                None,
                Annotation::Input(InputAnnotation::WhereArgument),
                ast::TypeContainer::named_null(where_input.clone()),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
        let update_argument_name = mk_name!("update");
        let update_input = builder.register_type(TypeId::update_input(type_name)?);
        update_arguments.insert(
            update_argument_name.clone(),
            InputField::new(
                update_argument_name,
                None,
                Annotation::Input(InputAnnotation::UpdateArgument),
                ast::TypeContainer::named_null(update_input),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
        fields.insert(
            update_name.clone(),
            gql_schema::Field::new(
                update_name,
                None,
                Annotation::Output(OutputAnnotation::RootField(RootFieldAnnotation::Update {
                    type_name: type_name.clone(),
                })),
                node_list,
                update_arguments,
                DeprecationStatus::NotDeprecated,
            ),
        );

        // deleteXs(where: XWhere): DeleteInfo!
        let delete_name = mk_field_name(&format!("delete{suffix}"))?;
        let mut delete_arguments = BTreeMap::new();
        let where_name = mk_name!("where");
        delete_arguments.insert(
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
        let delete_info = builder.register_type(TypeId::DeleteInfo);
        fields.insert(
            delete_name.clone(),
            gql_schema::Field::new(
                delete_name,
                None,
                Annotation::Output(OutputAnnotation::RootField(RootFieldAnnotation::Delete {
                    type_name: type_name.clone(),
                })),
                ast::TypeContainer::named_non_null(delete_info),
                delete_arguments,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::MutationRoot.to_type_name(),
        None,
        fields,
        BTreeSet::new(),
    )))
}
