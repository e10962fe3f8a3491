//! The subscription root: created/updated/deleted events per node type. The
//! engine only decides what the event filter looks like; when and whether
//! events fire is owned by the change-data-capture subsystem.

use std::collections::{BTreeMap, BTreeSet};

use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField};
use graphql_ir::mk_name;

use crate::types::{
    lower_camel, Annotation, EventKind, InputAnnotation, OutputAnnotation, RootFieldAnnotation,
    TypeId,
};
use crate::{mk_field_name, Engine, Error};

pub fn subscription_root_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let mut fields = BTreeMap::new();

    for type_name in engine.model.node_types.keys() {
        let stem = lower_camel(type_name.as_str());
        let output = builder.register_type(TypeId::output_type(type_name)?);
        let subscription_where =
            builder.register_type(TypeId::subscription_where_input(type_name)?);

        for (suffix, event) in [
            ("Created", EventKind::Created),
            ("Updated", EventKind::Updated),
            ("Deleted", EventKind::Deleted),
        ] {
            let name = mk_field_name(&format!("{stem}{suffix}"))?;
            let mut arguments = BTreeMap::new();
            let where_name = mk_name!("where");
            arguments.insert(
                where_name.clone(),
                InputField::new(
                    where_name,
                    None,
                    Annotation::Input(InputAnnotation::WhereArgument),
                    ast::TypeContainer::named_null(subscription_where.clone()),
                    None,
                    DeprecationStatus::NotDeprecated,
                ),
            );
            fields.insert(
                name.clone(),
                gql_schema::Field::new(
                    name,
                    None,
                    Annotation::Output(OutputAnnotation::RootField(RootFieldAnnotation::Event {
                        type_name: type_name.clone(),
                        event,
                    })),
                    ast::TypeContainer::named_non_null(output.clone()),
                    arguments,
                    DeprecationStatus::NotDeprecated,
                ),
            );
        }
    }

    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::SubscriptionRoot.to_type_name(),
        None,
        fields,
        BTreeSet::new(),
    )))
}
