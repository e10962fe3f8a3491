use super::*;

use thiserror::Error;

use crate::ast;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("internal error when building schema: {0:}")]
    Internal(String),

    #[error("multiple definitions of graphql type: {0:}")]
    ConflictingGraphQlType(ast::TypeName),
}

pub type Result<T> = core::result::Result<T, Error>;

const BUILT_IN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Builds the full type graph for a schema context by draining the builder's
/// registered type ids until every reachable type has been generated. The
/// entry-point types are registered first; everything else is registered on
/// demand while building the types that reference it.
pub fn build_schema<S>(s: &S) -> std::result::Result<Schema<S>, S::SchemaError>
where
    S: SchemaContext,
{
    let mut types = BTreeMap::new();

    // Seed the built-in scalars so that every named reference in the finished
    // schema resolves to an entry in the type map.
    for scalar in BUILT_IN_SCALARS {
        let name = ast::TypeName(
            ast::Name::new(scalar).map_err(|error| Error::Internal(error.to_string()))?,
        );
        types.insert(
            name.clone(),
            TypeInfo::Scalar(Scalar {
                name,
                description: None,
            }),
        );
    }

    let mut builder = Builder {
        registered_types: HashSet::new(),
    };
    let mut generated_type_ids: HashSet<S::TypeId> = HashSet::new();
    let schema_entry_point = s.get_schema_entry_point();

    // register all the root types
    let query_root_name = builder.register_type(schema_entry_point.query);
    let mutation_root_name = schema_entry_point
        .mutation
        .map(|type_id| builder.register_type(type_id));
    let subscription_root_name = schema_entry_point
        .subscription
        .map(|type_id| builder.register_type(type_id));

    while !builder.registered_types.is_empty() {
        let types_to_be_generated = builder
            .registered_types
            .drain()
            .filter(|type_id| !generated_type_ids.contains(type_id))
            .collect::<Vec<_>>();
        for type_id in types_to_be_generated {
            let type_definition = s.build_type_info(&mut builder, &type_id)?;
            let type_name = type_definition.type_name().clone();
            if types.insert(type_name.clone(), type_definition).is_some() {
                return Err(Error::ConflictingGraphQlType(type_name).into());
            }
            generated_type_ids.insert(type_id);
        }
    }

    Ok(Schema {
        types,
        query_type: query_root_name.0,
        mutation_type: mutation_root_name.map(|v| v.0),
        subscription_type: subscription_root_name.map(|v| v.0),
    })
}
