//! Per-relationship generated types: the existential filters on the owner's
//! `Where`, the connection filter family, the policy-independent connection
//! output surface, and the wiring between them. The filter surface tracks the
//! resolved policy; the selection aggregate never does.

use std::collections::BTreeMap;

use domain_model::{Field, FieldName, TargetType, TypeName};
use graphql_ir::ast;
use graphql_ir::schema as gql_schema;
use graphql_ir::schema::{DeprecationStatus, InputField, RegisteredTypeName};
use graphql_ir::mk_name;

use crate::classify::{classify_field, target_type_name, ClassifiedField, FieldClass};
use crate::types::{
    Annotation, InputAnnotation, OutputAnnotation, Quantifier, TypeId,
};
use crate::{mk_field_name, where_input, Engine, Error};

/// Adds a relationship field's contribution to its owner's `Where` input.
/// With both policy flags off the field contributes nothing at all, and none
/// of its filter types ever get registered.
pub(crate) fn add_relationship_filter_fields(
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field: &Field,
    classified: &ClassifiedField<'_>,
    fields: &mut BTreeMap<ast::Name, InputField<Engine>>,
) -> Result<(), Error> {
    let FieldClass::Relationship { target, .. } = classified.class else {
        return Ok(());
    };

    if let TargetType::Union(union_type) = target {
        // No uniform connection filter over a disjoint member set: the whole
        // surface is the union's own per-member Where.
        if classified.policy.by_value {
            let name = mk_field_name(field.name.as_str())?;
            let union_where = builder.register_type(TypeId::where_input(&union_type.name)?);
            fields.insert(
                name.clone(),
                InputField::new(
                    name,
                    None,
                    Annotation::Input(InputAnnotation::RelationshipFilterField {
                        name: field.name.clone(),
                        parent_type: owner.clone(),
                    }),
                    ast::TypeContainer::named_null(union_where),
                    None,
                    DeprecationStatus::NotDeprecated,
                ),
            );
        }
        return Ok(());
    }

    if classified.policy.by_value {
        let name = mk_field_name(field.name.as_str())?;
        let filters = builder.register_type(TypeId::relationship_filters(owner, &field.name)?);
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::RelationshipFilterField {
                    name: field.name.clone(),
                    parent_type: owner.clone(),
                }),
                ast::TypeContainer::named_null(filters),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    if classified.policy.by_value || classified.policy.by_aggregate {
        let name = mk_field_name(&format!("{}Connection", field.name))?;
        let filters = builder.register_type(TypeId::connection_filters(owner, &field.name)?);
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::ConnectionFilterField {
                    name: field.name.clone(),
                    parent_type: owner.clone(),
                }),
                ast::TypeContainer::named_null(filters),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(())
}

fn classified_relationship<'m>(
    engine: &'m Engine,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<(&'m Field, ClassifiedField<'m>), Error> {
    let field = engine.field(owner, field_name)?;
    let classified = classify_field(&engine.model, owner, field)?;
    match classified.class {
        FieldClass::Relationship { .. } => Ok((field, classified)),
        FieldClass::Scalar { .. } => Err(Error::InternalFieldNotFound {
            type_name: owner.clone(),
            field_name: field_name.clone(),
        }),
    }
}

fn relationship_target<'m>(classified: &ClassifiedField<'m>) -> &'m TypeName {
    match classified.class {
        FieldClass::Relationship { target, .. } => target_type_name(&target),
        FieldClass::Scalar { .. } => unreachable!("caller checked the field class"),
    }
}

/// The existential quantifiers over a relationship's targets, each taking a
/// predicate on the target type.
pub fn relationship_filters_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let (_, classified) = classified_relationship(engine, owner, field_name)?;
    let target = relationship_target(&classified);
    let target_where = builder.register_type(TypeId::where_input(target)?);

    let mut fields = BTreeMap::new();
    for (name, quantifier) in quantifier_fields() {
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::RelationshipFilter {
                    name: field_name.clone(),
                    parent_type: owner.clone(),
                    quantifier,
                }),
                ast::TypeContainer::named_null(target_where.clone()),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }
    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::relationship_filters(owner, field_name)?.to_type_name(),
            None,
            fields,
        ),
    ))
}

fn quantifier_fields() -> [(ast::Name, Quantifier); 4] {
    [
        (mk_name!("all"), Quantifier::All),
        (mk_name!("none"), Quantifier::None),
        (mk_name!("single"), Quantifier::Single),
        (mk_name!("some"), Quantifier::Some),
    ]
}

/// A predicate over one edge of a connection: the node on the far end plus,
/// when the relationship carries its own properties, the edge itself.
pub fn connection_where_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let (field, classified) = classified_relationship(engine, owner, field_name)?;
    let target = relationship_target(&classified);
    let type_id = TypeId::connection_where(owner, field_name)?;

    let mut fields = BTreeMap::new();
    where_input::add_logical_operators(builder, &type_id, &mut fields)?;

    let node_name = mk_name!("node");
    let target_where = builder.register_type(TypeId::where_input(target)?);
    fields.insert(
        node_name.clone(),
        InputField::new(
            node_name,
            None,
            Annotation::Input(InputAnnotation::ConnectionNodePredicate),
            ast::TypeContainer::named_null(target_where),
            None,
            DeprecationStatus::NotDeprecated,
        ),
    );

    if let Some(edge_type_name) = relationship_properties(field) {
        let edge_name = mk_name!("edge");
        let edge_where = builder.register_type(TypeId::where_input(edge_type_name)?);
        fields.insert(
            edge_name.clone(),
            InputField::new(
                edge_name,
                None,
                Annotation::Input(InputAnnotation::ConnectionEdgePredicate),
                ast::TypeContainer::named_null(edge_where),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(type_id.to_type_name(), None, fields),
    ))
}

fn relationship_properties(field: &Field) -> Option<&TypeName> {
    match &field.field_type {
        domain_model::FieldType::Reference { relationship, .. } => {
            relationship.properties.as_ref()
        }
        domain_model::FieldType::Scalar(_) => None,
    }
}

/// The filter surface a relationship contributes to its owner's `Where`:
/// existential combinators over connection predicates when `byValue` is on,
/// an aggregate predicate when `byAggregate` is on.
pub fn connection_filters_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let (_, classified) = classified_relationship(engine, owner, field_name)?;
    let mut fields = BTreeMap::new();

    if classified.policy.by_value {
        let connection_where = builder.register_type(TypeId::connection_where(owner, field_name)?);
        for (name, quantifier) in quantifier_fields() {
            fields.insert(
                name.clone(),
                InputField::new(
                    name,
                    None,
                    Annotation::Input(InputAnnotation::RelationshipFilter {
                        name: field_name.clone(),
                        parent_type: owner.clone(),
                        quantifier,
                    }),
                    ast::TypeContainer::named_null(connection_where.clone()),
                    None,
                    DeprecationStatus::NotDeprecated,
                ),
            );
        }
    }

    if classified.policy.by_aggregate {
        let name = mk_name!("aggregate");
        let aggregation =
            builder.register_type(TypeId::connection_aggregation_input(owner, field_name)?);
        fields.insert(
            name.clone(),
            InputField::new(
                name,
                None,
                Annotation::Input(InputAnnotation::AggregateFilter),
                ast::TypeContainer::named_null(aggregation),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(
            TypeId::connection_filters(owner, field_name)?.to_type_name(),
            None,
            fields,
        ),
    ))
}

/// The aggregate predicate of a connection filter: a count filter, node
/// aggregation and, when the relationship carries properties, edge
/// aggregation.
pub fn connection_aggregation_input_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let (field, _) = classified_relationship(engine, owner, field_name)?;
    let type_id = TypeId::connection_aggregation_input(owner, field_name)?;

    let mut fields = BTreeMap::new();
    where_input::add_logical_operators(builder, &type_id, &mut fields)?;

    let count_name = mk_name!("count");
    let count_filters = builder.register_type(TypeId::ScalarFilters {
        scalar: domain_model::ScalarType::Int,
    });
    fields.insert(
        count_name.clone(),
        InputField::new(
            count_name,
            None,
            Annotation::Input(InputAnnotation::AggregateCountFilter),
            ast::TypeContainer::named_null(count_filters),
            None,
            DeprecationStatus::NotDeprecated,
        ),
    );

    let node_name = mk_name!("node");
    let node_aggregation =
        builder.register_type(TypeId::node_aggregation_where_input(owner, field_name)?);
    fields.insert(
        node_name.clone(),
        InputField::new(
            node_name,
            None,
            Annotation::Input(InputAnnotation::AggregateNodeFilter),
            ast::TypeContainer::named_null(node_aggregation),
            None,
            DeprecationStatus::NotDeprecated,
        ),
    );

    if relationship_properties(field).is_some() {
        let edge_name = mk_name!("edge");
        let edge_aggregation =
            builder.register_type(TypeId::edge_aggregation_where_input(owner, field_name)?);
        fields.insert(
            edge_name.clone(),
            InputField::new(
                edge_name,
                None,
                Annotation::Input(InputAnnotation::AggregateEdgeFilter),
                ast::TypeContainer::named_null(edge_aggregation),
                None,
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    Ok(gql_schema::TypeInfo::InputObject(
        gql_schema::InputObject::new(type_id.to_type_name(), None, fields),
    ))
}

/// The paginated view of a relationship's targets plus edge metadata. The
/// selection aggregate hangs off this type for every concrete or interface
/// target, independent of the filter policy.
pub fn connection_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let (_, classified) = classified_relationship(engine, owner, field_name)?;
    let target = relationship_target(&classified);

    let mut fields = BTreeMap::new();

    let edges_name = mk_name!("edges");
    let edge_object = builder.register_type(TypeId::relationship(owner, field_name)?);
    fields.insert(
        edges_name.clone(),
        gql_schema::Field::new(
            edges_name,
            None,
            Annotation::Output(OutputAnnotation::ConnectionEdges),
            ast::TypeContainer::list_non_null(ast::TypeContainer::named_non_null(edge_object)),
            BTreeMap::new(),
            DeprecationStatus::NotDeprecated,
        ),
    );

    let total_count_name = mk_name!("totalCount");
    fields.insert(
        total_count_name.clone(),
        gql_schema::Field::new(
            total_count_name,
            None,
            Annotation::Output(OutputAnnotation::ConnectionTotalCount),
            ast::TypeContainer::named_non_null(RegisteredTypeName::int()),
            BTreeMap::new(),
            DeprecationStatus::NotDeprecated,
        ),
    );

    let aggregate_name = mk_name!("aggregate");
    let aggregate_selection =
        builder.register_type(TypeId::aggregate_selection(owner, target, field_name)?);
    fields.insert(
        aggregate_name.clone(),
        gql_schema::Field::new(
            aggregate_name,
            None,
            Annotation::Output(OutputAnnotation::ConnectionAggregate),
            ast::TypeContainer::named_non_null(aggregate_selection),
            BTreeMap::new(),
            DeprecationStatus::NotDeprecated,
        ),
    );

    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::connection(owner, field_name)?.to_type_name(),
        None,
        fields,
        std::collections::BTreeSet::new(),
    )))
}

/// One edge of a connection: the far node plus the relationship's own
/// properties when it carries any.
pub fn relationship_schema(
    engine: &Engine,
    builder: &mut gql_schema::Builder<Engine>,
    owner: &TypeName,
    field_name: &FieldName,
) -> Result<gql_schema::TypeInfo<Engine>, Error> {
    let (field, classified) = classified_relationship(engine, owner, field_name)?;
    let target = relationship_target(&classified);

    let mut fields = BTreeMap::new();

    let node_name = mk_name!("node");
    let target_output = builder.register_type(TypeId::output_type(target)?);
    fields.insert(
        node_name.clone(),
        gql_schema::Field::new(
            node_name,
            None,
            Annotation::Output(OutputAnnotation::RelationshipNode),
            ast::TypeContainer::named_non_null(target_output),
            BTreeMap::new(),
            DeprecationStatus::NotDeprecated,
        ),
    );

    if let Some(edge_type_name) = relationship_properties(field) {
        let properties_name = mk_name!("properties");
        let edge_output = builder.register_type(TypeId::output_type(edge_type_name)?);
        fields.insert(
            properties_name.clone(),
            gql_schema::Field::new(
                properties_name,
                None,
                Annotation::Output(OutputAnnotation::RelationshipProperties {
                    edge_type: edge_type_name.clone(),
                }),
                ast::TypeContainer::named_non_null(edge_output),
                BTreeMap::new(),
                DeprecationStatus::NotDeprecated,
            ),
        );
    }

    Ok(gql_schema::TypeInfo::Object(gql_schema::Object::new(
        TypeId::relationship(owner, field_name)?.to_type_name(),
        None,
        fields,
        std::collections::BTreeSet::new(),
    )))
}
