//! End-to-end tests over `Engine::augment`: build a small annotated domain
//! model, derive the full type graph, and assert on the generated types the
//! way a GraphQL client would see them.

use std::collections::BTreeSet;

use augment::{Engine, Error};
use domain_model::{
    Configuration, DomainModel, EdgeType, Field, FieldName, FilterableDirective, Identifier,
    InterfaceType, NodeType, RelationshipDirection, RelationshipMeta, ScalarType, TypeName,
    UnionType,
};
use graphql_ir::ast;
use graphql_ir::schema::{InputObject, Object, Schema, TypeInfo};

fn type_name(s: &str) -> TypeName {
    TypeName(Identifier::new(s).unwrap())
}

fn field_name(s: &str) -> FieldName {
    FieldName(Identifier::new(s).unwrap())
}

fn graphql_name(s: &str) -> ast::TypeName {
    ast::TypeName(ast::Name::new(s).unwrap())
}

fn name(s: &str) -> ast::Name {
    ast::Name::new(s).unwrap()
}

fn scalar(field: &str, scalar_type: ScalarType) -> Field {
    Field::scalar(field_name(field), scalar_type)
}

fn list_scalar(field: &str, scalar_type: ScalarType) -> Field {
    let mut field = Field::scalar(field_name(field), scalar_type);
    field.is_list = true;
    field
}

fn reference(field: &str, target: &str, edge_label: &str) -> Field {
    Field::reference(
        field_name(field),
        type_name(target),
        RelationshipMeta {
            edge_label: edge_label.to_string(),
            direction: RelationshipDirection::Outgoing,
            properties: None,
        },
    )
}

fn reference_with_properties(field: &str, target: &str, edge_label: &str, edge: &str) -> Field {
    Field::reference(
        field_name(field),
        type_name(target),
        RelationshipMeta {
            edge_label: edge_label.to_string(),
            direction: RelationshipDirection::Outgoing,
            properties: Some(type_name(edge)),
        },
    )
}

fn node(type_name_str: &str, fields: Vec<Field>) -> (TypeName, NodeType) {
    let name = type_name(type_name_str);
    (
        name.clone(),
        NodeType {
            name,
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        },
    )
}

fn edge(type_name_str: &str, fields: Vec<Field>) -> (TypeName, EdgeType) {
    let name = type_name(type_name_str);
    (
        name.clone(),
        EdgeType {
            name,
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        },
    )
}

/// The baseline model: a movie graph with one relationship carrying its own
/// properties.
fn movie_graph() -> DomainModel {
    DomainModel {
        node_types: [
            node(
                "Movie",
                vec![
                    scalar("title", ScalarType::String),
                    scalar("released", ScalarType::Int),
                    list_scalar("tags", ScalarType::String),
                    reference_with_properties("actors", "Person", "ACTED_IN", "ActedIn"),
                ],
            ),
            node(
                "Person",
                vec![
                    scalar("name", ScalarType::String),
                    scalar("born", ScalarType::Int),
                ],
            ),
        ]
        .into_iter()
        .collect(),
        edge_types: [edge(
            "ActedIn",
            vec![
                scalar("role", ScalarType::String),
                scalar("screenTime", ScalarType::Int),
            ],
        )]
        .into_iter()
        .collect(),
        ..DomainModel::default()
    }
}

fn augmented(model: DomainModel) -> Schema<Engine> {
    augmented_with(model, Configuration::default())
}

fn augmented_with(model: DomainModel, configuration: Configuration) -> Schema<Engine> {
    Engine::new(model, configuration)
        .expect("model should validate")
        .augment()
        .expect("augmentation should succeed")
}

fn input_object<'s>(schema: &'s Schema<Engine>, type_name_str: &str) -> &'s InputObject<Engine> {
    match schema.types.get(&graphql_name(type_name_str)) {
        Some(TypeInfo::InputObject(input_object)) => input_object,
        other => panic!("expected input object {type_name_str}, found {other:?}"),
    }
}

fn object<'s>(schema: &'s Schema<Engine>, type_name_str: &str) -> &'s Object<Engine> {
    match schema.types.get(&graphql_name(type_name_str)) {
        Some(TypeInfo::Object(object)) => object,
        other => panic!("expected object {type_name_str}, found {other:?}"),
    }
}

fn field_names(input_object: &InputObject<Engine>) -> Vec<&str> {
    input_object
        .fields
        .keys()
        .map(ast::Name::as_str)
        .collect()
}

#[test]
fn scalar_fields_get_grouped_filters_and_deprecated_aliases() {
    let schema = augmented(movie_graph());

    let movie_where = input_object(&schema, "MovieWhere");
    for expected in [
        "AND",
        "OR",
        "NOT",
        "title",
        "title_EQ",
        "title_IN",
        "title_CONTAINS",
        "title_STARTS_WITH",
        "title_ENDS_WITH",
        "released",
        "released_GT",
        "released_LTE",
        "tags",
        "tags_EQ",
        "tags_INCLUDES",
        "actors",
        "actorsConnection",
    ] {
        assert!(
            movie_where.fields.contains_key(&name(expected)),
            "MovieWhere should contain {expected}"
        );
    }

    let title = &movie_where.fields[&name("title")];
    assert_eq!(
        title.field_type.underlying_type(),
        &graphql_name("StringScalarFilters")
    );
    assert!(title.field_type.nullable);

    let tags = &movie_where.fields[&name("tags")];
    assert_eq!(
        tags.field_type.underlying_type(),
        &graphql_name("StringListFilters")
    );

    let title_contains = &movie_where.fields[&name("title_CONTAINS")];
    assert_eq!(
        title_contains.deprecation_status.reason(),
        Some("Please use the relevant generic filter title: { contains: ... }")
    );
    assert!(!title.deprecation_status.is_deprecated());

    // The shared operator-set inputs carry the per-kind operator inventory.
    let string_filters = input_object(&schema, "StringScalarFilters");
    assert_eq!(
        field_names(string_filters),
        vec!["contains", "endsWith", "eq", "in", "startsWith"]
    );
    let int_filters = input_object(&schema, "IntScalarFilters");
    assert_eq!(
        field_names(int_filters),
        vec!["eq", "gt", "gte", "in", "lt", "lte"]
    );
    assert!(int_filters.fields[&name("in")].field_type.is_list());
}

#[test]
fn relationship_filters_default_to_by_value_only() {
    let schema = augmented(movie_graph());

    let movie_where = input_object(&schema, "MovieWhere");
    let actors = &movie_where.fields[&name("actors")];
    assert_eq!(
        actors.field_type.underlying_type(),
        &graphql_name("MovieActorsRelationshipFilters")
    );

    let relationship_filters = input_object(&schema, "MovieActorsRelationshipFilters");
    assert_eq!(
        field_names(relationship_filters),
        vec!["all", "none", "single", "some"]
    );
    assert_eq!(
        relationship_filters.fields[&name("all")]
            .field_type
            .underlying_type(),
        &graphql_name("PersonWhere")
    );

    // Without a byAggregate opt-in the connection filters hold only the
    // existential quantifiers, and no aggregation input is generated.
    let connection_filters = input_object(&schema, "MovieActorsConnectionFilters");
    assert_eq!(
        field_names(connection_filters),
        vec!["all", "none", "single", "some"]
    );
    assert!(!schema
        .types
        .contains_key(&graphql_name("MovieActorsConnectionAggregationInput")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("MovieActorsNodeAggregationWhereInput")));
}

#[test]
fn by_aggregate_opt_in_generates_the_aggregation_inputs() {
    let mut model = movie_graph();
    let movie = model.node_types.get_mut(&type_name("Movie")).unwrap();
    let actors = movie.fields.get_mut(&field_name("actors")).unwrap();
    actors.filterable = Some(FilterableDirective {
        by_value: None,
        by_aggregate: Some(true),
    });
    let schema = augmented(model);

    let connection_filters = input_object(&schema, "MovieActorsConnectionFilters");
    assert_eq!(
        field_names(connection_filters),
        vec!["aggregate", "all", "none", "single", "some"]
    );

    let aggregation = input_object(&schema, "MovieActorsConnectionAggregationInput");
    assert_eq!(
        field_names(aggregation),
        vec!["AND", "NOT", "OR", "count", "edge", "node"]
    );
    assert_eq!(
        aggregation.fields[&name("count")].field_type.underlying_type(),
        &graphql_name("IntScalarFilters")
    );

    let node_aggregation = input_object(&schema, "MovieActorsNodeAggregationWhereInput");
    for expected in [
        "AND",
        "OR",
        "NOT",
        "name",
        "name_AVERAGE_LENGTH_EQUAL",
        "name_LONGEST_LENGTH_GT",
        "born",
        "born_MIN_EQUAL",
        "born_AVERAGE_LTE",
    ] {
        assert!(
            node_aggregation.fields.contains_key(&name(expected)),
            "node aggregation input should contain {expected}"
        );
    }
    assert_eq!(
        node_aggregation.fields[&name("name")]
            .field_type
            .underlying_type(),
        &graphql_name("StringScalarAggregationFilters")
    );
    // The flattened alias compares the aggregated value, so its operand takes
    // the kind of the aggregation result.
    assert_eq!(
        node_aggregation.fields[&name("born_AVERAGE_EQUAL")]
            .field_type
            .underlying_type(),
        &graphql_name("Float")
    );

    let edge_aggregation = input_object(&schema, "MovieActorsEdgeAggregationWhereInput");
    assert!(edge_aggregation.fields.contains_key(&name("role")));
    assert!(edge_aggregation
        .fields
        .contains_key(&name("screenTime_MAX_GTE")));

    // The grouped per-kind aggregation input routes each function to the
    // operator set of its result kind.
    let int_aggregation = input_object(&schema, "IntScalarAggregationFilters");
    assert_eq!(
        field_names(int_aggregation),
        vec!["average", "max", "min", "sum"]
    );
    assert_eq!(
        int_aggregation.fields[&name("average")]
            .field_type
            .underlying_type(),
        &graphql_name("FloatScalarFilters")
    );
}

#[test]
fn union_targets_get_member_slots_and_never_aggregate() {
    let model = DomainModel {
        node_types: [
            node("Movie", vec![scalar("title", ScalarType::String)]),
            node("Series", vec![scalar("title", ScalarType::String)]),
            node(
                "Person",
                vec![
                    scalar("name", ScalarType::String),
                    reference("credits", "Production", "CREDITED_IN").with_filterable(
                        FilterableDirective {
                            by_value: None,
                            by_aggregate: Some(true),
                        },
                    ),
                ],
            ),
        ]
        .into_iter()
        .collect(),
        union_types: [(
            type_name("Production"),
            UnionType {
                name: type_name("Production"),
                members: BTreeSet::from([type_name("Movie"), type_name("Series")]),
            },
        )]
        .into_iter()
        .collect(),
        ..DomainModel::default()
    };
    let schema = augmented(model);

    // The union's own Where is a per-member branch selector.
    let production_where = input_object(&schema, "ProductionWhere");
    assert_eq!(
        field_names(production_where),
        vec!["AND", "Movie", "NOT", "OR", "Series"]
    );
    assert_eq!(
        production_where.fields[&name("Movie")]
            .field_type
            .underlying_type(),
        &graphql_name("MovieWhere")
    );

    // The owner filters through that Where directly; no connection filter
    // family and, despite the annotation, no aggregation surface.
    let person_where = input_object(&schema, "PersonWhere");
    assert_eq!(
        person_where.fields[&name("credits")]
            .field_type
            .underlying_type(),
        &graphql_name("ProductionWhere")
    );
    assert!(!person_where.fields.contains_key(&name("creditsConnection")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("PersonCreditsConnectionFilters")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("PersonCreditsConnectionAggregationInput")));

    // The output side: a plain union field with a where argument but neither
    // sort nor connection companion.
    let person = object(&schema, "Person");
    let credits = &person.fields[&name("credits")];
    assert!(credits.arguments.contains_key(&name("where")));
    assert!(!credits.arguments.contains_key(&name("sort")));
    assert!(!person.fields.contains_key(&name("creditsConnection")));

    let Some(TypeInfo::Union(production)) = schema.types.get(&graphql_name("Production")) else {
        panic!("Production should be a union");
    };
    assert_eq!(
        production.members,
        BTreeSet::from([graphql_name("Movie"), graphql_name("Series")])
    );
}

#[test]
fn fully_disabled_relationships_leave_no_filter_surface() {
    let mut model = movie_graph();
    let movie = model.node_types.get_mut(&type_name("Movie")).unwrap();
    let actors = movie.fields.get_mut(&field_name("actors")).unwrap();
    actors.filterable = Some(FilterableDirective {
        by_value: Some(false),
        by_aggregate: Some(false),
    });
    let schema = augmented(model);

    let movie_where = input_object(&schema, "MovieWhere");
    assert!(!movie_where.fields.contains_key(&name("actors")));
    assert!(!movie_where.fields.contains_key(&name("actorsConnection")));
    assert!(movie_where.fields.contains_key(&name("title")));

    assert!(!schema
        .types
        .contains_key(&graphql_name("MovieActorsRelationshipFilters")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("MovieActorsConnectionFilters")));

    // The read surface is not policy-gated: traversal and its selection
    // aggregate stay available.
    let movie = object(&schema, "Movie");
    assert!(movie.fields.contains_key(&name("actors")));
    assert!(movie.fields.contains_key(&name("actorsConnection")));
    let connection = object(&schema, "MovieActorsConnection");
    assert!(connection.fields.contains_key(&name("aggregate")));
}

#[test]
fn fully_disabled_interface_relationships_leave_no_filter_surface() {
    let mut model = production_interface_model();
    let person = model.node_types.get_mut(&type_name("Person")).unwrap();
    let acted_in = person.fields.get_mut(&field_name("actedIn")).unwrap();
    acted_in.filterable = Some(FilterableDirective {
        by_value: Some(false),
        by_aggregate: Some(false),
    });
    let schema = augmented(model);

    let person_where = input_object(&schema, "PersonWhere");
    assert!(!person_where.fields.contains_key(&name("actedIn")));
    assert!(!person_where.fields.contains_key(&name("actedInConnection")));
    assert!(person_where.fields.contains_key(&name("name")));

    assert!(!schema
        .types
        .contains_key(&graphql_name("PersonActedInRelationshipFilters")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("PersonActedInConnectionFilters")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("PersonActedInConnectionAggregationInput")));

    // Traversal into the interface and its selection aggregate stay.
    let person = object(&schema, "Person");
    assert!(person.fields.contains_key(&name("actedIn")));
    assert!(person.fields.contains_key(&name("actedInConnection")));
    let connection = object(&schema, "PersonActedInConnection");
    assert!(connection.fields.contains_key(&name("aggregate")));
    // The interface's own Where is unaffected.
    assert!(schema.types.contains_key(&graphql_name("ProductionWhere")));
}

#[test]
fn selection_aggregate_is_generated_independently_of_the_filter_policy() {
    let schema = augmented(movie_graph());

    let connection = object(&schema, "MovieActorsConnection");
    let edges = &connection.fields[&name("edges")];
    assert!(edges.field_type.is_list());
    assert_eq!(
        edges.field_type.underlying_type(),
        &graphql_name("MovieActorsRelationship")
    );
    assert_eq!(
        connection.fields[&name("totalCount")]
            .field_type
            .underlying_type(),
        &graphql_name("Int")
    );

    let aggregate = &connection.fields[&name("aggregate")];
    assert_eq!(
        aggregate.field_type.underlying_type(),
        &graphql_name("MoviePersonActorsAggregateSelection")
    );
    assert!(!aggregate.field_type.nullable);

    let selection = object(&schema, "MoviePersonActorsAggregateSelection");
    assert_eq!(
        selection.fields[&name("count")].field_type.underlying_type(),
        &graphql_name("Count")
    );
    assert_eq!(
        selection.fields[&name("node")].field_type.underlying_type(),
        &graphql_name("MoviePersonActorsNodeAggregateSelection")
    );

    let node_selection = object(&schema, "MoviePersonActorsNodeAggregateSelection");
    assert_eq!(
        node_selection.fields[&name("name")]
            .field_type
            .underlying_type(),
        &graphql_name("StringAggregateSelection")
    );
    // List and non-aggregatable fields stay out; tags is a list.
    assert!(!node_selection.fields.contains_key(&name("tags")));

    let count = object(&schema, "Count");
    assert!(count.fields.contains_key(&name("nodes")));
    assert!(count.fields.contains_key(&name("edges")));

    // Statistics of an empty connection are undefined, so they are nullable.
    let string_selection = object(&schema, "StringAggregateSelection");
    assert!(string_selection.fields[&name("longest")].field_type.nullable);
    let int_selection = object(&schema, "IntAggregateSelection");
    assert_eq!(
        int_selection.fields[&name("average")]
            .field_type
            .underlying_type(),
        &graphql_name("Float")
    );
}

#[test]
fn empty_filter_types_are_pruned_with_their_references() {
    // Movie's only field opts out of value filtering entirely, while the
    // owning relationship opts into aggregation.
    let model = DomainModel {
        node_types: [
            node(
                "Movie",
                vec![
                    scalar("title", ScalarType::String).with_filterable(FilterableDirective {
                        by_value: Some(false),
                        by_aggregate: Some(true),
                    }),
                ],
            ),
            node(
                "Actor",
                vec![
                    scalar("name", ScalarType::String),
                    reference("movies", "Movie", "ACTED_IN").with_filterable(
                        FilterableDirective {
                            by_value: None,
                            by_aggregate: Some(true),
                        },
                    ),
                ],
            ),
        ]
        .into_iter()
        .collect(),
        ..DomainModel::default()
    };
    let schema = augmented(model);

    // MovieWhere and MovieSubscriptionWhere collapse to their combinators and
    // disappear, taking every dependent filter type with them.
    assert!(!schema.types.contains_key(&graphql_name("MovieWhere")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("MovieSubscriptionWhere")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("ActorMoviesRelationshipFilters")));
    assert!(!schema
        .types
        .contains_key(&graphql_name("ActorMoviesConnectionWhere")));

    // The aggregation branch is still substantive and survives alone.
    let actor_where = input_object(&schema, "ActorWhere");
    assert!(!actor_where.fields.contains_key(&name("movies")));
    assert!(actor_where.fields.contains_key(&name("moviesConnection")));
    let connection_filters = input_object(&schema, "ActorMoviesConnectionFilters");
    assert_eq!(field_names(connection_filters), vec!["aggregate"]);
    let node_aggregation = input_object(&schema, "ActorMoviesNodeAggregationWhereInput");
    assert!(node_aggregation.fields.contains_key(&name("title")));
    assert!(node_aggregation
        .fields
        .contains_key(&name("title_AVERAGE_LENGTH_EQUAL")));

    // Arguments referencing the pruned types are dropped; unrelated arguments
    // stay.
    let query = object(&schema, "Query");
    let movies = &query.fields[&name("movies")];
    assert!(!movies.arguments.contains_key(&name("where")));
    assert!(movies.arguments.contains_key(&name("sort")));

    let subscription = object(&schema, "Subscription");
    let movie_created = &subscription.fields[&name("movieCreated")];
    assert!(movie_created.arguments.is_empty());

    // Sorting is independent of the filter policy.
    let movie_sort = input_object(&schema, "MovieSort");
    assert!(movie_sort.fields.contains_key(&name("title")));
}

#[test]
fn legacy_alias_families_can_be_disabled_independently() {
    let mut model = movie_graph();
    let movie = model.node_types.get_mut(&type_name("Movie")).unwrap();
    let actors = movie.fields.get_mut(&field_name("actors")).unwrap();
    actors.filterable = Some(FilterableDirective {
        by_value: None,
        by_aggregate: Some(true),
    });

    let mut configuration = Configuration::default();
    configuration.legacy_aliases.scalar_comparison_aliases = false;
    let schema = augmented_with(model.clone(), configuration);
    let movie_where = input_object(&schema, "MovieWhere");
    assert!(movie_where.fields.contains_key(&name("title")));
    assert!(!movie_where.fields.contains_key(&name("title_CONTAINS")));
    // The subscription family is still on.
    let subscription_where = input_object(&schema, "MovieSubscriptionWhere");
    assert!(subscription_where.fields.contains_key(&name("title_EQ")));

    let mut configuration = Configuration::default();
    configuration.legacy_aliases.aggregation_filter_aliases = false;
    let schema = augmented_with(model.clone(), configuration);
    let node_aggregation = input_object(&schema, "MovieActorsNodeAggregationWhereInput");
    assert!(node_aggregation.fields.contains_key(&name("name")));
    assert!(!node_aggregation
        .fields
        .contains_key(&name("name_AVERAGE_LENGTH_EQUAL")));

    // Toggles arriving as a JSON configuration document behave the same.
    let configuration: Configuration =
        serde_json::from_str(r#"{"legacyAliases": {"subscriptionAliases": false}}"#)
            .expect("configuration should deserialize");
    let schema = augmented_with(model, configuration);
    let subscription_where = input_object(&schema, "MovieSubscriptionWhere");
    assert!(subscription_where.fields.contains_key(&name("title")));
    assert!(!subscription_where.fields.contains_key(&name("title_EQ")));
    let movie_where = input_object(&schema, "MovieWhere");
    assert!(movie_where.fields.contains_key(&name("title_EQ")));
}

fn production_interface_model() -> DomainModel {
    DomainModel {
        node_types: [
            node(
                "Movie",
                vec![
                    scalar("title", ScalarType::String),
                    scalar("boxOffice", ScalarType::Float),
                ],
            ),
            node(
                "Series",
                vec![
                    scalar("title", ScalarType::String),
                    scalar("episodes", ScalarType::Int),
                ],
            ),
            node(
                "Person",
                vec![
                    scalar("name", ScalarType::String),
                    reference("actedIn", "Production", "ACTED_IN").with_filterable(
                        FilterableDirective {
                            by_value: None,
                            by_aggregate: Some(true),
                        },
                    ),
                ],
            ),
        ]
        .into_iter()
        .collect(),
        interface_types: [(
            type_name("Production"),
            InterfaceType {
                name: type_name("Production"),
                fields: [scalar("title", ScalarType::String)]
                    .into_iter()
                    .map(|field| (field.name.clone(), field))
                    .collect(),
                implemented_by: BTreeSet::from([type_name("Movie"), type_name("Series")]),
            },
        )]
        .into_iter()
        .collect(),
        ..DomainModel::default()
    }
}

#[test]
fn interface_where_discriminates_by_implementer() {
    let schema = augmented(production_interface_model());

    let production_where = input_object(&schema, "ProductionWhere");
    assert!(production_where.fields.contains_key(&name("title")));
    let typename_in = &production_where.fields[&name("typename_IN")];
    assert!(typename_in.field_type.is_list());
    assert_eq!(
        typename_in.field_type.underlying_type(),
        &graphql_name("ProductionImplementation")
    );

    let Some(TypeInfo::Enum(implementations)) =
        schema.types.get(&graphql_name("ProductionImplementation"))
    else {
        panic!("ProductionImplementation should be an enum");
    };
    assert_eq!(
        implementations.values.keys().collect::<Vec<_>>(),
        vec![&name("Movie"), &name("Series")]
    );

    let Some(TypeInfo::Interface(production)) = schema.types.get(&graphql_name("Production"))
    else {
        panic!("Production should be an interface");
    };
    assert_eq!(
        production.implemented_by,
        BTreeSet::from([graphql_name("Movie"), graphql_name("Series")])
    );
    let movie = object(&schema, "Movie");
    assert_eq!(movie.interfaces, BTreeSet::from([graphql_name("Production")]));

    let query = object(&schema, "Query");
    assert!(query.fields.contains_key(&name("productions")));
}

#[test]
fn interface_aggregation_covers_declared_fields_only() {
    let schema = augmented(production_interface_model());

    let node_aggregation = input_object(&schema, "PersonActedInNodeAggregationWhereInput");
    assert!(node_aggregation.fields.contains_key(&name("title")));
    assert!(!node_aggregation.fields.contains_key(&name("boxOffice")));
    assert!(!node_aggregation.fields.contains_key(&name("episodes")));

    let node_selection = object(&schema, "PersonProductionActedInNodeAggregateSelection");
    assert_eq!(
        node_selection.fields.keys().collect::<Vec<_>>(),
        vec![&name("title")]
    );
}

#[test]
fn relationship_properties_surface_on_every_edge_type() {
    let schema = augmented(movie_graph());

    let connection_where = input_object(&schema, "MovieActorsConnectionWhere");
    assert_eq!(
        field_names(connection_where),
        vec!["AND", "NOT", "OR", "edge", "node"]
    );
    assert_eq!(
        connection_where.fields[&name("node")]
            .field_type
            .underlying_type(),
        &graphql_name("PersonWhere")
    );
    assert_eq!(
        connection_where.fields[&name("edge")]
            .field_type
            .underlying_type(),
        &graphql_name("ActedInWhere")
    );

    let acted_in_where = input_object(&schema, "ActedInWhere");
    assert!(acted_in_where.fields.contains_key(&name("role")));
    assert!(acted_in_where.fields.contains_key(&name("screenTime_GT")));

    // Connections over a property-carrying relationship sort by edge fields.
    let movie = object(&schema, "Movie");
    let actors_connection = &movie.fields[&name("actorsConnection")];
    let sort = &actors_connection.arguments[&name("sort")];
    assert!(sort.field_type.is_list());
    assert_eq!(
        sort.field_type.underlying_type(),
        &graphql_name("ActedInSort")
    );
    let acted_in_sort = input_object(&schema, "ActedInSort");
    assert_eq!(field_names(acted_in_sort), vec!["role", "screenTime"]);

    let relationship = object(&schema, "MovieActorsRelationship");
    assert_eq!(
        relationship.fields[&name("node")].field_type.underlying_type(),
        &graphql_name("Person")
    );
    let properties = &relationship.fields[&name("properties")];
    assert_eq!(
        properties.field_type.underlying_type(),
        &graphql_name("ActedIn")
    );
    assert!(!properties.field_type.nullable);

    let acted_in = object(&schema, "ActedIn");
    assert!(acted_in.fields.contains_key(&name("role")));
    assert!(acted_in.fields.contains_key(&name("screenTime")));
}

#[test]
fn root_operations_cover_every_node_type() {
    let schema = augmented(movie_graph());

    assert_eq!(schema.query_type, graphql_name("Query"));
    assert_eq!(schema.mutation_type, Some(graphql_name("Mutation")));
    assert_eq!(schema.subscription_type, Some(graphql_name("Subscription")));

    let query = object(&schema, "Query");
    let movies = &query.fields[&name("movies")];
    assert_eq!(movies.field_type.to_string(), "[Movie!]!");
    assert_eq!(
        movies.arguments[&name("where")].field_type.underlying_type(),
        &graphql_name("MovieWhere")
    );
    assert_eq!(
        movies.arguments[&name("sort")].field_type.to_string(),
        "[MovieSort!]"
    );
    assert!(query.fields.contains_key(&name("persons")));

    let mutation = object(&schema, "Mutation");
    let create_movies = &mutation.fields[&name("createMovies")];
    assert_eq!(
        create_movies.arguments[&name("input")].field_type.to_string(),
        "[MovieCreateInput!]!"
    );
    let update_movies = &mutation.fields[&name("updateMovies")];
    assert!(update_movies.arguments.contains_key(&name("where")));
    assert_eq!(
        update_movies.arguments[&name("update")]
            .field_type
            .underlying_type(),
        &graphql_name("MovieUpdateInput")
    );
    let delete_movies = &mutation.fields[&name("deleteMovies")];
    assert_eq!(delete_movies.field_type.to_string(), "DeleteInfo!");

    let subscription = object(&schema, "Subscription");
    for event_field in ["movieCreated", "movieUpdated", "movieDeleted"] {
        let field = &subscription.fields[&name(event_field)];
        assert_eq!(field.field_type.to_string(), "Movie!");
        assert_eq!(
            field.arguments[&name("where")].field_type.underlying_type(),
            &graphql_name("MovieSubscriptionWhere")
        );
    }

    // The event filter covers scalars only; relationship predicates cannot be
    // evaluated against a single change event.
    let subscription_where = input_object(&schema, "MovieSubscriptionWhere");
    assert!(subscription_where.fields.contains_key(&name("title")));
    assert!(!subscription_where.fields.contains_key(&name("actors")));
    assert!(!subscription_where
        .fields
        .contains_key(&name("actorsConnection")));
}

#[test]
fn mutation_inputs_cover_scalar_fields_with_the_right_shapes() {
    let schema = augmented(movie_graph());

    let create = input_object(&schema, "MovieCreateInput");
    assert_eq!(create.fields[&name("title")].field_type.to_string(), "String!");
    assert_eq!(
        create.fields[&name("tags")].field_type.to_string(),
        "[String!]!"
    );
    assert!(!create.fields.contains_key(&name("actors")));

    // Update slots are nullable throughout; omission means leave unchanged.
    let update = input_object(&schema, "MovieUpdateInput");
    assert_eq!(update.fields[&name("title")].field_type.to_string(), "String");
    assert_eq!(
        update.fields[&name("tags")].field_type.to_string(),
        "[String!]"
    );

    let delete_info = object(&schema, "DeleteInfo");
    assert_eq!(
        delete_info.fields[&name("nodesDeleted")].field_type.to_string(),
        "Int!"
    );
    assert_eq!(
        delete_info.fields[&name("relationshipsDeleted")]
            .field_type
            .to_string(),
        "Int!"
    );
}

#[test]
fn model_validation_rejects_dangling_references() {
    let model = DomainModel {
        node_types: [node(
            "Movie",
            vec![reference("actors", "Person", "ACTED_IN")],
        )]
        .into_iter()
        .collect(),
        ..DomainModel::default()
    };
    assert!(matches!(
        Engine::new(model, Configuration::default()),
        Err(Error::UnknownReferenceTarget { .. })
    ));

    let model = DomainModel {
        node_types: [
            node(
                "Movie",
                vec![reference_with_properties(
                    "actors", "Person", "ACTED_IN", "ActedIn",
                )],
            ),
            node("Person", vec![scalar("name", ScalarType::String)]),
        ]
        .into_iter()
        .collect(),
        ..DomainModel::default()
    };
    assert!(matches!(
        Engine::new(model, Configuration::default()),
        Err(Error::UnknownEdgeType { .. })
    ));

    let model = DomainModel {
        node_types: [node("Movie", vec![scalar("title", ScalarType::String)])]
            .into_iter()
            .collect(),
        union_types: [(
            type_name("Production"),
            UnionType {
                name: type_name("Production"),
                members: BTreeSet::from([type_name("Movie"), type_name("Series")]),
            },
        )]
        .into_iter()
        .collect(),
        ..DomainModel::default()
    };
    assert!(matches!(
        Engine::new(model, Configuration::default()),
        Err(Error::UnknownUnionMember { .. })
    ));

    let mut model = movie_graph();
    let acted_in = model.edge_types.get_mut(&type_name("ActedIn")).unwrap();
    let bad_field = reference("person", "Person", "WITHIN");
    acted_in.fields.insert(bad_field.name.clone(), bad_field);
    assert!(matches!(
        Engine::new(model, Configuration::default()),
        Err(Error::EdgeFieldNotScalar { .. })
    ));
}

#[test]
fn date_time_scalar_is_registered_on_demand() {
    let mut model = movie_graph();
    assert!(!augmented(model.clone())
        .types
        .contains_key(&graphql_name("DateTime")));

    let movie = model.node_types.get_mut(&type_name("Movie")).unwrap();
    let released_at = scalar("releasedAt", ScalarType::DateTime);
    movie.fields.insert(released_at.name.clone(), released_at);
    let schema = augmented(model);
    assert!(matches!(
        schema.types.get(&graphql_name("DateTime")),
        Some(TypeInfo::Scalar(_))
    ));
    let movie_where = input_object(&schema, "MovieWhere");
    assert_eq!(
        movie_where.fields[&name("releasedAt")]
            .field_type
            .underlying_type(),
        &graphql_name("DateTimeScalarFilters")
    );
    assert!(movie_where.fields.contains_key(&name("releasedAt_GTE")));
}
