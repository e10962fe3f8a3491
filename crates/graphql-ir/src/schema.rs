use crate::ast;
use crate::ast::TypeName;
use crate::mk_name;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub mod build;
pub mod prune;

// A simple wrapper on top of ast::TypeName so that we can track the construction
// of TypeNames during the schema building phase.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct RegisteredTypeName(pub(super) ast::TypeName);

impl RegisteredTypeName {
    pub fn type_name(&self) -> &ast::TypeName {
        &self.0
    }

    pub fn new(name: ast::Name) -> RegisteredTypeName {
        RegisteredTypeName(TypeName(name))
    }
    pub fn string() -> RegisteredTypeName {
        RegisteredTypeName(TypeName(mk_name!("String")))
    }
    pub fn int() -> RegisteredTypeName {
        RegisteredTypeName(TypeName(mk_name!("Int")))
    }
    pub fn float() -> RegisteredTypeName {
        RegisteredTypeName(TypeName(mk_name!("Float")))
    }
    pub fn boolean() -> RegisteredTypeName {
        RegisteredTypeName(TypeName(mk_name!("Boolean")))
    }
    pub fn id() -> RegisteredTypeName {
        RegisteredTypeName(TypeName(mk_name!("ID")))
    }
}

pub type RegisteredType = ast::TypeContainer<RegisteredTypeName>;

pub struct EntryPoint<S: SchemaContext> {
    pub query: S::TypeId,
    pub mutation: Option<S::TypeId>,
    pub subscription: Option<S::TypeId>,
}

// The PartialEq, Clone, Serialize super traits are needed so that the derive
// macros on types generic over a SchemaContext can satisfy their bounds.
pub trait SchemaContext: std::fmt::Debug + Clone + PartialEq + Serialize {
    /// Every generated field and enum value is annotated with this
    /// information; downstream consumers use it to interpret the field
    /// without re-deriving its meaning from the name.
    type NodeInfo: std::cmp::Eq
        + std::fmt::Debug
        + PartialEq
        + Clone
        + Serialize
        + DeserializeOwned;

    // A TypeId is a unique identifier for each generated type in the schema.
    type TypeId: std::fmt::Debug + std::cmp::Eq + std::hash::Hash + ToString + Clone + Serialize;

    // Translates a schema specific 'TypeId' to a GraphQL TypeName
    fn to_type_name(type_id: &Self::TypeId) -> ast::TypeName;

    type SchemaError: std::fmt::Debug + From<build::Error>;

    // Builds the schema / 'TypeInfo' for the specified TypeId
    fn build_type_info(
        &self,
        builder: &mut Builder<Self>,
        type_id: &Self::TypeId,
    ) -> std::result::Result<TypeInfo<Self>, Self::SchemaError>;

    fn get_schema_entry_point(&self) -> EntryPoint<Self>;
}

// Builder tracks all the references to a type during the construction of any
// TypeInfo. This combined with `RegisteredTypeName` and the `new` constructors
// on various `TypeInfo` objects offers a low-key solution to safely build a
// GraphQL schema: a type can only be referenced by first registering it, and
// every registered type eventually gets built.
pub struct Builder<S: SchemaContext> {
    registered_types: HashSet<S::TypeId>,
}

impl<S: SchemaContext> Builder<S> {
    pub fn register_type(&mut self, type_id: S::TypeId) -> RegisteredTypeName {
        let type_name = S::to_type_name(&type_id);
        self.registered_types.insert(type_id);
        RegisteredTypeName(type_name)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub enum DeprecationStatus {
    #[default]
    NotDeprecated,
    Deprecated {
        reason: Option<String>,
    },
}

impl DeprecationStatus {
    pub fn new_deprecated(reason: &str) -> Self {
        DeprecationStatus::Deprecated {
            reason: Some(reason.to_string()),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, DeprecationStatus::Deprecated { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            DeprecationStatus::NotDeprecated => None,
            DeprecationStatus::Deprecated { reason } => reason.as_deref(),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Object<S: SchemaContext> {
    pub name: ast::TypeName,
    pub description: Option<String>,
    pub fields: BTreeMap<ast::Name, Field<S>>,
    /// The set of interfaces that this object type implements
    pub interfaces: BTreeSet<ast::TypeName>,
}

impl<S: SchemaContext> Object<S> {
    pub fn new(
        name: ast::TypeName,
        description: Option<String>,
        fields: BTreeMap<ast::Name, Field<S>>,
        interfaces: BTreeSet<RegisteredTypeName>,
    ) -> Self {
        Object {
            name,
            description,
            fields,
            interfaces: interfaces.into_iter().map(|i| i.0).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Field<S: SchemaContext> {
    pub name: ast::Name,
    pub description: Option<String>,
    pub info: S::NodeInfo,
    pub field_type: ast::Type,
    pub arguments: BTreeMap<ast::Name, InputField<S>>,
    pub deprecation_status: DeprecationStatus,
}

impl<S: SchemaContext> Field<S> {
    pub fn new(
        name: ast::Name,
        description: Option<String>,
        info: S::NodeInfo,
        field_type: RegisteredType,
        arguments: BTreeMap<ast::Name, InputField<S>>,
        deprecation_status: DeprecationStatus,
    ) -> Self {
        Field {
            name,
            description,
            info,
            field_type: field_type.map(|v| v.0),
            arguments,
            deprecation_status,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct InputObject<S: SchemaContext> {
    pub name: ast::TypeName,
    pub description: Option<String>,
    pub fields: BTreeMap<ast::Name, InputField<S>>,
}

impl<S: SchemaContext> InputObject<S> {
    pub fn new(
        name: ast::TypeName,
        description: Option<String>,
        fields: BTreeMap<ast::Name, InputField<S>>,
    ) -> Self {
        InputObject {
            name,
            description,
            fields,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct InputField<S: SchemaContext> {
    pub name: ast::Name,
    pub description: Option<String>,
    pub info: S::NodeInfo,
    pub field_type: ast::Type,
    pub default_value: Option<serde_json::Value>,
    pub deprecation_status: DeprecationStatus,
}

impl<S: SchemaContext> InputField<S> {
    pub fn new(
        name: ast::Name,
        description: Option<String>,
        info: S::NodeInfo,
        field_type: RegisteredType,
        default_value: Option<serde_json::Value>,
        deprecation_status: DeprecationStatus,
    ) -> Self {
        InputField {
            name,
            description,
            info,
            field_type: field_type.map(|v| v.0),
            default_value,
            deprecation_status,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Scalar {
    pub name: ast::TypeName,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct EnumValue<S: SchemaContext> {
    pub value: ast::Name,
    pub description: Option<String>,
    pub deprecation_status: DeprecationStatus,
    pub info: S::NodeInfo,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Enum<S: SchemaContext> {
    pub name: ast::TypeName,
    pub description: Option<String>,
    pub values: BTreeMap<ast::Name, EnumValue<S>>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Union {
    pub name: ast::TypeName,
    pub description: Option<String>,
    pub members: BTreeSet<ast::TypeName>,
}

impl Union {
    pub fn new(
        name: ast::TypeName,
        description: Option<String>,
        members: BTreeSet<RegisteredTypeName>,
    ) -> Self {
        Union {
            name,
            description,
            members: members.into_iter().map(|m| m.0).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Interface<S: SchemaContext> {
    pub name: ast::TypeName,
    pub description: Option<String>,
    pub fields: BTreeMap<ast::Name, Field<S>>,
    pub implemented_by: BTreeSet<ast::TypeName>,
}

impl<S: SchemaContext> Interface<S> {
    pub fn new(
        name: ast::TypeName,
        description: Option<String>,
        fields: BTreeMap<ast::Name, Field<S>>,
        implemented_by: BTreeSet<RegisteredTypeName>,
    ) -> Self {
        Interface {
            name,
            description,
            fields,
            implemented_by: implemented_by.into_iter().map(|i| i.0).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub enum TypeInfo<S: SchemaContext> {
    Scalar(Scalar),
    Enum(Enum<S>),
    Object(Object<S>),
    Interface(Interface<S>),
    Union(Union),
    InputObject(InputObject<S>),
}

impl<S: SchemaContext> TypeInfo<S> {
    pub fn kind(&self) -> &'static str {
        match self {
            TypeInfo::Scalar(_) => "SCALAR",
            TypeInfo::Enum(_) => "ENUM",
            TypeInfo::Interface(_) => "INTERFACE",
            TypeInfo::Object(_) => "OBJECT",
            TypeInfo::Union(_) => "UNION",
            TypeInfo::InputObject(_) => "INPUT_OBJECT",
        }
    }

    pub fn type_name(&self) -> &ast::TypeName {
        match self {
            TypeInfo::Scalar(d) => &d.name,
            TypeInfo::Enum(d) => &d.name,
            TypeInfo::Object(d) => &d.name,
            TypeInfo::Interface(d) => &d.name,
            TypeInfo::Union(d) => &d.name,
            TypeInfo::InputObject(d) => &d.name,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Schema<S: SchemaContext> {
    pub types: BTreeMap<ast::TypeName, TypeInfo<S>>,
    pub query_type: ast::TypeName,
    pub mutation_type: Option<ast::TypeName>,
    pub subscription_type: Option<ast::TypeName>,
}

impl<S: SchemaContext> Schema<S> {
    pub fn get_type(&self, type_name: &ast::TypeName) -> Option<&TypeInfo<S>> {
        self.types.get(type_name)
    }
}
