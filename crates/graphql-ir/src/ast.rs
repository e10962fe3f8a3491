use serde::{Deserialize, Deserializer, Serialize};
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter, Write};
use std::hash::Hash;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("{0} is not a valid GraphQL name")]
pub struct InvalidGraphQlName(pub String);

/// A validated GraphQL name.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(s: &str) -> Result<Name, InvalidGraphQlName> {
        Name::from_str(s)
    }

    pub fn get(&self) -> &SmolStr {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Name {
    type Err = InvalidGraphQlName;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if is_valid_graphql_name(s) {
            Ok(Name(SmolStr::new(s)))
        } else {
            Err(InvalidGraphQlName(s.into()))
        }
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if !is_valid_graphql_name(&s) {
            return Err(serde::de::Error::custom(format!(
                "{s} is not a valid graphql name"
            )));
        }
        Ok(Name(SmolStr::new(&s)))
    }
}

fn match_first(c: char) -> bool {
    c == '_' || c.is_ascii_uppercase() || c.is_ascii_lowercase()
}

fn match_body(c: char) -> bool {
    c == '_' || c.is_ascii_uppercase() || c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn is_valid_graphql_name(text: &str) -> bool {
    if let Some(first) = text.chars().next() {
        let body = &text[first.len_utf8()..];
        match_first(first) && body.chars().all(match_body)
    } else {
        false
    }
}

// Macro to build a valid graphql name from a literal known at compile time.
#[macro_export]
macro_rules! mk_name {
    ($name:literal) => {
        $crate::ast::Name::new($name).unwrap()
    };
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName(pub Name);

impl TypeName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A GraphQL type reference, for example `String` or `[String!]!`.
#[derive(Serialize, Deserialize, Hash, Debug, PartialEq, Eq, Clone)]
pub struct TypeContainer<T> {
    pub base: BaseTypeContainer<T>,
    /// Whether the type is nullable.
    pub nullable: bool,
}

pub type Type = TypeContainer<TypeName>;

impl<T> TypeContainer<T> {
    pub fn named_non_null(named: T) -> TypeContainer<T> {
        TypeContainer {
            base: BaseTypeContainer::Named(named),
            nullable: false,
        }
    }

    pub fn named_null(named: T) -> TypeContainer<T> {
        TypeContainer {
            base: BaseTypeContainer::Named(named),
            nullable: true,
        }
    }

    pub fn list_null(element_type: TypeContainer<T>) -> TypeContainer<T> {
        TypeContainer {
            base: BaseTypeContainer::List(Box::new(element_type)),
            nullable: true,
        }
    }

    pub fn list_non_null(element_type: TypeContainer<T>) -> TypeContainer<T> {
        TypeContainer {
            base: BaseTypeContainer::List(Box::new(element_type)),
            nullable: false,
        }
    }

    pub fn underlying_type(&self) -> &T {
        match &self.base {
            BaseTypeContainer::Named(n) => n,
            BaseTypeContainer::List(ty) => ty.underlying_type(),
        }
    }

    pub fn is_list(&self) -> bool {
        match &self.base {
            BaseTypeContainer::Named(_) => false,
            BaseTypeContainer::List(_) => true,
        }
    }

    pub fn map<F, B>(self, f: F) -> TypeContainer<B>
    where
        F: FnOnce(T) -> B,
    {
        TypeContainer {
            base: self.base.map(f),
            nullable: self.nullable,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.base.fmt(f)?;
        if !self.nullable {
            f.write_char('!')?;
        }
        Ok(())
    }
}

/// A GraphQL base type without its own nullability marker; for that see
/// [`TypeContainer`].
#[derive(Serialize, Deserialize, Hash, Debug, PartialEq, Eq, Clone)]
pub enum BaseTypeContainer<T> {
    /// A named type, such as `String`.
    Named(T),
    /// A list type, such as `[String]`.
    List(Box<TypeContainer<T>>),
}

impl<T> BaseTypeContainer<T> {
    fn map<F, B>(self, f: F) -> BaseTypeContainer<B>
    where
        F: FnOnce(T) -> B,
    {
        match self {
            BaseTypeContainer::Named(t) => BaseTypeContainer::Named(f(t)),
            BaseTypeContainer::List(t) => BaseTypeContainer::List(Box::new(t.map(f))),
        }
    }
}

pub type BaseType = BaseTypeContainer<TypeName>;

impl Display for BaseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => name.fmt(f),
            Self::List(ty) => write!(f, "[{ty}]"),
        }
    }
}

#[test]
fn test_graphql_compliant_name() -> anyhow::Result<()> {
    // Positive tests
    let name: Name = serde_json::from_str("\"foo\"")?;
    assert_eq!(name.get(), "foo");

    let name: Name = serde_json::from_str("\"FooBar\"")?;
    assert_eq!(name.get(), "FooBar");

    let name: Name = serde_json::from_str("\"_foo\"")?;
    assert_eq!(name.get(), "_foo");

    let name: Name = serde_json::from_str("\"foo_1\"")?;
    assert_eq!(name.get(), "foo_1");

    // Negative tests
    let name: Result<Name, _> = serde_json::from_str("\"1foo\"");
    assert!(name.is_err());

    let name: Result<Name, _> = serde_json::from_str("\"foo bar\"");
    assert!(name.is_err());

    let name: Result<Name, _> = serde_json::from_str("\"foo-bar\"");
    assert!(name.is_err());

    Ok(())
}

#[test]
fn test_type_reference_display() {
    let ty: Type = TypeContainer::list_non_null(TypeContainer::named_non_null(TypeName(
        mk_name!("Movie"),
    )));
    assert_eq!(ty.to_string(), "[Movie!]!");
    assert_eq!(ty.underlying_type().as_str(), "Movie");
    assert!(ty.is_list());
}
