use serde::{Deserialize, Deserializer, Serialize};
use smol_str::SmolStr;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("{0} is not a valid identifier")]
pub struct InvalidIdentifier(pub String);

/// A validated domain-model identifier. Identifiers share the GraphQL name
/// grammar so that every type and field name in the model can be carried into
/// the generated schema without further mangling.
#[derive(
    Serialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub struct Identifier(SmolStr);

impl Identifier {
    pub fn new(s: &str) -> Result<Identifier, InvalidIdentifier> {
        Identifier::from_str(s)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Identifier {
    type Err = InvalidIdentifier;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_identifier(s) {
            Ok(Identifier(SmolStr::new(s)))
        } else {
            Err(InvalidIdentifier(s.into()))
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Identifier::from_str(&s).map_err(serde::de::Error::custom)
    }
}

fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::Identifier;

    #[test]
    fn test_identifier_validation() -> anyhow::Result<()> {
        let identifier: Identifier = serde_json::from_str("\"Movie\"")?;
        assert_eq!(identifier.as_str(), "Movie");

        let identifier: Identifier = serde_json::from_str("\"_internal_1\"")?;
        assert_eq!(identifier.as_str(), "_internal_1");

        let identifier: Result<Identifier, _> = serde_json::from_str("\"1movie\"");
        assert!(identifier.is_err());

        let identifier: Result<Identifier, _> = serde_json::from_str("\"movie title\"");
        assert!(identifier.is_err());

        let identifier: Result<Identifier, _> = serde_json::from_str("\"\"");
        assert!(identifier.is_err());

        Ok(())
    }
}
