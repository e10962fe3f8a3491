use serde::{Deserialize, Serialize};

/// Run-level configuration for an augmentation. All settings default to the
/// most compatible behavior, so an empty configuration document is valid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Configuration {
    pub legacy_aliases: LegacyAliasFlags,
}

/// Controls emission of the deprecated alias families kept for clients that
/// predate the grouped filter syntax. Each family defaults to on; turning a
/// flag off removes the whole family from the generated schema.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct LegacyAliasFlags {
    /// `title_EQ`, `released_GT` and friends on Where inputs, alongside the
    /// grouped `title: { eq: ... }` form.
    pub scalar_comparison_aliases: bool,
    /// `title_AVERAGE_LENGTH_EQUAL` and friends on aggregation filter inputs.
    pub aggregation_filter_aliases: bool,
    /// Flattened scalar comparisons on SubscriptionWhere inputs.
    pub subscription_aliases: bool,
}

impl Default for LegacyAliasFlags {
    fn default() -> Self {
        LegacyAliasFlags {
            scalar_comparison_aliases: true,
            aggregation_filter_aliases: true,
            subscription_aliases: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Configuration;

    #[test]
    fn test_empty_configuration_defaults_to_all_aliases() -> anyhow::Result<()> {
        let configuration: Configuration = serde_json::from_str("{}")?;
        assert!(configuration.legacy_aliases.scalar_comparison_aliases);
        assert!(configuration.legacy_aliases.aggregation_filter_aliases);
        assert!(configuration.legacy_aliases.subscription_aliases);
        Ok(())
    }

    #[test]
    fn test_individual_alias_families_can_be_disabled() -> anyhow::Result<()> {
        let configuration: Configuration = serde_json::from_str(
            r#"{"legacyAliases": {"scalarComparisonAliases": false}}"#,
        )?;
        assert!(!configuration.legacy_aliases.scalar_comparison_aliases);
        assert!(configuration.legacy_aliases.aggregation_filter_aliases);
        Ok(())
    }
}
