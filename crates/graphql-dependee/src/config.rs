use crate::ResolverResult;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependeeConfig {
    /// Which record wins when a sibling group published the same dependee more than once.
    pub lookup_order: LookupOrder,
    /// Invoke the dependee's own resolver when no record was published.
    /// Enabled by default. When disabled the dependent resolves to `null`.
    pub fallback: bool,
}

impl Default for DependeeConfig {
    fn default() -> Self {
        Self {
            lookup_order: LookupOrder::default(),
            fallback: true,
        }
    }
}

impl DependeeConfig {
    pub fn from_toml_str(input: &str) -> ResolverResult<Self> {
        Ok(toml::from_str(input)?)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOrder {
    /// Most recently published record first.
    #[default]
    Latest,
    /// First published record, in insertion order.
    Earliest,
}
