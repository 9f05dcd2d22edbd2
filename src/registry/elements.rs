//! Type registration and per-type diff configuration.

use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

static EMPTY_CONFIG: Lazy<TypeConfig> = Lazy::new(TypeConfig::default);

/// TypeConfig carries the diff-relevant settings for one record type.
///
/// Registration itself is meaningful: only registered types participate in
/// collection diffing, even when every other setting is left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Unique name of the record type.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Immediate base type, for types that specialize another record type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Fields never compared and never copied into snapshots.
    #[serde(
        default,
        skip_serializing_if = "BTreeSet::is_empty",
        rename = "excludedFields"
    )]
    pub excluded_fields: BTreeSet<String>,

    /// Field identifying a record among its siblings within an owned
    /// collection. Required for any type appearing as a collection element.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "identityField"
    )]
    pub identity_field: Option<String>,

    /// Fields attached to any non-empty result for this type, in order.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        rename = "conditionalFields"
    )]
    pub conditional_fields: Vec<String>,
}

impl TypeConfig {
    /// Creates a configuration for the named type with every setting empty.
    pub fn new(name: impl Into<String>) -> Self {
        TypeConfig {
            name: name.into(),
            ..TypeConfig::default()
        }
    }

    /// Sets the immediate base type.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Sets the excluded fields.
    pub fn excluded_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the identity field.
    pub fn identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = Some(field.into());
        self
    }

    /// Sets the conditional fields.
    pub fn conditional_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditional_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Registry is the full set of type configurations known to a host.
///
/// Configurations are indexed in a map before the first lookup so this type
/// should be considered immutable once lookups begin.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeConfig>,

    #[serde(skip)]
    index: OnceCell<HashMap<String, usize>>,
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Registry {
            types: self.types.clone(),
            index: OnceCell::new(),
        }
    }
}

impl Registry {
    /// Creates a registry from a list of type configurations.
    pub fn new(types: Vec<TypeConfig>) -> Self {
        Registry {
            types,
            index: OnceCell::new(),
        }
    }

    /// Creates a builder for programmatic registration.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Parses a registry from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parses a registry from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn index(&self) -> &HashMap<String, usize> {
        self.index.get_or_init(|| {
            self.types
                .iter()
                .enumerate()
                .map(|(i, config)| (config.name.clone(), i))
                .collect()
        })
    }

    /// Returns true when the named type was explicitly registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.index().contains_key(name)
    }

    /// Looks up the configuration for a type. Unregistered names resolve to
    /// a shared empty configuration; absence is not an error.
    pub fn config_for(&self, name: &str) -> &TypeConfig {
        match self.index().get(name) {
            Some(&i) => &self.types[i],
            None => &*EMPTY_CONFIG,
        }
    }

    /// Returns the immediate base type of a registered type, if declared.
    pub fn base_of(&self, name: &str) -> Option<&str> {
        self.index()
            .get(name)
            .and_then(|&i| self.types[i].base.as_deref())
    }

    /// Names of all registered types, in registration order.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|config| config.name.as_str()).collect()
    }
}

/// RegistryBuilder assembles a [`Registry`] one type at a time.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<TypeConfig>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        RegistryBuilder::default()
    }

    /// Registers one type configuration.
    pub fn register(mut self, config: TypeConfig) -> Self {
        self.types.push(config);
        self
    }

    /// Builds the registry.
    pub fn build(self) -> Registry {
        Registry::new(self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> Registry {
        Registry::builder()
            .register(TypeConfig::new("Order"))
            .register(
                TypeConfig::new("OrderItem")
                    .identity_field("sku")
                    .excluded_fields(["revision"])
                    .conditional_fields(["audit_ref"]),
            )
            .register(TypeConfig::new("RushOrder").base("Order"))
            .build()
    }

    #[test]
    fn test_config_lookup() {
        let registry = sample_registry();
        let config = registry.config_for("OrderItem");
        assert_eq!(config.identity_field.as_deref(), Some("sku"));
        assert!(config.excluded_fields.contains("revision"));
        assert_eq!(config.conditional_fields, vec!["audit_ref".to_string()]);
    }

    #[test]
    fn test_unregistered_type_resolves_to_empty_config() {
        let registry = sample_registry();
        assert!(!registry.is_registered("Shipment"));

        let config = registry.config_for("Shipment");
        assert!(config.excluded_fields.is_empty());
        assert!(config.identity_field.is_none());
        assert!(config.conditional_fields.is_empty());
    }

    #[test]
    fn test_base_of() {
        let registry = sample_registry();
        assert_eq!(registry.base_of("RushOrder"), Some("Order"));
        assert_eq!(registry.base_of("Order"), None);
        assert_eq!(registry.base_of("Shipment"), None);
    }

    #[test]
    fn test_clone_resets_index() {
        let registry = sample_registry();
        assert!(registry.is_registered("Order"));

        let cloned = registry.clone();
        assert!(cloned.is_registered("Order"));
        assert_eq!(cloned.base_of("RushOrder"), Some("Order"));
    }

    #[test]
    fn test_from_yaml() {
        let registry = Registry::from_yaml(
            r#"types:
- name: Order
- name: OrderItem
  identityField: sku
  excludedFields: [revision]
  conditionalFields: [audit_ref]
- name: RushOrder
  base: Order
"#,
        )
        .unwrap();

        assert_eq!(registry.type_names(), vec!["Order", "OrderItem", "RushOrder"]);
        assert_eq!(
            registry.config_for("OrderItem").identity_field.as_deref(),
            Some("sku")
        );
        assert_eq!(registry.base_of("RushOrder"), Some("Order"));
    }
}
