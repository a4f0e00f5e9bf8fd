//! Capability registries
//!
//! Providers and provisioners are looked up by exact, case-sensitive name in
//! two separate registries. Both are built once at startup and never mutated,
//! so lookups need no locking.

use std::collections::BTreeMap;

use super::builtin;
use super::error::PluginError;
use super::protocol::{ResourceProvider, ResourceProvisioner};
use crate::domain::PluginKind;

/// Zero-argument constructor for a provider
pub type ProviderFactory = fn() -> Box<dyn ResourceProvider>;

/// Zero-argument constructor for a provisioner
pub type ProvisionerFactory = fn() -> Box<dyn ResourceProvisioner>;

/// An immutable name -> factory mapping for one plugin kind
#[derive(Debug, Clone)]
pub struct Registry<F> {
    entries: BTreeMap<String, F>,
}

impl<F: Copy> Registry<F> {
    pub fn get(&self, name: &str) -> Option<F> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> Default for Registry<F> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

/// The provider and provisioner registries served by this binary
#[derive(Debug, Clone, Default)]
pub struct Registries {
    providers: Registry<ProviderFactory>,
    provisioners: Registry<ProvisionerFactory>,
}

impl Registries {
    /// Registries holding the plugins compiled into this binary
    pub fn builtin() -> Self {
        let mut builder = RegistryBuilder::new();
        for (name, factory) in builtin::PROVIDERS {
            builder = builder.provider(*name, *factory);
        }
        for (name, factory) in builtin::PROVISIONERS {
            builder = builder.provisioner(*name, *factory);
        }
        builder.build()
    }

    pub fn providers(&self) -> &Registry<ProviderFactory> {
        &self.providers
    }

    pub fn provisioners(&self) -> &Registry<ProvisionerFactory> {
        &self.provisioners
    }

    /// Looks up a provider factory by name
    pub fn provider(&self, name: &str) -> Result<ProviderFactory, PluginError> {
        self.providers
            .get(name)
            .ok_or_else(|| PluginError::ProviderNotFound(name.to_string()))
    }

    /// Looks up a provisioner factory by name
    pub fn provisioner(&self, name: &str) -> Result<ProvisionerFactory, PluginError> {
        self.provisioners
            .get(name)
            .ok_or_else(|| PluginError::ProvisionerNotFound(name.to_string()))
    }

    /// Sorted names registered for the given kind
    pub fn names(&self, kind: PluginKind) -> Vec<&str> {
        match kind {
            PluginKind::Provider => self.providers.names().collect(),
            PluginKind::Provisioner => self.provisioners.names().collect(),
        }
    }

    /// Returns true if a plugin of the given kind is registered under `name`
    pub fn contains(&self, kind: PluginKind, name: &str) -> bool {
        match kind {
            PluginKind::Provider => self.providers.contains(name),
            PluginKind::Provisioner => self.provisioners.contains(name),
        }
    }
}

/// Collects factories before freezing them into [`Registries`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    providers: BTreeMap<String, ProviderFactory>,
    provisioners: BTreeMap<String, ProvisionerFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider; a later registration under the same name replaces it
    pub fn provider(mut self, name: impl Into<String>, factory: ProviderFactory) -> Self {
        self.providers.insert(name.into(), factory);
        self
    }

    /// Registers a provisioner; a later registration under the same name replaces it
    pub fn provisioner(mut self, name: impl Into<String>, factory: ProvisionerFactory) -> Self {
        self.provisioners.insert(name.into(), factory);
        self
    }

    pub fn build(self) -> Registries {
        Registries {
            providers: Registry {
                entries: self.providers,
            },
            provisioners: Registry {
                entries: self.provisioners,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::Value;

    struct FakeProvider;

    impl ResourceProvider for FakeProvider {
        fn resources(&self) -> Vec<&'static str> {
            vec!["fake_thing"]
        }

        fn validate(&self, _resource: &str, _config: &Value) -> Vec<String> {
            Vec::new()
        }

        fn apply(&mut self, _resource: &str, config: &Value) -> Result<Value> {
            Ok(config.clone())
        }
    }

    struct FakeProvisioner;

    impl ResourceProvisioner for FakeProvisioner {
        fn validate(&self, _config: &Value) -> Vec<String> {
            Vec::new()
        }

        fn apply(&mut self, _config: &Value) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    fn fake_registries() -> Registries {
        RegistryBuilder::new()
            .provider("fake", || Box::new(FakeProvider))
            .provisioner("fake-exec", || Box::new(FakeProvisioner))
            .build()
    }

    #[test]
    fn lookup_hit() {
        let registries = fake_registries();
        let provider = registries.provider("fake").unwrap()();
        assert_eq!(provider.resources(), vec!["fake_thing"]);
        assert!(registries.provisioner("fake-exec").is_ok());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registries = fake_registries();
        assert!(matches!(
            registries.provider("Fake"),
            Err(PluginError::ProviderNotFound(ref n)) if n == "Fake"
        ));
    }

    #[test]
    fn registries_never_cross_resolve() {
        let registries = fake_registries();
        assert!(matches!(
            registries.provider("fake-exec"),
            Err(PluginError::ProviderNotFound(_))
        ));
        assert!(matches!(
            registries.provisioner("fake"),
            Err(PluginError::ProvisionerNotFound(_))
        ));
        assert!(!registries.contains(PluginKind::Provider, "fake-exec"));
        assert!(registries.contains(PluginKind::Provisioner, "fake-exec"));
    }

    #[test]
    fn builtin_registries() {
        let registries = Registries::builtin();
        let providers: Vec<_> = registries.providers().names().collect();
        let provisioners: Vec<_> = registries.provisioners().names().collect();

        assert_eq!(providers, ["null", "template"]);
        assert_eq!(provisioners, ["local-exec"]);
        assert!(matches!(
            registries.provider("local-exec"),
            Err(PluginError::ProviderNotFound(_))
        ));
    }

    #[test]
    fn names_by_kind() {
        let registries = fake_registries();
        assert_eq!(registries.names(PluginKind::Provider), ["fake"]);
        assert_eq!(registries.names(PluginKind::Provisioner), ["fake-exec"]);
    }

    #[test]
    fn empty_registries() {
        let registries = Registries::default();
        assert!(registries.providers().is_empty());
        assert_eq!(registries.provisioners().len(), 0);
    }
}
