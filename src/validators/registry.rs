//! Validator registry: name → validator function.
//!
//! A registry has two phases. While open, validators can be registered
//! under new names. Once sealed it is read-only, which is the only state a
//! validation pass ever sees through [`global`] or [`RegistryBuilder::build`].
//!
//! The process-wide registry is installed at most once. Registering into a
//! registry that other threads are already validating against is not
//! supported; the seal turns such attempts into [`RegistryError::Sealed`].

use crate::core::context::ValidatorContext;
use crate::core::error::{RegistryError, ValidatorResult};
use indexmap::IndexMap;
use log::{debug, warn};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A validator function.
///
/// Receives the field's context and the directive's options.
pub type ValidatorFn = Arc<dyn Fn(&mut ValidatorContext, &[String]) -> ValidatorResult + Send + Sync>;

/// Registry entry containing the function and its description.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Name the validator is registered under.
    pub name: String,
    /// The validator function.
    pub validator: ValidatorFn,
    /// Short description for listings.
    pub description: String,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("validator", &"<fn>")
            .field("description", &self.description)
            .finish()
    }
}

/// Registry of available validators.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    /// Validators indexed by name, in registration order.
    validators: IndexMap<String, RegistryEntry>,
    /// Set once registration is closed.
    sealed: bool,
}

impl ValidatorRegistry {
    /// Create a new empty, open registry.
    pub fn new() -> Self {
        Self {
            validators: IndexMap::new(),
            sealed: false,
        }
    }

    /// Create an open registry pre-populated with the built-in validators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for entry in crate::validators::builtin::entries() {
            registry.validators.insert(entry.name.clone(), entry);
        }
        registry
    }

    /// Register a validator under a new name.
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut ValidatorContext, &[String]) -> ValidatorResult + Send + Sync + 'static,
    {
        self.register_with_description(name, String::new(), validator)
    }

    /// Register a validator with a description.
    pub fn register_with_description<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        validator: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&mut ValidatorContext, &[String]) -> ValidatorResult + Send + Sync + 'static,
    {
        let name = name.into();

        if self.sealed {
            warn!("rejected registration of '{}' on a sealed registry", name);
            return Err(RegistryError::Sealed { name });
        }
        if self.validators.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }

        debug!("registered validator '{}'", name);
        self.validators.insert(
            name.clone(),
            RegistryEntry {
                name,
                validator: Arc::new(validator),
                description: description.into(),
            },
        );
        Ok(())
    }

    /// Close registration. The registry is read-only afterwards.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Check whether registration is closed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Look up a validator by name.
    pub fn lookup(&self, name: &str) -> Option<&ValidatorFn> {
        self.validators.get(name).map(|e| &e.validator)
    }

    /// Get a registry entry.
    pub fn get_entry(&self, name: &str) -> Option<&RegistryEntry> {
        self.validators.get(name)
    }

    /// Check if a validator is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// All registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(|s| s.as_str())
    }

    /// All registry entries, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.validators.values()
    }

    /// Get the total number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Builder for a sealed registry with custom validators.
pub struct RegistryBuilder {
    custom: Vec<RegistryEntry>,
    include_builtins: bool,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            custom: Vec::new(),
            include_builtins: true,
        }
    }

    /// Include or exclude built-in validators.
    pub fn with_builtins(mut self, include: bool) -> Self {
        self.include_builtins = include;
        self
    }

    /// Add a custom validator.
    pub fn register<F>(self, name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&mut ValidatorContext, &[String]) -> ValidatorResult + Send + Sync + 'static,
    {
        self.register_with_description(name, String::new(), validator)
    }

    /// Add a custom validator with a description.
    pub fn register_with_description<F>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        validator: F,
    ) -> Self
    where
        F: Fn(&mut ValidatorContext, &[String]) -> ValidatorResult + Send + Sync + 'static,
    {
        self.custom.push(RegistryEntry {
            name: name.into(),
            validator: Arc::new(validator),
            description: description.into(),
        });
        self
    }

    /// Build and seal the registry.
    ///
    /// Fails if a custom validator reuses a name already taken.
    pub fn build(self) -> Result<ValidatorRegistry, RegistryError> {
        let mut registry = if self.include_builtins {
            ValidatorRegistry::with_builtins()
        } else {
            ValidatorRegistry::new()
        };

        for entry in self.custom {
            if registry.contains(&entry.name) {
                return Err(RegistryError::Duplicate { name: entry.name });
            }
            registry.validators.insert(entry.name.clone(), entry);
        }

        registry.seal();
        Ok(registry)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Process-wide Registry
// ============================================================================

static GLOBAL: OnceLock<Arc<ValidatorRegistry>> = OnceLock::new();

/// Install the process-wide registry. It is sealed on install.
///
/// Must run before the first validation pass that uses [`global`]; once a
/// registry is in place (installed or lazily defaulted) this fails with
/// [`RegistryError::AlreadyInstalled`].
pub fn install(mut registry: ValidatorRegistry) -> Result<Arc<ValidatorRegistry>, RegistryError> {
    registry.seal();
    let registry = Arc::new(registry);
    GLOBAL
        .set(Arc::clone(&registry))
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    debug!("installed process-wide registry with {} validator(s)", registry.len());
    Ok(registry)
}

/// The process-wide registry.
///
/// Defaults to the sealed built-in set if nothing was installed.
pub fn global() -> Arc<ValidatorRegistry> {
    Arc::clone(GLOBAL.get_or_init(|| {
        let mut registry = ValidatorRegistry::with_builtins();
        registry.seal();
        Arc::new(registry)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ValidatorError;
    use crate::core::types::Value;

    fn always_fails(_ctx: &mut ValidatorContext, _options: &[String]) -> ValidatorResult {
        Err(ValidatorError::invalid("{field} is never valid."))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ValidatorRegistry::new();
        registry.register("never", always_fails).unwrap();

        assert!(registry.contains("never"));
        let validator = registry.lookup("never").unwrap();
        let mut ctx = ValidatorContext::with_value(Value::Integer(1));
        assert!(validator(&mut ctx, &[]).is_err());
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut registry = ValidatorRegistry::with_builtins();
        assert_eq!(
            registry.register("min", always_fails),
            Err(RegistryError::Duplicate { name: "min".into() })
        );
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let mut registry = ValidatorRegistry::with_builtins();
        registry.seal();

        assert!(registry.is_sealed());
        assert_eq!(
            registry.register("never", always_fails),
            Err(RegistryError::Sealed { name: "never".into() })
        );
        assert!(registry.lookup("empty").is_some());
    }

    #[test]
    fn test_builtins_are_registered_in_order() {
        let registry = ValidatorRegistry::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["empty", "not_empty", "min", "max", "lowercase", "uppercase", "numeric"]
        );
    }

    #[test]
    fn test_builder() {
        let registry = RegistryBuilder::new()
            .register_with_description("never", "Always fails", always_fails)
            .build()
            .unwrap();

        assert!(registry.is_sealed());
        assert!(registry.contains("numeric"));
        assert_eq!(registry.get_entry("never").unwrap().description, "Always fails");

        let bare = RegistryBuilder::new().with_builtins(false).build().unwrap();
        assert!(bare.is_empty());

        let clash = RegistryBuilder::new().register("empty", always_fails).build();
        assert!(matches!(clash, Err(RegistryError::Duplicate { .. })));
    }

    #[test]
    fn test_global_is_installed_once() {
        let first = install(ValidatorRegistry::with_builtins());
        assert!(matches!(first, Ok(_) | Err(RegistryError::AlreadyInstalled)));

        assert_eq!(
            install(ValidatorRegistry::new()).unwrap_err(),
            RegistryError::AlreadyInstalled
        );

        let registry = global();
        assert!(registry.is_sealed());
        assert!(registry.contains("not_empty"));
    }
}
