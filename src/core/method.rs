use crate::domain::model::{InstanceId, Package};
use crate::domain::ports::{RateSink, SettingsStore};
use crate::utils::error::{Result, ShippingError};

/// The dependencies of one rate-calculation call. Rebuilt per request;
/// nothing here outlives the call.
pub struct CalculationContext<'a> {
    pub methods: &'a MethodTypeRegistry,
    pub settings: &'a dyn SettingsStore,
}

impl<'a> CalculationContext<'a> {
    pub fn new(methods: &'a MethodTypeRegistry, settings: &'a dyn SettingsStore) -> Self {
        Self { methods, settings }
    }
}

/// A class of shipping cost calculation, identified by a stable string key.
pub trait ShippingMethod: std::fmt::Debug {
    /// Stable type key, e.g. `"flat_rate"`.
    fn method_type(&self) -> &str;

    fn instance_id(&self) -> InstanceId;

    /// Customer-facing label.
    fn title(&self) -> &str;

    fn rate_id(&self) -> String {
        format!("{}:{}", self.method_type(), self.instance_id())
    }

    fn calculate_shipping(
        &self,
        ctx: &CalculationContext<'_>,
        package: &Package,
        rates: &mut dyn RateSink,
    ) -> Result<()>;
}

/// Builds a transient instance of a method type from its stored per-instance
/// settings.
pub type MethodConstructor =
    fn(InstanceId, &dyn SettingsStore) -> Result<Box<dyn ShippingMethod>>;

#[derive(Debug, Clone)]
pub struct MethodTypeEntry {
    pub key: String,
    pub label: String,
    pub constructor: MethodConstructor,
}

/// Ordered mapping from method type key to constructor. The host guarantees
/// at most one loaded type per key; lookup still resolves ties by taking the
/// first entry in iteration order.
#[derive(Debug, Clone, Default)]
pub struct MethodTypeRegistry {
    entries: Vec<MethodTypeEntry>,
}

impl MethodTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the stock method types.
    pub fn with_builtin_methods() -> Self {
        let mut registry = Self::new();
        crate::core::builtin::register_builtin_methods(&mut registry);
        registry
    }

    pub fn register(&mut self, key: &str, label: &str, constructor: MethodConstructor) {
        self.entries.push(MethodTypeEntry {
            key: key.to_string(),
            label: label.to_string(),
            constructor,
        });
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|entry| entry.key != key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn find(&self, key: &str) -> Option<&MethodTypeEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn construct(
        &self,
        key: &str,
        instance_id: InstanceId,
        settings: &dyn SettingsStore,
    ) -> Result<Box<dyn ShippingMethod>> {
        let entry = self.find(key).ok_or_else(|| ShippingError::UnknownMethodType {
            method_type: key.to_string(),
        })?;
        (entry.constructor)(instance_id, settings)
    }
}
