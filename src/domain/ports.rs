use crate::domain::model::{InstanceId, Rate, Zone, ZoneDraft, ZoneId};
use crate::utils::error::Result;
use std::sync::Arc;

/// Zone listing and lookup as the host platform exposes them.
pub trait ZoneProvider: Send + Sync {
    /// All zones in display order.
    fn zones(&self) -> Vec<Zone>;

    /// Looks up one zone. Fails when the id does not resolve, which is how
    /// out-of-band deletion is detected.
    fn zone(&self, zone_id: ZoneId) -> Result<Zone>;

    fn create_zone(&self, draft: ZoneDraft) -> Result<ZoneId>;
}

/// Named global configuration values persisted by the host.
pub trait OptionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// Per-instance method settings persisted by the host.
pub trait SettingsStore: Send + Sync {
    fn instance_option(&self, method_type: &str, instance_id: InstanceId, key: &str)
        -> Option<String>;
}

/// Where computed rates are published for the current package.
pub trait RateSink {
    fn add_rate(&mut self, rate: Rate);
}

impl<T: ZoneProvider + ?Sized> ZoneProvider for Arc<T> {
    fn zones(&self) -> Vec<Zone> {
        (**self).zones()
    }

    fn zone(&self, zone_id: ZoneId) -> Result<Zone> {
        (**self).zone(zone_id)
    }

    fn create_zone(&self, draft: ZoneDraft) -> Result<ZoneId> {
        (**self).create_zone(draft)
    }
}

impl<T: OptionStore + ?Sized> OptionStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) {
        (**self).delete(key)
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for Arc<T> {
    fn instance_option(
        &self,
        method_type: &str,
        instance_id: InstanceId,
        key: &str,
    ) -> Option<String> {
        (**self).instance_option(method_type, instance_id, key)
    }
}

impl<T: ZoneProvider + ?Sized> ZoneProvider for &T {
    fn zones(&self) -> Vec<Zone> {
        (**self).zones()
    }

    fn zone(&self, zone_id: ZoneId) -> Result<Zone> {
        (**self).zone(zone_id)
    }

    fn create_zone(&self, draft: ZoneDraft) -> Result<ZoneId> {
        (**self).create_zone(draft)
    }
}

impl<T: OptionStore + ?Sized> OptionStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) {
        (**self).delete(key)
    }
}
