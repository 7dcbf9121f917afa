use crate::domain::model::{InstanceId, Location, MethodInstance, Zone, ZoneDraft, ZoneId};
use crate::domain::ports::{OptionStore, SettingsStore, ZoneProvider};
use crate::utils::error::{Result, ShippingError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory stand-in for the host platform's zone and option storage.
/// Backs the ports in tests and fixture-driven setups; real hosts provide
/// their own persistence behind the same traits.
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    state: Mutex<PlatformState>,
}

#[derive(Debug, Default)]
struct PlatformState {
    zones: Vec<Zone>,
    last_zone_id: ZoneId,
    options: HashMap<String, String>,
    instance_options: HashMap<(String, InstanceId), HashMap<String, String>>,
    last_instance_ids: HashMap<String, InstanceId>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PlatformState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_zone(&self, name: &str, order: u32, locations: Vec<Location>) -> ZoneId {
        let mut state = self.state();
        state.last_zone_id += 1;
        let zone_id = state.last_zone_id;
        state.zones.push(Zone {
            id: zone_id,
            name: name.to_string(),
            order,
            locations,
            methods: Vec::new(),
        });
        zone_id
    }

    /// Inserts a zone under a caller-chosen id; fixture loading declares
    /// ids explicitly so stored references stay stable.
    pub fn insert_zone(
        &self,
        zone_id: ZoneId,
        name: &str,
        order: u32,
        locations: Vec<Location>,
    ) -> Result<()> {
        let mut state = self.state();
        if state.zones.iter().any(|zone| zone.id == zone_id) {
            return Err(ShippingError::ConfigError {
                message: format!("duplicate zone id {}", zone_id),
            });
        }
        state.last_zone_id = state.last_zone_id.max(zone_id);
        state.zones.push(Zone {
            id: zone_id,
            name: name.to_string(),
            order,
            locations,
            methods: Vec::new(),
        });
        Ok(())
    }

    /// Attaches a method instance to a zone, allocating an instance id
    /// unique within the method type. The instance title is mirrored into
    /// its stored options so a constructed instance carries the same label.
    pub fn attach_method(
        &self,
        zone_id: ZoneId,
        method_type: &str,
        title: &str,
    ) -> Result<InstanceId> {
        let mut state = self.state();
        if !state.zones.iter().any(|zone| zone.id == zone_id) {
            return Err(ShippingError::UnknownZone { zone_id });
        }

        let instance_id = {
            let last = state
                .last_instance_ids
                .entry(method_type.to_string())
                .or_insert(0);
            *last += 1;
            *last
        };

        if let Some(zone) = state.zones.iter_mut().find(|zone| zone.id == zone_id) {
            zone.methods.push(MethodInstance {
                method_type: method_type.to_string(),
                instance_id,
                title: title.to_string(),
            });
        }
        state
            .instance_options
            .entry((method_type.to_string(), instance_id))
            .or_default()
            .insert("title".to_string(), title.to_string());
        Ok(instance_id)
    }

    /// Deletes a zone outright, as an admin acting outside this extension
    /// would.
    pub fn remove_zone(&self, zone_id: ZoneId) -> Result<()> {
        let mut state = self.state();
        let before = state.zones.len();
        state.zones.retain(|zone| zone.id != zone_id);
        if state.zones.len() == before {
            return Err(ShippingError::UnknownZone { zone_id });
        }
        Ok(())
    }

    pub fn set_instance_option(
        &self,
        method_type: &str,
        instance_id: InstanceId,
        key: &str,
        value: &str,
    ) {
        self.state()
            .instance_options
            .entry((method_type.to_string(), instance_id))
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn zone_count(&self) -> usize {
        self.state().zones.len()
    }
}

impl ZoneProvider for MemoryPlatform {
    fn zones(&self) -> Vec<Zone> {
        let mut zones = self.state().zones.clone();
        zones.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
        zones
    }

    fn zone(&self, zone_id: ZoneId) -> Result<Zone> {
        self.state()
            .zones
            .iter()
            .find(|zone| zone.id == zone_id)
            .cloned()
            .ok_or(ShippingError::UnknownZone { zone_id })
    }

    fn create_zone(&self, draft: ZoneDraft) -> Result<ZoneId> {
        let ZoneDraft {
            name,
            order,
            locations,
        } = draft;
        Ok(self.add_zone(&name, order, locations))
    }
}

impl OptionStore for MemoryPlatform {
    fn get(&self, key: &str) -> Option<String> {
        self.state().options.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.state()
            .options
            .insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.state().options.remove(key);
    }
}

impl SettingsStore for MemoryPlatform {
    fn instance_option(
        &self,
        method_type: &str,
        instance_id: InstanceId,
        key: &str,
    ) -> Option<String> {
        self.state()
            .instance_options
            .get(&(method_type.to_string(), instance_id))
            .and_then(|options| options.get(key))
            .cloned()
    }
}
