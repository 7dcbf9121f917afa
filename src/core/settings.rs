use crate::core::method::MethodTypeRegistry;
use crate::core::shared::{SharedShippingMethod, SELECTED_METHOD_OPTION, SHARED_METHOD_TYPE};
use crate::domain::model::{AdminContext, Location, SelectOption, SettingsField, Zone, ZoneDraft, ZoneId};
use crate::domain::ports::{OptionStore, ZoneProvider};
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::validate_method_reference;

pub const SHARED_ZONE_OPTION: &str = "shared_shipping_zone";

const SHARED_METHOD_LABEL: &str = "Shared Shipping Method";
const SHARED_ZONE_NAME: &str = "Shared Shipping Methods";
// Forced to the bottom of any zone list.
const SHARED_ZONE_ORDER: u32 = 100;
// Antarctica: never matches a real customer cart.
const NON_SERVICEABLE_COUNTRY: &str = "AQ";

/// Owns the one global configuration value (the shared source zone) and
/// controls where the shared method type is offered.
pub struct SettingsCoordinator<Z: ZoneProvider, O: OptionStore> {
    zones: Z,
    options: O,
}

impl<Z: ZoneProvider, O: OptionStore> SettingsCoordinator<Z, O> {
    pub fn new(zones: Z, options: O) -> Self {
        Self { zones, options }
    }

    /// Select options for the source-zone setting. A zone that already
    /// contains a shared method instance is a consumer and is excluded, so
    /// the source cannot point back at a consumer one level deep.
    pub fn source_zone_candidates(&self) -> Vec<SelectOption> {
        let mut candidates = vec![SelectOption {
            value: String::new(),
            label: "None".to_string(),
        }];
        for zone in self.zones.zones() {
            if zone.has_method_type(SHARED_METHOD_TYPE) {
                continue;
            }
            candidates.push(SelectOption {
                value: zone.id.to_string(),
                label: zone.name.clone(),
            });
        }
        candidates
    }

    /// Inserts the source-zone field into the host shipping settings list.
    /// The last element closes the settings section, so the field goes
    /// immediately before it.
    pub fn insert_settings_field(&self, mut settings: Vec<SettingsField>) -> Vec<SettingsField> {
        let field = SettingsField::select(
            SHARED_ZONE_OPTION,
            "Share shipping methods zone",
            self.source_zone_candidates(),
        )
        .with_description("Select a source zone for sharing shipping methods.")
        .with_desc_tip(true);

        let position = settings.len().saturating_sub(1);
        settings.insert(position, field);
        settings
    }

    /// Always offers the shared method type, except in the source zone
    /// itself: attaching a shared method there would create a reference
    /// cycle.
    pub fn filter_method_types(
        &self,
        mut registry: MethodTypeRegistry,
        context: &AdminContext,
    ) -> MethodTypeRegistry {
        if !registry.contains(SHARED_METHOD_TYPE) {
            registry.register(
                SHARED_METHOD_TYPE,
                SHARED_METHOD_LABEL,
                SharedShippingMethod::construct,
            );
        }

        let configured = self
            .options
            .get(SHARED_ZONE_OPTION)
            .and_then(|raw| raw.parse::<ZoneId>().ok());
        if context.zone_id.is_some() && context.zone_id == configured {
            registry.remove(SHARED_METHOD_TYPE);
        }
        registry
    }

    /// Idempotent activation bootstrap. Creates the holding zone and stores
    /// its id unless a source zone is already configured. Creation failure
    /// is logged, never raised to the caller.
    pub fn on_activation(&self) {
        if self.options.get(SHARED_ZONE_OPTION).is_some() {
            return;
        }

        let draft = ZoneDraft {
            name: SHARED_ZONE_NAME.to_string(),
            order: SHARED_ZONE_ORDER,
            locations: vec![Location::country(NON_SERVICEABLE_COUNTRY)],
        };
        match self.zones.create_zone(draft) {
            Ok(zone_id) => {
                self.options.set(SHARED_ZONE_OPTION, &zone_id.to_string());
                tracing::info!(zone_id, "created shared shipping zone");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to create shared shipping zone");
            }
        }
    }

    /// Admin save handler for the source-zone setting. An explicit empty
    /// selection removes the stored value entirely, which is distinct from
    /// never having set it.
    pub fn save_source_zone(&self, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            self.options.delete(SHARED_ZONE_OPTION);
            return Ok(());
        }

        let zone_id: ZoneId = value.parse().map_err(|_| ShippingError::InvalidOption {
            field: SHARED_ZONE_OPTION.to_string(),
            value: value.to_string(),
            reason: "not a zone id".to_string(),
        })?;
        self.zones.zone(zone_id)?;
        self.options.set(SHARED_ZONE_OPTION, value);
        Ok(())
    }

    /// Configuration-time invariant: a non-empty shared selection must name
    /// a method currently attached to the source zone.
    pub fn validate_shared_selection(&self, reference: &str) -> Result<()> {
        if reference.is_empty() {
            return Ok(());
        }
        let parsed = validate_method_reference(SELECTED_METHOD_OPTION, reference)?;
        let Some(zone) = resolve_source_zone(&self.zones, &self.options) else {
            return Err(ShippingError::ConfigError {
                message: "no shared shipping zone configured".to_string(),
            });
        };
        let live = zone.methods.iter().any(|method| {
            method.method_type == parsed.method_type && method.instance_id == parsed.instance_id
        });
        if !live {
            return Err(ShippingError::InvalidReference {
                reference: reference.to_string(),
                reason: format!("no such method in zone '{}'", zone.name),
            });
        }
        Ok(())
    }

    pub fn source_zone(&self) -> Option<Zone> {
        resolve_source_zone(&self.zones, &self.options)
    }
}

/// Resolves the configured source zone. A stored id that no longer resolves
/// (zone deleted out-of-band, or an unparsable stored value) is stale: the
/// option is deleted, one diagnostic is logged, and "no source zone" is
/// reported. Never faults to the caller.
pub fn resolve_source_zone<Z: ZoneProvider, O: OptionStore>(zones: &Z, options: &O) -> Option<Zone> {
    let raw = options.get(SHARED_ZONE_OPTION)?;

    let zone_id = match raw.parse::<ZoneId>() {
        Ok(zone_id) => zone_id,
        Err(_) => {
            options.delete(SHARED_ZONE_OPTION);
            tracing::error!(
                value = %raw,
                "invalid shared shipping zone, option deleted"
            );
            return None;
        }
    };

    match zones.zone(zone_id) {
        Ok(zone) => Some(zone),
        Err(_) => {
            options.delete(SHARED_ZONE_OPTION);
            tracing::error!(zone_id, "invalid shared shipping zone, option deleted");
            None
        }
    }
}
