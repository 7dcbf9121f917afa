use crate::adapters::MemoryPlatform;
use crate::domain::model::{Location, LocationKind, ZoneId};
use crate::domain::ports::OptionStore;
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Declarative description of a host platform: zones, their attached
/// methods, and stored global options. Methods are attached in file order,
/// so instance ids count up from 1 within each method type; stored
/// references like `"flat_rate:1"` follow that numbering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub options: HashMap<String, String>,
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub locations: Vec<LocationConfig>,
    #[serde(default)]
    pub methods: Vec<MethodConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub code: String,
    #[serde(default = "default_location_kind")]
    pub kind: LocationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodConfig {
    pub r#type: String,
    pub title: String,
    #[serde(default)]
    pub options: HashMap<String, String>,
}

fn default_location_kind() -> LocationKind {
    LocationKind::Country
}

impl PlatformConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShippingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ShippingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Builds an in-memory platform from this description.
    pub fn into_platform(self) -> Result<MemoryPlatform> {
        self.validate()?;

        let platform = MemoryPlatform::new();
        for zone in &self.zones {
            let locations = zone
                .locations
                .iter()
                .map(|location| Location {
                    code: location.code.clone(),
                    kind: location.kind,
                })
                .collect();
            platform.insert_zone(zone.id, &zone.name, zone.order, locations)?;

            for method in &zone.methods {
                let instance_id = platform.attach_method(zone.id, &method.r#type, &method.title)?;
                for (key, value) in &method.options {
                    platform.set_instance_option(&method.r#type, instance_id, key, value);
                }
            }
        }

        for (key, value) in &self.options {
            platform.set(key, value);
        }
        Ok(platform)
    }
}

impl Validate for PlatformConfig {
    fn validate(&self) -> Result<()> {
        let mut seen_ids = HashSet::new();
        for zone in &self.zones {
            validate_positive_number("zones.id", zone.id, 1)?;
            validate_non_empty_string("zones.name", &zone.name)?;
            if !seen_ids.insert(zone.id) {
                return Err(ShippingError::ConfigError {
                    message: format!("duplicate zone id {}", zone.id),
                });
            }
            for location in &zone.locations {
                validate_non_empty_string("zones.locations.code", &location.code)?;
            }
            for method in &zone.methods {
                validate_non_empty_string("zones.methods.type", &method.r#type)?;
                validate_non_empty_string("zones.methods.title", &method.title)?;
            }
        }

        if let Some(raw) = self.options.get(crate::core::settings::SHARED_ZONE_OPTION) {
            let zone_id: ZoneId = raw.parse().map_err(|_| ShippingError::InvalidOption {
                field: crate::core::settings::SHARED_ZONE_OPTION.to_string(),
                value: raw.clone(),
                reason: "not a zone id".to_string(),
            })?;
            if !self.zones.iter().any(|zone| zone.id == zone_id) {
                return Err(ShippingError::InvalidOption {
                    field: crate::core::settings::SHARED_ZONE_OPTION.to_string(),
                    value: raw.clone(),
                    reason: "references a zone this configuration does not declare".to_string(),
                });
            }
        }
        Ok(())
    }
}
