use crate::domain::ports::RateSink;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ZoneId = u64;
pub type InstanceId = u32;

/// A named grouping of geographic regions with its own attached shipping
/// methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub order: u32,
    pub locations: Vec<Location>,
    pub methods: Vec<MethodInstance>,
}

impl Zone {
    pub fn has_method_type(&self, method_type: &str) -> bool {
        self.methods.iter().any(|m| m.method_type == method_type)
    }
}

/// Zone attributes for creation; the host assigns the id on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDraft {
    pub name: String,
    pub order: u32,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub kind: LocationKind,
}

impl Location {
    pub fn country(code: &str) -> Self {
        Self {
            code: code.to_string(),
            kind: LocationKind::Country,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Country,
    State,
    Postcode,
    Continent,
}

/// One configured occurrence of a method type attached to a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodInstance {
    pub method_type: String,
    pub instance_id: InstanceId,
    pub title: String,
}

impl MethodInstance {
    pub fn reference(&self) -> String {
        format!("{}:{}", self.method_type, self.instance_id)
    }
}

/// Composite reference to a method instance in another zone, stored as a
/// single `"{method_type}:{instance_id}"` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    pub method_type: String,
    pub instance_id: InstanceId,
}

impl MethodRef {
    /// Parses a stored reference. Malformed input (missing delimiter, empty
    /// parts, non-numeric instance id) is reported as `None`, never as a
    /// fault.
    pub fn parse(reference: &str) -> Option<Self> {
        let (method_type, instance_id) = reference.split_once(':')?;
        if method_type.is_empty() {
            return None;
        }
        let instance_id = instance_id.parse().ok()?;
        Some(Self {
            method_type: method_type.to_string(),
            instance_id,
        })
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method_type, self.instance_id)
    }
}

/// Cart contents plus destination, as handed to cost calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Package {
    pub contents: Vec<PackageItem>,
    pub destination: Destination,
}

impl Package {
    pub fn contents_total(&self) -> f64 {
        self.contents.iter().map(|item| item.line_total).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageItem {
    pub product_id: u64,
    pub quantity: u32,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Destination {
    pub country: String,
    pub state: String,
    pub postcode: String,
    pub city: String,
}

/// A computed shipping option offered to the customer for one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub id: String,
    pub label: String,
    pub cost: f64,
    pub package: Package,
}

/// Vec-backed [`RateSink`].
#[derive(Debug, Default)]
pub struct RateCollector {
    rates: Vec<Rate>,
}

impl RateCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    pub fn into_rates(self) -> Vec<Rate> {
        self.rates
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

impl RateSink for RateCollector {
    fn add_rate(&mut self, rate: Rate) {
        self.rates.push(rate);
    }
}

/// The administrative context a method-type listing is filtered for. The
/// host passes the zone being edited explicitly instead of the filter
/// inspecting request parameters.
#[derive(Debug, Clone, Default)]
pub struct AdminContext {
    pub zone_id: Option<ZoneId>,
}

impl AdminContext {
    pub fn for_zone(zone_id: ZoneId) -> Self {
        Self {
            zone_id: Some(zone_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Select,
    /// Informational heading with no stored value.
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// One field contributed to a host settings page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub description: String,
    pub default: String,
    pub options: Vec<SelectOption>,
    pub desc_tip: bool,
}

impl SettingsField {
    pub fn text(id: &str, label: &str, description: &str, default: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            description: description.to_string(),
            default: default.to_string(),
            options: Vec::new(),
            desc_tip: true,
        }
    }

    pub fn select(id: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Select,
            description: String::new(),
            default: String::new(),
            options,
            desc_tip: false,
        }
    }

    pub fn info(id: &str, label: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Info,
            description: description.to_string(),
            default: String::new(),
            options: Vec::new(),
            desc_tip: false,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_desc_tip(mut self, desc_tip: bool) -> Self {
        self.desc_tip = desc_tip;
        self
    }

    /// Payload shape consumed by the host page renderer.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
