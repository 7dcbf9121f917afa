use crate::core::method::{CalculationContext, MethodTypeRegistry, ShippingMethod};
use crate::domain::model::{InstanceId, Package, Rate};
use crate::domain::ports::{RateSink, SettingsStore};
use crate::utils::error::{Result, ShippingError};

pub const FLAT_RATE: &str = "flat_rate";
pub const FREE_SHIPPING: &str = "free_shipping";
pub const LOCAL_PICKUP: &str = "local_pickup";

pub fn register_builtin_methods(registry: &mut MethodTypeRegistry) {
    registry.register(FLAT_RATE, "Flat rate", construct_flat_rate);
    registry.register(FREE_SHIPPING, "Free shipping", construct_free_shipping);
    registry.register(LOCAL_PICKUP, "Local pickup", construct_local_pickup);
}

pub fn construct_flat_rate(
    instance_id: InstanceId,
    settings: &dyn SettingsStore,
) -> Result<Box<dyn ShippingMethod>> {
    Ok(Box::new(FlatRate::load(instance_id, settings)?))
}

pub fn construct_free_shipping(
    instance_id: InstanceId,
    settings: &dyn SettingsStore,
) -> Result<Box<dyn ShippingMethod>> {
    Ok(Box::new(FreeShipping::load(instance_id, settings)?))
}

pub fn construct_local_pickup(
    instance_id: InstanceId,
    settings: &dyn SettingsStore,
) -> Result<Box<dyn ShippingMethod>> {
    Ok(Box::new(LocalPickup::load(instance_id, settings)?))
}

/// Fixed cost per package.
#[derive(Debug)]
pub struct FlatRate {
    instance_id: InstanceId,
    title: String,
    cost: f64,
}

impl FlatRate {
    pub fn load(instance_id: InstanceId, settings: &dyn SettingsStore) -> Result<Self> {
        Ok(Self {
            instance_id,
            title: instance_title(FLAT_RATE, instance_id, settings, "Flat rate"),
            cost: parse_cost_option(FLAT_RATE, instance_id, settings, "cost")?,
        })
    }
}

impl ShippingMethod for FlatRate {
    fn method_type(&self) -> &str {
        FLAT_RATE
    }

    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn calculate_shipping(
        &self,
        _ctx: &CalculationContext<'_>,
        package: &Package,
        rates: &mut dyn RateSink,
    ) -> Result<()> {
        rates.add_rate(Rate {
            id: self.rate_id(),
            label: self.title.clone(),
            cost: self.cost,
            package: package.clone(),
        });
        Ok(())
    }
}

/// Zero-cost rate, optionally gated on a minimum order amount.
#[derive(Debug)]
pub struct FreeShipping {
    instance_id: InstanceId,
    title: String,
    min_amount: Option<f64>,
}

impl FreeShipping {
    pub fn load(instance_id: InstanceId, settings: &dyn SettingsStore) -> Result<Self> {
        let min_amount = match settings.instance_option(FREE_SHIPPING, instance_id, "min_amount") {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_decimal(FREE_SHIPPING, instance_id, "min_amount", &raw)?)
            }
            _ => None,
        };
        Ok(Self {
            instance_id,
            title: instance_title(FREE_SHIPPING, instance_id, settings, "Free shipping"),
            min_amount,
        })
    }
}

impl ShippingMethod for FreeShipping {
    fn method_type(&self) -> &str {
        FREE_SHIPPING
    }

    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn calculate_shipping(
        &self,
        _ctx: &CalculationContext<'_>,
        package: &Package,
        rates: &mut dyn RateSink,
    ) -> Result<()> {
        if let Some(min_amount) = self.min_amount {
            if package.contents_total() < min_amount {
                tracing::debug!(
                    instance_id = self.instance_id,
                    min_amount,
                    contents_total = package.contents_total(),
                    "free shipping minimum not met"
                );
                return Ok(());
            }
        }
        rates.add_rate(Rate {
            id: self.rate_id(),
            label: self.title.clone(),
            cost: 0.0,
            package: package.clone(),
        });
        Ok(())
    }
}

/// Pickup at the store, normally free.
#[derive(Debug)]
pub struct LocalPickup {
    instance_id: InstanceId,
    title: String,
    cost: f64,
}

impl LocalPickup {
    pub fn load(instance_id: InstanceId, settings: &dyn SettingsStore) -> Result<Self> {
        Ok(Self {
            instance_id,
            title: instance_title(LOCAL_PICKUP, instance_id, settings, "Local pickup"),
            cost: parse_cost_option(LOCAL_PICKUP, instance_id, settings, "cost")?,
        })
    }
}

impl ShippingMethod for LocalPickup {
    fn method_type(&self) -> &str {
        LOCAL_PICKUP
    }

    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn calculate_shipping(
        &self,
        _ctx: &CalculationContext<'_>,
        package: &Package,
        rates: &mut dyn RateSink,
    ) -> Result<()> {
        rates.add_rate(Rate {
            id: self.rate_id(),
            label: self.title.clone(),
            cost: self.cost,
            package: package.clone(),
        });
        Ok(())
    }
}

fn instance_title(
    method_type: &str,
    instance_id: InstanceId,
    settings: &dyn SettingsStore,
    default: &str,
) -> String {
    settings
        .instance_option(method_type, instance_id, "title")
        .unwrap_or_else(|| default.to_string())
}

fn parse_cost_option(
    method_type: &str,
    instance_id: InstanceId,
    settings: &dyn SettingsStore,
    key: &str,
) -> Result<f64> {
    match settings.instance_option(method_type, instance_id, key) {
        Some(raw) => parse_decimal(method_type, instance_id, key, &raw),
        None => Ok(0.0),
    }
}

fn parse_decimal(
    method_type: &str,
    instance_id: InstanceId,
    key: &str,
    raw: &str,
) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| ShippingError::InvalidOption {
            field: format!("{}:{}.{}", method_type, instance_id, key),
            value: raw.to_string(),
            reason: "not a decimal amount".to_string(),
        })
}
