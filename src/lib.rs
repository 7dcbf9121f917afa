pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::MemoryPlatform;
pub use crate::config::PlatformConfig;
pub use crate::core::method::{CalculationContext, MethodTypeRegistry, ShippingMethod};
pub use crate::core::settings::SettingsCoordinator;
pub use crate::core::shared::SharedShippingMethod;
pub use crate::domain::model::{AdminContext, Package, Rate, RateCollector};
pub use crate::domain::ports::{OptionStore, RateSink, SettingsStore, ZoneProvider};
pub use crate::utils::error::{Result, ShippingError};
