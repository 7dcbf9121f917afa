pub mod builtin;
pub mod method;
pub mod settings;
pub mod shared;

pub use crate::domain::model::{Package, Rate, RateCollector};
pub use crate::domain::ports::{OptionStore, RateSink, SettingsStore, ZoneProvider};
pub use crate::utils::error::Result;
