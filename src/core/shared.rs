use crate::core::method::{CalculationContext, ShippingMethod};
use crate::core::settings::resolve_source_zone;
use crate::domain::model::{
    InstanceId, MethodRef, Package, Rate, RateCollector, SelectOption, SettingsField,
};
use crate::domain::ports::{OptionStore, RateSink, SettingsStore, ZoneProvider};
use crate::utils::error::Result;

pub const SHARED_METHOD_TYPE: &str = "shared_shipping_method";
pub const TITLE_OPTION: &str = "title";
pub const SELECTED_METHOD_OPTION: &str = "selected_shared_method";

const DEFAULT_TITLE: &str = "Shared Shipping Method";

/// A synthetic shipping method that mirrors the cost of a method configured
/// in the shared source zone, under its own label.
#[derive(Debug)]
pub struct SharedShippingMethod {
    instance_id: InstanceId,
    title: String,
    selected: String,
}

impl SharedShippingMethod {
    /// Builds an instance from its stored options.
    pub fn load(instance_id: InstanceId, settings: &dyn SettingsStore) -> Self {
        let title = settings
            .instance_option(SHARED_METHOD_TYPE, instance_id, TITLE_OPTION)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let selected = settings
            .instance_option(SHARED_METHOD_TYPE, instance_id, SELECTED_METHOD_OPTION)
            .unwrap_or_default();
        Self {
            instance_id,
            title,
            selected,
        }
    }

    pub fn construct(
        instance_id: InstanceId,
        settings: &dyn SettingsStore,
    ) -> Result<Box<dyn ShippingMethod>> {
        Ok(Box::new(Self::load(instance_id, settings)))
    }

    /// The configured target, when the stored reference is usable.
    pub fn selected_reference(&self) -> Option<MethodRef> {
        MethodRef::parse(&self.selected)
    }

    /// Field schema for the zone-edit screen. Without a usable source zone
    /// the only field is an informational pointer to the shipping options
    /// page; a stale stored zone is healed on the way (the option is
    /// deleted).
    pub fn instance_form_fields<Z: ZoneProvider, O: OptionStore>(
        zones: &Z,
        options: &O,
    ) -> Vec<SettingsField> {
        let Some(zone) = resolve_source_zone(zones, options) else {
            return vec![SettingsField::info(
                TITLE_OPTION,
                "Shared Shipping Zone not Set",
                "Please select a shared shipping method zone on the Shipping Options page.",
            )];
        };

        let shared_options = zone
            .methods
            .iter()
            .map(|method| SelectOption {
                value: method.reference(),
                label: method.title.clone(),
            })
            .collect();

        vec![
            SettingsField::text(
                TITLE_OPTION,
                "Title",
                "This controls the title which the user sees during checkout.",
                DEFAULT_TITLE,
            ),
            SettingsField::select(SELECTED_METHOD_OPTION, "Select other method", shared_options),
        ]
    }
}

impl ShippingMethod for SharedShippingMethod {
    fn method_type(&self) -> &str {
        SHARED_METHOD_TYPE
    }

    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    /// Resolves the configured reference against the loaded method types,
    /// delegates cost calculation, and republishes the result under this
    /// instance's own rate id and title. Every failure mode degrades to "no
    /// rate produced"; the surrounding checkout flow is never interrupted.
    fn calculate_shipping(
        &self,
        ctx: &CalculationContext<'_>,
        package: &Package,
        rates: &mut dyn RateSink,
    ) -> Result<()> {
        let Some(reference) = self.selected_reference() else {
            tracing::debug!(
                instance_id = self.instance_id,
                reference = %self.selected,
                "shared method has no usable reference, skipping"
            );
            return Ok(());
        };

        // One level of indirection only.
        if reference.method_type == SHARED_METHOD_TYPE {
            tracing::warn!(
                instance_id = self.instance_id,
                reference = %reference,
                "shared method cannot delegate to another shared method"
            );
            return Ok(());
        }

        let Some(entry) = ctx.methods.find(&reference.method_type) else {
            tracing::error!(
                method_type = %reference.method_type,
                target_instance = reference.instance_id,
                "failed to load shipping method for delegation"
            );
            return Ok(());
        };

        let target = match (entry.constructor)(reference.instance_id, ctx.settings) {
            Ok(target) => target,
            Err(err) => {
                tracing::error!(
                    shared_instance = self.instance_id,
                    method_type = %reference.method_type,
                    target_instance = reference.instance_id,
                    error = %err,
                    "failed to construct delegation target"
                );
                return Ok(());
            }
        };

        let mut delegated = RateCollector::new();
        if let Err(err) = target.calculate_shipping(ctx, package, &mut delegated) {
            tracing::error!(
                shared_instance = self.instance_id,
                method_type = %reference.method_type,
                target_instance = reference.instance_id,
                error = %err,
                "delegation target failed to calculate shipping"
            );
            return Ok(());
        }

        let Some(delegated_rate) = delegated.into_rates().into_iter().next() else {
            return Ok(());
        };

        rates.add_rate(Rate {
            id: self.rate_id(),
            label: self.title.clone(),
            cost: delegated_rate.cost,
            package: package.clone(),
        });
        Ok(())
    }
}
