use crate::domain::model::MethodRef;
use crate::utils::error::{Result, ShippingError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShippingError::InvalidOption {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ShippingError::InvalidOption {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_method_reference(field_name: &str, reference: &str) -> Result<MethodRef> {
    MethodRef::parse(reference).ok_or_else(|| ShippingError::InvalidReference {
        reference: reference.to_string(),
        reason: format!("{} must use the \"method_type:instance_id\" format", field_name),
    })
}
