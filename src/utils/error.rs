use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShippingError {
    #[error("unknown shipping zone: {zone_id}")]
    UnknownZone { zone_id: u64 },

    #[error("unknown shipping method type: {method_type}")]
    UnknownMethodType { method_type: String },

    #[error("invalid method reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidOption {
        field: String,
        value: String,
        reason: String,
    },

    #[error("configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShippingError>;
