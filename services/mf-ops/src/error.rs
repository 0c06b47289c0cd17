use mferp_errors::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::value_objects::CodeError;

/// 业务规则错误
#[derive(Debug, Error)]
pub enum OpsError {
    #[error("Insufficient stock for {item_code}: available {available}, requested {requested}")]
    InsufficientStock {
        item_code: String,
        available: Decimal,
        requested: Decimal,
    },
    #[error("Cannot {action} {entity} in status {status}")]
    InvalidStatusTransition {
        entity: &'static str,
        status: String,
        action: &'static str,
    },
    #[error("Quantity {requested} exceeds pending quantity {pending}")]
    QuantityExceeded { requested: Decimal, pending: Decimal },
    #[error("{entity} {code} is inactive")]
    Inactive { entity: &'static str, code: String },
    #[error("Item {item_code} cannot be used here: {reason}")]
    InvalidItemCategory { item_code: String, reason: String },
    #[error("Geometry unavailable: {0}")]
    GeometryUnavailable(String),
    #[error("Invalid code: {0}")]
    InvalidCode(#[from] CodeError),
}

impl OpsError {
    pub fn invalid_transition(
        entity: &'static str,
        status: impl std::fmt::Debug,
        action: &'static str,
    ) -> Self {
        Self::InvalidStatusTransition {
            entity,
            status: format!("{:?}", status),
            action,
        }
    }

    pub fn inactive(entity: &'static str, code: impl Into<String>) -> Self {
        Self::Inactive {
            entity,
            code: code.into(),
        }
    }
}

impl From<OpsError> for AppError {
    fn from(error: OpsError) -> Self {
        match error {
            OpsError::InsufficientStock { .. }
            | OpsError::InvalidStatusTransition { .. }
            | OpsError::Inactive { .. } => AppError::FailedPrecondition(error.to_string()),
            OpsError::QuantityExceeded { .. }
            | OpsError::InvalidItemCategory { .. }
            | OpsError::GeometryUnavailable(_)
            | OpsError::InvalidCode(_) => AppError::Validation(error.to_string()),
        }
    }
}
