//! Inbound request payloads and their validation.
//!
//! # Responsibility
//! - Mirror the JSON bodies accepted by the HTTP surface.
//! - Turn loosely-typed input into checked values (`String`, `u32`).
//!
//! # Invariants
//! - Missing fields are validation errors, not decode errors.
//! - `validate` reports every failing field at once.

use crate::model::validation::{
    push_if_blank, FieldViolation, ValidationError, BRANCH_NAME_REQUIRED, FRANCHISE_NAME_REQUIRED,
    NAME_REQUIRED, PRODUCT_NAME_REQUIRED, STOCK_NEGATIVE, STOCK_REQUIRED, STOCK_TOO_LARGE,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /franchises`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFranchiseRequest {
    pub name: Option<String>,
}

/// Body of `POST /franchises/{id}/branches`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBranchRequest {
    pub name: Option<String>,
}

/// Body of `POST /franchises/{id}/branches/{bid}/products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    /// Signed so negative input can be reported with its own message.
    pub stock: Option<i64>,
}

/// Body of `PUT …/products/{pid}/stock`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: Option<i64>,
}

/// Body of every `PUT …/name` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNameRequest {
    pub name: Option<String>,
}

/// Checked product input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub stock: u32,
}

impl CreateFranchiseRequest {
    pub fn validate(self) -> Result<String, ValidationError> {
        checked_name(self.name, FRANCHISE_NAME_REQUIRED)
    }
}

impl CreateBranchRequest {
    pub fn validate(self) -> Result<String, ValidationError> {
        checked_name(self.name, BRANCH_NAME_REQUIRED)
    }
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        let mut violations = Vec::new();
        let name = self.name.unwrap_or_default();
        push_if_blank(&mut violations, "name", &name, PRODUCT_NAME_REQUIRED);
        let stock = checked_stock(self.stock, &mut violations);
        ValidationError::check(violations)?;
        Ok(NewProduct {
            name,
            stock: stock.unwrap_or_default(),
        })
    }
}

impl UpdateStockRequest {
    pub fn validate(self) -> Result<u32, ValidationError> {
        let mut violations = Vec::new();
        let stock = checked_stock(self.stock, &mut violations);
        ValidationError::check(violations)?;
        Ok(stock.unwrap_or_default())
    }
}

impl UpdateNameRequest {
    pub fn validate(self) -> Result<String, ValidationError> {
        checked_name(self.name, NAME_REQUIRED)
    }
}

fn checked_name(name: Option<String>, message: &str) -> Result<String, ValidationError> {
    let mut violations = Vec::new();
    let name = name.unwrap_or_default();
    push_if_blank(&mut violations, "name", &name, message);
    ValidationError::check(violations)?;
    Ok(name)
}

fn checked_stock(stock: Option<i64>, violations: &mut Vec<FieldViolation>) -> Option<u32> {
    let message = match stock {
        None => STOCK_REQUIRED,
        Some(value) if value < 0 => STOCK_NEGATIVE,
        Some(value) => match u32::try_from(value) {
            Ok(stock) => return Some(stock),
            Err(_) => STOCK_TOO_LARGE,
        },
    };
    violations.push(FieldViolation {
        field: "stock".to_string(),
        message: message.to_string(),
    });
    None
}
