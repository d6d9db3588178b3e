//! Franchise aggregate: franchise → branches → products.
//!
//! # Responsibility
//! - Define the persisted document shape for one franchise.
//! - Provide id-based lookup helpers over the embedded collections.
//! - Compute the top-stocked product of each branch.
//!
//! # Invariants
//! - Names are never blank at any level (see `Franchise::validate`).
//! - Branch and product ids are random UUID v4 strings, unique within parent.
//! - The franchise is the only unit of persistence; branches and products
//!   never exist outside their parent document.

use crate::model::validation::{
    push_if_blank, ValidationError, BRANCH_NAME_REQUIRED, FRANCHISE_NAME_REQUIRED,
    PRODUCT_NAME_REQUIRED,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned franchise identifier. Empty until first save.
pub type FranchiseId = String;
/// Branch identifier, unique within its franchise.
pub type BranchId = String;
/// Product identifier, unique within its branch.
pub type ProductId = String;

/// Top-level aggregate owning an ordered list of branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franchise {
    /// Assigned by the repository on first save.
    pub id: FranchiseId,
    pub name: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

/// Branch owned by exactly one franchise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Product with a non-negative stock count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub stock: u32,
}

/// Top-stocked product of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock: u32,
    pub branch_id: BranchId,
    pub branch_name: String,
}

impl Franchise {
    /// Creates an unsaved franchise with no branches.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(String::new(), name)
    }

    /// Creates a franchise with a caller-provided id.
    pub fn with_id(id: impl Into<FranchiseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            branches: Vec::new(),
        }
    }

    /// Whether the repository has assigned an id yet.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn branch(&self, branch_id: &str) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.id == branch_id)
    }

    pub fn branch_mut(&mut self, branch_id: &str) -> Option<&mut Branch> {
        self.branches.iter_mut().find(|branch| branch.id == branch_id)
    }

    /// Checks the name invariant across the whole tree.
    ///
    /// Reports every blank name, using indexed paths for nested entries.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        push_if_blank(&mut violations, "name", &self.name, FRANCHISE_NAME_REQUIRED);
        for (branch_index, branch) in self.branches.iter().enumerate() {
            push_if_blank(
                &mut violations,
                format!("branches[{branch_index}].name"),
                &branch.name,
                BRANCH_NAME_REQUIRED,
            );
            for (product_index, product) in branch.products.iter().enumerate() {
                push_if_blank(
                    &mut violations,
                    format!("branches[{branch_index}].products[{product_index}].name"),
                    &product.name,
                    PRODUCT_NAME_REQUIRED,
                );
            }
        }
        ValidationError::check(violations)
    }

    /// One entry per branch that has products, in branch order.
    ///
    /// Branches without products are skipped.
    pub fn top_products(&self) -> Vec<TopProduct> {
        self.branches
            .iter()
            .filter_map(|branch| {
                branch.top_product().map(|product| TopProduct {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    stock: product.stock,
                    branch_id: branch.id.clone(),
                    branch_name: branch.name.clone(),
                })
            })
            .collect()
    }
}

impl Branch {
    /// Creates a branch with a generated id and no products.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: impl Into<BranchId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            products: Vec::new(),
        }
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn product_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        self.products
            .iter_mut()
            .find(|product| product.id == product_id)
    }

    /// Removes every product with `product_id`; returns whether any matched.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|product| product.id != product_id);
        self.products.len() != before
    }

    /// Product with the highest stock; the earliest one wins ties.
    ///
    /// `Iterator::max_by_key` keeps the last maximum, so the scan only
    /// replaces the current best on a strictly greater stock.
    pub fn top_product(&self) -> Option<&Product> {
        self.products
            .iter()
            .reduce(|best, candidate| {
                if candidate.stock > best.stock {
                    candidate
                } else {
                    best
                }
            })
    }
}

impl Product {
    /// Creates a product with a generated id.
    pub fn new(name: impl Into<String>, stock: u32) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, stock)
    }

    pub fn with_id(id: impl Into<ProductId>, name: impl Into<String>, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stock,
        }
    }
}
