//! Franchise use-case service.
//!
//! # Responsibility
//! - Provide the create/read/update/delete operations over the franchise tree.
//! - Resolve nested branches/products by id and map misses to not-found errors.
//!
//! # Invariants
//! - Every write is load → locate → mutate in memory → save whole franchise.
//! - Nothing is saved when a lookup or validation fails.
//! - No locking or version check: concurrent writers follow last-write-wins.

use crate::model::franchise::{
    Branch, BranchId, Franchise, FranchiseId, Product, ProductId, TopProduct,
};
use crate::model::validation::{
    require_name, ValidationError, BRANCH_NAME_REQUIRED, FRANCHISE_NAME_REQUIRED,
    PRODUCT_NAME_REQUIRED,
};
use crate::repo::franchise_repo::{FranchiseRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, FranchiseServiceError>;

/// Errors from franchise service operations.
#[derive(Debug)]
pub enum FranchiseServiceError {
    /// Input or resulting document broke a model invariant.
    Validation(ValidationError),
    FranchiseNotFound(FranchiseId),
    BranchNotFound(BranchId),
    ProductNotFound(ProductId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl FranchiseServiceError {
    /// Whether the error names a missing franchise, branch, or product.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FranchiseNotFound(_) | Self::BranchNotFound(_) | Self::ProductNotFound(_)
        )
    }
}

impl Display for FranchiseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::FranchiseNotFound(id) => write!(f, "Franchise not found with id: {id}"),
            Self::BranchNotFound(id) => write!(f, "Branch not found with id: {id}"),
            Self::ProductNotFound(id) => write!(f, "Product not found with id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FranchiseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for FranchiseServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for FranchiseServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Franchise operations facade over a document repository.
pub struct FranchiseService<R: FranchiseRepository> {
    repo: R,
}

impl<R: FranchiseRepository> FranchiseService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and stores a franchise with no branches.
    pub async fn create_franchise(&self, name: impl Into<String>) -> ServiceResult<Franchise> {
        let name = require_name(name.into(), FRANCHISE_NAME_REQUIRED)?;
        let saved = self.repo.save(Franchise::new(name)).await?;
        info!(
            "event=franchise_create module=service status=ok franchise_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Lists every stored franchise in store order.
    pub async fn list_franchises(&self) -> ServiceResult<Vec<Franchise>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_franchise(&self, franchise_id: &str) -> ServiceResult<Franchise> {
        self.load(franchise_id).await
    }

    pub async fn rename_franchise(
        &self,
        franchise_id: &str,
        name: impl Into<String>,
    ) -> ServiceResult<Franchise> {
        let name = require_name(name.into(), FRANCHISE_NAME_REQUIRED)?;
        let mut franchise = self.load(franchise_id).await?;
        franchise.name = name;
        self.persist(franchise, "franchise_rename").await
    }

    /// Appends a new branch with a generated id and no products.
    pub async fn add_branch(
        &self,
        franchise_id: &str,
        name: impl Into<String>,
    ) -> ServiceResult<Franchise> {
        let name = require_name(name.into(), BRANCH_NAME_REQUIRED)?;
        let mut franchise = self.load(franchise_id).await?;
        franchise.branches.push(Branch::new(name));
        self.persist(franchise, "branch_add").await
    }

    pub async fn rename_branch(
        &self,
        franchise_id: &str,
        branch_id: &str,
        name: impl Into<String>,
    ) -> ServiceResult<Franchise> {
        let name = require_name(name.into(), BRANCH_NAME_REQUIRED)?;
        let mut franchise = self.load(franchise_id).await?;
        find_branch(&mut franchise, branch_id)?.name = name;
        self.persist(franchise, "branch_rename").await
    }

    /// Appends a new product with a generated id to one branch.
    pub async fn add_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        name: impl Into<String>,
        stock: u32,
    ) -> ServiceResult<Franchise> {
        let name = require_name(name.into(), PRODUCT_NAME_REQUIRED)?;
        let mut franchise = self.load(franchise_id).await?;
        find_branch(&mut franchise, branch_id)?
            .products
            .push(Product::new(name, stock));
        self.persist(franchise, "product_add").await
    }

    /// Removes one product; `ProductNotFound` when no product matched.
    pub async fn remove_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> ServiceResult<Franchise> {
        let mut franchise = self.load(franchise_id).await?;
        if !find_branch(&mut franchise, branch_id)?.remove_product(product_id) {
            return Err(FranchiseServiceError::ProductNotFound(product_id.to_string()));
        }
        self.persist(franchise, "product_remove").await
    }

    pub async fn update_product_stock(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        stock: u32,
    ) -> ServiceResult<Franchise> {
        let mut franchise = self.load(franchise_id).await?;
        find_product(find_branch(&mut franchise, branch_id)?, product_id)?.stock = stock;
        self.persist(franchise, "product_stock_update").await
    }

    pub async fn rename_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        name: impl Into<String>,
    ) -> ServiceResult<Franchise> {
        let name = require_name(name.into(), PRODUCT_NAME_REQUIRED)?;
        let mut franchise = self.load(franchise_id).await?;
        find_product(find_branch(&mut franchise, branch_id)?, product_id)?.name = name;
        self.persist(franchise, "product_rename").await
    }

    /// Top-stocked product of every branch that has products.
    ///
    /// Ties go to the product inserted first; empty branches are skipped.
    pub async fn top_products_by_branch(
        &self,
        franchise_id: &str,
    ) -> ServiceResult<Vec<TopProduct>> {
        let franchise = self.load(franchise_id).await?;
        Ok(franchise.top_products())
    }

    async fn load(&self, franchise_id: &str) -> ServiceResult<Franchise> {
        self.repo
            .find_by_id(franchise_id)
            .await?
            .ok_or_else(|| FranchiseServiceError::FranchiseNotFound(franchise_id.to_string()))
    }

    async fn persist(&self, franchise: Franchise, event: &str) -> ServiceResult<Franchise> {
        let saved = self.repo.save(franchise).await?;
        info!(
            "event={event} module=service status=ok franchise_id={}",
            saved.id
        );
        Ok(saved)
    }
}

fn find_branch<'a>(franchise: &'a mut Franchise, branch_id: &str) -> ServiceResult<&'a mut Branch> {
    franchise
        .branch_mut(branch_id)
        .ok_or_else(|| FranchiseServiceError::BranchNotFound(branch_id.to_string()))
}

fn find_product<'a>(branch: &'a mut Branch, product_id: &str) -> ServiceResult<&'a mut Product> {
    branch
        .product_mut(product_id)
        .ok_or_else(|| FranchiseServiceError::ProductNotFound(product_id.to_string()))
}
