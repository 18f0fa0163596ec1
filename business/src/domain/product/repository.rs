use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::{NewProduct, Product};

/// Persistence port. Stores a validated product and returns the stored
/// record with its assigned identifier.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
}
