use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{NewProduct, NewProductProps, Product};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger.info(&format!(
            "Creating product: {}",
            params.title.as_deref().unwrap_or_default()
        ));

        let new_product = NewProduct::new(NewProductProps {
            title: params.title,
            description: params.description,
            price: params.price,
            image: params.image,
        })
        .inspect_err(|e| self.logger.warn(&format!("Rejected product: {}", e)))?;

        self.logger.debug(&format!(
            "Storing product: title={:?} price={} image={:?}",
            new_product.title(),
            new_product.price(),
            new_product.image()
        ));

        let product = self
            .repository
            .create(&new_product)
            .await
            .inspect_err(|e| {
                self.logger.error(&format!(
                    "Failed to store product {}: {}",
                    new_product.title(),
                    e
                ))
            })?;

        self.logger.info(&format!(
            "Product created with id: {} ({})",
            product.id, product.price
        ));
        Ok(product)
    }
}
