use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{NewProduct, Product};
use business::domain::product::repository::ProductRepository;

use super::entity::{ProductEntity, price_to_decimal};

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %err, "product query failed");
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Duplicated,
        _ => RepositoryError::DatabaseError,
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            r#"INSERT INTO products (title, description, price, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, price, image, created_at"#,
        )
        .bind(product.title())
        .bind(product.description())
        .bind(price_to_decimal(product.price())?)
        .bind(product.image())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        entity.into_domain()
    }
}
