use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use sqlx::FromRow;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::value_objects::Price;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Result<Product, RepositoryError> {
        let price = self
            .price
            .to_f64()
            .filter(|p| p.is_finite())
            .ok_or(RepositoryError::Persistence)?;

        Ok(Product::from_repository(
            self.id,
            self.title,
            self.description,
            Price::from_repository(price),
            self.image,
            self.created_at,
        ))
    }
}

/// Converts a price to the `NUMERIC` column representation, keeping the
/// shortest decimal form of the amount (`9.99`, not its binary expansion).
pub fn price_to_decimal(price: Price) -> Result<BigDecimal, RepositoryError> {
    price
        .value()
        .to_string()
        .parse::<BigDecimal>()
        .map_err(|_| RepositoryError::Persistence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entity(price: &str) -> ProductEntity {
        ProductEntity {
            id: 7,
            title: "Mug".to_string(),
            description: "Ceramic mug".to_string(),
            price: BigDecimal::from_str(price).unwrap(),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn should_map_entity_into_domain() {
        let product = entity("9.99").into_domain().unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.title, "Mug");
        assert_eq!(product.description, "Ceramic mug");
        assert!((product.price.value() - 9.99).abs() < 1e-9);
        assert!(product.image.is_none());
    }

    #[test]
    fn should_keep_exact_binary_prices() {
        let product = entity("12.5").into_domain().unwrap();
        assert_eq!(product.price.value(), 12.5);
    }

    #[test]
    fn should_fail_with_persistence_error_when_price_overflows_f64() {
        let result = entity("1e400").into_domain();
        assert!(matches!(result, Err(RepositoryError::Persistence)));
    }

    #[test]
    fn should_convert_price_to_shortest_decimal() {
        let decimal = price_to_decimal(Price::from_repository(9.99)).unwrap();
        assert_eq!(decimal, BigDecimal::from_str("9.99").unwrap());
    }
}
