use chrono::{DateTime, Utc};

use super::errors::ProductError;
use super::value_objects::Price;

/// A product as stored by the repository, with its assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw product fields as submitted by a client; any of them may be missing.
#[derive(Debug, Clone, Default)]
pub struct NewProductProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

/// Validated creation payload handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    title: String,
    description: String,
    price: Price,
    image: Option<String>,
}

impl NewProduct {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        let title = props.title.filter(|t| !t.is_empty());
        let description = props.description.filter(|d| !d.is_empty());
        let price = props.price.and_then(Price::new);

        match (title, description, price) {
            (Some(title), Some(description), Some(price)) => Ok(Self {
                title,
                description,
                price,
                image: props.image,
            }),
            _ => Err(ProductError::MissingRequiredFields),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl Product {
    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: i32,
        title: String,
        description: String,
        price: Price,
        image: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price,
            image,
            created_at,
        }
    }
}
