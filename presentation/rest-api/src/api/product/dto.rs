use poem_openapi::Object;

use business::domain::product::model::Product;
use business::domain::product::use_cases::create::CreateProductParams;

/// Body of `POST /api/products`.
///
/// Every field is optional at the parsing level so that a missing field is
/// reported as a validation error rather than a parse error.
#[derive(Debug, Clone, Object)]
pub struct ProductCreationRequest {
    /// Product title (required, cannot be empty)
    pub title: Option<String>,
    /// Product description (required, cannot be empty)
    pub description: Option<String>,
    /// Price in US dollars (required, cannot be zero)
    pub price: Option<f64>,
    /// Image path or URL
    pub image: Option<String>,
}

impl From<ProductCreationRequest> for CreateProductParams {
    fn from(request: ProductCreationRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            price: request.price,
            image: request.image,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductCreationResponse {
    /// Identifier assigned by the database
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Image path or URL, null when none was given
    pub image: Option<String>,
}

impl From<Product> for ProductCreationResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price.value(),
            image: product.image,
        }
    }
}

/// Success envelope for `POST /api/products`.
#[derive(Debug, Clone, Object)]
pub struct CreateProductEnvelope {
    #[oai(rename = "productCreationResponse")]
    pub product_creation_response: ProductCreationResponse,
}

impl From<Product> for CreateProductEnvelope {
    fn from(product: Product) -> Self {
        Self {
            product_creation_response: product.into(),
        }
    }
}
