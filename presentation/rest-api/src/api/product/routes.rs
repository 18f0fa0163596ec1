use std::sync::Arc;

use poem::http::StatusCode;
use poem_openapi::{ApiResponse, OpenApi, payload::Json};

use business::domain::product::use_cases::create::CreateProductUseCase;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{CreateProductEnvelope, ProductCreationRequest};
use crate::api::tags::ApiTags;

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
}

impl ProductApi {
    pub fn new(create_use_case: Arc<dyn CreateProductUseCase>) -> Self {
        Self { create_use_case }
    }
}

/// Product catalogue API
#[OpenApi]
impl ProductApi {
    /// Create a new product
    ///
    /// Validates that title, description and price are present, stores the
    /// product and returns it with its assigned identifier. Not idempotent:
    /// submitting the same body twice creates two products.
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn create_product(&self, body: Json<ProductCreationRequest>) -> CreateProductResponse {
        match self.create_use_case.execute(body.0.into()).await {
            Ok(product) => CreateProductResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                if status == StatusCode::BAD_REQUEST {
                    CreateProductResponse::BadRequest(json)
                } else {
                    CreateProductResponse::InternalError(json)
                }
            }
        }
    }
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "create_product_bad_request")]
pub enum CreateProductResponse {
    #[oai(status = 200)]
    Ok(Json<CreateProductEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

/// Unparseable bodies are client errors, reported in the same shape as
/// validation failures.
fn create_product_bad_request(err: poem::Error) -> CreateProductResponse {
    CreateProductResponse::BadRequest(Json(ErrorResponse {
        name: "ParseError".to_string(),
        message: err.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use poem::{Route, test::TestClient};
    use poem_openapi::OpenApiService;
    use serde_json::json;

    use business::application::product::create::CreateProductUseCaseImpl;
    use business::domain::errors::RepositoryError;
    use business::domain::product::errors::MISSING_REQUIRED_FIELDS_MESSAGE;
    use business::domain::product::model::{NewProduct, Product};
    use business::domain::product::repository::ProductRepository;
    use logger::TracingLogger;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
        }
    }

    fn stored(id: i32, product: &NewProduct) -> Product {
        Product::from_repository(
            id,
            product.title().to_string(),
            product.description().to_string(),
            product.price(),
            product.image().map(str::to_string),
            Utc::now(),
        )
    }

    fn client(repo: MockProductRepo) -> TestClient<Route> {
        let api = ProductApi::new(Arc::new(CreateProductUseCaseImpl {
            repository: Arc::new(repo),
            logger: Arc::new(TracingLogger),
        }));
        let service = OpenApiService::new(api, "test", "0.0.0");
        TestClient::new(Route::new().nest("/api", service))
    }

    fn rejecting_repo() -> MockProductRepo {
        let mut repo = MockProductRepo::new();
        repo.expect_create().never();
        repo
    }

    #[tokio::test]
    async fn should_return_created_product_in_envelope() {
        let mut repo = MockProductRepo::new();
        repo.expect_create().times(1).returning(|p| Ok(stored(17, p)));
        let cli = client(repo);

        let resp = cli
            .post("/api/products")
            .body_json(&json!({
                "title": "Mug",
                "description": "Ceramic mug",
                "price": 9.99,
                "image": "mug.png"
            }))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.assert_json(json!({
            "productCreationResponse": {
                "id": 17,
                "title": "Mug",
                "description": "Ceramic mug",
                "price": 9.99,
                "image": "mug.png"
            }
        }))
        .await;
    }

    #[tokio::test]
    async fn should_return_null_image_when_omitted() {
        let mut repo = MockProductRepo::new();
        repo.expect_create().times(1).returning(|p| Ok(stored(3, p)));
        let cli = client(repo);

        let resp = cli
            .post("/api/products")
            .body_json(&json!({
                "title": "Mug",
                "description": "Ceramic mug",
                "price": 4
            }))
            .send()
            .await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let product = json.value().object().get("productCreationResponse");
        product.object().get("id").assert_i64(3);
        product.object().get("image").assert_null();
    }

    #[tokio::test]
    async fn should_reject_empty_title_with_fixed_message() {
        let cli = client(rejecting_repo());

        let resp = cli
            .post("/api/products")
            .body_json(&json!({
                "title": "",
                "description": "x",
                "price": 5,
                "image": ""
            }))
            .send()
            .await;

        resp.assert_status(poem::http::StatusCode::BAD_REQUEST);
        resp.assert_json(json!({
            "name": "ValidationError",
            "message": MISSING_REQUIRED_FIELDS_MESSAGE
        }))
        .await;
    }

    #[tokio::test]
    async fn should_accept_whitespace_only_title() {
        let mut repo = MockProductRepo::new();
        repo.expect_create().times(1).returning(|p| Ok(stored(5, p)));
        let cli = client(repo);

        let resp = cli
            .post("/api/products")
            .body_json(&json!({
                "title": "   ",
                "description": "b",
                "price": 5
            }))
            .send()
            .await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let product = json.value().object().get("productCreationResponse");
        product.object().get("id").assert_i64(5);
        product.object().get("title").assert_string("   ");
    }

    #[tokio::test]
    async fn should_reject_zero_price() {
        let cli = client(rejecting_repo());

        let resp = cli
            .post("/api/products")
            .body_json(&json!({
                "title": "Mug",
                "description": "Ceramic mug",
                "price": 0
            }))
            .send()
            .await;

        resp.assert_status(poem::http::StatusCode::BAD_REQUEST);
        let json = resp.json().await;
        json.value()
            .object()
            .get("message")
            .assert_string(MISSING_REQUIRED_FIELDS_MESSAGE);
    }

    #[tokio::test]
    async fn should_reject_absent_description() {
        let cli = client(rejecting_repo());

        let resp = cli
            .post("/api/products")
            .body_json(&json!({ "title": "Mug", "price": 9.99 }))
            .send()
            .await;

        resp.assert_status(poem::http::StatusCode::BAD_REQUEST);
        let json = resp.json().await;
        json.value()
            .object()
            .get("name")
            .assert_string("ValidationError");
    }

    #[tokio::test]
    async fn should_reject_malformed_body_as_client_error() {
        let cli = client(rejecting_repo());

        let resp = cli
            .post("/api/products")
            .content_type("application/json")
            .body("{\"title\": \"Mug\",")
            .send()
            .await;

        resp.assert_status(poem::http::StatusCode::BAD_REQUEST);
        let json = resp.json().await;
        json.value().object().get("name").assert_string("ParseError");
    }

    #[tokio::test]
    async fn should_surface_persistence_failure_as_server_error() {
        let mut repo = MockProductRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(RepositoryError::DatabaseError));
        let cli = client(repo);

        let resp = cli
            .post("/api/products")
            .body_json(&json!({
                "title": "Mug",
                "description": "Ceramic mug",
                "price": 9.99,
                "image": "mug.png"
            }))
            .send()
            .await;

        resp.assert_status(poem::http::StatusCode::INTERNAL_SERVER_ERROR);
        resp.assert_json(json!({
            "name": "InternalError",
            "message": "repository.persistence"
        }))
        .await;
    }

    #[tokio::test]
    async fn should_create_two_products_for_the_same_body() {
        let next_id = Arc::new(AtomicI32::new(100));
        let ids = next_id.clone();
        let mut repo = MockProductRepo::new();
        repo.expect_create()
            .times(2)
            .returning(move |p| Ok(stored(ids.fetch_add(1, Ordering::SeqCst), p)));
        let cli = client(repo);
        let body = json!({
            "title": "Mug",
            "description": "Ceramic mug",
            "price": 9.99,
            "image": "mug.png"
        });

        let first = cli.post("/api/products").body_json(&body).send().await;
        first.assert_status_is_ok();
        first
            .json()
            .await
            .value()
            .object()
            .get("productCreationResponse")
            .object()
            .get("id")
            .assert_i64(100);

        let second = cli.post("/api/products").body_json(&body).send().await;
        second.assert_status_is_ok();
        second
            .json()
            .await
            .value()
            .object()
            .get("productCreationResponse")
            .object()
            .get("id")
            .assert_i64(101);
    }
}
