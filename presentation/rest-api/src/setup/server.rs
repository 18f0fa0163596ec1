use std::time::Duration;

use poem::{EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing};
use poem_openapi::OpenApiService;

use crate::api::health::routes::HealthApi;
use crate::api::product::routes::ProductApi;
use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub const API_PREFIX: &str = "/api";
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let api_service = Self::api_service(
            container.health_api,
            container.product_api,
            &format!("http://{}{}", addr, API_PREFIX),
        );
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest(API_PREFIX, api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .with(config.cors)
            .with(Tracing);

        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        tracing::info!("OpenAPI JSON at http://{}/openapi.json", addr);

        PoemServer::new(TcpListener::bind(&addr))
            .run_with_graceful_shutdown(
                app,
                async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %e, "failed to listen for shutdown signal");
                    }
                    tracing::info!("shutdown signal received");
                },
                Some(SHUTDOWN_TIMEOUT),
            )
            .await?;
        Ok(())
    }

    pub fn api_service(
        health_api: HealthApi,
        product_api: ProductApi,
        server_url: &str,
    ) -> OpenApiService<(HealthApi, ProductApi), ()> {
        OpenApiService::new(
            (health_api, product_api),
            "Storefront Product API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(server_url)
    }
}
