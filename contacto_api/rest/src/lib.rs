use std::net::SocketAddr;

use axum::{http::HeaderValue, Router};
use contacto_core_contact_contracts::ContactFeatureService;
use contacto_core_health_contracts::HealthFeatureService;
use contacto_di::Build;
use contacto_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Value of the `Origin` header browsers are allowed to send requests
    /// from.
    pub allowed_origin: HeaderValue,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "listening for http requests");
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::cors::add(self.config.allowed_origin))
            .apply(middlewares::trace::add)
            .apply(middlewares::request_id::add)
    }
}
