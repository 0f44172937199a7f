use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::Router;
use relay_core_contact_contracts::ContactFeatureService;
use relay_core_health_contracts::HealthFeatureService;
use relay_utils::Apply;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

mod errors;
mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Path of the contact form endpoint, e.g. `/send_contact.php`.
    pub contact_path: String,
    /// Directory served for every request that matches no route.
    pub static_dir: Option<PathBuf>,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        self.serve_with_listener(listener).await
    }

    pub async fn serve_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("Starting http server on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .await
            .map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let RestServerConfig {
            contact_path,
            static_dir,
            ..
        } = self.config;

        let router = Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .merge(routes::contact::router(&contact_path, Arc::new(self.contact)))
            .apply_map(static_dir, |router, dir| {
                router.fallback_service(ServeDir::new(dir))
            });

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
