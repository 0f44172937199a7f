use std::sync::Arc;

use relay_api_rest::RestServerConfig;
use relay_config::Config;
use relay_core_contact_impl::ContactFeatureConfig;
use relay_core_health_impl::HealthFeatureConfig;
use types::{ContactFeature, Email, HealthFeature, RestServer, Template, TemplateEmail, Time};

pub mod types;

/// Wire all services of the relay around an smtp connection.
pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let template = Template::new()?;
    let template_email = TemplateEmail::new(email.clone(), template);

    let contact = ContactFeature::new(
        Time::default(),
        template_email,
        ContactFeatureConfig {
            operator: Arc::new(config.contact.operator.clone()),
        },
    );

    let health = HealthFeature::new(
        Time::default(),
        email,
        HealthFeatureConfig {
            cache_ttl: *config.health.cache_ttl,
        },
    );

    Ok(RestServer::new(
        health,
        contact,
        RestServerConfig {
            addr: config.http.address,
            contact_path: config.contact.path.clone(),
            static_dir: config.http.static_dir.clone(),
        },
    ))
}

