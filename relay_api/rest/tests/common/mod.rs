use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use relay_api_rest::{RestServer, RestServerConfig};
use relay_core_contact_contracts::ContactFeatureService;
use relay_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use relay_core_health_contracts::HealthFeatureService;
use relay_email_contracts::{Email, MockEmailService};
use relay_email_impl::template::TemplateEmailServiceImpl;
use relay_shared_impl::time::TimeServiceImpl;
use relay_templates_impl::TemplateServiceImpl;
use tokio::net::TcpListener;

pub const CONTACT_PATH: &str = "/send_contact.php";
pub const OPERATOR: &str = "Jasmine Dom Pied <jasminedompied@example.com>";

pub type Outbox = Arc<Mutex<Vec<Email>>>;

/// Mocked smtp transport recording every email handed to it.
pub fn recording_email(result: fn() -> anyhow::Result<bool>) -> (MockEmailService, Outbox) {
    let outbox = Outbox::default();
    let mut email = MockEmailService::new();
    email.expect_send().returning({
        let outbox = Arc::clone(&outbox);
        move |email| {
            outbox.lock().unwrap().push(email);
            Box::pin(std::future::ready(result()))
        }
    });
    (email, outbox)
}

pub fn contact_service(
    email: MockEmailService,
) -> ContactFeatureServiceImpl<
    TimeServiceImpl,
    TemplateEmailServiceImpl<MockEmailService, TemplateServiceImpl>,
> {
    ContactFeatureServiceImpl::new(
        TimeServiceImpl,
        TemplateEmailServiceImpl::new(email, TemplateServiceImpl::new().unwrap()),
        ContactFeatureConfig {
            operator: Arc::new(OPERATOR.parse().unwrap()),
        },
    )
}

/// Start a server on an ephemeral port and return its address.
pub async fn spawn(
    health: impl HealthFeatureService,
    contact: impl ContactFeatureService,
    static_dir: Option<PathBuf>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = RestServer::new(
        health,
        contact,
        RestServerConfig {
            addr,
            contact_path: CONTACT_PATH.into(),
            static_dir,
        },
    );
    tokio::spawn(server.serve_with_listener(listener));
    addr
}
