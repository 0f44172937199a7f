use relay_core_contact_impl::ContactFeatureServiceImpl;
use relay_core_health_impl::HealthFeatureServiceImpl;
use relay_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use relay_shared_impl::time::TimeServiceImpl;
use relay_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = relay_api_rest::RestServer<HealthFeature, ContactFeature>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Time, TemplateEmail>;
pub type HealthFeature = HealthFeatureServiceImpl<Time, Email>;

// Email
pub type Email = EmailServiceImpl;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Shared
pub type Time = TimeServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;
