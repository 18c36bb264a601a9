use contacto_core_contact_impl::ContactFeatureServiceImpl;
use contacto_core_health_impl::HealthFeatureServiceImpl;
use contacto_email_impl::EmailServiceImpl;

// API
pub type RestServer = contacto_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
