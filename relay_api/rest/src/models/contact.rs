use relay_models::contact::ContactSubmission;
use serde::Deserialize;

/// Fields of the contact form as posted by the website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiContactForm {
    pub nom: Option<String>,
    pub email: Option<String>,
    pub objet: Option<String>,
    pub message: Option<String>,
    /// Checkbox, only sent by browsers when checked.
    pub conditions: Option<String>,
    /// Honeypot
    pub website: Option<String>,
}

impl ApiContactForm {
    pub fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "nom" => &mut self.nom,
            "email" => &mut self.email,
            "objet" => &mut self.objet,
            "message" => &mut self.message,
            "conditions" => &mut self.conditions,
            "website" => &mut self.website,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl From<ApiContactForm> for ContactSubmission {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.nom,
            email: value.email,
            subject: value.objet,
            message: value.message,
            accepted_terms: value.conditions.is_some(),
            honeypot: value.website,
        }
    }
}
