use std::{future::Future, sync::LazyLock};

use relay_utils::relay_version;
use serde_json::Value;
use url::Url;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let version = relay_version();

    format!("Contact Relay Client ({homepage}, Version {version})")
});

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Post the form to the relay endpoint.
    ///
    /// Only transport failures are errors; any http status is returned.
    fn post(
        &self,
        form: ContactFormData,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub accepted_terms: bool,
    /// Honeypot, empty unless filled in by a bot.
    pub website: String,
}

impl ContactFormData {
    /// Urlencoded fields, mirroring what a browser sends for the form.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("nom", self.name.as_str()),
            ("email", self.email.as_str()),
            ("objet", self.subject.as_str()),
            ("message", self.message.as_str()),
        ];
        if self.accepted_terms {
            fields.push(("conditions", "on"));
        }
        fields.push(("website", self.website.as_str()));
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactApiResponse {
    pub status: u16,
    pub body: ContactApiResponseBody,
}

impl ContactApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactApiResponseBody {
    /// The body is not valid json.
    Unreadable,
    /// Valid json that is not an object, e.g. `null` or `[]`.
    Unexpected,
    Object {
        /// `None` unless the `success` member is a boolean.
        success: Option<bool>,
        message: Option<String>,
    },
}

impl ContactApiResponseBody {
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(object)) => Self::Object {
                success: object.get("success").and_then(Value::as_bool),
                message: object
                    .get("message")
                    .and_then(Value::as_str)
                    .map(Into::into),
            },
            Ok(_) => Self::Unexpected,
            Err(_) => Self::Unreadable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    client: reqwest::Client,
    endpoint: Url,
}

impl ContactApiServiceImpl {
    pub fn new(endpoint: Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn post(&self, form: ContactFormData) -> anyhow::Result<ContactApiResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&form.fields())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(ContactApiResponse {
            status,
            body: ContactApiResponseBody::parse(&body),
        })
    }
}

#[cfg(any(test, feature = "mock"))]
impl MockContactApiService {
    pub fn with_post(
        mut self,
        form: ContactFormData,
        result: anyhow::Result<ContactApiResponse>,
    ) -> Self {
        self.expect_post()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
