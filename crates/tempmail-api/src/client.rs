//! HTTP client for the mailbox service.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::credentials::GeneratedCredentials;
use crate::error::{Error, Result};
use crate::types::{
    Account, Collection, Credentials, Domain, Message, MessageDetails, RegisteredAccount,
    TokenResponse,
};

/// Operations a disposable mailbox provider offers.
///
/// Every operation except [`create_account`](Self::create_account) is
/// authenticated with the account's bearer token. A rejected token surfaces as
/// [`Error::Unauthorized`].
#[async_trait]
pub trait MailboxService: Send + Sync {
    /// Registers a fresh account and obtains its token.
    async fn create_account(&self) -> Result<Account>;

    /// Deletes an account.
    async fn delete_account(&self, id: &str, token: &str) -> Result<()>;

    /// Lists the messages in the account's inbox.
    async fn messages(&self, token: &str) -> Result<Vec<Message>>;

    /// Fetches one message with its body.
    async fn message(&self, id: &str, token: &str) -> Result<MessageDetails>;
}

/// Client for a mail.tm-compatible REST API.
#[derive(Debug, Clone)]
pub struct MailTmClient {
    config: ClientConfig,
    http_client: Client,
}

impl MailTmClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Lists the domains the service offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn domains(&self) -> Result<Vec<Domain>> {
        let request = self.request(Method::GET, "domains", None)?;
        let domains: Collection<Domain> = decode(self.send(request).await?).await?;
        Ok(domains.into_inner())
    }

    /// Obtains a bearer token for an existing account.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails.
    pub async fn token(&self, address: &str, password: &str) -> Result<String> {
        let response: TokenResponse = self
            .post_json("token", &Credentials { address, password })
            .await?;
        Ok(response.token)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        let url = self.config.endpoint(path)?;
        let mut request = self
            .http_client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/ld+json"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        debug!(%method, %path, status = status.as_u16(), "mailbox service response");

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::from_status(status, &body))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, None)?.json(body);
        decode(self.send(request).await?).await
    }

    async fn pick_domain(&self) -> Result<Domain> {
        self.domains()
            .await?
            .into_iter()
            .find(Domain::is_usable)
            .ok_or(Error::NoDomains)
    }
}

#[async_trait]
impl MailboxService for MailTmClient {
    async fn create_account(&self) -> Result<Account> {
        let domain = self.pick_domain().await?;
        let creds = GeneratedCredentials::generate(&domain.domain);

        let registered: RegisteredAccount = self
            .post_json(
                "accounts",
                &Credentials {
                    address: &creds.address,
                    password: &creds.password,
                },
            )
            .await?;
        let token = self.token(&registered.address, &creds.password).await?;

        debug!(address = %registered.address, "account registered");
        Ok(Account {
            id: registered.id,
            address: registered.address,
            token,
            password: Some(creds.password),
        })
    }

    async fn delete_account(&self, id: &str, token: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("accounts/{id}"), Some(token))?;
        self.send(request).await?;
        Ok(())
    }

    async fn messages(&self, token: &str) -> Result<Vec<Message>> {
        let request = self.request(Method::GET, "messages", Some(token))?;
        let messages: Collection<Message> = decode(self.send(request).await?).await?;
        Ok(messages.into_inner())
    }

    async fn message(&self, id: &str, token: &str) -> Result<MessageDetails> {
        let request = self.request(Method::GET, &format!("messages/{id}"), Some(token))?;
        decode(self.send(request).await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
