//! The authenticated API client.
//!
//! Every operation validates its inputs, sends exactly one request with the
//! `x-api-key` header, and classifies the response status through
//! [`ApiError::check`].

mod endpoints;
mod request;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use crate::auth::Credentials;
use crate::collection::Collection;
use crate::error::{ApiError, Error, InvalidArgumentError};
use crate::query::QueryFilter;
use crate::record::Record;
use crate::types::{BaseUrl, path_segment};

use endpoints::{CollectionRequest, DocumentRequest};
use request::{Method, Request, Response};

/// Header carrying the project API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const USER_AGENT: &str = concat!("cocobase-rs/", env!("CARGO_PKG_VERSION"));

/// Client for one Cocobase project.
///
/// The client holds only immutable state (credentials, base URL and the
/// transport handle), so it is cheap to clone and safe to share across
/// tasks. It keeps no cache and never retries.
///
/// # Example
///
/// ```no_run
/// use cocobase::{Client, QueryFilter};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), cocobase::Error> {
/// let client = Client::new("ck_live_123")?;
///
/// let doc = client
///     .create_document("col_1", &json!({"name": "Ada", "age": 36}))
///     .await?;
///
/// let adults = QueryFilter::new().greater_or_equal("age", 18)?;
/// for record in client.list_documents("col_1", Some(&adults)).await? {
///     println!("{}: {:?}", record.id(), record.get_string("name"));
/// }
///
/// client.delete_document("col_1", doc.id()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base: BaseUrl,
    credentials: Credentials,
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    api_key: String,
    token: Option<String>,
    base: Option<BaseUrl>,
    http: Option<reqwest::Client>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Store a bearer token with the client. No request sends it.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Talk to a service other than the hosted API.
    pub fn base_url(mut self, base: BaseUrl) -> Self {
        self.base = Some(base);
        self
    }

    /// Use a pre-configured transport (timeouts, proxies, pooling).
    ///
    /// The user agent setting is ignored when a transport is supplied.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or not a legal header
    /// value, or if the default transport cannot be constructed.
    pub fn build(self) -> Result<Client, Error> {
        let mut credentials = Credentials::new(self.api_key)?;
        if let Some(token) = self.token {
            credentials = credentials.with_token(token);
        }

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
                .build()?,
        };

        Ok(Client {
            http,
            base: self.base.unwrap_or_default(),
            credentials,
        })
    }
}

impl Client {
    /// Create a client for the hosted service.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or not a legal header value.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Start configuring a client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.into(),
            token: None,
            base: None,
            http: None,
            user_agent: None,
        }
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    /// Returns the stored credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Create a collection, optionally with a webhook.
    ///
    /// Expects `201 Created`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn create_collection(
        &self,
        name: &str,
        webhook_url: Option<&str>,
    ) -> Result<Collection, Error> {
        if name.trim().is_empty() {
            return Err(InvalidArgumentError::Required {
                name: "collection name",
            }
            .into());
        }

        let body = to_body(&CollectionRequest {
            name: Some(name),
            webhook_url,
        })?;
        let request = Request::new(Method::Post, endpoints::COLLECTIONS, Some(body))?;

        debug!("Creating collection");
        let body = self.call(request, &[201]).await?;
        decode(body)
    }

    /// Rename a collection and/or change its webhook.
    ///
    /// At least one of `name` and `webhook_url` is required. Expects `200 OK`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn update_collection(
        &self,
        collection_id: &str,
        name: Option<&str>,
        webhook_url: Option<&str>,
    ) -> Result<Collection, Error> {
        let collection_id = path_segment("collection id", collection_id)?;
        if name.is_none() && webhook_url.is_none() {
            return Err(InvalidArgumentError::EmptyCollectionUpdate.into());
        }

        let body = to_body(&CollectionRequest { name, webhook_url })?;
        let request = Request::new(
            Method::Post,
            endpoints::collection(collection_id),
            Some(body),
        )?;

        debug!("Updating collection");
        let body = self.call(request, &[200]).await?;
        decode(body)
    }

    /// Delete a collection. Returns `true` on `204 No Content`.
    ///
    /// The service takes collection deletion as a bodiless POST to the
    /// collection path, the same path updates use.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete_collection(&self, collection_id: &str) -> Result<bool, Error> {
        let collection_id = path_segment("collection id", collection_id)?;
        let request = Request::new(Method::Post, endpoints::collection(collection_id), None)?;

        debug!("Deleting collection");
        self.call(request, &[204]).await?;
        Ok(true)
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Store a new document. `data` must serialize to a JSON object.
    ///
    /// Expects `201 Created`.
    #[instrument(skip(self, data), fields(base = %self.base))]
    pub async fn create_document<T>(&self, collection_id: &str, data: &T) -> Result<Record, Error>
    where
        T: Serialize + ?Sized,
    {
        let collection_id = path_segment("collection id", collection_id)?;
        let data = to_fields(data)?;
        let body = to_body(&DocumentRequest { data: &data })?;
        let request = Request::new(
            Method::Post,
            endpoints::create_document(collection_id),
            Some(body),
        )?;

        debug!(fields = data.len(), "Creating document");
        let body = self.call(request, &[201]).await?;
        decode(body)
    }

    /// List the documents of a collection, optionally filtered.
    ///
    /// Records come back in the order the service returns them.
    #[instrument(skip(self, filter), fields(base = %self.base, predicates = tracing::field::Empty))]
    pub async fn list_documents(
        &self,
        collection_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<Vec<Record>, Error> {
        let collection_id = path_segment("collection id", collection_id)?;

        let mut path = endpoints::documents(collection_id);
        if let Some(filter) = filter {
            tracing::Span::current().record("predicates", filter.len());
            let query = filter.build();
            if !query.is_empty() {
                path.push('?');
                path.push_str(&query);
            }
        }
        let request = Request::new(Method::Get, path, None)?;

        debug!("Listing documents");
        let body = self.call(request, &[200]).await?;
        let records: Vec<Record> = decode(body)?;
        trace!(count = records.len(), "Documents listed");
        Ok(records)
    }

    /// Fetch one document. Expects `200 OK`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Record, Error> {
        let collection_id = path_segment("collection id", collection_id)?;
        let document_id = path_segment("document id", document_id)?;
        let request = Request::new(
            Method::Get,
            endpoints::document(collection_id, document_id),
            None,
        )?;

        debug!("Getting document");
        let body = self.call(request, &[200]).await?;
        decode(body)
    }

    /// Delete one document.
    ///
    /// Returns `true` on `200` or `204`. Unlike every other operation, a
    /// status outside the known error table (404, 403, ...) is reported as
    /// `Ok(false)` rather than [`ApiError::UnexpectedStatus`]. `400`, `422`
    /// and `500` still fail, as do invalid ids and transport errors.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<bool, Error> {
        let collection_id = path_segment("collection id", collection_id)?;
        let document_id = path_segment("document id", document_id)?;
        let request = Request::new(
            Method::Delete,
            endpoints::document(collection_id, document_id),
            None,
        )?;

        debug!("Deleting document");
        match self.call(request, &[200, 204]).await {
            Ok(_) => Ok(true),
            Err(Error::Api(err)) if err.is_unexpected_status() => {
                debug!(status = err.status(), "Document not deleted");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Replace a document's content. `data` must serialize to a JSON object.
    ///
    /// Expects `200 OK` and returns the stored document.
    #[instrument(skip(self, data), fields(base = %self.base))]
    pub async fn update_document<T>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &T,
    ) -> Result<Record, Error>
    where
        T: Serialize + ?Sized,
    {
        let collection_id = path_segment("collection id", collection_id)?;
        let document_id = path_segment("document id", document_id)?;
        let data = to_fields(data)?;
        let body = to_body(&DocumentRequest { data: &data })?;
        let request = Request::new(
            Method::Patch,
            endpoints::document(collection_id, document_id),
            Some(body),
        )?;

        debug!(fields = data.len(), "Updating document");
        let body = self.call(request, &[200]).await?;
        decode(body)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send a request and classify the status against `accepted`.
    async fn call(&self, request: Request, accepted: &[u16]) -> Result<String, Error> {
        let response = self.dispatch(request).await?;
        Ok(ApiError::check(response.status, accepted, response.body)?)
    }

    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn dispatch(&self, request: Request) -> Result<Response, Error> {
        let url = self.base.resolve(&request.path);
        trace!(%url, "Sending request");

        let mut builder = self
            .http
            .request(request.method.into(), &url)
            .header(API_KEY_HEADER, self.credentials.api_key().header_value());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        trace!(status, bytes = body.len(), "Response received");
        Ok(Response { status, body })
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &"[REDACTED]")
            .field("base", &self.base)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// The API key is already redacted by its own Debug impl
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Serialize caller data and require a JSON object at the top level.
fn to_fields<T: Serialize + ?Sized>(data: &T) -> Result<Map<String, Value>, Error> {
    let value = serde_json::to_value(data).map_err(|e| {
        InvalidArgumentError::FieldsUnserializable {
            message: e.to_string(),
        }
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(InvalidArgumentError::FieldsNotObject {
            found: json_kind(&other),
        }
        .into()),
    }
}

fn to_body<T: Serialize>(body: &T) -> Result<Value, Error> {
    serde_json::to_value(body).map_err(|e| {
        InvalidArgumentError::FieldsUnserializable {
            message: e.to_string(),
        }
        .into()
    })
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => Err(Error::InvalidResponse {
            reason: e.to_string(),
            body,
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
