//! Webshell API client with request/response handling.

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::api::error::{decode_body, remote_error};
use crate::error::Result;
use crate::http::HttpClient;

/// Request body variants accepted by the service.
#[derive(Debug)]
pub enum CallBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// One request against the webshell API.
#[derive(Debug)]
pub struct ApiCall<'a> {
    method: Method,
    route: &'static str,
    credential: Option<(&'static str, &'a str)>,
    query: Vec<(&'static str, String)>,
    body: CallBody,
    streamed: bool,
}

impl<'a> ApiCall<'a> {
    /// Create a call with no credential, query or body.
    pub fn new(method: Method, route: &'static str) -> Self {
        Self {
            method,
            route,
            credential: None,
            query: Vec::new(),
            body: CallBody::Empty,
            streamed: false,
        }
    }

    pub fn get(route: &'static str) -> Self {
        Self::new(Method::GET, route)
    }

    pub fn post(route: &'static str) -> Self {
        Self::new(Method::POST, route)
    }

    pub fn put(route: &'static str) -> Self {
        Self::new(Method::PUT, route)
    }

    pub fn delete(route: &'static str) -> Self {
        Self::new(Method::DELETE, route)
    }

    /// Attach the session token under `header`. A missing token sends the
    /// request without a credential and leaves rejection to the server.
    pub fn credential(mut self, header: &'static str, token: Option<&'a str>) -> Self {
        self.credential = token.map(|t| (header, t));
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Send `body` as JSON.
    pub fn json(mut self, body: Value) -> Self {
        self.body = CallBody::Json(body);
        self
    }

    /// Send a multipart form.
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = CallBody::Multipart(form);
        self
    }

    /// Mark a transfer whose body may outlast the per-request timeout.
    pub fn streamed(mut self) -> Self {
        self.streamed = true;
        self
    }

    pub fn is_streamed(&self) -> bool {
        self.streamed
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn route(&self) -> &'static str {
        self.route
    }
}

/// Webshell API client.
///
/// Holds the immutable endpoint and transport; the session token lives in
/// [`crate::SessionClient`] and is passed per call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: HttpClient,
    retries: u32,
}

impl ApiClient {
    /// Create a new API client for `base_url` with default transport settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_http(base_url, HttpClient::new()?, 0))
    }

    /// Create a new API client over an existing transport.
    pub fn with_http(base_url: &str, http: HttpClient, retries: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            retries,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `route`.
    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn build(&self, call: ApiCall<'_>) -> RequestBuilder {
        let url = self.url(call.route);
        let mut request = if call.streamed {
            self.http.stream_request(call.method, &url)
        } else {
            self.http.request(call.method, &url)
        };
        if let Some((header, token)) = call.credential {
            request = request.header(header, token);
        }
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        match call.body {
            CallBody::Empty => request,
            CallBody::Json(body) => request.json(&body),
            CallBody::Multipart(form) => request.multipart(form),
        }
    }

    /// Send a call and return the raw response when its status is a success.
    ///
    /// A non-success status is turned into [`crate::HarnessError::Remote`].
    pub async fn send(&self, call: ApiCall<'_>) -> Result<Response> {
        let method = call.method.clone();
        let route = call.route;
        debug!(%method, route, "api request");

        let response = self.http.send(self.build(call), self.retries).await?;
        let status = response.status();
        debug!(%method, route, status = status.as_u16(), "api response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(remote_error(status, &body));
        }
        Ok(response)
    }

    /// Send a call and decode the JSON payload verbatim.
    pub async fn call(&self, call: ApiCall<'_>) -> Result<Value> {
        let response = self.send(call).await?;
        let body = response.text().await?;
        Ok(decode_body(&body))
    }
}
