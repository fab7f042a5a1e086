//! Authenticated fetch wrapper.
//!
//! Every call reads the token from durable storage, attaches it as a bearer
//! credential and hands the response back. A 401 or 422 tears the session
//! down before the caller sees anything.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::errors::ClientError;
use crate::session::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, FilePart, Method, Transport};

#[derive(Clone)]
pub struct ApiClient {
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(session: Arc<SessionStore>) -> Self {
        let transport = session.transport();
        Self { session, transport }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Issues `request` with the current bearer token and returns the raw response.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let token = self.session.token()?.ok_or(ClientError::NotAuthenticated)?;
        let path = request.path.clone();

        let response = self.transport.send(request.with_bearer(token)).await?;

        if matches!(response.status, 401 | 422) {
            warn!("{path} rejected the session token (status {})", response.status);
            self.session.expire();
            return Err(ClientError::AuthenticationFailed);
        }
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(ApiRequest::get(path)).await?;
        Ok(ensure_success(response)?.json()?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::Post, path, body).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::Put, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.send(ApiRequest::new(Method::Delete, path)).await?;
        ensure_success(response)?;
        Ok(())
    }

    /// Multipart upload of a single file.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FilePart,
    ) -> Result<T, ClientError> {
        let request = ApiRequest::new(Method::Post, path).with_file(file);
        let response = self.send(request).await?;
        Ok(ensure_success(response)?.json()?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self
            .send(ApiRequest::new(method, path).with_json(body))
            .await?;
        Ok(ensure_success(response)?.json()?)
    }
}

fn ensure_success(response: ApiResponse) -> Result<ApiResponse, ClientError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Http {
            status: response.status,
            message: response.message(),
        })
    }
}
