//! `gloo-net` client for the auth endpoints
//!
//! Every request carries `Authorization: Bearer <token>` when the store holds
//! a usable token. Non-2xx answers keep their JSON body so the flows can map
//! field errors and server messages.

use serde_json::Value;

#[cfg(feature = "hydrate")]
use crate::core::authorization_header;
use crate::core::{
    ApiConfig, ApiError, AuthApi, Credentials, LoginResponse, RegisterRequest, SessionStore,
};

#[derive(Clone)]
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub struct HttpAuthApi {
    config: ApiConfig,
    store: SessionStore,
}

impl HttpAuthApi {
    pub fn new(config: ApiConfig, store: SessionStore) -> Self {
        Self { config, store }
    }

    /// Header value for the token currently in storage
    #[cfg(feature = "hydrate")]
    fn authorization(&self) -> Option<String> {
        authorization_header(&self.store.get())
    }
}

#[cfg(feature = "hydrate")]
mod client {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::*;

    impl HttpAuthApi {
        fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
            match self.authorization() {
                Some(value) => builder.header("Authorization", &value),
                None => builder,
            }
        }

        async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
        where
            B: Serialize,
            T: DeserializeOwned,
        {
            let request = self
                .decorate(Request::post(url))
                .json(body)
                .map_err(|e| ApiError::Encode(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = ensure_success(response).await?;
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        // error bodies are optional and may not be JSON
        let body = response.json::<Value>().await.ok();
        Err(ApiError::Status { status, body })
    }

    impl AuthApi for HttpAuthApi {
        async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
            self.post_json(&self.config.login_url(), credentials).await
        }

        async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
            self.post_json(&self.config.register_url(), request).await
        }

        async fn verify_token(&self) -> Result<(), ApiError> {
            if self.authorization().is_none() {
                return Err(ApiError::Status {
                    status: 401,
                    body: Some(serde_json::json!({ "error": "No token found" })),
                });
            }
            let response = self
                .decorate(Request::get(&self.config.verify_url()))
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            ensure_success(response).await.map(|_| ())
        }
    }
}

#[cfg(not(feature = "hydrate"))]
impl AuthApi for HttpAuthApi {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        Err(server_side())
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<Value, ApiError> {
        Err(server_side())
    }

    async fn verify_token(&self) -> Result<(), ApiError> {
        Err(server_side())
    }
}

#[cfg(not(feature = "hydrate"))]
fn server_side() -> ApiError {
    ApiError::Network("The auth API is only called from the browser".to_string())
}
