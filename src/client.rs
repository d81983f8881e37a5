use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::{DirectoryError, Result};
use crate::responses::ValidationErrorBody;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::{User, UserRequest};

/// Typed operations on the user collection.
///
/// Each method accepts exactly the success status its operation expects.
/// 404 on a single record becomes [`DirectoryError::NotFound`], 400 on a
/// write becomes [`DirectoryError::Validation`] (or `ValidationFailed`
/// when no fields were named), and anything else becomes
/// [`DirectoryError::Status`].
pub struct UserClient<T> {
    transport: T,
}

impl<T: Transport> UserClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let response = self
            .transport
            .send(ApiRequest::collection(Method::GET))
            .await?;

        match response.status {
            200 => decode(&response),
            status => Err(DirectoryError::Status(status)),
        }
    }

    pub async fn get(&self, id: u64) -> Result<User> {
        let response = self
            .transport
            .send(ApiRequest::record(Method::GET, id))
            .await?;

        match response.status {
            200 => decode(&response),
            404 => Err(DirectoryError::NotFound(id)),
            status => Err(DirectoryError::Status(status)),
        }
    }

    pub async fn create(&self, user: &UserRequest) -> Result<User> {
        let request = ApiRequest::collection(Method::POST).with_json(user)?;
        let response = self.transport.send(request).await?;

        match response.status {
            201 => decode(&response),
            400 => Err(validation_error(&response)),
            status => Err(DirectoryError::Status(status)),
        }
    }

    pub async fn update(&self, id: u64, user: &UserRequest) -> Result<User> {
        let request = ApiRequest::record(Method::PUT, id).with_json(user)?;
        let response = self.transport.send(request).await?;

        match response.status {
            200 => decode(&response),
            400 => Err(validation_error(&response)),
            404 => Err(DirectoryError::NotFound(id)),
            status => Err(DirectoryError::Status(status)),
        }
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        let response = self
            .transport
            .send(ApiRequest::record(Method::DELETE, id))
            .await?;

        match response.status {
            204 => Ok(()),
            404 => Err(DirectoryError::NotFound(id)),
            status => Err(DirectoryError::Status(status)),
        }
    }
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R> {
    Ok(serde_json::from_str(&response.body)?)
}

fn validation_error(response: &ApiResponse) -> DirectoryError {
    match ValidationErrorBody::parse(&response.body).into_fields() {
        Some(fields) => DirectoryError::Validation(fields),
        None => DirectoryError::ValidationFailed,
    }
}
