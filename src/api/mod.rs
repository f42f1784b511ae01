use futures_util::future::{FutureExt, LocalBoxFuture};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::employee::{EmployeePayload, EmployeeRecord};

#[cfg(test)]
pub mod testing;

/// Backend surface consumed by the management view.
///
/// Requests are built eagerly, so the returned futures own everything they need.
#[cfg_attr(test, mockall::automock)]
pub trait EmployeeApi: Send + Sync {
    fn list_all(&self) -> LocalBoxFuture<'static, Result<Vec<EmployeeRecord>, AppError>>;
    fn search(&self, query: &str) -> LocalBoxFuture<'static, Result<Vec<EmployeeRecord>, AppError>>;
    fn create(&self, payload: &EmployeePayload) -> LocalBoxFuture<'static, Result<(), AppError>>;
    fn update(&self, id: &str, payload: &EmployeePayload) -> LocalBoxFuture<'static, Result<(), AppError>>;
    fn delete(&self, id: &str) -> LocalBoxFuture<'static, Result<(), AppError>>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct HttpEmployeeApi {
    client: Client,
    base_url: Url,
}

impl HttpEmployeeApi {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("HTTP client: {}", err)))?;
        Ok(HttpEmployeeApi { client, base_url: config.api_url.clone() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turns a non-success response into `AppError::Status`, reading the optional `error` field.
async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body).ok().and_then(|b| b.error),
        Err(err) => {
            log::debug!("Could not read error body for HTTP {}: {}", status, err);
            None
        }
    };
    Err(AppError::Status { status: status.as_u16(), message })
}

fn fetch_list(request: Result<RequestBuilder, AppError>) -> LocalBoxFuture<'static, Result<Vec<EmployeeRecord>, AppError>> {
    async move {
        let response = check_status(request?.send().await?).await?;
        Ok(response.json::<Vec<EmployeeRecord>>().await?)
    }
    .boxed_local()
}

/// Success bodies of writes are ignored; only the status matters.
fn send_write(request: Result<RequestBuilder, AppError>) -> LocalBoxFuture<'static, Result<(), AppError>> {
    async move {
        check_status(request?.send().await?).await?;
        Ok(())
    }
    .boxed_local()
}

impl EmployeeApi for HttpEmployeeApi {
    fn list_all(&self) -> LocalBoxFuture<'static, Result<Vec<EmployeeRecord>, AppError>> {
        fetch_list(self.url(&["api", "employees"]).map(|url| self.client.get(url)))
    }

    fn search(&self, query: &str) -> LocalBoxFuture<'static, Result<Vec<EmployeeRecord>, AppError>> {
        let request = self.url(&["api", "employees", "search"]).map(|mut url| {
            url.query_pairs_mut().append_pair("q", query);
            self.client.get(url)
        });
        fetch_list(request)
    }

    fn create(&self, payload: &EmployeePayload) -> LocalBoxFuture<'static, Result<(), AppError>> {
        send_write(self.url(&["api", "employees"]).map(|url| self.client.post(url).json(payload)))
    }

    fn update(&self, id: &str, payload: &EmployeePayload) -> LocalBoxFuture<'static, Result<(), AppError>> {
        send_write(self.url(&["api", "employees", id]).map(|url| self.client.put(url).json(payload)))
    }

    fn delete(&self, id: &str) -> LocalBoxFuture<'static, Result<(), AppError>> {
        send_write(self.url(&["api", "employees", id]).map(|url| self.client.delete(url)))
    }
}
