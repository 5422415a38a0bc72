use std::{future::Future, time::Duration};

use reqwest::{Url, header::CONTENT_TYPE};

use crate::error::{ConsoleError, Result};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// One encoded POST to a back-office endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub path: &'static str,
    pub body: String,
    pub timeout: Option<Duration>,
}

/// Delivers an encoded request and returns the raw response body.
pub trait Transport: Send + Sync {
    fn post(&self, request: Request) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        // Endpoints are joined as relative paths, so the base must end with `/`.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|err| ConsoleError::InvalidBaseUrl(err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn post(&self, request: Request) -> Result<String> {
        let endpoint = self
            .base_url
            .join(request.path)
            .map_err(|err| ConsoleError::InvalidBaseUrl(err.to_string()))?;

        let mut builder = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.body);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let res = builder.send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ConsoleError::Status {
                path: request.path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let transport = HttpTransport::new("http://127.0.0.1:8080/backoffice/api", None).unwrap();
        assert_eq!(
            transport.base_url().join("merchant_list.php").unwrap().as_str(),
            "http://127.0.0.1:8080/backoffice/api/merchant_list.php"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let err = HttpTransport::new("not a url", None).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidBaseUrl(_)));
    }
}
