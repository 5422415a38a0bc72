use std::sync::Arc;

use crate::{
    codec::{Encoding, Endpoint, EnvelopeCodec, Payload},
    config::ConsoleConfig,
    crypto::{Cipher, SharedSecretCipher, Unkeyed},
    dialogs::Dialogs,
    error::Result,
    navigation::Router,
    status::{Outcome, classify},
    transport::{HttpTransport, Request, Transport},
};

/// Everything a page needs to talk to the backend and to the operator.
pub struct Console<T, D, R> {
    transport: T,
    codec: EnvelopeCodec,
    dialogs: D,
    router: R,
}

impl<D: Dialogs, R: Router> Console<HttpTransport, D, R> {
    pub fn connect(config: &ConsoleConfig, dialogs: D, router: R) -> Result<Self> {
        let cipher: Arc<dyn Cipher> = if config.secret_key.is_empty() {
            tracing::warn!("no secret_key configured, encrypted endpoints are unavailable");
            Arc::new(Unkeyed)
        } else {
            Arc::new(SharedSecretCipher::new(&config.secret_key)?)
        };
        let transport = HttpTransport::new(&config.base_url, config.request_timeout())?;
        tracing::debug!(base_url = %transport.base_url(), "console ready");
        Ok(Self::new(transport, cipher, dialogs, router))
    }
}

impl<T, D, R> Console<T, D, R> {
    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport, D: Dialogs, R: Router> Console<T, D, R> {
    pub fn new(transport: T, cipher: Arc<dyn Cipher>, dialogs: D, router: R) -> Self {
        Self {
            transport,
            codec: EnvelopeCodec::new(cipher),
            dialogs,
            router,
        }
    }

    /// Encode, POST, decode and classify one request.
    ///
    /// Transport and codec failures are logged here and returned as errors;
    /// they never reach the dialog service.
    pub async fn call(&self, endpoint: Endpoint, payload: &Payload) -> Result<Outcome> {
        let result = self.exchange(endpoint, payload).await;
        if let Err(err) = &result {
            tracing::error!(path = endpoint.path, "request failed: {err}");
        }
        result
    }

    async fn exchange(&self, endpoint: Endpoint, payload: &Payload) -> Result<Outcome> {
        let body = self.codec.encode(endpoint.encoding, payload)?;
        tracing::debug!(
            path = endpoint.path,
            encrypted = endpoint.encoding == Encoding::Encrypted,
            "posting"
        );

        let raw = self
            .transport
            .post(Request {
                path: endpoint.path,
                body,
                timeout: endpoint.timeout,
            })
            .await?;

        let envelope = self.codec.decode(endpoint.encoding, &raw)?;
        Ok(classify(envelope))
    }
}
