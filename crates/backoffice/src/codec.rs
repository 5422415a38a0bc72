//! Request/response envelope codec.
//!
//! Outbound mappings are either form-encoded as they are (plain endpoints) or
//! JSON-serialized, encrypted and sent as the single form field `data`
//! (encrypted endpoints). Inbound bodies are JSON; for encrypted endpoints a
//! string under `data` is decrypted and parsed before the envelope is built,
//! except on replies whose outer status already reports a failure.
use std::{sync::Arc, time::Duration};

use api_types::envelope::{ResponseEnvelope, Sealed};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    crypto::Cipher,
    error::{ConsoleError, Result},
    status::is_success,
};

/// Field mapping sent to an endpoint.
pub type Payload = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Encrypted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub encoding: Encoding,
    pub timeout: Option<Duration>,
}

impl Endpoint {
    pub const fn plain(path: &'static str) -> Self {
        Self {
            path,
            encoding: Encoding::Plain,
            timeout: None,
        }
    }

    pub const fn encrypted(path: &'static str) -> Self {
        Self {
            path,
            encoding: Encoding::Encrypted,
            timeout: None,
        }
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Serializes a request struct into a [`Payload`].
pub fn to_payload<T: Serialize>(value: &T) -> Result<Payload> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(ConsoleError::PayloadShape),
    }
}

#[derive(Clone)]
pub struct EnvelopeCodec {
    cipher: Arc<dyn Cipher>,
}

impl EnvelopeCodec {
    pub fn new(cipher: Arc<dyn Cipher>) -> Self {
        Self { cipher }
    }

    /// Builds the form-encoded request body.
    pub fn encode(&self, encoding: Encoding, payload: &Payload) -> Result<String> {
        match encoding {
            Encoding::Plain => Ok(serde_urlencoded::to_string(form_fields(payload)?)?),
            Encoding::Encrypted => {
                let json = serde_json::to_vec(payload)?;
                let sealed = Sealed {
                    data: self.cipher.encrypt(&json)?,
                };
                Ok(serde_urlencoded::to_string(&sealed)?)
            }
        }
    }

    pub fn decode(&self, encoding: Encoding, body: &str) -> Result<ResponseEnvelope> {
        let mut value: Value = serde_json::from_str(body)?;

        let sealed = match value.get("data") {
            Some(Value::String(ciphertext))
                if encoding == Encoding::Encrypted && !reports_failure(&value) =>
            {
                Some(ciphertext.clone())
            }
            _ => None,
        };

        if let Some(ciphertext) = sealed {
            let inner: Value = serde_json::from_slice(&self.cipher.decrypt(&ciphertext)?)?;
            if value.get("status").is_some() {
                value["data"] = inner;
            } else {
                // Whole body was sealed.
                value = inner;
            }
        }

        Ok(serde_json::from_value(value)?)
    }
}

/// Error replies put plain text under `data` next to their status.
fn reports_failure(value: &Value) -> bool {
    match value.get("status") {
        None | Some(Value::Null) => false,
        Some(Value::String(status)) => !is_success(status),
        Some(other) => !is_success(&other.to_string()),
    }
}

/// Flattens a mapping into form fields the way PHP expects them.
///
/// `null` is omitted, arrays become repeated `key[]` fields, nested objects
/// are sent as JSON text.
fn form_fields(payload: &Payload) -> Result<Vec<(String, String)>> {
    let mut fields = Vec::with_capacity(payload.len());
    for (key, value) in payload {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let key = format!("{key}[]");
                for item in items {
                    if let Some(text) = scalar_text(item)? {
                        fields.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other)? {
                    fields.push((key.clone(), text));
                }
            }
        }
    }
    Ok(fields)
}

fn scalar_text(value: &Value) -> Result<Option<String>> {
    Ok(match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(serde_json::to_string(value)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SharedSecretCipher;
    use serde_json::json;

    fn codec() -> EnvelopeCodec {
        EnvelopeCodec::new(Arc::new(SharedSecretCipher::new("test-secret").unwrap()))
    }

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn plain_body_is_form_encoded() {
        let body = codec()
            .encode(
                Encoding::Plain,
                &payload(json!({
                    "group_name": "North & South",
                    "ids": [1, 2],
                    "note": null,
                    "active": true
                })),
            )
            .unwrap();
        assert!(body.contains("group_name=North+%26+South"));

        let mut fields: Vec<(String, String)> = serde_urlencoded::from_str(&body).unwrap();
        fields.sort();
        let expected: Vec<(String, String)> = [
            ("active", "true"),
            ("group_name", "North & South"),
            ("ids[]", "1"),
            ("ids[]", "2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(fields, expected);
    }

    #[test]
    fn encrypted_body_only_carries_data() {
        let codec = codec();
        let body = codec
            .encode(Encoding::Encrypted, &payload(json!({ "id": "7" })))
            .unwrap();

        let fields: Vec<(String, String)> = serde_urlencoded::from_str(&body).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "data");

        let plain = codec.cipher.decrypt(&fields[0].1).unwrap();
        let value: Value = serde_json::from_slice(&plain).unwrap();
        assert_eq!(value, json!({ "id": "7" }));
    }

    #[test]
    fn decodes_plain_envelope() {
        let env = codec()
            .decode(
                Encoding::Plain,
                r#"{"status":"ok","records":[{"id":1}]}"#,
            )
            .unwrap();
        assert_eq!(env.status, "ok");
        assert_eq!(env.records.unwrap().len(), 1);
    }

    #[test]
    fn decrypts_data_next_to_status() {
        let codec = codec();
        let ct = codec.cipher.encrypt(br#"[{"id":"1"},{"id":"2"}]"#).unwrap();
        let body = json!({ "status": "success", "data": ct }).to_string();

        let env = codec.decode(Encoding::Encrypted, &body).unwrap();
        assert_eq!(env.status, "success");
        assert_eq!(env.data, Some(json!([{ "id": "1" }, { "id": "2" }])));
    }

    #[test]
    fn decrypted_body_without_outer_status_is_the_envelope() {
        let codec = codec();
        let ct = codec
            .cipher
            .encrypt(br#"{"status":"fail","message":"Merchant exists"}"#)
            .unwrap();
        let body = json!({ "data": ct }).to_string();

        let env = codec.decode(Encoding::Encrypted, &body).unwrap();
        assert_eq!(env.status, "fail");
        assert_eq!(env.message.as_deref(), Some("Merchant exists"));
    }

    #[test]
    fn failure_reply_keeps_plain_data() {
        let env = codec()
            .decode(
                Encoding::Encrypted,
                r#"{"status":"fail","message":"Session expired","data":"Session expired"}"#,
            )
            .unwrap();
        assert_eq!(env.message.as_deref(), Some("Session expired"));
        assert_eq!(env.data, Some(json!("Session expired")));
    }

    #[test]
    fn plain_endpoint_leaves_string_data_alone() {
        let env = codec()
            .decode(Encoding::Plain, r#"{"status":"ok","data":"hello"}"#)
            .unwrap();
        assert_eq!(env.data, Some(json!("hello")));
    }

    #[test]
    fn garbage_is_a_codec_error() {
        let codec = codec();
        assert!(matches!(
            codec.decode(Encoding::Plain, "<html>oops</html>"),
            Err(ConsoleError::Json(_))
        ));
        assert!(matches!(
            codec.decode(Encoding::Encrypted, r#"{"data":"AAAA"}"#),
            Err(ConsoleError::Cipher(_))
        ));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(
            to_payload(&vec![1, 2]),
            Err(ConsoleError::PayloadShape)
        ));
    }
}
