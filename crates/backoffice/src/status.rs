use api_types::envelope::ResponseEnvelope;

const SUCCESS_TOKENS: [&str; 2] = ["ok", "success"];

/// Result of a request once the backend's status token is interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success(ResponseEnvelope),
    Failure { message: String },
}

pub fn is_success(status: &str) -> bool {
    let status = status.trim();
    SUCCESS_TOKENS
        .iter()
        .any(|token| status.eq_ignore_ascii_case(token))
}

pub fn classify(envelope: ResponseEnvelope) -> Outcome {
    if is_success(&envelope.status) {
        return Outcome::Success(envelope);
    }

    let message = envelope
        .message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed (status: {})", envelope.status));
    Outcome::Failure { message }
}
