use serde::Deserialize;
use serde_json::Value;

/// Result of a client-credentials token exchange
#[derive(Debug, Clone, PartialEq)]
pub enum TokenOutcome {
    Success {
        access_token: String,
        /// Epoch seconds, when the gateway reports it
        expires_at: Option<i64>,
    },
    /// The gateway answered but issued no token; `details` is its body
    Failure { details: Value },
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_at: Option<i64>,
}

impl TokenOutcome {
    /// Decode a 2xx token-endpoint body
    pub fn from_response(body: Value) -> Self {
        let decoded = TokenResponse::deserialize(&body).ok();

        match decoded {
            Some(TokenResponse {
                access_token: Some(access_token),
                expires_at,
            }) if !access_token.is_empty() => TokenOutcome::Success {
                access_token,
                expires_at,
            },
            _ => TokenOutcome::Failure { details: body },
        }
    }
}
