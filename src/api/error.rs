use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Registration rejected: {0}")]
    Registration(String),

    #[error("Login rejected: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// User-facing message for display in the login/register forms.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Registration(reason) | ApiError::Authentication(reason) => {
                user_message(reason)
            }
            _ => GENERIC_MESSAGE,
        }
    }
}

/// Fallback for any reason string the server sends that we don't recognize
const GENERIC_MESSAGE: &str = "Errore";

/// Translate a raw server rejection reason into a user-facing message.
///
/// The backend reports validation failures as plain strings; this is the
/// fixed table of the ones we know about, with an explicit fallback.
pub fn user_message(reason: &str) -> &'static str {
    match reason {
        "Email and Password are required" => "Email e password obbligatorie",
        "Email already exists" => "Utente esistente",
        "Email format is invalid" => "Email scritta male",
        "Cannot find user" => "utente inesistente",
        _ => GENERIC_MESSAGE,
    }
}
