// # Credential
//
// The (identity, secret) pair presented on every outbound request.
//
// ## Security Requirements
//
// - The secret NEVER appears in logs or Debug output
// - No format validation happens here; the remote decides what is valid

/// Basic-auth credential pair
///
/// Immutable once built. The fetcher owns it and shares it read-only with
/// the records it creates.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    identity: String,
    /// ⚠️ NEVER log this value
    secret: String,
}

impl Credential {
    /// Store the pair verbatim
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }

    /// Account identity (user name / email)
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Account secret, for transports only
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}
