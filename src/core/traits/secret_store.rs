use crate::core::errors::Result;

/// A secret fetched from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretRecord {
    pub value: String,
}

/// Port for the secret backend.
///
/// The shipped implementation talks to a Vault server over HTTP; the
/// trait keeps the emitter testable without a live store.
pub trait SecretStore: Send + Sync {
    /// Fetch the secret at `path`.
    ///
    /// # Errors
    ///
    /// - `VaultClient` if the backend could not be constructed.
    /// - `VaultRead` if the call itself failed (network, auth, permission).
    /// - `VaultMissing` if no usable record exists at `path`.
    fn fetch(&self, path: &str) -> Result<SecretRecord>;
}
