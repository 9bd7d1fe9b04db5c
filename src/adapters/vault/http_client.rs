use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::core::errors::{BuildenvError, Result};
use crate::core::traits::secret_store::{SecretRecord, SecretStore};

/// Server address used when `VAULT_ADDR` is unset, matching the
/// convention of the other tools sharing the same environment.
const DEFAULT_ADDR: &str = "https://127.0.0.1:8200";

/// Timeout for a single secret read.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Secret store backed by a Vault server over HTTP.
///
/// All connection settings come from the ambient process environment
/// (`VAULT_ADDR`, `VAULT_TOKEN`, `VAULT_CACERT`, `VAULT_SKIP_VERIFY`),
/// the client's native interface; nothing is passed in explicitly, so
/// operators reuse the variables they already set for other tooling.
///
/// Construction is deferred to the first fetch: a run whose variables
/// file declares no secrets never talks to the server and cannot fail
/// on client setup.
pub struct VaultHttpStore {
    backend: OnceLock<std::result::Result<Backend, String>>,
}

impl VaultHttpStore {
    pub fn from_env() -> Self {
        Self {
            backend: OnceLock::new(),
        }
    }

    fn backend(&self) -> Result<&Backend> {
        self.backend
            .get_or_init(Backend::from_env)
            .as_ref()
            .map_err(|reason| BuildenvError::VaultClient {
                reason: reason.clone(),
            })
    }
}

impl SecretStore for VaultHttpStore {
    fn fetch(&self, path: &str) -> Result<SecretRecord> {
        self.backend()?.read(path)
    }
}

struct Backend {
    http: reqwest::Client,
    addr: String,
    token: Option<String>,
    rt: tokio::runtime::Runtime,
}

/// Wire shape of a logical read response: the record's attributes live
/// under `data`.
#[derive(Debug, Deserialize)]
struct ReadResponse {
    #[serde(default)]
    data: BTreeMap<String, serde_json::Value>,
}

impl Backend {
    fn from_env() -> std::result::Result<Self, String> {
        let addr = std::env::var("VAULT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = addr.trim_end_matches('/').to_string();
        let token = std::env::var("VAULT_TOKEN").ok();

        let mut builder = reqwest::Client::builder().timeout(READ_TIMEOUT);

        if let Ok(ca_path) = std::env::var("VAULT_CACERT") {
            let pem = std::fs::read(&ca_path)
                .map_err(|e| format!("unable to read VAULT_CACERT {ca_path}: {e}"))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| format!("invalid VAULT_CACERT {ca_path}: {e}"))?;
            builder = builder.add_root_certificate(cert);
        }

        if truthy(std::env::var("VAULT_SKIP_VERIFY").ok().as_deref()) {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| format!("unable to build http client: {e}"))?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| format!("unable to build runtime: {e}"))?;

        Ok(Self {
            http,
            addr,
            token,
            rt,
        })
    }

    /// One logical read: `GET {addr}/v1/{path}` with the token header.
    fn read(&self, path: &str) -> Result<SecretRecord> {
        let url = format!("{}/v1/{}", self.addr, path.trim_start_matches('/'));

        self.rt.block_on(async {
            let mut request = self.http.get(&url);
            if let Some(token) = &self.token {
                request = request.header("X-Vault-Token", token);
            }

            let response = request.send().await.map_err(|e| BuildenvError::VaultRead {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(BuildenvError::VaultMissing {
                    path: path.to_string(),
                });
            }
            if !status.is_success() {
                return Err(BuildenvError::VaultRead {
                    path: path.to_string(),
                    reason: format!("server returned status {status}"),
                });
            }

            let body: ReadResponse =
                response.json().await.map_err(|e| BuildenvError::VaultRead {
                    path: path.to_string(),
                    reason: format!("unable to decode response: {e}"),
                })?;

            // A record without a string `value` attribute is as good as
            // no record at all.
            match body.data.get("value") {
                Some(serde_json::Value::String(value)) => Ok(SecretRecord {
                    value: value.clone(),
                }),
                _ => Err(BuildenvError::VaultMissing {
                    path: path.to_string(),
                }),
            }
        })
    }
}

/// Vault tools accept several spellings for boolean env switches.
fn truthy(val: Option<&str>) -> bool {
    matches!(val, Some("1" | "t" | "true" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_spellings() {
        assert!(truthy(Some("1")));
        assert!(truthy(Some("true")));
        assert!(truthy(Some("yes")));
        assert!(!truthy(Some("0")));
        assert!(!truthy(Some("")));
        assert!(!truthy(None));
    }

    #[test]
    fn read_response_decodes_extra_attributes() {
        let body = r#"{"request_id":"x","data":{"value":"s3cr3t","ttl":30}}"#;
        let parsed: ReadResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            parsed.data.get("value"),
            Some(&serde_json::Value::String("s3cr3t".into()))
        );
    }

    #[test]
    fn read_response_tolerates_missing_data() {
        let parsed: ReadResponse = serde_json::from_str(r#"{"errors":[]}"#).unwrap();

        assert!(parsed.data.is_empty());
    }
}
