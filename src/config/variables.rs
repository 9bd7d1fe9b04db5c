use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::errors::{BuildenvError, Result};

/// Literal variable bindings: name → value.
pub type VarSet = BTreeMap<String, String>;

/// Secret bindings: name → secret-store path, resolved at emission time.
pub type SecretSet = BTreeMap<String, String>;

/// Which schema generation a document was written against.
///
/// The format never grew a version tag; the shape of the datacenter
/// entries is the only discriminator. Legacy documents keep a flat vars
/// mapping per datacenter and know nothing about datacenter secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
    V2,
}

/// Top-level layered variables document.
///
/// Three layers of scope: global, per-environment, per-datacenter. Each
/// layer carries plain vars and secret paths. Section keys decode
/// leniently (`vars`, `Vars`, `VARS`) and unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariablesFile {
    #[serde(default, alias = "Vars", alias = "VARS")]
    pub vars: VarSet,
    #[serde(default, alias = "Secrets", alias = "SECRETS")]
    pub secrets: SecretSet,
    #[serde(default, alias = "Environments", alias = "ENVIRONMENTS")]
    pub environments: BTreeMap<String, EnvLayer>,
}

/// Per-environment layer: its own vars and secrets, plus datacenters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvLayer {
    #[serde(default, alias = "Vars", alias = "VARS")]
    pub vars: VarSet,
    #[serde(default, alias = "Secrets", alias = "SECRETS")]
    pub secrets: SecretSet,
    #[serde(default, alias = "Dcs", alias = "DCS")]
    pub dcs: BTreeMap<String, DcLayer>,
}

/// A datacenter entry, in either of the two shapes the format allows.
///
/// The scoped shape is tried first; it rejects unknown keys, so a flat
/// vars mapping falls through to the legacy variant. An empty mapping
/// decodes as scoped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DcLayer {
    /// Current shape: the entry is a struct with its own vars and secrets.
    Scoped(DcScoped),
    /// Legacy shape: the entry is directly a vars mapping.
    Flat(VarSet),
}

/// Body of a scoped (current-schema) datacenter entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DcScoped {
    #[serde(default, alias = "Vars", alias = "VARS")]
    pub vars: VarSet,
    #[serde(default, alias = "Secrets", alias = "SECRETS")]
    pub secrets: SecretSet,
}

impl DcLayer {
    /// The vars mapping, whichever shape the entry uses.
    pub fn vars(&self) -> &VarSet {
        match self {
            DcLayer::Scoped(scoped) => &scoped.vars,
            DcLayer::Flat(vars) => vars,
        }
    }

    /// The secrets mapping; legacy entries have none.
    pub fn secrets(&self) -> Option<&SecretSet> {
        match self {
            DcLayer::Scoped(scoped) => Some(&scoped.secrets),
            DcLayer::Flat(_) => None,
        }
    }

    fn is_flat(&self) -> bool {
        matches!(self, DcLayer::Flat(_))
    }
}

impl VariablesFile {
    /// Read and decode a variables file from disk.
    ///
    /// # Errors
    ///
    /// - `FileRead` if the file is absent or unreadable.
    /// - `Yaml` if the document decodes as neither schema generation.
    pub fn load(path: &Path) -> Result<(Self, SchemaVersion)> {
        let content = std::fs::read_to_string(path).map_err(|source| BuildenvError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Decode YAML text and detect which schema generation it uses.
    ///
    /// Empty and comment-only documents are valid and decode to an empty
    /// current-schema config.
    pub fn parse(content: &str) -> Result<(Self, SchemaVersion)> {
        let file = serde_yaml::from_str::<Option<Self>>(content)
            .map_err(|e| BuildenvError::Yaml {
                detail: e.to_string(),
            })?
            .unwrap_or_default();
        let version = file.schema_version();
        Ok((file, version))
    }

    /// A document is legacy when any datacenter entry uses the flat shape.
    fn schema_version(&self) -> SchemaVersion {
        let any_flat = self
            .environments
            .values()
            .flat_map(|env| env.dcs.values())
            .any(DcLayer::is_flat);
        if any_flat {
            SchemaVersion::V1
        } else {
            SchemaVersion::V2
        }
    }
}
