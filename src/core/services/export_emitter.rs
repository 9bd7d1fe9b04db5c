use std::io::Write;

use crate::core::errors::Result;
use crate::core::models::section::{Bindings, Section};
use crate::core::traits::secret_store::SecretStore;

/// Write the shell-sourceable output for the resolved sections.
///
/// Values are printed inside double quotes without escaping; callers are
/// expected to keep values shell-safe. Secrets are fetched one call per
/// entry, in section order, and the first failure aborts the run. Lines
/// already written stay on the output, so a partial run is always a
/// prefix of the full one.
pub fn emit(
    out: &mut dyn Write,
    env: &str,
    dc: &str,
    sections: &[Section],
    store: &dyn SecretStore,
) -> Result<()> {
    writeln!(out, "# Setting Variables for:")?;
    writeln!(out, "# Environment: {env}")?;
    if !dc.is_empty() {
        writeln!(out, "# Datacenter: {dc}")?;
    }

    for section in sections {
        writeln!(out, "{}", section.banner)?;
        match &section.bindings {
            Bindings::Vars(vars) => {
                for (key, value) in vars {
                    writeln!(out, "export {key}=\"{value}\"")?;
                }
            }
            Bindings::Secrets(secrets) => {
                for (key, path) in secrets {
                    let record = store.fetch(path)?;
                    writeln!(out, "export {key}=\"{}\" # {path}", record.value)?;
                }
            }
        }
    }

    Ok(())
}
