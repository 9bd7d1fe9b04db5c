use crate::config::variables::{SecretSet, VarSet};

/// One titled block of the emitted output.
///
/// Sections reach the emitter already ordered. Precedence between layers
/// is expressed purely by that order: a shell sourcing the output lets
/// the last `export` of a name win.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Banner line, printed verbatim (e.g. `# Global Vars:`).
    pub banner: String,
    pub bindings: Bindings,
}

/// The bindings a section prints.
#[derive(Debug, Clone, PartialEq)]
pub enum Bindings {
    /// Literal name → value pairs.
    Vars(VarSet),
    /// Name → secret-store path pairs, resolved at emission time.
    Secrets(SecretSet),
}

impl Section {
    pub fn vars(banner: impl Into<String>, set: VarSet) -> Self {
        Self {
            banner: banner.into(),
            bindings: Bindings::Vars(set),
        }
    }

    pub fn secrets(banner: impl Into<String>, set: SecretSet) -> Self {
        Self {
            banner: banner.into(),
            bindings: Bindings::Secrets(set),
        }
    }

    /// True when the section has no bindings to print.
    pub fn is_empty(&self) -> bool {
        match &self.bindings {
            Bindings::Vars(set) => set.is_empty(),
            Bindings::Secrets(set) => set.is_empty(),
        }
    }
}
