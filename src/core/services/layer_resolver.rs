use crate::config::variables::{EnvLayer, SchemaVersion, VariablesFile};
use crate::core::models::section::Section;

/// Select the effective variable and secret sets for an
/// `(environment, datacenter)` pair.
///
/// Returns the output sections in their fixed order: global vars, global
/// secrets, environment vars, environment secrets, then the datacenter
/// block. Absent layers come back as empty sections, never as errors.
/// Buckets are not merged; precedence is carried by the order alone.
pub fn resolve(
    config: &VariablesFile,
    version: SchemaVersion,
    env: &str,
    dc: &str,
) -> Vec<Section> {
    let env_layer = config
        .environments
        .get(env)
        .cloned()
        .unwrap_or_else(EnvLayer::default);

    let mut sections = vec![
        Section::vars("# Global Vars:", config.vars.clone()),
        Section::secrets("# Global Secrets:", config.secrets.clone()),
        Section::vars(format!("# Environment ({env}) Vars:"), env_layer.vars.clone()),
        Section::secrets(
            format!("# Environment ({env}) Secrets:"),
            env_layer.secrets.clone(),
        ),
    ];

    match version {
        SchemaVersion::V1 => {
            // Legacy documents only print a datacenter block when one was
            // asked for, and label it with the datacenter name.
            if !dc.is_empty() {
                let vars = env_layer
                    .dcs
                    .get(dc)
                    .map(|layer| layer.vars().clone())
                    .unwrap_or_default();
                sections.push(Section::vars(
                    format!("# Datacenter ({dc}) Specific Vars:"),
                    vars,
                ));
            }
        }
        SchemaVersion::V2 => {
            let layer = env_layer.dcs.get(dc);
            let vars = layer.map(|l| l.vars().clone()).unwrap_or_default();
            let secrets = layer
                .and_then(|l| l.secrets().cloned())
                .unwrap_or_default();
            // These banners carry the environment name, not the datacenter
            // name. Downstream tooling matches on the lines as printed, so
            // the label stays even though it reads oddly.
            sections.push(Section::vars(
                format!("# Datacenter ({env}) Specific Vars:"),
                vars,
            ));
            sections.push(Section::secrets(
                format!("# Datacenter ({env}) Specific Secrets:"),
                secrets,
            ));
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> (VariablesFile, SchemaVersion) {
        VariablesFile::parse(yaml).unwrap()
    }

    fn banners(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.banner.as_str()).collect()
    }

    #[test]
    fn current_schema_yields_six_sections() {
        let (config, version) = parse(
            r#"
vars: {FOO: bar}
secrets: {TOK: /kv/tok}
environments:
  dev:
    vars: {FOO: baz}
    secrets: {DB: /kv/dev/db}
    dcs:
      us_east:
        vars: {REGION: us-east-1}
        secrets: {DC_KEY: /kv/dev/dc}
"#,
        );

        let sections = resolve(&config, version, "dev", "us_east");

        assert_eq!(
            banners(&sections),
            vec![
                "# Global Vars:",
                "# Global Secrets:",
                "# Environment (dev) Vars:",
                "# Environment (dev) Secrets:",
                "# Datacenter (dev) Specific Vars:",
                "# Datacenter (dev) Specific Secrets:",
            ]
        );
        assert!(sections.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn datacenter_banner_keeps_environment_label() {
        let (config, version) = parse(
            r#"
environments:
  prod:
    dcs:
      eu_west:
        vars: {REGION: eu-west-1}
"#,
        );

        let sections = resolve(&config, version, "prod", "eu_west");

        assert_eq!(sections[4].banner, "# Datacenter (prod) Specific Vars:");
    }

    #[test]
    fn legacy_with_datacenter_uses_dc_label_and_no_dc_secrets() {
        let (config, version) = parse(
            r#"
environments:
  dev:
    dcs:
      us_east:
        REGION: us-east-1
"#,
        );
        assert_eq!(version, SchemaVersion::V1);

        let sections = resolve(&config, version, "dev", "us_east");

        assert_eq!(sections.len(), 5);
        assert_eq!(sections[4].banner, "# Datacenter (us_east) Specific Vars:");
    }

    #[test]
    fn legacy_without_datacenter_omits_dc_section() {
        let (config, version) = parse(
            r#"
environments:
  dev:
    dcs:
      us_east:
        REGION: us-east-1
"#,
        );

        let sections = resolve(&config, version, "dev", "");

        assert_eq!(sections.len(), 4);
    }

    #[test]
    fn absent_environment_yields_empty_sections() {
        let (config, version) = parse("vars: {FOO: bar}");

        let sections = resolve(&config, version, "qa", "");

        assert_eq!(sections.len(), 6);
        assert!(!sections[0].is_empty());
        assert!(sections[2..].iter().all(Section::is_empty));
    }

    #[test]
    fn absent_datacenter_in_current_schema_yields_empty_dc_sections() {
        let (config, version) = parse(
            r#"
environments:
  dev:
    dcs:
      us_east:
        vars: {REGION: us-east-1}
"#,
        );

        let sections = resolve(&config, version, "dev", "ap_south");

        assert_eq!(sections.len(), 6);
        assert!(sections[4].is_empty());
        assert!(sections[5].is_empty());
    }

    #[test]
    fn empty_datacenter_name_in_current_schema_still_emits_dc_sections() {
        let (config, version) = parse(
            r#"
environments:
  dev:
    dcs:
      us_east:
        vars: {REGION: us-east-1}
"#,
        );

        let sections = resolve(&config, version, "dev", "");

        assert_eq!(sections.len(), 6);
        assert!(sections[4].is_empty());
    }
}
