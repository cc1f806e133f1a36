use crate::{ArchConfig, Configuration, Variant};
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde_json::Value;
use std::path::Path;

/// Prefix for environment overrides, e.g. `CLOUD_ARCHITECT__SLIDERS__SECURITY=9`
pub const ENV_PREFIX: &str = "CLOUD_ARCHITECT";

/// Load configuration from a TOML file layered with environment overrides.
/// A missing file is not an error; defaults apply.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ArchConfig> {
    load_config_with_env(path, environment(ENV_PREFIX))
}

fn environment(prefix: &str) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

pub(crate) fn load_config_with_env<P: AsRef<Path>>(
    path: P,
    env: Environment,
) -> Result<ArchConfig> {
    let path = path.as_ref();
    if !path.exists() {
        crate::log_debug!("No config at {}, using defaults", path.display());
    }

    let settings = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(env)
        .build()
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let config: ArchConfig = settings
        .try_deserialize()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    crate::log_debug!("Loaded config with variant {}", config.variant);
    Ok(config)
}

/// Save configuration to a file
pub fn save_config<P: AsRef<Path>>(config: &ArchConfig, path: P) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Create a default configuration template
pub fn create_default_config() -> ArchConfig {
    ArchConfig {
        variant: Variant::Extended,
        sliders: Configuration::default(),
        stages: None,
        risk_rules: None,
    }
}

/// Read a slider file into a flat JSON object
fn read_slider_file(
    path: &Path,
    parse: fn(&str) -> Result<Value>,
) -> Result<serde_json::Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read slider file: {}", path.display()))?;
    let value = parse(&content)
        .with_context(|| format!("Failed to parse slider file: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow::anyhow!(
            "Slider file must contain a table at the root level: {}",
            path.display()
        )),
    }
}

fn parse_toml(content: &str) -> Result<Value> {
    // Parse as TOML value first, then convert to JSON value
    let toml_value: toml::Value = toml::from_str(content)?;
    Ok(serde_json::to_value(toml_value)?)
}

fn parse_json(content: &str) -> Result<Value> {
    Ok(serde_json::from_str(content)?)
}

/// Layer slider sources over `base`. Later sources win: TOML file, JSON
/// file, then `key=value` assignments.
pub fn merge_slider_sources(
    base: Configuration,
    toml_file: Option<&Path>,
    json_file: Option<&Path>,
    assignments: &[String],
) -> Result<Configuration> {
    let files = [
        (toml_file, parse_toml as fn(&str) -> Result<Value>, "TOML"),
        (json_file, parse_json, "JSON"),
    ];
    let mut sliders = base;
    for (path, parse, kind) in files {
        let Some(path) = path else { continue };
        let map = read_slider_file(path, parse)?;
        sliders = sliders
            .apply_overrides(&map)
            .with_context(|| format!("Invalid slider values in {}", path.display()))?;
        crate::log_info!(
            "Loaded {} slider values from {} file: {}",
            map.len(),
            kind,
            path.display()
        );
    }

    for item in assignments {
        sliders = sliders.assign(item)?;
    }
    crate::log_debug!("Resolved sliders: {:?}", sliders);
    Ok(sliders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Slider, StageLayout};
    use std::collections::HashMap;
    use std::io::Write;

    /// Environment source that reads `vars` instead of the process environment.
    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_with_env(dir.path().join("absent.toml"), env_from(&[])).unwrap();
        assert_eq!(config, create_default_config());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud_architect.toml");
        let mut config = create_default_config();
        config.variant = Variant::Compact;
        config.sliders = config.sliders.with(Slider::Security, 3).unwrap();
        config.stages = Some(StageLayout::new(["Ingest", "Train"], ["Repo"], ["Sec_ID"]));
        save_config(&config, &path).unwrap();

        let loaded = load_config_with_env(&path, env_from(&[])).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_with_custom_rules() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
variant = "standard"

[sliders]
num_services = 2

[[risk_rules]]
component = "Gateway"
failure_mode = "Throttling"
severity = {{ base = 9, slider = "scalability", divisor = 2, op = "sub" }}
occurrence = 4
detection = {{ base = 3, slider = "ai", divisor = 5 }}
"#
        )
        .unwrap();

        let config = load_config_with_env(file.path(), env_from(&[])).unwrap();
        assert_eq!(config.variant, Variant::Standard);
        assert_eq!(config.sliders.get(Slider::NumServices), 2);
        assert_eq!(config.sliders.get(Slider::Security), 7);
        let rules = config.risk_rules.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].component, "Gateway");
    }

    #[test]
    fn out_of_range_slider_in_file_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[sliders]\nsecurity = 99").unwrap();
        let err = load_config_with_env(file.path(), env_from(&[])).unwrap_err();
        assert!(format!("{err:#}").contains("outside the allowed range"), "{err:#}");
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "variant = \"standard\"\n[sliders]\nai = 2\nsecurity = 4").unwrap();
        let env = env_from(&[
            ("CLOUD_ARCHITECT__SLIDERS__AI", "9"),
            ("CLOUD_ARCHITECT__VARIANT", "compact"),
        ]);

        let config = load_config_with_env(file.path(), env).unwrap();
        assert_eq!(config.sliders.get(Slider::Ai), 9);
        assert_eq!(config.sliders.get(Slider::Security), 4);
        assert_eq!(config.variant, Variant::Compact);
    }

    fn slider_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn later_slider_sources_win() {
        let base = Configuration::new([
            (Slider::Security, 2),
            (Slider::Ai, 2),
            (Slider::CiCd, 2),
            (Slider::Containers, 2),
        ])
        .unwrap();
        let toml_file = slider_file(".toml", "security = 3\nai = 3\nci_cd = 3\n");
        let json_file = slider_file(".json", r#"{"ai": 4, "ci_cd": "4"}"#);
        let set = vec!["ci_cd=5".to_string()];

        let sliders =
            merge_slider_sources(base, Some(toml_file.path()), Some(json_file.path()), &set)
                .unwrap();
        assert_eq!(sliders.get(Slider::Containers), 2);
        assert_eq!(sliders.get(Slider::Security), 3);
        assert_eq!(sliders.get(Slider::Ai), 4);
        assert_eq!(sliders.get(Slider::CiCd), 5);
    }

    #[test]
    fn no_slider_sources_keeps_base() {
        let base = Configuration::default().with(Slider::Dataiku, 9).unwrap();
        assert_eq!(merge_slider_sources(base, None, None, &[]).unwrap(), base);
    }

    #[test]
    fn slider_file_root_must_be_a_table() {
        let array = slider_file(".json", "[1, 2, 3]");
        let err =
            merge_slider_sources(Configuration::default(), None, Some(array.path()), &[])
                .unwrap_err();
        assert!(format!("{err:#}").contains("table at the root level"), "{err:#}");

        let scalar = slider_file(".json", "7");
        assert!(
            merge_slider_sources(Configuration::default(), None, Some(scalar.path()), &[])
                .is_err()
        );
    }

    #[test]
    fn bad_slider_file_values_name_the_file() {
        let file = slider_file(".toml", "security = 42\n");
        let err = merge_slider_sources(Configuration::default(), Some(file.path()), None, &[])
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid slider values in"), "{message}");
        assert!(message.contains("outside the allowed range"), "{message}");
    }
}
