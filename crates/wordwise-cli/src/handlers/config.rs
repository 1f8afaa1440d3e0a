//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::redaction;
use crate::output::OutputWriter;

/// Handle the config command
pub async fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Path => handle_config_path(output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Set upstream.api_key or WORDWISE_API_KEY before looking up words.")?;
    Ok(())
}

/// Handle config show subcommand; credentials are masked
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.write(&render_config(config, args.format)?)
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    let mut value = serde_json::to_value(config)?;
    redaction::redact_json_value(&mut value);

    let mut content = match format {
        ConfigFormat::Toml => toml::to_string_pretty(&value)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&value)?,
        ConfigFormat::Yaml => serde_yaml::to_string(&value)?,
    };
    if !content.ends_with('\n') {
        content.push('\n');
    }
    Ok(content)
}

/// Handle config path subcommand
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    let path = Config::user_config_path()
        .ok_or_else(|| Error::config("Unable to determine user config directory"))?;
    output.writeln(&path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::test_support::Captured;
    use tempfile::TempDir;

    fn writer() -> (OutputWriter, Captured) {
        let captured = Captured::default();
        let writer =
            OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(captured.clone()));
        (writer, captured)
    }

    #[test]
    fn test_show_masks_api_key() {
        let mut config = Config::default();
        config.upstream.api_key = Some("super-secret".to_string());

        for format in [ConfigFormat::Toml, ConfigFormat::Json, ConfigFormat::Yaml] {
            let rendered = render_config(&config, format).unwrap();
            assert!(!rendered.contains("super-secret"), "{format:?} leaked the key");
            assert!(rendered.contains("***"));
        }
    }

    #[test]
    fn test_show_toml_parses_back() {
        let rendered = render_config(&Config::default(), ConfigFormat::Toml).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_init_writes_once_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let (mut output, captured) = writer();

        handle_config_init(
            ConfigInitArgs {
                force: false,
                path: Some(path.clone()),
            },
            &mut output,
        )
        .unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());

        std::fs::write(&path, "[server]\nport = 1\n").unwrap();
        handle_config_init(
            ConfigInitArgs {
                force: false,
                path: Some(path.clone()),
            },
            &mut output,
        )
        .unwrap();
        assert_eq!(Config::from_file(&path).unwrap().server.port, 1);
        assert!(captured.text().contains("already exists"));

        handle_config_init(
            ConfigInitArgs {
                force: true,
                path: Some(path.clone()),
            },
            &mut output,
        )
        .unwrap();
        assert_eq!(Config::from_file(&path).unwrap().server.port, 8080);
    }
}
