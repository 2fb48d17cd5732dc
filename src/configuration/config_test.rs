use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    assert!(res.contains("backend = \"proxy\""));
    assert!(res.contains("[possible values: proxy, proxy-legacy]"));
    assert!(res.contains("endpoint = \"https://gemini-api-proxy.markd-voznyuk.workers.dev\""));
    assert!(res.contains("# theme-file = \"\""));
    assert!(!res.contains("config-file"));
}

#[tokio::test]
async fn it_loads_config_from_file_with_flag_precedence() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "fhome",
        "chat",
        "-c",
        "./config.example.toml",
        "--endpoint",
        "http://localhost:8787",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Backend), "proxy-legacy");
    assert_eq!(Config::get(ConfigKey::Endpoint), "http://localhost:8787");
    assert_eq!(Config::get(ConfigKey::Theme), "InspiredGitHub");
    assert_eq!(Config::get(ConfigKey::ConfigFile), "./config.example.toml");
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["fhome", "chat", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
