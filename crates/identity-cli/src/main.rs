//! identity-fetch - forward a bearer token to an identity API from the shell.
//!
//! Builds the same request a service would make on behalf of one of its
//! callers: the `--cookie` flag stands in for the inbound request's `Cookie`
//! header, and the decoded JSON reply is pretty-printed to stdout.
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use http::HeaderMap;
use http::header::{COOKIE, HeaderValue};
use log::info;

use identity_client::{IdentityClient, JsonBody};
use identity_common::{ClientConfig, normalize_bearer_prefix};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Identity API endpoint (overrides the config file)
    #[arg(long, env = "IDENTITY_URL")]
    url: Option<String>,

    /// Name of the inbound cookie that holds the token
    #[arg(long, env = "IDENTITY_COOKIE_NAME")]
    cookie_name: Option<String>,

    /// `Cookie` header of the request being forwarded, e.g. "token=abc; theme=dark"
    #[arg(long)]
    cookie: Option<String>,

    /// Token to send instead of a cookie; a missing "Bearer " prefix is added
    #[arg(long, env = "IDENTITY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// JSON object to POST; a GET is sent when omitted
    #[arg(long)]
    data: Option<String>,

    /// TOML file providing `target_url`, `cookie_name` and `preset_token`
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let inbound = inbound_headers(args.cookie.as_deref())?;
    let body = args.data.as_deref().map(parse_body).transpose()?;

    info!("Forwarding token to {}", config.target_url);
    let client = IdentityClient::new(config);

    let value = match body {
        Some(body) => client.post(&inbound, &body).await,
        None => client.get(&inbound).await,
    }
    .context("Identity request failed")?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Reads the optional config file, then applies flag and environment overrides.
fn load_config(args: &Args) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => ClientConfig::new(String::new()),
    };

    if let Some(url) = &args.url {
        config.target_url.clone_from(url);
    }
    if config.target_url.is_empty() {
        bail!("Target URL must be provided via --url, IDENTITY_URL or a config file");
    }
    if let Some(name) = &args.cookie_name {
        config = config.with_cookie_name(name.as_str());
    }
    if let Some(token) = args.token.as_deref().filter(|token| !token.is_empty()) {
        config = config.with_preset_token(normalize_bearer_prefix(token));
    }

    Ok(config)
}

/// Stand-in for the inbound request: just its `Cookie` header, if given.
fn inbound_headers(cookie: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = cookie {
        let value = HeaderValue::from_str(cookie).context("--cookie is not a valid header value")?;
        headers.insert(COOKIE, value);
    }
    Ok(headers)
}

fn parse_body(data: &str) -> Result<JsonBody> {
    serde_json::from_str(data).context("--data must be a JSON object")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use identity_common::CookieSource;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("identity-fetch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_build_config() {
        let args = parse(&["--url", "http://localhost/users", "--cookie-name", "token"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.target_url, "http://localhost/users");
        assert_eq!(config.cookie_name(), Some("token"));
        assert!(config.preset_token().is_none());
    }

    #[test]
    fn test_token_flag_is_normalized() {
        let args = parse(&["--url", "http://localhost/users", "--token", "abc"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.preset_token().unwrap().expose_secret(), "Bearer abc");

        let args = parse(&["--url", "http://localhost/users", "--token", "Bearer abc"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.preset_token().unwrap().expose_secret(), "Bearer abc");
    }

    #[test]
    fn test_config_file_with_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("identity.toml");
        fs::write(
            &path,
            "target_url = \"http://from-file/users\"\ncookie_name = \"session\"\n",
        )
        .unwrap();

        let args = parse(&[
            "--config",
            path.to_str().unwrap(),
            "--url",
            "http://from-flag/users",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.target_url, "http://from-flag/users");
        assert_eq!(config.cookie_name(), Some("session"));
    }

    #[test]
    fn test_empty_token_falls_back_to_cookie() {
        let args = parse(&[
            "--url",
            "http://localhost/users",
            "--cookie-name",
            "token",
            "--token",
            "",
        ]);
        let config = load_config(&args).unwrap();
        assert!(config.preset_token().is_none());
        assert_eq!(config.cookie_name(), Some("token"));
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse(&["--config", "/nonexistent/identity-fetch.toml"]);
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_inbound_cookie_header() {
        let headers = inbound_headers(Some("theme=dark; token=abc")).unwrap();
        assert_eq!(headers.cookie("token"), Some("abc".to_string()));
        assert!(inbound_headers(None).unwrap().is_empty());
    }

    #[test]
    fn test_body_must_be_object() {
        let body = parse_body(r#"{"name": "John"}"#).unwrap();
        assert_eq!(body["name"], "John");
        assert!(parse_body("[1, 2]").is_err());
        assert!(parse_body("not json").is_err());
    }
}
