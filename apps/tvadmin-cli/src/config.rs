//! Connection settings: command-line flags layered over the environment.

use tvadmin_webapi::WebApiConfig;

use crate::error::CliResult;

/// Build the Web API configuration.
///
/// `--api-token` and `--api-url` win over `TEAMVIEWER_API_TOKEN` and
/// `TEAMVIEWER_API_URL`; everything else comes from `env`.
pub fn load_config<F>(
    api_token: Option<&str>,
    api_url: Option<&str>,
    env: F,
) -> CliResult<WebApiConfig>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let config = WebApiConfig::from_reader(|key| {
        let flag = match key {
            "TEAMVIEWER_API_TOKEN" => api_token,
            "TEAMVIEWER_API_URL" => api_url,
            _ => None,
        };
        match flag {
            Some(value) => Ok(value.to_string()),
            None => env(key),
        }
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::VarError;

    fn env_with_token(key: &str) -> Result<String, VarError> {
        match key {
            "TEAMVIEWER_API_TOKEN" => Ok("from-env".to_string()),
            _ => Err(VarError::NotPresent),
        }
    }

    #[test]
    fn test_env_only() {
        let config = load_config(None, None, env_with_token).unwrap();
        assert_eq!(config.api_token.expose(), "from-env");
        assert_eq!(config.api_url, tvadmin_webapi::DEFAULT_API_URL);
    }

    #[test]
    fn test_flags_override_env() {
        let config = load_config(
            Some("from-flag"),
            Some("http://localhost:9000"),
            env_with_token,
        )
        .unwrap();
        assert_eq!(config.api_token.expose(), "from-flag");
        assert_eq!(config.api_url, "http://localhost:9000");
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = load_config(None, None, |_| Err(VarError::NotPresent)).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("TEAMVIEWER_API_TOKEN"));
    }
}
