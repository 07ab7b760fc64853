// Copyright (c) 2021  Teddy Wing
//
// This file is part of Ghprofile.
//
// Ghprofile is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Ghprofile is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Ghprofile. If not, see <https://www.gnu.org/licenses/>.


use url::Url;
use thiserror;

use std::env;
use std::time::Duration;


pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

const TOKEN_VAR: &'static str = "GITHUB_TOKEN";
const API_URL_VAR: &'static str = "GITHUB_API_URL";
const TIMEOUT_VAR: &'static str = "GITHUB_TIMEOUT_SECS";


#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid API URL '{url}'")]
    ApiUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("API URL '{0}' cannot be used as a base")]
    CannotBeABase(String),

    #[error("invalid timeout '{0}': expected a positive whole number of seconds")]
    Timeout(String),
}


/// Settings for talking to the GitHub API.
///
/// Built once at startup and handed to the fetcher. Nothing in the library
/// reads the environment on its own.
#[derive(Clone)]
pub struct Config {
    /// Bearer token. Requests are anonymous when `None`.
    pub token: Option<String>,
    pub api_url: Url,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Anonymous access to the public GitHub API.
    pub fn new() -> Self {
        Config {
            token: None,
            api_url: Url::parse(DEFAULT_API_URL)
                .expect("default API URL is valid"),
            timeout: None,
        }
    }

    /// Read `GITHUB_TOKEN`, `GITHUB_API_URL`, and `GITHUB_TIMEOUT_SECS`.
    ///
    /// An empty token counts as no token.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::new();

        config.token = lookup(TOKEN_VAR)
            .filter(|t| !t.is_empty());

        if let Some(url) = lookup(API_URL_VAR).filter(|u| !u.is_empty()) {
            config.set_api_url(&url)?;
        }

        if let Some(secs) = lookup(TIMEOUT_VAR).filter(|s| !s.is_empty()) {
            config.set_timeout(&secs)?;
        }

        Ok(config)
    }

    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_api_url(&mut self, url: &str) -> Result<(), Error> {
        let parsed = Url::parse(url)
            .map_err(|e| Error::ApiUrl { url: url.to_owned(), source: e })?;

        if parsed.cannot_be_a_base() {
            return Err(Error::CannotBeABase(url.to_owned()));
        }

        self.api_url = parsed;

        Ok(())
    }

    pub fn set_timeout(&mut self, secs: &str) -> Result<(), Error> {
        let secs = secs.trim()
            .parse::<u64>()
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| Error::Timeout(secs.to_owned()))?;

        self.timeout = Some(Duration::from_secs(secs));

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// Keep the token out of debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup_in(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_anonymous_public_api() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();

        assert!(config.token.is_none());
        assert_eq!(config.api_url.as_str(), "https://api.github.com/");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn reads_token_from_environment() {
        let config = Config::from_lookup(
            lookup_in(&[("GITHUB_TOKEN", "ghp_secret")]),
        ).unwrap();

        assert_eq!(config.token.as_deref(), Some("ghp_secret"));
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let config = Config::from_lookup(
            lookup_in(&[("GITHUB_TOKEN", "")]),
        ).unwrap();

        assert!(config.token.is_none());
    }

    #[test]
    fn reads_api_url_and_timeout() {
        let config = Config::from_lookup(lookup_in(&[
            ("GITHUB_API_URL", "http://localhost:8080/api/v3"),
            ("GITHUB_TIMEOUT_SECS", "15"),
        ])).unwrap();

        assert_eq!(config.api_url.as_str(), "http://localhost:8080/api/v3");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_unparseable_api_url() {
        let result = Config::from_lookup(
            lookup_in(&[("GITHUB_API_URL", "not a url")]),
        );

        assert!(matches!(result, Err(Error::ApiUrl { .. })));
    }

    #[test]
    fn rejects_api_url_that_cannot_be_a_base() {
        let mut config = Config::new();

        assert!(matches!(
            config.set_api_url("mailto:octocat@example.com"),
            Err(Error::CannotBeABase(_)),
        ));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let result = Config::from_lookup(
            lookup_in(&[("GITHUB_TIMEOUT_SECS", "soon")]),
        );

        assert!(matches!(result, Err(Error::Timeout(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = Config::new();

        assert!(matches!(config.set_timeout("0"), Err(Error::Timeout(_))));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = Config::new().with_token("ghp_secret");

        let debug = format!("{:?}", config);

        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
