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


use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{ClientBuilder, StatusCode};
use serde::Deserialize;
use thiserror;
use url::Url;

use crate::config::Config;


const USER_AGENT: &'static str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
);

pub const ACCEPT: &'static str = "application/vnd.github.v3+json";

/// Only the first page of repositories is ever requested.
pub const REPOS_PER_PAGE: u32 = 100;


#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("GitHub user '{username}' not found")]
    NotFound {
        username: String,
    },

    #[error(
        "GitHub API error (user status: {user_status}, \
        repos status: {repos_status})"
    )]
    Upstream {
        user_status: StatusCode,
        repos_status: StatusCode,
    },

    #[error("request error")]
    Transport(#[from] reqwest::Error),

    #[error("response parse error")]
    Parse(#[from] serde_json::Error),

    #[error("request header error")]
    Header(#[from] header::InvalidHeaderValue),

    #[error("API URL '{0}' cannot hold a request path")]
    Url(String),
}


/// A user record from `/users/{username}`.
#[derive(Debug, Default, Deserialize)]
pub struct User {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
}


/// A repository record from `/users/{username}/repos`.
#[derive(Debug, Deserialize)]
pub struct Repo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,

    pub stargazers_count: Option<u64>,

    pub pushed_at: Option<String>,
}

impl Repo {
    /// Get the star count, treating a missing or `null` count as zero.
    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }

    /// Get the repository description, or `None` if it is missing or empty.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
    }

    /// Get the primary language, or `None` if it is missing or empty.
    pub fn language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .filter(|l| !l.is_empty())
    }
}


/// Sends GET requests to the API.
#[async_trait]
pub trait Transport: Send + Sync {
    type Reply: Reply;

    async fn get(
        &self,
        url: Url,
        headers: HeaderMap,
    ) -> Result<Self::Reply, Error>;
}

/// A response whose status is known but whose body has not been read yet.
#[async_trait]
pub trait Reply: Send + Sized {
    fn status(&self) -> StatusCode;

    async fn text(self) -> Result<String, Error>;
}


/// Talks to the API over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpTransport { client: builder.build()? })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Reply = reqwest::Response;

    async fn get(
        &self,
        url: Url,
        headers: HeaderMap,
    ) -> Result<Self::Reply, Error> {
        let response = self.client.request(reqwest::Method::GET, url)
            .headers(headers)
            .send()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl Reply for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }

    async fn text(self) -> Result<String, Error> {
        Ok(reqwest::Response::text(self).await?)
    }
}


/// Build the headers shared by every request.
///
/// `Authorization` is only added when a token is given.
pub fn request_headers(token: Option<&str>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        value.set_sensitive(true);

        headers.insert(header::AUTHORIZATION, value);
    }

    Ok(headers)
}

/// URL of the user record.
pub fn user_url(api_url: &Url, username: &str) -> Result<Url, Error> {
    endpoint(api_url, &["users", username])
}

/// URL of the first page of the user's repositories, most recently pushed
/// first.
pub fn repos_url(api_url: &Url, username: &str) -> Result<Url, Error> {
    let mut url = endpoint(api_url, &["users", username, "repos"])?;

    url.query_pairs_mut()
        .append_pair("per_page", &REPOS_PER_PAGE.to_string())
        .append_pair("sort", "pushed");

    Ok(url)
}

fn endpoint(api_url: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = api_url.clone();

    url.path_segments_mut()
        .map_err(|_| Error::Url(api_url.to_string()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
