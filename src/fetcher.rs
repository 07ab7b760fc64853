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


use futures::try_join;
use log::{debug, trace};
use reqwest::StatusCode;

use crate::config::Config;
use crate::github::{self, Error, HttpTransport, Reply, Transport};
use crate::profile::Profile;


/// Fetches GitHub users and turns them into `Profile`s.
#[derive(Debug)]
pub struct ProfileFetcher<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl ProfileFetcher<HttpTransport> {
    pub fn new(config: Config) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config)?;

        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ProfileFetcher<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        ProfileFetcher { config, transport }
    }

    /// Fetch the user record and first page of repositories for `username`
    /// and compose them into a `Profile`.
    ///
    /// Both requests are sent together and both must finish before either
    /// status is checked. Any failure fails the whole profile.
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile, Error> {
        let headers = github::request_headers(self.config.token.as_deref())?;
        let user_url = github::user_url(&self.config.api_url, username)?;
        let repos_url = github::repos_url(&self.config.api_url, username)?;

        debug!("GET {}", user_url);
        debug!("GET {}", repos_url);

        let (user_reply, repos_reply) = try_join!(
            self.transport.get(user_url, headers.clone()),
            self.transport.get(repos_url, headers),
        )?;

        let user_status = user_reply.status();
        let repos_status = repos_reply.status();

        debug!(
            "'{}': user status {}, repos status {}",
            username,
            user_status,
            repos_status,
        );

        check_status(username, user_status, repos_status)?;

        let (user_body, repos_body) = try_join!(
            user_reply.text(),
            repos_reply.text(),
        )?;

        let user: github::User = serde_json::from_str(&user_body)?;
        let repos: Vec<github::Repo> = serde_json::from_str(&repos_body)?;

        trace!("'{}': {} repositories", username, repos.len());

        Ok(Profile::compose(username, user, repos))
    }
}


/// A missing user takes precedence over any other failure status.
fn check_status(
    username: &str,
    user_status: StatusCode,
    repos_status: StatusCode,
) -> Result<(), Error> {
    if user_status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound { username: username.to_owned() });
    }

    if !user_status.is_success() || !repos_status.is_success() {
        return Err(Error::Upstream { user_status, repos_status });
    }

    Ok(())
}
