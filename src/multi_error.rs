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


use std::fmt;

use crate::github;


/// Collects the errors from fetching several profiles so that one bad
/// username doesn't stop the rest.
#[derive(Debug, Default, thiserror::Error)]
pub struct MultiError {
    errors: Vec<anyhow::Error>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<E: Into<anyhow::Error>>(&mut self, error: E) {
        self.errors.push(error.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when every collected error is an unknown GitHub user.
    pub fn all_not_found(&self) -> bool {
        !self.errors.is_empty()
            && self.errors.iter().all(|e| {
                matches!(
                    e.downcast_ref::<github::Error>(),
                    Some(github::Error::NotFound { .. }),
                )
            })
    }

    /// `Ok` if nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.errors
                .iter()
                .map(|e| format!("{:#}", e))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

impl From<anyhow::Error> for MultiError {
    fn from(error: anyhow::Error) -> Self {
        MultiError { errors: vec![error] }
    }
}

impl From<Vec<anyhow::Error>> for MultiError {
    fn from(errors: Vec<anyhow::Error>) -> Self {
        MultiError { errors }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::{anyhow, Context};
    use reqwest::StatusCode;

    fn not_found(username: &str) -> anyhow::Error {
        Err::<(), _>(github::Error::NotFound { username: username.to_owned() })
            .with_context(|| format!("unable to fetch profile for '{}'", username))
            .unwrap_err()
    }

    #[test]
    fn displays_each_error_on_its_own_line_with_causes() {
        let mut errors = MultiError::new();
        errors.push(not_found("ghost"));
        errors.push(anyhow!("second"));

        assert_eq!(
            errors.to_string(),
            "unable to fetch profile for 'ghost': GitHub user 'ghost' not found\n\
            second",
        );
    }

    #[test]
    fn empty_collection_is_ok() {
        assert!(MultiError::new().into_result().is_ok());
    }

    #[test]
    fn all_not_found_sees_through_context() {
        let errors = MultiError::from(vec![not_found("a"), not_found("b")]);

        assert!(errors.all_not_found());
    }

    #[test]
    fn all_not_found_is_false_with_other_errors() {
        let mut errors = MultiError::from(not_found("a"));
        errors.push(github::Error::Upstream {
            user_status: StatusCode::INTERNAL_SERVER_ERROR,
            repos_status: StatusCode::OK,
        });

        assert_eq!(errors.len(), 2);
        assert!(!errors.all_not_found());
    }

    #[test]
    fn all_not_found_is_false_when_empty() {
        assert!(!MultiError::new().all_not_found());
    }
}
