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


use serde::Serialize;

use std::collections::HashSet;

use crate::github;


pub const TOP_PROJECTS: usize = 5;

pub const NO_DESCRIPTION: &'static str = "No description provided.";


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub title: String,
    pub description: String,
}

impl From<&github::Repo> for ProjectSummary {
    fn from(repo: &github::Repo) -> Self {
        Self {
            title: repo.name.clone(),
            description: repo.description()
                .unwrap_or(NO_DESCRIPTION)
                .to_owned(),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    pub projects: Vec<ProjectSummary>,
    pub skills: Vec<String>,
}

impl Profile {
    /// Build a profile from the raw user and repository records.
    ///
    /// Missing or empty user fields fall back to `username` for the name and
    /// to an empty string for everything else.
    pub fn compose(
        username: &str,
        user: github::User,
        mut repos: Vec<github::Repo>,
    ) -> Self {
        sort_by_stars(&mut repos);

        Profile {
            name: non_empty(user.name)
                .unwrap_or_else(|| username.to_owned()),
            bio: non_empty(user.bio).unwrap_or_default(),
            email: non_empty(user.email).unwrap_or_default(),
            location: non_empty(user.location).unwrap_or_default(),
            projects: top_projects(&repos),
            skills: skills(&repos),
        }
    }
}


/// Most starred first. Equal star counts keep their relative order.
pub fn sort_by_stars(repos: &mut [github::Repo]) {
    repos.sort_by(|a, b| b.stars().cmp(&a.stars()));
}

/// Summarise the first `TOP_PROJECTS` repositories.
///
/// Expects `repos` to already be ordered with `sort_by_stars`.
pub fn top_projects(repos: &[github::Repo]) -> Vec<ProjectSummary> {
    repos.iter()
        .take(TOP_PROJECTS)
        .map(ProjectSummary::from)
        .collect()
}

/// Distinct repository languages in the order they first appear.
pub fn skills(repos: &[github::Repo]) -> Vec<String> {
    let mut seen = HashSet::new();

    repos.iter()
        .filter_map(github::Repo::language)
        .filter(|language| seen.insert(*language))
        .map(str::to_owned)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
