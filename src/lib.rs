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


pub mod config;
pub mod fetcher;
pub mod github;
pub mod multi_error;
pub mod profile;

pub use config::Config;
pub use fetcher::ProfileFetcher;
pub use github::Error;
pub use multi_error::MultiError;
pub use profile::{Profile, ProjectSummary};
