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


use anyhow::{self, Context};
use exitcode;
use getopts::Options;
use tokio;

use ghprofile::{Config, MultiError, Profile, ProfileFetcher};

use std::env;
use std::io::{self, Write};
use std::process;


const VERSION: &'static str = env!("CARGO_PKG_VERSION");


#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .map(String::as_str)
        .unwrap_or("ghprofile");

    let mut opts = Options::new();

    opts.optopt("", "api-url", "GitHub API base URL", "URL");
    opts.optopt("", "timeout", "request timeout in seconds", "SECONDS");
    opts.optflag("c", "compact", "print each profile on a single line");
    opts.optflag("h", "help", "print this help menu");
    opts.optflag("V", "version", "show the program version");

    let opt_matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {}", e);

            process::exit(exitcode::USAGE);
        },
    };

    if opt_matches.opt_present("h") {
        print_usage(program, &opts);

        process::exit(exitcode::OK);
    }

    if opt_matches.opt_present("V") {
        println!("{}", VERSION);

        process::exit(exitcode::OK);
    }

    if opt_matches.free.is_empty() {
        print_usage(program, &opts);

        process::exit(exitcode::USAGE);
    }

    let config = match load_config(&opt_matches) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {:#}", e);

            process::exit(exitcode::CONFIG);
        },
    };

    let fetcher = match ProfileFetcher::new(config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {:#}", anyhow::Error::new(e));

            process::exit(exitcode::SOFTWARE);
        },
    };

    let compact = opt_matches.opt_present("c");

    if let Err(errors) = run(&fetcher, &opt_matches.free, compact).await {
        eprintln!("{}", errors);

        if errors.all_not_found() {
            process::exit(exitcode::NOUSER);
        }

        process::exit(exitcode::UNAVAILABLE);
    }
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("usage: {} [options] USERNAME...", program);

    print!("{}", opts.usage(&brief));
}

/// Build the configuration from `.env`, the environment, and command line
/// overrides, in that order.
fn load_config(opt_matches: &getopts::Matches) -> anyhow::Result<Config> {
    // A missing `.env` file is fine.
    dotenvy::dotenv().ok();

    let mut config = Config::from_env()
        .context("unable to read configuration from environment")?;

    if let Some(url) = opt_matches.opt_str("api-url") {
        config.set_api_url(&url)?;
    }

    if let Some(secs) = opt_matches.opt_str("timeout") {
        config.set_timeout(&secs)?;
    }

    if config.token.is_none() {
        log::info!("GITHUB_TOKEN is not set, using anonymous access");
    }

    Ok(config)
}

/// Fetch and print each profile in turn, collecting failures.
async fn run(
    fetcher: &ProfileFetcher,
    usernames: &[String],
    compact: bool,
) -> Result<(), MultiError> {
    let mut errors = MultiError::new();

    for username in usernames {
        let result = fetcher.fetch_profile(username)
            .await
            .with_context(|| {
                format!("unable to fetch profile for '{}'", username)
            })
            .and_then(|profile| {
                print_profile(&profile, compact)
                    .context("unable to write profile")
            });

        if let Err(e) = result {
            errors.push(e);
        }
    }

    errors.into_result()
}

fn print_profile(profile: &Profile, compact: bool) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if compact {
        serde_json::to_writer(&mut out, profile)?;
    } else {
        serde_json::to_writer_pretty(&mut out, profile)?;
    }

    writeln!(out)?;

    Ok(())
}
