// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use roster_api::Client;
use roster_app::AppState;
use runtime::ApiRuntime;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `roster --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let level = match &options.log_level {
        Some(level) => config::parse_level(level).context("--log-level")?,
        None => config.log_level()?,
    };
    let log_path = match &options.log_file {
        Some(path) => path.clone(),
        None => config.log_path()?,
    };
    logging::init(&log_path, level)?;

    let base_url = options
        .base_url
        .clone()
        .unwrap_or_else(|| config.api_base_url());
    let client = Client::new(&base_url, config.api_timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;
    info!(
        base_url = client.base_url(),
        timeout_ms = client.timeout().as_millis() as u64,
        log = %log_path.display(),
        "roster starting"
    );

    if options.check_only {
        let users = client
            .list_users()
            .with_context(|| format!("check {}/users", client.base_url()))?;
        println!("ok: {} serves {} users", client.base_url(), users.len());
        return Ok(());
    }

    let mut state = AppState::default();
    let mut runtime = ApiRuntime::new(client);
    roster_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    base_url: Option<String>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        base_url: None,
        log_file: None,
        log_level: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--base-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--base-url requires a URL"))?;
                options.base_url = Some(value.as_ref().to_owned());
            }
            "--log-file" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--log-file requires a file path"))?;
                options.log_file = Some(PathBuf::from(value.as_ref()));
            }
            "--log-level" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--log-level requires a level"))?;
                options.log_level = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("roster: browse a remote user directory");
    println!("  --config <path>          Use a specific config path");
    println!("  --base-url <url>         Directory service URL (overrides [api].base_url)");
    println!("  --log-file <path>        Write logs to this file");
    println!("  --log-level <level>      off, error, warn, info, debug or trace");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and reach /users, then exit");
    println!("  --help                   Show this help");
}
