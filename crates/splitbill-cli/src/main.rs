// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;

use anyhow::{Context, Result};
use config::Config;
use log::info;
use splitbill_app::{AppState, demo_friends};
use std::env;
use std::path::PathBuf;

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
            "load config {}; run `splitbill --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    env_logger::Builder::new()
        .filter_level(config.log_level()?)
        .parse_default_env()
        .init();

    let mut state = initial_state(&config, &options);
    info!(
        "session started with {} friends",
        state.list_friends().len()
    );

    if options.check_only {
        return Ok(());
    }

    if options.list_only {
        print!("{}", render_friend_listing(&state));
        return Ok(());
    }

    splitbill_tui::run_app(&mut state)
}

fn initial_state(config: &Config, options: &CliOptions) -> AppState {
    let friends = if config.seed_demo() && !options.empty {
        demo_friends()
    } else {
        Vec::new()
    };
    AppState::with_friends(friends).with_placeholder_image(config.default_image_ref())
}

fn render_friend_listing(state: &AppState) -> String {
    let mut out = String::new();
    for friend in state.list_friends() {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            friend.id,
            friend.name,
            friend.standing_label()
        ));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    empty: bool,
    list_only: bool,
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
        print_config_path: false,
        print_example: false,
        empty: false,
        list_only: false,
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
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--empty" => {
                options.empty = true;
            }
            "--list" => {
                options.list_only = true;
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
    println!("splitbill");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --empty                  Start without the demo friends");
    println!("  --list                   Print friends and balances, then exit");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
}
