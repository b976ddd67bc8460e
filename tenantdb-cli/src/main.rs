// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! TenantDB CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        // -v/--verbose flag takes precedence
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let store_args = cli.store;
    match cli.command {
        Commands::Version => {
            println!("{} {}", "TenantDB".bold().green(), tenantdb::VERSION);
            println!("Multi-tenant document store");
            Ok(())
        }
        Commands::Schema { action } => cli::handle_schema(&store_args, action),
        Commands::Record { action } => cli::handle_record(&store_args, action),
        Commands::Stats { format } => cli::handle_stats(&store_args, format),
        Commands::Request {
            method,
            target,
            body,
        } => cli::handle_request(&store_args, &method, &target, body.as_deref()),
        Commands::Reset { yes } => cli::handle_reset(&store_args, yes),
    }
}
