//! souk: find marketplace listings near a point
//!
//! Runs the proximity search against a JSON fixture or the hosted listings
//! table, and exposes the distance and bounding-box math for debugging.

use clap::{Parser, Subcommand};
use souk_cli::output::Status;
use souk_cli::Settings;
use souk_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{bbox, distance, nearby};

/// Nearby-listings search for the souk marketplace
#[derive(Parser)]
#[command(name = "souk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (default: .souk.toml or souk.toml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published listings within a radius, nearest first
    Nearby {
        /// Latitude of the search center
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the search center
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Search radius in kilometers (non-positive values mean 1 km)
        #[arg(short, long, allow_negative_numbers = true)]
        radius: Option<f64>,

        /// Maximum candidates fetched from the store
        #[arg(short, long)]
        limit: Option<usize>,

        /// Search a JSON array of listings instead of the hosted table
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Dump collected metrics to stderr afterwards
        #[arg(long)]
        metrics: bool,
    },

    /// Great-circle distance between two points
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },

    /// Bounding box used to pre-filter a search
    Bbox {
        /// Latitude of the center
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the center
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Radius in kilometers
        #[arg(short, long, allow_negative_numbers = true)]
        radius: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            Status::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        settings.telemetry.clone()
    };
    if let Err(e) = souk_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    if let Some(path) = &settings.path {
        tracing::debug!(path = %path.display(), "Loaded settings");
    }

    let result = match cli.command {
        Commands::Nearby {
            lat,
            lng,
            radius,
            limit,
            fixture,
            json,
            metrics,
        } => {
            let args = nearby::Args {
                lat,
                lng,
                radius_km: radius.unwrap_or(settings.search.default_radius_km),
                limit: limit.unwrap_or(settings.search.candidate_limit),
                fixture,
                json,
                metrics,
            };
            nearby::run(&args).await
        }

        Commands::Distance { lat1, lng1, lat2, lng2 } => distance::run(lat1, lng1, lat2, lng2),

        Commands::Bbox { lat, lng, radius } => bbox::run(lat, lng, radius),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
