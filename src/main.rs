use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod client;
mod config;
mod error;
mod models;
mod playlist;
mod server;

#[cfg(test)]
mod test_utils;

use crate::config::load_config;
use crate::models::PlaylistRequest;
use crate::playlist::PlaylistGenerator;

#[derive(Parser)]
#[command(name = "jamcast")]
#[command(about = "Weather-based playlist generator backed by OpenWeatherMap and Spotify")]
#[command(version)]
struct Args {
    /// Quiet mode - only log warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a playlist for a city and print it as JSON
    Generate {
        /// City to read the weather for
        city: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Fetch recommendations for any mood label (unknown labels get generic seeds)
    Recommend {
        #[arg(short = 'm', long = "mood")]
        mood: String,
    },
    /// Run the HTTP API
    Serve {
        /// Address to bind, overrides JAMCAST_BIND_ADDR
        #[arg(short = 'a', long = "addr")]
        addr: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    // Load configuration from .env
    let mut config = load_config()?;

    match args.command {
        Command::Generate { city, pretty } => {
            let request = PlaylistRequest::new(city);
            let city = request.validate()?;
            let generator = PlaylistGenerator::from_config(&config);
            let playlist = generator.generate_playlist(city)?;
            let json = if pretty {
                serde_json::to_string_pretty(&playlist)?
            } else {
                serde_json::to_string(&playlist)?
            };
            println!("{json}");
        }
        Command::Recommend { mood } => {
            let generator = PlaylistGenerator::from_config(&config);
            let tracks = generator.recommend(&mood)?;
            println!("{} tracks for mood '{}':", tracks.len(), mood);
            for (i, track) in tracks.iter().enumerate() {
                println!(
                    "{:>3}. \"{}\" by {} [{}] {}",
                    i + 1,
                    track.name,
                    track.artist,
                    track.album_name,
                    track.spotify_url
                );
            }
        }
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.bind_addr = addr;
            }
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}

/// Logs go to stderr so `generate` output stays machine-readable
fn init_logging(quiet: bool) {
    let default_filter = if quiet {
        "jamcast=warn,tower_http=warn"
    } else {
        "jamcast=info,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();
}
