//! Podcastr - podcast listening client

use anyhow::Context;
use clap::{Parser, Subcommand};
use podcastr_cli::{CliConfig, Session};
use podcastr_core::{EpisodeFeed, EpisodeListing, JsonFileSource};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcastr")]
#[command(about = "Podcastr podcast player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the latest releases and all other episodes
    List {
        /// Episode feed (JSON array of records, see data/episodes.json)
        #[arg(short, long)]
        feed: Option<PathBuf>,
        /// Maximum number of episodes to fetch
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Play the feed as a playlist through a simulated backend
    Play {
        /// Episode feed (JSON array of records, see data/episodes.json)
        #[arg(short, long)]
        feed: Option<PathBuf>,
        /// Playlist index to start from
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        /// Pick a random episode once the playlist runs out
        #[arg(long)]
        shuffle: bool,
        /// Repeat the current episode
        #[arg(long = "loop")]
        looping: bool,
        /// Stop after this many simulated seconds
        #[arg(long, default_value_t = 24 * 60 * 60)]
        max_ticks: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::List { feed, limit } => {
            if let Some(feed) = feed {
                config.feed.path = feed;
            }
            if let Some(limit) = limit {
                config.feed.limit = limit;
            }
            config.validate()?;
            list(&config)?;
        }
        Commands::Play {
            feed,
            index,
            shuffle,
            looping,
            max_ticks,
        } => {
            if let Some(feed) = feed {
                config.feed.path = feed;
            }
            config.playback.shuffling |= shuffle;
            config.playback.looping |= looping;
            play(&config, index, max_ticks)?;
        }
    }

    Ok(())
}

fn load_feed(config: &CliConfig) -> anyhow::Result<EpisodeFeed> {
    let source = JsonFileSource::new(&config.feed.path);
    EpisodeFeed::load(&source, &config.feed_query(), config.feed.latest)
        .with_context(|| format!("Failed to load feed from {:?}", config.feed.path))
}

fn list(config: &CliConfig) -> anyhow::Result<()> {
    let feed = load_feed(config)?;

    println!("Latest releases");
    for (index, listing) in feed.latest().iter().enumerate() {
        print_listing(index, listing);
    }

    println!();
    println!("All episodes");
    for (n, listing) in feed.rest().iter().enumerate() {
        print_listing(feed.rest_index(n), listing);
    }

    Ok(())
}

fn print_listing(index: usize, listing: &EpisodeListing) {
    println!(
        "  [{:>2}] {} - {} ({}, {})",
        index,
        listing.episode.title,
        listing.episode.members,
        listing.published_label,
        listing.duration_label
    );
}

fn play(config: &CliConfig, index: usize, max_ticks: u64) -> anyhow::Result<()> {
    let feed = load_feed(config)?;
    if feed.is_empty() {
        tracing::warn!("Feed {:?} has no playable episodes", config.feed.path);
        return Ok(());
    }

    let playlist = feed.playlist();
    tracing::info!(
        "Playing {} episodes (shuffle: {}, loop: {})",
        playlist.len(),
        config.playback.shuffling,
        config.playback.looping
    );

    let mut session = Session::new(config.playback.clone(), &playlist)?;
    session.start(playlist, index)?;
    let summary = session.run(max_ticks)?;

    println!(
        "Listened to {} episode(s) in {} simulated seconds",
        summary.played.len(),
        summary.ticks
    );
    Ok(())
}
