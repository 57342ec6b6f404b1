use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use callscribe::{TranscriptPipeline, Vendor, adapter_for, read_event_file, render_utterance};

#[derive(Parser)]
#[command(name = "callscribe")]
#[command(author, version, about = "Speaker attribution for live call transcription streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded event stream and print resolved utterances
    Replay {
        /// Event file, one JSON event per line
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a single raw vendor payload and dump the normalized fragments
    Parse {
        /// Transcription vendor the payload came from
        #[arg(long, value_enum)]
        vendor: VendorArg,

        /// File holding the raw payload JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VendorArg {
    Aws,
    Deepgram,
    Azure,
}

impl From<VendorArg> for Vendor {
    fn from(arg: VendorArg) -> Self {
        match arg {
            VendorArg::Aws => Vendor::Aws,
            VendorArg::Deepgram => Vendor::Deepgram,
            VendorArg::Azure => Vendor::Azure,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { input, verbose } => {
            setup_logging(verbose);
            replay_events(input)
        }
        Commands::Parse {
            vendor,
            input,
            verbose,
        } => {
            setup_logging(verbose);
            parse_payload(vendor.into(), input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn replay_events(input: PathBuf) -> Result<()> {
    info!("Loading events from {:?}", input);
    let events = read_event_file(&input).context("Failed to read event stream")?;
    info!("Loaded {} events", events.len());

    let mut pipeline = TranscriptPipeline::new();

    let emitted = Rc::new(RefCell::new(0usize));
    let counter = emitted.clone();
    pipeline.subscribe(move |utterance| {
        println!("{}", render_utterance(utterance));
        *counter.borrow_mut() += 1;
    });

    let dropped = Rc::new(RefCell::new(0usize));
    let counter = dropped.clone();
    pipeline.on_error(move |_| {
        *counter.borrow_mut() += 1;
    });

    let total = events.len();
    for event in events {
        pipeline.handle_event(event);
    }

    info!(
        "Complete: {} events, {} utterances, {} fragments dropped",
        total,
        emitted.borrow(),
        dropped.borrow()
    );

    Ok(())
}

fn parse_payload(vendor: Vendor, input: PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read payload file: {:?}", input))?;

    let fragments = adapter_for(vendor)
        .parse(&raw)
        .with_context(|| format!("Failed to parse {} payload", vendor))?;

    println!("{}", serde_json::to_string_pretty(&fragments)?);
    Ok(())
}
