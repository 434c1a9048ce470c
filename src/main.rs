use std::{fs, io, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::requests::{build, InputDocument, RequestHandler};

mod catalogue;
mod error;
mod render;
mod requests;
mod svg;

#[derive(Parser)]
#[command(about = "Answer route and stop queries and draw the route map")]
struct Args {
    /// Path to the JSON input document (stdin if omitted)
    input: Option<PathBuf>,
    /// Write the JSON answers here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write the rendered map as an SVG file
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Pretty-print the JSON answers
    #[arg(long)]
    pretty: bool,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => io::read_to_string(io::stdin()).context("Failed to read stdin"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let args = Args::parse();

    let now = Instant::now();
    let text = read_input(args.input.as_ref())?;
    let document: InputDocument =
        serde_json::from_str(&text).context("Malformed input document")?;
    info!(elapsed = ?now.elapsed(), "Read input document");

    let now = Instant::now();
    let (catalogue, renderer) = build(&document)?;
    info!(
        stops = catalogue.stops().count(),
        buses = catalogue.buses().count(),
        distances = catalogue.distance_count(),
        elapsed = ?now.elapsed(),
        "Populated catalogue"
    );

    let handler = RequestHandler::new(&catalogue, renderer.as_ref());

    let now = Instant::now();
    let responses = handler.answer_all(&document.stat_requests)?;
    info!(
        requests = responses.len(),
        elapsed = ?now.elapsed(),
        "Answered requests"
    );

    if let Some(path) = &args.svg {
        let map = handler.render_map()?;
        fs::write(path, map).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote map");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&responses)?
    } else {
        serde_json::to_string(&responses)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?
        }
        None => println!("{json}"),
    }

    Ok(())
}
