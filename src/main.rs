// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

mod cli;

use std::path::PathBuf;

use clap::crate_name;
use cli_utils::logging;
use cli_utils::BoxResult;
use robotcar_scraper::index::{IndexWriter, INDEX_FILE_NAME};
use robotcar_scraper::scrapers::datashare::{self, Scraper};
use robotcar_scraper::settings;
use tracing::instrument;
use tracing_subscriber::filter::LevelFilter;

#[allow(clippy::print_stdout)]
fn print_version_and_exit(quiet: bool) {
    if !quiet {
        print!("{} ", clap::crate_name!());
    }
    println!("{}", robotcar_scraper::VERSION);
    std::process::exit(0);
}

#[tokio::main]
#[instrument]
async fn main() -> BoxResult<()> {
    let log_reload_handle = logging::setup(crate_name!())?;
    let args = cli::args_matcher().get_matches();

    let quiet = args.get_flag(cli::A_L_QUIET);
    let version = args.get_flag(cli::A_L_VERSION);
    if version {
        print_version_and_exit(quiet);
    }

    let verbose = args.get_flag(cli::A_L_VERBOSE);

    let log_level = if verbose {
        LevelFilter::TRACE
    } else if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    logging::set_log_level_tracing(&log_reload_handle, log_level)?;

    let sensor_filter = args.get_one::<String>(cli::A_L_SENSORS).cloned();
    let selection_file = args
        .get_one::<String>(cli::A_L_SEQUENCES)
        .map(PathBuf::from)
        .ok_or("Missing required argument --sequences")?;

    let run_settings = settings::load(sensor_filter.as_deref(), &selection_file)?;

    let scraper = Scraper::new()?;
    tracing::info!("Fetching the sequence catalog ...");
    let catalog = scraper.catalog_sequences().await?;
    tracing::info!("The catalog lists {} sequence(s).", catalog.len());
    let sequences = datashare::select_sequences(catalog, &run_settings.sequences);
    tracing::info!("{} of them are selected.", sequences.len());

    let mut index = IndexWriter::create(INDEX_FILE_NAME).await?;
    for sequence in &sequences {
        tracing::info!("Scraping sequence {sequence} ...");
        let archives = scraper
            .sensor_archives(sequence, &run_settings.sensors)
            .await?;
        tracing::debug!("{archives:#?}");
        index.write_sequence(sequence, &archives).await?;
    }
    index.finish().await?;
    tracing::info!(
        "Done; indexed {} sequence(s) into '{INDEX_FILE_NAME}'.",
        sequences.len()
    );

    Ok(())
}
