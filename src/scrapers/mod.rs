// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::LazyLock;

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use thiserror::Error;

use crate::model::dataset_id::DatasetId;

pub mod datashare;

pub static USER_AGENT_VALUE: LazyLock<HeaderValue> = LazyLock::new(|| {
    const_format::concatcp!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_REPOSITORY"))
        .parse()
        .unwrap()
});

/// Thrown when a [`datashare::Scraper`] failed to scrape,
/// either the catalog or a single sequence.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network/Internet download failed: '{0}'")]
    Download(#[from] reqwest::Error),
    #[error(
        "The sharing site served an unexpectedly structured detail page \
         for sequence '{0}': an archive link with no '.tar' file name behind it"
    )]
    MalformedDetailPage(DatasetId),
}

/// Creates a default set of headers for downloads.
fn create_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, USER_AGENT_VALUE.clone());
    headers
}

/// Creates the one [`reqwest::Client`] used for a whole scraping run.
///
/// It keeps a cookie store,
/// so the session state set up by the catalog fetch
/// carries over to the per-sequence detail fetches.
pub fn create_client() -> Result<Client, Error> {
    Ok(Client::builder()
        .default_headers(create_headers())
        .cookie_store(true)
        .build()?)
}
