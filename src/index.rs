// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::iter;
use std::path::Path;

use csv_async::{AsyncWriter, AsyncWriterBuilder, QuoteStyle, Terminator};
use thiserror::Error;
use tokio::fs::File;

use crate::model::{dataset_id::DatasetId, sensor_archive::SensorArchive};

/// Name of the index file,
/// written into the current working directory.
pub const INDEX_FILE_NAME: &str = "datasets.csv";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Some I/O problem: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Failed to write an index record: '{0}'")]
    Csv(#[from] csv_async::Error),
}

/// Writes the scraped index:
/// one record per sequence,
/// the sequence identifier followed by its retained archive names.
///
/// Records vary in length,
/// nothing ever gets quoted,
/// and a sequence without archives still gets a (one empty field) record,
/// so every line ends in at least one `,`-separated field
/// behind the identifier.
pub struct IndexWriter {
    records: AsyncWriter<File>,
}

impl IndexWriter {
    /// Creates (or truncates) the index file at `path`.
    pub async fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::create(path).await?;
        let records = AsyncWriterBuilder::new()
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .create_writer(file);
        Ok(Self { records })
    }

    pub async fn write_sequence(
        &mut self,
        sequence: &DatasetId,
        archives: &[SensorArchive],
    ) -> Result<(), Error> {
        if archives.is_empty() {
            self.records.write_record(&[sequence.as_str(), ""]).await?;
        } else {
            self.records
                .write_record(
                    iter::once(sequence.as_str()).chain(archives.iter().map(SensorArchive::as_str)),
                )
                .await?;
        }
        Ok(())
    }

    /// Flushes everything out to disk.
    pub async fn finish(mut self) -> Result<(), Error> {
        self.records.flush().await?;
        Ok(())
    }
}
