// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::model::{dataset_id::DatasetId, sensor_type::SensorType};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Not (a) valid sensor type(s): '{}'; see --help for the known ones", .0.join("', '"))]
    UnknownSensorTypes(Vec<String>),
    #[error("Failed to read the sequence selection file '{path}': {source}")]
    SelectionFileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The resolved inputs of one scraping run.
#[derive(Debug, TypedBuilder)]
pub struct Settings {
    /// Only archives of these sensor types end up in the index.
    pub sensors: HashSet<SensorType>,
    /// Only sequences in this set get their detail page scraped.
    pub sequences: HashSet<DatasetId>,
}

/// Resolves the sensors argument into the set of requested sensor types.
///
/// No filter means all known types,
/// as a fresh set per call.
/// A given filter is stripped of all whitespace
/// and split on `,`;
/// every token has to name a known sensor type,
/// otherwise the whole filter is rejected.
pub fn parse_sensor_filter(filter: Option<&str>) -> Result<HashSet<SensorType>, SettingsError> {
    let Some(raw) = filter else {
        return Ok(SensorType::all());
    };
    let stripped: String = raw.chars().filter(|chr| !chr.is_whitespace()).collect();
    let mut sensors = HashSet::new();
    let mut unknown = Vec::new();
    for token in stripped.split(',') {
        match token.parse::<SensorType>() {
            Ok(sensor_type) => {
                sensors.insert(sensor_type);
            }
            Err(_) => unknown.push(token.to_owned()),
        }
    }
    if unknown.is_empty() {
        Ok(sensors)
    } else {
        Err(SettingsError::UnknownSensorTypes(unknown))
    }
}

/// Reads the sequence selection file:
/// one sequence identifier per line,
/// surrounding whitespace ignored,
/// empty lines skipped.
pub fn read_selection_file(path: &Path) -> Result<HashSet<DatasetId>, SettingsError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| SettingsError::SelectionFileRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(DatasetId::from)
        .collect())
}

/// Resolves all inputs of a run,
/// strictly before any network access happens.
pub fn load(sensor_filter: Option<&str>, selection_file: &Path) -> Result<Settings, SettingsError> {
    let sensors = parse_sensor_filter(sensor_filter)?;
    let sequences = read_selection_file(selection_file)?;
    let settings = Settings::builder()
        .sensors(sensors)
        .sequences(sequences)
        .build();
    tracing::debug!("{settings:#?}");
    Ok(settings)
}
