// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::Display;
use std::str::FromStr;

use super::sensor_type::{self, SensorType};

/// The name tag of one downloadable archive of a sequence,
/// e.g. `stereo_centre_01` or `gps`;
/// the part of the archive file name
/// between the sequence identifier and the `.tar` suffix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SensorArchive(String);

impl SensorArchive {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The sensor type this archive belongs to,
    /// chunk index stripped;
    /// `None` if the stripped tag is no known sensor type.
    #[must_use]
    pub fn absolute_type(&self) -> Option<SensorType> {
        SensorType::from_str(sensor_type::absolute_tag(&self.0)).ok()
    }
}

impl From<String> for SensorArchive {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SensorArchive {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for SensorArchive {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for SensorArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
