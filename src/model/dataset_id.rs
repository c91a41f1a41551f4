// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::Display;

/// Identifier of one recorded sequence (a single traversal of the route),
/// as used by the sharing site in URLs and archive file names.
///
/// These are date-time stamps like `2014-05-06-12-54-54`;
/// their lexicographic order is their chronological order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatasetId(String);

impl DatasetId {
    /// Length of an identifier in characters
    /// (`YYYY-MM-DD-hh-mm-ss`).
    pub const LEN: usize = 19;

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DatasetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DatasetId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for DatasetId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
