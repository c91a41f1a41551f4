// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The kinds of sensors mounted on the RobotCar,
/// each of which the sharing site packages into its own archive(s)
/// per recorded sequence.
///
/// The serialized form of each variant
/// is the tag used in archive file names,
/// e.g. [`Self::StereoCentre`] is `stereo_centre`
/// in `2014-05-06-12-54-54_stereo_centre_01.tar`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SensorType {
    Tags,
    StereoCentre,
    StereoLeft,
    StereoRight,
    Vo,
    MonoLeft,
    MonoRight,
    MonoRear,
    LmsFront,
    LmsRear,
    Ldmrs,
    Gps,
}

impl SensorType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// A fresh set containing every known sensor type.
    #[must_use]
    pub fn all() -> HashSet<Self> {
        Self::iter().collect()
    }
}

/// Strips the chunk index off an archive name tag,
/// e.g. `stereo_centre_01` becomes `stereo_centre`.
///
/// Large archives are split into numbered chunks,
/// so their name tags carry a `_NN` suffix;
/// small ones (like `gps` or `vo`) go unnumbered.
/// A tag is taken to be numbered
/// if (and only if) its last two characters are ASCII digits.
#[must_use]
pub fn absolute_tag(tag: &str) -> &str {
    let mut rev_chars = tag.char_indices().rev();
    let (Some((_, last)), Some((_, second_last)), third_last) =
        (rev_chars.next(), rev_chars.next(), rev_chars.next())
    else {
        return tag;
    };
    if last.is_ascii_digit() && second_last.is_ascii_digit() {
        let cut = third_last.map_or(0, |(idx, _)| idx);
        tag.get(..cut).unwrap_or(tag)
    } else {
        tag
    }
}
