// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use clap::{command, Arg, ArgAction, Command, ValueHint};
use const_format::formatcp;
use robotcar_scraper::model::sensor_type::SensorType;
use strum::IntoEnumIterator;

pub const A_L_VERSION: &str = "version";
pub const A_S_VERSION: char = 'V';
pub const A_L_QUIET: &str = "quiet";
pub const A_S_QUIET: char = 'q';
pub const A_L_VERBOSE: &str = "verbose";
pub const A_S_VERBOSE: char = 'v';
pub const A_L_SENSORS: &str = "sensors";
pub const A_L_SEQUENCES: &str = "sequences";

fn arg_version() -> Arg {
    Arg::new(A_L_VERSION)
        .help(formatcp!(
            "Print version information and exit. \
            May be combined with -{A_S_QUIET},--{A_L_QUIET}, \
            to really only output the version string."
        ))
        .short(A_S_VERSION)
        .long(A_L_VERSION)
        .action(ArgAction::SetTrue)
}

fn arg_verbose() -> Arg {
    Arg::new(A_L_VERBOSE)
        .help("More verbose log output")
        .short(A_S_VERBOSE)
        .long(A_L_VERBOSE)
        .action(ArgAction::SetTrue)
}

fn arg_quiet() -> Arg {
    Arg::new(A_L_QUIET)
        .help("Minimize or suppress output to stdout, only logging WARN and above")
        .short(A_S_QUIET)
        .long(A_L_QUIET)
        .action(ArgAction::SetTrue)
        .conflicts_with(A_L_VERBOSE)
}

fn arg_sensors() -> Arg {
    let known = SensorType::iter()
        .map(SensorType::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Arg::new(A_L_SENSORS)
        .help("Which sensor types to index, as a ','-separated list (default: all of them)")
        .long_help(format!(
            "Which sensor types to index, \
            as a ','-separated list of type names; \
            whitespace around the names is ignored, \
            and leaving the option out means all of them. \
            e.g: --{A_L_SENSORS} 'tags,stereo_centre'\n\
            The known sensor types: {known}"
        ))
        .long(A_L_SENSORS)
        .value_name("LIST")
        .value_hint(ValueHint::Other)
        .action(ArgAction::Set)
}

fn arg_sequences() -> Arg {
    Arg::new(A_L_SEQUENCES)
        .help("A file selecting the sequences to index, one identifier per line")
        .long(A_L_SEQUENCES)
        .value_name("FILE")
        .value_hint(ValueHint::FilePath)
        .action(ArgAction::Set)
        .required_unless_present(A_L_VERSION)
}

pub fn args_matcher() -> Command {
    command!()
        .help_expected(true)
        .disable_version_flag(true)
        .arg(arg_version())
        .arg(arg_quiet())
        .arg(arg_verbose())
        .arg(arg_sensors())
        .arg(arg_sequences())
}
