// SPDX-FileCopyrightText: 2026 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;

use super::Error;
use crate::model::{
    dataset_id::DatasetId, sensor_archive::SensorArchive, sensor_type::SensorType,
};

/// Base URL of the sharing site;
/// its landing page is also the catalog listing all recorded sequences.
pub const CATALOG_URL: &str = "https://mrgdatashare.robots.ox.ac.uk/";

/// Every archive download link on a sequence detail page
/// contains this marker,
/// followed by `/<sequence>/<sequence>_<name>.tar`.
pub const DOWNLOAD_LINK_MARKER: &str = "download/?filename=datasets";

/// The first occurrences of the catalog URL on the catalog page
/// are navigation links,
/// not sequence entries.
/// This is a layout convention of the site;
/// adjust when the page header gains or loses such a link.
pub const CATALOG_PAGE_DECOY_COUNT: usize = 2;

/// Where the archive name starts,
/// relative to the end of a [`DOWNLOAD_LINK_MARKER`] match:
/// behind two slash-separated sequence identifiers
/// and the underscore joining the second one to the name.
const ARCHIVE_NAME_OFFSET: usize = 2 * (DatasetId::LEN + 1) + 1;

/// Where the probe for the `.tar` suffix starts,
/// relative to the end of a [`DOWNLOAD_LINK_MARKER`] match.
const TAR_PROBE_OFFSET: usize = ARCHIVE_NAME_OFFSET - 1;

const TAR_SUFFIX: &[u8] = b".tar";

static CATALOG_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&regex::escape(CATALOG_URL)).unwrap());

static DOWNLOAD_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&regex::escape(DOWNLOAD_LINK_MARKER)).unwrap());

/// Scrapes the RobotCar data-sharing site:
/// first the catalog of all recorded sequences,
/// then the per-sequence detail pages
/// with their sensor-archive download links.
///
/// All fetches of one run go through one client (one session).
pub struct Scraper {
    client: Client,
}

impl Scraper {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            client: super::create_client()?,
        })
    }

    /// Fetches the catalog page
    /// and extracts the identifiers of all listed sequences,
    /// deduplicated and sorted lexicographically
    /// (which for these identifiers means chronologically).
    pub async fn catalog_sequences(&self) -> Result<Vec<DatasetId>, Error> {
        let page = self.fetch_text(CATALOG_URL).await?;
        Ok(Self::parse_catalog(&page))
    }

    /// Fetches the detail page of `sequence`
    /// and scans it for downloadable archives,
    /// keeping those of the requested sensor types,
    /// in order of appearance on the page.
    pub async fn sensor_archives(
        &self,
        sequence: &DatasetId,
        sensors: &HashSet<SensorType>,
    ) -> Result<Vec<SensorArchive>, Error> {
        let url = format!("{CATALOG_URL}{sequence}");
        let page = self.fetch_text(&url).await?;
        let archives = Self::scan_archive_names(&page, sequence)?;
        tracing::debug!(
            "Sequence {sequence}: {} archive(s) on offer",
            archives.len()
        );
        Ok(Self::filter_archives(archives, sensors))
    }

    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        tracing::debug!("Fetching '{url}' ...");
        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }

    /// Each sequence entry on the catalog page links to its detail page,
    /// so the 19 characters behind an occurrence of the catalog URL
    /// are a candidate sequence identifier.
    /// The first [`CATALOG_PAGE_DECOY_COUNT`] occurrences are navigation,
    /// and get dropped before deduplication.
    fn parse_catalog(page: &str) -> Vec<DatasetId> {
        CATALOG_LINK_RE
            .find_iter(page)
            .map(|link| {
                page.get(link.end()..)
                    .unwrap_or_default()
                    .chars()
                    .take(DatasetId::LEN)
                    .collect::<String>()
            })
            .skip(CATALOG_PAGE_DECOY_COUNT)
            .map(DatasetId::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Extracts the archive name out of every download link on a detail page.
    ///
    /// A link continues behind the marker with
    /// `/<sequence>/<sequence>_<name>.tar`,
    /// where `<name>` is of variable length;
    /// so the name is delimited by the fixed-width prefix on its left
    /// and the `.tar` suffix (found by forward scan) on its right.
    /// A page where some link runs out before its `.tar`,
    /// or where the scanned delimiters do not enclose a valid name range,
    /// fails with [`Error::MalformedDetailPage`].
    fn scan_archive_names(page: &str, sequence: &DatasetId) -> Result<Vec<SensorArchive>, Error> {
        let bytes = page.as_bytes();
        let mut names = Vec::new();
        for marker in DOWNLOAD_LINK_RE.find_iter(page) {
            let start = marker.end();
            let mut probe = start + TAR_PROBE_OFFSET;
            loop {
                let Some(window) = bytes.get(probe..probe + TAR_SUFFIX.len()) else {
                    return Err(Error::MalformedDetailPage(sequence.clone()));
                };
                if window == TAR_SUFFIX {
                    break;
                }
                probe += 1;
            }
            let name = page
                .get(start + ARCHIVE_NAME_OFFSET..probe)
                .ok_or_else(|| Error::MalformedDetailPage(sequence.clone()))?;
            names.push(SensorArchive::from(name));
        }
        Ok(names)
    }

    /// Keeps the archives whose absolute sensor type
    /// is one of the requested ones.
    /// Names with an unrecognized stem are dropped silently.
    fn filter_archives(
        archives: Vec<SensorArchive>,
        sensors: &HashSet<SensorType>,
    ) -> Vec<SensorArchive> {
        archives
            .into_iter()
            .filter(|archive| {
                archive
                    .absolute_type()
                    .is_some_and(|sensor_type| sensors.contains(&sensor_type))
            })
            .collect()
    }
}

/// Filters the (sorted) catalog down to the sequences the user selected,
/// keeping the catalog order.
#[must_use]
pub fn select_sequences(catalog: Vec<DatasetId>, selection: &HashSet<DatasetId>) -> Vec<DatasetId> {
    catalog
        .into_iter()
        .filter(|sequence| selection.contains(sequence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ_A: &str = "2014-05-06-12-54-54";
    const SEQ_B: &str = "2014-06-26-09-31-18";
    const SEQ_C: &str = "2015-11-13-10-28-08";

    /// The catalog page starts with navigation links to the site root,
    /// then lists one link per sequence.
    fn catalog_page(entries: &[&str]) -> String {
        let mut page = String::from("<html><body>\n");
        page.push_str(&format!("<a href=\"{CATALOG_URL}\">Home</a>\n"));
        page.push_str(&format!("<a href=\"{CATALOG_URL}\">Datasets</a>\n"));
        for entry in entries {
            page.push_str(&format!("<a href=\"{CATALOG_URL}{entry}\">{entry}</a>\n"));
        }
        page.push_str("</body></html>\n");
        page
    }

    fn download_link(sequence: &str, name: &str) -> String {
        format!(
            "<a href=\"{CATALOG_URL}{DOWNLOAD_LINK_MARKER}/{sequence}/{sequence}_{name}.tar\">{name}</a>\n"
        )
    }

    fn detail_page(sequence: &str, names: &[&str]) -> String {
        let mut page = String::from("<html><body>\n");
        for name in names {
            page.push_str(&download_link(sequence, name));
        }
        page.push_str("</body></html>\n");
        page
    }

    fn ids(raw: &[&str]) -> Vec<DatasetId> {
        raw.iter().copied().map(DatasetId::from).collect()
    }

    #[test]
    fn catalog_drops_navigation_decoys() {
        let page = catalog_page(&[SEQ_A]);
        assert_eq!(Scraper::parse_catalog(&page), ids(&[SEQ_A]));
    }

    #[test]
    fn catalog_deduplicates_and_sorts() {
        let page = catalog_page(&[SEQ_C, SEQ_A, SEQ_B, SEQ_A]);
        assert_eq!(Scraper::parse_catalog(&page), ids(&[SEQ_A, SEQ_B, SEQ_C]));
    }

    #[test]
    fn catalog_without_entries_is_empty() {
        let page = catalog_page(&[]);
        assert_eq!(Scraper::parse_catalog(&page), ids(&[]));
        assert_eq!(Scraper::parse_catalog("no links here"), ids(&[]));
    }

    #[test]
    fn catalog_keeps_short_tail_candidate() {
        // Page ends right inside the last entry link;
        // the short candidate stays, and simply never matches a selection.
        let mut page = catalog_page(&[SEQ_A]);
        page.push_str(&format!("<a href=\"{CATALOG_URL}2015-11-13"));
        assert_eq!(Scraper::parse_catalog(&page), ids(&[SEQ_A, "2015-11-13"]));
    }

    #[test]
    fn selection_keeps_order_and_membership() {
        let catalog = ids(&[SEQ_A, SEQ_B, SEQ_C]);
        let selection = ids(&[SEQ_C, SEQ_A]).into_iter().collect();
        assert_eq!(
            select_sequences(catalog, &selection),
            ids(&[SEQ_A, SEQ_C])
        );
    }

    #[test]
    fn scan_extracts_names_in_page_order() {
        let sequence = DatasetId::from(SEQ_A);
        let page = detail_page(SEQ_A, &["stereo_centre_01", "stereo_centre_02", "vo", "gps"]);
        let archives = Scraper::scan_archive_names(&page, &sequence).unwrap();
        assert_eq!(
            archives,
            vec![
                SensorArchive::from("stereo_centre_01"),
                SensorArchive::from("stereo_centre_02"),
                SensorArchive::from("vo"),
                SensorArchive::from("gps"),
            ]
        );
    }

    #[test]
    fn scan_keeps_duplicate_names() {
        let sequence = DatasetId::from(SEQ_A);
        let page = detail_page(SEQ_A, &["vo", "vo"]);
        let archives = Scraper::scan_archive_names(&page, &sequence).unwrap();
        assert_eq!(
            archives,
            vec![SensorArchive::from("vo"), SensorArchive::from("vo")]
        );
        // Filtering does not deduplicate either
        assert_eq!(
            Scraper::filter_archives(archives, &SensorType::all()),
            vec![SensorArchive::from("vo"), SensorArchive::from("vo")]
        );
    }

    #[test]
    fn scan_of_linkless_page_is_empty() {
        let sequence = DatasetId::from(SEQ_A);
        let archives =
            Scraper::scan_archive_names("<html><body></body></html>", &sequence).unwrap();
        assert!(archives.is_empty());
    }

    #[test]
    fn scan_fails_on_truncated_link() {
        let sequence = DatasetId::from(SEQ_A);
        // Link cut off before the `.tar` suffix
        let page = format!("<a href=\"{CATALOG_URL}{DOWNLOAD_LINK_MARKER}/{SEQ_A}/{SEQ_A}_stereo");
        let result = Scraper::scan_archive_names(&page, &sequence);
        assert!(matches!(result, Err(Error::MalformedDetailPage(seq)) if seq == sequence));
    }

    #[test]
    fn scan_fails_on_marker_at_page_end() {
        let sequence = DatasetId::from(SEQ_A);
        let page = format!("<a href=\"{CATALOG_URL}{DOWNLOAD_LINK_MARKER}");
        let result = Scraper::scan_archive_names(&page, &sequence);
        assert!(matches!(result, Err(Error::MalformedDetailPage(_))));
    }

    #[test]
    fn scan_fails_on_tar_before_name_start() {
        let sequence = DatasetId::from(SEQ_A);
        // A `.tar` right at the start of the scan
        // leaves an inverted (empty-before-it-begins) name range
        let page = format!("{DOWNLOAD_LINK_MARKER}{}.tar", "x".repeat(TAR_PROBE_OFFSET));
        let result = Scraper::scan_archive_names(&page, &sequence);
        assert!(matches!(result, Err(Error::MalformedDetailPage(_))));
    }

    #[test]
    fn filter_keeps_requested_types_only() {
        let archives = vec![
            SensorArchive::from("stereo_centre_01"),
            SensorArchive::from("stereo_centre_02"),
            SensorArchive::from("vo"),
            SensorArchive::from("gps"),
        ];
        let stereo_only = [SensorType::StereoCentre].into_iter().collect();
        assert_eq!(
            Scraper::filter_archives(archives.clone(), &stereo_only),
            vec![
                SensorArchive::from("stereo_centre_01"),
                SensorArchive::from("stereo_centre_02"),
            ]
        );

        let gps_only = [SensorType::Gps].into_iter().collect();
        assert_eq!(
            Scraper::filter_archives(archives, &gps_only),
            vec![SensorArchive::from("gps")]
        );
    }

    #[test]
    fn filter_drops_unrecognized_stems() {
        let archives = vec![
            SensorArchive::from("radar_01"),
            SensorArchive::from("stereo_centre_01"),
        ];
        assert_eq!(
            Scraper::filter_archives(archives, &SensorType::all()),
            vec![SensorArchive::from("stereo_centre_01")]
        );
    }

    #[test]
    fn filter_with_all_sensors_keeps_everything_known() {
        let page = detail_page(SEQ_B, &["lms_front_02", "ldmrs", "mono_rear_11", "tags"]);
        let sequence = DatasetId::from(SEQ_B);
        let archives = Scraper::scan_archive_names(&page, &sequence).unwrap();
        assert_eq!(
            Scraper::filter_archives(archives, &SensorType::all()).len(),
            4
        );
    }
}
