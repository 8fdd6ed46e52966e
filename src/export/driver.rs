//! Pagination driver.
//!
//! Walks the events API page by page, extracting samples in arrival
//! order until the API stops handing out next links.

use crate::export::extractor::extract_sample;
use crate::klaviyo::EventSource;
use crate::models::SampleRow;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

/// Options controlling a pagination run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Maximum number of pages to fetch before aborting the run.
    pub max_pages: usize,
    /// Whether to show the progress spinner.
    pub show_progress: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_pages: 1000,
            show_progress: true,
        }
    }
}

/// Collect all qualifying sample rows across every page.
///
/// Each iteration fetches one page with the current cursor (none on the
/// first call), extracts every event in page order, then follows
/// `links.next`. Stops when the API returns no next link. Exceeding
/// `max_pages` is an error: the remote is expected to terminate
/// pagination, and the cap keeps a misbehaving server from looping us
/// forever.
pub async fn collect_samples<S: EventSource>(
    source: &mut S,
    options: &ExportOptions,
) -> Result<Vec<SampleRow>> {
    let progress = options.show_progress.then(make_spinner);
    let mut rows: Vec<SampleRow> = Vec::new();
    let mut cursor: Option<String> = None;

    for page_index in 1..=options.max_pages {
        let page = source
            .fetch_page(cursor.as_deref())
            .await
            .with_context(|| format!("Failed to fetch events page {}", page_index))?;

        let fetched = page.data.len();
        let before = rows.len();
        rows.extend(page.data.iter().filter_map(extract_sample));

        info!(
            "Page {}: {} events, {} samples kept",
            page_index,
            fetched,
            rows.len() - before
        );
        if let Some(ref pb) = progress {
            pb.set_message(format!(
                "📦 Page {}: {} events, {} samples total",
                page_index,
                fetched,
                rows.len()
            ));
            pb.tick();
        }

        match page.next_cursor() {
            Some(next) => cursor = Some(next.to_string()),
            None => {
                debug!("No next link after page {}, pagination complete", page_index);
                if let Some(pb) = progress {
                    pb.finish_with_message(format!(
                        "Fetched {} pages, {} samples",
                        page_index,
                        rows.len()
                    ));
                }
                return Ok(rows);
            }
        }
    }

    bail!(
        "Pagination did not terminate after {} pages; raise [api].max_pages if the export is really this large",
        options.max_pages
    )
}

fn make_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb
}
