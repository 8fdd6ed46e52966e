//! Per-season aggregation and statistics.
//!
//! Groups sample rows by season label and computes the arithmetic mean
//! of each color channel per group.

use crate::models::{SampleRow, SeasonAverages};
use std::collections::HashMap;

/// Compute average channels per season.
///
/// Seasons are reported in first-seen order so the summary is
/// deterministic for a given row sequence. Seasons with no rows never
/// appear.
pub fn season_averages(rows: &[SampleRow]) -> Vec<SeasonAverages> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<[f64; 3]>> = HashMap::new();

    for row in rows {
        let samples = groups.entry(row.season.as_str()).or_insert_with(|| {
            order.push(row.season.as_str());
            Vec::new()
        });
        samples.push(row.channels());
    }

    order
        .into_iter()
        .map(|season| {
            let samples = &groups[season];
            let n = samples.len() as f64;

            let mut sums = [0.0f64; 3];
            for channels in samples {
                sums[0] += channels[0];
                sums[1] += channels[1];
                sums[2] += channels[2];
            }

            SeasonAverages {
                season: season.to_string(),
                r: sums[0] / n,
                g: sums[1] / n,
                b: sums[2] / n,
                count: samples.len(),
            }
        })
        .collect()
}

/// Format the averages as the console summary block.
///
/// One line per season: padded label, channel means to one decimal
/// place, sample count.
pub fn render_summary(averages: &[SeasonAverages]) -> String {
    averages
        .iter()
        .map(|avg| {
            format!(
                "{:<20} → [{:.1}, {:.1}, {:.1}] (n={})",
                avg.season, avg.r, avg.g, avg.b, avg.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(season: &str, r: f64, g: f64, b: f64) -> SampleRow {
        SampleRow {
            email: None,
            r,
            g,
            b,
            season: season.to_string(),
            confidence: None,
        }
    }

    #[test]
    fn test_season_averages() {
        let rows = vec![
            row("A", 10.0, 20.0, 30.0),
            row("A", 20.0, 30.0, 40.0),
            row("B", 0.0, 0.0, 0.0),
        ];

        let averages = season_averages(&rows);
        assert_eq!(averages.len(), 2);

        assert_eq!(averages[0].season, "A");
        assert_eq!(averages[0].r, 15.0);
        assert_eq!(averages[0].g, 25.0);
        assert_eq!(averages[0].b, 35.0);
        assert_eq!(averages[0].count, 2);

        assert_eq!(averages[1].season, "B");
        assert_eq!(averages[1].r, 0.0);
        assert_eq!(averages[1].count, 1);
    }

    #[test]
    fn test_first_seen_ordering() {
        let rows = vec![
            row("Winter", 1.0, 1.0, 1.0),
            row("Autumn", 2.0, 2.0, 2.0),
            row("Winter", 3.0, 3.0, 3.0),
            row("Summer", 4.0, 4.0, 4.0),
        ];

        let seasons: Vec<_> = season_averages(&rows)
            .into_iter()
            .map(|avg| avg.season)
            .collect();
        assert_eq!(seasons, vec!["Winter", "Autumn", "Summer"]);
    }

    #[test]
    fn test_empty_rows() {
        assert!(season_averages(&[]).is_empty());
        assert_eq!(render_summary(&[]), "");
    }

    #[test]
    fn test_render_summary_format() {
        let averages = vec![SeasonAverages {
            season: "Autumn".to_string(),
            r: 15.0,
            g: 25.25,
            b: 35.0,
            count: 2,
        }];

        assert_eq!(
            render_summary(&averages),
            "Autumn               → [15.0, 25.2, 35.0] (n=2)"
        );
    }
}
