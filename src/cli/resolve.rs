//! `reel resolve`: discover photos and print the slide order.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::asset::{Asset, AssetSet, ImageFormat};
use crate::config::ReelConfig;
use crate::log;
use crate::resolver::{ResolveStats, Resolution};

use super::common::{build_runtime, resolve_configured};

pub fn run_resolve(config: &ReelConfig, json: bool) -> Result<()> {
    let rt = build_runtime()?;
    let resolution = rt.block_on(resolve_configured(config))?;

    print!("{}", render(&resolution, json)?);

    // Keep stdout a single JSON document for `| jq`
    if !json {
        log!("resolve"; "{}", summarize(&resolution.stats));
    }
    Ok(())
}

/// Everything written to stdout besides the summary line.
fn render(resolution: &Resolution, json: bool) -> Result<String> {
    if json {
        let out = serde_json::to_string_pretty(resolution.assets.as_ref())
            .context("Failed to serialize slides")?;
        Ok(format!("{out}\n"))
    } else {
        Ok(render_slides(&resolution.assets))
    }
}

/// One line per slide: index, caption and path. The wish slide closes the list.
fn render_slides(assets: &AssetSet) -> String {
    let mut out = String::new();
    if assets.is_empty_of_photos() {
        out.push_str(&format!(
            "{}\n",
            "no photos found (name them 1.jpg, 2.jpg, ... in the slideshow folder)".dimmed()
        ));
    }
    for (index, asset) in assets.iter().enumerate() {
        let line = match asset {
            Asset::Photo { path, .. } => format!(
                "{:>3}  {}  {}  {}",
                index + 1,
                assets.caption(index).unwrap_or_default(),
                path.display(),
                ImageFormat::from_path(path).map_or("", ImageFormat::mime).dimmed()
            ),
            Asset::Wish => format!("{:>3}  {}", index + 1, "★ birthday wish".magenta()),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn summarize(stats: &ResolveStats) -> String {
    let mut summary = format!(
        "{} of {} found in {:.2?}",
        stats.found, stats.probed, stats.elapsed
    );
    if stats.inconclusive > 0 {
        summary.push_str(&format!(
            " ({} inconclusive, {} timed out, treated as missing)",
            stats.inconclusive, stats.timed_out
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_slides() {
        owo_colors::set_override(false);
        let assets = AssetSet::from_confirmed(vec![
            (0, "slideshow/1.jpg".into()),
            (5, "slideshow/6.png".into()),
        ]);
        let out = render_slides(&assets);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Memory 1") && lines[0].contains("slideshow/1.jpg"));
        assert!(lines[1].contains("Memory 2") && lines[1].contains("slideshow/6.png"));
        assert!(lines[1].ends_with("image/png"));
        assert!(lines[2].contains("birthday wish"));
    }

    #[test]
    fn test_render_wish_only() {
        owo_colors::set_override(false);
        let out = render_slides(&AssetSet::wish_only());
        assert!(out.starts_with("no photos found"));
        assert!(out.contains("birthday wish"));
    }

    #[test]
    fn test_summarize() {
        let stats = ResolveStats {
            probed: 80,
            found: 4,
            missing: 75,
            inconclusive: 1,
            timed_out: 1,
            elapsed: Duration::from_millis(12),
        };
        let summary = summarize(&stats);
        assert!(summary.starts_with("4 of 80 found"));
        assert!(summary.contains("1 inconclusive, 1 timed out"));

        let clean = ResolveStats {
            inconclusive: 0,
            ..stats
        };
        assert!(!summarize(&clean).contains("inconclusive"));
    }

    #[test]
    fn test_json_output_is_a_single_document() {
        let resolution = Resolution {
            assets: std::sync::Arc::new(AssetSet::from_confirmed(vec![(2, "slideshow/3.jpg".into())])),
            stats: ResolveStats {
                probed: 80,
                found: 1,
                missing: 79,
                ..ResolveStats::default()
            },
        };

        let out = render(&resolution, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"kind": "photo", "path": "slideshow/3.jpg", "order": 2},
                {"kind": "wish"}
            ])
        );
        assert!(!out.contains("found"));
    }
}
