//! Text output for plans: summaries and minimal SVG documents.
//!
//! The SVG output only wraps the draw commands in a document so a plan can
//! be opened in a browser. Styling beyond stroke color and width is left to
//! front ends.

use heatloop_core::{format_length, path_to_draw_commands, scale_points, LengthUnit, Point};
use heatloop_layout::{FeederPlan, LayoutPlan};
use heatloop_settings::RenderingSettings;
use std::fmt::Write;

/// Stroke width in pixels for the configured pipe diameter.
fn stroke_width(rendering: &RenderingSettings, px_per_m: f64) -> f64 {
    (rendering.pipe_diameter_mm / 1000.0 * px_per_m).max(1.0)
}

fn svg_path(out: &mut String, points: &[Point], color: &str, width: f64) {
    let _ = writeln!(
        out,
        r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
        path_to_draw_commands(points),
        color,
        width
    );
}

fn svg_document(width: f64, height: f64, body: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
        w = width,
        h = height,
        body = body
    )
}

/// One path element per circuit, points placed on cell centres.
pub fn plan_to_svg(plan: &LayoutPlan, rendering: &RenderingSettings) -> String {
    let cell = rendering.cell_size_px;
    let px_per_m = cell / plan.report.resolution_m;
    let width = stroke_width(rendering, px_per_m);

    let mut body = String::new();
    for (i, zone) in plan.zones.iter().enumerate() {
        let points = scale_points(&zone.points, cell, cell / 2.0);
        svg_path(&mut body, &points, rendering.zone_color(i), width);
    }
    svg_document(plan.cols as f64 * cell, plan.rows as f64 * cell, &body)
}

/// A metric polyline drawn at `px_per_m`.
pub fn outline_to_svg(
    points: &[Point],
    width_m: f64,
    length_m: f64,
    px_per_m: f64,
    rendering: &RenderingSettings,
) -> String {
    let mut body = String::new();
    if !points.is_empty() {
        let scaled = scale_points(points, px_per_m, 0.0);
        svg_path(
            &mut body,
            &scaled,
            rendering.zone_color(0),
            stroke_width(rendering, px_per_m),
        );
    }
    svg_document(width_m * px_per_m, length_m * px_per_m, &body)
}

/// Human-readable plan report.
pub fn plan_summary(plan: &LayoutPlan, unit: LengthUnit) -> String {
    let report = &plan.report;
    let mut out = String::new();
    let _ = writeln!(out, "Grid:        {} x {} cells", plan.cols, plan.rows);
    let _ = writeln!(out, "Points:      {}", report.path.len());
    let _ = writeln!(
        out,
        "Pipe length: {}",
        format_length(report.total_length_m, unit)
    );
    let _ = writeln!(
        out,
        "Elbows:      {} (estimate), {} turns",
        report.elbow_estimate,
        report.turn_count()
    );
    if report.truncated {
        let _ = writeln!(out, "Truncated:   yes");
    }
    let _ = writeln!(out, "Circuits:    {}", plan.zones.len());
    for (i, zone) in plan.zones.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}: {}", i + 1, format_length(zone.length_m, unit));
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "Warning:     {}", warning);
    }
    out
}

pub fn feeder_summary(plan: &FeederPlan, unit: LengthUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Runs:   {}", plan.runs.len());
    let _ = writeln!(out, "Elbows: {}", plan.elbows.len());
    let _ = writeln!(out, "Total:  {}", format_length(plan.total_length_m(), unit));
    for run in &plan.runs {
        let _ = writeln!(
            out,
            "  room {}: {} -> {} ({})",
            run.room_index,
            run.start,
            run.end,
            format_length(run.length_m, unit)
        );
    }
    out
}
