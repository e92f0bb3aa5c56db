//! Vector rendering of charts onto PDF pages
//!
//! Each render call draws one chart onto one explicitly supplied layer, so
//! there is no process-wide "current figure" to leak between charts. All
//! geometry is computed in millimetres on a landscape A4 page.

use printpdf::utils::calculate_points_for_circle;
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfLayerReference, Point, Polygon, PolygonMode, Pt, Rgb,
    TextMatrix, WindingOrder,
};

use crate::chart::{Chart, ChartType};

/// Page width of a rendered chart page (landscape A4)
pub const PAGE_WIDTH_MM: f64 = 297.0;

/// Page height of a rendered chart page (landscape A4)
pub const PAGE_HEIGHT_MM: f64 = 210.0;

// Plot rectangle and text sizes, tuned for ~10 categories per chart
const PLOT_X0: f64 = 34.0;
const PLOT_X1: f64 = 284.0;
const PLOT_Y0: f64 = 32.0;
const PLOT_Y1: f64 = 184.0;
const TITLE_SIZE: f64 = 16.0;
const AXIS_TITLE_SIZE: f64 = 11.0;
const TICK_SIZE: f64 = 9.0;

const AXIS_GRAY: (f64, f64, f64) = (0.25, 0.25, 0.25);
const GRID_GRAY: (f64, f64, f64) = (0.85, 0.85, 0.85);

/// Categorical palette, one color per bar, cycled past ten entries
const PALETTE: [(f64, f64, f64); 10] = [
    (0.12, 0.47, 0.71),
    (1.00, 0.50, 0.05),
    (0.17, 0.63, 0.17),
    (0.84, 0.15, 0.16),
    (0.58, 0.40, 0.74),
    (0.55, 0.34, 0.29),
    (0.89, 0.47, 0.76),
    (0.50, 0.50, 0.50),
    (0.74, 0.74, 0.13),
    (0.09, 0.75, 0.81),
];

/// How many points may share one axis label before labels are thinned.
///
/// Returns the sampling stride: every `stride`-th label is drawn, which
/// keeps roughly ten labels on the axis regardless of row count.
pub fn label_stride(len: usize) -> usize {
    (len / 10).max(1)
}

/// Pick a 1/2/5-ladder step so the value axis gets about `target` ticks
fn nice_step(max_value: f64, target: usize) -> f64 {
    if max_value <= 0.0 {
        return 1.0;
    }
    let raw = max_value / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

fn trim_number(v: f64) -> String {
    if v.fract().abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.1}", v)
    }
}

/// Compact tick label: `2500000` renders as `2.5M`, `800000` as `800K`
fn format_tick(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1_000_000.0 {
        format!("{}M", trim_number(v / 1_000_000.0))
    } else if abs >= 1_000.0 {
        format!("{}K", trim_number(v / 1_000.0))
    } else {
        trim_number(v)
    }
}

/// Approximate Helvetica text width in millimetres
fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    // Average glyph advance of ~0.5 em is close enough for centering
    text.chars().count() as f64 * size_pt * 0.5 * 0.352_778
}

/// Draws one [`Chart`] onto one PDF layer
pub struct ChartRenderer<'a> {
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
}

impl<'a> ChartRenderer<'a> {
    /// Create a renderer bound to a page layer and the document fonts
    pub fn new(
        layer: PdfLayerReference,
        regular: &'a IndirectFontRef,
        bold: &'a IndirectFontRef,
    ) -> Self {
        Self {
            layer,
            regular,
            bold,
        }
    }

    /// Render the chart onto the layer
    pub fn render(&self, chart: &Chart) {
        match chart.chart_type {
            ChartType::LineMarkers => self.render_line(chart),
            ChartType::ColumnClustered => self.render_columns(chart),
            ChartType::BarClustered => self.render_horizontal_bars(chart),
        }
    }

    fn render_line(&self, chart: &Chart) {
        let max = chart
            .series
            .iter()
            .flat_map(|s| s.numbers())
            .fold(0.0f64, |acc, v| acc.max(*v));
        let top = self.draw_value_scale_y(max);
        self.draw_frame(chart);

        for (i, series) in chart.series.iter().enumerate() {
            let values = series.numbers();
            if values.is_empty() {
                continue;
            }
            let n = values.len();
            let points: Vec<(f64, f64)> = values
                .iter()
                .enumerate()
                .map(|(j, v)| {
                    let x = if n == 1 {
                        (PLOT_X0 + PLOT_X1) / 2.0
                    } else {
                        PLOT_X0 + (PLOT_X1 - PLOT_X0) * j as f64 / (n - 1) as f64
                    };
                    let y = PLOT_Y0 + (PLOT_Y1 - PLOT_Y0) * (v / top).clamp(0.0, 1.0);
                    (x, y)
                })
                .collect();

            let color = PALETTE[i % PALETTE.len()];
            self.set_stroke(color, 1.5);
            self.polyline(&points);
            for &(x, y) in &points {
                self.marker(x, y, 1.1, color);
            }

            // Tick labels come from the first series' categories
            if i == 0 {
                let labels = series.category_labels();
                let stride = label_stride(n);
                for j in (0..n).step_by(stride) {
                    let Some(label) = labels.get(j) else { break };
                    let x = points[j].0;
                    self.set_stroke(AXIS_GRAY, 0.6);
                    self.line_segment((x, PLOT_Y0), (x, PLOT_Y0 - 1.5));
                    self.rotated_text(label, TICK_SIZE, x - 1.0, PLOT_Y0 - 4.5, -45.0);
                }
            }
        }
    }

    fn render_columns(&self, chart: &Chart) {
        let series = chart.series.first();
        let values = series.map(|s| s.numbers()).unwrap_or(&[]);
        let labels = series.map(|s| s.category_labels()).unwrap_or(&[]);

        let max = values.iter().fold(0.0f64, |acc, v| acc.max(*v));
        let top = self.draw_value_scale_y(max);
        self.draw_frame(chart);

        let n = values.len();
        if n == 0 {
            return;
        }
        let slot = (PLOT_X1 - PLOT_X0) / n as f64;
        let bar_width = slot * 0.6;

        for (j, v) in values.iter().enumerate() {
            let cx = PLOT_X0 + slot * (j as f64 + 0.5);
            let height = (PLOT_Y1 - PLOT_Y0) * (v / top).clamp(0.0, 1.0);
            self.filled_rect(
                cx - bar_width / 2.0,
                PLOT_Y0,
                bar_width,
                height,
                PALETTE[j % PALETTE.len()],
            );
            if let Some(label) = labels.get(j) {
                self.rotated_text(label, TICK_SIZE, cx - 1.0, PLOT_Y0 - 4.5, -45.0);
            }
        }
    }

    fn render_horizontal_bars(&self, chart: &Chart) {
        let series = chart.series.first();
        let values = series.map(|s| s.numbers()).unwrap_or(&[]);
        let labels = series.map(|s| s.category_labels()).unwrap_or(&[]);

        let max = values.iter().fold(0.0f64, |acc, v| acc.max(*v));
        let right = self.draw_value_scale_x(max);
        self.draw_frame(chart);

        let n = values.len();
        if n == 0 {
            return;
        }
        let slot = (PLOT_Y1 - PLOT_Y0) / n as f64;
        let bar_height = slot * 0.6;

        // First row at the top, matching the input order of the table
        for (j, v) in values.iter().enumerate() {
            let cy = PLOT_Y1 - slot * (j as f64 + 0.5);
            let width = (PLOT_X1 - PLOT_X0) * (v / right).clamp(0.0, 1.0);
            self.filled_rect(
                PLOT_X0,
                cy - bar_height / 2.0,
                width,
                bar_height,
                PALETTE[j % PALETTE.len()],
            );
            if let Some(label) = labels.get(j) {
                self.text_right_aligned(label, TICK_SIZE, PLOT_X0 - 2.0, cy - 1.2);
            }
        }
    }

    /// Horizontal gridlines plus left-hand tick labels; returns the scale top
    fn draw_value_scale_y(&self, max: f64) -> f64 {
        let max = if max > 0.0 { max } else { 1.0 };
        let step = nice_step(max, 5);
        let top = (max / step).ceil() * step;

        let mut tick = 0.0;
        while tick <= top + step / 2.0 {
            let y = PLOT_Y0 + (PLOT_Y1 - PLOT_Y0) * (tick / top);
            if tick > 0.0 {
                self.set_stroke(GRID_GRAY, 0.4);
                self.line_segment((PLOT_X0, y), (PLOT_X1, y));
            }
            self.text_right_aligned(&format_tick(tick), TICK_SIZE, PLOT_X0 - 2.0, y - 1.2);
            tick += step;
        }
        top
    }

    /// Vertical gridlines plus bottom tick labels; returns the scale limit
    fn draw_value_scale_x(&self, max: f64) -> f64 {
        let max = if max > 0.0 { max } else { 1.0 };
        let step = nice_step(max, 5);
        let right = (max / step).ceil() * step;

        let mut tick = 0.0;
        while tick <= right + step / 2.0 {
            let x = PLOT_X0 + (PLOT_X1 - PLOT_X0) * (tick / right);
            if tick > 0.0 {
                self.set_stroke(GRID_GRAY, 0.4);
                self.line_segment((x, PLOT_Y0), (x, PLOT_Y1));
            }
            let label = format_tick(tick);
            let half = text_width_mm(&label, TICK_SIZE) / 2.0;
            self.text(&label, TICK_SIZE, x - half, PLOT_Y0 - 5.5, self.regular);
            tick += step;
        }
        right
    }

    /// Title, axis lines and axis titles
    fn draw_frame(&self, chart: &Chart) {
        if let Some(title) = &chart.title {
            let half = text_width_mm(title, TITLE_SIZE) / 2.0;
            self.text(
                title,
                TITLE_SIZE,
                PAGE_WIDTH_MM / 2.0 - half,
                PAGE_HEIGHT_MM - 16.0,
                self.bold,
            );
        }

        self.set_stroke(AXIS_GRAY, 1.0);
        self.line_segment((PLOT_X0, PLOT_Y0), (PLOT_X1, PLOT_Y0));
        self.line_segment((PLOT_X0, PLOT_Y0), (PLOT_X0, PLOT_Y1));

        if let Some(title) = chart.category_axis.as_ref().and_then(|a| a.title.as_deref()) {
            let half = text_width_mm(title, AXIS_TITLE_SIZE) / 2.0;
            self.text(
                title,
                AXIS_TITLE_SIZE,
                (PLOT_X0 + PLOT_X1) / 2.0 - half,
                8.0,
                self.regular,
            );
        }
        if let Some(title) = chart.value_axis.as_ref().and_then(|a| a.title.as_deref()) {
            let half = text_width_mm(title, AXIS_TITLE_SIZE) / 2.0;
            self.rotated_text(
                title,
                AXIS_TITLE_SIZE,
                10.0,
                (PLOT_Y0 + PLOT_Y1) / 2.0 - half,
                90.0,
            );
        }
    }

    // --- drawing primitives ---

    fn set_stroke(&self, (r, g, b): (f64, f64, f64), thickness_pt: f64) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)));
        self.layer.set_outline_thickness(thickness_pt as f32);
    }

    fn line_segment(&self, from: (f64, f64), to: (f64, f64)) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from.0 as f32), Mm(from.1 as f32)), false),
                (Point::new(Mm(to.0 as f32), Mm(to.1 as f32)), false),
            ],
            is_closed: false,
        });
    }

    fn polyline(&self, points: &[(f64, f64)]) {
        if points.len() < 2 {
            return;
        }
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x as f32), Mm(y as f32)), false))
                .collect(),
            is_closed: false,
        });
    }

    fn marker(&self, x: f64, y: f64, radius_mm: f64, color: (f64, f64, f64)) {
        let radius: Pt = Mm(radius_mm as f32).into();
        let cx: Pt = Mm(x as f32).into();
        let cy: Pt = Mm(y as f32).into();
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(
                color.0 as f32,
                color.1 as f32,
                color.2 as f32,
                None,
            )));
        self.layer.add_polygon(Polygon {
            rings: vec![calculate_points_for_circle(radius, cx, cy)],
            mode: PolygonMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn filled_rect(&self, x: f64, y: f64, w: f64, h: f64, (r, g, b): (f64, f64, f64)) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)));
        let ring = vec![
            (Point::new(Mm(x as f32), Mm(y as f32)), false),
            (Point::new(Mm((x + w) as f32), Mm(y as f32)), false),
            (Point::new(Mm((x + w) as f32), Mm((y + h) as f32)), false),
            (Point::new(Mm(x as f32), Mm((y + h) as f32)), false),
        ];
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PolygonMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn text(&self, text: &str, size_pt: f64, x: f64, y: f64, font: &IndirectFontRef) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None)));
        self.layer
            .use_text(text, size_pt as f32, Mm(x as f32), Mm(y as f32), font);
    }

    fn text_right_aligned(&self, text: &str, size_pt: f64, x_right: f64, y: f64) {
        let width = text_width_mm(text, size_pt);
        self.text(text, size_pt, x_right - width, y, self.regular);
    }

    fn rotated_text(&self, text: &str, size_pt: f64, x: f64, y: f64, angle_deg: f64) {
        let tx: Pt = Mm(x as f32).into();
        let ty: Pt = Mm(y as f32).into();
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None)));
        self.layer.begin_text_section();
        self.layer.set_font(self.regular, size_pt as f32);
        self.layer
            .set_text_matrix(TextMatrix::TranslateRotate(tx, ty, angle_deg as f32));
        self.layer.write_text(text, self.regular);
        self.layer.end_text_section();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_label_stride() {
        assert_eq!(label_stride(0), 1);
        assert_eq!(label_stride(1), 1);
        assert_eq!(label_stride(9), 1);
        assert_eq!(label_stride(10), 1);
        assert_eq!(label_stride(30), 3);
        assert_eq!(label_stride(105), 10);
    }

    #[test]
    fn test_nice_step() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-6 * b.max(1.0);
        assert!(close(nice_step(10.0, 5), 2.0));
        assert!(close(nice_step(100.0, 5), 20.0));
        assert!(close(nice_step(7.0, 5), 2.0));
        assert!(close(nice_step(0.0, 5), 1.0));
        assert!(close(nice_step(2_500_000.0, 5), 500_000.0));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(500.0), "500");
        assert_eq!(format_tick(800_000.0), "800K");
        assert_eq!(format_tick(2_500_000.0), "2.5M");
        assert_eq!(format_tick(1_500.0), "1.5K");
    }
}
