//! Chart rendering: nine chart kinds drawn into a shape rectangle.
//!
//! The chart box is partitioned into an optional title band, the plot area,
//! and an optional legend band. Series marks reuse the raster primitives;
//! titles and legend labels go through the font cache like any other text.

use std::f64::consts::PI;

use crate::canvas::Canvas;
use crate::geometry::{PointF, Rect};
use crate::model::chart::{ChartKind, ChartSeries, ChartShape};
use crate::model::color::Color;
use crate::raster::ellipse::fill_ellipse_aa;
use crate::raster::line::{draw_line, draw_line_aa, draw_rect_outline};
use crate::raster::polygon::fill_polygon;
use crate::text::cache::FontCache;
use crate::text::layout::TextPainter;

/// Default colour cycle for series (and pie slices).
const PALETTE: [Color; 8] = [
  Color::rgb(79, 129, 189),
  Color::rgb(192, 80, 77),
  Color::rgb(155, 187, 89),
  Color::rgb(128, 100, 162),
  Color::rgb(75, 172, 198),
  Color::rgb(247, 150, 70),
  Color::rgb(119, 44, 42),
  Color::rgb(77, 93, 58),
];

const AXIS_COLOR: Color = Color::rgb(128, 128, 128);
const FRAME_COLOR: Color = Color::rgb(200, 200, 200);
const LEGEND_HEIGHT: i32 = 20;

/// Palette colour for a series index.
pub fn palette_color(idx: usize) -> Color {
  PALETTE[idx % PALETTE.len()]
}

/// A series' colour: its own fill when set, otherwise the palette cycle.
pub fn series_color(series: &ChartSeries, idx: usize) -> Color {
  series.fill.unwrap_or_else(|| palette_color(idx))
}

/// Tests whether `angle` lies within the sweep from `start` to `end`.
/// All angles are normalised to `[0, 2pi)` so wrap-around sweeps work.
pub fn angle_in_sweep(angle: f64, start: f64, end: f64) -> bool {
  let tau = 2.0 * PI;
  let norm = |a: f64| a.rem_euclid(tau);
  let a = norm(angle);
  let s = norm(start);
  let e = norm(end);
  if s <= e {
    a >= s && a <= e
  } else {
    a >= s || a <= e
  }
}

/// Value range over every series, forced to include zero and to be
/// non-degenerate.
fn value_range(series: &[ChartSeries]) -> (f64, f64) {
  let mut min = f64::MAX;
  let mut max = f64::MIN;
  for s in series {
    for &v in &s.values {
      min = min.min(v);
      max = max.max(v);
    }
  }
  if min == f64::MAX {
    return (0.0, 1.0);
  }
  if min > 0.0 {
    min = 0.0;
  }
  if max <= min {
    max = min + 1.0;
  }
  (min, max)
}

/// Renders a chart into the pixel box `(x, y, w, h)`.
pub fn render_chart(
  canvas: &mut Canvas,
  cache: &FontCache,
  dpi: f64,
  chart: &ChartShape,
  x: i32,
  y: i32,
  w: i32,
  h: i32,
) {
  canvas.fill_rect(Rect::from_xywh(x, y, w, h), Color::WHITE);
  draw_rect_outline(canvas, Rect::from_xywh(x, y, w, h), FRAME_COLOR, 1);

  let mut title_h = 0;
  if let Some(title) = &chart.title {
    if title.visible && !title.text.is_empty() {
      let face = cache.face_for(&title.font, dpi);
      title_h = face.metrics().line_height + 4;
      let mut painter = TextPainter {
        canvas: &mut *canvas,
        cache,
        scale_x: 1.0,
        scale_y: 1.0,
        dpi,
      };
      painter.draw_string_centered(
        &title.text,
        &face,
        title.font.color,
        Rect::new(x, y, x + w, y + title_h),
      );
    }
  }

  let legend_h = match &chart.legend {
    Some(legend) if legend.visible => LEGEND_HEIGHT,
    _ => 0,
  };

  let plot_x = x + 40;
  let plot_y = y + title_h + 5;
  let plot_w = (w - 50).max(10);
  let plot_h = (h - title_h - legend_h - 15).max(10);

  match chart.kind {
    ChartKind::Bar | ChartKind::Bar3D => {
      render_bar(canvas, &chart.series, plot_x, plot_y, plot_w, plot_h)
    }
    ChartKind::Line => render_line(canvas, &chart.series, plot_x, plot_y, plot_w, plot_h),
    ChartKind::Area => render_area(canvas, &chart.series, plot_x, plot_y, plot_w, plot_h),
    ChartKind::Pie | ChartKind::Pie3D => {
      render_pie(canvas, &chart.series, plot_x, plot_y, plot_w, plot_h, 0)
    }
    ChartKind::Doughnut => render_pie(
      canvas,
      &chart.series,
      plot_x,
      plot_y,
      plot_w,
      plot_h,
      chart.hole_size_pct,
    ),
    ChartKind::Scatter => render_scatter(canvas, &chart.series, plot_x, plot_y, plot_w, plot_h),
    ChartKind::Radar => render_radar(canvas, &chart.series, plot_x, plot_y, plot_w, plot_h),
  }

  if legend_h > 0 {
    render_legend(canvas, cache, dpi, chart, x, y + h - legend_h, w, legend_h);
  }
}

fn draw_axes(canvas: &mut Canvas, px: i32, py: i32, pw: i32, ph: i32) {
  draw_line(canvas, px, py + ph, px + pw, py + ph, AXIS_COLOR);
  draw_line(canvas, px, py, px, py + ph, AXIS_COLOR);
}

fn render_bar(canvas: &mut Canvas, series: &[ChartSeries], px: i32, py: i32, pw: i32, ph: i32) {
  if series.is_empty() {
    return;
  }
  let (min, max) = value_range(series);
  let range = max - min;
  draw_axes(canvas, px, py, pw, ph);

  let n_cats = series[0].categories.len() as i32;
  let n_series = series.len() as i32;
  if n_cats == 0 {
    return;
  }
  let cat_w = pw / n_cats;
  let bar_w = (cat_w / (n_series + 1)).max(1);

  for ci in 0..n_cats {
    for (si, s) in series.iter().enumerate() {
      let v = s.value(ci as usize);
      let bar_h = (ph as f64 * (v - min) / range) as i32;
      let bx = px + ci * cat_w + (si as i32 + 1) * bar_w - bar_w / 2;
      let by = py + ph - bar_h;
      canvas.fill_rect_blend(Rect::new(bx, by, bx + bar_w - 1, py + ph), series_color(s, si));
    }
  }
}

fn render_line(canvas: &mut Canvas, series: &[ChartSeries], px: i32, py: i32, pw: i32, ph: i32) {
  if series.is_empty() {
    return;
  }
  let (min, max) = value_range(series);
  let range = max - min;
  draw_axes(canvas, px, py, pw, ph);

  for (si, s) in series.iter().enumerate() {
    let sc = series_color(s, si);
    let n_pts = s.categories.len() as i32;
    if n_pts == 0 {
      continue;
    }
    let mut prev = (0, 0);
    for i in 0..n_pts {
      let pt_x = if n_pts > 1 { px + i * pw / (n_pts - 1) } else { px };
      let pt_y = py + ph - (ph as f64 * (s.value(i as usize) - min) / range) as i32;
      if i > 0 {
        draw_line_aa(canvas, prev.0, prev.1, pt_x, pt_y, sc, 2);
      }
      fill_ellipse_aa(canvas, pt_x - 2, pt_y - 2, 5, 5, sc);
      prev = (pt_x, pt_y);
    }
  }
}

fn render_area(canvas: &mut Canvas, series: &[ChartSeries], px: i32, py: i32, pw: i32, ph: i32) {
  if series.is_empty() {
    return;
  }
  let (min, max) = value_range(series);
  let range = max - min;
  draw_axes(canvas, px, py, pw, ph);

  for (si, s) in series.iter().enumerate() {
    let sc = series_color(s, si);
    let n_pts = s.categories.len();
    if n_pts == 0 {
      continue;
    }
    let mut pts: Vec<PointF> = Vec::with_capacity(n_pts + 2);
    for i in 0..n_pts {
      let pt_x = if n_pts > 1 {
        px as f64 + i as f64 * pw as f64 / (n_pts - 1) as f64
      } else {
        px as f64
      };
      let pt_y = (py + ph) as f64 - ph as f64 * (s.value(i) - min) / range;
      pts.push(PointF::new(pt_x, pt_y));
    }
    let baseline = (py + ph) as f64;
    let first_x = pts[0].x;
    let last_x = pts[n_pts - 1].x;
    pts.push(PointF::new(last_x, baseline));
    pts.push(PointF::new(first_x, baseline));
    fill_polygon(canvas, &pts, sc.with_alpha(128));

    for pair in pts[..n_pts].windows(2) {
      draw_line_aa(
        canvas,
        pair[0].x as i32,
        pair[0].y as i32,
        pair[1].x as i32,
        pair[1].y as i32,
        sc,
        2,
      );
    }
  }
}

/// Pie and doughnut share a renderer; a zero hole size is a plain pie.
fn render_pie(
  canvas: &mut Canvas,
  series: &[ChartSeries],
  px: i32,
  py: i32,
  pw: i32,
  ph: i32,
  hole_pct: u32,
) {
  let Some(s) = series.first() else {
    return;
  };
  if s.categories.is_empty() {
    return;
  }
  let total: f64 = s.values.iter().filter(|&&v| v > 0.0).sum();
  if total == 0.0 {
    return;
  }

  let cx = px + pw / 2;
  let cy = py + ph / 2;
  let outer_r = pw.min(ph) / 2;
  if outer_r < 5 {
    return;
  }
  let inner_r = outer_r * hole_pct as i32 / 100;

  let mut start = -PI / 2.0;
  for (i, _) in s.categories.iter().enumerate() {
    let v = s.value(i);
    if v <= 0.0 {
      continue;
    }
    let end = start + 2.0 * PI * v / total;
    fill_ring_slice(canvas, cx, cy, inner_r, outer_r, start, end, palette_color(i));
    start = end;
  }
}

/// Scanline fill of a pie/doughnut slice: for each row inside the outer
/// radius, test each pixel's angle against the sweep (and the inner radius
/// for doughnuts).
fn fill_ring_slice(
  canvas: &mut Canvas,
  cx: i32,
  cy: i32,
  inner_r: i32,
  outer_r: i32,
  start: f64,
  end: f64,
  c: Color,
) {
  let or2 = outer_r * outer_r;
  let ir2 = inner_r * inner_r;
  for dy in -outer_r..=outer_r {
    let dy2 = dy * dy;
    if dy2 > or2 {
      continue;
    }
    let max_dx = ((or2 - dy2) as f64).sqrt() as i32;
    for dx in -max_dx..=max_dx {
      if dx * dx + dy2 < ir2 {
        continue;
      }
      let angle = (dy as f64).atan2(dx as f64);
      if angle_in_sweep(angle, start, end) {
        canvas.blend_pixel(cx + dx, cy + dy, c);
      }
    }
  }
}

fn render_scatter(canvas: &mut Canvas, series: &[ChartSeries], px: i32, py: i32, pw: i32, ph: i32) {
  if series.is_empty() {
    return;
  }
  let (min, max) = value_range(series);
  let range = max - min;
  draw_axes(canvas, px, py, pw, ph);

  for (si, s) in series.iter().enumerate() {
    let sc = series_color(s, si);
    let n_pts = s.categories.len() as i32;
    for i in 0..n_pts {
      let pt_x = px + i * pw / (n_pts - 1).max(1);
      let pt_y = py + ph - (ph as f64 * (s.value(i as usize) - min) / range) as i32;
      fill_ellipse_aa(canvas, pt_x - 3, pt_y - 3, 7, 7, sc);
    }
  }
}

fn render_radar(canvas: &mut Canvas, series: &[ChartSeries], px: i32, py: i32, pw: i32, ph: i32) {
  if series.is_empty() {
    return;
  }
  let mut max = 0.0f64;
  for s in series {
    for &v in &s.values {
      max = max.max(v);
    }
  }
  if max == 0.0 {
    max = 1.0;
  }

  let cx = px + pw / 2;
  let cy = py + ph / 2;
  let radius = pw.min(ph) / 2;

  let n_cats = series[0].categories.len();
  if n_cats == 0 {
    return;
  }
  for i in 0..n_cats {
    let angle = 2.0 * PI * i as f64 / n_cats as f64 - PI / 2.0;
    let ex = cx + (radius as f64 * angle.cos()) as i32;
    let ey = cy + (radius as f64 * angle.sin()) as i32;
    draw_line(canvas, cx, cy, ex, ey, FRAME_COLOR);
  }

  for (si, s) in series.iter().enumerate() {
    let sc = series_color(s, si);
    let n_pts = s.categories.len();
    if n_pts == 0 {
      continue;
    }
    let pts: Vec<PointF> = (0..n_pts)
      .map(|i| {
        let angle = 2.0 * PI * i as f64 / n_pts as f64 - PI / 2.0;
        let dist = radius as f64 * s.value(i) / max;
        PointF::new(cx as f64 + dist * angle.cos(), cy as f64 + dist * angle.sin())
      })
      .collect();
    for i in 0..n_pts {
      let j = (i + 1) % n_pts;
      draw_line_aa(
        canvas,
        pts[i].x as i32,
        pts[i].y as i32,
        pts[j].x as i32,
        pts[j].y as i32,
        sc,
        2,
      );
    }
    fill_polygon(canvas, &pts, sc.with_alpha(64));
  }
}

/// Legend entries: one equally sized cell per entry, swatch then label.
/// Pie-family charts list the first series' categories; every other kind
/// lists the series themselves.
fn render_legend(
  canvas: &mut Canvas,
  cache: &FontCache,
  dpi: f64,
  chart: &ChartShape,
  lx: i32,
  ly: i32,
  lw: i32,
  lh: i32,
) {
  let mut entries: Vec<(String, Color)> = Vec::new();
  match chart.kind {
    ChartKind::Pie | ChartKind::Pie3D | ChartKind::Doughnut => {
      if let Some(s) = chart.series.first() {
        for (i, cat) in s.categories.iter().enumerate() {
          entries.push((cat.clone(), palette_color(i)));
        }
      }
    }
    _ => {
      for (i, s) in chart.series.iter().enumerate() {
        entries.push((s.name.clone(), series_color(s, i)));
      }
    }
  }
  if entries.is_empty() {
    return;
  }

  let legend_font = chart
    .legend
    .as_ref()
    .map(|l| l.font.clone())
    .unwrap_or_default();
  let face = cache.face_for(&legend_font, dpi);

  let entry_w = lw / entries.len() as i32;
  let swatch = 10;
  for (i, (name, color)) in entries.iter().enumerate() {
    let ex = lx + i as i32 * entry_w;
    let bx = ex + 4;
    let by = ly + (lh - swatch) / 2;
    canvas.fill_rect(Rect::from_xywh(bx, by, swatch, swatch), *color);
    face.draw(canvas, bx + swatch + 4, ly + lh / 2 + 4, name, Color::BLACK);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::chart::{ChartLegend, ChartTitle};

  fn two_series_chart(kind: ChartKind) -> ChartShape {
    let mut chart = ChartShape::new(kind);
    chart.add_series(ChartSeries::new("alpha", &["a", "b", "c"], &[10.0, 20.0, 30.0]));
    chart.add_series(ChartSeries::new("beta", &["a", "b", "c"], &[5.0, 15.0, 25.0]));
    chart
  }

  #[test]
  fn angle_sweep_is_periodic() {
    let tau = 2.0 * PI;
    for &(a, s, e) in &[
      (0.3, 0.0, 1.0),
      (5.0, 4.0, 1.0),
      (-0.5, -1.0, 0.5),
      (3.2, 3.0, 3.5),
    ] {
      let base = angle_in_sweep(a, s, e);
      assert_eq!(angle_in_sweep(a + tau, s, e), base);
      assert_eq!(angle_in_sweep(a, s + tau, e + tau), base);
    }
  }

  #[test]
  fn sweep_handles_wrap_around() {
    // Sweep from 350 to 10 degrees crosses zero.
    let start = 350.0f64.to_radians();
    let end = 370.0f64.to_radians();
    assert!(angle_in_sweep(0.0, start, end));
    assert!(angle_in_sweep(355.0f64.to_radians(), start, end));
    assert!(!angle_in_sweep(PI, start, end));
  }

  #[test]
  fn value_range_forces_zero_floor() {
    let series = [ChartSeries::new("s", &["a"], &[5.0])];
    assert_eq!(value_range(&series), (0.0, 5.0));
  }

  #[test]
  fn value_range_handles_all_equal_values() {
    let series = [ChartSeries::new("s", &["a", "b"], &[0.0, 0.0])];
    let (min, max) = value_range(&series);
    assert!(max > min);
  }

  #[test]
  fn empty_chart_renders_only_frame() {
    let mut canvas = Canvas::new(200, 150).unwrap();
    let cache = FontCache::empty();
    let chart = ChartShape::new(ChartKind::Bar);
    render_chart(&mut canvas, &cache, 96.0, &chart, 0, 0, 200, 150);
    assert_eq!(canvas.pixel(100, 75), Some(Color::WHITE));
  }

  #[test]
  fn bar_chart_paints_tallest_bar_in_series_color() {
    let mut canvas = Canvas::new(600, 400).unwrap();
    let cache = FontCache::empty();
    let chart = two_series_chart(ChartKind::Bar);
    render_chart(&mut canvas, &cache, 96.0, &chart, 0, 0, 600, 400);

    // Reproduce the layout: no title/legend, plot at (40, 5, 550, 385).
    let (px, py, pw, _ph) = (40, 5, 550, 385);
    let cat_w = pw / 3;
    let bar_w = cat_w / 3;
    // Series 0, category 2 holds the max value, so its bar spans the full
    // plot height.
    let bx = px + 2 * cat_w + bar_w - bar_w / 2;
    let top_center = (bx + (bar_w - 1) / 2, py + 1);
    assert_eq!(canvas.pixel(top_center.0, top_center.1), Some(palette_color(0)));
  }

  #[test]
  fn pie_chart_covers_center_region() {
    let mut canvas = Canvas::new(300, 300).unwrap();
    let cache = FontCache::empty();
    let mut chart = ChartShape::new(ChartKind::Pie);
    chart.add_series(ChartSeries::new("s", &["a", "b"], &[1.0, 1.0]));
    render_chart(&mut canvas, &cache, 96.0, &chart, 0, 0, 300, 300);
    let cx = 40 + (300 - 50) / 2;
    let cy = 5 + (300 - 15) / 2;
    // Just right of centre sits in some slice.
    let p = canvas.pixel(cx + 10, cy).unwrap();
    assert!(p == palette_color(0) || p == palette_color(1));
  }

  #[test]
  fn doughnut_leaves_the_hole_empty() {
    let mut canvas = Canvas::new(300, 300).unwrap();
    let cache = FontCache::empty();
    let mut chart = ChartShape::new(ChartKind::Doughnut);
    chart.hole_size_pct = 50;
    chart.add_series(ChartSeries::new("s", &["a", "b"], &[1.0, 1.0]));
    render_chart(&mut canvas, &cache, 96.0, &chart, 0, 0, 300, 300);
    let cx = 40 + (300 - 50) / 2;
    let cy = 5 + (300 - 15) / 2;
    assert_eq!(canvas.pixel(cx, cy), Some(Color::WHITE));
  }

  #[test]
  fn negative_pie_values_are_discarded() {
    let mut canvas = Canvas::new(300, 300).unwrap();
    let cache = FontCache::empty();
    let mut chart = ChartShape::new(ChartKind::Pie);
    chart.add_series(ChartSeries::new("s", &["a", "b"], &[-5.0, -1.0]));
    render_chart(&mut canvas, &cache, 96.0, &chart, 0, 0, 300, 300);
    let cx = 40 + (300 - 50) / 2;
    let cy = 5 + (300 - 15) / 2;
    assert_eq!(canvas.pixel(cx, cy), Some(Color::WHITE));
  }

  #[test]
  fn legend_swatch_uses_series_color() {
    let mut canvas = Canvas::new(600, 400).unwrap();
    let cache = FontCache::empty();
    let mut chart = two_series_chart(ChartKind::Line);
    chart.legend = Some(ChartLegend::default());
    chart.title = Some(ChartTitle::new("Trend"));
    render_chart(&mut canvas, &cache, 96.0, &chart, 0, 0, 600, 400);
    let ly = 400 - LEGEND_HEIGHT;
    let by = ly + (LEGEND_HEIGHT - 10) / 2;
    assert_eq!(canvas.pixel(6, by + 5), Some(palette_color(0)));
    assert_eq!(canvas.pixel(300 + 6, by + 5), Some(palette_color(1)));
  }
}
