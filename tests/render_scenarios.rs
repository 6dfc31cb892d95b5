//! End-to-end rendering scenarios.
//!
//! All scenarios run against an empty font cache so text resolves to the
//! deterministic built-in bitmap face (8 px advance per character).

use std::sync::Arc;

use deckraster::model::chart::{ChartKind, ChartSeries, ChartShape};
use deckraster::model::paragraph::Paragraph;
use deckraster::model::shape::{GroupShape, Shape, TextBoxShape, Transform2D};
use deckraster::model::slide::{Presentation, Slide, SlideSize};
use deckraster::model::style::{Alignment, Fill, HorizontalAlign};
use deckraster::{render_slide, Color, FontCache, RenderOptions};

fn options() -> RenderOptions {
  RenderOptions {
    font_cache: Some(Arc::new(FontCache::empty())),
    ..RenderOptions::default()
  }
}

fn presentation_4x3() -> Presentation {
  let mut p = Presentation::new(SlideSize::SCREEN_4X3);
  p.add_slide(Slide::new());
  p
}

fn red_box() -> TextBoxShape {
  let mut shape = TextBoxShape::default();
  shape.transform = Transform2D::at(914_400, 914_400, 1_828_800, 1_371_600);
  shape.transform.fill = Fill::Solid(Color::RED);
  shape
}

#[test]
fn blank_slide_renders_all_white_at_aspect_size() {
  let mut p = presentation_4x3();
  p.slides[0].background = Some(Fill::Solid(Color::WHITE));
  let canvas = render_slide(&p, 0, &options()).unwrap();
  assert_eq!((canvas.width(), canvas.height()), (960, 720));
  assert!(canvas
    .data()
    .chunks_exact(4)
    .all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn solid_rectangle_lands_on_exact_pixels() {
  let mut p = presentation_4x3();
  p.slides[0].shapes.push(Shape::RichText(red_box()));
  let canvas = render_slide(&p, 0, &options()).unwrap();

  assert_eq!(canvas.pixel(96, 96), Some(Color::RED));
  assert_eq!(canvas.pixel(95, 95), Some(Color::WHITE));
  // Centre of the shape box.
  assert_eq!(canvas.pixel(192, 168), Some(Color::RED));
  // The box spans [96, 288) x [96, 240).
  assert_eq!(canvas.pixel(287, 239), Some(Color::RED));
  assert_eq!(canvas.pixel(289, 240), Some(Color::WHITE));
}

#[test]
fn rotated_rectangle_keeps_its_center_and_transposes() {
  let mut p = presentation_4x3();
  let mut shape = red_box();
  shape.transform.rotation_deg = 90;
  p.slides[0].shapes.push(Shape::RichText(shape));
  let canvas = render_slide(&p, 0, &options()).unwrap();

  // The original box is [96, 288) x [96, 240), centred on (192, 168);
  // after a quarter turn the coloured set spans roughly
  // [120, 264) x [72, 264) about the same centre.
  assert_eq!(canvas.pixel(192, 168), Some(Color::RED));
  assert_eq!(canvas.pixel(192, 80), Some(Color::RED));
  assert_eq!(canvas.pixel(192, 255), Some(Color::RED));
  assert_eq!(canvas.pixel(110, 168), Some(Color::WHITE));
  assert_eq!(canvas.pixel(274, 168), Some(Color::WHITE));
}

#[test]
fn flipped_rectangle_matches_unflipped_for_symmetric_fill() {
  // A solid fill is mirror-symmetric, so flipping must not change pixels.
  let mut plain = presentation_4x3();
  plain.slides[0].shapes.push(Shape::RichText(red_box()));
  let mut flipped = presentation_4x3();
  let mut shape = red_box();
  shape.transform.flip_h = true;
  flipped.slides[0].shapes.push(Shape::RichText(shape));

  let a = render_slide(&plain, 0, &options()).unwrap();
  let b = render_slide(&flipped, 0, &options()).unwrap();
  assert_eq!(a.data(), b.data());
}

#[test]
fn linear_gradient_interpolates_across_the_box() {
  // Slide 9600x960 EMU at width 960 gives a 0.1 scale; the 1000x100 EMU
  // shape becomes a 100x10 px box.
  let mut p = Presentation::new(SlideSize {
    cx_emu: 9_600,
    cy_emu: 960,
  });
  p.add_slide(Slide::new());
  let mut shape = TextBoxShape::default();
  shape.transform = Transform2D::at(0, 0, 1_000, 100);
  shape.transform.fill = Fill::LinearGradient {
    start: Color::RED,
    end: Color::BLUE,
    rotation_deg: 0.0,
  };
  p.slides[0].shapes.push(Shape::RichText(shape));
  let canvas = render_slide(&p, 0, &options()).unwrap();

  let left = canvas.pixel(0, 5).unwrap();
  assert!(left.r >= 250 && left.b <= 5, "left {left:?}");
  let right = canvas.pixel(99, 5).unwrap();
  assert!(right.b >= 250 && right.r <= 5, "right {right:?}");
  let mid = canvas.pixel(50, 5).unwrap();
  assert!((mid.r as i32 - 127).abs() <= 1, "mid {mid:?}");
  assert_eq!(mid.g, 0);
  assert!((mid.b as i32 - 128).abs() <= 1, "mid {mid:?}");
  assert_eq!(mid.a, 255);
}

#[test]
fn centered_text_starts_at_the_expected_column() {
  // 4000x1000 EMU at 0.1 scale -> a 400x100 px box. "Hello" measures
  // 5 * 8 = 40 px with the bitmap face, so the glyphs start near
  // (400 - 40) / 2 = 180.
  let mut p = Presentation::new(SlideSize {
    cx_emu: 9_600,
    cy_emu: 960,
  });
  p.add_slide(Slide::new());
  let mut shape = TextBoxShape::default();
  shape.transform = Transform2D::at(0, 0, 4_000, 1_000);
  let mut para = Paragraph::with_text("Hello");
  para.alignment = Some(Alignment::horizontal(HorizontalAlign::Center));
  shape.paragraphs.push(para);
  p.slides[0].shapes.push(Shape::RichText(shape));
  let canvas = render_slide(&p, 0, &options()).unwrap();

  let mut leftmost = None;
  'outer: for x in 0..400 {
    for y in 0..96 {
      if canvas.pixel(x, y).map_or(false, |c| c != Color::WHITE && c.a > 0) {
        leftmost = Some(x);
        break 'outer;
      }
    }
  }
  let leftmost = leftmost.expect("no glyph pixels rendered");
  assert!((179..=181).contains(&leftmost), "leftmost {leftmost}");
}

#[test]
fn bar_chart_bars_use_series_colors_and_equal_widths() {
  let mut p = presentation_4x3();
  let mut chart = ChartShape::new(ChartKind::Bar);
  chart.add_series(ChartSeries::new("first", &["a", "b", "c"], &[10.0, 20.0, 30.0]));
  chart.add_series(ChartSeries::new("second", &["a", "b", "c"], &[5.0, 15.0, 25.0]));
  chart.transform = Transform2D::at(0, 0, 5_715_000, 3_810_000);
  p.slides[0].shapes.push(Shape::Chart(chart));
  let canvas = render_slide(&p, 0, &options()).unwrap();

  // Chart box is 600x400 px at width 960; plot area (40, 5) .. 550x385.
  let (px, py, pw, ph) = (40, 5, 550, 385);
  let cat_w = pw / 3;
  let bar_w = cat_w / 3;
  let palette0 = Color::rgb(79, 129, 189);
  let palette1 = Color::rgb(192, 80, 77);

  // Tallest bar: series 0, category 2 spans the full plot height.
  let tall_x = px + 2 * cat_w + bar_w - bar_w / 2 + (bar_w - 1) / 2;
  assert_eq!(canvas.pixel(tall_x, py + 1), Some(palette0));

  // Every bar is painted in its series colour along the bottom row.
  let bottom = py + ph - 1;
  for ci in 0..3 {
    for si in 0..2 {
      let bx = px + ci * cat_w + (si + 1) * bar_w - bar_w / 2;
      let sample_x = bx + (bar_w - 1) / 2;
      let want = if si == 0 { palette0 } else { palette1 };
      assert_eq!(canvas.pixel(sample_x, bottom), Some(want), "bar {ci}/{si}");
    }
  }
}

#[test]
fn rendering_is_deterministic() {
  let mut p = presentation_4x3();
  let mut text = red_box();
  text.paragraphs.push(Paragraph::with_text("alpha beta gamma"));
  p.slides[0].shapes.push(Shape::RichText(text));

  let mut group = GroupShape::default();
  group.transform = Transform2D::at(4_572_000, 914_400, 1_828_800, 1_828_800);
  group.transform.rotation_deg = 30;
  let mut inner = TextBoxShape::default();
  inner.transform = Transform2D::at(4_572_000, 914_400, 914_400, 914_400);
  inner.transform.fill = Fill::Solid(Color::BLUE);
  group.children.push(Shape::RichText(inner));
  p.slides[0].shapes.push(Shape::Group(group));

  let opts = options();
  let a = render_slide(&p, 0, &opts).unwrap();
  let b = render_slide(&p, 0, &opts).unwrap();
  assert_eq!(a.data(), b.data());
}

#[test]
fn later_shapes_composite_over_earlier_ones() {
  let mut p = presentation_4x3();
  p.slides[0].shapes.push(Shape::RichText(red_box()));
  let mut blue = red_box();
  blue.transform.fill = Fill::Solid(Color::BLUE);
  p.slides[0].shapes.push(Shape::RichText(blue));
  let canvas = render_slide(&p, 0, &options()).unwrap();
  assert_eq!(canvas.pixel(192, 168), Some(Color::BLUE));
}
