// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::f64::consts::PI;

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use vizir_label_text::{TextMeasurer, TextSize, TextStyle};

use crate::{
    Background, BackgroundStyle, Datum, Direction, FontSize, LabelDescriptor, LabelPlacement,
    LabelSpec, LabelStyle, LabelWarning, Padding, PaddingSides, PaddingSpec, RectTemplate,
    TextAnchor, TextSpec, TransformOp, VerticalAnchor,
};

/// Half an em per character, one em tall.
struct FixedMeasurer;

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextSize {
        TextSize {
            width: text.chars().count() as f64 * style.font_size * 0.5,
            height: style.font_size,
        }
    }
}

fn layout(spec: &LabelSpec) -> Option<LabelDescriptor> {
    spec.layout(&FixedMeasurer, &RefCell::new(Vec::new()))
}

fn layout_with_warnings(spec: &LabelSpec) -> (Option<LabelDescriptor>, Vec<LabelWarning>) {
    let warnings = RefCell::new(Vec::new());
    let out = spec.layout(&FixedMeasurer, &warnings);
    (out, warnings.into_inner())
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() <= 1e-9, "{a} != {b}");
}

fn assert_rect_close(a: Rect, b: Rect) {
    assert_close(a.x0, b.x0);
    assert_close(a.y0, b.y0);
    assert_close(a.x1, b.x1);
    assert_close(a.y1, b.y1);
}

fn centered(text: impl Into<TextSpec>) -> LabelSpec {
    LabelSpec::new(text)
        .with_position(100.0, 50.0)
        .with_text_anchor(TextAnchor::Middle)
        .with_vertical_anchor(VerticalAnchor::Middle)
}

#[test]
fn single_line_without_background() {
    let spec = centered("Hello").with_style(LabelStyle::new().with_font_size(14.0));
    let out = layout(&spec).unwrap();

    assert!(out.background().is_none());
    assert_eq!(out.text().position, Point::new(100.0, 50.0));
    let runs = out.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "Hello");
    assert_eq!(runs[0].x, Some(100.0));
    assert_eq!(runs[0].anchor, TextAnchor::Middle);
    assert_eq!(runs[0].key, "label-key-0");
    assert_close(runs[0].dy, 0.355 * 14.0);
    assert_close(runs[0].dx, 0.0);
}

#[test]
fn second_line_steps_by_the_cap_corrected_delta() {
    let spec = LabelSpec::new(vec!["Line1", "Line2"]).with_style(vec![
        LabelStyle::new().with_font_size(20.0),
        LabelStyle::new().with_font_size(10.0),
    ]);
    let out = layout(&spec).unwrap();
    let runs = out.runs();
    assert_eq!(runs.len(), 2);
    assert_close(runs[0].dy, (0.355 - 0.5) * 20.0);
    // From the 20px line (cap 14.2) to the 10px line (cap 7.1):
    // floor(-10 - 10 + 20 + 0 + 5 + 5 - 0.5 * (10 - 7.1) + 0.5 * (20 - 14.2))
    let expected = (-10.0 - 10.0 + 20.0 + 5.0 + 5.0 - 0.5 * 2.9_f64 + 0.5 * 5.8).floor();
    assert_eq!(expected, 11.0);
    assert_eq!(runs[1].dy, expected);
    assert_eq!(runs[0].style.font_size, 20.0);
    assert_eq!(runs[1].style.font_size, 10.0);
}

#[test]
fn block_background_wraps_text_plus_padding() {
    let spec = centered("Hello")
        .with_background_style(BackgroundStyle::new().with_fill(css::WHITE))
        .with_background_padding(5.0);
    let out = layout(&spec).unwrap();

    let Some(Background::Block(rect)) = out.background() else {
        panic!("expected a block background");
    };
    let (w, h) = (35.0, 14.0 + 0.71 * 14.0);
    let x = (100.0_f64 - w / 2.0 + 0.5).floor();
    let y = (50.0_f64 - h / 2.0).floor();
    assert_rect_close(rect.rect, Rect::new(x, y, x + w + 10.0, y + h + 10.0));
    assert_eq!(out.runs().len(), 1);
}

#[test]
fn absent_text_renders_nothing() {
    let spec = LabelSpec {
        text: None,
        ..centered("unused").with_background_style(BackgroundStyle::new())
    };
    assert!(layout(&spec).is_none());
    assert!(layout(&LabelSpec::new(TextSpec::func(|_| None))).is_none());
}

#[test]
fn background_modes_are_exclusive() {
    let block = layout(&LabelSpec::new("a\nb\nc").with_background_style(BackgroundStyle::new()))
        .unwrap();
    assert!(matches!(block.background(), Some(Background::Block(_))));
    assert_eq!(block.background().unwrap().elements().len(), 1);

    let per_line = layout(
        &LabelSpec::new("a\nb\nc").with_background_style(vec![BackgroundStyle::new()]),
    )
    .unwrap();
    assert!(matches!(per_line.background(), Some(Background::PerLine(_))));
    assert_eq!(per_line.background().unwrap().elements().len(), 3);
}

#[test]
fn stacked_line_boxes_span_the_block_height() {
    let styles = vec![
        LabelStyle::new().with_font_size(20.0),
        LabelStyle::new().with_font_size(10.0),
        LabelStyle::new().with_font_size(16.0),
    ];
    let base = LabelSpec::new("one\ntwo\nthree")
        .with_vertical_anchor(VerticalAnchor::Start)
        .with_style(styles);

    let block = layout(&base.clone().with_background_style(BackgroundStyle::new())).unwrap();
    let per_line = layout(&base.with_background_style(vec![BackgroundStyle::new()])).unwrap();

    let block_height = block.background().unwrap().elements()[0].rect.height();
    let boxes = per_line.background().unwrap().elements();
    let span = boxes[boxes.len() - 1].rect.y1 - boxes[0].rect.y0;
    let cap_allowance = 0.71 * 20.0;
    assert_close(block_height - cap_allowance, span);
    for pair in boxes.windows(2) {
        assert_close(pair[0].rect.y1, pair[1].rect.y0);
    }
}

#[test]
fn unparsable_font_size_degrades_with_one_warning() {
    let spec = LabelSpec::new("a").with_style(LabelStyle::new().with_font_size("abcpx"));
    let (out, warnings) = layout_with_warnings(&spec);
    assert_eq!(out.unwrap().runs()[0].style.font_size, 14.0);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn polar_labels_rotate_unless_vertical() {
    let datum = Datum::new(PI / 4.0, 10.0);
    let origin = Point::new(50.0, 50.0);

    let upright = LabelSpec::new("a")
        .with_datum(datum)
        .with_polar(origin, LabelPlacement::Vertical);
    assert_eq!(layout(&upright).unwrap().text().transform, None);

    let parallel = LabelSpec::new("a")
        .with_datum(datum)
        .with_polar(origin, LabelPlacement::Parallel);
    let out = layout(&parallel).unwrap();
    let transform = out.text().transform.clone().unwrap();
    let [TransformOp::Rotate { angle, center }] = transform.ops() else {
        panic!("expected a single rotation, got {transform:?}");
    };
    assert_close(*angle, -45.0);
    assert_eq!(*center, Some(out.text().position));
    assert_close(out.text().position.x, 50.0 + 10.0 * (PI / 4.0).cos());
    assert_close(out.text().position.y, 50.0 - 10.0 * (PI / 4.0).sin());
}

#[test]
fn rotation_is_shared_by_text_and_background() {
    let spec = centered("a")
        .with_angle(30.0)
        .with_background_style(BackgroundStyle::new());
    let out = layout(&spec).unwrap();
    let rect = &out.background().unwrap().elements()[0];
    assert!(out.text().transform.is_some());
    assert_eq!(rect.transform, out.text().transform);
}

#[test]
fn explicit_template_width_is_kept() {
    let spec = centered("Hello")
        .with_background_style(BackgroundStyle::new())
        .with_background_template(RectTemplate::new().with_width(200.0));
    let out = layout(&spec).unwrap();
    assert_close(out.background().unwrap().elements()[0].rect.width(), 200.0);
}

#[test]
fn per_line_padding_reaches_runs_and_boxes() {
    let padding = PaddingSpec::PerLine(vec![
        Padding::from(PaddingSides {
            top: Some(3.0),
            left: Some(4.0),
            ..PaddingSides::default()
        }),
        Padding::uniform(2.0),
    ]);
    let spec = LabelSpec::new("ab\ncd")
        .with_style(LabelStyle::new().with_font_size(10.0))
        .with_background_padding(padding)
        .with_background_style(vec![BackgroundStyle::new()]);
    let out = layout(&spec).unwrap();

    let runs = out.runs();
    assert_close(runs[0].dx, 4.0);
    assert_close(runs[1].dx, 2.0);
    assert_close(runs[0].dy, (0.355 - 0.5) * 10.0 + 3.0);

    let boxes = out.background().unwrap().elements();
    assert_close(boxes[0].rect.width(), 10.0 + 4.0);
    assert_close(boxes[0].rect.height(), 10.0 + 3.0);
    assert_close(boxes[1].rect.width(), 10.0 + 4.0);
    assert_close(boxes[1].rect.height(), 10.0 + 4.0);
    assert_close(boxes[1].rect.y0 - boxes[0].rect.y0, 10.0 + 3.0);
}

#[test]
fn rtl_boxes_end_at_the_anchor() {
    let spec = LabelSpec::new("abcd")
        .with_position(100.0, 0.0)
        .with_direction(Direction::Rtl)
        .with_style(LabelStyle::new().with_font_size(10.0))
        .with_background_style(BackgroundStyle::new());
    let out = layout(&spec).unwrap();
    assert_close(out.background().unwrap().elements()[0].rect.x0, 80.0);
}

#[test]
fn inline_runs_continue_the_first() {
    let spec = LabelSpec::new("ab\ncd").with_inline(true).with_dx(3.0);
    let out = layout(&spec).unwrap();
    let runs = out.runs();
    assert!(runs.iter().all(|r| r.x.is_none()));
    assert_eq!(runs[1].dy, 0.0);
    assert_close(runs[1].dx, 3.0);
}

#[test]
fn inline_text_starts_inside_each_line_box() {
    let spec = LabelSpec::new("ab\ncd")
        .with_inline(true)
        .with_dx(2.0)
        .with_style(LabelStyle::new().with_font_size(10.0))
        .with_background_padding(3.0)
        .with_background_style(vec![BackgroundStyle::new()]);
    let out = layout(&spec).unwrap();
    let boxes = out.background().unwrap().elements();
    let runs = out.runs();

    let mut start = out.text().position.x;
    for (i, (run, rect)) in runs.iter().zip(boxes).enumerate() {
        start += run.dx;
        assert_close(start, rect.rect.x0 + 3.0);
        assert_close(rect.rect.width(), 10.0 + 6.0);
        if i == 0 {
            assert_close(rect.rect.x0, 2.0);
        }
        start += 10.0;
    }
    assert_close(boxes[1].rect.x0, 2.0 + 16.0 + 2.0);
}

#[test]
fn inline_block_background_spans_the_joined_row() {
    let spec = LabelSpec::new("ab\ncd")
        .with_inline(true)
        .with_dx(3.0)
        .with_style(LabelStyle::new().with_font_size(10.0))
        .with_background_style(BackgroundStyle::new());
    let out = layout(&spec).unwrap();
    let Some(Background::Block(rect)) = out.background() else {
        panic!("expected a block background");
    };
    // "ab cd" is 25px wide, plus dx for each of the two lines.
    assert_close(rect.rect.width(), 25.0 + 3.0 * 2.0);
    // The tallest line, plus the cap height allowance.
    assert_close(rect.rect.height(), 10.0 + 0.71 * 10.0);
    assert_eq!(out.runs().len(), 2);
}

#[test]
fn dynamic_styles_see_resolved_lines() {
    let spec = LabelSpec::new("short\nmuch longer line").with_style(
        LabelStyle::new().with_font_size_fn(|cx| {
            let lines = cx.lines().map_or(0, <[String]>::len);
            FontSize::Px(if lines > 1 { 10.0 } else { 20.0 })
        }),
    );
    let out = layout(&spec).unwrap();
    assert!(out.runs().iter().all(|r| r.style.font_size == 10.0));
}
