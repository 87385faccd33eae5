// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label layout demos for `vizir_label`.
mod svg;

use std::f64::consts::PI;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;
use vizir_label::{
    BackgroundStyle, Datum, Direction, Dynamic, FontSize, LabelPlacement, LabelSpec, LabelStyle,
    Padding, PaddingSides, PaddingSpec, RectTemplate, TextAnchor, TextSpec, TextValue,
    VerticalAnchor,
};
use vizir_label_text::{FontWeight, HeuristicTextMeasurer};

const CELL: (f64, f64) = (220.0, 130.0);
const COLUMNS: usize = 3;

const HIGHLIGHT: Color = Color::from_rgb8(0xff, 0xf3, 0xb0);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vizir_label=trace")),
        )
        .init();

    let labels = gallery();
    let rows = labels.len().div_ceil(COLUMNS);
    let mut scene = svg::SvgScene::default();
    scene.set_view_box(Rect::new(
        0.0,
        0.0,
        CELL.0 * COLUMNS as f64,
        CELL.1 * rows as f64,
    ));

    let measurer = HeuristicTextMeasurer;
    for (i, (name, spec)) in labels.into_iter().enumerate() {
        let cell = Point::new(
            CELL.0 * (i % COLUMNS) as f64,
            CELL.1 * (i / COLUMNS) as f64,
        );
        let anchor = Point::new(cell.x + CELL.0 / 2.0, cell.y + CELL.1 / 2.0);
        let spec = if spec.datum.is_some() && spec.polar {
            LabelSpec {
                origin: anchor,
                ..spec
            }
        } else {
            spec.with_position(anchor.x, anchor.y)
        };
        let anchor = spec.anchor_point();
        scene.push_anchor(anchor.x, anchor.y);
        match spec.layout_traced(&measurer) {
            Some(label) => scene.push_label(&label),
            None => tracing::info!("{name}: nothing to render"),
        }
    }

    std::fs::write("vizir_label_demo.svg", scene.to_svg_string())
        .expect("write vizir_label_demo.svg");
    println!("wrote vizir_label_demo.svg");
}

fn gallery() -> Vec<(&'static str, LabelSpec)> {
    vec![
        (
            "centered",
            LabelSpec::new("Hello")
                .with_text_anchor(TextAnchor::Middle)
                .with_vertical_anchor(VerticalAnchor::Middle),
        ),
        (
            "mixed sizes",
            LabelSpec::new(vec!["Revenue", "up 12% on last year"])
                .with_text_anchor(TextAnchor::Middle)
                .with_style(vec![
                    LabelStyle::new()
                        .with_font_size(20.0)
                        .with_font_weight(FontWeight::BOLD),
                    LabelStyle::new().with_font_size(10.0).with_fill(css::GRAY),
                ]),
        ),
        (
            "block background",
            LabelSpec::new("Peak\n1,204 visits")
                .with_text_anchor(TextAnchor::Middle)
                .with_background_style(
                    BackgroundStyle::new()
                        .with_fill(HIGHLIGHT)
                        .with_stroke(css::BLACK, 1.0)
                        .with_corner_radius(3.0),
                )
                .with_background_padding(5.0),
        ),
        (
            "per-line backgrounds",
            LabelSpec::new("alpha\nbeta\ngamma")
                .with_style(LabelStyle::new().with_font_size(12.0))
                .with_background_style(vec![
                    BackgroundStyle::new().with_fill(css::LIGHT_BLUE),
                    BackgroundStyle::new().with_fill(css::LIGHT_GREEN),
                ])
                .with_background_padding(PaddingSpec::PerLine(vec![
                    Padding::uniform(2.0),
                    Padding::from(PaddingSides {
                        left: Some(8.0),
                        right: Some(8.0),
                        ..PaddingSides::default()
                    }),
                ])),
        ),
        (
            "rotated",
            LabelSpec::new("rotated 30°")
                .with_angle(30.0)
                .with_background_style(BackgroundStyle::new().with_stroke(css::DARK_RED, 1.0)),
        ),
        (
            "right to left",
            LabelSpec::new("ends at the anchor")
                .with_direction(Direction::Rtl)
                .with_vertical_anchor(VerticalAnchor::End)
                .with_background_style(BackgroundStyle::new().with_fill(HIGHLIGHT)),
        ),
        (
            "inline",
            LabelSpec::new("one\ntwo\nthree")
                .with_inline(true)
                .with_dx(4.0)
                .with_text_anchor(TextAnchor::Middle)
                .with_background_style(vec![BackgroundStyle::new().with_fill(css::LAVENDER)]),
        ),
        (
            "polar",
            LabelSpec::new(TextSpec::func(|cx| {
                cx.datum()
                    .map(|d| TextValue::from(format!("{:.0}°", d.x.to_degrees())))
            }))
            .with_datum(Datum::new(PI / 3.0, 40.0))
            .with_polar(Point::ORIGIN, LabelPlacement::Perpendicular),
        ),
        (
            "dynamic style",
            LabelSpec::new("wide line wraps smaller\nshort")
                .with_id("dynamic")
                .with_style(LabelStyle::new().with_font_size_fn(|cx| {
                    let longest = cx
                        .lines()
                        .into_iter()
                        .flatten()
                        .map(|l| l.chars().count())
                        .max()
                        .unwrap_or(0);
                    FontSize::Px(if longest > 12 { 10.0 } else { 16.0 })
                }))
                .with_desc(Dynamic::func(|cx| {
                    format!("{} lines", cx.lines().map_or(0, <[String]>::len))
                })),
        ),
        (
            "fixed width box",
            LabelSpec::new("fixed")
                .with_text_anchor(TextAnchor::Middle)
                .with_background_style(BackgroundStyle::new().with_fill(HIGHLIGHT))
                .with_background_template(RectTemplate::new().with_width(120.0)),
        ),
        (
            "bad font size",
            LabelSpec::new("falls back to 14px")
                .with_style(LabelStyle::new().with_font_size("abcpx")),
        ),
        ("no text", LabelSpec::new(TextSpec::func(|_| None))),
    ]
}
