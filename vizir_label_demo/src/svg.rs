// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `vizir_label_demo`.

use kurbo::Rect;
use peniko::Brush;
use vizir_label::{
    Direction, LabelDescriptor, LabelElement, LineRun, RectElement, TextElement, Transform,
};

/// Accumulates labels into one SVG document.
#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    body: String,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Draws a marker at a label's anchor point.
    pub(crate) fn push_anchor(&mut self, x: f64, y: f64) {
        self.body.push_str(&format!(
            r##"<circle cx="{x}" cy="{y}" r="2" fill="#e4572e"/>"##
        ));
        self.body.push('\n');
    }

    pub(crate) fn push_label(&mut self, label: &LabelDescriptor) {
        match &label.root {
            LabelElement::Text(text) => write_text(&mut self.body, text),
            LabelElement::Group(group) => {
                self.body.push_str("<g");
                write_opt_attr(&mut self.body, "class", group.class_name.as_deref());
                write_transform(&mut self.body, group.transform.as_ref());
                self.body.push_str(">\n");
                for rect in group.background.elements() {
                    write_rect(&mut self.body, rect);
                }
                write_text(&mut self.body, &group.text);
                self.body.push_str("</g>\n");
            }
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn write_rect(out: &mut String, rect: &RectElement) {
    let r = rect.rect;
    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.x0,
        r.y0,
        r.width(),
        r.height(),
    ));
    if let Some(radius) = rect.style.corner_radius {
        out.push_str(&format!(r#" rx="{radius}""#));
    }
    match &rect.style.fill {
        Some(fill) => write_paint_attr(out, "fill", fill),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &rect.style.stroke {
        write_paint_attr(out, "stroke", stroke);
        if let Some(width) = rect.style.stroke_width {
            out.push_str(&format!(r#" stroke-width="{width}""#));
        }
    }
    if let Some(opacity) = rect.style.opacity {
        out.push_str(&format!(r#" opacity="{opacity}""#));
    }
    write_opt_attr(out, "class", rect.class_name.as_deref());
    write_transform(out, rect.transform.as_ref());
    out.push_str("/>\n");
}

fn write_text(out: &mut String, text: &TextElement) {
    out.push_str(&format!(
        r#"<text id="{}" x="{}" y="{}""#,
        escape_xml(&text.id),
        text.position.x,
        text.position.y
    ));
    if text.direction != Direction::Inherit {
        out.push_str(&format!(r#" direction="{}""#, text.direction.as_css()));
    }
    write_opt_attr(out, "class", text.class_name.as_deref());
    if let Some(tab_index) = text.tab_index {
        out.push_str(&format!(r#" tabindex="{tab_index}""#));
    }
    write_transform(out, text.transform.as_ref());
    out.push('>');
    if let Some(title) = &text.title {
        out.push_str(&format!("<title>{}</title>", escape_xml(title)));
    }
    if let Some(desc) = &text.desc {
        out.push_str(&format!("<desc>{}</desc>", escape_xml(desc)));
    }
    out.push('\n');
    for run in &text.runs {
        write_run(out, run);
    }
    out.push_str("</text>\n");
}

fn write_run(out: &mut String, run: &LineRun) {
    out.push_str("  <tspan");
    if let Some(x) = run.x {
        out.push_str(&format!(r#" x="{x}""#));
    }
    let style = &run.style;
    out.push_str(&format!(
        r#" dx="{}" dy="{}" text-anchor="{}" font-size="{}" font-family="{}""#,
        run.dx,
        run.dy,
        run.anchor.as_css(),
        style.font_size,
        escape_xml(style.font_family.as_css_family()),
    ));
    if style.font_weight.0 != 400 {
        out.push_str(&format!(r#" font-weight="{}""#, style.font_weight.0));
    }
    if style.letter_spacing != 0.0 {
        out.push_str(&format!(r#" letter-spacing="{}""#, style.letter_spacing));
    }
    write_paint_attr(out, "fill", &style.fill);
    if let Some(width) = style.stroke_width {
        write_paint_attr(out, "stroke", &style.stroke);
        out.push_str(&format!(r#" stroke-width="{width}""#));
    }
    let mut extra: Vec<_> = style.extra.iter().collect();
    extra.sort();
    for (name, value) in extra {
        out.push_str(&format!(r#" {}="{}""#, name, escape_xml(value)));
    }
    out.push('>');
    out.push_str(&escape_xml(&run.text));
    out.push_str("</tspan>\n");
}

fn write_transform(out: &mut String, transform: Option<&Transform>) {
    if let Some(t) = transform.filter(|t| !t.is_empty()) {
        out.push_str(&format!(r#" transform="{t}""#));
    }
}

fn write_opt_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!(r#" {name}="{}""#, escape_xml(value)));
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
