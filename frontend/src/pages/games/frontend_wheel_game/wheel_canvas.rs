use std::f64::consts::PI;
use std::rc::Rc;

use gloo_events::EventListener;
use shared::shared_wheel_game::{Segment, SPIN_EASING, SEGMENTS};
use shared::wheel_config::WheelFace;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use yew::prelude::*;

use crate::config::get_asset_url;

const RIM_COLOR: &str = "#ebc566";
const GLOW_COLOR: &str = "#FFD700";
const DIVIDER_EDGE_COLOR: &str = "#e7c710";

/// Backing store size of the canvas, independent of its CSS size
pub fn canvas_size(viewport_width: f64) -> u32 {
    if viewport_width >= 1920.0 {
        1230
    } else {
        568
    }
}

/// Where labels and icons sit, as fractions of the wheel radius
struct LabelLayout {
    font_scale: f64,
    icon_scale: f64,
    text_offset: f64,
    icon_offset: f64,
}

impl LabelLayout {
    fn for_canvas(width: f64) -> Self {
        if width >= 1000.0 {
            Self { font_scale: 0.12, icon_scale: 0.26, text_offset: 0.82, icon_offset: 0.56 }
        } else if width >= 768.0 {
            Self { font_scale: 0.105, icon_scale: 0.13, text_offset: 0.63, icon_offset: 0.44 }
        } else {
            Self { font_scale: 0.12, icon_scale: 0.25, text_offset: 0.78, icon_offset: 0.52 }
        }
    }
}

fn loaded_icon<'a>(icons: &'a [(&'static str, HtmlImageElement)], src: &str) -> Option<&'a HtmlImageElement> {
    icons
        .iter()
        .find(|(icon, _)| *icon == src)
        .map(|(_, img)| img)
        .filter(|img| img.complete() && img.natural_width() > 0)
}

fn draw_segment(
    context: &CanvasRenderingContext2d,
    segment: &Segment,
    index: usize,
    (cx, cy, radius): (f64, f64, f64),
    layout: &LabelLayout,
    icons: &[(&'static str, HtmlImageElement)],
) -> Result<(), JsValue> {
    let sweep = 2.0 * PI / SEGMENTS.len() as f64;
    let start = index as f64 * sweep - PI / 2.0;
    let end = start + sweep;
    let mid = (start + end) / 2.0;

    context.begin_path();
    context.move_to(cx, cy);
    context.arc(cx, cy, radius, start, end)?;
    context.set_fill_style_str(segment.color);
    context.fill();

    context.save();
    context.translate(cx, cy)?;
    context.rotate(mid + PI / 2.0)?;

    let font_size = radius * layout.font_scale;
    let text_y = -radius * layout.text_offset;
    context.set_font(&format!("bold {}px Inter", font_size));
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str("#fff");
    context.set_stroke_style_str("#000");
    context.set_line_width(font_size * 0.1);
    context.stroke_text(segment.label, 0.0, text_y)?;
    context.fill_text(segment.label, 0.0, text_y)?;

    if let Some(img) = loaded_icon(icons, segment.icon) {
        let size = radius * layout.icon_scale;
        let icon_y = -radius * layout.icon_offset;
        context.draw_image_with_html_image_element_and_dw_and_dh(img, -size / 2.0, icon_y - size / 2.0, size, size)?;
    }

    context.restore();
    Ok(())
}

/// Paints the six segments at rotation zero. Turning is done with a CSS transform.
fn draw_wheel(canvas: &HtmlCanvasElement, icons: &[(&'static str, HtmlImageElement)]) -> Result<(), JsValue> {
    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let (cx, cy) = (width / 2.0, height / 2.0);
    let radius = cx.min(cy) - 20.0;
    let layout = LabelLayout::for_canvas(width);

    context.clear_rect(0.0, 0.0, width, height);

    context.begin_path();
    context.arc(cx, cy, radius, 0.0, 2.0 * PI)?;
    context.set_fill_style_str("#000");
    context.fill();

    context.save();
    context.begin_path();
    context.arc(cx, cy, radius, 0.0, 2.0 * PI)?;
    context.set_line_width(radius * 0.05);
    context.set_stroke_style_str(RIM_COLOR);
    context.set_shadow_color(GLOW_COLOR);
    context.set_shadow_blur(radius * 0.03);
    context.stroke();
    context.restore();

    for (index, segment) in SEGMENTS.iter().enumerate() {
        draw_segment(&context, segment, index, (cx, cy, radius), &layout, icons)?;
    }

    for index in 0..SEGMENTS.len() {
        let angle = index as f64 * 2.0 * PI / SEGMENTS.len() as f64 - PI / 2.0;
        let end_x = cx + angle.cos() * radius;
        let end_y = cy + angle.sin() * radius;

        for (color, width) in [(DIVIDER_EDGE_COLOR, 0.025), (GLOW_COLOR, 0.015)] {
            context.set_stroke_style_str(color);
            context.set_line_width(radius * width);
            context.begin_path();
            context.move_to(cx, cy);
            context.line_to(end_x, end_y);
            context.stroke();
        }
    }

    Ok(())
}

fn load_icons() -> Vec<(&'static str, HtmlImageElement)> {
    let mut icons: Vec<(&'static str, HtmlImageElement)> = Vec::new();
    for segment in SEGMENTS.iter() {
        if icons.iter().any(|(src, _)| *src == segment.icon) {
            continue;
        }
        match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(&get_asset_url(segment.icon));
                icons.push((segment.icon, img));
            }
            Err(e) => log::warn!("Could not create icon {}: {:?}", segment.icon, e),
        }
    }
    icons
}

#[derive(Properties, PartialEq)]
struct CanvasFaceProps {
    size: u32,
}

#[function_component(CanvasFace)]
fn canvas_face(props: &CanvasFaceProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.size, move |_| {
            let icons = Rc::new(load_icons());

            let redraw = {
                let canvas_ref = canvas_ref.clone();
                let icons = icons.clone();
                Rc::new(move || {
                    if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                        if let Err(e) = draw_wheel(&canvas, &icons) {
                            log::error!("Failed to draw wheel: {:?}", e);
                        }
                    }
                })
            };

            // Labels first, icons as they arrive
            redraw();
            let listeners: Vec<EventListener> = icons
                .iter()
                .map(|(_, img)| {
                    let redraw = redraw.clone();
                    EventListener::once(img, "load", move |_| redraw())
                })
                .collect();

            move || drop(listeners)
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={props.size.to_string()}
            height={props.size.to_string()}
            class="absolute inset-0 w-full h-full"
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct WheelFaceViewProps {
    pub face: WheelFace,
    pub rotation: f64,
    pub transition_ms: u32,
    pub viewport_width: f64,
}

/// The turning part of the wheel, either painted on a canvas or a single image.
#[function_component(WheelFaceView)]
pub fn wheel_face_view(props: &WheelFaceViewProps) -> Html {
    let style = format!(
        "transform: rotate({}deg); transition: transform {}ms {};",
        props.rotation, props.transition_ms, SPIN_EASING
    );

    let face = match &props.face {
        WheelFace::Canvas => html! { <CanvasFace size={canvas_size(props.viewport_width)} /> },
        WheelFace::Image { src } => html! {
            <img
                src={get_asset_url(src)}
                alt="Prize wheel"
                draggable="false"
                class="absolute inset-0 w-full h-full select-none"
            />
        },
    };

    html! {
        <div class="absolute inset-0 z-[2] will-change-transform" {style}>
            {face}
        </div>
    }
}
