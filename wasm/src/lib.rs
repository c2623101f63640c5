use esa_dashboard::{RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    canvas_width: Option<f32>,
    max_rows_per_column: Option<usize>,
}

fn build_render_options(options: DashboardRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("classic") {
        RenderOptions::classic()
    } else {
        RenderOptions::modern()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(canvas_width) = options.canvas_width {
        render_options.layout.canvas_width = canvas_width;
    }
    if let Some(rows) = options.max_rows_per_column {
        render_options.layout.max_rows_per_column = rows;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_dashboard_svg(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<DashboardRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        DashboardRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
