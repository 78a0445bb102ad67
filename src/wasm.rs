//! JavaScript entry points.

use wasm_bindgen::prelude::*;
use web_sys::{File, FormData, HtmlCanvasElement, HtmlElement, HtmlInputElement};

use crate::config::SketchConfig;
use crate::form::SubmissionForm;
use crate::host::{self, ElementIds, SketchElements, SketchHost};

/// Install console logging and the panic hook once per page.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("console logger already installed: {err}");
    }
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

fn parse_config(config_json: Option<String>) -> Result<SketchConfig, JsValue> {
    match config_json {
        Some(raw) => SketchConfig::from_json(&raw).map_err(js_error),
        None => Ok(SketchConfig::default()),
    }
}

/// A sketch bound to a canvas and its controls.
#[wasm_bindgen]
pub struct Sketchpad {
    host: SketchHost,
}

#[wasm_bindgen]
impl Sketchpad {
    /// Attach to explicit elements. Any missing element yields an inert sketchpad.
    ///
    /// Throws only if `config_json` is present and invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: Option<HtmlCanvasElement>,
        color: Option<HtmlInputElement>,
        size: Option<HtmlInputElement>,
        clear: Option<HtmlElement>,
        sink: Option<HtmlInputElement>,
        config_json: Option<String>,
    ) -> Result<Sketchpad, JsValue> {
        let config = parse_config(config_json)?;
        let elements = SketchElements { canvas, color, size, clear, sink };
        Ok(Self { host: SketchHost::attach(elements, &config) })
    }

    /// Attach to the default element ids of the generator form.
    #[wasm_bindgen(js_name = fromDocument)]
    pub fn from_document(config_json: Option<String>) -> Result<Sketchpad, JsValue> {
        let config = parse_config(config_json)?;
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(Self { host: SketchHost::inert() });
        };
        let elements = SketchElements::from_document(&document, &ElementIds::default());
        Ok(Self { host: SketchHost::attach(elements, &config) })
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.host.is_attached()
    }

    /// The current sketch as a PNG data URL, or `""` when nothing was drawn.
    #[wasm_bindgen(js_name = exportSnapshot)]
    pub fn export_snapshot(&self) -> String {
        self.host.export().into_string()
    }

    pub fn clear(&self) {
        self.host.clear();
    }

    pub fn detach(&mut self) {
        self.host.detach();
    }

    /// Export the sketch and build the multipart body from a JSON form description.
    #[wasm_bindgen(js_name = buildFormData)]
    pub fn build_form_data(&self, form_json: &str, image: Option<File>) -> Result<FormData, JsValue> {
        let form = SubmissionForm::from_json(form_json).map_err(js_error)?;
        let fields = form.fields(&self.host.export()).map_err(js_error)?;
        host::form_data(&fields, image.as_ref())
    }
}
