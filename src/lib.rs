//! Freehand wireframe sketching for the site generator form.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns a
//! `<canvas>` drawing surface: it normalizes mouse and touch input into the
//! canvas's logical pixel grid, paints round-capped strokes, tracks whether
//! anything has been drawn since the last clear, and on request exports the
//! surface as a PNG data URL for the form's `canvas_data` field. The host page
//! only wires elements in and calls export before submitting.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Stroke state machine ([`engine::EngineCore`]) and browser [`engine::Engine`] |
//! | [`input`] | Raw pointer events and the coordinate normalizer |
//! | [`geom`] | Points, client rectangles, surface layout |
//! | [`style`] | Colors and stroke style, read live from the controls |
//! | [`surface`] | The paint seam implemented by both surfaces |
//! | [`raster`] | Headless in-memory surface |
//! | [`dom`] | `<canvas>` surface, control style, DOM event conversion |
//! | [`host`] | Attach/export/detach lifecycle and listener guards |
//! | [`snapshot`] | The exported payload and its data-URL codec |
//! | [`form`] | Multipart field assembly for the generation request |
//! | [`config`] | Host-supplied configuration |
//! | [`consts`] | Shared defaults |

pub mod config;
pub mod consts;
pub mod dom;
pub mod engine;
pub mod form;
pub mod geom;
pub mod host;
pub mod input;
pub mod raster;
pub mod snapshot;
pub mod style;
pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod wasm;
