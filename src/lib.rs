//! Interaction core for the visual page builder.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! its logic is target-independent: the host hands it pointer and drag events,
//! it validates them, computes the next state, and publishes it into an owned
//! store. Rendering, styling and persistence stay on the JavaScript side.
//!
//! Two subsystems share no state:
//!
//! - **Tree editing**: nested elements rearranged by native drag-and-drop.
//!   [`tree`] holds the pure mutation functions, [`dnd`] the per-node
//!   controllers that drive them.
//! - **Free-form canvas**: flat, absolutely positioned elements moved and
//!   resized with the mouse, with alignment guides against their neighbours
//!   ([`freeform`], [`guides`]).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Element model; locate / detach / update / append |
//! | [`dnd`] | Per-node drag-and-drop controller and the canvas drop zone |
//! | [`event`] | Drag payload and handler effects (prevent default, stop propagation) |
//! | [`store`] | Owned replace-whole-value stores |
//! | [`freeform`] | Drag/resize state machine for positioned elements |
//! | [`guides`] | Alignment guide computation |
//! | [`geom`] | Points and positioned elements |
//! | [`config`] | Free-form engine configuration |
//! | [`consts`] | Default values |
//! | [`host`] | `wasm-bindgen` adapters for the DOM |

pub mod config;
pub mod consts;
pub mod dnd;
pub mod event;
pub mod freeform;
pub mod geom;
pub mod guides;
pub mod host;
pub mod store;
pub mod tree;
