//! Browser bindings.
//!
//! Thin `wasm-bindgen` wrappers that translate DOM drag and mouse events into
//! controller calls and apply the returned [`EventResponse`]s to the native
//! event. No builder logic lives here; everything is delegated to
//! [`crate::dnd`] and [`crate::freeform`].
//!
//! The JavaScript side renders from `elementsJson()` / `guidesJson()` and wires
//! each rendered node's handlers to the matching methods, passing the node's
//! element id.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DataTransfer, DragEvent, MouseEvent, Node};

use crate::config::{ConfigError, EngineConfig};
use crate::dnd::{CanvasDropZone, NodeController};
use crate::event::{DragData, DropEffect, ELEMENT_ID_FORMAT, EventResponse};
use crate::freeform::{Action, FreeformEngine};
use crate::geom::{Point, PositionedElement};
use crate::store::{ElementStore, PositionedStore};
use crate::tree::{self, Element};

/// Failure crossing the JavaScript boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("drag event has no data transfer")]
    NoDataTransfer,
    #[error("data transfer rejected {format}: {detail}")]
    Transfer { format: String, detail: String },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

fn apply_response(event: &web_sys::Event, response: EventResponse) {
    if response.prevent_default {
        event.prevent_default();
    }
    if response.stop_propagation {
        event.stop_propagation();
    }
}

fn transfer_of(event: &DragEvent) -> Result<DataTransfer, HostError> {
    event.data_transfer().ok_or(HostError::NoDataTransfer)
}

/// Copy the element id out of the native transfer.
fn read_payload(transfer: &DataTransfer) -> DragData {
    let mut data = DragData::new();
    match transfer.get_data(ELEMENT_ID_FORMAT) {
        Ok(id) => data.set_element_id(&id),
        Err(err) => debug!(?err, "host: drag payload unreadable"),
    }
    data
}

/// Copy payload entries and effect hints back into the native transfer.
fn write_payload(transfer: &DataTransfer, data: &DragData) -> Result<(), HostError> {
    for (format, value) in data.entries() {
        transfer.set_data(format, value).map_err(|err| HostError::Transfer {
            format: format.to_owned(),
            detail: format!("{err:?}"),
        })?;
    }
    if data.effect_allowed() != DropEffect::None {
        transfer.set_effect_allowed(data.effect_allowed().as_str());
    }
    if data.drop_effect() != DropEffect::None {
        transfer.set_drop_effect(data.drop_effect().as_str());
    }
    Ok(())
}

/// Whether the node the pointer moved to lies inside the node being left.
fn related_inside(event: &DragEvent) -> bool {
    let current = event.current_target();
    let related = event.related_target();
    let related_node = related.as_ref().and_then(|t| t.dyn_ref::<Node>());
    current
        .as_ref()
        .and_then(|t| t.dyn_ref::<Node>())
        .is_some_and(|node| node.contains(related_node))
}

fn pointer_of(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn controller_entry<'a>(
    controllers: &'a mut HashMap<String, NodeController>,
    tree: &[Element],
    id: &str,
) -> Option<&'a mut NodeController> {
    let element = tree::locate(tree, id)?;
    Some(
        controllers
            .entry(id.to_owned())
            .or_insert_with(|| NodeController::for_element(element)),
    )
}

// =============================================================
// Tree editor
// =============================================================

/// Drag-and-drop editing of the nested element tree.
#[wasm_bindgen]
pub struct TreeEditor {
    store: ElementStore,
    controllers: HashMap<String, NodeController>,
    canvas: CanvasDropZone,
}

#[wasm_bindgen]
impl TreeEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(elements_json: &str) -> Result<TreeEditor, JsValue> {
        let elements: Vec<Element> = serde_json::from_str(elements_json).map_err(HostError::from)?;
        Ok(Self { store: ElementStore::new(elements), controllers: HashMap::new(), canvas: CanvasDropZone::new() })
    }

    #[wasm_bindgen(js_name = elementsJson)]
    pub fn elements_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.get()).map_err(|err| HostError::from(err).into())
    }

    /// Replace the whole tree, e.g. after loading a saved page.
    #[wasm_bindgen(js_name = setElementsJson)]
    pub fn set_elements_json(&mut self, elements_json: &str) -> Result<(), JsValue> {
        let elements: Vec<Element> = serde_json::from_str(elements_json).map_err(HostError::from)?;
        self.store.replace(elements);
        self.sync_controllers();
        Ok(())
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    #[wasm_bindgen(js_name = isHighlighted)]
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.controllers.get(id).is_some_and(NodeController::highlight)
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, id: &str, event: &DragEvent) -> Result<(), JsValue> {
        let transfer = transfer_of(event)?;
        let Some(ctrl) = controller_entry(&mut self.controllers, self.store.get(), id) else {
            return Ok(());
        };
        let mut data = DragData::new();
        let response = ctrl.on_drag_start(&mut data);
        write_payload(&transfer, &data)?;
        apply_response(event, response);
        Ok(())
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, id: &str, event: &DragEvent) {
        if let Some(ctrl) = self.controllers.get_mut(id) {
            apply_response(event, ctrl.on_drag_end());
        }
    }

    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&mut self, id: &str, event: &DragEvent) -> Result<(), JsValue> {
        let transfer = transfer_of(event)?;
        let Some(ctrl) = controller_entry(&mut self.controllers, self.store.get(), id) else {
            return Ok(());
        };
        let mut data = DragData::new();
        let response = ctrl.on_drag_over(&mut data);
        write_payload(&transfer, &data)?;
        apply_response(event, response);
        Ok(())
    }

    #[wasm_bindgen(js_name = dragLeave)]
    pub fn drag_leave(&mut self, id: &str, event: &DragEvent) {
        if let Some(ctrl) = controller_entry(&mut self.controllers, self.store.get(), id) {
            let response = ctrl.on_drag_leave(related_inside(event));
            apply_response(event, response);
        }
    }

    /// Returns whether the tree changed.
    #[wasm_bindgen(js_name = dropOn)]
    pub fn drop_on(&mut self, id: &str, event: &DragEvent) -> Result<bool, JsValue> {
        let data = read_payload(&transfer_of(event)?);
        let Some(ctrl) = controller_entry(&mut self.controllers, self.store.get(), id) else {
            return Ok(false);
        };
        let handled = ctrl.on_drop(&data, &mut self.store);
        apply_response(event, handled.response);
        Ok(handled.outcome.is_move())
    }

    #[wasm_bindgen(js_name = canvasDragOver)]
    pub fn canvas_drag_over(&self, event: &DragEvent) -> Result<(), JsValue> {
        let transfer = transfer_of(event)?;
        let mut data = DragData::new();
        let response = self.canvas.on_drag_over(&mut data);
        write_payload(&transfer, &data)?;
        apply_response(event, response);
        Ok(())
    }

    /// Returns whether the tree changed.
    #[wasm_bindgen(js_name = canvasDrop)]
    pub fn canvas_drop(&mut self, event: &DragEvent) -> Result<bool, JsValue> {
        let data = read_payload(&transfer_of(event)?);
        let handled = self.canvas.on_drop(&data, &mut self.store);
        apply_response(event, handled.response);
        Ok(handled.outcome.is_move())
    }
}

impl TreeEditor {
    /// Drop controllers whose element vanished and refresh the rest.
    fn sync_controllers(&mut self) {
        let tree = self.store.get();
        self.controllers.retain(|id, ctrl| match tree::locate(tree, id) {
            Some(element) => {
                ctrl.sync(element);
                true
            }
            None => false,
        });
    }
}

// =============================================================
// Free-form canvas
// =============================================================

struct FreeformShared {
    engine: FreeformEngine,
    store: PositionedStore,
    /// Dropping the timeout cancels it.
    pending_clear: Option<Timeout>,
    on_change: Option<js_sys::Function>,
}

/// Absolute-positioned drag/resize surface with alignment guides.
#[wasm_bindgen]
pub struct FreeformCanvas {
    shared: Rc<RefCell<FreeformShared>>,
}

#[wasm_bindgen]
impl FreeformCanvas {
    /// `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, elements_json: &str) -> Result<FreeformCanvas, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(HostError::from)?;
        let elements: Vec<PositionedElement> = serde_json::from_str(elements_json).map_err(HostError::from)?;
        let shared = FreeformShared {
            engine: FreeformEngine::new(config),
            store: PositionedStore::new(elements),
            pending_clear: None,
            on_change: None,
        };
        Ok(Self { shared: Rc::new(RefCell::new(shared)) })
    }

    /// Called whenever state changes outside a direct method call (the guide clear timer).
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: js_sys::Function) {
        self.shared.borrow_mut().on_change = Some(callback);
    }

    #[wasm_bindgen(js_name = elementsJson)]
    pub fn elements_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.shared.borrow().store.get()).map_err(|err| HostError::from(err).into())
    }

    #[wasm_bindgen(js_name = guidesJson)]
    pub fn guides_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.shared.borrow().engine.guides()).map_err(|err| HostError::from(err).into())
    }

    #[wasm_bindgen(js_name = guidesFading)]
    pub fn guides_fading(&self) -> bool {
        self.shared.borrow().engine.guides_fading()
    }

    pub fn mode(&self) -> String {
        self.shared.borrow().engine.mode().label().to_owned()
    }

    /// Append an element at the default geometry and return its id.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&self) -> String {
        let mut shared = self.shared.borrow_mut();
        let FreeformShared { engine, store, .. } = &mut *shared;
        engine.add_element(store)
    }

    pub fn press(&self, id: &str) {
        let actions = {
            let mut shared = self.shared.borrow_mut();
            let FreeformShared { engine, store, pending_clear, .. } = &mut *shared;
            let actions = engine.on_press(id, store);
            if !engine.clear_pending() {
                *pending_clear = None;
            }
            actions
        };
        self.dispatch(&actions);
    }

    #[wasm_bindgen(js_name = resizePress)]
    pub fn resize_press(&self, id: &str, event: &MouseEvent) {
        let handled = {
            let mut shared = self.shared.borrow_mut();
            let FreeformShared { engine, store, .. } = &mut *shared;
            engine.on_resize_press(id, pointer_of(event), store)
        };
        apply_response(event, handled.response);
        self.dispatch(&handled.outcome);
    }

    /// Returns whether anything changed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, event: &MouseEvent) -> bool {
        let actions = {
            let mut shared = self.shared.borrow_mut();
            let FreeformShared { engine, store, .. } = &mut *shared;
            engine.on_pointer_move(pointer_of(event), store)
        };
        self.dispatch(&actions);
        !actions.is_empty()
    }

    pub fn release(&self) {
        let actions = self.shared.borrow_mut().engine.on_release();
        self.dispatch(&actions);
    }
}

impl FreeformCanvas {
    /// Start timers the engine asked for. Other actions are picked up by the
    /// host re-reading state after the call returns.
    fn dispatch(&self, actions: &[Action]) {
        for action in actions {
            if let Action::ScheduleGuideClear { token, delay_ms } = action {
                let weak = Rc::downgrade(&self.shared);
                let token = *token;
                let timer = Timeout::new(*delay_ms, move || guide_clear_elapsed(&weak, token));
                self.shared.borrow_mut().pending_clear = Some(timer);
            }
        }
    }
}

fn guide_clear_elapsed(weak: &Weak<RefCell<FreeformShared>>, token: u64) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let actions = {
        let mut shared = shared.borrow_mut();
        let actions = shared.engine.on_guide_clear_elapsed(token);
        if !shared.engine.clear_pending() {
            shared.pending_clear = None;
        }
        actions
    };
    if actions.is_empty() {
        return;
    }
    let callback = shared.borrow().on_change.clone();
    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            warn!(?err, "host: change callback failed");
        }
    }
}
