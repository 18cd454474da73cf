//! WASM entry point: `WebViewport` wires a [`ViewportComponent`] to the
//! browser.
//!
//! The host passes a container element and an object of callbacks:
//!
//! ```javascript
//! const viewport = new WebViewport(container, {
//!   loadCells: (request) => fetch(...).then((r) => r.json()),
//!   loadMetadata: (id) => fetch(...).then((r) => r.json()),
//!   loadFormatterMenu: (selection) => fetch(...).then((r) => r.json()),
//!   pushHistoryToken: (token) => { location.hash = token; },
//! }, { rowHeaderWidth: 60 });
//! viewport.onHistoryToken(location.hash);
//! viewport.setWidthAndHeight(container.clientWidth, container.clientHeight);
//! ```
//!
//! Loader callbacks return promises; their results are fed back into the
//! component once the promise settles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlElement, KeyboardEvent, WheelEvent};

use super::{
    CellsFetcher, CellsRequest, FormatterMenuFetcher, HistoryTokenSink, MetadataFetcher,
    ViewportComponent, ViewportServices,
};
use crate::config::ViewportConfig;
use crate::error::{Result, SheetviewError};
use crate::history::HistoryToken;
use crate::render::WebDom;
use crate::types::{CellReference, Selection, SpreadsheetId};

type Shared = Rc<RefCell<ViewportComponent<WebDom>>>;
type WeakShared = Weak<RefCell<ViewportComponent<WebDom>>>;

fn callback(callbacks: &JsValue, name: &str) -> std::result::Result<Function, JsValue> {
    Reflect::get(callbacks, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("callbacks.{name} is not a function")))
}

fn fetch_error(value: &JsValue) -> SheetviewError {
    SheetviewError::Fetch(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Call `function`, await the promise it returns and hand the JSON-decoded
/// value to `complete`. The component may be gone by then.
fn call_async<T, F>(
    component: &WeakShared,
    function: &Function,
    argument: &JsValue,
    complete: F,
) -> Result<()>
where
    T: DeserializeOwned + 'static,
    F: FnOnce(&mut ViewportComponent<WebDom>, Result<T>) + 'static,
{
    let promise = function
        .call1(&JsValue::NULL, argument)
        .map_err(|e| fetch_error(&e))?
        .dyn_into::<Promise>()
        .map_err(|_| SheetviewError::Fetch("callback did not return a promise".to_string()))?;
    let component = Weak::clone(component);
    spawn_local(async move {
        let result = match JsFuture::from(promise).await {
            Ok(value) => js_sys::JSON::stringify(&value)
                .map_err(|e| fetch_error(&e))
                .and_then(|json| {
                    serde_json::from_str::<T>(&String::from(json)).map_err(SheetviewError::from)
                }),
            Err(e) => Err(fetch_error(&e)),
        };
        if let Some(component) = component.upgrade() {
            complete(&mut component.borrow_mut(), result);
        }
    });
    Ok(())
}

struct JsCellsFetcher {
    component: WeakShared,
    function: Function,
}

impl CellsFetcher for JsCellsFetcher {
    fn load_cells(&self, request: CellsRequest) -> Result<()> {
        let generation = request.generation;
        let argument = serde_wasm_bindgen::to_value(&request)
            .map_err(|e| SheetviewError::Fetch(e.to_string()))?;
        call_async(&self.component, &self.function, &argument, move |c, result| {
            c.on_cells_loaded(generation, result);
        })
    }
}

struct JsMetadataFetcher {
    component: WeakShared,
    function: Function,
}

impl MetadataFetcher for JsMetadataFetcher {
    fn load_metadata(&self, id: SpreadsheetId) -> Result<()> {
        let argument = JsValue::from_str(&id.to_string());
        call_async(&self.component, &self.function, &argument, |c, result| {
            c.on_metadata_loaded(result);
        })
    }
}

struct JsFormatterMenuFetcher {
    component: WeakShared,
    function: Function,
}

impl FormatterMenuFetcher for JsFormatterMenuFetcher {
    fn load_formatter_menu(&self, selection: Selection) -> Result<()> {
        let argument = JsValue::from_str(&selection.to_string());
        call_async(&self.component, &self.function, &argument, |c, result| {
            c.on_formatter_menu_loaded(result);
        })
    }
}

struct JsHistoryTokenSink {
    function: Function,
}

impl HistoryTokenSink for JsHistoryTokenSink {
    fn push_history_token(&self, token: HistoryToken) {
        let text = JsValue::from_str(&token.to_string());
        if let Err(e) = self.function.call1(&JsValue::NULL, &text) {
            log::warn!("pushHistoryToken failed: {e:?}");
        }
    }
}

#[wasm_bindgen]
pub struct WebViewport {
    component: Shared,
    #[allow(dead_code)]
    key_down: Closure<dyn FnMut(KeyboardEvent)>,
    #[allow(dead_code)]
    key_up: Closure<dyn FnMut(KeyboardEvent)>,
    #[allow(dead_code)]
    wheel: Closure<dyn FnMut(WheelEvent)>,
}

#[wasm_bindgen]
impl WebViewport {
    /// Create a viewport rendering into `container`.
    ///
    /// `config` is an optional partial [`ViewportConfig`].
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        callbacks: JsValue,
        config: JsValue,
    ) -> std::result::Result<WebViewport, JsValue> {
        console_error_panic_hook::set_once();
        if crate::logging::init(log::LevelFilter::Info).is_err() {
            log::debug!("logger already installed");
        }

        let config: ViewportConfig = if config.is_undefined() || config.is_null() {
            ViewportConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let load_cells = callback(&callbacks, "loadCells")?;
        let load_metadata = callback(&callbacks, "loadMetadata")?;
        let load_formatter_menu = callback(&callbacks, "loadFormatterMenu")?;
        let push_history_token = callback(&callbacks, "pushHistoryToken")?;
        let dom = WebDom::new(container.clone())?;

        let component: Shared = Rc::new_cyclic(|weak: &WeakShared| {
            let services = ViewportServices {
                cells: Box::new(JsCellsFetcher {
                    component: Weak::clone(weak),
                    function: load_cells,
                }),
                metadata: Box::new(JsMetadataFetcher {
                    component: Weak::clone(weak),
                    function: load_metadata,
                }),
                formatter_menu: Box::new(JsFormatterMenuFetcher {
                    component: Weak::clone(weak),
                    function: load_formatter_menu,
                }),
                history: Box::new(JsHistoryTokenSink {
                    function: push_history_token,
                }),
            };
            RefCell::new(ViewportComponent::new(dom, services, config))
        });

        let key_down = {
            let weak = Rc::downgrade(&component);
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if let Some(component) = weak.upgrade() {
                    if component
                        .borrow_mut()
                        .on_key_down(&event.key(), event.shift_key())
                    {
                        event.prevent_default();
                    }
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };
        container.add_event_listener_with_callback("keydown", key_down.as_ref().unchecked_ref())?;

        let key_up = {
            let weak = Rc::downgrade(&component);
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if let Some(component) = weak.upgrade() {
                    component
                        .borrow_mut()
                        .on_key_up(&event.key(), event.shift_key());
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };
        container.add_event_listener_with_callback("keyup", key_up.as_ref().unchecked_ref())?;

        let wheel = {
            let weak = Rc::downgrade(&component);
            Closure::wrap(Box::new(move |event: WheelEvent| {
                if let Some(component) = weak.upgrade() {
                    if component
                        .borrow_mut()
                        .on_wheel(event.delta_x(), event.delta_y())
                    {
                        event.prevent_default();
                    }
                }
            }) as Box<dyn FnMut(WheelEvent)>)
        };
        container.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())?;

        Ok(WebViewport {
            component,
            key_down,
            key_up,
            wheel,
        })
    }

    #[wasm_bindgen(js_name = "setWidthAndHeight")]
    pub fn set_width_and_height(&self, width: f64, height: f64) {
        self.component
            .borrow_mut()
            .set_width_and_height(width, height);
    }

    /// Feed a history token (e.g. `location.hash`) into the viewport.
    /// Tokens pushed by the viewport itself are already applied.
    #[wasm_bindgen(js_name = "onHistoryToken")]
    pub fn on_history_token(&self, token: &str) -> std::result::Result<(), JsValue> {
        let token: HistoryToken = token.parse()?;
        match self.component.try_borrow_mut() {
            Ok(mut component) => component.on_history_token(token),
            Err(_) => log::debug!("history token {token} arrived while busy"),
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = "loadViewportCells")]
    pub fn load_viewport_cells(&self) {
        self.component.borrow_mut().load_viewport_cells();
    }

    #[wasm_bindgen(js_name = "onCellClick")]
    pub fn on_cell_click(&self, cell: &str, shift: bool) -> std::result::Result<(), JsValue> {
        let cell: CellReference = cell.parse()?;
        self.component.borrow_mut().on_cell_click(cell, shift);
        Ok(())
    }

    #[wasm_bindgen(js_name = "onContextMenu")]
    pub fn on_context_menu(&self) {
        self.component.borrow_mut().on_context_menu();
    }

    #[wasm_bindgen(js_name = "historyToken")]
    pub fn history_token(&self) -> String {
        self.component.borrow().history_token().to_string()
    }

    #[wasm_bindgen(js_name = "selectionSummary")]
    pub fn selection_summary(&self) -> std::result::Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(
            self.component.borrow().selection_summary(),
        )?)
    }
}
