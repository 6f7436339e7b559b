//! Browser bindings.
//!
//! Reveal blocks are found by their `data-reveal="<key>"` attribute. Visibility comes from
//! `IntersectionObserver`, poses are written as inline `opacity` and `transform` styles on
//! every animation frame, and the backdrop runs on the canvas next to them.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, hash_map::Entry},
    rc::Rc,
};

use instant::Duration;
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::{
    content::PageContent,
    error::VisibilityError,
    flow::{self, RunConfig, RunningFlows},
    page::{RevealPresets, compose},
    reveal::{BlockKey, Bounds, Pose, RevealController, Visibility, VisibilitySource},
    scene::{SceneConfig, backdrop},
};

pub const REVEAL_ATTRIBUTE: &str = "data-reveal";

fn find(document: &Document, key: &BlockKey) -> Option<Element> {
    document
        .query_selector(&format!("[{REVEAL_ATTRIBUTE}=\"{key}\"]"))
        .ok()
        .flatten()
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Visibility source backed by one `IntersectionObserver` per distinct root margin.
pub struct DomIntersection {
    document: Document,
    supported: bool,
    intersecting: Rc<RefCell<HashMap<String, bool>>>,
    changed: Rc<Cell<bool>>,
    callback: EntriesCallback,
    observers: HashMap<String, IntersectionObserver>,
    targets: HashMap<BlockKey, (Element, IntersectionObserver)>,
}

impl DomIntersection {
    pub fn new(window: &Window, document: Document) -> Self {
        let supported = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false);
        let intersecting = Rc::new(RefCell::new(HashMap::new()));
        let changed = Rc::new(Cell::new(true));

        let callback = {
            let intersecting = intersecting.clone();
            let changed = changed.clone();
            Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
                let mut intersecting = intersecting.borrow_mut();
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if let Some(key) = entry.target().get_attribute(REVEAL_ATTRIBUTE) {
                        intersecting.insert(key, entry.is_intersecting());
                    }
                }
                changed.set(true);
            }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
        };

        Self {
            document,
            supported,
            intersecting,
            changed,
            callback,
            observers: HashMap::new(),
            targets: HashMap::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Whether any observer reported since the last call.
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }

    /// Stops every observer. Nothing is reported afterwards.
    pub fn disconnect(&mut self) {
        for observer in self.observers.values() {
            observer.disconnect();
        }
        self.observers.clear();
        self.targets.clear();
        self.intersecting.borrow_mut().clear();
    }

    fn observer(&mut self, margin_px: f32) -> Result<IntersectionObserver, VisibilityError> {
        match self.observers.entry(format!("{margin_px}px")) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let options = IntersectionObserverInit::new();
                options.set_root_margin(entry.key());
                let observer = IntersectionObserver::new_with_options(
                    self.callback.as_ref().unchecked_ref(),
                    &options,
                )
                .map_err(|_| VisibilityError::Unsupported)?;
                Ok(entry.insert(observer).clone())
            }
        }
    }
}

impl VisibilitySource for DomIntersection {
    fn observe(
        &mut self,
        key: &BlockKey,
        _bounds: Bounds,
        margin_px: f32,
    ) -> Result<(), VisibilityError> {
        if !self.supported {
            return Err(VisibilityError::Unsupported);
        }
        let element = find(&self.document, key)
            .ok_or_else(|| VisibilityError::UnknownTarget(key.to_string()))?;
        let observer = self.observer(margin_px)?;
        if let Some((old, previous)) = self.targets.remove(key) {
            previous.unobserve(&old);
        }
        observer.observe(&element);
        self.targets.insert(key.clone(), (element, observer));
        Ok(())
    }

    fn unobserve(&mut self, key: &BlockKey) {
        if let Some((element, observer)) = self.targets.remove(key) {
            observer.unobserve(&element);
        }
        self.intersecting.borrow_mut().remove(key.as_str());
    }

    fn visibility(&self, key: &BlockKey) -> Visibility {
        if !self.supported {
            return Visibility::Unsupported;
        }
        match self.intersecting.borrow().get(key.as_str()) {
            Some(true) => Visibility::Visible,
            _ => Visibility::Hidden,
        }
    }

    fn observed(&self) -> usize {
        self.targets.len()
    }
}

/// Writes poses to inline styles, skipping ones that did not change.
#[derive(Default)]
struct StyleSink {
    elements: HashMap<BlockKey, Option<HtmlElement>>,
    applied: HashMap<BlockKey, Pose>,
}

impl StyleSink {
    fn apply(&mut self, document: &Document, key: &BlockKey, pose: Pose) {
        if self.applied.get(key) == Some(&pose) {
            return;
        }
        let element = self
            .elements
            .entry(key.clone())
            .or_insert_with(|| find(document, key).and_then(|e| e.dyn_into::<HtmlElement>().ok()));
        let Some(element) = element else {
            return;
        };
        let style = element.style();
        let written = style
            .set_property("opacity", &format!("{:.3}", pose.opacity))
            .and_then(|_| style.set_property("transform", &pose.css_transform()));
        if let Err(e) = written {
            log::debug!("could not style `{key}`: {e:?}");
        }
        self.applied.insert(key.clone(), pose);
    }
}

struct Page {
    window: Window,
    document: Document,
    started_ms: f64,
    controller: RevealController<DomIntersection>,
    styles: StyleSink,
}

impl Page {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(((now_ms(&self.window) - self.started_ms) / 1000.0).max(0.0))
    }

    fn frame(&mut self) {
        let now = self.now();
        if self.controller.source().take_changed() {
            for trigger in self.controller.check(now) {
                log::debug!("`{}` starts at {:?}", trigger.key, trigger.starts_at);
            }
        }
        for (key, pose) in self.controller.poses(now) {
            self.styles.apply(&self.document, key, pose);
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

/// Returned by [`mount_page`]. Call `unmount` before removing the page.
#[wasm_bindgen]
pub struct PageHandle {
    window: Window,
    page: Rc<RefCell<Page>>,
    frame: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
    backdrop: Option<RunningFlows<()>>,
}

#[wasm_bindgen]
impl PageHandle {
    /// Cancels the frame loop, disconnects every observer and releases the backdrop.
    pub fn unmount(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::debug!("animation frame already gone: {e:?}");
            }
        }
        // Drops the closure and with it the cycle through `frame`.
        self.frame.borrow_mut().take();

        let mut page = self.page.borrow_mut();
        page.controller.clear();
        page.controller.source_mut().disconnect();
        if let Some(backdrop) = self.backdrop.take() {
            backdrop.unmount();
        }
        log::info!("page unmounted");
    }
}

/// Registers every reveal block of `content_json` and starts the backdrop on `canvas_id`.
///
/// Without `IntersectionObserver` every block is shown in its final state. Without a GPU
/// or the canvas the backdrop stays empty; the reveals work either way.
#[wasm_bindgen]
pub fn mount_page(content_json: &str, canvas_id: &str) -> Result<PageHandle, JsValue> {
    flow::init_logger();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let content =
        PageContent::from_json(content_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut controller = RevealController::new(DomIntersection::new(&window, document.clone()));
    if !controller.source().is_supported() {
        log::warn!("IntersectionObserver unavailable, revealing every block immediately");
    }
    for plan in compose(&content, &RevealPresets::default()) {
        plan.register(&mut controller);
    }
    log::info!("{} reveal blocks registered", controller.len());

    let page = Rc::new(RefCell::new(Page {
        started_ms: now_ms(&window),
        window: window.clone(),
        document,
        controller,
        styles: StyleSink::default(),
    }));

    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let frame_id = Rc::new(Cell::new(None));
    {
        let page = page.clone();
        let next = frame.clone();
        let frame_id = frame_id.clone();
        let window = window.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            page.borrow_mut().frame();
            frame_id.set(request_frame(&window, &next));
        }) as Box<dyn FnMut()>));
    }
    frame_id.set(request_frame(&window, &frame));

    let config = RunConfig {
        canvas_id: canvas_id.to_string(),
        ..Default::default()
    };
    let backdrop =
        match flow::spawn::<()>(config, vec![backdrop::constructor(SceneConfig::default())]) {
            Ok(running) => Some(running),
            Err(e) => {
                log::warn!("backdrop disabled, rendering nothing: {e}");
                None
            }
        };

    Ok(PageHandle {
        window,
        page,
        frame,
        frame_id,
        backdrop,
    })
}
