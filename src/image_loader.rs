use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Element, HtmlCanvasElement, HtmlImageElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use floristeria_core::assets::{PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
use floristeria_core::{
    can_begin, crossed, placeholder_data_url, plan_for, profile_for_width, variant_url,
    BreakpointProfile, LoadError, LoadPhase, LoadPlan, NextStep, ProbeOutcome,
};

pub(crate) const ATTR_DEFERRED_SRC: &str = "data-src";
pub(crate) const ATTR_FALLBACK_SRC: &str = "data-fallback-src";
pub(crate) const ATTR_VARIANTS: &str = "data-variants";
pub(crate) const CLASS_OBSERVED: &str = "observed";
pub(crate) const CLASS_LOADING: &str = "loading";
pub(crate) const CLASS_LOADED: &str = "loaded";
pub(crate) const CLASS_ERROR: &str = "error";
pub(crate) const EVENT_LOADED: &str = "imageLoaded";
pub(crate) const EVENT_ERROR: &str = "imageError";

const RESIZE_DEBOUNCE_MS: u32 = 250;

#[derive(Clone, Copy, Debug)]
pub(crate) struct LoaderConfig {
    /// Images start loading this far before they scroll into view.
    pub(crate) margin_px: i32,
    pub(crate) threshold: f64,
    pub(crate) timeout_ms: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            margin_px: 50,
            threshold: 0.0,
            timeout_ms: 8_000,
        }
    }
}

/// Promotes `data-src` images to live sources as they approach the
/// viewport. Per element: `observed -> loading -> loaded | error`, with one
/// fallback retry and the generated placeholder as the error terminal.
/// Classes on the element are the only state store, so the transitions
/// survive re-renders and repeat notifications are ignored.
pub(crate) struct ImageLoader {
    config: LoaderConfig,
    placeholder: String,
    webp_ok: bool,
    profile: Cell<&'static BreakpointProfile>,
    last_width: Cell<u32>,
    observer: RefCell<Option<IntersectionObserver>>,
    on_intersect: RefCell<Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>>,
    resize_listener: RefCell<Option<EventListener>>,
    resize_debounce: Rc<RefCell<Option<Timeout>>>,
}

impl ImageLoader {
    pub(crate) fn new(config: LoaderConfig) -> Rc<Self> {
        let width = viewport_width();
        let loader = Rc::new(Self {
            config,
            placeholder: placeholder_data_url(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT),
            webp_ok: detect_webp_support(),
            profile: Cell::new(profile_for_width(width)),
            last_width: Cell::new(width),
            observer: RefCell::new(None),
            on_intersect: RefCell::new(None),
            resize_listener: RefCell::new(None),
            resize_debounce: Rc::new(RefCell::new(None)),
        });
        loader.init_observer();
        loader.attach_resize();
        loader
    }

    pub(crate) fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn init_observer(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let Some(loader) = weak.upgrade() else {
                    return;
                };
                for value in entries.iter() {
                    let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let Ok(img) = entry.target().dyn_into::<HtmlImageElement>() else {
                        continue;
                    };
                    loader.promote(img);
                }
            },
        );
        let options = IntersectionObserverInit::new();
        options.set_root_margin(&format!("{}px", self.config.margin_px));
        options.set_threshold(&JsValue::from_f64(self.config.threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                *self.observer.borrow_mut() = Some(observer);
                *self.on_intersect.borrow_mut() = Some(callback);
            }
            Err(_) => {
                gloo::console::warn!("viewport observer unavailable, deferred images load eagerly");
            }
        }
    }

    fn attach_resize(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let weak = Rc::downgrade(self);
        let debounce = Rc::clone(&self.resize_debounce);
        let listener = EventListener::new(&window, "resize", move |_event| {
            let weak = weak.clone();
            let handle = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                let Some(loader) = weak.upgrade() else {
                    return;
                };
                loader.on_viewport_width(viewport_width());
            });
            // replacing the pending timeout cancels it, coalescing bursts
            *debounce.borrow_mut() = Some(handle);
        });
        *self.resize_listener.borrow_mut() = Some(listener);
    }

    /// Registers every deferred image under `root` exactly once. Safe to
    /// call after each re-render; already-observed elements are skipped.
    pub(crate) fn watch_container(self: &Rc<Self>, root: &Element) {
        let Ok(nodes) = root.query_selector_all(&format!("img[{ATTR_DEFERRED_SRC}]")) else {
            return;
        };
        for index in 0..nodes.length() {
            let Some(node) = nodes.item(index) else {
                continue;
            };
            let Ok(img) = node.dyn_into::<HtmlImageElement>() else {
                continue;
            };
            if img.class_list().contains(CLASS_OBSERVED) {
                continue;
            }
            let _ = img.class_list().add_1(CLASS_OBSERVED);
            if let Some(observer) = self.observer.borrow().as_ref() {
                observer.observe(&img);
            } else {
                // no observer support in this browser: load immediately
                self.promote(img);
            }
        }
    }

    /// Starts loading an element. Ignored unless the element is still in a
    /// pre-loading phase, so duplicate intersection entries are harmless.
    pub(crate) fn promote(self: &Rc<Self>, img: HtmlImageElement) {
        if !can_begin(phase_of(&img)) {
            return;
        }
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer.unobserve(&img);
        }
        let Some(original) = img.get_attribute(ATTR_DEFERRED_SRC) else {
            return;
        };
        let _ = img.class_list().add_1(CLASS_LOADING);
        let fallback = img.get_attribute(ATTR_FALLBACK_SRC);
        let variants = img.get_attribute(ATTR_VARIANTS).is_some();
        let plan = plan_for(
            &original,
            fallback.as_deref(),
            self.profile.get(),
            variants,
            self.webp_ok,
        );
        self.start_probe(img, plan);
    }

    /// Fetches the plan's current URL on an off-DOM probe element, racing a
    /// deadline. A single-shot latch makes exactly one of load, error or
    /// timeout settle the attempt; late arrivals find the latch set.
    fn start_probe(self: &Rc<Self>, img: HtmlImageElement, plan: LoadPlan) {
        let url = plan.current().to_string();
        let Ok(probe) = HtmlImageElement::new() else {
            self.finish_error(&img, &LoadError::Failed("probe allocation failed".to_string()));
            return;
        };
        let settled = Rc::new(Cell::new(false));
        let deadline: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let onload = Closure::once({
            let loader = Rc::clone(self);
            let img = img.clone();
            let url = url.clone();
            let settled = Rc::clone(&settled);
            let deadline = Rc::clone(&deadline);
            move || {
                if settled.replace(true) {
                    return;
                }
                deadline.borrow_mut().take();
                loader.finish_success(&img, &url);
            }
        });
        let onerror = Closure::once({
            let loader = Rc::clone(self);
            let img = img.clone();
            let url = url.clone();
            let plan = plan.clone();
            let settled = Rc::clone(&settled);
            let deadline = Rc::clone(&deadline);
            move || {
                if settled.replace(true) {
                    return;
                }
                deadline.borrow_mut().take();
                loader.resume_after_failure(img, plan, LoadError::Failed(url));
            }
        });
        probe.set_onload(Some(onload.as_ref().unchecked_ref()));
        probe.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        probe.set_src(&url);

        let timeout = Timeout::new(self.config.timeout_ms, {
            let loader = Rc::clone(self);
            let settled = Rc::clone(&settled);
            let timeout_ms = self.config.timeout_ms;
            // keeps the probe element rooted until the race settles
            let probe = probe.clone();
            move || {
                if settled.replace(true) {
                    return;
                }
                probe.set_onload(None);
                probe.set_onerror(None);
                loader.resume_after_failure(img, plan, LoadError::Timeout(timeout_ms));
            }
        });
        *deadline.borrow_mut() = Some(timeout);
        onload.forget();
        onerror.forget();
    }

    fn resume_after_failure(self: &Rc<Self>, img: HtmlImageElement, mut plan: LoadPlan, error: LoadError) {
        gloo::console::warn!(
            "image load failed",
            plan.current().to_string(),
            error.to_string()
        );
        match plan.after_probe(ProbeOutcome::Failure) {
            NextStep::RetryFallback(_) => self.start_probe(img, plan),
            _ => self.finish_error(&img, &error),
        }
    }

    fn finish_success(&self, img: &HtmlImageElement, url: &str) {
        img.set_src(url);
        let classes = img.class_list();
        let _ = classes.remove_1(CLASS_LOADING);
        let _ = classes.add_1(CLASS_LOADED);
        dispatch(img, EVENT_LOADED, url);
    }

    fn finish_error(&self, img: &HtmlImageElement, error: &LoadError) {
        img.set_src(&self.placeholder);
        img.set_alt("Imagen no disponible");
        let classes = img.class_list();
        let _ = classes.remove_1(CLASS_LOADING);
        let _ = classes.add_1(CLASS_ERROR);
        dispatch(img, EVENT_ERROR, &error.to_string());
    }

    fn on_viewport_width(self: &Rc<Self>, width: u32) {
        let previous = self.last_width.replace(width);
        if !crossed(previous, width) {
            return;
        }
        self.profile.set(profile_for_width(width));
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let selector = format!("img.{CLASS_LOADED}[{ATTR_VARIANTS}]");
        let Ok(nodes) = document.query_selector_all(&selector) else {
            return;
        };
        for index in 0..nodes.length() {
            let Some(node) = nodes.item(index) else {
                continue;
            };
            let Ok(img) = node.dyn_into::<HtmlImageElement>() else {
                continue;
            };
            self.refresh_variant(img);
        }
    }

    /// Best-effort swap to the new breakpoint's variant. A failed probe
    /// keeps whatever the element currently shows.
    fn refresh_variant(self: &Rc<Self>, img: HtmlImageElement) {
        let Some(original) = img.get_attribute(ATTR_DEFERRED_SRC) else {
            return;
        };
        let target = variant_url(&original, self.profile.get(), self.webp_ok);
        if img.get_attribute("src").as_deref() == Some(target.as_str()) {
            return;
        }
        let Ok(probe) = HtmlImageElement::new() else {
            return;
        };
        let apply = Closure::once({
            let img = img.clone();
            let target = target.clone();
            move || img.set_src(&target)
        });
        probe.set_onload(Some(apply.as_ref().unchecked_ref()));
        probe.set_src(&target);
        apply.forget();
    }
}

impl Drop for ImageLoader {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer.disconnect();
        }
        self.resize_debounce.borrow_mut().take();
        self.resize_listener.borrow_mut().take();
        self.on_intersect.borrow_mut().take();
    }
}

fn phase_of(img: &HtmlImageElement) -> LoadPhase {
    let classes = img.class_list();
    if classes.contains(CLASS_LOADED) {
        LoadPhase::Loaded
    } else if classes.contains(CLASS_ERROR) {
        LoadPhase::Failed
    } else if classes.contains(CLASS_LOADING) {
        LoadPhase::Loading
    } else if classes.contains(CLASS_OBSERVED) {
        LoadPhase::Observed
    } else {
        LoadPhase::Pending
    }
}

fn dispatch(img: &HtmlImageElement, name: &str, detail: &str) {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&JsValue::from_str(detail));
    if let Ok(event) = CustomEvent::new_with_event_init_dict(name, &init) {
        let _ = img.dispatch_event(&event);
    }
}

fn viewport_width() -> u32 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|value| value.as_f64())
        .map(|value| value.max(0.0) as u32)
        .unwrap_or(1024)
}

fn detect_webp_support() -> bool {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    let Ok(element) = document.create_element("canvas") else {
        return false;
    };
    let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
        return false;
    };
    canvas.set_width(1);
    canvas.set_height(1);
    canvas
        .to_data_url_with_type("image/webp")
        .map(|data| data.starts_with("data:image/webp"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::Document;

    // 1x1 transparent GIF; loads instantly without touching the network.
    const ONE_PX_GIF: &str =
        "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn mounted_container() -> Element {
        let container = document().create_element("div").unwrap();
        document().body().unwrap().append_child(&container).unwrap();
        container
    }

    fn deferred_img(container: &Element, src: &str) -> HtmlImageElement {
        let img: HtmlImageElement = document()
            .create_element("img")
            .unwrap()
            .dyn_into()
            .unwrap();
        img.set_attribute(ATTR_DEFERRED_SRC, src).unwrap();
        container.append_child(&img).unwrap();
        img
    }

    async fn wait_for_terminal(img: &HtmlImageElement) {
        for _ in 0..200 {
            let classes = img.class_list();
            if classes.contains(CLASS_LOADED) || classes.contains(CLASS_ERROR) {
                return;
            }
            TimeoutFuture::new(25).await;
        }
    }

    #[wasm_bindgen_test]
    fn watch_container_marks_each_image_once() {
        let container = mounted_container();
        let img = deferred_img(&container, "whatever.png");
        let loader = ImageLoader::new(LoaderConfig::default());
        loader.watch_container(&container);
        assert!(img.class_list().contains(CLASS_OBSERVED));
        loader.watch_container(&container);
        assert!(img.class_list().contains(CLASS_OBSERVED));
        assert!(!img.class_list().contains(CLASS_LOADING));
        let _ = container.remove();
    }

    #[wasm_bindgen_test]
    async fn successful_probe_lands_on_loaded_and_announces_it() {
        let container = mounted_container();
        let img = deferred_img(&container, ONE_PX_GIF);
        let announced = Rc::new(Cell::new(false));
        let _listener = EventListener::new(&container, EVENT_LOADED, {
            let announced = Rc::clone(&announced);
            move |_| announced.set(true)
        });
        let loader = ImageLoader::new(LoaderConfig::default());
        loader.watch_container(&container);
        loader.promote(img.clone());
        wait_for_terminal(&img).await;
        assert!(img.class_list().contains(CLASS_LOADED));
        assert!(!img.class_list().contains(CLASS_LOADING));
        assert!(!img.class_list().contains(CLASS_ERROR));
        assert_eq!(img.get_attribute("src").as_deref(), Some(ONE_PX_GIF));
        assert!(announced.get());
        let _ = container.remove();
    }

    #[wasm_bindgen_test]
    async fn failed_probe_without_fallback_lands_on_the_placeholder() {
        let container = mounted_container();
        let img = deferred_img(&container, "missing-asset-for-tests.png");
        let announced = Rc::new(Cell::new(false));
        let _listener = EventListener::new(&container, EVENT_ERROR, {
            let announced = Rc::clone(&announced);
            move |_| announced.set(true)
        });
        let loader = ImageLoader::new(LoaderConfig {
            timeout_ms: 3_000,
            ..LoaderConfig::default()
        });
        loader.watch_container(&container);
        loader.promote(img.clone());
        wait_for_terminal(&img).await;
        assert!(img.class_list().contains(CLASS_ERROR));
        assert!(!img.class_list().contains(CLASS_LOADED));
        assert_eq!(
            img.get_attribute("src").as_deref(),
            Some(loader.placeholder())
        );
        assert!(announced.get());
        let _ = container.remove();
    }

    #[wasm_bindgen_test]
    async fn fallback_source_is_retried_before_giving_up() {
        let container = mounted_container();
        let img = deferred_img(&container, "missing-primary-for-tests.png");
        img.set_attribute(ATTR_FALLBACK_SRC, ONE_PX_GIF).unwrap();
        let loader = ImageLoader::new(LoaderConfig {
            timeout_ms: 3_000,
            ..LoaderConfig::default()
        });
        loader.watch_container(&container);
        loader.promote(img.clone());
        wait_for_terminal(&img).await;
        assert!(img.class_list().contains(CLASS_LOADED));
        assert_eq!(img.get_attribute("src").as_deref(), Some(ONE_PX_GIF));
        let _ = container.remove();
    }

    #[wasm_bindgen_test]
    fn promotion_is_idempotent_once_terminal() {
        let container = mounted_container();
        let img = deferred_img(&container, "never-fetched.png");
        img.set_attribute("src", "already-final.png").unwrap();
        let _ = img.class_list().add_2(CLASS_OBSERVED, CLASS_LOADED);
        let loader = ImageLoader::new(LoaderConfig::default());
        loader.promote(img.clone());
        assert!(!img.class_list().contains(CLASS_LOADING));
        assert_eq!(img.get_attribute("src").as_deref(), Some("already-final.png"));
        let _ = container.remove();
    }
}
