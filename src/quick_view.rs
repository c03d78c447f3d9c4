use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};
use yew::prelude::*;

use floristeria_core::Product;

use crate::app_core::{GalleryCore, GallerySnapshot};
use crate::input::{now_ms, SwipeGesture};

#[derive(Properties)]
pub(crate) struct QuickViewProps {
    pub(crate) core: Rc<GalleryCore>,
    pub(crate) snapshot: GallerySnapshot,
    pub(crate) on_contact: Rc<dyn Fn(&Product)>,
}

impl PartialEq for QuickViewProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
            && self.snapshot == other.snapshot
            && Rc::ptr_eq(&self.on_contact, &other.on_contact)
    }
}

/// Quick-view modal. Closes on the close button, `Escape`, a click on the
/// backdrop or a downward swipe; prev/next clamp at the ends of the current
/// filtered list. The document-level key listener lives only while the
/// modal is open and is dropped by the effect cleanup.
#[function_component(QuickView)]
pub(crate) fn quick_view(props: &QuickViewProps) -> Html {
    let gesture = use_mut_ref(SwipeGesture::new);
    {
        let core = props.core.clone();
        use_effect_with(props.snapshot.modal_open, move |open| {
            let mut listeners = Vec::new();
            if *open {
                if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                    listeners.push(EventListener::new(&document, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        match event.key().as_str() {
                            "Escape" => core.close_quick_view(),
                            "ArrowLeft" => core.select_prev(),
                            "ArrowRight" => core.select_next(),
                            _ => {}
                        }
                    }));
                }
            }
            move || drop(listeners)
        });
    }
    if !props.snapshot.modal_open {
        return html! {};
    }
    let Some(product) = props.snapshot.selected_product().cloned() else {
        return html! {};
    };

    let on_close = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.close_quick_view())
    };
    let on_backdrop = {
        let core = props.core.clone();
        Callback::from(move |event: MouseEvent| {
            let direct_hit = event
                .target()
                .zip(event.current_target())
                .map(|(target, current)| JsValue::from(target) == JsValue::from(current))
                .unwrap_or(false);
            if direct_hit {
                core.close_quick_view();
            }
        })
    };
    let on_prev = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.select_prev())
    };
    let on_next = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.select_next())
    };
    let on_contact = {
        let hook = props.on_contact.clone();
        let product = product.clone();
        Callback::from(move |_: MouseEvent| hook(&product))
    };
    let on_touch_start = {
        let gesture = gesture.clone();
        Callback::from(move |event: TouchEvent| {
            if let Some(touch) = event.touches().item(0) {
                gesture
                    .borrow_mut()
                    .arm(touch.client_x() as f32, touch.client_y() as f32, now_ms());
            }
        })
    };
    let on_touch_move = {
        let gesture = gesture.clone();
        Callback::from(move |event: TouchEvent| {
            if let Some(touch) = event.touches().item(0) {
                gesture
                    .borrow_mut()
                    .update(touch.client_x() as f32, touch.client_y() as f32);
            }
        })
    };
    let on_touch_end = {
        let gesture = gesture.clone();
        let core = props.core.clone();
        Callback::from(move |_: TouchEvent| {
            if gesture.borrow_mut().finish_down(now_ms()) {
                core.close_quick_view();
            }
        })
    };

    html! {
        <div class="quick-view-backdrop" onclick={on_backdrop}>
            <section
                class="quick-view"
                role="dialog"
                aria-modal="true"
                ontouchstart={on_touch_start}
                ontouchmove={on_touch_move}
                ontouchend={on_touch_end}
            >
                <button class="quick-view-close" aria-label="Cerrar" onclick={on_close}>{ "×" }</button>
                <img class="quick-view-photo" src={product.image.clone()} alt={product.name.clone()} />
                <h2 class="quick-view-name">{ product.name.clone() }</h2>
                <p class="quick-view-description">{ product.description.clone() }</p>
                if !product.price.is_empty() {
                    <p class="quick-view-price">{ product.price.clone() }</p>
                }
                <div class="quick-view-nav">
                    <button
                        class="quick-view-prev"
                        disabled={!props.snapshot.has_prev()}
                        onclick={on_prev}
                    >{ "Anterior" }</button>
                    <button
                        class="quick-view-next"
                        disabled={!props.snapshot.has_next()}
                        onclick={on_next}
                    >{ "Siguiente" }</button>
                </div>
                <button class="quick-view-contact" onclick={on_contact}>{ "Consultar por WhatsApp" }</button>
            </section>
        </div>
    }
}
