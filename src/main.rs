use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use floristeria_core::{
    all_products, whatsapp_message, whatsapp_url, AssetResolver, CategoryFilter, Product, CATALOG,
};

mod analytics;
mod app_core;
mod boot;
mod config;
mod image_loader;
mod input;
mod product_card;
mod quick_view;

use crate::analytics::Analytics;
use crate::app_core::GalleryCore;
use crate::image_loader::{ImageLoader, LoaderConfig};
use crate::product_card::{CardActions, ProductGrid};
use crate::quick_view::QuickView;

#[derive(Properties)]
struct AppProps {
    core: Rc<GalleryCore>,
    loader: Rc<ImageLoader>,
    analytics: Rc<Analytics>,
    phone: String,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && Rc::ptr_eq(&self.loader, &other.loader)
    }
}

fn open_contact_link(phone: &str, product: &Product) {
    let url = whatsapp_url(phone, &whatsapp_message(product));
    let Some(window) = web_sys::window() else {
        return;
    };
    if window.open_with_url_and_target(&url, "_blank").is_err() {
        gloo::console::warn!("unable to open contact link", url);
    }
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let snapshot = use_state(|| props.core.snapshot());
    {
        let core = props.core.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let core_for_subscriber = core.clone();
            let subscription = core.subscribe(Rc::new(move || {
                snapshot.set(core_for_subscriber.snapshot());
            }));
            boot::ready();
            move || drop(subscription)
        });
    }
    let snapshot_value = (*snapshot).clone();

    let hooks = use_memo((), {
        let core = props.core.clone();
        let analytics = props.analytics.clone();
        let phone = props.phone.clone();
        move |_| {
            let quick_view: Rc<dyn Fn(&Product)> = {
                let core = core.clone();
                let analytics = analytics.clone();
                Rc::new(move |product: &Product| {
                    analytics.track("quick_view", &product.id);
                    core.open_quick_view(&product.id);
                })
            };
            let contact: Rc<dyn Fn(&Product)> = Rc::new(move |product: &Product| {
                analytics.track("contact", &product.id);
                open_contact_link(&phone, product);
            });
            (quick_view, contact)
        }
    });
    let actions = CardActions {
        on_quick_view: Some(hooks.0.clone()),
        on_contact: Some(hooks.1.clone()),
        on_add_to_cart: None,
    };

    let on_search = {
        let core = props.core.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            core.set_search(input.value());
        })
    };
    let all_active = matches!(snapshot_value.filter, CategoryFilter::All);
    let on_select_all = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| {
            config::save_last_category(None);
            core.set_filter(CategoryFilter::All);
        })
    };
    let category_buttons: Html = CATALOG
        .iter()
        .map(|entry| {
            let active = snapshot_value.filter.matches_key(entry.key);
            let on_click = {
                let core = props.core.clone();
                Callback::from(move |_: MouseEvent| {
                    config::save_last_category(Some(entry.key));
                    core.set_filter(CategoryFilter::Key(entry.key.to_string()));
                })
            };
            html! {
                <button
                    class={classes!("category-button", active.then_some("active"))}
                    onclick={on_click}
                >{ entry.display_name }</button>
            }
        })
        .collect();

    html! {
        <main class="shop">
            <header class="shop-header">
                <h1 class="shop-title">{ "Floristería Pétalos" }</h1>
                <input
                    class="shop-search"
                    type="search"
                    placeholder="Buscar flores, ramos, plantas..."
                    value={snapshot_value.query.clone()}
                    oninput={on_search}
                />
            </header>
            <nav class="category-nav">
                <button
                    class={classes!("category-button", all_active.then_some("active"))}
                    onclick={on_select_all}
                >{ "Todos" }</button>
                { category_buttons }
            </nav>
            <ProductGrid
                loader={props.loader.clone()}
                products={snapshot_value.filtered.clone()}
                actions={actions}
            />
            <QuickView
                core={props.core.clone()}
                snapshot={snapshot_value}
                on_contact={hooks.1.clone()}
            />
        </main>
    }
}

fn main() {
    boot::set_phase("config", "reading storefront configuration");
    let boot_config = config::load_boot_config();

    boot::set_phase("catalog", "generating product records");
    let resolver = AssetResolver::new(boot_config.asset_base.clone());
    let core = GalleryCore::new(all_products(&resolver));
    if let Some(saved) = config::load_last_category() {
        core.set_filter(CategoryFilter::Key(saved));
    }

    let loader = ImageLoader::new(LoaderConfig {
        timeout_ms: boot_config.load_timeout_ms,
        ..LoaderConfig::default()
    });
    let analytics = Rc::new(Analytics::new());

    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("app"))
    else {
        gloo::console::error!("missing #app mount point, nothing rendered");
        boot::fail(
            "no_mount",
            "missing #app element",
            "index.html must provide <div id=\"app\">",
        );
        return;
    };

    boot::set_phase("render", "mounting gallery");
    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            core,
            loader,
            analytics,
            phone: boot_config.whatsapp_phone,
        },
    )
    .render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn bootstrap_generates_the_whole_catalog() {
        let resolver = AssetResolver::new("assets");
        let core = GalleryCore::new(all_products(&resolver));
        let snapshot = core.snapshot();
        let expected: usize = CATALOG.iter().map(|entry| entry.filenames.len()).sum();
        assert_eq!(snapshot.filtered.len(), expected);
        assert!(matches!(snapshot.filter, CategoryFilter::All));
    }

    #[wasm_bindgen_test]
    fn contact_urls_are_stable_for_generated_products() {
        let resolver = AssetResolver::new("assets");
        let products = all_products(&resolver);
        let product = &products[0];
        let url = whatsapp_url("52 1 5512345678", &whatsapp_message(product));
        assert!(url.starts_with("https://wa.me/52155"));
        assert!(url.contains("text="));
    }
}
