use std::rc::Rc;

use web_sys::{Element, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use floristeria_core::{category_by_key, Product};

use crate::image_loader::ImageLoader;

/// Capabilities a card can dispatch to. The card never decides behavior;
/// callers supply whichever hooks they support and buttons render to match.
#[derive(Clone, Default)]
pub(crate) struct CardActions {
    pub(crate) on_quick_view: Option<Rc<dyn Fn(&Product)>>,
    pub(crate) on_contact: Option<Rc<dyn Fn(&Product)>>,
    pub(crate) on_add_to_cart: Option<Rc<dyn Fn(&Product)>>,
}

fn same_hook(a: &Option<Rc<dyn Fn(&Product)>>, b: &Option<Rc<dyn Fn(&Product)>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for CardActions {
    fn eq(&self, other: &Self) -> bool {
        same_hook(&self.on_quick_view, &other.on_quick_view)
            && same_hook(&self.on_contact, &other.on_contact)
            && same_hook(&self.on_add_to_cart, &other.on_add_to_cart)
    }
}

#[derive(Properties)]
pub(crate) struct ProductGridProps {
    pub(crate) loader: Rc<ImageLoader>,
    pub(crate) products: Vec<Product>,
    pub(crate) actions: CardActions,
}

impl PartialEq for ProductGridProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.loader, &other.loader)
            && self.products == other.products
            && self.actions == other.actions
    }
}

/// Renders the filtered product list into one container and hands freshly
/// inserted deferred images to the loader after every render, so lazy
/// loading composes with filter and search redraws.
#[function_component(ProductGrid)]
pub(crate) fn product_grid(props: &ProductGridProps) -> Html {
    let container_ref = use_node_ref();
    {
        let loader = props.loader.clone();
        let container_ref = container_ref.clone();
        use_effect_with(props.products.clone(), move |_| {
            if let Some(container) = container_ref.cast::<Element>() {
                loader.watch_container(&container);
            }
            || ()
        });
    }
    if props.products.is_empty() {
        return html! {
            <section class="product-grid product-grid-empty" ref={container_ref}>
                <p class="no-results">{ "Sin resultados. Prueba con otra categoría o búsqueda." }</p>
            </section>
        };
    }
    let placeholder = props.loader.placeholder().to_string();
    html! {
        <section class="product-grid" ref={container_ref}>
            { for props.products.iter().map(|product| product_card(product, &props.actions, &placeholder)) }
        </section>
    }
}

pub(crate) fn product_card(product: &Product, actions: &CardActions, placeholder: &str) -> Html {
    let variants = category_by_key(&product.category)
        .map(|entry| entry.responsive_variants)
        .unwrap_or(false);
    let on_open = actions.on_quick_view.clone().map(|hook| {
        let product = product.clone();
        Callback::from(move |_: MouseEvent| hook(&product))
    });
    let on_key = actions.on_quick_view.clone().map(|hook| {
        let product = product.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                hook(&product);
            }
        })
    });
    let on_contact = actions.on_contact.clone().map(|hook| {
        let product = product.clone();
        Callback::from(move |_: MouseEvent| hook(&product))
    });
    let on_add = actions.on_add_to_cart.clone().map(|hook| {
        let product = product.clone();
        Callback::from(move |_: MouseEvent| hook(&product))
    });
    html! {
        <article
            class="product-card"
            key={product.id.clone()}
            data-product-id={product.id.clone()}
            tabindex="0"
            onkeydown={on_key}
        >
            <div class="product-media" onclick={on_open.clone()}>
                <img
                    class="product-photo"
                    src={placeholder.to_string()}
                    data-src={product.image.clone()}
                    data-variants={variants.then(|| "1".to_string())}
                    alt={product.name.clone()}
                />
            </div>
            <h3 class="product-name">{ product.name.clone() }</h3>
            <p class="product-description">{ product.description.clone() }</p>
            if !product.price.is_empty() {
                <p class="product-price">{ product.price.clone() }</p>
            }
            <div class="product-actions">
                if let Some(on_open) = on_open {
                    <button class="card-button" onclick={on_open}>{ "Vista rápida" }</button>
                }
                if let Some(on_contact) = on_contact {
                    <button class="card-button card-button-contact" onclick={on_contact}>{ "Consultar" }</button>
                }
                if let Some(on_add) = on_add {
                    <button class="card-button" onclick={on_add}>{ "Añadir" }</button>
                }
            </div>
        </article>
    }
}
