use std::cell::RefCell;
use std::rc::Rc;

use floristeria_core::{filter_by_category, search, CategoryFilter, Product};

pub(crate) type GallerySubscriber = Rc<dyn Fn()>;

/// Central gallery state: one instance built at bootstrap and passed into
/// the components that need it. Mutations go through the methods below;
/// subscribers are notified after every change.
pub(crate) struct GalleryCore {
    state: RefCell<GalleryState>,
    subscribers: Rc<RefCell<Vec<GallerySubscriber>>>,
}

struct GalleryState {
    products: Rc<Vec<Product>>,
    filter: CategoryFilter,
    query: String,
    filtered: Vec<Product>,
    selected: Option<usize>,
    modal_open: bool,
}

#[derive(Clone, PartialEq)]
pub(crate) struct GallerySnapshot {
    pub(crate) filter: CategoryFilter,
    pub(crate) query: String,
    pub(crate) filtered: Vec<Product>,
    pub(crate) selected: Option<usize>,
    pub(crate) modal_open: bool,
}

impl GallerySnapshot {
    pub(crate) fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|index| self.filtered.get(index))
    }

    pub(crate) fn has_prev(&self) -> bool {
        matches!(self.selected, Some(index) if index > 0)
    }

    pub(crate) fn has_next(&self) -> bool {
        matches!(self.selected, Some(index) if index + 1 < self.filtered.len())
    }
}

impl GalleryCore {
    pub(crate) fn new(products: Vec<Product>) -> Rc<Self> {
        let mut state = GalleryState {
            products: Rc::new(products),
            filter: CategoryFilter::All,
            query: String::new(),
            filtered: Vec::new(),
            selected: None,
            modal_open: false,
        };
        recompute(&mut state);
        Rc::new(Self {
            state: RefCell::new(state),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn snapshot(&self) -> GallerySnapshot {
        let state = self.state.borrow();
        GallerySnapshot {
            filter: state.filter.clone(),
            query: state.query.clone(),
            filtered: state.filtered.clone(),
            selected: state.selected,
            modal_open: state.modal_open,
        }
    }

    pub(crate) fn subscribe(&self, subscriber: GallerySubscriber) -> GallerySubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        GallerySubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    pub(crate) fn set_filter(&self, filter: CategoryFilter) {
        let mut state = self.state.borrow_mut();
        if state.filter == filter {
            return;
        }
        state.filter = filter;
        state.selected = None;
        state.modal_open = false;
        recompute(&mut state);
        drop(state);
        self.notify();
    }

    pub(crate) fn set_search(&self, query: String) {
        let mut state = self.state.borrow_mut();
        if state.query == query {
            return;
        }
        state.query = query;
        state.selected = None;
        state.modal_open = false;
        recompute(&mut state);
        drop(state);
        self.notify();
    }

    /// Opens the quick view on the product with this id, located in the
    /// current filtered list. Ids that fell out of the filter are a no-op.
    pub(crate) fn open_quick_view(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.filtered.iter().position(|product| product.id == id) else {
            drop(state);
            gloo::console::warn!("quick view target not in current filter", id.to_string());
            return;
        };
        state.selected = Some(index);
        state.modal_open = true;
        drop(state);
        self.notify();
    }

    pub(crate) fn close_quick_view(&self) {
        let mut state = self.state.borrow_mut();
        if !state.modal_open {
            return;
        }
        state.modal_open = false;
        state.selected = None;
        drop(state);
        self.notify();
    }

    pub(crate) fn select_prev(&self) {
        let mut state = self.state.borrow_mut();
        match state.selected {
            Some(index) if state.modal_open && index > 0 => {
                state.selected = Some(index - 1);
            }
            _ => return,
        }
        drop(state);
        self.notify();
    }

    pub(crate) fn select_next(&self) {
        let mut state = self.state.borrow_mut();
        match state.selected {
            Some(index) if state.modal_open && index + 1 < state.filtered.len() => {
                state.selected = Some(index + 1);
            }
            _ => return,
        }
        drop(state);
        self.notify();
    }
}

fn recompute(state: &mut GalleryState) {
    state.filtered = search(
        &filter_by_category(&state.products, &state.filter),
        &state.query,
    );
}

pub(crate) struct GallerySubscription {
    subscriber: GallerySubscriber,
    subscribers: Rc<RefCell<Vec<GallerySubscriber>>>,
}

impl Drop for GallerySubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    fn sample_products(count: usize) -> Vec<Product> {
        (0..count)
            .map(|index| Product {
                id: format!("ramos-elegantes-{}", index + 1),
                name: format!("Ramo Premium {}", index + 1),
                description: "Ramo de temporada.".to_string(),
                image: format!("assets/ramos-elegantes/Ramo{}.png", index + 1),
                category: "ramos-elegantes".to_string(),
                price: String::new(),
            })
            .collect()
    }

    #[wasm_bindgen_test]
    fn middle_selection_enables_both_controls() {
        let core = GalleryCore::new(sample_products(5));
        core.open_quick_view("ramos-elegantes-3");
        let snapshot = core.snapshot();
        assert!(snapshot.modal_open);
        assert_eq!(snapshot.selected, Some(2));
        assert!(snapshot.has_prev());
        assert!(snapshot.has_next());
    }

    #[wasm_bindgen_test]
    fn edge_selections_disable_the_outward_control() {
        let core = GalleryCore::new(sample_products(5));
        core.open_quick_view("ramos-elegantes-1");
        assert!(!core.snapshot().has_prev());
        assert!(core.snapshot().has_next());

        core.open_quick_view("ramos-elegantes-5");
        assert!(core.snapshot().has_prev());
        assert!(!core.snapshot().has_next());
    }

    #[wasm_bindgen_test]
    fn navigation_clamps_at_the_ends() {
        let core = GalleryCore::new(sample_products(2));
        core.open_quick_view("ramos-elegantes-2");
        core.select_next();
        assert_eq!(core.snapshot().selected, Some(1));
        core.select_prev();
        core.select_prev();
        assert_eq!(core.snapshot().selected, Some(0));
    }

    #[wasm_bindgen_test]
    fn filter_change_closes_the_modal_and_clears_selection() {
        let core = GalleryCore::new(sample_products(3));
        core.open_quick_view("ramos-elegantes-2");
        core.set_filter(CategoryFilter::Key("plantas-interior".to_string()));
        let snapshot = core.snapshot();
        assert!(!snapshot.modal_open);
        assert_eq!(snapshot.selected, None);
        assert!(snapshot.filtered.is_empty());
    }

    #[wasm_bindgen_test]
    fn unknown_quick_view_target_is_a_no_op() {
        let core = GalleryCore::new(sample_products(2));
        core.open_quick_view("no-such-id");
        assert!(!core.snapshot().modal_open);
    }

    #[wasm_bindgen_test]
    fn subscribers_fire_on_change_and_stop_after_drop() {
        let core = GalleryCore::new(sample_products(2));
        let fired = Rc::new(Cell::new(0u32));
        let subscription = core.subscribe(Rc::new({
            let fired = Rc::clone(&fired);
            move || fired.set(fired.get() + 1)
        }));
        core.set_search("premium".to_string());
        assert_eq!(fired.get(), 1);
        drop(subscription);
        core.set_search(String::new());
        assert_eq!(fired.get(), 1);
    }
}
