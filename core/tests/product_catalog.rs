use std::collections::HashSet;

use floristeria_core::{
    all_products, category_by_key, filter_by_category, products_for, search, AssetResolver,
    CategoryFilter, CATALOG,
};

fn resolver() -> AssetResolver {
    AssetResolver::new("assets")
}

#[test]
fn ramos_elegantes_products_follow_the_display_name() {
    let entry = category_by_key("ramos-elegantes").expect("catalog entry");
    assert_eq!(entry.display_name, "Ramo Premium");

    let products = products_for(entry, &resolver());
    assert_eq!(products.len(), entry.filenames.len());
    assert_eq!(products[0].name, "Ramo Premium 1");
    assert_eq!(products[1].name, "Ramo Premium 2");
    for (product, filename) in products.iter().zip(entry.filenames) {
        assert_eq!(product.category, "ramos-elegantes");
        assert!(product.image.ends_with(filename), "{} / {filename}", product.image);
        assert!(!product.image.is_empty());
    }
}

#[test]
fn ids_are_unique_across_the_whole_catalog() {
    let products = all_products(&resolver());
    let ids: HashSet<_> = products.iter().map(|product| product.id.as_str()).collect();
    assert_eq!(ids.len(), products.len());
    let expected: usize = CATALOG.iter().map(|entry| entry.filenames.len()).sum();
    assert_eq!(products.len(), expected);
}

#[test]
fn category_filter_is_a_subset_with_matching_category() {
    let products = all_products(&resolver());
    let filter = CategoryFilter::Key("plantas-interior".to_string());
    let filtered = filter_by_category(&products, &filter);
    assert!(!filtered.is_empty());
    assert!(filtered.len() < products.len());
    for product in &filtered {
        assert_eq!(product.category, "plantas-interior");
        assert!(products.contains(product));
    }
}

#[test]
fn all_filter_is_the_identity() {
    let products = all_products(&resolver());
    assert_eq!(filter_by_category(&products, &CategoryFilter::All), products);
}

#[test]
fn search_is_case_insensitive_over_name_and_category() {
    let products = all_products(&resolver());
    let by_name = search(&products, "ramo premium 3");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Ramo Premium 3");

    let by_category = search(&products, "CONDOLENCIAS");
    assert!(!by_category.is_empty());
    assert!(by_category.iter().all(|product| product.category == "condolencias"
        || product.name.to_lowercase().contains("condolencias")
        || product.description.to_lowercase().contains("condolencias")));

    assert_eq!(search(&products, "   "), products);
    assert!(search(&products, "zzz-no-match").is_empty());
}

#[test]
fn unknown_category_lookup_is_none() {
    assert!(category_by_key("girasoles-gigantes").is_none());
    assert!(category_by_key("  ramos-elegantes  ").is_some());
}
