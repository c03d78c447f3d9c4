use serde::{Deserialize, Serialize};

use crate::assets::{placeholder_data_url, AssetResolver, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
use crate::catalog::{CategoryEntry, CATALOG};

/// One storefront item. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Key(String),
}

impl CategoryFilter {
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            CategoryFilter::All => false,
            CategoryFilter::Key(current) => current == key,
        }
    }
}

/// Generates the products of one category from its filename list. Names are
/// numbered from 1; ids are unique within the category by construction.
pub fn products_for(entry: &CategoryEntry, resolver: &AssetResolver) -> Vec<Product> {
    entry
        .filenames
        .iter()
        .enumerate()
        .map(|(index, filename)| {
            let number = index + 1;
            let image = resolver
                .resolve(entry.key, filename)
                .unwrap_or_else(|_| placeholder_data_url(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
            Product {
                id: format!("{}-{number}", entry.key),
                name: format!("{} {number}", entry.display_name),
                description: entry.description.to_string(),
                image,
                category: entry.key.to_string(),
                price: String::new(),
            }
        })
        .collect()
}

pub fn all_products(resolver: &AssetResolver) -> Vec<Product> {
    CATALOG
        .iter()
        .flat_map(|entry| products_for(entry, resolver))
        .collect()
}

pub fn filter_by_category(products: &[Product], filter: &CategoryFilter) -> Vec<Product> {
    match filter {
        CategoryFilter::All => products.to_vec(),
        CategoryFilter::Key(key) => products
            .iter()
            .filter(|product| product.category == *key)
            .cloned()
            .collect(),
    }
}

/// Case-insensitive substring match over name, description and category.
/// An empty or whitespace query returns the input unchanged.
pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
                || product.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
