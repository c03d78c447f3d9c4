pub mod assets;
pub mod breakpoints;
pub mod catalog;
pub mod contact;
pub mod error;
pub mod loader;
pub mod product;

mod urlenc;

pub use assets::{placeholder_data_url, AssetResolver};
pub use breakpoints::{crossed, profile_for_width, variant_url, BreakpointProfile, BREAKPOINTS};
pub use catalog::{category_by_key, CategoryEntry, CATALOG, DEFAULT_CATEGORY_KEY};
pub use contact::{whatsapp_message, whatsapp_url};
pub use error::{AssetError, ConfigError, LoadError};
pub use loader::{can_begin, plan_for, LoadPhase, LoadPlan, NextStep, ProbeOutcome};
pub use product::{all_products, filter_by_category, products_for, search, CategoryFilter, Product};
