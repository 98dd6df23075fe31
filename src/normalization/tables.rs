//! Static lookup tables for the BaseLinker account this report runs against.
//! The same product or channel carries different identifiers in BaseLinker
//! and in the Woocommerce storefront; these tables reconcile them.

use super::mapping::{Mapping, ProductAlias, SourceEntry};

/// Source name whose counts are reported separately from all other channels.
pub const PROMO_SOURCE: &str = "Zamówienie promocyjne";

/// Order channels. Internal channels share the "personal" source string and
/// are told apart by their numeric source id.
pub fn source_mapping() -> Mapping {
    Mapping::Source(vec![
        SourceEntry::new("Allegro", "allegro", 0),
        SourceEntry::new("Woocommerce", "shop", 0),
        SourceEntry::new("Zamówienie promocyjne", "personal", 61095),
        SourceEntry::new("Zamówienie B2B", "personal", 61096),
    ])
}

/// Order status codes.
pub fn status_mapping() -> Mapping {
    Mapping::Status(vec![
        ("Dostarczone".to_string(), 221934),
        ("Wysłane".to_string(), 221932),
        ("Do wysłania".to_string(), 221931),
    ])
}

/// Product aliases: BaseLinker catalogue id plus Woocommerce storefront id.
pub fn product_mapping() -> Mapping {
    Mapping::Product(vec![
        ProductAlias::new("F_maly_pies", "330762872", 79),
        ProductAlias::new("F_duzy_pies", "330762892", 77),
        ProductAlias::new("F_kot", "330762910", 78),
        ProductAlias::new("maly_pies", "330762926", 82),
        ProductAlias::new("kot", "330762937", 81),
        ProductAlias::new("duzy_pies", "330762947", 80),
    ])
}
