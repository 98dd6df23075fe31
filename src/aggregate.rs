use indexmap::IndexMap;

use crate::model::Order;
use crate::normalization::mapping::ID_NOT_FOUND;

/// Total quantity per resolved product name.
pub type ProductCounts = IndexMap<String, u64>;
/// Product counts grouped by resolved order-source name.
pub type SourceCounts = IndexMap<String, ProductCounts>;

/// Sum product-line quantities grouped by (resolved source name, resolved
/// product name).
///
/// Expects the mapping passes to have run; lines or orders that were never
/// mapped fall into the [`ID_NOT_FOUND`] bucket rather than failing. A
/// missing quantity counts as 1. Input is read-only and grouping preserves
/// first-occurrence order.
pub fn aggregate_products(orders: &[Order]) -> SourceCounts {
    let mut agg = SourceCounts::new();

    for order in orders {
        let source = order.order_source_name.as_deref().unwrap_or(ID_NOT_FOUND);
        for line in &order.products {
            let product = line.product_name.as_deref().unwrap_or(ID_NOT_FOUND);
            let qty = line.quantity.unwrap_or(1);
            *agg.entry(source.to_string())
                .or_default()
                .entry(product.to_string())
                .or_insert(0) += qty;
        }
    }

    agg
}

/// Split aggregated counts into the promotional-source bucket vs everything
/// else, summing across the remaining sources.
pub fn split_by_source(agg: &SourceCounts, promo_source: &str) -> (ProductCounts, ProductCounts) {
    let mut promo = ProductCounts::new();
    let mut other = ProductCounts::new();

    for (source, products) in agg {
        let bucket = if source == promo_source {
            &mut promo
        } else {
            &mut other
        };
        for (product, qty) in products {
            *bucket.entry(product.clone()).or_insert(0) += qty;
        }
    }

    (promo, other)
}
