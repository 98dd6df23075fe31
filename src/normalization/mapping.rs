use crate::model::Order;

/// Resolved name used when no lookup table entry matches. Records are never
/// left without a name and lookups never fail.
pub const ID_NOT_FOUND: &str = "ID not found";

/// Entry of a source table. A zero `source_id` means "match on the
/// `order_source` string"; a nonzero one is the authoritative match key and
/// the string is ignored.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub name: String,
    pub source_key: String,
    pub source_id: i64,
}

impl SourceEntry {
    pub fn new(name: &str, source_key: &str, source_id: i64) -> Self {
        Self {
            name: name.to_string(),
            source_key: source_key.to_string(),
            source_id,
        }
    }
}

/// Entry of a product table: the same product carries a native catalogue id
/// and a storefront id, and a line matches on either.
#[derive(Debug, Clone)]
pub struct ProductAlias {
    pub name: String,
    pub catalogue_id: String,
    pub storefront_id: i64,
}

impl ProductAlias {
    pub fn new(name: &str, catalogue_id: &str, storefront_id: i64) -> Self {
        Self {
            name: name.to_string(),
            catalogue_id: catalogue_id.to_string(),
            storefront_id,
        }
    }
}

/// A lookup table tagged with the category it resolves. The tag replaces the
/// shape sniffing the legacy pipeline used to decide what a table mapped.
#[derive(Debug, Clone)]
pub enum Mapping {
    /// `(display name, status code)` pairs resolving `order_status`.
    Status(Vec<(String, i64)>),
    /// Entries resolving `order_source` / `order_source_id`.
    Source(Vec<SourceEntry>),
    /// Entries resolving each product line's `product_id`.
    Product(Vec<ProductAlias>),
}

/// Annotate orders in place with the display name the table resolves.
///
/// Mapping only ever adds the `*_name` field for its category; no other field
/// changes. Unmatched records get [`ID_NOT_FOUND`]. An empty table is a
/// passthrough. Matches are first-wins in table order.
pub fn apply_mapping(orders: &mut [Order], mapping: &Mapping) {
    match mapping {
        Mapping::Status(entries) => {
            if entries.is_empty() {
                return;
            }
            for order in orders.iter_mut() {
                let name = entries
                    .iter()
                    .find(|(_, id)| *id == order.order_status)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_else(|| ID_NOT_FOUND.to_string());
                order.order_status_name = Some(name);
            }
        }
        Mapping::Source(entries) => {
            if entries.is_empty() {
                return;
            }
            for order in orders.iter_mut() {
                order.order_source_name = Some(resolve_source(order, entries));
            }
        }
        Mapping::Product(entries) => {
            if entries.is_empty() {
                return;
            }
            for order in orders.iter_mut() {
                if !order.products.is_empty() {
                    for line in &mut order.products {
                        line.product_name = Some(resolve_product(&line.product_id, entries));
                    }
                } else if let Some(id) = order.product_id.clone() {
                    // legacy single-product shape: annotate the order itself
                    order.product_name = Some(resolve_product(&id, entries));
                }
            }
        }
    }
}

fn resolve_source(order: &Order, entries: &[SourceEntry]) -> String {
    for entry in entries {
        let matched = if entry.source_id != 0 {
            order.order_source_id == entry.source_id
        } else {
            order.order_source == entry.source_key
        };
        if matched {
            return entry.name.clone();
        }
    }
    ID_NOT_FOUND.to_string()
}

fn resolve_product(product_id: &str, entries: &[ProductAlias]) -> String {
    for entry in entries {
        if product_id == entry.catalogue_id || product_id == entry.storefront_id.to_string() {
            return entry.name.clone();
        }
    }
    ID_NOT_FOUND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::tables::{product_mapping, source_mapping, status_mapping};
    use serde_json::json;

    fn order(source: &str, source_id: i64, status: i64, product_ids: &[&str]) -> Order {
        Order {
            order_id: json!(1),
            order_source: source.to_string(),
            order_source_id: source_id,
            order_status: status,
            products: product_ids
                .iter()
                .map(|id| crate::model::ProductLine {
                    product_id: id.to_string(),
                    name: None,
                    quantity: Some(1),
                    product_name: None,
                })
                .collect(),
            product_id: None,
            order_source_name: None,
            order_status_name: None,
            product_name: None,
        }
    }

    #[test]
    fn status_mapping_sets_name_or_sentinel() {
        let mut orders = vec![
            order("shop", 0, 221932, &[]),
            order("shop", 0, 999999, &[]),
        ];
        let before = orders.clone();

        apply_mapping(&mut orders, &status_mapping());

        assert_eq!(orders[0].order_status_name.as_deref(), Some("Wysłane"));
        assert_eq!(orders[1].order_status_name.as_deref(), Some(ID_NOT_FOUND));

        // nothing but the status name changed
        for (mapped, original) in orders.iter().zip(&before) {
            let mut stripped = mapped.clone();
            stripped.order_status_name = None;
            assert_eq!(&stripped, original);
        }
    }

    #[test]
    fn nonzero_source_id_wins_over_source_string() {
        let mut orders = vec![
            order("personal", 61095, 0, &[]),
            order("something-else", 61096, 0, &[]),
            order("allegro", 0, 0, &[]),
            order("unknown", 0, 0, &[]),
        ];

        apply_mapping(&mut orders, &source_mapping());

        assert_eq!(
            orders[0].order_source_name.as_deref(),
            Some("Zamówienie promocyjne")
        );
        // the numeric id resolves regardless of the order_source string
        assert_eq!(
            orders[1].order_source_name.as_deref(),
            Some("Zamówienie B2B")
        );
        assert_eq!(orders[2].order_source_name.as_deref(), Some("Allegro"));
        assert_eq!(orders[3].order_source_name.as_deref(), Some(ID_NOT_FOUND));
    }

    #[test]
    fn product_lines_match_either_identifier() {
        let mut orders = vec![order("shop", 0, 0, &["330762872", "79", "77", "0"])];

        apply_mapping(&mut orders, &product_mapping());

        let names: Vec<_> = orders[0]
            .products
            .iter()
            .map(|p| p.product_name.as_deref().unwrap())
            .collect();
        // "330762872" and "79" are the two identifiers of the same product
        assert_eq!(
            names,
            vec!["F_maly_pies", "F_maly_pies", "F_duzy_pies", ID_NOT_FOUND]
        );
    }

    #[test]
    fn first_matching_entry_wins() {
        let table = Mapping::Product(vec![
            ProductAlias::new("first", "330762872", 79),
            ProductAlias::new("second", "330762872", 79),
        ]);
        let mut orders = vec![order("shop", 0, 0, &["79"])];

        apply_mapping(&mut orders, &table);

        assert_eq!(
            orders[0].products[0].product_name.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn legacy_order_level_product_id_is_annotated() {
        let mut o = order("allegro", 0, 0, &[]);
        o.product_id = Some("330762910".to_string());
        let mut orders = vec![o];

        apply_mapping(&mut orders, &product_mapping());

        assert_eq!(orders[0].product_name.as_deref(), Some("F_kot"));
        assert!(orders[0].products.is_empty());
    }

    #[test]
    fn empty_table_is_a_passthrough() {
        let mut orders = vec![order("allegro", 0, 221931, &["79"])];
        let before = orders.clone();

        apply_mapping(&mut orders, &Mapping::Status(Vec::new()));
        apply_mapping(&mut orders, &Mapping::Source(Vec::new()));
        apply_mapping(&mut orders, &Mapping::Product(Vec::new()));

        assert_eq!(orders, before);
    }
}
