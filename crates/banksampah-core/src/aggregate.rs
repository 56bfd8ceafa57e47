//! Per waste-type aggregation of detail lines
//!
//! Lines are grouped by inventory item id into fixed-shape accumulators held
//! in a vector, with a map from id to slot. Rows come out in the order each
//! item was first seen; callers that want a ranking sort explicitly.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{DetailLine, InventoryItem, Money};
use crate::query::HeaderTotals;
use crate::reports::TypeSummary;
use crate::types::Unit;

/// Name shown for lines whose inventory item cannot be resolved
pub const UNKNOWN_TYPE_NAME: &str = "Unknown";

/// Name of the synthetic row used when money moved without itemization
pub const FALLBACK_TYPE_NAME: &str = "Semua Jenis";

/// Name and unit of an inventory item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub name: String,
    pub unit: Unit,
}

/// Inventory id to name/unit
pub type ItemLookup = HashMap<String, ItemRef>;

/// Build the lookup map from an inventory list
pub fn item_lookup(items: &[InventoryItem]) -> ItemLookup {
    items
        .iter()
        .map(|item| {
            (
                item.id.clone(),
                ItemRef {
                    name: item.waste_type_name.clone(),
                    unit: item.unit,
                },
            )
        })
        .collect()
}

struct TypeAccumulator {
    item_id: String,
    quantity: Decimal,
    value: Money,
    count: usize,
}

impl TypeAccumulator {
    fn into_summary(self, lookup: &ItemLookup) -> TypeSummary {
        let (name, unit) = match lookup.get(&self.item_id) {
            Some(item) => (item.name.clone(), item.unit),
            None => {
                log::warn!(
                    "Inventory item {} not found; reporting {} line(s) as {}",
                    self.item_id,
                    self.count,
                    UNKNOWN_TYPE_NAME
                );
                (UNKNOWN_TYPE_NAME.to_string(), Unit::Kg)
            }
        };

        TypeSummary {
            inventory_item_id: Some(self.item_id),
            waste_type_name: name,
            unit,
            total_quantity: self.quantity,
            total_value: self.value,
            transaction_count: self.count,
            average_unit_price: average_price(self.value, self.quantity),
        }
    }
}

/// `value / quantity` rounded to two decimals, or zero without quantity
pub fn average_price(value: Money, quantity: Decimal) -> Decimal {
    if quantity <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    Decimal::from(value)
        .checked_div(quantity)
        .map(|avg| avg.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

/// Group detail lines by inventory item
///
/// Lines are expected to be pre-filtered by organization, kind and date.
/// Unresolvable items are kept, named [`UNKNOWN_TYPE_NAME`] with unit KG.
pub fn aggregate_by_type<'a, I>(lines: I, lookup: &ItemLookup) -> Vec<TypeSummary>
where
    I: IntoIterator<Item = &'a DetailLine>,
{
    let mut slots: Vec<TypeAccumulator> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for line in lines {
        let slot = *index
            .entry(line.inventory_item_id.as_str())
            .or_insert_with(|| {
                slots.push(TypeAccumulator {
                    item_id: line.inventory_item_id.clone(),
                    quantity: Decimal::ZERO,
                    value: 0,
                    count: 0,
                });
                slots.len() - 1
            });

        let acc = &mut slots[slot];
        acc.quantity += line.quantity;
        acc.value += line.subtotal;
        acc.count += 1;
    }

    log::debug!("Aggregated detail lines into {} waste type(s)", slots.len());

    slots
        .into_iter()
        .map(|acc| acc.into_summary(lookup))
        .collect()
}

/// Replace an empty aggregation with a single "Semua Jenis" row when the
/// header totals show that money moved anyway.
pub fn with_fallback(rows: Vec<TypeSummary>, header: HeaderTotals) -> Vec<TypeSummary> {
    if !rows.is_empty() || header.total_value == 0 {
        return rows;
    }

    log::warn!(
        "No detail lines behind {} transaction(s) worth {}; using {} row",
        header.count,
        header.total_value,
        FALLBACK_TYPE_NAME
    );

    vec![TypeSummary {
        inventory_item_id: None,
        waste_type_name: FALLBACK_TYPE_NAME.to_string(),
        unit: Unit::Kg,
        total_quantity: Decimal::ZERO,
        total_value: header.total_value,
        transaction_count: header.count,
        average_unit_price: Decimal::ZERO,
    }]
}

/// Copy of `rows` ranked by total value, largest first; ties keep their order
pub fn sorted_by_value(rows: &[TypeSummary]) -> Vec<TypeSummary> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    sorted
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> ItemLookup {
        item_lookup(&[
            InventoryItem {
                id: "A".to_string(),
                waste_type_name: "A".to_string(),
                unit: Unit::Kg,
                price: 1000,
                stock: Decimal::ZERO,
            },
            InventoryItem {
                id: "botol".to_string(),
                waste_type_name: "Botol Plastik".to_string(),
                unit: Unit::Pcs,
                price: 200,
                stock: Decimal::ZERO,
            },
        ])
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let lines: Vec<DetailLine> = Vec::new();
        assert!(aggregate_by_type(&lines, &lookup()).is_empty());
    }

    #[test]
    fn test_groups_by_item() {
        let lines = vec![
            DetailLine::new("A", Decimal::from(2), 1000),
            DetailLine::new("A", Decimal::from(1), 1000),
        ];
        let rows = aggregate_by_type(&lines, &lookup());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].waste_type_name, "A");
        assert_eq!(rows[0].total_quantity, Decimal::from(3));
        assert_eq!(rows[0].total_value, 3000);
        assert_eq!(rows[0].transaction_count, 2);
        assert_eq!(rows[0].average_unit_price, Decimal::from(1000));
    }

    #[test]
    fn test_first_appearance_order() {
        let lines = vec![
            DetailLine::new("botol", Decimal::from(10), 200),
            DetailLine::new("A", Decimal::from(1), 1000),
            DetailLine::new("botol", Decimal::from(5), 200),
        ];
        let names: Vec<String> = aggregate_by_type(&lines, &lookup())
            .into_iter()
            .map(|r| r.waste_type_name)
            .collect();
        assert_eq!(names, vec!["Botol Plastik", "A"]);
    }

    #[test]
    fn test_unknown_item_degrades() {
        let lines = vec![
            DetailLine::new("A", Decimal::from(1), 1000),
            DetailLine::new("ghost", Decimal::new(15, 1), 400),
        ];
        let rows = aggregate_by_type(&lines, &lookup());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].waste_type_name, UNKNOWN_TYPE_NAME);
        assert_eq!(rows[1].unit, Unit::Kg);
        assert_eq!(rows[1].total_value, 600);
    }

    #[test]
    fn test_sum_conservation() {
        let lines = vec![
            DetailLine::new("A", Decimal::new(25, 1), 1000),
            DetailLine::new("botol", Decimal::from(7), 200),
            DetailLine::new("A", Decimal::new(333, 3), 1100),
            DetailLine::new("botol", Decimal::from(3), 250),
        ];
        let lookup = lookup();
        let rows = aggregate_by_type(&lines, &lookup);

        let row_total: Money = rows.iter().map(|r| r.total_value).sum();
        let line_total: Money = lines
            .iter()
            .filter(|l| lookup.contains_key(&l.inventory_item_id))
            .map(|l| l.subtotal)
            .sum();
        assert_eq!(row_total, line_total);
    }

    #[test]
    fn test_zero_quantity_average_is_zero() {
        let lines = vec![DetailLine {
            inventory_item_id: "A".to_string(),
            quantity: Decimal::ZERO,
            unit_price: 1000,
            subtotal: 0,
        }];
        let rows = aggregate_by_type(&lines, &lookup());
        assert_eq!(rows[0].average_unit_price, Decimal::ZERO);
    }

    #[test]
    fn test_average_price_rounds_to_two_decimals() {
        let lines = vec![DetailLine {
            inventory_item_id: "A".to_string(),
            quantity: Decimal::from(3),
            unit_price: 1000,
            subtotal: 3001,
        }];
        let rows = aggregate_by_type(&lines, &lookup());
        assert_eq!(rows[0].average_unit_price, Decimal::new(100033, 2));
        assert_eq!(average_price(2, Decimal::from(3)), Decimal::new(67, 2));
    }

    #[test]
    fn test_inconsistent_subtotal_is_propagated() {
        let lines = vec![DetailLine {
            inventory_item_id: "A".to_string(),
            quantity: Decimal::from(2),
            unit_price: 1000,
            subtotal: 5000,
        }];
        let rows = aggregate_by_type(&lines, &lookup());
        assert_eq!(rows[0].total_value, 5000);
        assert_eq!(rows[0].average_unit_price, Decimal::from(2500));
    }

    #[test]
    fn test_idempotent() {
        let lines = vec![
            DetailLine::new("botol", Decimal::from(10), 200),
            DetailLine::new("A", Decimal::from(1), 1000),
        ];
        let lookup = lookup();
        assert_eq!(aggregate_by_type(&lines, &lookup), aggregate_by_type(&lines, &lookup));
    }

    #[test]
    fn test_fallback_activates_without_lines() {
        let rows = with_fallback(Vec::new(), HeaderTotals { total_value: 10_000, count: 3 });

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].waste_type_name, FALLBACK_TYPE_NAME);
        assert_eq!(rows[0].unit, Unit::Kg);
        assert_eq!(rows[0].total_value, 10_000);
        assert_eq!(rows[0].transaction_count, 3);
        assert_eq!(rows[0].total_quantity, Decimal::ZERO);
        assert_eq!(rows[0].average_unit_price, Decimal::ZERO);
        assert!(rows[0].inventory_item_id.is_none());
    }

    #[test]
    fn test_fallback_skipped_when_nothing_moved_or_rows_exist() {
        assert!(with_fallback(Vec::new(), HeaderTotals::default()).is_empty());

        let lines = vec![DetailLine::new("A", Decimal::from(1), 1000)];
        let rows = aggregate_by_type(&lines, &lookup());
        let kept = with_fallback(rows.clone(), HeaderTotals { total_value: 99_000, count: 4 });
        assert_eq!(kept, rows);
    }

    #[test]
    fn test_sorted_by_value() {
        let lines = vec![
            DetailLine::new("botol", Decimal::from(2), 200),
            DetailLine::new("A", Decimal::from(3), 1000),
        ];
        let rows = aggregate_by_type(&lines, &lookup());
        let ranked = sorted_by_value(&rows);
        assert_eq!(ranked[0].waste_type_name, "A");
        assert_eq!(rows[0].waste_type_name, "Botol Plastik");
    }
}
