//! Sort toggling and in-memory ordering.

use std::cmp::Ordering;

use serde_json::Value;

use crate::column::{ColumnDef, Row, value_text};
use crate::state::{Direction, OrderEntry};

/// Result of clicking a sortable header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub order: Vec<OrderEntry>,
    /// Whether paging should jump back to the first page.
    pub reset_start: bool,
}

/// Compute the next order after a click on `column`.
///
/// Single-sort: a primary ascending column flips to descending; anything
/// else becomes the sole ascending key and paging resets.
///
/// Multi-sort: each column cycles independently through
/// unsorted → ascending → descending → unsorted.
pub fn toggle_order(order: &[OrderEntry], column: usize, multi: bool) -> Toggle {
    if !multi {
        return match order.first() {
            Some(primary) if primary.column == column && primary.direction == Direction::Asc => {
                Toggle {
                    order: vec![OrderEntry::desc(column)],
                    reset_start: false,
                }
            }
            _ => Toggle {
                order: vec![OrderEntry::asc(column)],
                reset_start: true,
            },
        };
    }

    let mut next = order.to_vec();
    match next.iter().position(|entry| entry.column == column) {
        None => next.push(OrderEntry::asc(column)),
        Some(i) if next[i].direction == Direction::Asc => next[i].direction = Direction::Desc,
        Some(i) => {
            next.remove(i);
        }
    }
    Toggle {
        order: next,
        reset_start: false,
    }
}

/// Stable sort of `rows` by each entry of `order` in turn.
pub fn sort_rows(rows: &mut [&Row], columns: &[ColumnDef], order: &[OrderEntry]) {
    let keys: Vec<(&ColumnDef, usize, Direction)> = order
        .iter()
        .filter_map(|entry| {
            columns
                .get(entry.column)
                .map(|col| (col, entry.column, entry.direction))
        })
        .collect();
    if keys.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        keys.iter()
            .map(|(col, index, direction)| {
                let ord = compare_values(col.resolve(a, *index), col.resolve(b, *index));
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

/// Ordering of two cell values.
///
/// Missing and `null` sort first; numbers compare numerically, booleans
/// `false < true`; everything else by case-insensitive text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => value_text(x)
            .to_lowercase()
            .cmp(&value_text(y).to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_sort_two_state_cycle() {
        let first = toggle_order(&[], 1, false);
        assert_eq!(first.order, vec![OrderEntry::asc(1)]);
        assert!(first.reset_start);

        let second = toggle_order(&first.order, 1, false);
        assert_eq!(second.order, vec![OrderEntry::desc(1)]);

        let third = toggle_order(&second.order, 1, false);
        assert_eq!(third.order, vec![OrderEntry::asc(1)]);
    }

    #[test]
    fn test_single_sort_replaces_multi_sort() {
        let order = [OrderEntry::asc(0), OrderEntry::desc(2)];
        let toggle = toggle_order(&order, 2, false);
        assert_eq!(toggle.order, vec![OrderEntry::asc(2)]);
        assert!(toggle.reset_start);
    }

    #[test]
    fn test_multi_sort_three_state_cycle() {
        let base = vec![OrderEntry::asc(0)];
        let added = toggle_order(&base, 3, true);
        assert_eq!(added.order, vec![OrderEntry::asc(0), OrderEntry::asc(3)]);

        let flipped = toggle_order(&added.order, 3, true);
        assert_eq!(flipped.order, vec![OrderEntry::asc(0), OrderEntry::desc(3)]);

        let removed = toggle_order(&flipped.order, 3, true);
        assert_eq!(removed.order, vec![OrderEntry::asc(0)]);
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(
            compare_values(Some(&json!(9)), Some(&json!(10))),
            Ordering::Less
        );
        assert_eq!(
            compare_values(Some(&json!("apple")), Some(&json!("Banana"))),
            Ordering::Less
        );
        assert_eq!(compare_values(None, Some(&json!(""))), Ordering::Less);
        assert_eq!(
            compare_values(Some(&Value::Null), None),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sort_rows_is_stable_and_multi_key() {
        let rows = [
            json!(["b", 2]),
            json!(["a", 2]),
            json!(["c", 1]),
            json!(["a", 1]),
        ];
        let columns = vec![ColumnDef::new("letter"), ColumnDef::new("number")];
        let mut refs: Vec<&Row> = rows.iter().collect();

        sort_rows(
            &mut refs,
            &columns,
            &[OrderEntry::desc(1), OrderEntry::asc(0)],
        );
        assert_eq!(
            refs,
            vec![&rows[1], &rows[0], &rows[3], &rows[2]]
        );
    }
}
