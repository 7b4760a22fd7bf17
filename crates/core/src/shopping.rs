//! Shopping list selection and aggregation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::DbId;

/// Units whose name contains this marker are not real quantities
/// (e.g. "Special: to taste") and never appear on a shopping list.
pub const SPECIAL_UNIT_MARKER: &str = "Special:";

/// A recipe id in a query string must be a positive integer without a
/// leading zero or sign.
static RECIPE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").expect("valid regex"));

/// Keep the raw values that are well-formed recipe ids, in order, without
/// duplicates. Existence is checked by the caller.
pub fn parse_recipe_ids<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<DbId> {
    let mut ids = Vec::new();
    for value in raw {
        if !RECIPE_ID_RE.is_match(value) {
            continue;
        }
        let Ok(id) = value.parse::<DbId>() else {
            continue;
        };
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// One ingredient usage of a selected recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRow {
    pub ingredient_id: DbId,
    pub ingredient_name: String,
    pub unit_id: DbId,
    pub unit_name: String,
    pub amount: f64,
}

/// An aggregated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingLine {
    pub ingredient_id: DbId,
    pub ingredient: String,
    pub unit_id: DbId,
    pub unit: String,
    pub amount: f64,
}

impl From<IngredientRow> for ShoppingLine {
    fn from(row: IngredientRow) -> Self {
        Self {
            ingredient_id: row.ingredient_id,
            ingredient: row.ingredient_name,
            unit_id: row.unit_id,
            unit: row.unit_name,
            amount: row.amount,
        }
    }
}

/// Sum amounts per (ingredient, unit) pair, skipping special units.
///
/// Lines keep the order in which each pair was first seen. The same
/// ingredient in two different units stays on two lines.
pub fn aggregate_ingredients(rows: impl IntoIterator<Item = IngredientRow>) -> Vec<ShoppingLine> {
    let mut lines: Vec<ShoppingLine> = Vec::new();

    for row in rows {
        if row.unit_name.contains(SPECIAL_UNIT_MARKER) {
            continue;
        }

        let existing = lines
            .iter_mut()
            .find(|l| l.ingredient_id == row.ingredient_id && l.unit_id == row.unit_id);

        match existing {
            Some(line) => line.amount += row.amount,
            None => lines.push(row.into()),
        }
    }

    lines
}

/// Render the list as a markdown checklist.
pub fn render_markdown(lines: &[ShoppingLine]) -> String {
    lines
        .iter()
        .map(|l| format!("- [ ] {} {} {}\n", format_amount(l.amount), l.unit, l.ingredient))
        .collect()
}

/// Format an amount without a trailing `.0` and with at most three decimals.
fn format_amount(amount: f64) -> String {
    let rounded = (amount * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ingredient: (DbId, &str), unit: (DbId, &str), amount: f64) -> IngredientRow {
        IngredientRow {
            ingredient_id: ingredient.0,
            ingredient_name: ingredient.1.to_string(),
            unit_id: unit.0,
            unit_name: unit.1.to_string(),
            amount,
        }
    }

    const FLOUR: (DbId, &str) = (1, "flour");
    const SALT: (DbId, &str) = (2, "salt");
    const GRAM: (DbId, &str) = (10, "g");
    const CUP: (DbId, &str) = (11, "cup");
    const TASTE: (DbId, &str) = (12, "Special: to taste");

    // -- parse_recipe_ids ----------------------------------------------------

    #[test]
    fn keeps_only_positive_integers() {
        let ids = parse_recipe_ids(["1", "abc", "2", "0", "-3", "07", "1.5", "", "10"]);
        assert_eq!(ids, vec![1, 2, 10]);
    }

    #[test]
    fn drops_duplicate_ids() {
        assert_eq!(parse_recipe_ids(["4", "4", "5"]), vec![4, 5]);
    }

    #[test]
    fn drops_ids_that_overflow() {
        assert!(parse_recipe_ids(["99999999999999999999999"]).is_empty());
    }

    // -- aggregate_ingredients -----------------------------------------------

    #[test]
    fn sums_same_ingredient_and_unit() {
        let lines = aggregate_ingredients([row(FLOUR, GRAM, 100.0), row(FLOUR, GRAM, 50.0)]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].ingredient, "flour");
        assert_eq!(lines[0].unit, "g");
        assert_eq!(lines[0].amount, 150.0);
    }

    #[test]
    fn first_line_receives_merges() {
        let lines = aggregate_ingredients([
            row(FLOUR, GRAM, 100.0),
            row(SALT, GRAM, 5.0),
            row(FLOUR, GRAM, 50.0),
            row(SALT, GRAM, 2.0),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].amount, 150.0);
        assert_eq!(lines[1].amount, 7.0);
    }

    #[test]
    fn different_units_stay_separate() {
        let lines = aggregate_ingredients([row(FLOUR, GRAM, 100.0), row(FLOUR, CUP, 1.0)]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn excludes_special_units() {
        let lines = aggregate_ingredients([row(SALT, TASTE, 0.0), row(FLOUR, GRAM, 100.0)]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].ingredient, "flour");
    }

    #[test]
    fn empty_selection_yields_empty_list() {
        assert!(aggregate_ingredients(Vec::new()).is_empty());
    }

    // -- render_markdown -----------------------------------------------------

    #[test]
    fn renders_markdown_checklist() {
        let lines = aggregate_ingredients([row(FLOUR, GRAM, 150.0), row(SALT, GRAM, 2.5)]);
        assert_eq!(render_markdown(&lines), "- [ ] 150 g flour\n- [ ] 2.5 g salt\n");
    }
}
