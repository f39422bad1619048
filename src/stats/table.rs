use std::cmp::Ordering;

use super::models::{SortKey, StatLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub name_contains: Option<String>,
    pub position: Option<String>,
}

/// Filter then sort a roster for display. Unknown sort columns leave roster
/// order untouched; ties keep roster order.
pub fn apply_query<T: StatLine>(rows: &[T], query: &TableQuery) -> Vec<T> {
    let name_filter = query
        .name_contains
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);
    let position = query
        .position
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let mut selected: Vec<T> = rows
        .iter()
        .filter(|row| {
            name_filter
                .as_ref()
                .is_none_or(|f| row.name().to_lowercase().contains(f))
        })
        .filter(|row| position.is_none_or(|p| row.position().eq_ignore_ascii_case(p)))
        .cloned()
        .collect();

    if let Some(column) = query.sort_by.as_deref() {
        selected.sort_by(|a, b| {
            let ordering = compare_keys(a.sort_key(column), b.sort_key(column));
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    selected
}

fn compare_keys(a: Option<SortKey>, b: Option<SortKey>) -> Ordering {
    match (a, b) {
        (Some(SortKey::Number(x)), Some(SortKey::Number(y))) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(SortKey::Text(x)), Some(SortKey::Text(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        (Some(SortKey::Number(_)), Some(SortKey::Text(_))) => Ordering::Less,
        (Some(SortKey::Text(_)), Some(SortKey::Number(_))) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_csv;
    use crate::stats::models::BattingStats;
    use crate::stats::normalize::normalize_batting;

    fn roster() -> Vec<BattingStats> {
        parse_csv(
            "POS,Name,AVG,HR\nSS,Smith,.310,4\nC,Jones,.250,9\nSS,Brown,.310,1\nCF,Smithers,.290,4\n",
        )
        .rows
        .iter()
        .map(normalize_batting)
        .collect()
    }

    fn names(rows: &[BattingStats]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn sorts_numeric_rate_columns_descending_by_default() {
        let query = TableQuery {
            sort_by: Some("AVG".to_string()),
            ..TableQuery::default()
        };

        let sorted = apply_query(&roster(), &query);
        assert_eq!(names(&sorted), vec!["Smith", "Brown", "Smithers", "Jones"]);
    }

    #[test]
    fn sorts_text_columns_ascending() {
        let query = TableQuery {
            sort_by: Some("Name".to_string()),
            order: SortOrder::Asc,
            ..TableQuery::default()
        };

        let sorted = apply_query(&roster(), &query);
        assert_eq!(names(&sorted), vec!["Brown", "Jones", "Smith", "Smithers"]);
    }

    #[test]
    fn filters_by_name_and_position() {
        let query = TableQuery {
            name_contains: Some("smith".to_string()),
            position: Some("ss".to_string()),
            ..TableQuery::default()
        };

        let filtered = apply_query(&roster(), &query);
        assert_eq!(names(&filtered), vec!["Smith"]);
    }

    #[test]
    fn unknown_column_keeps_roster_order() {
        let query = TableQuery {
            sort_by: Some("Nope".to_string()),
            ..TableQuery::default()
        };

        let sorted = apply_query(&roster(), &query);
        assert_eq!(names(&sorted), vec!["Smith", "Jones", "Brown", "Smithers"]);
    }
}
