//! Partitioning completion items for display.

use super::{CompletionGroup, CompletionItem, GroupBy};
use crate::grammar::tables::{TableDefinition, TtaaiiTables};

/// Key of the bucket that collects items no group claims.
pub const OTHER_GROUP: &str = "OTHER";

/// Partition `items` (built from `table`) according to `group_by`.
///
/// Metadata grouping sorts groups by label; table grouping keeps the
/// table's declared order. Either way `OTHER` comes last.
pub fn group_items(
    tables: &TtaaiiTables,
    table: &TableDefinition,
    items: &[CompletionItem],
    group_by: &GroupBy,
) -> Vec<CompletionGroup> {
    match group_by {
        GroupBy::Metadata(key) => group_by_metadata(tables, items, key),
        GroupBy::Table => group_by_table(tables, table, items),
    }
}

fn group_by_metadata(
    tables: &TtaaiiTables,
    items: &[CompletionItem],
    key: &str,
) -> Vec<CompletionGroup> {
    let mut groups: Vec<CompletionGroup> = Vec::new();
    let mut other: Vec<CompletionItem> = Vec::new();
    for item in items {
        let Some(value) = item.metadata_str(key).filter(|v| v != OTHER_GROUP) else {
            other.push(item.clone());
            continue;
        };
        match groups.iter_mut().find(|g| g.key == value) {
            Some(group) => group.items.push(item.clone()),
            None => {
                let label = group_label(tables, key, &value);
                groups.push(CompletionGroup {
                    key: value,
                    label,
                    items: vec![item.clone()],
                });
            }
        }
    }
    groups.sort_by(|a, b| a.label.cmp(&b.label));
    push_other(tables, &mut groups, other);
    groups
}

fn group_label(tables: &TtaaiiTables, key: &str, value: &str) -> String {
    if key == "continent"
        && let Some(label) = tables.labels.continents.get(value)
    {
        return label.clone();
    }
    value.to_string()
}

fn group_by_table(
    tables: &TtaaiiTables,
    table: &TableDefinition,
    items: &[CompletionItem],
) -> Vec<CompletionGroup> {
    let declared = table.groups.as_deref().unwrap_or_default();
    let mut claimed = vec![false; items.len()];
    let mut groups = Vec::with_capacity(declared.len() + 1);
    for group in declared {
        let mut members = Vec::new();
        for code in &group.codes {
            for (i, item) in items.iter().enumerate() {
                if !claimed[i] && &item.code == code {
                    claimed[i] = true;
                    members.push(item.clone());
                }
            }
        }
        if !members.is_empty() {
            groups.push(CompletionGroup {
                key: group.key.clone(),
                label: group.label.clone(),
                items: members,
            });
        }
    }
    let other = items
        .iter()
        .zip(&claimed)
        .filter(|(_, c)| !**c)
        .map(|(item, _)| item.clone())
        .collect();
    push_other(tables, &mut groups, other);
    groups
}

fn push_other(tables: &TtaaiiTables, groups: &mut Vec<CompletionGroup>, other: Vec<CompletionItem>) {
    if !other.is_empty() {
        groups.push(CompletionGroup {
            key: OTHER_GROUP.to_string(),
            label: tables.labels.other_group.clone(),
            items: other,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tables::{TableEntry, TableGroup};

    fn item(code: &str, continent: Option<&str>) -> CompletionItem {
        let mut e = TableEntry::new(code, code);
        if let Some(c) = continent {
            e = e.with_metadata("continent", c);
        }
        CompletionItem::from(&e)
    }

    fn table(groups: Option<Vec<TableGroup>>) -> TableDefinition {
        TableDefinition {
            id: "T".into(),
            name: "Test".into(),
            description: None,
            entries: Vec::new(),
            groups,
        }
    }

    #[test]
    fn metadata_groups_sorted_with_other_last() {
        let tables = TtaaiiTables::bundled();
        let items = [
            item("FR", Some("EU")),
            item("AG", Some("SA")),
            item("ZZ", None),
            item("AU", Some("OC")),
            item("DL", Some("EU")),
        ];
        let groups = group_items(
            tables,
            &table(None),
            &items,
            &GroupBy::Metadata("continent".into()),
        );
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["EU", "OC", "SA", "OTHER"]);
        assert_eq!(groups[0].label, "Europe");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[3].label, "Other");
        let total: usize = groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(total, items.len());
    }

    #[test]
    fn non_continent_keys_use_raw_values() {
        let tables = TtaaiiTables::bundled();
        let mut e = TableEntry::new("A", "x").with_metadata("hemisphere", "N");
        let a = CompletionItem::from(&e);
        e = TableEntry::new("S", "y").with_metadata("hemisphere", "S");
        let s = CompletionItem::from(&e);
        let groups = group_items(
            tables,
            &table(None),
            &[a, s],
            &GroupBy::Metadata("hemisphere".into()),
        );
        assert_eq!(groups[0].label, "N");
        assert_eq!(groups[1].label, "S");
    }

    #[test]
    fn table_groups_keep_declared_order() {
        let tables = TtaaiiTables::bundled();
        let t = table(Some(vec![
            TableGroup {
                key: "Z".into(),
                label: "Last letters".into(),
                codes: vec!["Y".into()],
            },
            TableGroup {
                key: "A".into(),
                label: "First letters".into(),
                codes: vec!["B".into(), "A".into()],
            },
            TableGroup {
                key: "E".into(),
                label: "Empty".into(),
                codes: vec!["Q".into()],
            },
        ]));
        let items = [item("A", None), item("B", None), item("C", None), item("Y", None)];
        let groups = group_items(tables, &t, &items, &GroupBy::Table);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Z", "A", "OTHER"]);
        let codes: Vec<_> = groups[1].items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, ["B", "A"]);
        assert_eq!(groups[2].items[0].code, "C");
    }

    #[test]
    fn table_without_groups_goes_to_other() {
        let tables = TtaaiiTables::bundled();
        let items = [item("A", None), item("B", None)];
        let groups = group_items(tables, &table(None), &items, &GroupBy::Table);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, OTHER_GROUP);
        assert_eq!(groups[0].items.len(), 2);
    }
}
