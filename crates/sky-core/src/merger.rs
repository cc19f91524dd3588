//! Merge engine for folding level identifiers and translations into a table
//!
//! Existing cells are never overwritten. New identifiers get a fresh record;
//! known identifiers may only have their name and key columns backfilled,
//! and only where those cells are still blank.

use crate::table::{
    Record, Table, COL_PRIMARY_NAME, COL_SECONDARY_NAME, COL_TRANSLATION_KEY,
};
use crate::translations::TranslationMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Candidate keys for an identifier, in lookup order
pub fn candidate_keys(identifier: &str) -> [String; 2] {
    let lower = identifier.to_lowercase();
    [format!("name_{lower}"), format!("title_{lower}_01")]
}

/// Pick the translation key for an identifier.
///
/// `name_<id>` is preferred; `title_<id>_01` is tried when the former is in
/// neither map.
pub fn resolve_key(
    identifier: &str,
    primary: &TranslationMap,
    secondary: &TranslationMap,
) -> Option<String> {
    candidate_keys(identifier)
        .into_iter()
        .find(|key| primary.contains_key(key) || secondary.contains_key(key))
}

/// Translated names for one identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Key the names came from; empty when nothing was found
    pub key: String,
    /// Name in the primary language
    pub primary_name: String,
    /// Name in the secondary language
    pub secondary_name: String,
}

impl Resolution {
    /// Resolve the key and look up both names.
    ///
    /// A key that yields no name in either language is dropped, so the
    /// caller never records a key without a translation behind it.
    pub fn lookup(identifier: &str, primary: &TranslationMap, secondary: &TranslationMap) -> Self {
        let Some(key) = resolve_key(identifier, primary, secondary) else {
            return Self::default();
        };

        let primary_name = primary.get(&key).unwrap_or_default().to_string();
        let secondary_name = secondary.get(&key).unwrap_or_default().to_string();
        if primary_name.is_empty() && secondary_name.is_empty() {
            return Self::default();
        }

        Self {
            key,
            primary_name,
            secondary_name,
        }
    }

    /// Whether any name was found
    pub fn is_resolved(&self) -> bool {
        !self.key.is_empty()
    }

    /// A brand new record for `identifier`; columns not set here read as empty
    fn into_record(self, id_column: &str, identifier: &str) -> Record {
        let mut record = Record::new(id_column, identifier);
        record.set(COL_PRIMARY_NAME, self.primary_name);
        record.set(COL_SECONDARY_NAME, self.secondary_name);
        record.set(COL_TRANSLATION_KEY, self.key);
        record
    }
}

/// Summary of what a merge changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Records created for new identifiers
    pub added: usize,
    /// Existing records that had at least one blank cell filled
    pub backfilled: usize,
    /// Records that were in the table before the merge
    pub preserved: usize,
    /// New identifiers for which no translation was found
    pub unresolved: Vec<String>,
}

/// Merge `identifiers` into `table` in place.
///
/// Identifiers are processed in sorted order; repeats are harmless.
pub fn merge(
    table: &mut Table,
    identifiers: &[String],
    primary: &TranslationMap,
    secondary: &TranslationMap,
) -> MergeReport {
    let mut report = MergeReport {
        preserved: table.records.len(),
        ..MergeReport::default()
    };

    let id_column = table.identifier_column().to_string();

    let sorted: BTreeSet<&str> = identifiers.iter().map(String::as_str).collect();
    for identifier in sorted {
        let resolution = Resolution::lookup(identifier, primary, secondary);

        if let Some(existing) = table.records.get_mut(identifier) {
            let mut updated = existing.backfill(COL_PRIMARY_NAME, &resolution.primary_name);
            updated |= existing.backfill(COL_SECONDARY_NAME, &resolution.secondary_name);
            updated |= existing.backfill(COL_TRANSLATION_KEY, &resolution.key);
            if updated {
                report.backfilled += 1;
                info!(%identifier, "filled blank fields of existing record");
            }
            continue;
        }

        if !resolution.is_resolved() {
            let [name_key, title_key] = candidate_keys(identifier);
            debug!(%identifier, %name_key, %title_key, "no translation found for new identifier");
            report.unresolved.push(identifier.to_string());
        }

        let record = resolution.into_record(&id_column, identifier);
        table.records.insert(identifier.to_string(), record);
        report.added += 1;
    }

    info!(
        added = report.added,
        backfilled = report.backfilled,
        preserved = report.preserved,
        "merged table data"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;
    use crate::table::{COL_IDENTIFIER, COL_NICKNAME, COL_NOTE};
    use crate::writer::render_table;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn zh() -> TranslationMap {
        [
            ("name_day", "白日"),
            ("name_dawn", "晨岛"),
            ("title_sk8_01", "滑板场"),
        ]
        .into_iter()
        .collect()
    }

    fn en() -> TranslationMap {
        [
            ("name_day", "Daylight Prairie"),
            ("name_dawn", "Isle of Dawn"),
            ("title_sk8_01", "Skate Park"),
            ("name_void", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_prefers_name_key() {
        let primary: TranslationMap = [("name_day", "a"), ("title_day_01", "b")].into_iter().collect();
        let key = resolve_key("Day", &primary, &TranslationMap::new());
        assert_eq!(key.as_deref(), Some("name_day"));
    }

    #[test]
    fn test_resolve_falls_back_to_title_key() {
        assert_eq!(resolve_key("Sk8", &zh(), &en()).as_deref(), Some("title_sk8_01"));
    }

    #[test]
    fn test_resolve_checks_both_maps() {
        let secondary: TranslationMap = [("name_maze", "Maze")].into_iter().collect();
        let key = resolve_key("Maze", &TranslationMap::new(), &secondary);
        assert_eq!(key.as_deref(), Some("name_maze"));
        assert_eq!(resolve_key("Nowhere", &zh(), &en()), None);
    }

    #[test]
    fn test_lookup_drops_key_without_names() {
        let resolution = Resolution::lookup("Void", &zh(), &en());
        assert_eq!(resolution, Resolution::default());
        assert!(!resolution.is_resolved());
    }

    #[test]
    fn test_merge_adds_new_identifiers() {
        let mut table = Table::new();
        let report = merge(&mut table, &ids(&["Day", "Sk8"]), &zh(), &en());

        assert_eq!(report.added, 2);
        assert_eq!(report.preserved, 0);

        let day = table.find_record("Day").unwrap();
        assert_eq!(day.get(COL_IDENTIFIER), "Day");
        assert_eq!(day.get(COL_PRIMARY_NAME), "白日");
        assert_eq!(day.get(COL_SECONDARY_NAME), "Daylight Prairie");
        assert_eq!(day.get(COL_TRANSLATION_KEY), "name_day");
        assert_eq!(day.get(COL_NICKNAME), "");

        let sk8 = table.find_record("Sk8").unwrap();
        assert_eq!(sk8.get(COL_TRANSLATION_KEY), "title_sk8_01");
        assert_eq!(sk8.get(COL_SECONDARY_NAME), "Skate Park");
    }

    #[test]
    fn test_merge_unresolved_identifier_has_empty_names() {
        let mut table = Table::new();
        let report = merge(&mut table, &ids(&["Nowhere"]), &zh(), &en());

        let record = table.find_record("Nowhere").unwrap();
        assert_eq!(record.get(COL_PRIMARY_NAME), "");
        assert_eq!(record.get(COL_SECONDARY_NAME), "");
        assert_eq!(record.get(COL_TRANSLATION_KEY), "");
        assert_eq!(report.unresolved, vec!["Nowhere"]);
    }

    #[test]
    fn test_merge_duplicate_identifiers_create_one_record() {
        let mut table = Table::new();
        let report = merge(&mut table, &ids(&["Day", "Day", "Day"]), &zh(), &en());

        assert_eq!(report.added, 1);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_merge_backfills_blank_cells_only() {
        let doc = "\
| 标识符 | 中文名 | 玩家社区称呼 | 英文名 | 翻译键 | 存在版本 | 隶属于 | 截图 | 注释 |
| --- | --- | --- | --- | --- | --- | --- | --- | --- |
| Day | 云野 |   |   |   |   |   |   | 第一张图 |
";
        let mut table = parse_table(doc);
        let report = merge(&mut table, &ids(&["Day"]), &zh(), &en());

        assert_eq!(report.added, 0);
        assert_eq!(report.backfilled, 1);
        assert_eq!(report.preserved, 1);

        let day = table.find_record("Day").unwrap();
        assert_eq!(day.get(COL_PRIMARY_NAME), "云野");
        assert_eq!(day.get(COL_SECONDARY_NAME), "Daylight Prairie");
        assert_eq!(day.get(COL_TRANSLATION_KEY), "name_day");
        assert_eq!(day.get(COL_NICKNAME), "");
        assert_eq!(day.get(COL_NOTE), "第一张图");
    }

    #[test]
    fn test_merge_new_record_uses_table_identifier_column() {
        let doc = "| 地图标识符 | 中文名 |\n| --- | --- |\n| Dawn | 晨岛 |\n";
        let mut table = parse_table(doc);
        merge(&mut table, &ids(&["Day"]), &zh(), &en());

        let day = table.find_record("Day").unwrap();
        assert_eq!(day.get("地图标识符"), "Day");

        let reparsed = parse_table(&render_table(&table));
        let reparsed_ids: Vec<&str> = reparsed.records.keys().map(String::as_str).collect();
        assert_eq!(reparsed_ids, vec!["Dawn", "Day"]);
        assert_eq!(reparsed.find_record("Day").unwrap().get(COL_PRIMARY_NAME), "白日");
    }

    #[test]
    fn test_merge_never_deletes_records() {
        let doc = "| 标识符 | 中文名 |\n| --- | --- |\n| Retired | 旧图 |\n";
        let mut table = parse_table(doc);
        merge(&mut table, &ids(&["Day"]), &zh(), &en());

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.find_record("Retired").unwrap().get(COL_PRIMARY_NAME), "旧图");
    }

    #[test]
    fn test_merge_full_record_untouched() {
        let doc = "\
| 标识符 | 中文名 | 玩家社区称呼 | 英文名 | 翻译键 | 存在版本 | 隶属于 | 截图 | 注释 |
| --- | --- | --- | --- | --- | --- | --- | --- | --- |
| Day | 云野 | 草原 | Prairie | custom_key | 0.1 | 云野 | day.png | note |
";
        let mut table = parse_table(doc);
        let before = table.clone();
        let report = merge(&mut table, &ids(&["Day"]), &zh(), &en());

        assert_eq!(report.backfilled, 0);
        assert_eq!(table, before);
    }
}
