//! FILENAME: core/engine/src/schema.rs
//! PURPOSE: Maps the column roles the linkage and summary code need onto
//! the header names of a concrete export.
//! CONTEXT: Two layouts ship with the crate: an English layout and the
//! Korean NTIS export layout. Both can be partially overridden from a
//! configuration file because every field has a serde default.

use serde::{Deserialize, Serialize};

/// Default output name of the group-id column.
pub const GROUP_ID_COLUMN: &str = "GroupID";

/// Number of fiscal years covered by the summary pivot.
pub const DEFAULT_WINDOW_YEARS: u32 = 5;

/// Column names for every role the processing pipeline uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    /// Unique project identifier. Duplicates are dropped.
    pub project_id: String,
    /// Sub-task identifier; rows sharing it start in the same group.
    pub sub_task_id: String,
    /// Predecessor references, a delimited list of project identifiers.
    pub prev_project_ids: String,
    /// Fiscal year of the row.
    pub fiscal_year: String,
    /// Total budget field, summed over every year of a group.
    pub total_budget: String,
    /// Row-number column carried over from the export; removed from output.
    pub legacy_row_number: String,
    /// Budget fields spread into one column per year in the summary.
    pub pivot_fields: Vec<String>,
    /// Budget sub-fields that never appear in the summary.
    pub excluded_fields: Vec<String>,
    /// Name of the generated group-id column.
    pub group_id_column: String,
    /// Summary column holding each group's latest fiscal year.
    pub latest_year_column: String,
    /// Summary column holding each group's total budget over all years.
    pub total_column: String,
    /// Length of the trailing year window.
    pub window_years: u32,
    /// Separator between predecessor identifiers.
    pub reference_separator: char,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        ColumnSchema {
            project_id: "project_id".to_string(),
            sub_task_id: "sub_task_id".to_string(),
            prev_project_ids: "prev_project_ids".to_string(),
            fiscal_year: "fiscal_year".to_string(),
            total_budget: "total_funding".to_string(),
            legacy_row_number: "NO".to_string(),
            pivot_fields: strings(&[
                "government_funding",
                "private_funding_subtotal",
                "total_funding",
            ]),
            excluded_fields: strings(&[
                "personnel_cash",
                "personnel_in_kind",
                "direct_cash",
                "direct_in_kind",
                "indirect",
                "commissioned_research",
                "agency_goods",
                "private_local_government_cash",
                "private_local_government_in_kind",
                "private_university_cash",
                "private_university_in_kind",
                "private_large_enterprise_cash",
                "private_large_enterprise_in_kind",
                "private_midsize_enterprise_cash",
                "private_midsize_enterprise_in_kind",
                "private_sme_cash",
                "private_sme_in_kind",
                "private_hospital_cash",
                "private_hospital_in_kind",
                "private_other_cash",
                "private_other_in_kind",
            ]),
            group_id_column: GROUP_ID_COLUMN.to_string(),
            latest_year_column: "latest_fiscal_year".to_string(),
            total_column: "total_budget".to_string(),
            window_years: DEFAULT_WINDOW_YEARS,
            reference_separator: ';',
        }
    }
}

impl ColumnSchema {
    /// Layout of the NTIS project export (Korean headers).
    pub fn ntis() -> Self {
        ColumnSchema {
            project_id: "과제고유번호".to_string(),
            sub_task_id: "(기관)세부과제번호".to_string(),
            prev_project_ids: "이전과제고유번호".to_string(),
            fiscal_year: "기준년도".to_string(),
            total_budget: "연구비합계".to_string(),
            legacy_row_number: "NO".to_string(),
            pivot_fields: strings(&["정부투자연구비", "민간연구비_소계", "연구비합계"]),
            excluded_fields: strings(&[
                "인건비_현금",
                "인건비_현물",
                "직접비_현금",
                "직접비_현물",
                "간접비",
                "위탁연구비",
                "청관련물건비",
                "민간연구비_지방정부현금",
                "민간연구비_지방정부현물",
                "민간연구비_대학현금",
                "민간연구비_대학현물",
                "민간연구비_대기업현금",
                "민간연구비_대기업현물",
                "민간연구비_중견기업현금",
                "민간연구비_중견기업현물",
                "민간연구비_중소기업현금",
                "민간연구비_중소기업현물",
                "민간연구비_병원현금",
                "민간연구비_병원현물",
                "민간연구비_기타현금",
                "민간연구비_기타현물",
            ]),
            group_id_column: GROUP_ID_COLUMN.to_string(),
            latest_year_column: "최신_기준년도".to_string(),
            total_column: "총_연구비합계".to_string(),
            window_years: DEFAULT_WINDOW_YEARS,
            reference_separator: ';',
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_budget_is_a_pivot_field() {
        for schema in [ColumnSchema::default(), ColumnSchema::ntis()] {
            assert_eq!(schema.pivot_fields.len(), 3);
            assert!(schema.pivot_fields.contains(&schema.total_budget));
            assert_eq!(schema.excluded_fields.len(), 21);
        }
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let schema: ColumnSchema =
            serde_json::from_str(r#"{ "fiscal_year": "year", "window_years": 3 }"#).unwrap();
        assert_eq!(schema.fiscal_year, "year");
        assert_eq!(schema.window_years, 3);
        assert_eq!(schema.project_id, "project_id");
        assert_eq!(schema.reference_separator, ';');
    }
}
