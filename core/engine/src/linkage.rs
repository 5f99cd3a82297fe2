//! FILENAME: core/engine/src/linkage.rs
//! PURPOSE: Groups project records into lineages (the detailed view).
//! CONTEXT: A project continues across fiscal years and phases under new
//! identifiers. Two signals tie records together: a shared sub-task id, and
//! the predecessor-reference column listing earlier project ids. This module
//! turns both into one integer group id per record.
//!
//! PIPELINE:
//! 1. Deduplicate on the project id (first occurrence wins).
//! 2. Seed one provisional group per distinct sub-task id.
//! 3. Union provisional groups along predecessor references.
//! 4. Relabel groups densely in first-seen order; rows without a sub-task id
//!    get fresh singleton groups after that.
//! 5. Drop the legacy row-number column, put the group id first, and sort
//!    by (group id, fiscal year).

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::cell::CellValue;
use crate::disjoint_set::DisjointSet;
use crate::error::EngineResult;
use crate::schema::ColumnSchema;
use crate::table::Table;

/// Counts describing one linkage run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkageReport {
    /// Rows in the input table.
    pub input_rows: usize,
    /// Rows dropped because their project id had been seen before.
    pub duplicates_removed: usize,
    /// Rows in the detailed view.
    pub output_rows: usize,
    /// Distinct group ids in the detailed view.
    pub group_count: usize,
    /// Rows without a sub-task id that were given their own group.
    pub unassigned_rows: usize,
}

/// The deduplicated, grouped and sorted record set.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedView {
    /// Output table. Column 0 is the group-id column.
    pub table: Table,
    /// Group id of each output row, parallel to `table.rows`.
    pub group_ids: Vec<u32>,
    pub report: LinkageReport,
}

/// Group ids for a deduplicated table, parallel to its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAssignment {
    pub group_ids: Vec<u32>,
    pub group_count: usize,
    pub unassigned_rows: usize,
}

/// Row indices that survive deduplication on `id_col`, in input order.
///
/// Rows with an empty id share a single "missing" key, so only the first of
/// them is kept.
pub fn deduplicate(table: &Table, id_col: usize) -> Vec<usize> {
    let mut seen: HashSet<Option<String>> = HashSet::with_capacity(table.len());
    table
        .column_values(id_col)
        .enumerate()
        .filter(|(_, value)| seen.insert(value.as_key()))
        .map(|(row, _)| row)
        .collect()
}

/// Copy of `table` with duplicate project ids removed.
pub fn deduplicate_table(table: &Table, schema: &ColumnSchema) -> EngineResult<Table> {
    let id_col = table.require_column(&schema.project_id, "project id")?;
    Ok(table.select_rows(&deduplicate(table, id_col)))
}

/// Splits a predecessor-reference cell into identifier keys.
fn reference_tokens(value: &CellValue, separator: char) -> Vec<String> {
    match value {
        CellValue::Text(s) => s
            .split(separator)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        other => other.as_key().into_iter().collect(),
    }
}

/// Computes group ids for a table whose project ids are already unique.
pub fn assign_groups(table: &Table, schema: &ColumnSchema) -> EngineResult<GroupAssignment> {
    let id_col = table.require_column(&schema.project_id, "project id")?;
    let sub_col = table.require_column(&schema.sub_task_id, "sub-task id")?;
    let prev_col = table.column_index(&schema.prev_project_ids);

    let row_of_id: HashMap<String, usize> = table
        .column_values(id_col)
        .enumerate()
        .filter_map(|(row, value)| value.as_key().map(|key| (key, row)))
        .collect();

    // One set per distinct sub-task id, in first-seen order
    let mut sets = DisjointSet::new(0);
    let mut set_of_sub_task: HashMap<String, usize> = HashMap::new();
    let row_set: Vec<Option<usize>> = table
        .column_values(sub_col)
        .map(|value| {
            value
                .as_key()
                .map(|key| *set_of_sub_task.entry(key).or_insert_with(|| sets.make_set()))
        })
        .collect();

    if let Some(prev_col) = prev_col {
        let mut merges = 0usize;
        for (row, refs) in table.column_values(prev_col).enumerate() {
            // Rows without a group never pull others into theirs
            let Some(own) = row_set[row] else { continue };
            for token in reference_tokens(refs, schema.reference_separator) {
                let Some(&prev_row) = row_of_id.get(&token) else {
                    continue;
                };
                let Some(prev) = row_set[prev_row] else { continue };
                if sets.union(own, prev) {
                    merges += 1;
                    trace!("row {} joins the group of predecessor '{}'", row, token);
                }
            }
        }
        debug!("linkage: {} group merges from predecessor references", merges);
    }

    let mut label_of_root: HashMap<usize, u32> = HashMap::new();
    let mut group_ids: Vec<Option<u32>> = row_set
        .iter()
        .map(|set| {
            set.map(|set| {
                let root = sets.find(set);
                let next = label_of_root.len() as u32;
                *label_of_root.entry(root).or_insert(next)
            })
        })
        .collect();

    let mut next = label_of_root.len() as u32;
    let mut unassigned_rows = 0;
    for group in group_ids.iter_mut().filter(|g| g.is_none()) {
        *group = Some(next);
        next += 1;
        unassigned_rows += 1;
    }

    Ok(GroupAssignment {
        group_ids: group_ids.into_iter().flatten().collect(),
        group_count: next as usize,
        unassigned_rows,
    })
}

/// Missing years sort after every real year.
fn compare_years(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Builds the detailed view: deduplicated rows with a leading group-id
/// column, sorted by (group id, fiscal year).
pub fn build_groups(table: &Table, schema: &ColumnSchema) -> EngineResult<DetailedView> {
    let id_col = table.require_column(&schema.project_id, "project id")?;
    table.require_column(&schema.sub_task_id, "sub-task id")?;
    table.require_column(&schema.fiscal_year, "fiscal year")?;

    let kept = deduplicate(table, id_col);
    let deduplicated = table.select_rows(&kept);
    debug!(
        "linkage: {} input rows, {} after deduplication",
        table.len(),
        deduplicated.len()
    );

    let assignment = assign_groups(&deduplicated, schema)?;

    let year_col = deduplicated.require_column(&schema.fiscal_year, "fiscal year")?;
    let years: Vec<Option<i32>> = deduplicated
        .column_values(year_col)
        .map(CellValue::as_year)
        .collect();

    let mut order: Vec<usize> = (0..deduplicated.len()).collect();
    order.sort_by(|&a, &b| {
        assignment.group_ids[a]
            .cmp(&assignment.group_ids[b])
            .then_with(|| compare_years(years[a], years[b]))
    });

    let mut output = deduplicated.select_rows(&order);
    let group_ids: Vec<u32> = order.iter().map(|&row| assignment.group_ids[row]).collect();

    output.drop_column(&schema.legacy_row_number);
    output.drop_column(&schema.group_id_column);
    output.insert_front_column(
        &schema.group_id_column,
        group_ids.iter().map(|&g| CellValue::Number(g as f64)),
    );

    let report = LinkageReport {
        input_rows: table.len(),
        duplicates_removed: table.len() - deduplicated.len(),
        output_rows: output.len(),
        group_count: assignment.group_count,
        unassigned_rows: assignment.unassigned_rows,
    };
    debug!("linkage: {:?}", report);

    Ok(DetailedView {
        table: output,
        group_ids,
        report,
    })
}
