//! Column-level diff between a deployed table and its target definition.
//!
//! Target columns are matched to deployed ones by their previous name, falling
//! back to their current name; each deployed column matches at most once. Changes come out in execution order: drops,
//! renames, modifications, additions, then comments.

use std::collections::BTreeSet;

use tracing::{trace, warn};

use crate::metadata::{ChangeReason, ColumnRef, TableRef};

/// Minimum name similarity for an unmatched drop/add pair to be reported as a
/// possible rename.
const RENAME_SIMILARITY_THRESHOLD: f64 = 0.4;

fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[allow(clippy::cast_precision_loss)]
fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// One schema change needed to migrate a table.
#[derive(Debug, Clone, Copy)]
pub enum ColumnChange<'a> {
    /// The deployed column has no target counterpart.
    Drop { column: ColumnRef<'a> },
    /// The column keeps its data but changes name.
    Rename {
        before: ColumnRef<'a>,
        after: ColumnRef<'a>,
    },
    /// The column definition changed.
    Modify {
        before: ColumnRef<'a>,
        after: ColumnRef<'a>,
        reason: ChangeReason,
    },
    /// The target column is new.
    Add { column: ColumnRef<'a> },
    /// The column comment changed; `before` is `None` for new columns.
    Comment {
        before: Option<ColumnRef<'a>>,
        after: ColumnRef<'a>,
    },
}

/// Changes the diff noticed but does not turn into statements.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffWarning {
    /// A matched column changed its primary key flag.
    PrimaryKeyChange { column: String, new_value: bool },
    /// A matched column changed its NOT NULL flag.
    NullabilityChange { column: String, not_null: bool },
    /// A dropped and an added column share a data type and a similar name.
    PossibleRename {
        old_column: String,
        new_column: String,
        similarity: f64,
    },
}

/// The changes migrating `before` into `after`.
#[derive(Debug, Clone)]
pub struct TableDiff<'a> {
    before: TableRef<'a>,
    after: TableRef<'a>,
    changes: Vec<ColumnChange<'a>>,
    table_comment_changed: bool,
    warnings: Vec<DiffWarning>,
}

impl<'a> TableDiff<'a> {
    /// Compares a deployed table with its target definition.
    #[must_use]
    pub fn between(before: TableRef<'a>, after: TableRef<'a>) -> Self {
        let mut renames = Vec::new();
        let mut modifications = Vec::new();
        let mut additions = Vec::new();
        let mut comments = Vec::new();
        let mut warnings = Vec::new();
        let targets = after.sorted_columns();
        let pairs = match_columns(before, &targets);
        let matched: BTreeSet<&str> = pairs.iter().flatten().map(ColumnRef::name).collect();

        for (target, current) in targets.into_iter().zip(pairs) {
            let Some(current) = current else {
                trace!(table = %after.name(), column = %target.name(), "Column added");
                additions.push(ColumnChange::Add { column: target });
                if target.comment().is_some() {
                    comments.push(ColumnChange::Comment {
                        before: None,
                        after: target,
                    });
                }
                continue;
            };

            if current.name() != target.name() {
                trace!(
                    table = %after.name(),
                    from = %current.name(),
                    to = %target.name(),
                    "Column renamed"
                );
                renames.push(ColumnChange::Rename {
                    before: current,
                    after: target,
                });
            }
            if let Some(reason) = current.attribute_change(&target) {
                trace!(table = %after.name(), column = %target.name(), ?reason, "Column modified");
                modifications.push(ColumnChange::Modify {
                    before: current,
                    after: target,
                    reason,
                });
            } else {
                trace!(table = %after.name(), column = %target.name(), "Column unchanged");
            }
            if current.comment() != target.comment() {
                comments.push(ColumnChange::Comment {
                    before: Some(current),
                    after: target,
                });
            }
            if current.is_primary_key() != target.is_primary_key() {
                warnings.push(DiffWarning::PrimaryKeyChange {
                    column: target.name().to_string(),
                    new_value: target.is_primary_key(),
                });
            }
            if current.is_not_null() != target.is_not_null() {
                warnings.push(DiffWarning::NullabilityChange {
                    column: target.name().to_string(),
                    not_null: target.is_not_null(),
                });
            }
        }

        let drops: Vec<ColumnChange<'a>> = before
            .sorted_columns()
            .into_iter()
            .filter(|c| !matched.contains(c.name()))
            .map(|column| ColumnChange::Drop { column })
            .collect();
        if !drops.is_empty() {
            let names: Vec<&str> = drops
                .iter()
                .filter_map(|c| match c {
                    ColumnChange::Drop { column } => Some(column.name()),
                    _ => None,
                })
                .collect();
            warn!(table = %before.name(), columns = ?names, "ALTER drops columns");
        }
        warnings.extend(possible_renames(&drops, &additions));

        let mut changes = drops;
        changes.extend(renames);
        changes.extend(modifications);
        changes.extend(additions);
        changes.extend(comments);

        Self {
            before,
            after,
            changes,
            table_comment_changed: before.metadata().comment() != after.metadata().comment(),
            warnings,
        }
    }

    #[must_use]
    pub const fn before(&self) -> TableRef<'a> {
        self.before
    }

    #[must_use]
    pub const fn after(&self) -> TableRef<'a> {
        self.after
    }

    /// Column changes in execution order.
    #[must_use]
    pub fn changes(&self) -> &[ColumnChange<'a>] {
        &self.changes
    }

    #[must_use]
    pub const fn table_comment_changed(&self) -> bool {
        self.table_comment_changed
    }

    #[must_use]
    pub fn warnings(&self) -> &[DiffWarning] {
        &self.warnings
    }

    /// True when no statement is needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && !self.table_comment_changed
    }

    /// True when `column` (by target name) has a modification.
    #[must_use]
    pub fn is_modified(&self, column: &str) -> bool {
        self.changes.iter().any(|change| {
            matches!(change, ColumnChange::Modify { after, .. } if after.name() == column)
        })
    }

    /// True when `column` (by target name) is renamed.
    #[must_use]
    pub fn is_renamed(&self, column: &str) -> bool {
        self.changes.iter().any(|change| {
            matches!(change, ColumnChange::Rename { after, .. } if after.name() == column)
        })
    }
}

/// Finds the deployed counterpart of each target column.
///
/// Recorded renames claim their previous name first; the remaining targets
/// then match by current name. A deployed column is claimed at most once.
fn match_columns<'a>(
    before: TableRef<'a>,
    targets: &[ColumnRef<'a>],
) -> Vec<Option<ColumnRef<'a>>> {
    let mut claimed: BTreeSet<&'a str> = BTreeSet::new();
    let mut pairs = vec![None; targets.len()];

    for (slot, target) in pairs.iter_mut().zip(targets) {
        if target.previous_name() == target.name() {
            continue;
        }
        if let Some(current) = before
            .column(target.previous_name())
            .filter(|c| !claimed.contains(c.name()))
        {
            claimed.insert(current.name());
            *slot = Some(current);
        }
    }
    for (slot, target) in pairs.iter_mut().zip(targets) {
        if slot.is_some() {
            continue;
        }
        if let Some(current) = before
            .column(target.name())
            .filter(|c| !claimed.contains(c.name()))
        {
            claimed.insert(current.name());
            *slot = Some(current);
        }
    }
    pairs
}

/// Pairs unmatched drops and additions with equal data types and similar
/// names, best match first.
fn possible_renames(drops: &[ColumnChange<'_>], additions: &[ColumnChange<'_>]) -> Vec<DiffWarning> {
    let mut candidates: Vec<(&str, &str, f64)> = Vec::new();
    for drop in drops {
        let ColumnChange::Drop { column: old } = drop else {
            continue;
        };
        for addition in additions {
            let ColumnChange::Add { column: new } = addition else {
                continue;
            };
            let same_type = matches!(
                (old.data_type(), new.data_type()),
                (Ok(a), Ok(b)) if a == b
            );
            if !same_type {
                continue;
            }
            let score = similarity(old.name(), new.name());
            if score >= RENAME_SIMILARITY_THRESHOLD {
                candidates.push((old.name(), new.name(), score));
            }
        }
    }
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut used_old = BTreeSet::new();
    let mut used_new = BTreeSet::new();
    let mut warnings = Vec::new();
    for (old, new, score) in candidates {
        if used_old.contains(old) || used_new.contains(new) {
            continue;
        }
        used_old.insert(old);
        used_new.insert(new);
        warnings.push(DiffWarning::PossibleRename {
            old_column: old.to_string(),
            new_column: new.to_string(),
            similarity: score,
        });
    }
    warnings
}
