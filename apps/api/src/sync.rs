//! Planners for synchronizing a parent's child collections.
//!
//! Owned children (pillars, statuses, skills) are diffed by a stable key so a
//! save only touches the rows that actually changed, instead of wiping and
//! recreating the whole set. Shared vocabulary (techniques, tags) is linked
//! through a join table; syncing attaches/detaches links and never deletes
//! the vocabulary rows themselves.

use std::collections::{HashMap, HashSet};

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Targeted changes for an owned child collection.
/// Indices refer to the `existing` / `desired` slices handed to the planner.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OwnedSyncPlan {
    /// Desired items with no existing counterpart.
    pub insert: Vec<usize>,
    /// (existing, desired) pairs whose key matched but content changed.
    pub update: Vec<(usize, usize)>,
    /// Existing items absent from the desired set.
    pub delete: Vec<usize>,
}

/// Diffs an owned child set against the desired one by a stable key.
/// Duplicate keys in `desired` keep the first occurrence only.
pub fn plan_owned_sync<E, D>(
    existing: &[E],
    desired: &[D],
    existing_key: impl Fn(&E) -> &str,
    desired_key: impl Fn(&D) -> &str,
    unchanged: impl Fn(&E, &D) -> bool,
) -> OwnedSyncPlan {
    let mut plan = OwnedSyncPlan::default();

    let mut by_key: HashMap<&str, usize> = HashMap::new();
    for (i, item) in existing.iter().enumerate() {
        by_key.insert(existing_key(item), i);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut kept: HashSet<usize> = HashSet::new();
    for (j, item) in desired.iter().enumerate() {
        let key = desired_key(item);
        if !seen.insert(key) {
            continue;
        }
        match by_key.get(key) {
            Some(&i) => {
                kept.insert(i);
                if !unchanged(&existing[i], item) {
                    plan.update.push((i, j));
                }
            }
            None => plan.insert.push(j),
        }
    }

    plan.delete = (0..existing.len()).filter(|i| !kept.contains(i)).collect();
    plan
}

/// Link-table changes for a shared (many-to-many) relation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LinkSyncPlan {
    pub attach: Vec<Uuid>,
    pub detach: Vec<Uuid>,
}

impl LinkSyncPlan {
    pub fn is_noop(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// Diffs the currently linked ids against the desired set.
pub fn plan_link_sync(existing: &[Uuid], desired: &[Uuid]) -> LinkSyncPlan {
    let current: HashSet<Uuid> = existing.iter().copied().collect();
    let wanted: HashSet<Uuid> = desired.iter().copied().collect();

    let mut seen: HashSet<Uuid> = HashSet::new();
    LinkSyncPlan {
        attach: desired
            .iter()
            .copied()
            .filter(|id| !current.contains(id) && seen.insert(*id))
            .collect(),
        detach: existing
            .iter()
            .copied()
            .filter(|id| !wanted.contains(id))
            .collect(),
    }
}

/// Inserts the given links into a join table.
/// Table/column names are compile-time constants at every call site.
pub async fn attach_links(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    parent_column: &str,
    child_column: &str,
    parent_id: Uuid,
    child_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    if child_ids.is_empty() {
        return Ok(());
    }
    let sql = format!(
        "INSERT INTO {table} ({parent_column}, {child_column})
         SELECT $1, child FROM UNNEST($2::uuid[]) AS child
         ON CONFLICT DO NOTHING"
    );
    sqlx::query(&sql)
        .bind(parent_id)
        .bind(child_ids)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Replaces a parent's link set with the desired one by set difference.
/// Only the join table is touched; the rows behind detached links survive.
pub async fn sync_links(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    parent_column: &str,
    child_column: &str,
    parent_id: Uuid,
    desired: &[Uuid],
) -> Result<(), sqlx::Error> {
    let sql = format!("SELECT {child_column} FROM {table} WHERE {parent_column} = $1");
    let existing: Vec<Uuid> = sqlx::query_scalar(&sql)
        .bind(parent_id)
        .fetch_all(&mut **tx)
        .await?;

    let plan = plan_link_sync(&existing, desired);
    if plan.is_noop() {
        return Ok(());
    }

    if !plan.detach.is_empty() {
        let sql =
            format!("DELETE FROM {table} WHERE {parent_column} = $1 AND {child_column} = ANY($2)");
        sqlx::query(&sql)
            .bind(parent_id)
            .bind(&plan.detach)
            .execute(&mut **tx)
            .await?;
    }
    attach_links(tx, table, parent_column, child_column, parent_id, &plan.attach).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Pillar {
        title: String,
        description: String,
    }

    fn pillar(title: &str, description: &str) -> Pillar {
        Pillar {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn plan(existing: &[Pillar], desired: &[Pillar]) -> OwnedSyncPlan {
        plan_owned_sync(
            existing,
            desired,
            |e| e.title.as_str(),
            |d| d.title.as_str(),
            |e, d| e.description == d.description,
        )
    }

    #[test]
    fn test_identical_sets_plan_nothing() {
        let existing = vec![pillar("Security", "Hardened"), pillar("AI", "Smart")];
        let p = plan(&existing, &existing.clone());
        assert_eq!(p, OwnedSyncPlan::default());
    }

    #[test]
    fn test_new_key_is_inserted() {
        let existing = vec![pillar("Security", "Hardened")];
        let desired = vec![pillar("Security", "Hardened"), pillar("AI", "Smart")];
        let p = plan(&existing, &desired);
        assert_eq!(p.insert, vec![1]);
        assert!(p.update.is_empty());
        assert!(p.delete.is_empty());
    }

    #[test]
    fn test_missing_key_is_deleted() {
        let existing = vec![pillar("Security", "Hardened"), pillar("AI", "Smart")];
        let desired = vec![pillar("AI", "Smart")];
        let p = plan(&existing, &desired);
        assert_eq!(p.delete, vec![0]);
        assert!(p.insert.is_empty());
    }

    #[test]
    fn test_changed_content_is_updated_in_place() {
        let existing = vec![pillar("Security", "Hardened")];
        let desired = vec![pillar("Security", "Zero trust")];
        let p = plan(&existing, &desired);
        assert_eq!(p.update, vec![(0, 0)]);
        assert!(p.insert.is_empty());
        assert!(p.delete.is_empty());
    }

    #[test]
    fn test_full_replacement() {
        let existing = vec![pillar("Old A", "x"), pillar("Old B", "y")];
        let desired = vec![pillar("New C", "z")];
        let p = plan(&existing, &desired);
        assert_eq!(p.insert, vec![0]);
        assert_eq!(p.delete, vec![0, 1]);
    }

    #[test]
    fn test_duplicate_desired_keys_keep_first() {
        let existing = vec![];
        let desired = vec![pillar("React", "ui"), pillar("React", "other")];
        let p = plan(&existing, &desired);
        assert_eq!(p.insert, vec![0]);
    }

    #[test]
    fn test_empty_desired_deletes_all() {
        let existing = vec![pillar("A", "a"), pillar("B", "b"), pillar("C", "c")];
        let p = plan(&existing, &[]);
        assert_eq!(p.delete, vec![0, 1, 2]);
        assert!(p.insert.is_empty());
        assert!(p.update.is_empty());
    }

    // Link sync: updating {A,B} -> {B,C} must detach A, attach C, leave B alone.
    #[test]
    fn test_link_sync_replaces_by_set_difference() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let p = plan_link_sync(&[a, b], &[b, c]);
        assert_eq!(p.attach, vec![c]);
        assert_eq!(p.detach, vec![a]);
    }

    #[test]
    fn test_link_sync_unchanged_is_noop() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let p = plan_link_sync(&[a, b], &[b, a]);
        assert!(p.is_noop());
    }

    // Clearing a project's techniques only detaches links. The plan carries no
    // vocabulary deletions, so the shared "Go" technique row survives.
    #[test]
    fn test_link_sync_empty_desired_only_detaches() {
        let go = Uuid::new_v4();
        let p = plan_link_sync(&[go], &[]);
        assert_eq!(p.detach, vec![go]);
        assert!(p.attach.is_empty());
    }

    #[test]
    fn test_link_sync_fresh_parent_attaches_all() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let p = plan_link_sync(&[], &[a, b]);
        assert_eq!(p.attach, vec![a, b]);
        assert!(p.detach.is_empty());
    }
}
