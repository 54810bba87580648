//! Item-based collaborative filtering over the save log.
//!
//! Builds a binary user-item matrix from `save` interactions, computes
//! item-item cosine similarity, and ranks items against an anchor: the
//! target user's most recently saved item. Everything the user already
//! saved is excluded from the output.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::InteractionRecord;

fn cosine_sim(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Recommend up to `top_n` item ids for `user_id`.
///
/// `saves` must be the save log in ascending (timestamp, insertion) order,
/// as [`InteractionStore::saves`](crate::interactions::InteractionStore::saves)
/// returns it; the user's last entry in the log is the anchor. Ranking is
/// similarity descending, ties broken by ascending item id. No saves, or
/// a user absent from the log, yields an empty list.
pub fn recommend(saves: &[InteractionRecord], user_id: i64, top_n: usize) -> Vec<i64> {
    if saves.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let users: BTreeSet<i64> = saves.iter().map(|s| s.user_id).collect();
    if !users.contains(&user_id) {
        return Vec::new();
    }
    let user_index: BTreeMap<i64, usize> =
        users.iter().enumerate().map(|(i, u)| (*u, i)).collect();

    // One column per item: a binary saved-by vector over all users.
    let mut columns: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for s in saves {
        let col = columns
            .entry(s.item_id)
            .or_insert_with(|| vec![0.0; users.len()]);
        col[user_index[&s.user_id]] = 1.0;
    }

    let saved_by_user: BTreeSet<i64> = saves
        .iter()
        .filter(|s| s.user_id == user_id)
        .map(|s| s.item_id)
        .collect();
    // Last entry in the ordered log is the most recent save.
    let anchor = match saves.iter().rev().find(|s| s.user_id == user_id) {
        Some(s) => s.item_id,
        None => return Vec::new(),
    };
    let anchor_col = &columns[&anchor];

    let mut scored: Vec<(f64, i64)> = columns
        .iter()
        .filter(|(item, _)| !saved_by_user.contains(item))
        .map(|(item, col)| (cosine_sim(anchor_col, col), *item))
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });

    scored.into_iter().take(top_n).map(|(_, item)| item).collect()
}
