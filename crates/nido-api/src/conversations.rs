//! Conversation engine: folds the flat message log into per-counterpart
//! summaries and owns the read-state transition.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use nido_db::models::{MessageRow, parse_timestamp};
use nido_types::api::Claims;
use nido_types::models::ConversationSummary;

use crate::auth::AppState;
use crate::error::ApiError;

/// Per-counterpart accumulator before display names and listing titles are
/// resolved. The last-message fields come from the first row encountered in
/// the newest-first scan.
#[derive(Debug)]
struct ConversationSeed {
    other_user_id: i64,
    last_message: String,
    last_message_at: String,
    last_property_id: Option<i64>,
    unread_count: i64,
}

/// Single linear pass over the user's messages, which must arrive newest
/// first. Grouping is first-seen-wins per counterpart: the representative
/// message is fixed by the first (most recent) row and never overwritten by
/// the older rows that follow. Unread counting spans every row of the group.
/// Output preserves first-encounter order, i.e. most-recently-active first.
fn aggregate(user_id: i64, rows: &[MessageRow]) -> Vec<ConversationSeed> {
    let mut seeds: Vec<ConversationSeed> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let other = if row.from_user_id == user_id {
            row.to_user_id
        } else {
            row.from_user_id
        };

        let slot = *index.entry(other).or_insert_with(|| {
            seeds.push(ConversationSeed {
                other_user_id: other,
                last_message: row.content.clone(),
                last_message_at: row.created_at.clone(),
                last_property_id: row.property_id,
                unread_count: 0,
            });
            seeds.len() - 1
        });

        if row.to_user_id == user_id && !row.read {
            seeds[slot].unread_count += 1;
        }
    }

    seeds
}

/// Summaries for every counterpart the user has ever exchanged a message
/// with, recomputed from the message rows on each request. Names and listing
/// titles come from two batch lookups, never per-row queries.
pub async fn list_conversations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user_id = claims.sub;

    let (seeds, users, titles) = tokio::task::spawn_blocking(move || {
        let rows = db.db.get_user_messages(user_id)?;
        let seeds = aggregate(user_id, &rows);

        let user_ids: Vec<i64> = seeds.iter().map(|s| s.other_user_id).collect();
        let users = db.db.get_users_by_ids(&user_ids)?;

        let property_ids: Vec<i64> = seeds.iter().filter_map(|s| s.last_property_id).collect();
        let titles = db.db.get_property_titles(&property_ids)?;

        Ok::<_, anyhow::Error>((seeds, users, titles))
    })
    .await??;

    let name_by_id: HashMap<i64, String> = users.into_iter().map(|u| (u.id, u.name)).collect();
    let title_by_id: HashMap<i64, String> = titles.into_iter().collect();

    let summaries: Vec<ConversationSummary> = seeds
        .into_iter()
        .map(|seed| ConversationSummary {
            other_user_id: seed.other_user_id,
            other_user_name: name_by_id
                .get(&seed.other_user_id)
                .cloned()
                .unwrap_or_else(|| "Unknown user".into()),
            last_message: seed.last_message,
            last_message_at: parse_timestamp(&seed.last_message_at),
            unread_count: seed.unread_count,
            // Dangling references simply resolve to no title.
            property_title: seed
                .last_property_id
                .and_then(|id| title_by_id.get(&id).cloned()),
        })
        .collect();

    Ok(Json(summaries))
}

/// Acknowledge a conversation: unread messages from the counterpart flip to
/// read. Idempotent; a call with nothing unread still reports success.
pub async fn mark_conversation_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(other_user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user_id = claims.sub;

    tokio::task::spawn_blocking(move || db.db.mark_conversation_read(user_id, other_user_id))
        .await??;

    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: i64 = 1;

    fn msg(id: i64, from: i64, to: i64, content: &str, read: bool, at: &str) -> MessageRow {
        MessageRow {
            id,
            from_user_id: from,
            to_user_id: to,
            property_id: None,
            content: content.into(),
            read,
            created_at: at.into(),
        }
    }

    #[test]
    fn empty_log_yields_no_summaries() {
        assert!(aggregate(ME, &[]).is_empty());
    }

    #[test]
    fn one_summary_per_distinct_counterpart() {
        // Newest first, two counterparts interleaved.
        let rows = vec![
            msg(4, 2, ME, "latest from 2", false, "2026-08-20T12:03:00Z"),
            msg(3, ME, 3, "to 3", false, "2026-08-20T12:02:00Z"),
            msg(2, ME, 2, "to 2", false, "2026-08-20T12:01:00Z"),
            msg(1, 3, ME, "from 3", true, "2026-08-20T12:00:00Z"),
        ];

        let seeds = aggregate(ME, &rows);
        assert_eq!(seeds.len(), 2);
        // Most-recently-active first.
        assert_eq!(seeds[0].other_user_id, 2);
        assert_eq!(seeds[1].other_user_id, 3);
    }

    #[test]
    fn representative_message_is_first_seen_and_never_overwritten() {
        let rows = vec![
            msg(3, 2, ME, "newest", false, "2026-08-20T12:02:00Z"),
            msg(2, ME, 2, "middle", false, "2026-08-20T12:01:00Z"),
            msg(1, 2, ME, "oldest", true, "2026-08-20T12:00:00Z"),
        ];

        let seeds = aggregate(ME, &rows);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].last_message, "newest");
        assert_eq!(seeds[0].last_message_at, "2026-08-20T12:02:00Z");
    }

    #[test]
    fn unread_count_spans_the_whole_group() {
        // Counterpart 2 at t1 (unread), t2 (read), t3 (unread): both pending
        // rows count, not just the representative one. Outgoing rows never
        // count regardless of their read flag.
        let rows = vec![
            msg(4, 2, ME, "t3", false, "2026-08-20T12:03:00Z"),
            msg(3, ME, 2, "outgoing", false, "2026-08-20T12:02:30Z"),
            msg(2, 2, ME, "t2", true, "2026-08-20T12:02:00Z"),
            msg(1, 2, ME, "t1", false, "2026-08-20T12:01:00Z"),
        ];

        let seeds = aggregate(ME, &rows);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].last_message, "t3");
        assert_eq!(seeds[0].unread_count, 2);
    }

    #[test]
    fn unread_with_single_pending_message() {
        let rows = vec![
            msg(3, 2, ME, "t3", false, "2026-08-20T12:03:00Z"),
            msg(2, 2, ME, "t2", true, "2026-08-20T12:02:00Z"),
            msg(1, 2, ME, "t1", true, "2026-08-20T12:01:00Z"),
        ];

        let seeds = aggregate(ME, &rows);
        assert_eq!(seeds[0].last_message, "t3");
        assert_eq!(seeds[0].unread_count, 1);
    }

    #[test]
    fn representative_property_reference_comes_from_newest_row() {
        let mut newest = msg(2, 2, ME, "about the loft", false, "2026-08-20T12:01:00Z");
        newest.property_id = Some(77);
        let mut older = msg(1, 2, ME, "about another place", false, "2026-08-20T12:00:00Z");
        older.property_id = Some(12);

        let seeds = aggregate(ME, &[newest, older]);
        assert_eq!(seeds[0].last_property_id, Some(77));
    }
}
