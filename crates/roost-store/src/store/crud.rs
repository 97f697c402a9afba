use super::Store;
use crate::error::{Error, Result};
use crate::types::{
    CachedTweet, PostStatus, QuotaRecord, ScheduledPost, Suggestion, SuggestionStatus,
};
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::warn;

impl Store {
    // ── Quota windows ───────────────────────────────────────────

    /// Write through a provider-reported quota window for one endpoint.
    ///
    /// Last-write-wins per endpoint key; creates the row if missing.
    /// `remaining` is clamped into `0..=limit_total` so the stored
    /// invariant always holds regardless of what the provider reported.
    pub async fn upsert_quota(
        &self,
        endpoint: &str,
        remaining: i64,
        reset_at: DateTime<Utc>,
        limit_total: i64,
    ) -> Result<()> {
        if limit_total < 1 {
            return Err(Error::InvalidRecord(format!(
                "limit_total must be positive, got {limit_total}"
            )));
        }
        let clamped = remaining.clamp(0, limit_total);
        if clamped != remaining {
            warn!(endpoint, remaining, limit_total, "clamping quota remaining into window bounds");
        }

        sqlx::query(
            "INSERT INTO rate_limits (endpoint, remaining, reset_at, limit_total, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(endpoint) DO UPDATE SET
                remaining = excluded.remaining,
                reset_at = excluded.reset_at,
                limit_total = excluded.limit_total,
                updated_at = excluded.updated_at",
        )
        .bind(endpoint)
        .bind(clamped)
        .bind(reset_at.to_rfc3339())
        .bind(limit_total)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All tracked quota windows, order unspecified.
    pub async fn list_quota(&self) -> Result<Vec<QuotaRecord>> {
        let rows = sqlx::query(
            "SELECT endpoint, remaining, reset_at, limit_total, updated_at FROM rate_limits",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_quota).collect()
    }

    /// Quota window for a single endpoint, if tracked.
    pub async fn get_quota(&self, endpoint: &str) -> Result<Option<QuotaRecord>> {
        let row = sqlx::query(
            "SELECT endpoint, remaining, reset_at, limit_total, updated_at
             FROM rate_limits WHERE endpoint = ?1",
        )
        .bind(endpoint)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_quota).transpose()
    }

    pub(crate) fn row_to_quota(row: &sqlx::sqlite::SqliteRow) -> Result<QuotaRecord> {
        let reset_str: String = row.try_get("reset_at")?;
        let updated_str: String = row.try_get("updated_at")?;
        Ok(QuotaRecord {
            endpoint: row.try_get("endpoint")?,
            remaining: row.try_get("remaining")?,
            reset_at: parse_timestamp(&reset_str),
            limit_total: row.try_get("limit_total")?,
            updated_at: parse_timestamp(&updated_str),
        })
    }

    // ── Reply suggestions ───────────────────────────────────────

    /// Bulk-insert generated reply suggestions, all pending.
    ///
    /// The batch is transactional: a failure part-way through persists
    /// none of the rows.
    pub async fn insert_suggestions(
        &self,
        original_tweet_id: &str,
        original_content: &str,
        replies: &[String],
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        for reply in replies {
            sqlx::query(
                "INSERT INTO reply_suggestions
                 (original_tweet_id, original_content, suggested_reply, status, created_at)
                 VALUES (?1, ?2, ?3, 'pending', ?4)",
            )
            .bind(original_tweet_id)
            .bind(original_content)
            .bind(reply)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Suggestions in the given state, most recent first, capped at 50.
    pub async fn list_suggestions(&self, status: SuggestionStatus) -> Result<Vec<Suggestion>> {
        let rows = sqlx::query(
            "SELECT id, original_tweet_id, original_content, suggested_reply,
                    status, posted_at, created_at
             FROM reply_suggestions
             WHERE status = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT 50",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_suggestion).collect()
    }

    /// Transition a pending suggestion to posted. Returns false when the
    /// row is missing or already posted.
    pub async fn mark_suggestion_posted(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE reply_suggestions
             SET status = 'posted', posted_at = ?2
             WHERE id = ?1 AND status = 'pending'",
        )
        .bind(id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub(crate) fn row_to_suggestion(row: &sqlx::sqlite::SqliteRow) -> Result<Suggestion> {
        let status_str: String = row.try_get("status")?;
        let posted_str: Option<String> = row.try_get("posted_at")?;
        let created_str: String = row.try_get("created_at")?;
        Ok(Suggestion {
            id: row.try_get("id")?,
            original_tweet_id: row.try_get("original_tweet_id")?,
            original_content: row.try_get("original_content")?,
            suggested_reply: row.try_get("suggested_reply")?,
            status: SuggestionStatus::from_str_lossy(&status_str),
            posted_at: posted_str.as_deref().map(parse_timestamp),
            created_at: parse_timestamp(&created_str),
        })
    }

    // ── Scheduled posts ─────────────────────────────────────────

    /// Queue a post for a future publish. Returns the stored row.
    pub async fn schedule_post(
        &self,
        content: &str,
        scheduled_for: DateTime<Utc>,
    ) -> Result<ScheduledPost> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO scheduled_posts (content, scheduled_for, status, created_at)
             VALUES (?1, ?2, 'pending', ?3)",
        )
        .bind(content)
        .bind(scheduled_for.to_rfc3339())
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(ScheduledPost {
            id: result.last_insert_rowid(),
            content: content.to_string(),
            scheduled_for,
            status: PostStatus::Pending,
            tweet_id: None,
            posted_at: None,
            created_at,
        })
    }

    /// All queued posts, earliest scheduled first.
    pub async fn list_scheduled(&self) -> Result<Vec<ScheduledPost>> {
        let rows = sqlx::query(
            "SELECT id, content, scheduled_for, status, tweet_id, posted_at, created_at
             FROM scheduled_posts
             ORDER BY scheduled_for ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_scheduled).collect()
    }

    pub(crate) fn row_to_scheduled(row: &sqlx::sqlite::SqliteRow) -> Result<ScheduledPost> {
        let status_str: String = row.try_get("status")?;
        let scheduled_str: String = row.try_get("scheduled_for")?;
        let posted_str: Option<String> = row.try_get("posted_at")?;
        let created_str: String = row.try_get("created_at")?;
        Ok(ScheduledPost {
            id: row.try_get("id")?,
            content: row.try_get("content")?,
            scheduled_for: parse_timestamp(&scheduled_str),
            status: PostStatus::from_str_lossy(&status_str),
            tweet_id: row.try_get("tweet_id")?,
            posted_at: posted_str.as_deref().map(parse_timestamp),
            created_at: parse_timestamp(&created_str),
        })
    }

    // ── Posted tweet cache ──────────────────────────────────────

    /// Cache a tweet published through Roost, upserted by provider id.
    pub async fn cache_posted_tweet(&self, tweet_id: &str, content: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO posted_tweets (tweet_id, content, posted_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(tweet_id) DO UPDATE SET
                content = excluded.content",
        )
        .bind(tweet_id)
        .bind(content)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Cached posted tweets, most recent first.
    pub async fn list_posted_tweets(&self) -> Result<Vec<CachedTweet>> {
        let rows = sqlx::query(
            "SELECT tweet_id, content, likes, retweets, replies, posted_at
             FROM posted_tweets
             ORDER BY posted_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_cached).collect()
    }

    pub(crate) fn row_to_cached(row: &sqlx::sqlite::SqliteRow) -> Result<CachedTweet> {
        let posted_str: String = row.try_get("posted_at")?;
        Ok(CachedTweet {
            tweet_id: row.try_get("tweet_id")?,
            content: row.try_get("content")?,
            likes: row.try_get("likes")?,
            retweets: row.try_get("retweets")?,
            replies: row.try_get("replies")?,
            posted_at: parse_timestamp(&posted_str),
        })
    }
}

/// Parse a stored RFC 3339 timestamp, falling back to now on corruption.
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            warn!(value = s, "unparseable stored timestamp, substituting current time");
            Utc::now()
        })
}
