use super::Store;
use crate::error::Result;

impl Store {
    // ── Migrations ──────────────────────────────────────────────

    pub(crate) async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS rate_limits (
                endpoint    TEXT PRIMARY KEY,
                remaining   INTEGER NOT NULL,
                reset_at    TEXT NOT NULL,
                limit_total INTEGER NOT NULL,
                updated_at  TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS reply_suggestions (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                original_tweet_id TEXT NOT NULL,
                original_content  TEXT NOT NULL,
                suggested_reply   TEXT NOT NULL,
                status            TEXT NOT NULL DEFAULT 'pending',
                posted_at         TEXT,
                created_at        TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_suggestions_status
             ON reply_suggestions(status, created_at)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS scheduled_posts (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                content       TEXT NOT NULL,
                scheduled_for TEXT NOT NULL,
                status        TEXT NOT NULL DEFAULT 'pending',
                tweet_id      TEXT,
                posted_at     TEXT,
                created_at    TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_scheduled_for
             ON scheduled_posts(scheduled_for)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS posted_tweets (
                tweet_id  TEXT PRIMARY KEY,
                content   TEXT NOT NULL,
                likes     INTEGER NOT NULL DEFAULT 0,
                retweets  INTEGER NOT NULL DEFAULT 0,
                replies   INTEGER NOT NULL DEFAULT 0,
                posted_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
