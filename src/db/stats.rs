//! Lifetime game statistics and per-game history

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use serde::Serialize;

use crate::domain::{percentage, INITIAL_RANK_TITLE};

/// Totals across every finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Best single-game percentage
    pub best_score: u32,
    pub total_correct: u32,
    pub total_attempted: u32,
    pub games_played: u32,
    pub last_rank: String,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            best_score: 0,
            total_correct: 0,
            total_attempted: 0,
            games_played: 0,
            last_rank: INITIAL_RANK_TITLE.to_string(),
        }
    }
}

impl Stats {
    /// Share of all attempted questions answered correctly, in percent
    pub fn accuracy(&self) -> u32 {
        percentage(self.total_correct, self.total_attempted)
    }
}

/// One finished game
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub id: i64,
    pub played_at: DateTime<Utc>,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub rank_title: String,
    pub best_streak: u32,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let stats = conn.query_row(
        "SELECT best_score, total_correct, total_attempted, games_played, last_rank
         FROM stats WHERE id = 1",
        [],
        |row| {
            Ok(Stats {
                best_score: row.get(0)?,
                total_correct: row.get(1)?,
                total_attempted: row.get(2)?,
                games_played: row.get(3)?,
                last_rank: row.get(4)?,
            })
        },
    );

    match stats {
        Ok(stats) => Ok(stats),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Stats::default()),
        Err(e) => Err(e),
    }
}

/// Fold a finished game into the totals and append it to the history.
///
/// Returns `None` (and changes nothing) for an empty game.
pub fn record_game(
    conn: &Connection,
    score: u32,
    total: u32,
    rank_title: &str,
    best_streak: u32,
) -> Result<Option<Stats>> {
    if total == 0 {
        tracing::warn!("Ignoring game with no questions");
        return Ok(None);
    }

    let score = score.min(total);
    let game_percentage = percentage(score, total);
    let now = Utc::now().to_rfc3339();

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        r#"
    INSERT INTO stats (id, best_score, total_correct, total_attempted, games_played, last_rank)
    VALUES (1, ?1, ?2, ?3, 1, ?4)
    ON CONFLICT(id) DO UPDATE SET
        best_score = MAX(best_score, excluded.best_score),
        total_correct = total_correct + excluded.total_correct,
        total_attempted = total_attempted + excluded.total_attempted,
        games_played = games_played + 1,
        last_rank = excluded.last_rank
    "#,
        params![game_percentage, score, total, rank_title],
    )?;
    tx.execute(
        "INSERT INTO game_history (played_at, score, total, percentage, rank_title, best_streak)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![now, score, total, game_percentage, rank_title, best_streak],
    )?;
    tx.commit()?;

    tracing::debug!(score, total, rank = rank_title, "Recorded game");
    get_stats(conn).map(Some)
}

/// Most recent games first
pub fn recent_games(conn: &Connection, limit: i64) -> Result<Vec<GameRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, played_at, score, total, percentage, rank_title, best_streak
         FROM game_history ORDER BY id DESC LIMIT ?1",
    )?;

    let games = stmt
        .query_map(params![limit], |row| {
            let played_at: String = row.get(1)?;
            Ok(GameRecord {
                id: row.get(0)?,
                played_at: DateTime::parse_from_rfc3339(&played_at)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                score: row.get(2)?,
                total: row.get(3)?,
                percentage: row.get(4)?,
                rank_title: row.get(5)?,
                best_streak: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(games)
}
