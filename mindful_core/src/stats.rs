//! Daily aggregation and streak computation.
//!
//! Dates are the UTC date portion of `completed_at`, matching the stored
//! timestamp rather than the user's local calendar day. Aggregates are
//! recomputed from the session collection on every call; nothing is
//! incrementally maintained.

use crate::{DailyStats, Session, SessionType};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

/// How many days back the streak walk looks before giving up
const STREAK_LOOKBACK_DAYS: usize = 365;

/// Group sessions into one `DailyStats` per distinct date, newest first
pub fn daily_stats(sessions: &[Session], limit: Option<usize>) -> Vec<DailyStats> {
    let mut by_date: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();

    for session in sessions {
        let date = session.completed_at.date_naive();
        let entry = by_date.entry(date).or_insert_with(|| DailyStats {
            date,
            meditation_count: 0,
            journaling_count: 0,
            total_duration_seconds: 0,
        });

        match session.session_type {
            SessionType::Meditation => entry.meditation_count += 1,
            SessionType::Journaling => entry.journaling_count += 1,
        }
        entry.total_duration_seconds += session.duration_seconds;
    }

    let mut stats: Vec<DailyStats> = by_date.into_values().rev().collect();

    if let Some(limit) = limit {
        stats.truncate(limit);
    }

    stats
}

/// Count consecutive days with at least one session, walking backward from
/// `today`.
///
/// Today itself is allowed to be empty without breaking the chain; the walk
/// then simply starts at yesterday. The first empty day after that ends the
/// count. Bounded at 365 iterations.
pub fn streak(daily: &[DailyStats], today: NaiveDate) -> u32 {
    if daily.is_empty() {
        return 0;
    }

    let dates: HashSet<NaiveDate> = daily.iter().map(|d| d.date).collect();

    let mut current = today;
    let mut streak = 0;

    for i in 0..STREAK_LOOKBACK_DAYS {
        if dates.contains(&current) {
            streak += 1;
        } else if i > 0 {
            break;
        }
        // An empty first day means no session yet today; keep walking
        current -= Duration::days(1);
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn session_on(session_type: SessionType, completed_at: &str, duration: u32) -> Session {
        Session {
            id: Uuid::new_v4(),
            session_type,
            duration_seconds: duration,
            content: None,
            completed_at: completed_at.parse::<DateTime<Utc>>().unwrap(),
            user: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_daily_stats_groups_by_utc_date() {
        let sessions = vec![
            session_on(SessionType::Meditation, "2026-02-03T08:00:00Z", 300),
            session_on(SessionType::Journaling, "2026-02-03T21:30:00Z", 690),
            session_on(SessionType::Meditation, "2026-02-01T07:15:00Z", 120),
        ];

        let stats = daily_stats(&sessions, None);
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].date, date("2026-02-03"));
        assert_eq!(stats[0].meditation_count, 1);
        assert_eq!(stats[0].journaling_count, 1);
        assert_eq!(stats[0].total_duration_seconds, 990);

        assert_eq!(stats[1].date, date("2026-02-01"));
        assert_eq!(stats[1].meditation_count, 1);
        assert_eq!(stats[1].journaling_count, 0);
        assert_eq!(stats[1].total_duration_seconds, 120);
    }

    #[test]
    fn test_daily_stats_counts_match_session_counts() {
        let sessions = vec![
            session_on(SessionType::Meditation, "2026-02-03T00:00:01Z", 300),
            session_on(SessionType::Meditation, "2026-02-03T12:00:00Z", 300),
            session_on(SessionType::Journaling, "2026-02-03T23:59:59Z", 690),
        ];

        let stats = daily_stats(&sessions, None);
        assert_eq!(stats.len(), 1);
        assert_eq!(
            stats[0].meditation_count + stats[0].journaling_count,
            sessions.len() as u32
        );
        assert_eq!(
            stats[0].total_duration_seconds,
            sessions.iter().map(|s| s.duration_seconds).sum::<u32>()
        );
    }

    #[test]
    fn test_daily_stats_limit_keeps_most_recent_dates() {
        let sessions = vec![
            session_on(SessionType::Meditation, "2026-02-01T08:00:00Z", 60),
            session_on(SessionType::Meditation, "2026-02-02T08:00:00Z", 60),
            session_on(SessionType::Meditation, "2026-02-03T08:00:00Z", 60),
        ];

        let stats = daily_stats(&sessions, Some(2));
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].date, date("2026-02-03"));
        assert_eq!(stats[1].date, date("2026-02-02"));
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let sessions = vec![
            session_on(SessionType::Meditation, "2026-02-01T08:00:00Z", 60),
            session_on(SessionType::Meditation, "2026-02-02T08:00:00Z", 60),
            session_on(SessionType::Journaling, "2026-02-03T08:00:00Z", 60),
        ];
        let daily = daily_stats(&sessions, None);

        assert_eq!(streak(&daily, date("2026-02-03")), 3);
    }

    #[test]
    fn test_streak_falls_back_to_yesterday_when_today_is_empty() {
        let sessions = vec![
            session_on(SessionType::Meditation, "2026-02-01T08:00:00Z", 60),
            session_on(SessionType::Meditation, "2026-02-02T08:00:00Z", 60),
        ];
        let daily = daily_stats(&sessions, None);

        // No session on the 3rd yet; the chain through the 2nd still holds
        assert_eq!(streak(&daily, date("2026-02-03")), 2);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        let sessions = vec![
            session_on(SessionType::Meditation, "2026-02-01T08:00:00Z", 60),
            session_on(SessionType::Journaling, "2026-02-03T08:00:00Z", 60),
        ];
        let daily = daily_stats(&sessions, None);

        // The 2nd is missing, so only today counts
        assert_eq!(streak(&daily, date("2026-02-03")), 1);
    }

    #[test]
    fn test_streak_zero_without_sessions() {
        assert_eq!(streak(&[], date("2026-02-03")), 0);
    }

    #[test]
    fn test_streak_zero_when_both_today_and_yesterday_are_empty() {
        let sessions = vec![session_on(
            SessionType::Meditation,
            "2026-01-30T08:00:00Z",
            60,
        )];
        let daily = daily_stats(&sessions, None);

        assert_eq!(streak(&daily, date("2026-02-03")), 0);
    }

    #[test]
    fn test_streak_bounded_walk() {
        // Two years of daily sessions still report at most a year
        let mut sessions = Vec::new();
        let mut day = date("2024-02-04");
        while day <= date("2026-02-03") {
            sessions.push(session_on(
                SessionType::Meditation,
                &format!("{}T08:00:00Z", day),
                60,
            ));
            day += Duration::days(1);
        }
        let daily = daily_stats(&sessions, None);

        assert_eq!(streak(&daily, date("2026-02-03")), 365);
    }
}
