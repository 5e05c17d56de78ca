//! Rank titles awarded at the end of a quiz.

use serde::Serialize;

/// Title, icon and encouragement shown for a finished quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub title: &'static str,
    pub icon: &'static str,
    pub message: &'static str,
}

/// Rank title stored before any game has been played
pub const INITIAL_RANK_TITLE: &str = "Beginner";

/// Pick the rank for a score percentage (0-100)
pub fn rank_for(percentage: u32) -> Rank {
    if percentage >= 100 {
        Rank {
            title: "Legendary Word Hero",
            icon: "👑",
            message: "PERFECT! You are a word wizard!",
        }
    } else if percentage >= 80 {
        Rank {
            title: "Super Scholar",
            icon: "🌟",
            message: "WOW! You know so many verbs!",
        }
    } else if percentage >= 60 {
        Rank {
            title: "Verb Wizard",
            icon: "🧙",
            message: "Great job! Keep it up!",
        }
    } else if percentage >= 40 {
        Rank {
            title: "Word Explorer",
            icon: "🧭",
            message: "Good start! You're learning fast!",
        }
    } else {
        Rank {
            title: "Awesome Beginner",
            icon: "🌱",
            message: "Keep practicing, you can do it!",
        }
    }
}

/// Rounded percentage of `score` out of `total`; zero when `total` is zero
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (score as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(rank_for(100).title, "Legendary Word Hero");
        assert_eq!(rank_for(99).title, "Super Scholar");
        assert_eq!(rank_for(80).title, "Super Scholar");
        assert_eq!(rank_for(79).title, "Verb Wizard");
        assert_eq!(rank_for(60).title, "Verb Wizard");
        assert_eq!(rank_for(59).title, "Word Explorer");
        assert_eq!(rank_for(40).title, "Word Explorer");
        assert_eq!(rank_for(39).title, "Awesome Beginner");
        assert_eq!(rank_for(0).title, "Awesome Beginner");
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(10, 10), 100);
        assert_eq!(percentage(0, 0), 0);
    }
}
