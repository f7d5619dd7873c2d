//! Point-delta rules shared by every session mode. Elapsed time is always
//! floored to whole seconds before any bonus lookup.

/// Answer window for one question, in seconds.
pub const QUESTION_TIME_LIMIT_SECS: f64 = 30.0;

/// Highest score a single linear-quiz question can pay out.
pub const QUIZ_QUESTION_VALUE: i32 = 10;

/// Linear quiz mode: a fast correct answer earns up to 10 points, decaying
/// one point per second with a floor of 1. Wrong answers earn nothing.
pub fn quiz_points(correct: bool, elapsed_secs: f64) -> i32 {
    if !correct {
        return 0;
    }
    (QUIZ_QUESTION_VALUE as i64 - elapsed_secs.floor() as i64).max(1) as i32
}

/// Self-scored board mode: the cell value plus 50 points per unused second
/// of a 5-second bonus window when correct, the full cell value lost when
/// wrong.
pub fn board_points(correct: bool, value: i32, elapsed_secs: f64) -> i32 {
    if correct {
        let bonus_steps = (5 - elapsed_secs.floor() as i64).max(0) as i32;
        value + 50 * bonus_steps
    } else {
        -value
    }
}

/// Judged bonus tier for an answer clock reading.
pub fn time_bonus(elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 10.0 {
        1.5
    } else if elapsed_secs <= 20.0 {
        1.0
    } else {
        0.5
    }
}

/// Judged board mode: the cell value scaled by the speed tier when correct,
/// the full cell value lost when wrong. The multiplier is only defined on
/// the correct path.
pub fn judged_points(correct: bool, value: i32, elapsed_secs: f64) -> (i32, Option<f64>) {
    if correct {
        let bonus = time_bonus(elapsed_secs);
        ((value as f64 * bonus).round() as i32, Some(bonus))
    } else {
        (-value, None)
    }
}

pub fn time_remaining(elapsed_secs: f64) -> f64 {
    (QUESTION_TIME_LIMIT_SECS - elapsed_secs).max(0.0)
}

pub fn is_time_up(elapsed_secs: f64) -> bool {
    elapsed_secs >= QUESTION_TIME_LIMIT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_points_decay_and_floor() {
        assert_eq!(quiz_points(true, 0.0), 10);
        assert_eq!(quiz_points(true, 0.9), 10);
        assert_eq!(quiz_points(true, 1.0), 9);
        assert_eq!(quiz_points(true, 8.2), 2);
        // 10 - 12 would go negative; the floor is 1.
        assert_eq!(quiz_points(true, 12.0), 1);
        assert_eq!(quiz_points(true, 500.0), 1);
    }

    #[test]
    fn test_quiz_points_incorrect_is_zero() {
        assert_eq!(quiz_points(false, 0.0), 0);
        assert_eq!(quiz_points(false, 25.0), 0);
    }

    #[test]
    fn test_board_points_speed_window() {
        assert_eq!(board_points(true, 200, 0.0), 200 + 250);
        assert_eq!(board_points(true, 200, 2.4), 200 + 150);
        assert_eq!(board_points(true, 200, 4.9), 200 + 50);
        // Window exhausted: value only.
        assert_eq!(board_points(true, 200, 5.0), 200);
        assert_eq!(board_points(true, 200, 60.0), 200);
    }

    #[test]
    fn test_board_points_incorrect_is_negative_value() {
        assert_eq!(board_points(false, 200, 0.0), -200);
        assert_eq!(board_points(false, 1000, 19.0), -1000);
    }

    #[test]
    fn test_time_bonus_tier_boundaries() {
        assert_eq!(time_bonus(0.0), 1.5);
        assert_eq!(time_bonus(10.0), 1.5);
        assert_eq!(time_bonus(10.0001), 1.0);
        assert_eq!(time_bonus(20.0), 1.0);
        assert_eq!(time_bonus(20.0001), 0.5);
        assert_eq!(time_bonus(3600.0), 0.5);
    }

    #[test]
    fn test_judged_points_correct_scales_value() {
        assert_eq!(judged_points(true, 200, 3.0), (300, Some(1.5)));
        assert_eq!(judged_points(true, 400, 15.0), (400, Some(1.0)));
        assert_eq!(judged_points(true, 600, 25.0), (300, Some(0.5)));
    }

    #[test]
    fn test_judged_points_incorrect_has_no_bonus() {
        assert_eq!(judged_points(false, 400, 3.0), (-400, None));
        assert_eq!(judged_points(false, 400, 25.0), (-400, None));
    }

    #[test]
    fn test_time_limit_helpers() {
        assert_eq!(time_remaining(0.0), 30.0);
        assert_eq!(time_remaining(12.5), 17.5);
        assert_eq!(time_remaining(31.0), 0.0);
        assert!(!is_time_up(29.9));
        assert!(is_time_up(30.0));
    }
}
