use chrono::NaiveDate;

use crate::constants::{MAX_GOAL_NAME_LENGTH, PINNED_GOALS_LIMIT};
use crate::error::ValidationError;
use crate::models::{CreateGoalPayload, Goal, GoalStatus, UserId};
use crate::utils::{days_left, days_left_str, parse_date};

/// A goal together with its computed days-left, for the pinned panel.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingGoal<'a> {
    pub goal: &'a Goal,
    pub days_left: i64,
}

/// Active goals that have not passed their deadline, soonest first, at most three.
///
/// The sort is stable so goals due on the same day keep their list order.
pub fn pinned_goals(goals: &[Goal], today: NaiveDate) -> Vec<UpcomingGoal<'_>> {
    let mut upcoming: Vec<UpcomingGoal<'_>> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .filter_map(|g| {
            days_left_str(&g.target_date, today)
                .filter(|days| *days >= 0)
                .map(|days_left| UpcomingGoal { goal: g, days_left })
        })
        .collect();

    upcoming.sort_by_key(|u| u.days_left);
    upcoming.truncate(PINNED_GOALS_LIMIT);
    upcoming
}

fn matches_search(goal: &Goal, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || goal.name.to_lowercase().contains(&needle)
        || goal.description.to_lowercase().contains(&needle)
}

/// The worklist: active, paused and expired goals matching `search`.
pub fn visible_goals<'a>(goals: &'a [Goal], search: &str) -> Vec<&'a Goal> {
    goals
        .iter()
        .filter(|g| {
            matches!(
                g.status,
                GoalStatus::Active | GoalStatus::Paused | GoalStatus::Expired
            )
        })
        .filter(|g| matches_search(g, search))
        .collect()
}

/// Completed and cancelled goals.
pub fn history_goals(goals: &[Goal]) -> Vec<&Goal> {
    goals.iter().filter(|g| g.status.is_history()).collect()
}

/// Status to show for a goal.
///
/// The server's status is authoritative. An active or paused goal whose
/// deadline has passed (or cannot be parsed) is shown as expired, but the
/// stored status is left alone and is what mutations send.
pub fn display_status(goal: &Goal, today: NaiveDate) -> GoalStatus {
    match goal.status {
        GoalStatus::Active | GoalStatus::Paused => {
            match days_left_str(&goal.target_date, today) {
                Some(days) if days >= 0 => goal.status,
                _ => GoalStatus::Expired,
            }
        }
        status => status,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalAction {
    TogglePause,
    Complete,
    Cancel,
}

/// Status a goal moves to under `action`.
pub fn next_status(goal: &Goal, action: GoalAction) -> Result<GoalStatus, ValidationError> {
    let invalid = |reason| ValidationError::InvalidTransition {
        from: goal.status.to_string(),
        reason,
    };

    match (goal.status, action) {
        (GoalStatus::Active, GoalAction::TogglePause) => Ok(GoalStatus::Paused),
        (GoalStatus::Paused, GoalAction::TogglePause) => Ok(GoalStatus::Active),
        (GoalStatus::Active, GoalAction::Complete) => {
            if goal.actual_value >= goal.target_value {
                Ok(GoalStatus::Completed)
            } else {
                Err(invalid("the target has not been reached"))
            }
        }
        (GoalStatus::Paused, GoalAction::Complete) => Err(invalid("resume it first")),
        (GoalStatus::Active | GoalStatus::Paused, GoalAction::Cancel) => {
            Ok(GoalStatus::Cancelled)
        }
        _ => Err(invalid("it is no longer in progress")),
    }
}

/// Progress buckets used to colour progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressTier {
    Starting,
    Building,
    Halfway,
    Almost,
    Reached,
}

impl ProgressTier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage.min(100) {
            0..=24 => ProgressTier::Starting,
            25..=49 => ProgressTier::Building,
            50..=74 => ProgressTier::Halfway,
            75..=99 => ProgressTier::Almost,
            _ => ProgressTier::Reached,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ProgressTier::Starting => "progress-starting",
            ProgressTier::Building => "progress-building",
            ProgressTier::Halfway => "progress-halfway",
            ProgressTier::Almost => "progress-almost",
            ProgressTier::Reached => "progress-reached",
        }
    }
}

/// Percentage used for display, clamped to `0..=100`.
pub fn progress_percentage(goal: &Goal) -> u32 {
    goal.progress_percentage.min(100)
}

#[derive(Debug, Clone, Default)]
pub struct NewGoalForm {
    pub name: String,
    pub description: String,
    pub target_value: String,
    pub target_date: String,
}

pub fn validate_new_goal(
    form: &NewGoalForm,
    user_id: UserId,
    today: NaiveDate,
) -> Result<CreateGoalPayload, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required("Goal name"));
    }
    if name.chars().count() > MAX_GOAL_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Goal name",
            max: MAX_GOAL_NAME_LENGTH,
        });
    }

    let description = form.description.trim();
    if description.is_empty() {
        return Err(ValidationError::Required("Goal description"));
    }

    let target_value = form
        .target_value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(ValidationError::InvalidAmount)?;

    let target_date = parse_date(&form.target_date).ok_or(ValidationError::InvalidDate)?;
    if days_left(target_date, today) < 0 {
        return Err(ValidationError::PastDate("Target date"));
    }

    Ok(CreateGoalPayload {
        user_id,
        name: name.to_string(),
        description: description.to_string(),
        target_value,
        target_date: crate::utils::format_date(target_date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: i64, status: GoalStatus, target_date: &str) -> Goal {
        Goal {
            goal_id: id,
            name: format!("Goal {id}"),
            description: "save up".to_string(),
            target_value: 100.0,
            actual_value: 40.0,
            target_date: target_date.to_string(),
            status,
            progress_percentage: 40,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn display_status_only_hints_expiry() {
        let overdue = goal(1, GoalStatus::Active, "2024-03-01");
        assert_eq!(display_status(&overdue, today()), GoalStatus::Expired);
        assert_eq!(overdue.status, GoalStatus::Active);

        let bad_date = goal(2, GoalStatus::Paused, "someday");
        assert_eq!(display_status(&bad_date, today()), GoalStatus::Expired);

        let done = goal(3, GoalStatus::Completed, "2024-03-01");
        assert_eq!(display_status(&done, today()), GoalStatus::Completed);

        let due_today = goal(4, GoalStatus::Active, "2024-03-10");
        assert_eq!(display_status(&due_today, today()), GoalStatus::Active);
    }

    #[test]
    fn transitions() {
        let active = goal(1, GoalStatus::Active, "2024-04-01");
        assert_eq!(next_status(&active, GoalAction::TogglePause), Ok(GoalStatus::Paused));
        assert_eq!(next_status(&active, GoalAction::Cancel), Ok(GoalStatus::Cancelled));
        assert!(next_status(&active, GoalAction::Complete).is_err());

        let mut funded = active.clone();
        funded.actual_value = 100.0;
        assert_eq!(next_status(&funded, GoalAction::Complete), Ok(GoalStatus::Completed));

        let paused = goal(2, GoalStatus::Paused, "2024-04-01");
        assert_eq!(next_status(&paused, GoalAction::TogglePause), Ok(GoalStatus::Active));
        assert!(next_status(&paused, GoalAction::Complete).is_err());

        let cancelled = goal(3, GoalStatus::Cancelled, "2024-04-01");
        assert!(next_status(&cancelled, GoalAction::TogglePause).is_err());
        assert!(next_status(&cancelled, GoalAction::Cancel).is_err());
    }

    #[test]
    fn progress_tiers() {
        assert_eq!(ProgressTier::from_percentage(0), ProgressTier::Starting);
        assert_eq!(ProgressTier::from_percentage(24), ProgressTier::Starting);
        assert_eq!(ProgressTier::from_percentage(25), ProgressTier::Building);
        assert_eq!(ProgressTier::from_percentage(60), ProgressTier::Halfway);
        assert_eq!(ProgressTier::from_percentage(99), ProgressTier::Almost);
        assert_eq!(ProgressTier::from_percentage(100), ProgressTier::Reached);
        assert_eq!(ProgressTier::from_percentage(250), ProgressTier::Reached);
    }

    #[test]
    fn new_goal_validation() {
        let mut form = NewGoalForm {
            name: "  Trip ".to_string(),
            description: "Cebu".to_string(),
            target_value: "15000".to_string(),
            target_date: "2024-06-01".to_string(),
        };
        let payload = validate_new_goal(&form, 7, today()).unwrap();
        assert_eq!(payload.name, "Trip");
        assert_eq!(payload.target_value, 15000.0);

        form.target_date = "2024-03-09".to_string();
        assert_eq!(
            validate_new_goal(&form, 7, today()).unwrap_err(),
            ValidationError::PastDate("Target date")
        );

        form.target_date = "2024-06-01".to_string();
        form.target_value = "0".to_string();
        assert_eq!(
            validate_new_goal(&form, 7, today()).unwrap_err(),
            ValidationError::InvalidAmount
        );

        form.name = " ".to_string();
        assert_eq!(
            validate_new_goal(&form, 7, today()).unwrap_err(),
            ValidationError::Required("Goal name")
        );
    }

    #[test]
    fn worklist_searches_name_and_description() {
        let mut laptop = goal(1, GoalStatus::Active, "2024-06-01");
        laptop.name = "New Laptop".to_string();
        laptop.description = "for school".to_string();
        let mut trip = goal(2, GoalStatus::Paused, "2024-05-01");
        trip.name = "Trip".to_string();
        trip.description = "Cebu with the barkada".to_string();
        let mut lapsed = goal(3, GoalStatus::Expired, "2024-01-01");
        lapsed.name = "Guitar".to_string();
        let mut done = goal(4, GoalStatus::Completed, "2024-02-01");
        done.name = "Laptop bag".to_string();
        let mut dropped = goal(5, GoalStatus::Cancelled, "2024-02-01");
        dropped.description = "cebu food trip".to_string();
        let goals = vec![laptop, trip, lapsed, done, dropped];

        fn ids(found: Vec<&Goal>) -> Vec<i64> {
            found.iter().map(|g| g.goal_id).collect()
        }

        assert_eq!(ids(visible_goals(&goals, "")), vec![1, 2, 3]);
        assert_eq!(ids(visible_goals(&goals, "  \t ")), vec![1, 2, 3]);
        assert_eq!(ids(visible_goals(&goals, "LapTop")), vec![1]);
        assert_eq!(ids(visible_goals(&goals, "cebu")), vec![2]);
        assert_eq!(ids(visible_goals(&goals, " SCHOOL ")), vec![1]);
        assert!(visible_goals(&goals, "bike").is_empty());
        assert_eq!(ids(history_goals(&goals)), vec![4, 5]);
    }
}
