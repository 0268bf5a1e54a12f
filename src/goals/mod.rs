//! Goal lifecycle management
//!
//! Creates goals, derives their slugs and applies progress deltas.
//! Goals are never deleted here.

use crate::error::EngineError;
use crate::models::{Goal, GoalDraft, GoalType};
use crate::state::RecordStore;
use crate::Result;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const SLUG_NAME_MAX_LEN: usize = 30;

/// Deterministic slug for a goal: lowercase name with everything but
/// `[a-z0-9 ]` removed, spaces turned into hyphens, cut to 30 characters,
/// then `-` and the lowercase goal type.
pub fn slugify(name: &str, goal_type: GoalType) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .map(|c| if c == ' ' { '-' } else { c })
        .take(SLUG_NAME_MAX_LEN)
        .collect();

    format!("{}-{}", base, goal_type.as_slug())
}

//
// ================= Input Policy =================
//

/// Hook deciding what happens to suspect goal and surplus input.
pub trait InputPolicy: Send + Sync {
    fn name(&self) -> &'static str;
    fn check_goal(&self, draft: &GoalDraft, today: NaiveDate) -> Result<()>;
    fn check_surplus(&self, surplus: Decimal) -> Result<()>;
}

fn goal_issues(draft: &GoalDraft, today: NaiveDate) -> Vec<String> {
    let mut issues = Vec::new();
    if draft.name.trim().is_empty() {
        issues.push("goal name is empty".to_string());
    }
    if draft.target_amount <= Decimal::ZERO {
        issues.push(format!("target amount {} is not positive", draft.target_amount));
    }
    if draft.target_date < today {
        issues.push(format!("target date {} is in the past", draft.target_date));
    }
    issues
}

/// Accepts everything and logs suspect values. This is the default:
/// negative targets and past dates are recorded as entered.
pub struct PermissivePolicy;

impl InputPolicy for PermissivePolicy {
    fn name(&self) -> &'static str {
        "permissive"
    }

    fn check_goal(&self, draft: &GoalDraft, today: NaiveDate) -> Result<()> {
        for issue in goal_issues(draft, today) {
            warn!(goal = %draft.name, %issue, "Accepting suspect goal input");
        }
        Ok(())
    }

    fn check_surplus(&self, surplus: Decimal) -> Result<()> {
        if surplus <= Decimal::ZERO {
            warn!(%surplus, "Accepting non-positive surplus");
        }
        Ok(())
    }
}

/// Rejects suspect input with `EngineError::Validation`.
pub struct StrictPolicy;

impl InputPolicy for StrictPolicy {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn check_goal(&self, draft: &GoalDraft, today: NaiveDate) -> Result<()> {
        let issues = goal_issues(draft, today);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(issues.join("; ")))
        }
    }

    fn check_surplus(&self, surplus: Decimal) -> Result<()> {
        if surplus <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "surplus {} is not positive",
                surplus
            )));
        }
        Ok(())
    }
}

//
// ================= Manager =================
//

pub struct GoalManager {
    store: Arc<dyn RecordStore>,
    policy: Arc<dyn InputPolicy>,
}

impl GoalManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_policy(store, Arc::new(PermissivePolicy))
    }

    pub fn with_policy(store: Arc<dyn RecordStore>, policy: Arc<dyn InputPolicy>) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &dyn InputPolicy {
        self.policy.as_ref()
    }

    pub async fn create(&self, draft: GoalDraft) -> Result<Goal> {
        self.create_as_of(draft, Utc::now().date_naive()).await
    }

    /// Create a goal with zero progress. One store write.
    pub async fn create_as_of(&self, draft: GoalDraft, today: NaiveDate) -> Result<Goal> {
        self.policy.check_goal(&draft, today)?;

        let goal = Goal {
            id: Uuid::new_v4(),
            slug: slugify(&draft.name, draft.goal_type),
            name: draft.name,
            goal_type: draft.goal_type,
            target_amount: draft.target_amount,
            current_amount: Decimal::ZERO,
            target_date: draft.target_date,
            notes: draft.notes,
            created_at: Utc::now(),
        };

        self.store.add_goal(goal.clone()).await?;

        info!(
            goal_id = %goal.id,
            slug = %goal.slug,
            target = %goal.target_amount,
            "Goal created"
        );

        Ok(goal)
    }

    /// Add `delta` to the goal's current amount. Negative deltas are
    /// withdrawals; no clamping is applied.
    pub async fn update_progress(&self, goal_id: Uuid, delta: Decimal) -> Result<Goal> {
        let mut goal = self
            .store
            .get_goal(goal_id)
            .await?
            .ok_or_else(|| EngineError::goal_not_found(goal_id))?;

        goal.current_amount += delta;
        if goal.current_amount < Decimal::ZERO {
            warn!(goal_id = %goal_id, current = %goal.current_amount, "Goal progress is negative");
        }

        self.store.update_goal(&goal).await?;

        debug!(goal_id = %goal_id, %delta, current = %goal.current_amount, "Goal progress updated");
        Ok(goal)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Goal>> {
        self.store.find_goal_by_slug(slug).await
    }

    /// All goals, soonest deadline first.
    pub async fn list_all(&self) -> Result<Vec<Goal>> {
        let mut goals = self.store.list_goals().await?;
        goals.sort_by(|a, b| {
            a.target_date
                .cmp(&b.target_date)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(goals)
    }

    pub async fn list_by_type(&self, goal_type: GoalType) -> Result<Vec<Goal>> {
        let goals = self.list_all().await?;
        Ok(goals
            .into_iter()
            .filter(|g| g.goal_type == goal_type)
            .collect())
    }
}
