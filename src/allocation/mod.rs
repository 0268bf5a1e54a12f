//! Priority funding allocator
//!
//! Splits a surplus across open goals as a capped waterfall: goals due
//! soon come first, and each goal takes at most one tranche per pass so a
//! single goal cannot absorb the whole surplus.

use crate::config::EngineConfig;
use crate::models::{Goal, Priority};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub goal_id: Uuid,
    pub slug: String,
    pub priority: Priority,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub surplus: Decimal,
    pub allocations: Vec<Allocation>,
    pub remaining_surplus: Decimal,
}

impl AllocationPlan {
    pub fn allocated_total(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

pub struct FundingAllocator {
    tranche_cap: Decimal,
    max_funded_goals: usize,
    high_priority_window_days: i64,
}

impl FundingAllocator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tranche_cap: config.tranche_cap,
            max_funded_goals: config.max_funded_goals,
            high_priority_window_days: config.high_priority_window_days,
        }
    }

    /// High when due within the window (overdue goals included).
    pub fn priority_of(&self, goal: &Goal, today: NaiveDate) -> Priority {
        if (goal.target_date - today).num_days() <= self.high_priority_window_days {
            Priority::High
        } else {
            Priority::Medium
        }
    }

    /// Compute allocations without touching any goal.
    ///
    /// `sum(allocations) + remaining_surplus == surplus` holds exactly.
    /// A non-positive surplus yields no allocations and is carried through
    /// unchanged as the remainder.
    pub fn plan(&self, goals: &[Goal], surplus: Decimal, today: NaiveDate) -> AllocationPlan {
        let mut remaining = surplus;
        let mut allocations = Vec::new();

        if surplus <= Decimal::ZERO {
            return AllocationPlan {
                surplus,
                allocations,
                remaining_surplus: remaining,
            };
        }

        let mut eligible: Vec<(Priority, &Goal)> = goals
            .iter()
            .filter(|g| g.current_amount < g.target_amount)
            .map(|g| (self.priority_of(g, today), g))
            .collect();

        eligible.sort_by(|(pa, a), (pb, b)| {
            pb.rank()
                .cmp(&pa.rank())
                .then_with(|| a.target_date.cmp(&b.target_date))
                .then_with(|| a.slug.cmp(&b.slug))
        });

        for (priority, goal) in eligible.into_iter().take(self.max_funded_goals) {
            if remaining <= Decimal::ZERO {
                break;
            }

            let gap = goal.target_amount - goal.current_amount;
            let amount = remaining.min(self.tranche_cap.min(gap));
            if amount <= Decimal::ZERO {
                continue;
            }

            remaining -= amount;
            debug!(goal_id = %goal.id, %amount, ?priority, "Tranche allocated");

            allocations.push(Allocation {
                goal_id: goal.id,
                slug: goal.slug.clone(),
                priority,
                amount,
            });
        }

        AllocationPlan {
            surplus,
            allocations,
            remaining_surplus: remaining,
        }
    }
}
