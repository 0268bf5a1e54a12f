//! Record store adapter
//!
//! The engine reads and writes household records only through
//! `RecordStore`. The in-memory implementation keeps goals in an arena with
//! a slug index, so slug uniqueness is enforced at the storage layer.

use crate::error::EngineError;
use crate::models::{Goal, InsurancePolicy, Investment, Loan, Transaction};
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Trait for record persistence
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    // Goals
    async fn get_goal(&self, id: Uuid) -> Result<Option<Goal>>;
    async fn find_goal_by_slug(&self, slug: &str) -> Result<Option<Goal>>;
    async fn list_goals(&self) -> Result<Vec<Goal>>;
    /// Must fail with `DuplicateSlug` if a goal with the same slug exists.
    async fn add_goal(&self, goal: Goal) -> Result<()>;
    async fn update_goal(&self, goal: &Goal) -> Result<()>;

    async fn list_investments(&self) -> Result<Vec<Investment>>;
    async fn add_investment(&self, investment: Investment) -> Result<()>;

    async fn list_policies(&self) -> Result<Vec<InsurancePolicy>>;
    async fn add_policy(&self, policy: InsurancePolicy) -> Result<()>;

    async fn list_loans(&self) -> Result<Vec<Loan>>;
    async fn add_loan(&self, loan: Loan) -> Result<()>;

    async fn list_transactions(&self) -> Result<Vec<Transaction>>;
    async fn add_transaction(&self, transaction: Transaction) -> Result<()>;
}

#[derive(Default)]
struct GoalArena {
    goals: HashMap<Uuid, Goal>,
    id_by_slug: HashMap<String, Uuid>,
}

/// In-memory record store for development and tests
pub struct InMemoryRecordStore {
    goals: Arc<RwLock<GoalArena>>,
    investments: Arc<RwLock<Vec<Investment>>>,
    policies: Arc<RwLock<Vec<InsurancePolicy>>>,
    loans: Arc<RwLock<Vec<Loan>>>,
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            goals: Arc::new(RwLock::new(GoalArena::default())),
            investments: Arc::new(RwLock::new(Vec::new())),
            policies: Arc::new(RwLock::new(Vec::new())),
            loans: Arc::new(RwLock::new(Vec::new())),
            transactions: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {

    async fn get_goal(&self, id: Uuid) -> Result<Option<Goal>> {
        let arena = self.goals.read().await;
        Ok(arena.goals.get(&id).cloned())
    }

    async fn find_goal_by_slug(&self, slug: &str) -> Result<Option<Goal>> {
        let arena = self.goals.read().await;
        Ok(arena
            .id_by_slug
            .get(slug)
            .and_then(|id| arena.goals.get(id))
            .cloned())
    }

    async fn list_goals(&self) -> Result<Vec<Goal>> {
        let arena = self.goals.read().await;
        Ok(arena.goals.values().cloned().collect())
    }

    async fn add_goal(&self, goal: Goal) -> Result<()> {
        let mut arena = self.goals.write().await;

        // Check and insert under the same write guard.
        if arena.id_by_slug.contains_key(&goal.slug) {
            return Err(EngineError::DuplicateSlug(goal.slug));
        }
        if arena.goals.contains_key(&goal.id) {
            return Err(EngineError::Storage(format!(
                "Goal id already exists: {}",
                goal.id
            )));
        }

        arena.id_by_slug.insert(goal.slug.clone(), goal.id);
        arena.goals.insert(goal.id, goal);
        Ok(())
    }

    async fn update_goal(&self, goal: &Goal) -> Result<()> {
        let mut arena = self.goals.write().await;

        let previous_slug = match arena.goals.get(&goal.id) {
            Some(existing) => existing.slug.clone(),
            None => return Err(EngineError::goal_not_found(goal.id)),
        };

        if previous_slug != goal.slug {
            if arena.id_by_slug.contains_key(&goal.slug) {
                return Err(EngineError::DuplicateSlug(goal.slug.clone()));
            }
            arena.id_by_slug.remove(&previous_slug);
            arena.id_by_slug.insert(goal.slug.clone(), goal.id);
        }

        arena.goals.insert(goal.id, goal.clone());
        Ok(())
    }

    async fn list_investments(&self) -> Result<Vec<Investment>> {
        Ok(self.investments.read().await.clone())
    }

    async fn add_investment(&self, investment: Investment) -> Result<()> {
        self.investments.write().await.push(investment);
        Ok(())
    }

    async fn list_policies(&self) -> Result<Vec<InsurancePolicy>> {
        Ok(self.policies.read().await.clone())
    }

    async fn add_policy(&self, policy: InsurancePolicy) -> Result<()> {
        self.policies.write().await.push(policy);
        Ok(())
    }

    async fn list_loans(&self) -> Result<Vec<Loan>> {
        Ok(self.loans.read().await.clone())
    }

    async fn add_loan(&self, loan: Loan) -> Result<()> {
        self.loans.write().await.push(loan);
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.read().await.clone())
    }

    async fn add_transaction(&self, transaction: Transaction) -> Result<()> {
        self.transactions.write().await.push(transaction);
        Ok(())
    }
}
