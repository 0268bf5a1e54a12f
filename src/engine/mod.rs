//! Planning engine - the public in-process API
//!
//! Wires the goal manager, auto-goal rules, allocator, analytics and
//! recommendation generator over one record store.

use crate::allocation::{AllocationPlan, FundingAllocator};
use crate::analytics::{PortfolioAnalysis, PortfolioAnalyzer};
use crate::cashflow::CashFlowSummary;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::goals::{GoalManager, InputPolicy, PermissivePolicy, StrictPolicy};
use crate::models::{Goal, GoalDraft, GoalType, HouseholdProfile, Investment, Recommendation};
use crate::recommendations::{RecommendationContext, RecommendationGenerator};
use crate::rules::AutoGoalEngine;
use crate::state::RecordStore;
use crate::Result;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct PlanningEngine {
    store: Arc<dyn RecordStore>,
    goals: Arc<GoalManager>,
    auto_goals: AutoGoalEngine,
    allocator: FundingAllocator,
    recommendations: RecommendationGenerator,
}

impl PlanningEngine {
    pub fn new(store: Arc<dyn RecordStore>, config: EngineConfig) -> Self {
        let policy: Arc<dyn InputPolicy> = if config.strict_validation {
            Arc::new(StrictPolicy)
        } else {
            Arc::new(PermissivePolicy)
        };

        let goals = Arc::new(GoalManager::with_policy(store.clone(), policy));
        let auto_goals = AutoGoalEngine::new(goals.clone(), store.clone());
        let allocator = FundingAllocator::new(&config);
        let recommendations = RecommendationGenerator::new(store.clone(), &config);

        info!(
            policy = goals.policy().name(),
            rules = ?auto_goals.rule_names(),
            "Planning engine initialized"
        );

        Self {
            store,
            goals,
            auto_goals,
            allocator,
            recommendations,
        }
    }

    // =============================
    // Goals
    // =============================

    pub async fn create_goal(&self, draft: GoalDraft) -> Result<Goal> {
        self.goals.create(draft).await
    }

    pub async fn update_goal_progress(&self, goal_id: Uuid, delta: Decimal) -> Result<Goal> {
        self.goals.update_progress(goal_id, delta).await
    }

    pub async fn list_goals(&self) -> Result<Vec<Goal>> {
        self.goals.list_all().await
    }

    pub async fn list_goals_by_type(&self, goal_type: GoalType) -> Result<Vec<Goal>> {
        self.goals.list_by_type(goal_type).await
    }

    pub async fn run_auto_goal_rules(&self, profile: &HouseholdProfile) -> Result<Vec<Goal>> {
        self.auto_goals.execute_all(profile).await
    }

    pub async fn run_auto_goal_rules_as_of(
        &self,
        profile: &HouseholdProfile,
        today: NaiveDate,
    ) -> Result<Vec<Goal>> {
        self.auto_goals.execute_all_as_of(profile, today).await
    }

    // =============================
    // Surplus Allocation
    // =============================

    pub async fn allocate_surplus(&self, surplus: Decimal) -> Result<AllocationPlan> {
        self.allocate_surplus_as_of(surplus, Utc::now().date_naive()).await
    }

    /// Compute an allocation plan over current goals. Nothing is written.
    pub async fn allocate_surplus_as_of(
        &self,
        surplus: Decimal,
        today: NaiveDate,
    ) -> Result<AllocationPlan> {
        self.goals.policy().check_surplus(surplus)?;

        let goals = self.goals.list_all().await?;
        let plan = self.allocator.plan(&goals, surplus, today);

        info!(
            %surplus,
            funded = plan.allocations.len(),
            remaining = %plan.remaining_surplus,
            "Surplus allocated"
        );

        Ok(plan)
    }

    /// Apply each allocation as a progress update. Each goal is re-read
    /// right before its write.
    pub async fn apply_allocations(&self, plan: &AllocationPlan) -> Result<Vec<Goal>> {
        let mut updated = Vec::with_capacity(plan.allocations.len());
        for allocation in &plan.allocations {
            let goal = self
                .goals
                .update_progress(allocation.goal_id, allocation.amount)
                .await?;
            updated.push(goal);
        }

        debug!(applied = updated.len(), "Allocation plan applied");
        Ok(updated)
    }

    // =============================
    // Analytics & Recommendations
    // =============================

    pub fn analyze_portfolio(&self, investments: &[Investment]) -> PortfolioAnalysis {
        PortfolioAnalyzer::analyze(investments)
    }

    pub async fn analyze_stored_portfolio(&self) -> Result<PortfolioAnalysis> {
        let investments = self.store.list_investments().await?;
        Ok(PortfolioAnalyzer::analyze(&investments))
    }

    pub async fn cash_flow_summary(&self, today: NaiveDate) -> Result<CashFlowSummary> {
        let transactions = self.store.list_transactions().await?;
        Ok(CashFlowSummary::trailing_year(&transactions, today))
    }

    pub async fn generate_recommendations(
        &self,
        context: RecommendationContext,
    ) -> Result<Vec<Recommendation>> {
        self.generate_recommendations_as_of(context, Utc::now().date_naive())
            .await
    }

    /// A missing income figure is derived from the supplied one. Only when
    /// neither is supplied does the trailing year of transactions fill both.
    pub async fn generate_recommendations_as_of(
        &self,
        context: RecommendationContext,
        today: NaiveDate,
    ) -> Result<Vec<Recommendation>> {
        let context = self.resolve_income(context, today).await?;
        self.recommendations.generate(&context).await
    }

    async fn resolve_income(
        &self,
        mut context: RecommendationContext,
        today: NaiveDate,
    ) -> Result<RecommendationContext> {
        let months = Decimal::from(12);

        match (context.annual_income, context.monthly_income) {
            (Some(_), Some(_)) => {}
            (Some(annual), None) => {
                context.monthly_income = Some((annual / months).round_dp(2));
            }
            (None, Some(monthly)) => {
                let annual = monthly.checked_mul(months).ok_or_else(|| {
                    EngineError::Arithmetic(format!("overflow annualizing monthly income {}", monthly))
                })?;
                context.annual_income = Some(annual);
            }
            (None, None) => {
                let summary = self.cash_flow_summary(today).await?;
                if summary.total_income > Decimal::ZERO {
                    context.annual_income = Some(summary.annual_income());
                    context.monthly_income = Some(summary.monthly_income);
                }
            }
        }

        debug!(
            annual_income = ?context.annual_income,
            monthly_income = ?context.monthly_income,
            "Recommendation context resolved"
        );
        Ok(context)
    }
}
