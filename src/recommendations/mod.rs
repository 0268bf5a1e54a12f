//! Recommendation generator
//!
//! Independent sources each look at a read-only planning snapshot and emit
//! recommendations. A failing source is logged and skipped. Output is
//! ordered high > medium > low, keeping generation order within a priority.

use crate::analytics::{PortfolioAnalysis, PortfolioAnalyzer, MAX_CLASS_WEIGHT};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{
    Goal, GoalType, HouseholdProfile, InsuranceClass, InsurancePolicy, Investment, Loan, Priority,
    Recommendation, RecommendationType, RiskLevel,
};
use crate::state::RecordStore;
use crate::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const TERM_COVER_MULTIPLE: Decimal = dec!(10);
pub const HEALTH_COVER_MULTIPLE: Decimal = dec!(5);
/// Loans above this annual rate are prepayment candidates, percent
pub const PREPAYMENT_ROI_THRESHOLD: Decimal = dec!(8);

/// Caller-supplied income figures. Missing values are derived from
/// transactions by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationContext {
    pub annual_income: Option<Decimal>,
    pub monthly_income: Option<Decimal>,
}

impl RecommendationContext {
    /// Seed from the declared income on the household profile.
    pub fn from_profile(profile: &HouseholdProfile) -> Self {
        Self {
            annual_income: profile.annual_income,
            monthly_income: None,
        }
    }
}

/// Everything a source may read, loaded once per run
#[derive(Debug, Clone)]
pub struct PlanningSnapshot {
    pub investments: Vec<Investment>,
    pub goals: Vec<Goal>,
    pub policies: Vec<InsurancePolicy>,
    pub loans: Vec<Loan>,
    pub analysis: PortfolioAnalysis,
    pub annual_income: Option<Decimal>,
    pub monthly_income: Option<Decimal>,
}

/// Trait for a recommendation source
pub trait RecommendationSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>>;
}

#[allow(clippy::too_many_arguments)]
fn recommendation(
    recommendation_type: RecommendationType,
    priority: Priority,
    category: &str,
    title: String,
    description: String,
    impact: String,
    action_items: &[&str],
    confidence_score: u8,
) -> Recommendation {
    Recommendation {
        id: Uuid::new_v4(),
        recommendation_type,
        priority,
        title,
        description,
        impact,
        action_items: action_items.iter().map(|s| s.to_string()).collect(),
        confidence_score: confidence_score.min(100),
        category: category.to_string(),
        expected_return: None,
        risk_level: None,
        gap_amount: None,
    }
}

/// Overflow-checked sum of money amounts.
fn checked_total(amounts: impl IntoIterator<Item = Decimal>, what: &str) -> Result<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount)
            .ok_or_else(|| EngineError::Arithmetic(format!("overflow totalling {}", what)))
    })
}

fn risk_level_for(score: f64) -> RiskLevel {
    if score >= 7.0 {
        RiskLevel::High
    } else if score >= 4.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

//
// ================= Sources =================
//

/// Flags the heaviest class above the concentration limit.
pub struct ConcentrationSource;

impl RecommendationSource for ConcentrationSource {
    fn name(&self) -> &'static str {
        "portfolio_concentration"
    }

    fn generate(&self, snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>> {
        let Some((class, weight)) = snapshot.analysis.concentrated_classes().into_iter().next() else {
            return Ok(vec![]);
        };

        let mut rec = recommendation(
            RecommendationType::Portfolio,
            Priority::High,
            "rebalancing",
            format!("Reduce {} concentration", class),
            format!(
                "{} makes up {:.1}% of the portfolio, above the {:.0}% limit.",
                class, weight, MAX_CLASS_WEIGHT
            ),
            "Limits drawdown from a single asset class".to_string(),
            &[
                "Direct new investments to under-weight asset classes",
                "Book partial gains in the concentrated class",
                "Review target allocation once a year",
            ],
            85,
        );
        rec.expected_return = Some(snapshot.analysis.expected_return);
        rec.risk_level = Some(RiskLevel::High);
        Ok(vec![rec])
    }
}

pub struct TaxOptimizationSource;

impl RecommendationSource for TaxOptimizationSource {
    fn name(&self) -> &'static str {
        "tax_optimization"
    }

    fn generate(&self, _snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>> {
        Ok(vec![recommendation(
            RecommendationType::Tax,
            Priority::Medium,
            "tax",
            "Optimize taxes on investments".to_string(),
            "Harvest capital losses against gains and use tax-advantaged accounts before the fiscal year closes.".to_string(),
            "Lower tax outgo raises post-tax returns".to_string(),
            &[
                "Offset realised gains with unrealised losses before 31 March",
                "Use the full PPF and ELSS limits",
                "Claim the additional NPS Tier-1 deduction",
            ],
            75,
        )])
    }
}

pub struct RiskManagementSource;

impl RecommendationSource for RiskManagementSource {
    fn name(&self) -> &'static str {
        "risk_management"
    }

    fn generate(&self, snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>> {
        if snapshot.investments.is_empty() {
            return Ok(vec![]);
        }

        let mut rec = recommendation(
            RecommendationType::Risk,
            Priority::High,
            "risk_management",
            "Review insurance and emergency fund".to_string(),
            format!(
                "Portfolio risk score is {:.1} of 10. Make sure adequate cover and liquid reserves back these investments.",
                snapshot.analysis.risk_score
            ),
            "Avoids forced selling during emergencies".to_string(),
            &[
                "Keep six months of expenses in liquid funds",
                "Confirm term and health cover are adequate",
            ],
            80,
        );
        rec.risk_level = Some(risk_level_for(snapshot.analysis.risk_score));
        Ok(vec![rec])
    }
}

pub struct GoalAlignmentSource;

impl RecommendationSource for GoalAlignmentSource {
    fn name(&self) -> &'static str {
        "goal_alignment"
    }

    fn generate(&self, snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>> {
        if snapshot.goals.is_empty() {
            return Ok(vec![]);
        }

        let total_target = checked_total(snapshot.goals.iter().map(|g| g.target_amount), "goal targets")?;
        let total_saved = checked_total(snapshot.goals.iter().map(|g| g.current_amount), "goal progress")?;
        let near_term = snapshot
            .goals
            .iter()
            .filter(|g| matches!(g.goal_type, GoalType::Micro | GoalType::Small | GoalType::Short))
            .count();
        let progress = if total_target > Decimal::ZERO {
            total_saved
                .checked_div(total_target)
                .and_then(|share| share.to_f64())
                .unwrap_or(0.0)
                * 100.0
        } else {
            0.0
        };

        Ok(vec![recommendation(
            RecommendationType::Goal,
            Priority::Medium,
            "goal_planning",
            "Match investments to goal horizons".to_string(),
            format!(
                "{} goal(s) need {} in total with {} saved ({:.1}%). {} of them are near-term.",
                snapshot.goals.len(),
                total_target.round_dp(0),
                total_saved.round_dp(0),
                progress,
                near_term
            ),
            "Keeps near-term goals safe from market swings".to_string(),
            &[
                "Fund goals due within 3 years from debt or liquid funds",
                "Use equity for goals 5 or more years away",
                "Shift long-goal money to debt as the deadline nears",
            ],
            70,
        )])
    }
}

/// Cover gaps against income multiples, one item per missing cover type.
pub fn insurance_gap_analysis(
    annual_income: Decimal,
    policies: &[InsurancePolicy],
) -> Result<Vec<Recommendation>> {
    let checks = [
        (InsuranceClass::Term, TERM_COVER_MULTIPLE, "term life"),
        (InsuranceClass::Health, HEALTH_COVER_MULTIPLE, "health"),
    ];

    let mut recs = Vec::new();
    for (class, multiple, label) in checks {
        let covered = checked_total(
            policies.iter().filter(|p| p.class == class).map(|p| p.sum_insured),
            "sum insured",
        )?;
        let target = annual_income.checked_mul(multiple).ok_or_else(|| {
            EngineError::Arithmetic(format!("overflow computing {} cover for income {}", label, annual_income))
        })?;
        let gap = target.checked_sub(covered).ok_or_else(|| {
            EngineError::Arithmetic(format!("overflow computing {} cover gap", label))
        })?;
        if gap <= Decimal::ZERO {
            continue;
        }

        let mut rec = recommendation(
            RecommendationType::Risk,
            Priority::High,
            "insurance",
            format!("Increase {} cover", label),
            format!(
                "Recommended {} cover is {}x annual income ({}); current cover is {}.",
                label,
                multiple,
                target.round_dp(0),
                covered.round_dp(0)
            ),
            format!("Closes a protection gap of {}", gap.round_dp(0)),
            &[
                "Compare premiums across insurers",
                "Buy cover before the next birthday to lock in rates",
            ],
            90,
        );
        rec.gap_amount = Some(gap);
        rec.risk_level = Some(RiskLevel::High);
        recs.push(rec);
    }
    Ok(recs)
}

pub struct InsuranceGapSource;

impl RecommendationSource for InsuranceGapSource {
    fn name(&self) -> &'static str {
        "insurance_gap"
    }

    fn generate(&self, snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>> {
        match snapshot.annual_income {
            Some(income) if income > Decimal::ZERO => {
                insurance_gap_analysis(income, &snapshot.policies)
            }
            _ => Ok(vec![]),
        }
    }
}

pub struct LoanStressSource {
    pub debt_stress_ratio: Decimal,
    pub prepayment_materiality: Decimal,
}

impl LoanStressSource {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            debt_stress_ratio: config.debt_stress_ratio,
            prepayment_materiality: config.prepayment_materiality,
        }
    }

    /// Simple interest over the full tenure on the outstanding balance.
    pub fn prepayment_savings(loan: &Loan) -> Result<Decimal> {
        let years = Decimal::from(loan.tenure_months) / Decimal::from(12);
        loan.outstanding
            .checked_mul(loan.roi / Decimal::ONE_HUNDRED)
            .and_then(|interest| interest.checked_mul(years))
            .ok_or_else(|| {
                EngineError::Arithmetic(format!(
                    "overflow computing interest on {} at {}%",
                    loan.outstanding, loan.roi
                ))
            })
    }
}

impl RecommendationSource for LoanStressSource {
    fn name(&self) -> &'static str {
        "loan_stress"
    }

    fn generate(&self, snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>> {
        let active: Vec<&Loan> = snapshot.loans.iter().filter(|l| l.is_active).collect();
        let mut recs = Vec::new();

        let total_emi = checked_total(active.iter().map(|l| l.emi), "EMIs")?;
        if let Some(monthly_income) = snapshot.monthly_income.filter(|m| *m > Decimal::ZERO) {
            let ratio = total_emi.checked_div(monthly_income).ok_or_else(|| {
                EngineError::Arithmetic(format!("overflow dividing EMIs {} by income {}", total_emi, monthly_income))
            })?;
            if ratio > self.debt_stress_ratio {
                let mut rec = recommendation(
                    RecommendationType::CashFlow,
                    Priority::High,
                    "debt",
                    "Reduce debt burden".to_string(),
                    format!(
                        "EMIs take {:.1}% of monthly income, above the {:.0}% comfort limit.",
                        ratio.to_f64().unwrap_or(0.0) * 100.0,
                        self.debt_stress_ratio.to_f64().unwrap_or(0.0) * 100.0
                    ),
                    "Frees monthly cash flow for goals".to_string(),
                    &[
                        "Avoid taking new loans",
                        "Consolidate high-rate debt",
                        "Direct bonuses to loan prepayment",
                    ],
                    85,
                );
                rec.risk_level = Some(RiskLevel::High);
                recs.push(rec);
            }
        }

        for loan in active.iter().filter(|l| l.roi > PREPAYMENT_ROI_THRESHOLD) {
            let savings = Self::prepayment_savings(loan)?;
            if savings <= self.prepayment_materiality {
                continue;
            }

            let mut rec = recommendation(
                RecommendationType::CashFlow,
                Priority::Medium,
                "debt",
                format!("Prepay {} loan", loan.kind),
                format!(
                    "The loan charges {}% on {} outstanding. Prepaying could save about {} in interest.",
                    loan.roi,
                    loan.outstanding.round_dp(0),
                    savings.round_dp(0)
                ),
                format!("Interest saving of about {}", savings.round_dp(0)),
                &[
                    "Prepay from surplus after emergency fund is in place",
                    "Ask the lender to reduce tenure rather than EMI",
                ],
                70,
            );
            rec.expected_return = loan.roi.to_f64();
            recs.push(rec);
        }

        Ok(recs)
    }
}

/// The standard sources, in generation order.
pub fn create_default_sources(config: &EngineConfig) -> Vec<Box<dyn RecommendationSource>> {
    vec![
        Box::new(ConcentrationSource),
        Box::new(TaxOptimizationSource),
        Box::new(RiskManagementSource),
        Box::new(GoalAlignmentSource),
        Box::new(InsuranceGapSource),
        Box::new(LoanStressSource::new(config)),
    ]
}

//
// ================= Generator =================
//

pub struct RecommendationGenerator {
    sources: Vec<Box<dyn RecommendationSource>>,
    store: Arc<dyn RecordStore>,
}

impl RecommendationGenerator {
    pub fn new(store: Arc<dyn RecordStore>, config: &EngineConfig) -> Self {
        Self::with_sources(store, create_default_sources(config))
    }

    pub fn with_sources(store: Arc<dyn RecordStore>, sources: Vec<Box<dyn RecommendationSource>>) -> Self {
        Self { sources, store }
    }

    pub async fn load_snapshot(&self, context: &RecommendationContext) -> Result<PlanningSnapshot> {
        let investments = self.store.list_investments().await?;
        let goals = self.store.list_goals().await?;
        let policies = self.store.list_policies().await?;
        let loans = self.store.list_loans().await?;
        let analysis = PortfolioAnalyzer::analyze(&investments);

        Ok(PlanningSnapshot {
            investments,
            goals,
            policies,
            loans,
            analysis,
            annual_income: context.annual_income,
            monthly_income: context.monthly_income,
        })
    }

    pub async fn generate(&self, context: &RecommendationContext) -> Result<Vec<Recommendation>> {
        let snapshot = self.load_snapshot(context).await?;
        Ok(self.generate_from(&snapshot))
    }

    /// Run every source over a snapshot and order by priority.
    pub fn generate_from(&self, snapshot: &PlanningSnapshot) -> Vec<Recommendation> {
        let mut recs = Vec::new();

        for source in &self.sources {
            match source.generate(snapshot) {
                Ok(items) => recs.extend(items),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Recommendation source failed");
                }
            }
        }

        // stable: ties keep generation order
        recs.sort_by_key(|r| Reverse(r.priority.rank()));

        info!(
            source_count = self.sources.len(),
            recommendations = recs.len(),
            "Recommendations generated"
        );

        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvestmentClass, LoanKind};
    use crate::state::InMemoryRecordStore;
    use chrono::{NaiveDate, Utc};

    fn snapshot() -> PlanningSnapshot {
        PlanningSnapshot {
            investments: vec![],
            goals: vec![],
            policies: vec![],
            loans: vec![],
            analysis: PortfolioAnalysis::empty(),
            annual_income: None,
            monthly_income: None,
        }
    }

    fn policy(class: InsuranceClass, sum_insured: Decimal) -> InsurancePolicy {
        InsurancePolicy {
            id: Uuid::new_v4(),
            class,
            sum_insured,
            provider: "Acme Life".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2044, 1, 1).unwrap(),
        }
    }

    fn loan(roi: Decimal, emi: Decimal, outstanding: Decimal, tenure_months: u32, active: bool) -> Loan {
        Loan {
            id: Uuid::new_v4(),
            kind: LoanKind::Personal,
            principal: outstanding,
            roi,
            tenure_months,
            emi,
            outstanding,
            is_active: active,
        }
    }

    fn equity(value: Decimal) -> Investment {
        Investment {
            id: Uuid::new_v4(),
            class: InvestmentClass::Equity,
            name: "Index fund".to_string(),
            invested_value: value,
            current_value: value,
        }
    }

    struct BrokenSource;

    impl RecommendationSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn generate(&self, _snapshot: &PlanningSnapshot) -> Result<Vec<Recommendation>> {
            Err(EngineError::InsufficientData("nothing to see".to_string()))
        }
    }

    #[test]
    fn test_term_gap_with_no_policies() {
        let recs = insurance_gap_analysis(dec!(1000000), &[]).unwrap();
        assert_eq!(recs.len(), 2);

        let term = &recs[0];
        assert_eq!(term.priority, Priority::High);
        assert_eq!(term.category, "insurance");
        assert_eq!(term.gap_amount, Some(dec!(10000000)));

        let health = &recs[1];
        assert_eq!(health.gap_amount, Some(dec!(5000000)));
    }

    #[test]
    fn test_no_gap_when_covered() {
        let policies = vec![
            policy(InsuranceClass::Term, dec!(6000000)),
            policy(InsuranceClass::Term, dec!(4000000)),
            policy(InsuranceClass::Health, dec!(1000000)),
            policy(InsuranceClass::Vehicle, dec!(9000000)),
        ];
        let recs = insurance_gap_analysis(dec!(1000000), &policies).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].gap_amount, Some(dec!(4000000)));
    }

    #[test]
    fn test_debt_stress_and_prepayment() {
        let mut snap = snapshot();
        snap.monthly_income = Some(dec!(100000));
        snap.loans = vec![
            loan(dec!(10.5), dec!(30000), dec!(800000), 60, true),
            loan(dec!(7.0), dec!(15000), dec!(2000000), 180, true),
            loan(dec!(14.0), dec!(90000), dec!(500000), 12, false),
        ];

        let source = LoanStressSource::new(&EngineConfig::default());
        let recs = source.generate(&snap).unwrap();

        // 45000 / 100000 = 45% > 40%
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].recommendation_type, RecommendationType::CashFlow);
        assert_eq!(recs[1].priority, Priority::Medium);
        assert_eq!(recs[1].title, "Prepay personal loan");
    }

    #[test]
    fn test_prepayment_savings_formula() {
        let l = loan(dec!(12), dec!(10000), dec!(100000), 24, true);
        // 100000 * 0.12 * 2
        assert_eq!(LoanStressSource::prepayment_savings(&l).unwrap(), dec!(24000));
    }

    #[test]
    fn test_debt_stress_at_limit_does_not_fire() {
        let mut snap = snapshot();
        snap.monthly_income = Some(dec!(100000));
        snap.loans = vec![loan(dec!(7.0), dec!(40000), dec!(900000), 36, true)];

        // exactly 40%
        let recs = LoanStressSource::new(&EngineConfig::default()).generate(&snap).unwrap();
        assert!(recs.is_empty());

        snap.loans[0].emi = dec!(40001);
        let recs = LoanStressSource::new(&EngineConfig::default()).generate(&snap).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Reduce debt burden");
    }

    #[test]
    fn test_debt_stress_needs_monthly_income() {
        let mut snap = snapshot();
        snap.annual_income = Some(dec!(600000));
        snap.loans = vec![loan(dec!(7.0), dec!(90000), dec!(900000), 36, true)];

        let recs = LoanStressSource::new(&EngineConfig::default()).generate(&snap).unwrap();
        assert!(!recs.iter().any(|r| r.priority == Priority::High));

        snap.monthly_income = Some(Decimal::ZERO);
        let recs = LoanStressSource::new(&EngineConfig::default()).generate(&snap).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_overflowing_income_is_isolated() {
        let store = Arc::new(InMemoryRecordStore::new());
        let generator = RecommendationGenerator::with_sources(
            store,
            vec![Box::new(InsuranceGapSource), Box::new(TaxOptimizationSource)],
        );

        let mut snap = snapshot();
        snap.annual_income = Some(Decimal::MAX);

        let err = insurance_gap_analysis(Decimal::MAX, &[]).unwrap_err();
        assert!(matches!(err, EngineError::Arithmetic(_)));

        let recs = generator.generate_from(&snap);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommendation_type, RecommendationType::Tax);
    }

    #[test]
    fn test_immaterial_prepayment_skipped() {
        let mut snap = snapshot();
        snap.loans = vec![loan(dec!(9), dec!(1000), dec!(10000), 12, true)];
        let recs = LoanStressSource::new(&EngineConfig::default()).generate(&snap).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_sort_is_stable_by_priority() {
        let store = Arc::new(InMemoryRecordStore::new());
        let generator = RecommendationGenerator::new(store, &EngineConfig::default());

        let mut snap = snapshot();
        snap.investments = vec![equity(dec!(100000))];
        snap.analysis = PortfolioAnalyzer::analyze(&snap.investments);
        snap.annual_income = Some(dec!(1200000));

        let recs = generator.generate_from(&snap);
        let ranks: Vec<u8> = recs.iter().map(|r| r.priority.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ranks, sorted);

        // concentration, risk, term gap, health gap, then tax
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles[0], "Reduce Equity concentration");
        assert_eq!(titles[1], "Review insurance and emergency fund");
        assert_eq!(titles[2], "Increase term life cover");
        assert_eq!(titles[3], "Increase health cover");
        assert_eq!(titles[4], "Optimize taxes on investments");
    }

    #[test]
    fn test_failing_source_is_isolated() {
        let store = Arc::new(InMemoryRecordStore::new());
        let generator = RecommendationGenerator::with_sources(
            store,
            vec![Box::new(BrokenSource), Box::new(TaxOptimizationSource)],
        );
        let recs = generator.generate_from(&snapshot());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommendation_type, RecommendationType::Tax);
    }

    #[tokio::test]
    async fn test_generate_reads_store() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.add_investment(equity(dec!(50000))).await.unwrap();
        store
            .add_goal(Goal {
                id: Uuid::new_v4(),
                slug: "house-long".to_string(),
                name: "House".to_string(),
                goal_type: GoalType::Long,
                target_amount: dec!(2000000),
                current_amount: dec!(500000),
                target_date: NaiveDate::from_ymd_opt(2035, 1, 1).unwrap(),
                notes: String::new(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let generator = RecommendationGenerator::new(store, &EngineConfig::default());
        let recs = generator
            .generate(&RecommendationContext::default())
            .await
            .unwrap();

        let types: Vec<RecommendationType> = recs.iter().map(|r| r.recommendation_type).collect();
        assert!(types.contains(&RecommendationType::Portfolio));
        assert!(types.contains(&RecommendationType::Goal));
        assert!(types.contains(&RecommendationType::Tax));
        assert!(!recs.iter().any(|r| r.category == "insurance"));
    }
}
