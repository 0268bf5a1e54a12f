//! Auto-goal rule engine
//!
//! Rules inspect household records and propose goals. The engine creates
//! a proposed goal only when no goal with the same slug exists, so running
//! the rules again over unchanged data creates nothing.

use crate::error::EngineError;
use crate::goals::{slugify, GoalManager};
use crate::models::{
    Goal, GoalDraft, GoalType, HouseholdProfile, InvestmentClass, Investment, Relation,
    Transaction,
};
use crate::state::RecordStore;
use crate::Result;
use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Corpus needed when a child turns 18.
pub const EDUCATION_FUTURE_CORPUS: Decimal = dec!(2500000);
pub const EDUCATION_INFLATION: Decimal = dec!(0.07);
pub const EDUCATION_AGE: u32 = 18;

/// Already adjusted for 10% medical inflation over the horizon.
pub const SENIOR_MEDICAL_CORPUS: Decimal = dec!(500000);
pub const SENIOR_MEDICAL_HORIZON_YEARS: u32 = 2;
pub const SENIOR_AGE_THRESHOLD: u32 = 60;

/// Inputs every rule sees for one run
pub struct RuleContext<'a> {
    pub today: NaiveDate,
    pub profile: &'a HouseholdProfile,
    pub transactions: &'a [Transaction],
    pub investments: &'a [Investment],
}

/// Trait for a single auto-goal rule (pure, no store access)
pub trait AutoGoalRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<GoalDraft>>;
}

//
// ================= Arithmetic =================
//

/// `amount * (1 + rate)^years`, rounded to paise.
pub fn compound(amount: Decimal, rate: Decimal, years: u32) -> Result<Decimal> {
    amount
        .checked_mul(growth_factor(rate, years)?)
        .map(|v| v.round_dp(2))
        .ok_or_else(|| EngineError::Arithmetic(format!("overflow compounding {} at {}", amount, rate)))
}

/// `future / (1 + rate)^years`, rounded to paise.
pub fn discount(future: Decimal, rate: Decimal, years: u32) -> Result<Decimal> {
    let factor = growth_factor(rate, years)?;
    future
        .checked_div(factor)
        .map(|v| v.round_dp(2))
        .ok_or_else(|| EngineError::Arithmetic(format!("cannot discount {} by {}", future, factor)))
}

fn growth_factor(rate: Decimal, years: u32) -> Result<Decimal> {
    let step = Decimal::ONE + rate;
    (0..years).try_fold(Decimal::ONE, |acc, _| {
        acc.checked_mul(step)
            .ok_or_else(|| EngineError::Arithmetic(format!("overflow compounding {} over {} years", rate, years)))
    })
}

fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(years * 12))
        .ok_or_else(|| EngineError::Arithmetic(format!("date overflow adding {} years to {}", years, date)))
}

//
// ================= Insurance Premium Rule =================
//

const INSURANCE_KEYWORD: &str = "insurance";

struct PremiumPool {
    label: &'static str,
    keywords: &'static [&'static str],
    goal_type: GoalType,
    horizon_years: u32,
    annual_inflation: Decimal,
}

const PREMIUM_POOLS: &[PremiumPool] = &[
    PremiumPool {
        label: "Health",
        keywords: &["health", "healthcare", "medical", "mediclaim"],
        goal_type: GoalType::Medium,
        horizon_years: 3,
        annual_inflation: dec!(0.05),
    },
    PremiumPool {
        label: "Vehicle",
        keywords: &["vehicle", "motor", "car", "bike", "two wheeler"],
        goal_type: GoalType::Short,
        horizon_years: 1,
        annual_inflation: dec!(0.03),
    },
];

/// Health and vehicle premiums seen in transactions become renewal goals.
pub struct InsurancePremiumRule;

/// Lowercased words of a category, split on anything not alphanumeric.
fn category_words(category: &str) -> Vec<String> {
    category
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whole-word match; multi-word keywords must appear as consecutive words.
fn mentions(words: &[String], keyword: &str) -> bool {
    let needle: Vec<&str> = keyword.split_whitespace().collect();
    words
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(w, n)| w == n))
}

impl InsurancePremiumRule {
    /// Most recent expense whose category names insurance and one of the
    /// pool's keywords.
    fn latest_premium<'t>(pool: &PremiumPool, transactions: &'t [Transaction]) -> Option<&'t Transaction> {
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .filter(|t| {
                let words = category_words(&t.category);
                mentions(&words, INSURANCE_KEYWORD)
                    && pool.keywords.iter().any(|kw| mentions(&words, kw))
            })
            .max_by_key(|t| t.date)
    }
}

impl AutoGoalRule for InsurancePremiumRule {
    fn name(&self) -> &'static str {
        "insurance_premium"
    }

    fn description(&self) -> &'static str {
        "Plan for health and vehicle insurance renewals from detected premiums"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<GoalDraft>> {
        let mut drafts = Vec::new();

        for pool in PREMIUM_POOLS {
            let Some(txn) = Self::latest_premium(pool, ctx.transactions) else {
                continue;
            };

            let premium = txn.amount.abs();
            let target = compound(premium, pool.annual_inflation, pool.horizon_years)?;

            drafts.push(GoalDraft {
                name: format!("{} Insurance Premium", pool.label),
                goal_type: pool.goal_type,
                target_amount: target,
                target_date: add_years(ctx.today, pool.horizon_years)?,
                notes: format!(
                    "Premium of {} paid on {}, inflated {}% a year for {} year(s)",
                    premium,
                    txn.date,
                    pool.annual_inflation * Decimal::ONE_HUNDRED,
                    pool.horizon_years
                ),
            });
        }

        Ok(drafts)
    }
}

//
// ================= Child Education Rule =================
//

/// Every child under 18 gets an education fund due on their 18th birthday.
pub struct ChildEducationRule;

impl AutoGoalRule for ChildEducationRule {
    fn name(&self) -> &'static str {
        "child_education"
    }

    fn description(&self) -> &'static str {
        "Education corpus for each child dependent under 18"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<GoalDraft>> {
        let mut drafts = Vec::new();

        for child in ctx
            .profile
            .dependents
            .iter()
            .filter(|d| d.relation == Relation::Child)
        {
            let age = child.age_on(ctx.today);
            let years_to_education = EDUCATION_AGE.saturating_sub(age);
            if years_to_education == 0 {
                continue;
            }

            let target = discount(EDUCATION_FUTURE_CORPUS, EDUCATION_INFLATION, years_to_education)?;

            drafts.push(GoalDraft {
                name: format!("{} Education Fund", child.name),
                goal_type: GoalType::Long,
                target_amount: target,
                target_date: add_years(child.date_of_birth, EDUCATION_AGE)?,
                notes: format!(
                    "Present value of {} needed in {} year(s) at 7% education inflation",
                    EDUCATION_FUTURE_CORPUS, years_to_education
                ),
            });
        }

        Ok(drafts)
    }
}

//
// ================= Tax Instrument Rule =================
//

struct TaxInstrument {
    class: InvestmentClass,
    goal_name: &'static str,
    annual_cap: Decimal,
}

const TAX_INSTRUMENTS: &[TaxInstrument] = &[
    TaxInstrument {
        class: InvestmentClass::Ppf,
        goal_name: "PPF Annual Contribution",
        annual_cap: dec!(150000),
    },
    TaxInstrument {
        class: InvestmentClass::NpsTier1,
        goal_name: "NPS Tier-1 Annual Contribution",
        annual_cap: dec!(50000),
    },
];

/// Contributions for the fiscal year close on 31 March.
pub fn next_tax_deadline(today: NaiveDate) -> NaiveDate {
    let this_year = NaiveDate::from_ymd_opt(today.year(), 3, 31).unwrap_or(today);
    if today <= this_year {
        this_year
    } else {
        NaiveDate::from_ymd_opt(today.year() + 1, 3, 31).unwrap_or(today)
    }
}

/// Held tax-saving instruments get a goal for the statutory annual cap.
pub struct TaxInstrumentRule;

impl AutoGoalRule for TaxInstrumentRule {
    fn name(&self) -> &'static str {
        "tax_instrument"
    }

    fn description(&self) -> &'static str {
        "Fill the annual cap of held tax-advantaged instruments before the fiscal deadline"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<GoalDraft>> {
        let held: BTreeSet<InvestmentClass> = ctx.investments.iter().map(|i| i.class).collect();
        let deadline = next_tax_deadline(ctx.today);

        Ok(TAX_INSTRUMENTS
            .iter()
            .filter(|instrument| held.contains(&instrument.class))
            .map(|instrument| GoalDraft {
                name: instrument.goal_name.to_string(),
                goal_type: GoalType::Short,
                target_amount: instrument.annual_cap,
                target_date: deadline,
                notes: format!(
                    "Statutory annual limit for {} contributions",
                    instrument.class
                ),
            })
            .collect())
    }
}

//
// ================= Senior Medical Rule =================
//

/// Elder dependents over 60 get a medical corpus.
pub struct SeniorMedicalRule;

impl AutoGoalRule for SeniorMedicalRule {
    fn name(&self) -> &'static str {
        "senior_medical"
    }

    fn description(&self) -> &'static str {
        "Medical corpus for elder dependents above 60"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<GoalDraft>> {
        let mut drafts = Vec::new();

        for senior in ctx
            .profile
            .dependents
            .iter()
            .filter(|d| d.relation.is_elder() && d.age_on(ctx.today) > SENIOR_AGE_THRESHOLD)
        {
            drafts.push(GoalDraft {
                name: format!("{} Senior Medical Corpus", senior.name),
                goal_type: GoalType::Medium,
                target_amount: SENIOR_MEDICAL_CORPUS,
                target_date: add_years(ctx.today, SENIOR_MEDICAL_HORIZON_YEARS)?,
                notes: "Includes 10% annual medical inflation over the horizon".to_string(),
            });
        }

        Ok(drafts)
    }
}

/// The four standard rules, in evaluation order.
pub fn create_default_rules() -> Vec<Box<dyn AutoGoalRule>> {
    vec![
        Box::new(InsurancePremiumRule),
        Box::new(ChildEducationRule),
        Box::new(TaxInstrumentRule),
        Box::new(SeniorMedicalRule),
    ]
}

//
// ================= Engine =================
//

pub struct AutoGoalEngine {
    rules: Vec<Box<dyn AutoGoalRule>>,
    goals: Arc<GoalManager>,
    store: Arc<dyn RecordStore>,
}

impl AutoGoalEngine {
    pub fn new(goals: Arc<GoalManager>, store: Arc<dyn RecordStore>) -> Self {
        Self::with_rules(goals, store, create_default_rules())
    }

    pub fn with_rules(
        goals: Arc<GoalManager>,
        store: Arc<dyn RecordStore>,
        rules: Vec<Box<dyn AutoGoalRule>>,
    ) -> Self {
        Self { rules, goals, store }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub async fn execute_all(&self, profile: &HouseholdProfile) -> Result<Vec<Goal>> {
        self.execute_all_as_of(profile, Utc::now().date_naive()).await
    }

    /// Run every rule and return the goals created by this run.
    ///
    /// A failing rule or goal creation is logged and skipped. The slug check
    /// is read-then-create; concurrent callers rely on the store's slug
    /// uniqueness, which surfaces here as `DuplicateSlug` and is skipped too.
    pub async fn execute_all_as_of(
        &self,
        profile: &HouseholdProfile,
        today: NaiveDate,
    ) -> Result<Vec<Goal>> {
        let transactions = self.store.list_transactions().await?;
        let investments = self.store.list_investments().await?;

        let ctx = RuleContext {
            today,
            profile,
            transactions: &transactions,
            investments: &investments,
        };

        let mut created = Vec::new();

        for rule in &self.rules {
            let drafts = match rule.evaluate(&ctx) {
                Ok(drafts) => drafts,
                Err(e) => {
                    warn!(rule = rule.name(), error = %e, "Auto-goal rule failed");
                    continue;
                }
            };

            debug!(rule = rule.name(), proposals = drafts.len(), "Rule evaluated");

            for draft in drafts {
                if let Some(goal) = self.create_if_absent(rule.name(), draft, today).await {
                    created.push(goal);
                }
            }
        }

        info!(
            rule_count = self.rules.len(),
            created = created.len(),
            "Auto-goal rules executed"
        );

        Ok(created)
    }

    async fn create_if_absent(&self, rule: &'static str, draft: GoalDraft, today: NaiveDate) -> Option<Goal> {
        let slug = slugify(&draft.name, draft.goal_type);

        match self.goals.find_by_slug(&slug).await {
            Ok(Some(_)) => {
                debug!(rule, %slug, "Goal already exists");
                return None;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(rule, %slug, error = %e, "Slug lookup failed");
                return None;
            }
        }

        match self.goals.create_as_of(draft, today).await {
            Ok(goal) => Some(goal),
            Err(EngineError::DuplicateSlug(slug)) => {
                debug!(rule, %slug, "Goal created concurrently");
                None
            }
            Err(e) => {
                warn!(rule, %slug, error = %e, "Auto-goal creation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dependent;
    use crate::state::InMemoryRecordStore;
    use rust_decimal::prelude::ToPrimitive;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dependent(relation: Relation, name: &str, dob: NaiveDate) -> Dependent {
        Dependent {
            id: Uuid::new_v4(),
            relation,
            name: name.to_string(),
            date_of_birth: dob,
        }
    }

    fn txn(date: NaiveDate, amount: Decimal, category: &str, note: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date,
            amount,
            category: category.to_string(),
            note: note.to_string(),
        }
    }

    fn investment(class: InvestmentClass) -> Investment {
        Investment {
            id: Uuid::new_v4(),
            class,
            name: class.label().to_string(),
            invested_value: dec!(10000),
            current_value: dec!(10000),
        }
    }

    fn engine(store: Arc<InMemoryRecordStore>) -> AutoGoalEngine {
        let goals = Arc::new(GoalManager::new(store.clone()));
        AutoGoalEngine::new(goals, store)
    }

    struct FailingRule;

    impl AutoGoalRule for FailingRule {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn description(&self) -> &'static str {
            "always fails"
        }

        fn evaluate(&self, _ctx: &RuleContext<'_>) -> Result<Vec<GoalDraft>> {
            Err(EngineError::Arithmetic("boom".to_string()))
        }
    }

    #[test]
    fn test_education_present_value_eight_years() {
        let today = date(2026, 10, 19);
        let profile = HouseholdProfile {
            dependents: vec![dependent(Relation::Child, "Asha", date(2016, 10, 19))],
            annual_income: None,
        };
        let ctx = RuleContext {
            today,
            profile: &profile,
            transactions: &[],
            investments: &[],
        };

        let drafts = ChildEducationRule.evaluate(&ctx).unwrap();
        assert_eq!(drafts.len(), 1);

        let expected = 2_500_000.0 / 1.07f64.powi(8);
        let actual = drafts[0].target_amount.to_f64().unwrap();
        assert!((actual - expected).abs() < 0.01, "{} vs {}", actual, expected);
        assert_eq!(drafts[0].target_date, date(2034, 10, 19));
        assert_eq!(drafts[0].goal_type, GoalType::Long);
    }

    #[test]
    fn test_adult_child_gets_no_goal() {
        let profile = HouseholdProfile {
            dependents: vec![dependent(Relation::Child, "Ravi", date(2000, 1, 1))],
            annual_income: None,
        };
        let ctx = RuleContext {
            today: date(2026, 10, 19),
            profile: &profile,
            transactions: &[],
            investments: &[],
        };
        assert!(ChildEducationRule.evaluate(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_premium_uses_latest_and_inflates() {
        let txns = vec![
            txn(date(2025, 4, 1), dec!(-18000), "Insurance", "Health policy renewal"),
            txn(date(2026, 4, 1), dec!(-20000), "Health Insurance", ""),
            txn(date(2026, 5, 1), dec!(-8000), "Insurance - Car", ""),
            txn(date(2026, 5, 2), dec!(-999), "Groceries", "car wash"),
        ];
        let profile = HouseholdProfile::default();
        let ctx = RuleContext {
            today: date(2026, 10, 19),
            profile: &profile,
            transactions: &txns,
            investments: &[],
        };

        let drafts = InsurancePremiumRule.evaluate(&ctx).unwrap();
        assert_eq!(drafts.len(), 2);

        let health = &drafts[0];
        assert_eq!(health.goal_type, GoalType::Medium);
        // 20000 * 1.05^3
        assert_eq!(health.target_amount, dec!(23152.50));
        assert_eq!(health.target_date, date(2029, 10, 19));

        let vehicle = &drafts[1];
        assert_eq!(vehicle.goal_type, GoalType::Short);
        assert_eq!(vehicle.target_amount, dec!(8240.00));
        assert_eq!(vehicle.target_date, date(2027, 10, 19));
    }

    #[test]
    fn test_compound_overflow_is_an_error() {
        assert_eq!(compound(dec!(1000), dec!(0.10), 2).unwrap(), dec!(1210.00));
        let err = compound(Decimal::MAX, dec!(0.05), 1).unwrap_err();
        assert!(matches!(err, EngineError::Arithmetic(_)));
    }

    #[test]
    fn test_premium_keywords_match_whole_category_words() {
        let txns = vec![
            txn(date(2026, 6, 1), dec!(-15000), "Health Insurance", "paid by credit card"),
            txn(date(2026, 7, 1), dec!(-15000), "Healthcare Insurance", ""),
            txn(date(2026, 7, 2), dec!(-4000), "Two Wheeler Insurance", ""),
        ];
        let profile = HouseholdProfile::default();
        let ctx = RuleContext {
            today: date(2026, 10, 19),
            profile: &profile,
            transactions: &txns,
            investments: &[],
        };

        let drafts = InsurancePremiumRule.evaluate(&ctx).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Health Insurance Premium");
        // 15000 * 1.05^3
        assert_eq!(drafts[0].target_amount, dec!(17364.38));
        assert_eq!(drafts[1].name, "Vehicle Insurance Premium");
        assert_eq!(drafts[1].target_amount, dec!(4120.00));
    }

    #[test]
    fn test_card_and_healthcare_are_not_vehicle_premiums() {
        let txns = vec![
            txn(date(2026, 6, 1), dec!(-15000), "Health Insurance", "paid by credit card"),
            txn(date(2026, 7, 1), dec!(-15000), "Healthcare Insurance", ""),
        ];
        let profile = HouseholdProfile::default();
        let ctx = RuleContext {
            today: date(2026, 10, 19),
            profile: &profile,
            transactions: &txns,
            investments: &[],
        };

        let drafts = InsurancePremiumRule.evaluate(&ctx).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].goal_type, GoalType::Medium);
    }

    #[test]
    fn test_tax_deadline_rolls_over() {
        assert_eq!(next_tax_deadline(date(2026, 2, 10)), date(2026, 3, 31));
        assert_eq!(next_tax_deadline(date(2026, 3, 31)), date(2026, 3, 31));
        assert_eq!(next_tax_deadline(date(2026, 10, 19)), date(2027, 3, 31));
    }

    #[test]
    fn test_tax_rule_one_goal_per_instrument() {
        let investments = vec![
            investment(InvestmentClass::Ppf),
            investment(InvestmentClass::Ppf),
            investment(InvestmentClass::Equity),
        ];
        let profile = HouseholdProfile::default();
        let ctx = RuleContext {
            today: date(2026, 10, 19),
            profile: &profile,
            transactions: &[],
            investments: &investments,
        };

        let drafts = TaxInstrumentRule.evaluate(&ctx).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].target_amount, dec!(150000));
        assert_eq!(drafts[0].target_date, date(2027, 3, 31));
    }

    #[test]
    fn test_senior_rule_requires_elder_over_sixty() {
        let profile = HouseholdProfile {
            dependents: vec![
                dependent(Relation::Grandmother, "Kamala", date(1950, 1, 1)),
                dependent(Relation::Mother, "Leela", date(1970, 1, 1)),
                dependent(Relation::Spouse, "Meera", date(1950, 1, 1)),
            ],
            annual_income: None,
        };
        let ctx = RuleContext {
            today: date(2026, 10, 19),
            profile: &profile,
            transactions: &[],
            investments: &[],
        };

        let drafts = SeniorMedicalRule.evaluate(&ctx).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].name, "Kamala Senior Medical Corpus");
        assert_eq!(drafts[0].target_amount, SENIOR_MEDICAL_CORPUS);
        assert_eq!(drafts[0].target_date, date(2028, 10, 19));
    }

    #[tokio::test]
    async fn test_execute_all_is_idempotent() {
        let store = Arc::new(InMemoryRecordStore::new());
        store
            .add_transaction(txn(date(2026, 4, 1), dec!(-20000), "Health Insurance", ""))
            .await
            .unwrap();
        store.add_investment(investment(InvestmentClass::NpsTier1)).await.unwrap();

        let profile = HouseholdProfile {
            dependents: vec![
                dependent(Relation::Child, "Asha", date(2016, 10, 19)),
                dependent(Relation::Father, "Mohan", date(1955, 5, 5)),
            ],
            annual_income: None,
        };
        let today = date(2026, 10, 19);
        let engine = engine(store.clone());

        let first = engine.execute_all_as_of(&profile, today).await.unwrap();
        assert_eq!(first.len(), 4);

        let second = engine.execute_all_as_of(&profile, today).await.unwrap();
        assert!(second.is_empty());
        assert_eq!(store.list_goals().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_failing_rule_does_not_abort_others() {
        let store = Arc::new(InMemoryRecordStore::new());
        let goals = Arc::new(GoalManager::new(store.clone()));
        let engine = AutoGoalEngine::with_rules(
            goals,
            store,
            vec![Box::new(FailingRule), Box::new(ChildEducationRule)],
        );

        let profile = HouseholdProfile {
            dependents: vec![dependent(Relation::Child, "Asha", date(2016, 10, 19))],
            annual_income: None,
        };

        let created = engine
            .execute_all_as_of(&profile, date(2026, 10, 19))
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].slug, "asha-education-fund-long");
    }
}
