use chrono::{Duration, Months, NaiveDate, Utc};
use goal_planning_engine::{
    recommendations::RecommendationContext,
    state::{InMemoryRecordStore, RecordStore},
    Dependent, EngineConfig, GoalDraft, GoalType, HouseholdProfile, InsuranceClass,
    InsurancePolicy, Investment, InvestmentClass, Loan, LoanKind, PlanningEngine, Relation,
    Transaction,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> goal_planning_engine::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Goal planning engine demo starting");

    let today = Utc::now().date_naive();
    let store = Arc::new(InMemoryRecordStore::new());
    seed_household(store.as_ref(), today).await?;

    let engine = PlanningEngine::new(store.clone(), EngineConfig::from_env());

    engine
        .create_goal(GoalDraft {
            name: "Emergency Fund".to_string(),
            goal_type: GoalType::Medium,
            target_amount: dec!(300000),
            target_date: today + Duration::days(300),
            notes: "Six months of expenses".to_string(),
        })
        .await?;

    let profile = HouseholdProfile {
        dependents: vec![
            Dependent {
                id: Uuid::new_v4(),
                relation: Relation::Child,
                name: "Anaya".to_string(),
                date_of_birth: years_ago(today, 6),
            },
            Dependent {
                id: Uuid::new_v4(),
                relation: Relation::Mother,
                name: "Sushila".to_string(),
                date_of_birth: years_ago(today, 64),
            },
        ],
        annual_income: None,
    };

    let created = engine.run_auto_goal_rules(&profile).await?;
    println!("\n=== AUTO-CREATED GOALS ===");
    println!("{}", serde_json::to_string_pretty(&created)?);

    let cash_flow = engine.cash_flow_summary(today).await?;
    info!(savings_rate = %cash_flow.savings_rate_percent(), "Trailing-year savings rate");
    println!("\n=== CASH FLOW (TRAILING YEAR) ===");
    println!("{}", serde_json::to_string_pretty(&cash_flow)?);

    let surplus = (cash_flow.monthly_income - cash_flow.monthly_expense).max(Decimal::ZERO);
    let plan = engine.allocate_surplus(surplus).await?;
    println!("\n=== ALLOCATION PLAN ===");
    println!("{}", serde_json::to_string_pretty(&plan)?);

    engine.apply_allocations(&plan).await?;
    println!("\n=== GOALS ===");
    for goal in engine.list_goals().await? {
        println!(
            "  {:<40} {:>12} / {:>12}  ({:.1}%)  due {}",
            goal.slug,
            goal.current_amount.round_dp(0),
            goal.target_amount.round_dp(0),
            goal.progress_percent(),
            goal.target_date
        );
    }

    let analysis = engine.analyze_stored_portfolio().await?;
    println!("\n=== PORTFOLIO ANALYSIS ===");
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    let recommendations = engine
        .generate_recommendations(RecommendationContext::from_profile(&profile))
        .await?;
    println!("\n=== RECOMMENDATIONS ===");
    println!("{}", serde_json::to_string_pretty(&recommendations)?);

    Ok(())
}

fn years_ago(today: NaiveDate, years: u32) -> NaiveDate {
    today.checked_sub_months(Months::new(years * 12)).unwrap_or(today)
}

async fn seed_household(store: &dyn RecordStore, today: NaiveDate) -> goal_planning_engine::Result<()> {
    for month in 0..12 {
        let date = today.checked_sub_months(Months::new(month)).unwrap_or(today);
        store
            .add_transaction(txn(date, dec!(120000), "Salary"))
            .await?;
        store
            .add_transaction(txn(date, dec!(-45000), "Household expenses"))
            .await?;
        store
            .add_transaction(txn(date, dec!(-28000), "Home loan EMI"))
            .await?;
    }
    store
        .add_transaction(txn(today - Duration::days(40), dec!(-22050), "Health Insurance Premium"))
        .await?;
    store
        .add_transaction(txn(today - Duration::days(200), dec!(-8000), "Car insurance renewal"))
        .await?;

    let holdings = [
        (InvestmentClass::Equity, "Nifty 50 index fund", dec!(600000), dec!(780000)),
        (InvestmentClass::Ppf, "PPF account", dec!(250000), dec!(290000)),
        (InvestmentClass::Gold, "Sovereign gold bond", dec!(80000), dec!(96000)),
        (InvestmentClass::FixedDeposit, "Bank FD", dec!(100000), dec!(104000)),
    ];
    for (class, name, invested, current) in holdings {
        store
            .add_investment(Investment {
                id: Uuid::new_v4(),
                class,
                name: name.to_string(),
                invested_value: invested,
                current_value: current,
            })
            .await?;
    }

    store
        .add_policy(InsurancePolicy {
            id: Uuid::new_v4(),
            class: InsuranceClass::Term,
            sum_insured: dec!(5000000),
            provider: "LIC".to_string(),
            start_date: years_ago(today, 3),
            end_date: years_ago(today, 3) + Duration::days(365 * 30),
        })
        .await?;

    store
        .add_loan(Loan {
            id: Uuid::new_v4(),
            kind: LoanKind::Home,
            principal: dec!(3500000),
            roi: dec!(8.75),
            tenure_months: 240,
            emi: dec!(28000),
            outstanding: dec!(2900000),
            is_active: true,
        })
        .await?;

    info!("Sample household seeded");
    Ok(())
}

fn txn(date: NaiveDate, amount: Decimal, category: &str) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        date,
        amount,
        category: category.to_string(),
        note: String::new(),
    }
}
