//! Core data models for the planning engine

use crate::error::EngineError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lowercase and drop everything but ASCII letters and digits, so that
/// "NPS-T1", "nps_t1" and "NPS T1" all normalize to "npst1".
fn normalize_tag(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn unknown(domain: &'static str, value: &str) -> EngineError {
    EngineError::UnknownClass {
        domain,
        value: value.to_string(),
    }
}

/// Deserialize classification tags through their normalizing `FromStr`,
/// so stored records may carry free-form tags like "stocks" or "NPS T1".
macro_rules! tag_from_string {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = EngineError;

                fn try_from(raw: String) -> Result<Self, Self::Error> {
                    raw.parse()
                }
            }
        )*
    };
}

tag_from_string!(GoalType, InvestmentClass, InsuranceClass, LoanKind, Relation);

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String")]
pub enum GoalType {
    Micro,
    Small,
    Short,
    Medium,
    Long,
}

impl GoalType {
    pub fn as_slug(&self) -> &'static str {
        match self {
            GoalType::Micro => "micro",
            GoalType::Small => "small",
            GoalType::Short => "short",
            GoalType::Medium => "medium",
            GoalType::Long => "long",
        }
    }
}

impl FromStr for GoalType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "micro" => Ok(GoalType::Micro),
            "small" => Ok(GoalType::Small),
            "short" | "shortterm" => Ok(GoalType::Short),
            "medium" | "mediumterm" => Ok(GoalType::Medium),
            "long" | "longterm" => Ok(GoalType::Long),
            _ => Err(unknown("goal type", s)),
        }
    }
}

/// Investment asset classes. Every coefficient table matches on this
/// exhaustively, so a new class cannot silently default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String")]
pub enum InvestmentClass {
    Equity,
    MutualFund,
    #[serde(rename = "ELSS")]
    Elss,
    #[serde(rename = "PPF")]
    Ppf,
    #[serde(rename = "NPS-T1")]
    NpsTier1,
    #[serde(rename = "NPS-T2")]
    NpsTier2,
    FixedDeposit,
    Bonds,
    Gold,
    RealEstate,
    Crypto,
    Cash,
}

impl InvestmentClass {
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentClass::Equity => "Equity",
            InvestmentClass::MutualFund => "MutualFund",
            InvestmentClass::Elss => "ELSS",
            InvestmentClass::Ppf => "PPF",
            InvestmentClass::NpsTier1 => "NPS-T1",
            InvestmentClass::NpsTier2 => "NPS-T2",
            InvestmentClass::FixedDeposit => "FixedDeposit",
            InvestmentClass::Bonds => "Bonds",
            InvestmentClass::Gold => "Gold",
            InvestmentClass::RealEstate => "RealEstate",
            InvestmentClass::Crypto => "Crypto",
            InvestmentClass::Cash => "Cash",
        }
    }
}

impl FromStr for InvestmentClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class = match normalize_tag(s).as_str() {
            "equity" | "stock" | "stocks" | "shares" | "directequity" => InvestmentClass::Equity,
            "mf" | "mutualfund" | "mutualfunds" => InvestmentClass::MutualFund,
            "elss" => InvestmentClass::Elss,
            "ppf" => InvestmentClass::Ppf,
            "nps" | "npst1" | "npstier1" | "npstieri" => InvestmentClass::NpsTier1,
            "npst2" | "npstier2" | "npstierii" => InvestmentClass::NpsTier2,
            "fd" | "fixeddeposit" | "rd" | "recurringdeposit" => InvestmentClass::FixedDeposit,
            "bond" | "bonds" | "debt" | "debtfund" => InvestmentClass::Bonds,
            "gold" | "sgb" | "goldetf" => InvestmentClass::Gold,
            "realestate" | "property" | "reit" => InvestmentClass::RealEstate,
            "crypto" | "cryptocurrency" => InvestmentClass::Crypto,
            "cash" | "savings" | "liquid" => InvestmentClass::Cash,
            _ => return Err(unknown("investment", s)),
        };
        Ok(class)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum InsuranceClass {
    Term,
    Health,
    Vehicle,
    Life,
    Home,
}

impl FromStr for InsuranceClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "term" | "termlife" | "terminsurance" => Ok(InsuranceClass::Term),
            "health" | "mediclaim" | "medical" | "healthinsurance" => Ok(InsuranceClass::Health),
            "vehicle" | "motor" | "car" | "bike" | "twowheeler" => Ok(InsuranceClass::Vehicle),
            "life" | "endowment" | "ulip" => Ok(InsuranceClass::Life),
            "home" | "property" | "householders" => Ok(InsuranceClass::Home),
            _ => Err(unknown("insurance", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum LoanKind {
    Home,
    Vehicle,
    Personal,
    Education,
    Gold,
    CreditCard,
    Business,
}

impl LoanKind {
    pub fn label(&self) -> &'static str {
        match self {
            LoanKind::Home => "home",
            LoanKind::Vehicle => "vehicle",
            LoanKind::Personal => "personal",
            LoanKind::Education => "education",
            LoanKind::Gold => "gold",
            LoanKind::CreditCard => "credit card",
            LoanKind::Business => "business",
        }
    }
}

impl FromStr for LoanKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "home" | "homeloan" | "housing" | "mortgage" => Ok(LoanKind::Home),
            "vehicle" | "car" | "carloan" | "bike" | "auto" => Ok(LoanKind::Vehicle),
            "personal" | "personalloan" => Ok(LoanKind::Personal),
            "education" | "educationloan" | "student" => Ok(LoanKind::Education),
            "gold" | "goldloan" => Ok(LoanKind::Gold),
            "creditcard" | "card" => Ok(LoanKind::CreditCard),
            "business" | "businessloan" => Ok(LoanKind::Business),
            _ => Err(unknown("loan", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum Relation {
    Child,
    Spouse,
    Mother,
    Father,
    Grandmother,
    Grandfather,
    MotherInLaw,
    FatherInLaw,
    Sibling,
}

impl Relation {
    /// Elder relations eligible for the senior medical corpus.
    pub fn is_elder(&self) -> bool {
        matches!(
            self,
            Relation::Mother
                | Relation::Father
                | Relation::Grandmother
                | Relation::Grandfather
                | Relation::MotherInLaw
                | Relation::FatherInLaw
        )
    }
}

impl FromStr for Relation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "child" | "son" | "daughter" => Ok(Relation::Child),
            "spouse" | "wife" | "husband" => Ok(Relation::Spouse),
            "mother" | "mom" => Ok(Relation::Mother),
            "father" | "dad" => Ok(Relation::Father),
            "grandmother" => Ok(Relation::Grandmother),
            "grandfather" => Ok(Relation::Grandfather),
            "motherinlaw" => Ok(Relation::MotherInLaw),
            "fatherinlaw" => Ok(Relation::FatherInLaw),
            "sibling" | "brother" | "sister" => Ok(Relation::Sibling),
            _ => Err(unknown("relation", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Portfolio,
    Tax,
    Risk,
    Goal,
    CashFlow,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Higher rank sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::Low => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

//
// ================= Goal =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_amount: Decimal,
    /// Not clamped: over-funding is representable.
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Outstanding gap, never negative.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    pub fn is_funded(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= Decimal::ZERO {
            return 0.0;
        }
        let ratio = self.current_amount / self.target_amount * Decimal::ONE_HUNDRED;
        ratio.to_f64().unwrap_or(0.0)
    }
}

/// Everything needed to create a goal; the manager fills in id, slug,
/// progress and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
    pub notes: String,
}

//
// ================= Household Records =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependent {
    pub id: Uuid,
    pub relation: Relation,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl Dependent {
    /// Age in completed years on `date`; zero for a birth date in the future.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.date_of_birth).unwrap_or(0)
    }
}

/// The household settings record, passed explicitly to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseholdProfile {
    pub dependents: Vec<Dependent>,
    /// Declared gross annual income, when the caller knows it.
    pub annual_income: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub class: InvestmentClass,
    pub name: String,
    pub invested_value: Decimal,
    pub current_value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub class: InsuranceClass,
    pub sum_insured: Decimal,
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: LoanKind,
    pub principal: Decimal,
    /// Annual rate of interest, in percent.
    pub roi: Decimal,
    pub tenure_months: u32,
    pub emi: Decimal,
    pub outstanding: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Positive for income, negative for expense.
    pub amount: Decimal,
    pub category: String,
    pub note: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

//
// ================= Recommendation =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub action_items: Vec<String>,
    /// 0..=100
    pub confidence_score: u8,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_amount: Option<Decimal>,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GoalType::Micro => "Micro",
            GoalType::Small => "Small",
            GoalType::Short => "Short",
            GoalType::Medium => "Medium",
            GoalType::Long => "Long",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for InvestmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        write!(f, "{}", s)
    }
}
