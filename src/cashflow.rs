//! Income and expense aggregation over transactions

use crate::models::Transaction;
use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const AVG_DAYS_PER_MONTH: Decimal = dec!(30.4375);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_income: Decimal,
    /// Magnitude of all expenses (positive number)
    pub total_expense: Decimal,
    pub net: Decimal,
    /// Whole months covered by the window, at least one
    pub months: u32,
    pub monthly_income: Decimal,
    pub monthly_expense: Decimal,
}

impl CashFlowSummary {
    /// Aggregate transactions dated within `from..=to`.
    pub fn from_transactions(transactions: &[Transaction], from: NaiveDate, to: NaiveDate) -> Self {
        let (total_income, total_expense) = transactions
            .iter()
            .filter(|t| t.date >= from && t.date <= to)
            .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), t| {
                if t.is_income() {
                    (income + t.amount, expense)
                } else {
                    (income, expense - t.amount)
                }
            });

        let days = Decimal::from((to - from).num_days().max(0) + 1);
        let months = (days / AVG_DAYS_PER_MONTH)
            .round()
            .max(Decimal::ONE);
        let months_u32 = months.to_u32().unwrap_or(1).max(1);
        let months_dec = Decimal::from(months_u32);

        Self {
            from,
            to,
            total_income,
            total_expense,
            net: total_income - total_expense,
            months: months_u32,
            monthly_income: (total_income / months_dec).round_dp(2),
            monthly_expense: (total_expense / months_dec).round_dp(2),
        }
    }

    /// The twelve months ending on `today`.
    pub fn trailing_year(transactions: &[Transaction], today: NaiveDate) -> Self {
        let from = today
            .checked_sub_months(Months::new(12))
            .and_then(|d| d.succ_opt())
            .unwrap_or(today);
        Self::from_transactions(transactions, from, today)
    }

    pub fn annual_income(&self) -> Decimal {
        self.monthly_income * Decimal::from(12)
    }

    pub fn savings_rate_percent(&self) -> Decimal {
        if self.total_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.net / self.total_income * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn txn(date: NaiveDate, amount: Decimal, category: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date,
            amount,
            category: category.to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_trailing_year_aggregation() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut txns = Vec::new();
        for month in 1..=12u32 {
            let date = today.checked_sub_months(Months::new(month - 1)).unwrap();
            txns.push(txn(date, dec!(100000), "Salary"));
            txns.push(txn(date, dec!(-60000), "Living"));
        }
        // Outside the window
        txns.push(txn(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), dec!(999999), "Bonus"));

        let summary = CashFlowSummary::trailing_year(&txns, today);
        assert_eq!(summary.months, 12);
        assert_eq!(summary.total_income, dec!(1200000));
        assert_eq!(summary.total_expense, dec!(720000));
        assert_eq!(summary.net, dec!(480000));
        assert_eq!(summary.monthly_income, dec!(100000));
        assert_eq!(summary.annual_income(), dec!(1200000));
        assert_eq!(summary.savings_rate_percent(), dec!(40));
    }

    #[test]
    fn test_empty_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = CashFlowSummary::from_transactions(&[], today, today);
        assert_eq!(summary.months, 1);
        assert_eq!(summary.monthly_income, Decimal::ZERO);
        assert_eq!(summary.savings_rate_percent(), Decimal::ZERO);
    }
}
