//! Portfolio analytics
//!
//! Risk, return and concentration metrics over the investment book.
//! Weights are computed per investment class from current value.

use crate::models::{Investment, InvestmentClass};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Annual risk-free rate, percent
pub const RISK_FREE_RATE: f64 = 6.0;
/// Weight above which a class is over-concentrated, percent
pub const MAX_CLASS_WEIGHT: f64 = 60.0;
/// Weight below which a held class is a thin position, percent
pub const MIN_CLASS_WEIGHT: f64 = 5.0;

const FULL_CONCENTRATION_HHI: f64 = 10_000.0;

/// Risk coefficient on a 1..=10 scale.
pub fn risk_coefficient(class: InvestmentClass) -> f64 {
    match class {
        InvestmentClass::Equity => 8.0,
        InvestmentClass::MutualFund => 6.0,
        InvestmentClass::Elss => 7.0,
        InvestmentClass::Ppf => 1.0,
        InvestmentClass::NpsTier1 => 4.0,
        InvestmentClass::NpsTier2 => 4.0,
        InvestmentClass::FixedDeposit => 1.0,
        InvestmentClass::Bonds => 3.0,
        InvestmentClass::Gold => 5.0,
        InvestmentClass::RealEstate => 6.0,
        InvestmentClass::Crypto => 10.0,
        InvestmentClass::Cash => 1.0,
    }
}

/// Expected annual return, percent.
pub fn expected_return(class: InvestmentClass) -> f64 {
    match class {
        InvestmentClass::Equity => 12.0,
        InvestmentClass::MutualFund => 10.0,
        InvestmentClass::Elss => 12.0,
        InvestmentClass::Ppf => 7.1,
        InvestmentClass::NpsTier1 => 9.0,
        InvestmentClass::NpsTier2 => 9.0,
        InvestmentClass::FixedDeposit => 6.5,
        InvestmentClass::Bonds => 7.5,
        InvestmentClass::Gold => 8.0,
        InvestmentClass::RealEstate => 9.0,
        InvestmentClass::Crypto => 15.0,
        InvestmentClass::Cash => 3.5,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    pub total_invested: Decimal,
    pub total_current: Decimal,
    pub absolute_return_percent: f64,
    /// Percent of current value per class; sums to 100 when non-empty
    pub asset_allocation: BTreeMap<InvestmentClass, f64>,
    pub risk_score: f64,
    pub expected_return: f64,
    pub sharpe_ratio: f64,
    pub diversification_score: f64,
    pub rebalance_needed: bool,
}

impl PortfolioAnalysis {
    /// The all-zero result for an empty or valueless book.
    pub fn empty() -> Self {
        Self {
            total_invested: Decimal::ZERO,
            total_current: Decimal::ZERO,
            absolute_return_percent: 0.0,
            asset_allocation: BTreeMap::new(),
            risk_score: 0.0,
            expected_return: 0.0,
            sharpe_ratio: 0.0,
            diversification_score: 0.0,
            rebalance_needed: false,
        }
    }

    /// Classes above the concentration limit, heaviest first.
    pub fn concentrated_classes(&self) -> Vec<(InvestmentClass, f64)> {
        let mut over: Vec<(InvestmentClass, f64)> = self
            .asset_allocation
            .iter()
            .filter(|(_, w)| **w > MAX_CLASS_WEIGHT)
            .map(|(c, w)| (*c, *w))
            .collect();
        over.sort_by(|a, b| b.1.total_cmp(&a.1));
        over
    }
}

pub struct PortfolioAnalyzer;

impl PortfolioAnalyzer {
    /// Analyze a set of holdings. Negative current values count as zero.
    pub fn analyze(investments: &[Investment]) -> PortfolioAnalysis {
        let mut value_by_class: BTreeMap<InvestmentClass, Decimal> = BTreeMap::new();
        for inv in investments {
            *value_by_class.entry(inv.class).or_insert(Decimal::ZERO) +=
                inv.current_value.max(Decimal::ZERO);
        }

        let total_current: Decimal = value_by_class.values().copied().sum();
        if total_current <= Decimal::ZERO {
            debug!(holdings = investments.len(), "No portfolio value to analyze");
            return PortfolioAnalysis::empty();
        }

        let total_invested: Decimal = investments.iter().map(|i| i.invested_value).sum();
        let total_f = total_current.to_f64().unwrap_or(0.0);

        let asset_allocation: BTreeMap<InvestmentClass, f64> = value_by_class
            .iter()
            .map(|(class, value)| {
                let share = value.to_f64().unwrap_or(0.0) / total_f * 100.0;
                (*class, share)
            })
            .collect();

        let weighted = |table: fn(InvestmentClass) -> f64| -> f64 {
            asset_allocation
                .iter()
                .map(|(class, weight)| table(*class) * weight / 100.0)
                .sum()
        };

        let risk_score = weighted(risk_coefficient).clamp(1.0, 10.0);
        let expected = weighted(expected_return);

        let denominator = risk_score * 2.0;
        let sharpe_ratio = if denominator == 0.0 {
            0.0
        } else {
            (expected - RISK_FREE_RATE) / denominator
        };

        let hhi: f64 = asset_allocation.values().map(|w| w * w).sum();
        let diversification_score = (100.0 * (1.0 - hhi / FULL_CONCENTRATION_HHI)).clamp(0.0, 100.0);

        let rebalance_needed = asset_allocation
            .values()
            .any(|w| *w > MAX_CLASS_WEIGHT || (*w > 0.0 && *w < MIN_CLASS_WEIGHT));

        let absolute_return_percent = if total_invested > Decimal::ZERO {
            ((total_current - total_invested) / total_invested * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0)
        } else {
            0.0
        };

        debug!(
            classes = asset_allocation.len(),
            risk_score,
            expected_return = expected,
            rebalance_needed,
            "Portfolio analyzed"
        );

        PortfolioAnalysis {
            total_invested,
            total_current,
            absolute_return_percent,
            asset_allocation,
            risk_score,
            expected_return: expected,
            sharpe_ratio,
            diversification_score,
            rebalance_needed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn holding(class: InvestmentClass, invested: Decimal, current: Decimal) -> Investment {
        Investment {
            id: Uuid::new_v4(),
            class,
            name: class.label().to_string(),
            invested_value: invested,
            current_value: current,
        }
    }

    #[test]
    fn test_empty_portfolio() {
        let analysis = PortfolioAnalyzer::analyze(&[]);
        assert_eq!(analysis.risk_score, 0.0);
        assert_eq!(analysis.expected_return, 0.0);
        assert_eq!(analysis.sharpe_ratio, 0.0);
        assert_eq!(analysis.diversification_score, 0.0);
        assert!(!analysis.rebalance_needed);
    }

    #[test]
    fn test_zero_value_portfolio() {
        let analysis =
            PortfolioAnalyzer::analyze(&[holding(InvestmentClass::Gold, dec!(5000), dec!(0))]);
        assert_eq!(analysis, PortfolioAnalysis::empty());
    }

    #[test]
    fn test_single_equity_holding() {
        let analysis = PortfolioAnalyzer::analyze(&[holding(
            InvestmentClass::Equity,
            dec!(100000),
            dec!(120000),
        )]);

        assert_eq!(analysis.diversification_score, 0.0);
        assert!((analysis.risk_score - 8.0).abs() < 1e-9);
        assert!((analysis.expected_return - 12.0).abs() < 1e-9);
        assert!((analysis.sharpe_ratio - 6.0 / 16.0).abs() < 1e-9);
        assert!(analysis.rebalance_needed);
        assert!((analysis.absolute_return_percent - 20.0).abs() < 1e-9);
        assert_eq!(analysis.concentrated_classes().len(), 1);
    }

    #[test]
    fn test_balanced_mix() {
        let analysis = PortfolioAnalyzer::analyze(&[
            holding(InvestmentClass::Equity, dec!(40000), dec!(40000)),
            holding(InvestmentClass::Equity, dec!(10000), dec!(10000)),
            holding(InvestmentClass::Ppf, dec!(30000), dec!(30000)),
            holding(InvestmentClass::Gold, dec!(20000), dec!(20000)),
        ]);

        let total: f64 = analysis.asset_allocation.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!((analysis.asset_allocation[&InvestmentClass::Equity] - 50.0).abs() < 1e-9);

        // 0.5*8 + 0.3*1 + 0.2*5
        assert!((analysis.risk_score - 5.3).abs() < 1e-9);
        // HHI = 2500 + 900 + 400
        assert!((analysis.diversification_score - 62.0).abs() < 1e-9);
        assert!(!analysis.rebalance_needed);
    }

    #[test]
    fn test_thin_position_triggers_rebalance() {
        let analysis = PortfolioAnalyzer::analyze(&[
            holding(InvestmentClass::MutualFund, dec!(50000), dec!(50000)),
            holding(InvestmentClass::Bonds, dec!(47000), dec!(47000)),
            holding(InvestmentClass::Crypto, dec!(3000), dec!(3000)),
        ]);
        assert!(analysis.rebalance_needed);
        assert!(analysis.concentrated_classes().is_empty());
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let mixes = [
            vec![holding(InvestmentClass::Cash, dec!(1), dec!(1))],
            vec![holding(InvestmentClass::Crypto, dec!(1), dec!(1000000))],
            vec![
                holding(InvestmentClass::Ppf, dec!(1), dec!(1)),
                holding(InvestmentClass::FixedDeposit, dec!(1), dec!(1)),
                holding(InvestmentClass::Cash, dec!(1), dec!(1)),
            ],
        ];
        for mix in mixes {
            let analysis = PortfolioAnalyzer::analyze(&mix);
            assert!((1.0..=10.0).contains(&analysis.risk_score));
            assert!((0.0..=100.0).contains(&analysis.diversification_score));
        }
    }
}
