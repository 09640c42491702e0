//! Metric Calculator
//!
//! Pure arithmetic from raw client inputs to the three marketing ratios.

use rust_decimal::Decimal;

use crate::model::{ClientInputs, ClientMetrics};

/// Compute the three marketing ratios from raw inputs.
///
/// Total for non-negative inputs: any ratio whose denominator is zero
/// evaluates to zero rather than an error or a non-finite value. A
/// brand-new store has no meaningful CPA/CR/ROAS yet, and zero is the
/// least-misleading placeholder.
///
/// The `orders <= visits` invariant is enforced by the boundary that
/// collects the inputs, not here.
pub fn compute(inputs: &ClientInputs) -> ClientMetrics {
    let cost_per_acquisition = if inputs.orders > Decimal::ZERO {
        inputs.ad_budget / inputs.orders
    } else {
        Decimal::ZERO
    };

    let conversion_rate = if inputs.visits > Decimal::ZERO {
        inputs.orders / inputs.visits
    } else {
        Decimal::ZERO
    };

    let return_on_ad_spend = if inputs.ad_budget > Decimal::ZERO {
        (inputs.orders * inputs.product_price) / inputs.ad_budget
    } else {
        Decimal::ZERO
    };

    ClientMetrics {
        cost_per_acquisition,
        conversion_rate,
        return_on_ad_spend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_worked_example() {
        let inputs = ClientInputs::new(dec!(1000), dec!(50), dec!(2000), dec!(80));
        let metrics = compute(&inputs);

        assert_eq!(metrics.cost_per_acquisition, dec!(20));
        assert_eq!(metrics.conversion_rate, dec!(0.025));
        assert_eq!(metrics.return_on_ad_spend, dec!(4));
    }

    #[test]
    fn test_zero_orders_gives_zero_cpa() {
        let inputs = ClientInputs::new(dec!(500), dec!(0), dec!(1000), dec!(80));
        let metrics = compute(&inputs);
        assert_eq!(metrics.cost_per_acquisition, Decimal::ZERO);
    }

    #[test]
    fn test_zero_visits_gives_zero_cr() {
        let inputs = ClientInputs::new(dec!(500), dec!(0), dec!(0), dec!(80));
        let metrics = compute(&inputs);
        assert_eq!(metrics.conversion_rate, Decimal::ZERO);
    }

    #[test]
    fn test_zero_budget_gives_zero_roas() {
        let inputs = ClientInputs::new(dec!(0), dec!(10), dec!(100), dec!(80));
        let metrics = compute(&inputs);
        assert_eq!(metrics.return_on_ad_spend, Decimal::ZERO);
    }

    #[test]
    fn test_all_zero_inputs() {
        let inputs = ClientInputs::new(dec!(0), dec!(0), dec!(0), dec!(0));
        let metrics = compute(&inputs);

        assert_eq!(metrics.cost_per_acquisition, Decimal::ZERO);
        assert_eq!(metrics.conversion_rate, Decimal::ZERO);
        assert_eq!(metrics.return_on_ad_spend, Decimal::ZERO);
    }
}
