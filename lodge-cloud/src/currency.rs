//! Fixed-rate currency conversion for membership charges
//!
//! Plan prices are stored in a currency-agnostic base unit (USD rate 1.00).
//! The supported set and rates are static; no live market rates.

use rust_decimal::{Decimal, RoundingStrategy};

/// Supported charge currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Parse an ISO code (case-insensitive). Anything outside the supported
    /// set is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            _ => None,
        }
    }

    /// Uppercase ISO code, as stored in the payment ledger
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Lowercase ISO code expected by the gateway charge API
    pub fn as_gateway_code(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
        }
    }

    /// Fixed conversion rate from the base unit
    pub fn rate(&self) -> Decimal {
        match self {
            Self::Usd => Decimal::ONE,
            Self::Eur => Decimal::new(85, 2), // 0.85
            Self::Gbp => Decimal::new(75, 2), // 0.75
        }
    }
}

/// Convert a base-unit plan price into `currency`, rounded to two decimal
/// places (midpoint away from zero).
pub fn convert(base_price: Decimal, currency: Currency) -> Decimal {
    (base_price * currency.rate())
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Gateway minor-unit amount (cents) for a converted charge amount.
///
/// Derived from the already-rounded amount so the ledgered amount and the
/// charged amount can never diverge by a cent.
pub fn minor_units(amount: Decimal) -> i64 {
    let mut cents = amount;
    cents.rescale(2);
    cents.mantissa() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::Usd));
        assert_eq!(Currency::from_code("eur"), Some(Currency::Eur));
        assert_eq!(Currency::from_code("Gbp"), Some(Currency::Gbp));
        assert_eq!(Currency::from_code("JPY"), None);
        assert_eq!(Currency::from_code(""), None);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Currency::Eur.as_code(), "EUR");
        assert_eq!(Currency::Eur.as_gateway_code(), "eur");
    }

    #[test]
    fn test_convert_silver_eur() {
        // silver plan: 20.00 base, EUR rate 0.85 -> 17.00 / 1700 minor units
        let amount = convert(Decimal::new(2000, 2), Currency::Eur);
        assert_eq!(amount, Decimal::new(1700, 2));
        assert_eq!(minor_units(amount), 1700);
    }

    #[test]
    fn test_convert_usd_is_identity() {
        let amount = convert(Decimal::new(2000, 2), Currency::Usd);
        assert_eq!(amount, Decimal::new(2000, 2));
        assert_eq!(minor_units(amount), 2000);
    }

    #[test]
    fn test_convert_gbp() {
        let amount = convert(Decimal::new(1000, 2), Currency::Gbp);
        assert_eq!(amount, Decimal::new(750, 2));
        assert_eq!(minor_units(amount), 750);
    }

    #[test]
    fn test_convert_rounds_to_two_decimals() {
        // 19.99 * 0.85 = 16.9915 -> 16.99
        let amount = convert(Decimal::new(1999, 2), Currency::Eur);
        assert_eq!(amount, Decimal::new(1699, 2));
        assert_eq!(minor_units(amount), 1699);
    }

    #[test]
    fn test_convert_midpoint_rounds_away_from_zero() {
        // 10.50 * 0.85 = 8.925 -> 8.93, never truncated to 8.92
        let amount = convert(Decimal::new(1050, 2), Currency::Eur);
        assert_eq!(amount, Decimal::new(893, 2));
        assert_eq!(minor_units(amount), 893);
    }

    #[test]
    fn test_convert_is_non_negative_for_catalog_prices() {
        for price in [0i64, 1000, 2000, 3000] {
            for currency in [Currency::Usd, Currency::Eur, Currency::Gbp] {
                let amount = convert(Decimal::new(price, 2), currency);
                assert!(amount >= Decimal::ZERO);
                assert!(minor_units(amount) >= 0);
            }
        }
    }
}
