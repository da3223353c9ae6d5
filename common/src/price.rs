//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

/// Non-negative amount of money in the agency's currency.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative() || amount.is_zero()).then_some(Self(amount))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(amount.into())
    }
}

impl fmt::Display for Price {
    /// Formats as a plain decimal number without trailing zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

/// [`Price`] as it is shown to website visitors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplayPrice {
    /// Price is shown as an amount, like `$1,250,000`.
    Amount(Price),

    /// Price is hidden and should be requested from an agent.
    OnRequest,
}

impl DisplayPrice {
    /// Text shown instead of a hidden [`Price`].
    pub const ON_REQUEST: &'static str = "Request for Price";
}

impl fmt::Display for DisplayPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let price = match self {
            Self::Amount(price) => price,
            Self::OnRequest => return f.write_str(Self::ON_REQUEST),
        };

        let amount = price
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let dollars = amount.trunc().normalize().to_string();
        let cents = (amount.fract() * Decimal::ONE_HUNDRED)
            .to_u32()
            .unwrap_or_default();

        f.write_str("$")?;
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                f.write_str(",")?;
            }
            write!(f, "{digit}")?;
        }
        if cents > 0 {
            write!(f, ".{cents:02}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Non-negative decimal amount of money, like `1250000` or `999.95`.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Price = super::Price;

    impl Price {
        fn to_output<S: ScalarValue>(p: &Price) -> Value<S> {
            Value::scalar(p.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Price` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Price` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{DisplayPrice, Price};

    fn price(s: &str) -> Price {
        Price::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(price("1250000").amount(), Decimal::from(1_250_000));
        assert_eq!(price("0").amount(), Decimal::ZERO);
        assert!(Price::from_str("-1").is_err());
        assert!(Price::from_str("a lot").is_err());
        assert!(Price::from_str("").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(price("5000000").to_string(), "5000000");
        assert_eq!(price("999.50").to_string(), "999.5");
    }

    #[test]
    fn displays_amounts_with_grouping() {
        let cases = [
            ("0", "$0"),
            ("950", "$950"),
            ("1000", "$1,000"),
            ("65000", "$65,000"),
            ("1250000", "$1,250,000"),
            ("1250000.00", "$1,250,000"),
            ("1999.5", "$1,999.50"),
            ("12.345", "$12.35"),
        ];
        for (amount, expected) in cases {
            assert_eq!(
                DisplayPrice::Amount(price(amount)).to_string(),
                expected,
                "amount = {amount}",
            );
        }
    }

    #[test]
    fn displays_request_for_price() {
        assert_eq!(DisplayPrice::OnRequest.to_string(), "Request for Price");
    }
}
