//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLScalar, GraphQLType, InputValue, ParseScalarResult,
    ParseScalarValue, ScalarToken, ScalarValue, Value,
};
use service::domain;

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Represents the target type as a GraphQL string, going through the
/// [`FromStr`]/[`Display`] impls of the `As` type. The target type must
/// implement [`AsRef`] and [`TryFrom`] for `As`.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Formats the target type as a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type from a string scalar [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the `input` is not a string, or doesn't parse into `As`, or `As`
    /// doesn't convert into the target type.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).expect("always has a name");
        let s = input.as_string_value().ok_or_else(|| {
            format!("Cannot parse `{name}` from non-string value: {input}")
        })?;
        let parsed = s
            .parse::<As>()
            .map_err(|e| format!("Cannot parse `{name}` from \"{s}\": {e}"))?;
        parsed
            .try_into()
            .map_err(|e| format!("Cannot parse `{name}`: {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a [`String`].
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Code of a content language, like `en` or `zh`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "Language", with = Via::<domain::Language>)]
pub struct Language(domain::Language);

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};

    use super::{Language, Via};

    #[test]
    fn parses_language_case_insensitively() {
        let input = InputValue::<DefaultScalarValue>::scalar("ZH");

        let lang = Via::<service::domain::Language>::from_input::<Language, _>(
            &input,
        )
        .unwrap();

        assert_eq!(lang.to_string(), "zh");
        assert_eq!(
            Via::<service::domain::Language>::to_output::<_, DefaultScalarValue>(
                &lang,
            ),
            Value::scalar("zh".to_owned()),
        );
    }

    #[test]
    fn rejects_non_string_input() {
        let input = InputValue::<DefaultScalarValue>::scalar(42);

        let err = Via::<service::domain::Language>::from_input::<Language, _>(
            &input,
        )
        .unwrap_err();

        assert!(err.contains("`Language`"), "{err}");
    }
}
