//! [`Predicate`] trees filtering CMS collections.

use serde_json::{json, Map, Value};

/// Filter of a CMS collection.
///
/// Serializes into the Directus [filter rules] JSON.
///
/// [filter rules]: https://docs.directus.io/reference/filter-rules.html
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// All the inner [`Predicate`]s must hold.
    And(Vec<Predicate>),

    /// The named field must satisfy the [`Condition`].
    Field {
        /// Name of the field.
        name: String,

        /// [`Condition`] on the field.
        condition: Condition,
    },
}

/// [`Condition`] on a single field of a [`Predicate`].
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Field value must satisfy the [`Operator`].
    Op(Operator),

    /// Related record must satisfy the inner [`Predicate`].
    Related(Box<Predicate>),
}

/// Comparison operator of a [`Condition`].
#[derive(Clone, Debug, PartialEq)]
pub enum Operator {
    /// `_eq`: equals the value.
    Eq(Value),

    /// `_neq`: doesn't equal the value.
    Neq(Value),

    /// `_in`: equals any of the values.
    In(Vec<Value>),

    /// `_nin`: equals none of the values.
    Nin(Vec<Value>),

    /// `_gte`: greater than or equal to the value.
    Gte(Value),

    /// `_lte`: less than or equal to the value.
    Lte(Value),
}

impl Operator {
    /// Returns the wire name of this [`Operator`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Eq(_) => "_eq",
            Self::Neq(_) => "_neq",
            Self::In(_) => "_in",
            Self::Nin(_) => "_nin",
            Self::Gte(_) => "_gte",
            Self::Lte(_) => "_lte",
        }
    }

    /// Converts this [`Operator`] into its JSON representation.
    fn to_json(&self) -> Value {
        let value = match self {
            Self::Eq(v) | Self::Neq(v) | Self::Gte(v) | Self::Lte(v) => {
                v.clone()
            }
            Self::In(vs) | Self::Nin(vs) => Value::Array(vs.clone()),
        };
        let mut obj = Map::with_capacity(1);
        drop(obj.insert(self.name().to_owned(), value));
        Value::Object(obj)
    }
}

impl Predicate {
    /// Creates a [`Predicate`] applying the [`Operator`] to the field at the
    /// provided dotted `path`, like `tags.tags_id`.
    #[must_use]
    pub fn field(path: &str, op: Operator) -> Self {
        let mut segments = path.rsplit('.');
        let leaf = segments.next().unwrap_or(path);
        segments.fold(
            Self::Field {
                name: leaf.to_owned(),
                condition: Condition::Op(op),
            },
            |inner, name| Self::related(name, inner),
        )
    }

    /// Creates a [`Predicate`] requiring the related record in the named
    /// field to satisfy the `inner` [`Predicate`].
    #[must_use]
    pub fn related(name: impl Into<String>, inner: Self) -> Self {
        Self::Field {
            name: name.into(),
            condition: Condition::Related(Box::new(inner)),
        }
    }

    /// Creates a `_eq` [`Predicate`] on the field at the provided `path`.
    #[must_use]
    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Operator::Eq(value.into()))
    }

    /// Creates a `_neq` [`Predicate`] on the field at the provided `path`.
    #[must_use]
    pub fn neq(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Operator::Neq(value.into()))
    }

    /// Creates a `_in` [`Predicate`] on the field at the provided `path`.
    #[must_use]
    pub fn is_in<V: Into<Value>>(
        path: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::field(
            path,
            Operator::In(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a `_nin` [`Predicate`] on the field at the provided `path`.
    #[must_use]
    pub fn not_in<V: Into<Value>>(
        path: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::field(
            path,
            Operator::Nin(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a `_gte` [`Predicate`] on the field at the provided `path`.
    #[must_use]
    pub fn gte(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Operator::Gte(value.into()))
    }

    /// Creates a `_lte` [`Predicate`] on the field at the provided `path`.
    #[must_use]
    pub fn lte(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Operator::Lte(value.into()))
    }

    /// Iterates over all the [`Operator`]s applied to the field at the
    /// provided dotted `path`, in any nesting.
    pub fn operators<'p>(
        &'p self,
        path: &'p str,
    ) -> Box<dyn Iterator<Item = &'p Operator> + 'p> {
        match self {
            Self::And(all) => {
                Box::new(all.iter().flat_map(move |p| p.operators(path)))
            }
            Self::Field { name, condition } => {
                let (head, rest) = path.split_once('.').unwrap_or((path, ""));
                if name != head {
                    return Box::new(std::iter::empty());
                }
                match condition {
                    Condition::Op(op) if rest.is_empty() => {
                        Box::new(std::iter::once(op))
                    }
                    Condition::Related(inner) if !rest.is_empty() => {
                        inner.operators(rest)
                    }
                    Condition::Op(_) | Condition::Related(_) => {
                        Box::new(std::iter::empty())
                    }
                }
            }
        }
    }

    /// Converts this [`Predicate`] into its JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::And(all) => json!({
                "_and": all.iter().map(Self::to_json).collect::<Vec<_>>(),
            }),
            Self::Field { name, condition } => {
                let inner = match condition {
                    Condition::Op(op) => op.to_json(),
                    Condition::Related(p) => p.to_json(),
                };
                let mut obj = Map::with_capacity(1);
                drop(obj.insert(name.clone(), inner));
                Value::Object(obj)
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{Operator, Predicate};

    #[test]
    fn nests_dotted_paths() {
        assert_eq!(
            Predicate::eq("tags.tags_id", "pool").to_json(),
            json!({ "tags": { "tags_id": { "_eq": "pool" } } }),
        );
        assert_eq!(
            Predicate::eq("status", "current").to_json(),
            json!({ "status": { "_eq": "current" } }),
        );
    }

    #[test]
    fn serializes_operators() {
        let p = Predicate::And(vec![
            Predicate::neq("status", "inactive"),
            Predicate::is_in("id", [1, 2]),
            Predicate::not_in("id", [3]),
            Predicate::gte("price", "100"),
            Predicate::lte("price", "200"),
        ]);

        assert_eq!(
            p.to_json(),
            json!({ "_and": [
                { "status": { "_neq": "inactive" } },
                { "id": { "_in": [1, 2] } },
                { "id": { "_nin": [3] } },
                { "price": { "_gte": "100" } },
                { "price": { "_lte": "200" } },
            ] }),
        );
    }

    #[test]
    fn finds_operators_by_path() {
        let p = Predicate::And(vec![
            Predicate::eq("status", "current"),
            Predicate::eq("tags.tags_id", "pool"),
            Predicate::eq("tags.tags_id", "garden"),
        ]);

        assert_eq!(
            p.operators("tags.tags_id").collect::<Vec<_>>(),
            [&Operator::Eq("pool".into()), &Operator::Eq("garden".into())],
        );
        assert_eq!(p.operators("status").count(), 1);
        assert_eq!(p.operators("tags").count(), 0);
        assert_eq!(p.operators("price").count(), 0);
    }
}
