//! Contact [`Enquiry`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};

use crate::domain::{
    listing,
    user::{Email, Phone},
};

/// Enquiry submitted through a contact form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enquiry {
    /// [`Name`] of the enquirer.
    pub name: Name,

    /// [`Email`] to reply to.
    pub email: Email,

    /// [`Phone`] to call back, if provided.
    pub phone: Option<Phone>,

    /// [`Message`] of this [`Enquiry`].
    pub message: Message,

    /// [`listing::Id`] this [`Enquiry`] is about, if any.
    pub property_id: Option<listing::Id>,
}

/// Name of an enquirer.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Message of an [`Enquiry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Message(String);

impl Message {
    /// Maximum length of a [`Message`] in bytes.
    pub const MAX_LEN: usize = 5000;

    /// Creates a new [`Message`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Message`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= Self::MAX_LEN
    }
}

impl FromStr for Message {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Message`")
    }
}
