//! Team [`Member`]-related read definitions.

use crate::domain::{
    language::{self, Language},
    media::FileId,
    team::{self, Member},
    user::Email,
};

/// [`Member`] profile prepared for showing to website visitors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    /// ID of the [`Member`].
    pub id: team::Id,

    /// Full name.
    pub name: String,

    /// Translated position, if any.
    pub position: Option<String>,

    /// Translated biography, if any.
    pub bio: Option<String>,

    /// Contact [`Email`].
    pub email: Option<Email>,

    /// Contact phone.
    pub phone: Option<String>,

    /// Photo.
    pub photo: Option<FileId>,
}

impl Profile {
    /// Adapts the provided [`Member`] for showing in the provided
    /// [`Language`].
    #[must_use]
    pub fn adapt(member: &Member, lang: &Language) -> Self {
        let translation = language::pick(&member.translations, lang);
        Self {
            id: member.id,
            name: member.name.clone(),
            position: translation
                .and_then(|t| t.position.clone())
                .or_else(|| member.position.clone()),
            bio: translation
                .and_then(|t| t.bio.clone())
                .or_else(|| member.bio.clone()),
            email: member.email.clone(),
            phone: member.phone.clone(),
            photo: member.photo.clone(),
        }
    }
}
