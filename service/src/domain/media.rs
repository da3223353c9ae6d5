//! [`Media`] definitions.

use std::str::FromStr;

use common::define_kind;
use derive_more::{AsRef, Display};

/// Media file attached to a CMS record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Media {
    /// [`FileId`] of this [`Media`].
    pub file: FileId,

    /// [`Kind`] of this [`Media`].
    pub kind: Kind,

    /// Title of this [`Media`], if any.
    pub title: Option<String>,
}

/// ID of a file in the CMS asset storage.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct FileId(String);

impl FileId {
    /// Creates a new [`FileId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`FileId`].
    fn check(id: &str) -> bool {
        !id.is_empty()
            && id.len() <= 64
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    }
}

impl FromStr for FileId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FileId`")
    }
}

define_kind! {
    #[doc = "Kind of a [`Media`]."]
    #[case = "lowercase"]
    enum Kind {
        #[doc = "Still image."]
        Image = 1,

        #[doc = "Video clip."]
        Video = 2,
    }
}

impl Kind {
    /// Detects the [`Kind`] of a file by its MIME type.
    ///
    /// Everything that is not a video is shown as an image.
    #[must_use]
    pub fn from_mime(mime: Option<&str>) -> Self {
        match mime {
            Some(m) if m.starts_with("video/") => Self::Video,
            Some(_) | None => Self::Image,
        }
    }
}
