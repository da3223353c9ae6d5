//! Infrastructure layer.

pub mod cms;
pub mod http;
pub mod maps;

#[cfg(feature = "directus")]
pub use self::cms::Directus;
#[cfg(feature = "google")]
pub use self::maps::Google;
pub use self::{cms::Cms, http::Http, maps::Maps};
