//! [`SearchLocations`] query definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::geo::Location,
    infra::{maps, Maps},
    Service,
};

use super::Query;

/// Queries [`Location`] candidates matching a free text, like `chatsw`.
///
/// Blank text matches nothing.
#[derive(Clone, Debug)]
pub struct SearchLocations {
    /// Text to search by.
    pub text: String,
}

impl<C, M> Query<SearchLocations> for Service<C, M>
where
    M: Maps<
        Select<By<Vec<Location>, String>>,
        Ok = Vec<Location>,
        Err = Traced<maps::Error>,
    >,
{
    type Ok = Vec<Location>;
    type Err = Traced<maps::Error>;

    async fn execute(
        &self,
        SearchLocations { text }: SearchLocations,
    ) -> Result<Self::Ok, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.maps()
            .execute(Select(By::new(text.to_owned())))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        infra::{
            http::mock::{respond, Scripted},
            maps::google::ApiKey,
            Google,
        },
        query::listings::spec::config,
        Query as _, Service,
    };

    use super::SearchLocations;

    #[tokio::test]
    async fn blank_text_finds_nothing() {
        let maps = Scripted::new(|_| respond(500, json!({})));
        let service = Service::new(
            config(),
            (),
            Google::new(maps.clone(), ApiKey::secret("key").unwrap(), None),
        );

        let found = service
            .execute(SearchLocations { text: "  ".into() })
            .await
            .unwrap();

        assert!(found.is_empty());
        assert!(maps.requests().is_empty());
    }

    #[tokio::test]
    async fn searches_trimmed_text() {
        let maps = Scripted::new(|_| {
            respond(
                200,
                json!({ "status": "OK", "results": [{ "address_components": [
                    { "long_name": "Chatswood", "types": ["locality"] },
                    { "long_name": "2067", "types": ["postal_code"] },
                ] }] }),
            )
        });
        let service = Service::new(
            config(),
            (),
            Google::new(maps.clone(), ApiKey::secret("key").unwrap(), None),
        );

        let found = service
            .execute(SearchLocations {
                text: " Chatswood ".into(),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.to_string(), "2067");
        assert_eq!(maps.requests()[0].param("address"), Some("Chatswood"));
    }
}
