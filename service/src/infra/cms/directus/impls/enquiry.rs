//! [`Enquiry`]-related [`Cms`] implementations.

use common::operations::Insert;
use serde_json::json;
use tracerr::Traced;

use crate::{
    domain::Enquiry,
    infra::{
        cms,
        http::{Method, Request, Transport},
        Cms,
    },
};

use super::super::{schema, Directus};

impl<T: Transport> Cms<Insert<Enquiry>> for Directus<T> {
    type Ok = ();
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Insert(enquiry): Insert<Enquiry>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = json!({
            "name": enquiry.name.to_string(),
            "email": enquiry.email.to_string(),
            "phone": enquiry.phone.map(|p| p.to_string()),
            "message": enquiry.message.to_string(),
            "property_id": enquiry.property_id.map(u64::from),
        });
        let path = format!("/items/{}", schema::ENQUIRIES);
        self.send(Request::new(Method::Post, path).json(body))
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;
    use serde_json::json;

    use crate::{
        domain::{
            enquiry::{Message, Name},
            user::Email,
            Enquiry,
        },
        infra::{
            http::mock::{respond, Scripted},
            Cms, Directus,
        },
    };

    #[tokio::test]
    async fn posts_enquiry() {
        let transport = Scripted::new(|_| respond(200, json!({ "data": {} })));
        let cms = Directus::new(transport.clone());

        cms.execute(Insert(Enquiry {
            name: Name::new("Jane Doe").unwrap(),
            email: Email::new("jane@example.com").unwrap(),
            phone: None,
            message: Message::new("Is the open home still on?").unwrap(),
            property_id: None,
        }))
        .await
        .unwrap();

        let req = &transport.requests()[0];
        assert_eq!(req.path, "/items/enquiries");
        assert_eq!(
            req.body,
            Some(json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "phone": null,
                "message": "Is the open home still on?",
                "property_id": null,
            })),
        );
    }
}
