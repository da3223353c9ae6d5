//! [`Command`] for submitting an [`Enquiry`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Enquiry,
    infra::{cms, Cms},
    Service,
};

use super::Command;

/// [`Command`] for submitting a contact [`Enquiry`] to the agency.
#[derive(Clone, Debug)]
pub struct SubmitEnquiry(pub Enquiry);

impl<C, M> Command<SubmitEnquiry> for Service<C, M>
where
    C: Cms<Insert<Enquiry>, Ok = (), Err = Traced<cms::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SubmitEnquiry(enquiry): SubmitEnquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let property_id = enquiry.property_id;
        self.cms()
            .execute(Insert(enquiry))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tracing::info!(?property_id, "enquiry submitted");
        Ok(())
    }
}

/// Error of [`SubmitEnquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),
}
