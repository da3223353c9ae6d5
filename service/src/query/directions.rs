//! [`Directions`] query definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        geo::{Coordinates, Origin, Route, TravelMode},
        listing, Listing,
    },
    infra::{cms, maps, Cms, Maps},
    Service,
};

use super::Query;

/// Queries a [`Route`] from an [`Origin`] to a [`Listing`].
///
/// Failures are reported as is, without retrying.
#[derive(Clone, Debug)]
pub struct Directions {
    /// [`Origin`] of the [`Route`].
    pub origin: Origin,

    /// [`listing::Id`] of the destination [`Listing`].
    pub listing_id: listing::Id,

    /// [`TravelMode`] of the [`Route`].
    pub mode: TravelMode,
}

impl<C, M> Query<Directions> for Service<C, M>
where
    C: Cms<
        Select<By<Option<Listing>, listing::Id>>,
        Ok = Option<Listing>,
        Err = Traced<cms::Error>,
    >,
    M: Maps<
        Select<By<Route, (Origin, Coordinates, TravelMode)>>,
        Ok = Route,
        Err = Traced<maps::Error>,
    >,
{
    type Ok = Route;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Directions {
            origin,
            listing_id,
            mode,
        }: Directions,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let destination = self
            .cms()
            .execute(Select(By::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?
            .coordinates
            .ok_or_else(|| E::NotLocated(listing_id))
            .map_err(tracerr::wrap!())?;

        self.maps()
            .execute(Select(By::new((origin, destination, mode))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`Directions`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),

    /// [`Maps`] error.
    #[display("`Maps` operation failed: {_0}")]
    Maps(maps::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`Listing`] with the provided ID has no [`Coordinates`].
    #[display("`Listing(id: {_0})` has no coordinates")]
    #[from(ignore)]
    NotLocated(#[error(not(source))] listing::Id),
}
