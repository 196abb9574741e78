//! Load errors. These never leave the store; they end up in logs and in
//! [`LoadOutcome::Failed`](crate::LoadOutcome::Failed).

use std::time::Duration;

use showroom_catalog::CatalogError;
use showroom_data::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] CatalogError),

    #[error("Catalog load timed out after {0:?}")]
    Timeout(Duration),
}
