//! Error types raised by the ranking engine.

use std::error::Error as StdError;

use firstcar_core::DescriptorError;
use thiserror::Error;

/// Errors raised while ranking vehicles.
#[derive(Debug, Error)]
pub enum RankingError {
    /// The catalog snapshot could not be read.
    #[error("failed to read the vehicle catalog")]
    Catalog {
        /// Backend-specific failure.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// The requested vehicle descriptor was malformed.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

impl RankingError {
    pub(crate) fn catalog<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Catalog {
            source: Box::new(source),
        }
    }
}
