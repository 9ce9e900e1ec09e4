use thiserror::Error;

use shopkeeper_shopify::AdminError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A remote call failed. Fatal to the run: earlier writes stay in
    /// effect, nothing further is attempted, no summary is produced.
    #[error(transparent)]
    Api(#[from] AdminError),

    /// The store kept returning pages past the hard ceiling, which means
    /// the cursor is not converging.
    #[error("page limit reached: fetched {max_pages} pages without exhausting the catalog")]
    PageLimit { max_pages: usize },

    /// The requested price adjustment is not a usable number.
    #[error("price adjustment percent must be a finite number, got {percent}")]
    InvalidPercent { percent: f64 },
}
