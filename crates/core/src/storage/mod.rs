mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::MigrationStore;
pub use types::ScanPage;
