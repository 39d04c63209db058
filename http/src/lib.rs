pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{error_mapper, HttpError};
pub use extract::ValidatedJson;
pub use router::build_router;
pub use state::AppState;
