//! # filedrop-server
//!
//! HTTP surface of the filedrop file-sharing service.
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/register` | POST | create an account (JSON `username`, `password`) |
//! | `/login` | POST | check a password, returns `is_admin` |
//! | `/list_users` | GET | non-admin usernames |
//! | `/upload` | POST | multipart `file` + `sender`, `receiver` |
//! | `/list_files` | GET | all uploaded file records |
//! | `/download/{id}` | GET | stream a stored file |
//! | `/healthz` | GET | liveness |

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ServerError};
pub use routes::create_router;
pub use server::FiledropServer;
pub use state::AppState;
