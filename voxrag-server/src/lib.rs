//! # voxrag-server
//!
//! The HTTP surface of VoxRAG: document ingestion (`/add-document`,
//! `/upload-pdf`), grounded question answering (`/query`), and corpus
//! management (`/clear-database`, `/stats`).
//!
//! The retrieval engine ([`voxrag_retrieval`]) does the heavy lifting;
//! this crate validates input, maps errors onto HTTP statuses, composes
//! the generation prompt, and delegates answering to a
//! [`voxrag_model::Generator`].

pub mod composer;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pdf;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::api_routes;
pub use state::AppState;
