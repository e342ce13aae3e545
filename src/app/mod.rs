//! Application layer.
//!
//! # Structure
//!
//! - `model.rs` - Domain data (dishes, sections, themes, app state)
//! - `store.rs` - The single state store and its update operations
//! - `render.rs` - Pure state-to-document projections (preview & print)
//! - `gemini.rs` - Generative service adapter (worker-thread functions)
//! - `credentials.rs` - API key provisioning hook
//! - `qr.rs` / `images.rs` - QR boundary and photo ingestion
//! - `state.rs` - Main application coordinator (message handling)

pub mod credentials;
pub mod error;
pub mod file_filters;
pub mod gemini;
pub mod images;
pub mod messages;
pub mod model;
pub mod qr;
pub mod render;
pub mod settings;
pub mod state;
pub mod store;

// Re-exports for convenient external access
pub use error::{AppError, Result};
pub use messages::Message;
pub use model::{AppState, Dish, DishId, MenuSection, MenuTheme, SectionId, ThemeKind};
pub use settings::AppSettings;
pub use state::{EditorState, GenerationKind};
pub use store::{DishField, InfoField, MenuStore};
