//! MenuCraft: a desktop menu designer for restaurants.
//!
//! The `app` module holds the domain model, the single state store, the
//! pure preview/print renderers and the generative service adapter; the
//! `ui` module holds the FLTK widgets. All mutation flows through typed
//! messages handled by `app::state::EditorState`.

pub mod app;
pub mod ui;
