pub mod build_info;
pub mod config;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod language;
pub mod mysql;
pub mod naming;
pub mod postgres;
pub mod reader;
pub mod render;
pub mod schema;
pub mod sqlite;
pub mod type_map;

// Re-export them for easier access from main.rs
pub use build_info::*;
pub use config::*;
pub use dialect::*;
pub use error::*;
pub use generator::*;
pub use language::*;
pub use naming::*;
pub use reader::*;
pub use render::*;
pub use schema::*;
pub use type_map::*;
