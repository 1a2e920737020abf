//! Доменная модель игры: символы, плитки, колода, каталог, конфигурация.

pub mod catalog;
pub mod config;
pub mod deck;
pub mod symbol;
pub mod tile;

/// Индекс плитки на поле (0-based, построчно).
pub type TilePosition = usize;
/// Номер поколения партии: растёт на каждом restart.
pub type Generation = u64;

pub use catalog::*;
pub use config::GameConfig;
pub use deck::{CatalogError, Deck};
pub use symbol::Symbol;
pub use tile::{FaceState, Tile};
