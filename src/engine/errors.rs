use crate::domain::deck::CatalogError;
use crate::domain::TilePosition;

use thiserror::Error;

/// Ошибки движка игры.
///
/// Клики по открытым/найденным плиткам и клики во время ожидания скрытия
/// сюда НЕ попадают: это нормальное поведение игрока, движок их просто игнорирует.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Некорректный каталог: {0}")]
    InvalidCatalog(#[from] CatalogError),

    #[error("Позиция {position} вне поля из {board_len} плиток")]
    InvalidClick {
        position: TilePosition,
        board_len: usize,
    },

    #[error("Не удалось разобрать конфигурацию: {0}")]
    Config(#[from] serde_json::Error),
}
