use serde::{Deserialize, Serialize};

use crate::domain::TilePosition;
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битая текстовая команда).
    BadRequest(String),

    /// Клик мимо поля.
    InvalidClick {
        position: TilePosition,
        board_len: usize,
    },

    /// Каталог или конфигурация не годятся для партии.
    InvalidConfig(String),

    /// Внутренняя ошибка (например, рантайм сессии уже остановлен).
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidClick {
                position,
                board_len,
            } => ApiError::InvalidClick {
                position,
                board_len,
            },
            other @ (EngineError::InvalidCatalog(_) | EngineError::Config(_)) => {
                ApiError::InvalidConfig(other.to_string())
            }
        }
    }
}
