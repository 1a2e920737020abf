//! Конфигурация партии (задаётся при создании сессии и дальше не меняется).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::standard_catalog;
use crate::domain::deck::CatalogError;
use crate::domain::symbol::Symbol;
use crate::engine::errors::EngineError;
use crate::engine::shuffle::ShuffleRule;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub catalog: Vec<Symbol>,
    /// Сколько длится стартовый показ всех карт.
    pub peek_delay_ms: u64,
    /// Через сколько несовпавшая пара прячется обратно.
    pub hide_delay_ms: u64,
    pub score_baseline: i64,
    /// Штраф за каждый промах. Нижней границы у счёта нет.
    pub mismatch_penalty: i64,
    #[serde(default)]
    pub shuffle_rule: ShuffleRule,
}

impl GameConfig {
    /// Классическая партия: поле 4x5, 10 пар, по секунде на показ и на промах.
    pub fn standard() -> Self {
        Self {
            rows: 4,
            columns: 5,
            catalog: standard_catalog(),
            peek_delay_ms: 1000,
            hide_delay_ms: 1000,
            score_baseline: 100,
            mismatch_penalty: 1,
            shuffle_rule: ShuffleRule::FullRange,
        }
    }

    /// Минимальная конфигурация под произвольный каталог:
    /// одна строка из 2k плиток, остальное как в `standard()`.
    pub fn with_catalog(catalog: Vec<Symbol>) -> Self {
        let tiles = catalog.len() * 2;
        Self {
            rows: 1,
            columns: tiles,
            catalog,
            ..Self::standard()
        }
    }

    /// Размер поля; `None`, если `rows * columns` не помещается в `usize`.
    pub fn tile_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    pub fn peek_delay(&self) -> Duration {
        Duration::from_millis(self.peek_delay_ms)
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Проверка размеров и правил счёта до построения любого поля.
    /// Дубли символов отсекает `Deck::compose`.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        let tiles = self.catalog.len().checked_mul(2);
        let fits = matches!((self.tile_count(), tiles), (Some(a), Some(b)) if a == b);
        if !fits {
            return Err(CatalogError::DimensionMismatch {
                rows: self.rows,
                columns: self.columns,
                tiles: tiles.unwrap_or(usize::MAX),
            });
        }
        if self.mismatch_penalty < 0 {
            return Err(CatalogError::NegativePenalty(self.mismatch_penalty));
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}
