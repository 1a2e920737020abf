use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::symbol::Symbol;

/// Почему каталог/конфигурация не годится для построения поля.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("каталог символов пуст")]
    Empty,

    #[error("символ `{0}` встречается в каталоге больше одного раза")]
    DuplicateSymbol(String),

    #[error("поле {rows}x{columns} не совпадает с колодой из {tiles} плиток")]
    DimensionMismatch {
        rows: usize,
        columns: usize,
        tiles: usize,
    },

    #[error("штраф за промах не может быть отрицательным: {0}")]
    NegativePenalty(i64),
}

/// Колода: каждый символ каталога ровно дважды.
/// Перемешивание делает engine (через RandomSource), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub symbols: Vec<Symbol>,
}

impl Deck {
    /// Собрать колоду из каталога в порядке "символ, затем его дубль":
    /// [A, B] -> [A, A, B, B].
    pub fn compose(catalog: &[Symbol]) -> Result<Self, CatalogError> {
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(catalog.len());
        for symbol in catalog {
            if !seen.insert(symbol.id()) {
                return Err(CatalogError::DuplicateSymbol(symbol.id.clone()));
            }
        }

        let mut symbols = Vec::with_capacity(catalog.len() * 2);
        for symbol in catalog {
            symbols.push(symbol.clone());
            symbols.push(symbol.clone());
        }

        Ok(Deck { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Количество пар (k).
    pub fn pair_count(&self) -> usize {
        self.symbols.len() / 2
    }
}
