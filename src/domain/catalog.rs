//! Стандартный каталог символов и резолвинг картинок для слоя отображения.
//!
//! Ядро игры картинки не загружает: ему достаточно стабильного `Symbol::id`.

use std::path::PathBuf;

use crate::domain::symbol::Symbol;

/// Идентификаторы стандартного набора (10 символов => поле 4x5).
pub const STANDARD_SYMBOL_IDS: [&str; 10] = [
    "ember", "frost", "gale", "grove", "ion", "lumen", "magma", "nimbus", "shade", "tide",
];

/// Расширение картинок стандартного набора.
pub const STANDARD_ARTWORK_EXT: &str = "jpg";

/// Стандартный каталог: у каждого символа ссылка на `img/<id>.jpg`.
pub fn standard_catalog() -> Vec<Symbol> {
    STANDARD_SYMBOL_IDS
        .iter()
        .map(|id| Symbol::with_artwork(*id, format!("img/{}.{}", id, STANDARD_ARTWORK_EXT)))
        .collect()
}

/// Каталог без картинок из произвольных идентификаторов (удобно для тестов и CLI).
pub fn catalog_from_ids<I, S>(ids: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Symbol::new).collect()
}

/// Откуда слой отображения берёт картинку для символа.
pub trait ArtworkResolver {
    type Handle;

    fn resolve_artwork(&self, symbol: &Symbol) -> Option<Self::Handle>;
}

/// Картинки лежат в одном каталоге как `<id>.<ext>`.
///
/// Явно заданный `Symbol::artwork` имеет приоритет и берётся относительно `base_dir`.
#[derive(Clone, Debug)]
pub struct DirectoryArtworkResolver {
    pub base_dir: PathBuf,
    pub extension: String,
}

impl DirectoryArtworkResolver {
    pub fn new(base_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            extension: extension.into(),
        }
    }
}

impl ArtworkResolver for DirectoryArtworkResolver {
    type Handle = PathBuf;

    fn resolve_artwork(&self, symbol: &Symbol) -> Option<PathBuf> {
        if symbol.id.is_empty() {
            return None;
        }
        let path = match &symbol.artwork {
            Some(explicit) => self.base_dir.join(explicit),
            None => self
                .base_dir
                .join(format!("{}.{}", symbol.id, self.extension)),
        };
        Some(path)
    }
}
