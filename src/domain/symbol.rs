use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Лицевая сторона карты.
///
/// Идентичность символа определяется только `id`. Ссылка на картинку (`artwork`) нужна
/// лишь слою отображения и в сравнении НЕ участвует.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Symbol {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

impl Symbol {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            artwork: None,
        }
    }

    pub fn with_artwork(id: impl Into<String>, artwork: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            artwork: Some(artwork.into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
