//! Перемешивание колоды.

use serde::{Deserialize, Serialize};

use crate::engine::RandomSource;

/// Из какого диапазона берётся индекс для обмена на шаге `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleRule {
    /// `j` из всего диапазона `[0, n)`. Распределение перестановок НЕ равномерное,
    /// но именно так всегда тасовалась колода в этой игре.
    #[default]
    FullRange,
    /// `j` из оставшегося диапазона `[i, n)` (Фишер–Йейтс), равномерно.
    RemainingRange,
}

/// Для каждого `i` от первого до последнего: выбрать `j` и поменять `i` и `j` местами.
pub fn shuffle<T, R>(slice: &mut [T], rng: &mut R, rule: ShuffleRule)
where
    R: RandomSource + ?Sized,
{
    let n = slice.len();
    for i in 0..n {
        let j = match rule {
            ShuffleRule::FullRange => rng.next_index(n),
            ShuffleRule::RemainingRange => i + rng.next_index(n - i),
        };
        slice.swap(i, j);
    }
}
