//! Инфраструктурный слой вокруг движка:
//! - RNG-реализации для `RandomSource` (системная и детерминированная).

pub mod rng;

pub use rng::*;
