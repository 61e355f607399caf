//! Набор небольших независимых утилит для прикладного кода
//!
//! # Features
//! - Ограниченный пул воркеров с FIFO-очередью и отслеживанием завершения
//! - Graceful shutdown с таймаутами и защитой от паник в callback
//! - Быстрый некриптографический источник случайных чисел
//! - Короткие идентификаторы фиксированной длины (НЕ UUID)
//! - Обертки над serde_json для десериализации из reader
//! - Generic-хелперы: zero value и тернарный выбор

pub mod errors;
pub mod json;
pub mod model;
pub mod pool;
pub mod qol;
pub mod random;
pub mod uid;

pub use errors::{JsonError, PoolError};
pub use model::{PoolMetrics, PoolState};
pub use pool::{TaskPool, TaskPoolInner};
pub use random::{FastRand, RandSource};
pub use uid::Uid;
