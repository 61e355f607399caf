use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        OnceLock,
    },
    time::{SystemTime, UNIX_EPOCH},
};


/// Источник случайных целых
///
/// Абстракция позволяет подставлять фиксированный источник в тестах вместо
/// ambient-глобального состояния.
pub trait RandSource {
    fn next_u32(&self) -> u32;
}

/// Быстрый НЕкриптографический генератор (xorshift64)
///
/// Состояние хранится в одном `AtomicU64`, поэтому инстанс можно свободно
/// шарить между потоками без локов. Генерация предсказуема — не использовать
/// там, где нужна криптографическая стойкость.
pub struct FastRand {
    state: AtomicU64,
}

impl FastRand {
    /// Инстанс, засеянный от системных часов
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::from_seed(seed)
    }

    /// Детерминированный инстанс для тестов
    pub fn from_seed(seed: u64) -> Self {
        Self {
            // xorshift застревает на нуле, младший бит страхует seed
            state: AtomicU64::new(seed | 1),
        }
    }

    /// Общий на процесс инстанс
    pub fn global() -> &'static FastRand {
        static GLOBAL: OnceLock<FastRand> = OnceLock::new();
        GLOBAL.get_or_init(FastRand::new)
    }

    #[inline(always)]
    fn step(mut s: u64) -> u64 {
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        s
    }

    pub fn next_u64(&self) -> u64 {
        let mut current = self.state.load(Ordering::Relaxed);
        loop {
            let next = Self::step(current);
            match self
                .state
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for FastRand {
    fn default() -> Self {
        Self::new()
    }
}

impl RandSource for FastRand {
    #[inline]
    fn next_u32(&self) -> u32 {
        // Старшие биты xorshift64 заметно качественнее младших
        (self.next_u64() >> 32) as u32
    }
}
