use thiserror::Error;

/// Ошибки жизненного цикла пула
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Количество воркеров должно быть положительным: пул без воркеров
    /// никогда не разгрузит очередь
    #[error("worker count must be a positive integer")]
    InvalidWorkers,
    /// `start` уже вызывался на этом пуле
    #[error("pool has already been started")]
    AlreadyStarted,
    /// Очередь закрыта через `stop`, подача новой работы невозможна
    #[error("pool is stopped, the queue is closed")]
    Stopped,
}

/// Ошибки JSON-десериализации: либо чтение входа, либо разбор
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to deserialize JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
