/// Снимок счетчиков пула
#[derive(Debug, Clone)]
pub struct PoolMetrics {
    pub pending: usize,
    pub processed: usize,
    pub failed: usize,
    pub workers: usize,
}

impl PoolMetrics {
    pub fn total_finished(&self) -> usize {
        self.processed + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        let finished = self.total_finished();
        if finished == 0 {
            return 1.0;
        }
        self.processed as f64 / finished as f64
    }
}


/// Состояние жизненного цикла пула
///
/// Переходы только вперед, возврата к предыдущим состояниям нет.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Создан, воркеры еще не запущены
    Constructed,
    /// Воркеры запущены, очередь принимает работу
    Running,
    /// Очередь закрыта, воркеры дорабатывают остаток
    Stopping,
    /// Очередь разгружена, все воркеры вышли
    Terminated,
}
