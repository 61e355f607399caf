use super::{
    errors::PoolError,
    model::{
        PoolMetrics,
        PoolState,
    },
};
use std::{
    panic::AssertUnwindSafe,
    sync::{
        atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
        Arc,
    },
};
use parking_lot::Mutex;
use tokio::{
    sync::{mpsc, Mutex as AsyncMutex, Notify},
    task::JoinHandle,
    time::Duration,
};


pub type TaskPool<T> = Arc<TaskPoolInner<T>>;

/// Ограниченный пул воркеров с общей FIFO-очередью
///
/// Пул принимает типизированные элементы через [`feed`](TaskPoolInner::feed),
/// раздает их фиксированному набору воркеров и отслеживает завершение всей
/// принятой работы через атомарный счетчик. Емкость очереди равна количеству
/// воркеров: как только очередь заполнена, `feed` приостанавливает вызывающий
/// контекст до освобождения места.
///
/// Жизненный цикл строго однонаправленный:
/// `Constructed -> Running (start) -> Stopping (stop) -> Terminated (drain)`.
/// Перезапуск не поддерживается: после `stop` очередь закрыта навсегда.
///
/// Гарантии:
/// - элементы извлекаются из очереди в порядке подачи (FIFO);
/// - порядок ЗАВЕРШЕНИЯ обработки между воркерами не гарантируется;
/// - callback вызывается ровно один раз на каждый принятый элемент;
/// - callback может вызываться конкурентно из нескольких воркеров, пул его
///   не сериализует.
pub struct TaskPoolInner<T> {
    sender: Mutex<Option<mpsc::Sender<T>>>,
    receiver: Arc<AsyncMutex<mpsc::Receiver<T>>>,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    workers: usize,
    pending: AtomicI64,
    processed: AtomicUsize,
    failed: AtomicUsize,
    started: AtomicBool,
    exited: AtomicUsize,
    drained: Notify,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Send + 'static> TaskPoolInner<T> {
    /// Создает пул с `workers` воркерами и функцией обработки
    ///
    /// Воркеры НЕ запускаются — для этого есть [`start`](TaskPoolInner::start).
    /// `workers == 0` отклоняется сразу: такой пул никогда не разгрузил бы
    /// очередь и `feed` завис бы навсегда после ее заполнения.
    pub fn new<F>(workers: usize, callback: F) -> Result<TaskPool<T>, PoolError>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        if workers == 0 {
            return Err(PoolError::InvalidWorkers);
        }
        Ok(Self::build(workers, callback))
    }

    /// Создает пул с количеством воркеров по числу CPU
    pub fn new_cpu<F>(callback: F) -> TaskPool<T>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self::build(num_cpus::get().max(1), callback)
    }

    fn build<F>(workers: usize, callback: F) -> TaskPool<T>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(workers);

        Arc::new(TaskPoolInner {
            sender: Mutex::new(Some(tx)),
            receiver: Arc::new(AsyncMutex::new(rx)),
            callback: Arc::new(callback),
            workers,
            pending: AtomicI64::new(0),
            processed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            started: AtomicBool::new(false),
            exited: AtomicUsize::new(0),
            drained: Notify::new(),
            handles: Mutex::new(Vec::with_capacity(workers)),
        })
    }

    /// Запускает ровно `workers` воркеров
    ///
    /// Повторный вызов отклоняется с [`PoolError::AlreadyStarted`] — иначе
    /// дубликаты воркеров гонялись бы за одной очередью.
    pub fn start(self: &Arc<Self>) -> Result<(), PoolError> {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PoolError::AlreadyStarted);
        }

        let mut handles = self.handles.lock();
        for _ in 0..self.workers {
            let pool = Arc::clone(self);
            handles.push(tokio::spawn(async move {
                pool.worker_loop().await;
            }));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(workers = self.workers, "task pool started");

        Ok(())
    }

    async fn worker_loop(&self) {
        loop {
            // Лочим receiver только на время извлечения, обработка идет
            // параллельно с остальными воркерами
            let item = {
                let mut rx = self.receiver.lock().await;
                rx.recv().await
            };

            let Some(item) = item else {
                // Очередь закрыта и разгружена
                break;
            };

            // Паника внутри callback не должна убивать воркера: элемент
            // считается failed, счетчик pending уменьшается в любом случае
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| (self.callback)(item)));
            match outcome {
                Ok(()) => {
                    self.processed.fetch_add(1, Ordering::Relaxed);
                }
                Err(_payload) => {
                    self.failed.fetch_add(1, Ordering::Relaxed);
                    #[cfg(feature = "tracing")]
                    tracing::warn!("callback panicked, item counted as failed");
                }
            }

            if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                self.drained.notify_waiters();
            }
        }

        self.exited.fetch_add(1, Ordering::AcqRel);
    }

    /// Подает один элемент в очередь
    ///
    /// Сначала инкрементирует счетчик pending, затем кладет элемент в канал.
    /// Если очередь заполнена — приостанавливает вызывающий контекст до
    /// освобождения места. После [`stop`](TaskPoolInner::stop) возвращает
    /// [`PoolError::Stopped`].
    pub async fn feed(&self, item: T) -> Result<(), PoolError> {
        let sender = match self.sender.lock().as_ref() {
            Some(tx) => tx.clone(),
            None => return Err(PoolError::Stopped),
        };

        self.pending.fetch_add(1, Ordering::AcqRel);

        if sender.send(item).await.is_err() {
            // Receiver дропнут — откатываем счетчик
            if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                self.drained.notify_waiters();
            }
            return Err(PoolError::Stopped);
        }

        Ok(())
    }

    /// Моментальный снимок: вся принятая работа обработана?
    ///
    /// Это НЕ барьер — конкурентный `feed` может сделать результат
    /// устаревшим сразу после чтения. Для стабильного сигнала "все готово"
    /// вызывающий сам не должен подавать новую работу.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.pending.load(Ordering::Acquire) == 0
    }

    /// Приостанавливается до завершения всей принятой работы
    ///
    /// Блокирующая альтернатива поллингу [`is_done`](TaskPoolInner::is_done).
    pub async fn wait(&self) {
        loop {
            let drained = self.drained.notified();
            if self.pending.load(Ordering::Acquire) == 0 {
                return;
            }
            drained.await;
        }
    }

    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.wait()).await.is_ok()
    }

    /// Закрывает очередь, сигнализируя воркерам завершиться после разгрузки
    ///
    /// Не ждет ни выхода воркеров, ни обнуления pending — для этого есть
    /// [`shutdown`](TaskPoolInner::shutdown). Повторный вызов — no-op.
    pub fn stop(&self) {
        let taken = self.sender.lock().take();

        #[cfg(feature = "tracing")]
        if taken.is_some() {
            tracing::debug!("task pool queue closed");
        }

        drop(taken);
    }

    /// Дожидается выхода всех воркеров
    ///
    /// Имеет смысл только после [`stop`](TaskPoolInner::stop): пока очередь
    /// открыта, воркеры не завершаются.
    pub async fn join(&self) {
        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.handles.lock());
        let _ = futures::future::join_all(handles).await;
    }

    /// Graceful shutdown: дождаться разгрузки, закрыть очередь, дождаться
    /// выхода воркеров
    ///
    /// Вызывающий не должен подавать новую работу конкурентно с `shutdown`,
    /// иначе ожидание разгрузки может не завершиться.
    pub async fn shutdown(&self) {
        self.wait().await;
        self.stop();
        self.join().await;
    }

    #[inline]
    pub fn metrics(&self) -> PoolMetrics {
        PoolMetrics {
            pending: self.pending.load(Ordering::Relaxed).max(0) as usize,
            processed: self.processed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            workers: self.workers,
        }
    }

    pub fn state(&self) -> PoolState {
        if !self.started.load(Ordering::Acquire) {
            return PoolState::Constructed;
        }
        if self.sender.lock().is_some() {
            return PoolState::Running;
        }
        if self.exited.load(Ordering::Acquire) == self.workers {
            PoolState::Terminated
        } else {
            PoolState::Stopping
        }
    }
}
