use tokio::sync::watch;
use tracing::warn;

/// Raises an interrupt for every [`Interrupt`] cloned from the same channel.
#[derive(Debug)]
pub struct InterruptHandle {
    tx: watch::Sender<u64>,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }
}

/// Cooperative stop request observed by the sampler between and during walks.
///
/// Interrupts are counted. A sampling run only reacts to interrupts raised after it
/// started, so one Ctrl-C stops the example being crawled, not the ones after it.
#[derive(Debug, Clone)]
pub struct Interrupt {
    rx: watch::Receiver<u64>,
}

impl Interrupt {
    pub fn channel() -> (InterruptHandle, Interrupt) {
        let (tx, rx) = watch::channel(0);
        (InterruptHandle { tx }, Interrupt { rx })
    }

    /// An interrupt that is never raised.
    pub fn never() -> Self {
        let (_handle, interrupt) = Self::channel();
        interrupt
    }

    /// An interrupt raised on every Ctrl-C. Must be called from within a tokio runtime.
    pub fn ctrl_c() -> Self {
        let (handle, interrupt) = Self::channel();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Could not listen for Ctrl-C, interruption disabled: {}", e);
                    break;
                }
                handle.interrupt();
            }
        });
        interrupt
    }

    /// Number of interrupts raised so far.
    pub fn generation(&self) -> u64 {
        *self.rx.borrow()
    }

    pub fn is_raised_since(&self, generation: u64) -> bool {
        self.generation() > generation
    }

    /// Resolves once an interrupt newer than `generation` is raised. Never resolves
    /// if no more interrupts can be raised.
    pub async fn raised_since(&self, generation: u64) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|current| *current > generation).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
