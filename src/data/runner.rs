use std::future::Future;

#[cfg(not(target_arch = "wasm32"))]
use {std::sync::Arc, tokio::runtime::Runtime};

use crate::data::{FetchError, FetchTicket};

/// `Send` on native, where tasks run on the tokio pool; nothing in the browser.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

/// Runs fetch futures off the UI thread: a shared tokio runtime on native, `spawn_local` on wasm.
#[derive(Clone)]
pub struct TaskRunner {
    #[cfg(not(target_arch = "wasm32"))]
    runtime: Arc<Runtime>,
}

impl TaskRunner {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("vix-fetch")
            .enable_all()
            .build()?;
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {})
    }

    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + MaybeSend + 'static,
    {
        #[cfg(not(target_arch = "wasm32"))]
        self.runtime.spawn(task);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(task);
    }

    /// Runs `work`, completes `ticket` with its result and asks the UI to repaint.
    pub fn run_fetch<T, F>(&self, ticket: FetchTicket<T>, repaint: Option<eframe::egui::Context>, work: F)
    where
        T: MaybeSend + 'static,
        F: Future<Output = Result<T, FetchError>> + MaybeSend + 'static,
    {
        self.spawn(async move {
            let result = work.await;
            ticket.complete(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::data::FetchSlot;
    use std::time::Duration;

    #[test]
    fn fetch_result_reaches_slot() {
        let runner = TaskRunner::new().unwrap();
        let mut slot: FetchSlot<u32> = FetchSlot::new("runner");
        let ticket = slot.begin().unwrap();
        runner.run_fetch(ticket, None, async { Ok(42) });

        let mut outcome = None;
        for _ in 0..200 {
            outcome = slot.poll();
            if outcome.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(outcome, Some(Ok(42)));
    }
}
