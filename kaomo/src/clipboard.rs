//! System clipboard writers.
//!
//! `arboard` is the primary path and `clipboard-rs` the fallback; they talk to
//! the OS through different backends, so one can succeed where the other
//! fails.
//!
//! On X11 and Wayland the process that set the clipboard has to keep serving
//! it, and the contents vanish once the backend context is dropped. Each writer
//! therefore owns one dedicated thread that opens its context on first use and
//! keeps it for the writer's lifetime. The context never leaves that thread.

#![cfg_attr(not(feature = "system-clipboard"), allow(dead_code))]

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Clipboard write failed: {0}")]
    Write(String),
    #[error("Clipboard task failed: {0}")]
    Join(String),
}

pub type ClipboardResult<T> = Result<T, ClipboardError>;

#[cfg(feature = "system-clipboard")]
pub use system::{ArboardClipboard, ClipboardRsClipboard};

// ═══════════════════════════════════════════════════════════════════════════════
// Owner thread
// ═══════════════════════════════════════════════════════════════════════════════

/// A clipboard context that only lives on its owner thread
pub(crate) trait TextBackend {
    fn set_text(&mut self, text: String) -> ClipboardResult<()>;
}

struct WriteJob {
    text: String,
    reply: oneshot::Sender<ClipboardResult<()>>,
}

/// Handle to a thread that owns one backend context.
///
/// The backend is opened on the first write and kept until every handle is
/// dropped. A failed open or write discards it, so the next write reopens.
pub(crate) struct ClipboardOwner {
    jobs: mpsc::UnboundedSender<WriteJob>,
}

impl ClipboardOwner {
    pub(crate) fn spawn<B, F>(name: &str, mut open: F) -> Self
    where
        B: TextBackend + 'static,
        F: FnMut() -> ClipboardResult<B> + Send + 'static,
    {
        let (jobs, mut queue) = mpsc::unbounded_channel::<WriteJob>();

        let spawned = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let mut backend: Option<B> = None;
                while let Some(job) = queue.blocking_recv() {
                    let result = ensure_backend(&mut backend, &mut open)
                        .and_then(|b| b.set_text(job.text));
                    if result.is_err() {
                        backend = None;
                    }
                    // The caller may have stopped waiting
                    let _ = job.reply.send(result);
                }
            });

        // Without a thread the queue is already closed and every write fails
        if let Err(e) = spawned {
            warn!(thread = name, error = %e, "Failed to start clipboard thread");
        }

        Self { jobs }
    }

    pub(crate) async fn write(&self, text: &str) -> ClipboardResult<()> {
        let (reply, done) = oneshot::channel();
        self.jobs
            .send(WriteJob {
                text: text.to_string(),
                reply,
            })
            .map_err(|_| ClipboardError::Unavailable("clipboard thread is not running".into()))?;
        done.await
            .map_err(|e| ClipboardError::Join(e.to_string()))?
    }
}

fn ensure_backend<'a, B, F>(slot: &'a mut Option<B>, open: &mut F) -> ClipboardResult<&'a mut B>
where
    F: FnMut() -> ClipboardResult<B>,
{
    if slot.is_none() {
        *slot = Some(open()?);
    }
    slot.as_mut()
        .ok_or_else(|| ClipboardError::Unavailable("clipboard context missing".into()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// System writers
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "system-clipboard")]
mod system {
    use super::{ClipboardError, ClipboardOwner, ClipboardResult, TextBackend};
    use crate::interface::ClipboardWriter;
    use clipboard_rs::{Clipboard as ClipboardTrait, ClipboardContext};

    struct ArboardBackend {
        clipboard: arboard::Clipboard,
        #[cfg_attr(
            not(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten")))),
            allow(dead_code)
        )]
        hand_off: bool,
    }

    impl TextBackend for ArboardBackend {
        fn set_text(&mut self, text: String) -> ClipboardResult<()> {
            #[cfg(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))))]
            {
                use arboard::SetExtLinux;
                if self.hand_off {
                    return self
                        .clipboard
                        .set()
                        .wait()
                        .text(text)
                        .map_err(|e| ClipboardError::Write(e.to_string()));
                }
            }
            self.clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::Write(e.to_string()))
        }
    }

    /// Primary writer backed by `arboard`
    pub struct ArboardClipboard {
        owner: ClipboardOwner,
    }

    impl ArboardClipboard {
        /// Keeps serving the clipboard for as long as the writer lives
        pub fn new() -> Self {
            Self::spawn(false)
        }

        /// For processes that exit right after copying. On X11 and Wayland each
        /// write blocks until another client has taken the contents over,
        /// usually a clipboard manager or the next paste.
        pub fn handing_off() -> Self {
            Self::spawn(true)
        }

        fn spawn(hand_off: bool) -> Self {
            let owner = ClipboardOwner::spawn("kaomo-arboard", move || {
                let clipboard = arboard::Clipboard::new()
                    .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
                Ok(ArboardBackend {
                    clipboard,
                    hand_off,
                })
            });
            Self { owner }
        }
    }

    impl Default for ArboardClipboard {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait::async_trait]
    impl ClipboardWriter for ArboardClipboard {
        async fn write_text(&self, text: &str) -> ClipboardResult<()> {
            self.owner.write(text).await
        }
    }

    struct ClipboardRsBackend {
        ctx: ClipboardContext,
    }

    impl TextBackend for ClipboardRsBackend {
        fn set_text(&mut self, text: String) -> ClipboardResult<()> {
            self.ctx
                .set_text(text)
                .map_err(|e| ClipboardError::Write(e.to_string()))
        }
    }

    /// Fallback writer backed by `clipboard-rs`. It has no hand-off wait, so
    /// on X11 and Wayland the contents last as long as the writer does.
    pub struct ClipboardRsClipboard {
        owner: ClipboardOwner,
    }

    impl ClipboardRsClipboard {
        pub fn new() -> Self {
            let owner = ClipboardOwner::spawn("kaomo-clipboard-rs", || {
                let ctx = ClipboardContext::new()
                    .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
                Ok(ClipboardRsBackend { ctx })
            });
            Self { owner }
        }
    }

    impl Default for ClipboardRsClipboard {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait::async_trait]
    impl ClipboardWriter for ClipboardRsClipboard {
        async fn write_text(&self, text: &str) -> ClipboardResult<()> {
            self.owner.write(text).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    /// Records what a context saw and whether it has been dropped
    #[derive(Default)]
    struct BackendLog {
        opens: AtomicUsize,
        live: AtomicUsize,
        fail_next_open: AtomicBool,
        fail_next_write: AtomicBool,
        written: Mutex<Vec<String>>,
    }

    struct FakeBackend {
        seen: Arc<BackendLog>,
    }

    impl TextBackend for FakeBackend {
        fn set_text(&mut self, text: String) -> ClipboardResult<()> {
            if self.seen.fail_next_write.swap(false, Ordering::SeqCst) {
                return Err(ClipboardError::Write("rejected".into()));
            }
            self.seen.written.lock().push(text);
            Ok(())
        }
    }

    impl Drop for FakeBackend {
        fn drop(&mut self) {
            self.seen.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn fake_owner(seen: &Arc<BackendLog>) -> ClipboardOwner {
        let seen = seen.clone();
        ClipboardOwner::spawn("kaomo-test-clipboard", move || {
            if seen.fail_next_open.swap(false, Ordering::SeqCst) {
                return Err(ClipboardError::Unavailable("no display".into()));
            }
            seen.opens.fetch_add(1, Ordering::SeqCst);
            seen.live.fetch_add(1, Ordering::SeqCst);
            Ok(FakeBackend { seen: seen.clone() })
        })
    }

    // ── context lifetime tests ─────────────────────────────────────

    #[test]
    fn test_context_outlives_the_write() {
        let rt = runtime();
        let seen = Arc::new(BackendLog::default());
        let owner = fake_owner(&seen);

        rt.block_on(owner.write("(╯°□°)╯︵ ┻━┻")).unwrap();
        // Still held after the write returned, so the contents keep being served
        assert_eq!(seen.live.load(Ordering::SeqCst), 1);

        rt.block_on(owner.write("(｡◕‿◕｡)")).unwrap();
        assert_eq!(seen.opens.load(Ordering::SeqCst), 1);
        assert_eq!(seen.live.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.written.lock(), vec!["(╯°□°)╯︵ ┻━┻", "(｡◕‿◕｡)"]);
    }

    #[test]
    fn test_context_released_when_writer_dropped() {
        let rt = runtime();
        let seen = Arc::new(BackendLog::default());
        let owner = fake_owner(&seen);
        rt.block_on(owner.write("(^_^)")).unwrap();
        drop(owner);

        let mut waited = 0;
        while seen.live.load(Ordering::SeqCst) != 0 && waited < 200 {
            std::thread::sleep(Duration::from_millis(10));
            waited += 1;
        }
        assert_eq!(seen.live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_nothing_opened_before_first_write() {
        let seen = Arc::new(BackendLog::default());
        let _owner = fake_owner(&seen);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(seen.opens.load(Ordering::SeqCst), 0);
    }

    // ── failure tests ──────────────────────────────────────────────

    #[test]
    fn test_open_failure_is_reported_and_retried() {
        let rt = runtime();
        let seen = Arc::new(BackendLog::default());
        seen.fail_next_open.store(true, Ordering::SeqCst);
        let owner = fake_owner(&seen);

        let err = rt.block_on(owner.write("(^_^)")).unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
        assert!(seen.written.lock().is_empty());

        rt.block_on(owner.write("(^_^)")).unwrap();
        assert_eq!(seen.opens.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.written.lock(), vec!["(^_^)"]);
    }

    #[test]
    fn test_write_failure_reopens_context() {
        let rt = runtime();
        let seen = Arc::new(BackendLog::default());
        let owner = fake_owner(&seen);

        rt.block_on(owner.write("(^_^)")).unwrap();
        seen.fail_next_write.store(true, Ordering::SeqCst);
        let err = rt.block_on(owner.write("(T_T)")).unwrap_err();
        assert!(matches!(err, ClipboardError::Write(_)));
        assert_eq!(seen.live.load(Ordering::SeqCst), 0);

        rt.block_on(owner.write("(T_T)")).unwrap();
        assert_eq!(seen.opens.load(Ordering::SeqCst), 2);
        assert_eq!(seen.live.load(Ordering::SeqCst), 1);
    }
}
