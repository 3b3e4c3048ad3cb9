//! System-backed collaborators: default-handler launching and the clipboard.

use super::services::{Clipboard, FileLauncher};
use crate::domain::{FlashfindError, Result};
use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};

/// Launches paths with the operating system's default handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl FileLauncher for SystemLauncher {
    fn open_file(&self, path: String) -> BoxFuture<'static, Result<()>> {
        Box::pin(async move {
            tracing::debug!(path = %path, "opening with default handler");
            open::that_detached(&path).map_err(|e| FlashfindError::Launch(format!("{path}: {e}")))
        })
    }

    fn show_in_folder(&self, path: String) -> BoxFuture<'static, Result<()>> {
        Box::pin(async move {
            tracing::debug!(path = %path, "revealing in file manager");
            reveal(&path).map_err(|e| FlashfindError::Launch(format!("{path}: {e}")))
        })
    }
}

#[cfg(target_os = "windows")]
fn reveal(path: &str) -> std::io::Result<()> {
    std::process::Command::new("explorer")
        .args(["/select,", path])
        .spawn()
        .map(drop)
}

#[cfg(target_os = "macos")]
fn reveal(path: &str) -> std::io::Result<()> {
    std::process::Command::new("open")
        .args(["-R", path])
        .spawn()
        .map(drop)
}

/// File managers without a common "select" protocol get the parent folder.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn reveal(path: &str) -> std::io::Result<()> {
    let parent = std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "path has no parent folder"))?;
    open::that_detached(parent)
}

/// Clipboard backed by `arboard`.
///
/// The `arboard` handle lives on a dedicated thread for the lifetime of the
/// process: on X11 the clipboard contents are served by the owning process and
/// vanish when the handle is dropped.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    requests: mpsc::UnboundedSender<ClipboardRequest>,
}

#[derive(Debug)]
struct ClipboardRequest {
    text: String,
    reply: oneshot::Sender<Result<()>>,
}

impl SystemClipboard {
    /// Starts the clipboard thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn() -> Result<Self> {
        let (requests, receiver) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("flashfind-clipboard".to_string())
            .spawn(move || serve_clipboard(receiver))?;
        Ok(Self { requests })
    }
}

fn serve_clipboard(mut receiver: mpsc::UnboundedReceiver<ClipboardRequest>) {
    let mut handle: Option<arboard::Clipboard> = None;

    while let Some(request) = receiver.blocking_recv() {
        let result = write_clipboard(&mut handle, request.text);
        let _ = request.reply.send(result);
    }
    tracing::debug!("clipboard thread stopped");
}

fn write_clipboard(handle: &mut Option<arboard::Clipboard>, text: String) -> Result<()> {
    if handle.is_none() {
        let clipboard = arboard::Clipboard::new().map_err(|e| FlashfindError::Clipboard(e.to_string()))?;
        *handle = Some(clipboard);
    }
    let clipboard = handle
        .as_mut()
        .ok_or_else(|| FlashfindError::Clipboard("no clipboard available".to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| FlashfindError::Clipboard(e.to_string()))
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<()>> {
        let requests = self.requests.clone();
        Box::pin(async move {
            let (reply, response) = oneshot::channel();
            requests
                .send(ClipboardRequest { text, reply })
                .map_err(|_| FlashfindError::Clipboard("clipboard thread is gone".to_string()))?;
            response
                .await
                .map_err(|_| FlashfindError::Clipboard("clipboard thread dropped the request".to_string()))?
        })
    }
}
