//! Public operations: blocking show, worker-thread show with the result
//! posted back to the calling thread, channel delivery, and the plain
//! error box.

use std::ptr;
use std::sync::mpsc;
use std::thread;
use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    MB_ICONERROR, MB_OK, MB_SETFOREGROUND, MB_TASKMODAL, MessageBoxW,
};

use crate::request::MessageBoxRequest;
use crate::ui::dispatch::{self, DispatchHandle};
use crate::ui::modal::ModalScope;
use crate::ui::task_dialog;
use crate::utils::to_wstring;
use crate::{log_error, log_warn};

const WORKER_NAME: &str = "msgboxrs-dialog";

/// Owner window for a dialog. Copyable and sendable: an `HWND` is a
/// process-wide handle, not tied to the thread holding the wrapper.
#[derive(Debug, Clone, Copy)]
pub struct ParentWindow(HWND);

unsafe impl Send for ParentWindow {}

impl ParentWindow {
    /// The handle must come from the host's native window abstraction and
    /// outlive the dialog invocation.
    pub fn from_raw(hwnd: HWND) -> Self {
        Self(hwnd)
    }

    pub fn raw(&self) -> HWND {
        self.0
    }
}

fn owner_hwnd(parent: Option<ParentWindow>) -> HWND {
    parent.map(|p| p.raw()).unwrap_or(ptr::null_mut())
}

/// Show the dialog and block until it closes. Returns the zero-based index
/// of the chosen button, or the request's cancel index when the user
/// dismissed the dialog or the native call produced nothing actionable.
pub fn show(parent: Option<ParentWindow>, request: &MessageBoxRequest) -> usize {
    let owner = owner_hwnd(parent);
    let _modal = ModalScope::new(owner);
    match task_dialog::run(owner, request) {
        Ok(id) => request.map_pressed_id(id),
        Err(hr) => {
            log_error!("TaskDialogIndirect failed: HRESULT 0x{:08X}", hr as u32);
            request.cancel_index
        }
    }
}

struct Job {
    parent: Option<ParentWindow>,
    request: MessageBoxRequest,
    dispatch: DispatchHandle,
    on_close: Box<dyn FnOnce(usize) + Send + 'static>,
}

/// Show the dialog on a dedicated worker thread and invoke `on_close` with
/// the result on the calling thread, which must pump messages. If the
/// worker cannot be started (or this thread has no dispatcher), `on_close`
/// runs synchronously with the cancel index.
pub fn show_async<F>(parent: Option<ParentWindow>, request: MessageBoxRequest, on_close: F)
where
    F: FnOnce(usize) + Send + 'static,
{
    let cancel_index = request.cancel_index;
    let Some(handle) = dispatch::handle_for_current_thread() else {
        on_close(cancel_index);
        return;
    };

    // The worker starts idle and receives its one job over a channel, so a
    // failed spawn still leaves the callback on this side.
    let (tx, rx) = mpsc::channel::<Job>();
    let spawned = thread::Builder::new()
        .name(WORKER_NAME.into())
        .spawn(move || {
            if let Ok(job) = rx.recv() {
                let result = show(job.parent, &job.request);
                let on_close = job.on_close;
                if !job.dispatch.post(move || on_close(result)) {
                    log_warn!("dialog result dropped: control thread dispatcher is gone");
                }
            }
        });

    let job = Job {
        parent,
        request,
        dispatch: handle,
        on_close: Box::new(on_close),
    };
    match spawned {
        Ok(worker) => {
            let _ = tx.send(job);
            // The worker exits right after posting; no join needed.
            drop(worker);
        }
        Err(err) => {
            log_error!("message box worker failed to start: {err}");
            (job.on_close)(cancel_index);
        }
    }
}

/// No worker could run the dialog: the cancel index is the result, sent
/// before the caller ever blocks on the receiver.
fn deliver_spawn_failure(tx: &mpsc::Sender<usize>, cancel_index: usize) {
    let _ = tx.send(cancel_index);
}

/// Show the dialog on a dedicated worker thread and deliver the result
/// through a channel instead of a callback. Needs no message pump on the
/// calling thread. A failed spawn sends the cancel index immediately.
pub fn show_channel(
    parent: Option<ParentWindow>,
    request: MessageBoxRequest,
) -> mpsc::Receiver<usize> {
    let (tx, rx) = mpsc::channel();
    let cancel_index = request.cancel_index;
    let worker_tx = tx.clone();
    let spawned = thread::Builder::new()
        .name(WORKER_NAME.into())
        .spawn(move || {
            let result = show(parent, &request);
            let _ = worker_tx.send(result);
        });
    if let Err(err) = spawned {
        log_error!("message box worker failed to start: {err}");
        deliver_spawn_failure(&tx, cancel_index);
    }
    rx
}

/// Ownerless modal error box. Unlike [`show`] this never spawns a task
/// dialog, so it works without a comctl32 v6 manifest and is safe for
/// startup failures.
pub fn show_error_box(title: &str, content: &str) {
    let title_w = to_wstring(title);
    let content_w = to_wstring(content);
    unsafe {
        MessageBoxW(
            ptr::null_mut(),
            content_w.as_ptr(),
            title_w.as_ptr(),
            MB_OK | MB_ICONERROR | MB_TASKMODAL | MB_SETFOREGROUND,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parent_means_no_owner() {
        assert!(owner_hwnd(None).is_null());
        let parent = ParentWindow::from_raw(0x1234usize as HWND);
        assert_eq!(owner_hwnd(Some(parent)) as usize, 0x1234);
    }

    #[test]
    fn test_failed_worker_startup_yields_cancel_index() {
        let (tx, rx) = mpsc::channel();
        deliver_spawn_failure(&tx, 1);
        // Delivery is synchronous; the receiver must already hold the
        // cancel index without any worker running.
        assert_eq!(rx.try_recv().unwrap(), 1);
        assert!(rx.try_recv().is_err());
    }
}
