//! Task posting back to a control thread through its message queue. Each
//! thread that wants results delivered owns one hidden message-only window;
//! any thread can post a boxed closure to it with `PostMessageW`.

use std::cell::RefCell;
use std::ptr;
use std::sync::Once;
use windows_sys::Win32::Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, MSG, PM_REMOVE, PeekMessageW, PostMessageW,
    RegisterClassW, WM_APP, WNDCLASSW,
};

use crate::{log_warn, w};

const WM_RUN_TASK: u32 = WM_APP + 1;

type Task = Box<dyn FnOnce() + Send + 'static>;

static REGISTER_CLASS: Once = Once::new();

unsafe extern "system" fn dispatch_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_RUN_TASK && lparam != 0 {
        let task = unsafe { Box::from_raw(lparam as *mut Task) };
        (*task)();
        return 0;
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// Hidden message-only window owned by the thread that created it. The
/// owning thread must pump messages for queued tasks to run.
pub struct Dispatcher {
    hwnd: HWND,
}

impl Dispatcher {
    pub fn new() -> Result<Self, u32> {
        let class_name = w!("msgboxrs.dispatch");
        unsafe {
            let instance = GetModuleHandleW(ptr::null());
            REGISTER_CLASS.call_once(|| {
                let mut wc: WNDCLASSW = std::mem::zeroed();
                wc.lpfnWndProc = Some(dispatch_wnd_proc);
                wc.hInstance = instance;
                wc.lpszClassName = class_name.as_ptr();
                RegisterClassW(&wc);
            });

            let hwnd_message: HWND = -3isize as HWND;
            let hwnd = CreateWindowExW(
                0,
                class_name.as_ptr(),
                ptr::null(),
                0,
                0,
                0,
                0,
                0,
                hwnd_message,
                ptr::null_mut(),
                instance,
                ptr::null(),
            );
            if hwnd.is_null() {
                Err(GetLastError())
            } else {
                Ok(Self { hwnd })
            }
        }
    }

    pub fn handle(&self) -> DispatchHandle {
        DispatchHandle { hwnd: self.hwnd }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        unsafe {
            // Tasks still queued for this window would be discarded by
            // DestroyWindow without reaching the wndproc, leaking the
            // boxes. Pull and free them first; a handle outliving the
            // window only fails its posts from here on.
            let mut msg: MSG = std::mem::zeroed();
            while PeekMessageW(&mut msg, self.hwnd, WM_RUN_TASK, WM_RUN_TASK, PM_REMOVE) != 0 {
                if msg.lParam != 0 {
                    drop(Box::from_raw(msg.lParam as *mut Task));
                }
            }
            DestroyWindow(self.hwnd);
        }
    }
}

/// Sendable posting end of a [`Dispatcher`]. An `HWND` is a process-wide
/// handle and `PostMessageW` is thread-safe.
#[derive(Clone, Copy)]
pub struct DispatchHandle {
    hwnd: HWND,
}

unsafe impl Send for DispatchHandle {}

impl DispatchHandle {
    /// Queue a task for the dispatcher's owning thread. Returns false if
    /// the message could not be posted; the task is dropped in that case.
    pub fn post(&self, task: impl FnOnce() + Send + 'static) -> bool {
        let boxed: Box<Task> = Box::new(Box::new(task));
        let raw = Box::into_raw(boxed);
        let posted = unsafe { PostMessageW(self.hwnd, WM_RUN_TASK, 0, raw as LPARAM) } != 0;
        if !posted {
            drop(unsafe { Box::from_raw(raw) });
        }
        posted
    }
}

thread_local! {
    static THREAD_DISPATCHER: RefCell<Option<Dispatcher>> = const { RefCell::new(None) };
}

/// Posting handle for the calling thread's dispatcher, created lazily.
/// `None` if the hidden window could not be created.
pub fn handle_for_current_thread() -> Option<DispatchHandle> {
    THREAD_DISPATCHER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            match Dispatcher::new() {
                Ok(dispatcher) => *slot = Some(dispatcher),
                Err(code) => {
                    log_warn!("dispatch window creation failed: {code}");
                    return None;
                }
            }
        }
        slot.as_ref().map(|d| d.handle())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_pending_tasks_are_freed_on_drop() {
        let dispatcher = Dispatcher::new().unwrap();
        let handle = dispatcher.handle();

        let marker = Arc::new(());
        let captured = Arc::clone(&marker);
        assert!(handle.post(move || {
            let _ = &captured;
        }));

        // Never pumped; dropping the dispatcher must free the queued task
        // along with everything it captured.
        drop(dispatcher);
        assert_eq!(Arc::strong_count(&marker), 1);
    }

    #[test]
    fn test_post_fails_after_window_is_gone() {
        let dispatcher = Dispatcher::new().unwrap();
        let handle = dispatcher.handle();
        drop(dispatcher);

        let marker = Arc::new(());
        let captured = Arc::clone(&marker);
        assert!(!handle.post(move || {
            let _ = &captured;
        }));
        // The rejected task is freed by post itself.
        assert_eq!(Arc::strong_count(&marker), 1);
    }
}
