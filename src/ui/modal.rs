use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{EnableWindow, IsWindowEnabled};
use windows_sys::Win32::UI::WindowsAndMessaging::{IsWindow, SetForegroundWindow};

/// Marks a modal dialog active for an owner window: the owner is disabled
/// for the guard's lifetime and restored on drop. A null or already
/// disabled owner is left untouched, so nested modals compose.
pub struct ModalScope {
    owner: HWND,
    restore: bool,
}

impl ModalScope {
    pub fn new(owner: HWND) -> Self {
        let restore = !owner.is_null()
            && unsafe { IsWindow(owner) != 0 && IsWindowEnabled(owner) != 0 };
        if restore {
            unsafe {
                EnableWindow(owner, 0);
            }
        }
        Self { owner, restore }
    }
}

impl Drop for ModalScope {
    fn drop(&mut self) {
        if self.restore {
            unsafe {
                EnableWindow(self.owner, 1);
                SetForegroundWindow(self.owner);
            }
        }
    }
}
