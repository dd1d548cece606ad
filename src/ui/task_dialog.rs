//! The single native call: build a `TASKDIALOGCONFIG` from a request and
//! run `TaskDialogIndirect`.

use std::ptr;
use windows_sys::Win32::Foundation::{HWND, S_OK};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Controls::{
    TASKDIALOG_BUTTON, TASKDIALOGCONFIG, TASKDIALOGCONFIG_0, TDF_ALLOW_DIALOG_CANCELLATION,
    TDF_SIZE_TO_CONTENT, TDF_USE_HICON_MAIN, TaskDialogIndirect,
};
use windows_sys::core::PCWSTR;

use crate::icon::{BuiltinIcon, ResolvedIcon, resolve_icon};
use crate::log_warn;
use crate::request::{BUTTON_ID_OFFSET, ContentLayout, MessageBoxRequest};
use crate::ui::hicon::OwnedHicon;
use crate::utils::to_wstring;

// TD_*_ICON are MAKEINTRESOURCEW(-1..-3) macros in the SDK headers.
const TD_WARNING_ICON: PCWSTR = 0xFFFF_usize as PCWSTR;
const TD_ERROR_ICON: PCWSTR = 0xFFFE_usize as PCWSTR;
const TD_INFORMATION_ICON: PCWSTR = 0xFFFD_usize as PCWSTR;

fn stock_icon(glyph: BuiltinIcon) -> PCWSTR {
    match glyph {
        BuiltinIcon::Information => TD_INFORMATION_ICON,
        BuiltinIcon::Warning => TD_WARNING_ICON,
        BuiltinIcon::Error => TD_ERROR_ICON,
    }
}

/// Native button rows for the given UTF-16 labels, IDs assigned from
/// [`BUTTON_ID_OFFSET`] in sequence order.
fn button_rows(labels: &[Vec<u16>]) -> Vec<TASKDIALOG_BUTTON> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| TASKDIALOG_BUTTON {
            nButtonID: BUTTON_ID_OFFSET + i as i32,
            pszButtonText: label.as_ptr(),
        })
        .collect()
}

/// Run the task dialog modally and return the raw identifier of the button
/// the user activated (0 if none). `Err` carries the failing HRESULT.
///
/// Blocks the calling thread until the dialog closes.
pub fn run(owner: HWND, request: &MessageBoxRequest) -> Result<i32, i32> {
    let title = to_wstring(&request.title);
    let message = to_wstring(&request.message);
    let detail = to_wstring(&request.detail);

    // Labels and button rows must outlive the native call.
    let labels: Vec<Vec<u16>> = request.buttons.iter().map(|b| to_wstring(b)).collect();
    let buttons = button_rows(&labels);

    let mut flags = TDF_SIZE_TO_CONTENT; // show all content
    if request.is_cancelable() {
        flags |= TDF_ALLOW_DIALOG_CANCELLATION;
    }

    let mut config: TASKDIALOGCONFIG = unsafe { std::mem::zeroed() };
    config.cbSize = std::mem::size_of::<TASKDIALOGCONFIG>() as u32;
    config.hwndParent = owner;
    config.hInstance = unsafe { GetModuleHandleW(ptr::null()) };
    config.pszWindowTitle = title.as_ptr();
    if !buttons.is_empty() {
        config.pButtons = buttons.as_ptr();
        config.cButtons = buttons.len() as u32;
    }

    // A caller-supplied icon wins over the kind's stock glyph. The HICON
    // must stay alive until TaskDialogIndirect returns.
    let mut owned_icon: Option<OwnedHicon> = None;
    match resolve_icon(request.kind, request.icon.as_ref()) {
        ResolvedIcon::Custom(image) => match OwnedHicon::from_image(image) {
            Ok(icon) => {
                flags |= TDF_USE_HICON_MAIN;
                config.Anonymous1 = TASKDIALOGCONFIG_0 { hMainIcon: icon.as_raw() };
                owned_icon = Some(icon);
            }
            Err(code) => {
                log_warn!("icon conversion failed ({code}), using the stock glyph");
                config.Anonymous1 = TASKDIALOGCONFIG_0 {
                    pszMainIcon: stock_icon(request.kind.into()),
                };
            }
        },
        ResolvedIcon::Builtin(glyph) => {
            config.Anonymous1 = TASKDIALOGCONFIG_0 { pszMainIcon: stock_icon(glyph) };
        }
    }

    match request.content_layout() {
        ContentLayout::Plain(_) => {
            config.pszContent = message.as_ptr();
        }
        ContentLayout::Highlighted { .. } => {
            config.pszMainInstruction = message.as_ptr();
            config.pszContent = detail.as_ptr();
        }
    }

    config.dwFlags = flags;

    let mut pressed: i32 = 0;
    let hr = unsafe { TaskDialogIndirect(&config, &mut pressed, ptr::null_mut(), ptr::null_mut()) };
    drop(owned_icon);
    if hr != S_OK {
        return Err(hr);
    }
    Ok(pressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_ids_start_at_offset() {
        let labels = vec![to_wstring("OK"), to_wstring("Cancel"), to_wstring("Retry")];
        let rows = button_rows(&labels);
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            let id = row.nButtonID;
            assert_eq!(id, BUTTON_ID_OFFSET + i as i32);
        }
    }

    #[test]
    fn test_stock_icon_glyphs_are_distinct() {
        assert_ne!(stock_icon(BuiltinIcon::Information), stock_icon(BuiltinIcon::Warning));
        assert_ne!(stock_icon(BuiltinIcon::Warning), stock_icon(BuiltinIcon::Error));
    }
}
