use std::ffi::c_void;
use windows_sys::Win32::Foundation::GetLastError;
use windows_sys::Win32::Graphics::Gdi::{CreateBitmap, DeleteObject};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateIconIndirect, DestroyIcon, HICON, ICONINFO,
};

use crate::icon::IconImage;

/// Owned `HICON`, destroyed on drop.
pub struct OwnedHicon {
    handle: HICON,
}

impl OwnedHicon {
    /// Build a 32bpp icon from RGBA pixels. Errors carry `GetLastError`.
    pub fn from_image(image: &IconImage) -> Result<Self, u32> {
        let width = image.width() as i32;
        let height = image.height() as i32;

        // GDI wants BGRA with premultiplied alpha for the color plane.
        let mut bgra = Vec::with_capacity(image.rgba().len());
        for px in image.rgba().chunks_exact(4) {
            let a = px[3] as u32;
            bgra.push(((px[2] as u32 * a + 127) / 255) as u8);
            bgra.push(((px[1] as u32 * a + 127) / 255) as u8);
            bgra.push(((px[0] as u32 * a + 127) / 255) as u8);
            bgra.push(px[3]);
        }

        unsafe {
            let color = CreateBitmap(width, height, 1, 32, bgra.as_ptr() as *const c_void);
            if color.is_null() {
                return Err(GetLastError());
            }

            // All-zero 1bpp AND mask; transparency comes from the alpha
            // channel. Mask rows are WORD-aligned.
            let mask_stride = (((width + 15) / 16) * 2) as usize;
            let mask_bits = vec![0u8; mask_stride * height as usize];
            let mask = CreateBitmap(width, height, 1, 1, mask_bits.as_ptr() as *const c_void);
            if mask.is_null() {
                let code = GetLastError();
                DeleteObject(color);
                return Err(code);
            }

            let info = ICONINFO {
                fIcon: 1,
                xHotspot: 0,
                yHotspot: 0,
                hbmMask: mask,
                hbmColor: color,
            };
            let handle = CreateIconIndirect(&info);
            let code = GetLastError();

            // The icon holds its own copies of the bitmaps.
            DeleteObject(mask);
            DeleteObject(color);

            if handle.is_null() { Err(code) } else { Ok(Self { handle }) }
        }
    }

    pub fn as_raw(&self) -> HICON {
        self.handle
    }
}

impl Drop for OwnedHicon {
    fn drop(&mut self) {
        unsafe {
            DestroyIcon(self.handle);
        }
    }
}
