use crate::request::MessageBoxKind;

/// Caller-supplied dialog icon: tightly packed 8-bit RGBA pixels, row-major
/// from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl IconImage {
    /// Returns `None` for zero dimensions or a pixel buffer whose length
    /// does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let expected = (width as usize).checked_mul(height as usize)?.checked_mul(4)?;
        if rgba.len() != expected {
            return None;
        }
        Some(Self { width, height, rgba })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Stock task dialog glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinIcon {
    Information,
    Warning,
    Error,
}

impl From<MessageBoxKind> for BuiltinIcon {
    fn from(kind: MessageBoxKind) -> Self {
        match kind {
            MessageBoxKind::Information => BuiltinIcon::Information,
            MessageBoxKind::Warning => BuiltinIcon::Warning,
            MessageBoxKind::Error => BuiltinIcon::Error,
        }
    }
}

/// Icon to render in the dialog's main icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedIcon<'a> {
    Builtin(BuiltinIcon),
    Custom(&'a IconImage),
}

/// A caller-supplied image always wins over the kind's stock glyph.
pub fn resolve_icon(kind: MessageBoxKind, icon: Option<&IconImage>) -> ResolvedIcon<'_> {
    match icon {
        Some(image) => ResolvedIcon::Custom(image),
        None => ResolvedIcon::Builtin(kind.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pixel() -> IconImage {
        IconImage::from_rgba(1, 1, vec![0xFF, 0x00, 0x00, 0xFF]).unwrap()
    }

    #[test]
    fn test_kind_selects_builtin_glyph() {
        assert_eq!(
            resolve_icon(MessageBoxKind::Information, None),
            ResolvedIcon::Builtin(BuiltinIcon::Information)
        );
        assert_eq!(
            resolve_icon(MessageBoxKind::Warning, None),
            ResolvedIcon::Builtin(BuiltinIcon::Warning)
        );
        assert_eq!(
            resolve_icon(MessageBoxKind::Error, None),
            ResolvedIcon::Builtin(BuiltinIcon::Error)
        );
    }

    #[test]
    fn test_custom_icon_takes_precedence() {
        let image = one_pixel();
        assert_eq!(
            resolve_icon(MessageBoxKind::Error, Some(&image)),
            ResolvedIcon::Custom(&image)
        );
    }

    #[test]
    fn test_rejects_mismatched_pixel_buffer() {
        assert!(IconImage::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(IconImage::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(IconImage::from_rgba(0, 2, Vec::new()).is_none());
        assert!(IconImage::from_rgba(2, 0, Vec::new()).is_none());
    }
}
