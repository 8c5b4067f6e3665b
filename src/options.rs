//! Caller-facing settings for [`encode_and_render`](crate::encode_and_render).

use crate::error::QrError;
use crate::qrcode::QrCodeEcc;

/// Smallest accepted output size in pixels.
pub const MIN_SIZE: u32 = 48;
pub const DEFAULT_SIZE: u32 = 320;
pub const DEFAULT_MARGIN: u32 = 4;

/// What to do when the data does not fit in a version 10 symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CapacityPolicy {
    /// Use version 10 anyway and cut the bit stream at its capacity.
    #[default]
    Clamp,
    /// Fail with [`QrError::CapacityExceeded`].
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width and height of the output in pixels.
    pub size: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
    pub level: QrCodeEcc,
    pub capacity: CapacityPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            margin: DEFAULT_MARGIN,
            level: QrCodeEcc::Medium,
            capacity: CapacityPolicy::Clamp,
        }
    }
}

impl RenderOptions {
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_level(mut self, level: QrCodeEcc) -> Self {
        self.level = level;
        self
    }

    /// Sets the level from its letter, falling back to `Medium` for anything unrecognized.
    pub fn with_level_name(self, name: &str) -> Self {
        self.with_level(QrCodeEcc::from_name_lossy(name))
    }

    pub fn with_capacity_policy(mut self, capacity: CapacityPolicy) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), QrError> {
        if self.size < MIN_SIZE {
            return Err(QrError::InvalidSize { size: self.size, min: MIN_SIZE });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = RenderOptions::default();
        assert_eq!(opts.size, 320);
        assert_eq!(opts.margin, 4);
        assert_eq!(opts.level, QrCodeEcc::Medium);
        assert_eq!(opts.capacity, CapacityPolicy::Clamp);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let opts = RenderOptions::default().with_size(48).with_margin(0).with_level_name("h");
        assert_eq!((opts.size, opts.margin, opts.level), (48, 0, QrCodeEcc::High));
        assert_eq!(RenderOptions::default().with_level_name("X").level, QrCodeEcc::Medium);
    }

    #[test]
    fn test_size_below_minimum() {
        let err = RenderOptions::default().with_size(47).validate().unwrap_err();
        assert!(matches!(err, QrError::InvalidSize { size: 47, min: 48 }));
    }
}
