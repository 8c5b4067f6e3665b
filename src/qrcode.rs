#![forbid(unsafe_code)]
//! QR code encoding functionality.
//!
//! This module ties the pipeline together: version selection, the data bit stream, error
//! correction, module placement and mask selection. It covers QR Code Model 2 versions 1
//! to 10 in byte mode, with all four error correction levels.

use core::str::FromStr;

use tracing::{debug, warn};

use crate::bitbuffer::BitBuffer;
use crate::error::QrError;
use crate::format;
use crate::mask::{choose_best, Mask};
use crate::matrix::{apply_data, data_placements, function_patterns, ModuleMatrix};
use crate::options::CapacityPolicy;
use crate::rs;
use crate::tables::BYTE_CAPACITY;

/// Mode indicator of a byte-mode segment.
const MODE_BYTE: u32 = 0b0100;

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Instances are immutable after creation.
///
/// # Creation
///
/// - High-level: Use [`QrCode::encode_text`] or [`QrCode::encode_binary`].
/// - Low-level: Build the data codewords with [`QrCode::encode_data_codewords`] and pass
///   them to [`QrCode::encode_codewords`], optionally with a fixed mask.
///
/// # Example
///
/// ```rust
/// use qrpaint::options::CapacityPolicy;
/// use qrpaint::qrcode::{QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Low, CapacityPolicy::Clamp).unwrap();
///
/// println!("Version: {}", qr.version().value());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    ecl: QrCodeEcc,
    mask: Mask,
    /// Score of every mask trial, indexed by mask. `None` when the mask was fixed by the caller.
    penalties: Option<[u32; 8]>,
    modules: ModuleMatrix,
}

impl QrCode {
    /// Encodes a text string into a QR code.
    ///
    /// The text is carried as UTF-8 in a single byte-mode segment, in the smallest version
    /// that holds it at the requested level.
    ///
    /// # Errors
    ///
    /// [`QrError::CapacityExceeded`] if the text does not fit in version 10 and `policy` is
    /// [`CapacityPolicy::Reject`].
    pub fn encode_text(text: &str, ecl: QrCodeEcc, policy: CapacityPolicy) -> Result<Self, QrError> {
        Self::encode_binary(&crate::bytes::from_str(text), ecl, policy)
    }

    /// Encodes binary data into a QR code. See [`QrCode::encode_text`].
    pub fn encode_binary(data: &[u8], ecl: QrCodeEcc, policy: CapacityPolicy) -> Result<Self, QrError> {
        let (datacodewords, version) = Self::encode_data_codewords(data, ecl, policy)?;
        Self::encode_codewords(&datacodewords, ecl, version, None)
    }

    /// Picks the version for `data` and builds the padded data codeword sequence: mode
    /// indicator, length, data, terminator, then alternating pad bytes.
    ///
    /// Under [`CapacityPolicy::Clamp`] data that does not fit in version 10 is cut at the
    /// capacity boundary; the length field still states the full length.
    pub fn encode_data_codewords(
        data: &[u8],
        ecl: QrCodeEcc,
        policy: CapacityPolicy
    ) -> Result<(Vec<u8>, Version), QrError> {
        let (version, fits) = Version::for_byte_len(data.len(), ecl);
        if !fits {
            let capacity = version.byte_capacity(ecl);
            match policy {
                CapacityPolicy::Reject => {
                    return Err(QrError::CapacityExceeded { len: data.len(), capacity });
                }
                CapacityPolicy::Clamp => {
                    warn!(len = data.len(), capacity, "data exceeds version 10 capacity, truncating");
                }
            }
        }
        debug!(version = version.value(), ecl = ?ecl, len = data.len(), "selected version");

        let datacapacitybits: usize = rs::num_data_codewords(version, ecl) * 8;
        let mut bb = BitBuffer::new();
        bb.put(MODE_BYTE, 4);
        bb.put(u32::try_from(data.len()).unwrap_or(u32::MAX), version.length_bits());
        for &b in data {
            bb.put(b.into(), 8);
        }
        bb.truncate(datacapacitybits);

        // Terminator only if it fits whole, then pad up to a byte
        if bb.len() + 4 <= datacapacitybits {
            bb.put(0, 4);
        }
        while bb.len() % 8 != 0 {
            bb.put_bit(false);
        }

        // Pad with alternating bytes until data capacity is reached
        for &padbyte in [0xec, 0x11].iter().cycle() {
            if bb.len() >= datacapacitybits {
                break;
            }
            bb.put(padbyte, 8);
        }
        debug_assert_eq!(bb.len(), datacapacitybits);
        Ok((bb.into_bytes(), version))
    }

    /// Creates a new QR Code with the given version number,
    /// error correction level, data codeword bytes, and mask number.
    ///
    /// This is a low-level API that most users should not use directly.
    ///
    /// # Arguments
    ///
    /// * `datacodewords` - Padded data codewords, exactly the data capacity of `(version, ecl)`.
    /// * `ecl` - Error correction level.
    /// * `version` - QR code version.
    /// * `msk` - Mask pattern, or `None` to pick the one with the lowest penalty.
    ///
    /// # Panics
    ///
    /// Panics if `datacodewords` has the wrong length.
    pub fn encode_codewords(
        datacodewords: &[u8],
        ecl: QrCodeEcc,
        version: Version,
        msk: Option<Mask>
    ) -> Result<Self, QrError> {
        assert_eq!(
            datacodewords.len(),
            rs::num_data_codewords(version, ecl),
            "Illegal argument"
        );
        let allcodewords = rs::add_ec_and_interleave(datacodewords, version, ecl)?;

        // Function patterns and the data walk do not depend on the mask, so they are
        // computed once and every trial is an overlay on the same base.
        let base = function_patterns(version);
        let placements = data_placements(&base, &allcodewords);
        let (mask, penalties, mut modules) = match msk {
            Some(mask) => (mask, None, apply_data(&base, &placements, mask)),
            None => {
                let choice = choose_best(&base, &placements);
                debug!(mask = choice.mask.value(), penalties = ?choice.penalties, "selected mask");
                (choice.mask, Some(choice.penalties), choice.matrix)
            }
        };
        format::draw_format_bits(&mut modules, ecl, mask);
        format::draw_version_bits(&mut modules, version);

        Ok(Self {
            version,
            ecl,
            mask,
            penalties,
            modules,
        })
    }

    /// Returns this QR Code's version, in the range [1, 10].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 57].
    pub fn size(&self) -> i32 {
        self.modules.size() as i32
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Penalty of each mask trial, indexed by mask value, if the mask was chosen automatically.
    pub fn mask_penalties(&self) -> Option<[u32; 8]> {
        self.penalties
    }

    /// The finished module grid.
    pub fn modules(&self) -> &ModuleMatrix {
        &self.modules
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the QR
    /// code's bounds return `false`.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size();
        range.contains(&x) && range.contains(&y) && self.modules.is_dark(y as usize, x as usize)
    }
}

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Index into the per-level tables (0 to 3, from Low to High).
    pub(crate) fn ordinal(self) -> usize {
        use QrCodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// Returns an unsigned 2-bit integer (in the range 0 to 3).
    pub(crate) fn format_bits(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }

    /// Parses a level name and falls back to `Medium` when it is not recognized.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or(QrCodeEcc::Medium)
    }
}

impl FromStr for QrCodeEcc {
    type Err = QrError;

    /// Accepts the letters `L`, `M`, `Q`, `H` and the full names, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use QrCodeEcc::*;
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(Low),
            "M" | "MEDIUM" => Ok(Medium),
            "Q" | "QUARTILE" => Ok(Quartile),
            "H" | "HIGH" => Ok(High),
            _ => Err(QrError::UnknownLevel(s.to_string())),
        }
    }
}

/// A QR code version (1–10).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Version(u8);

impl Version {
    /// The smallest version.
    pub const MIN: Version = Version(1);

    /// The largest version this encoder has tables for.
    pub const MAX: Version = Version(10);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 10].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 10].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Width and height of a symbol of this version, in modules.
    pub const fn size(self) -> usize {
        (self.0 as usize) * 4 + 17
    }

    /// How many bytes a byte-mode segment can carry at this version and level.
    pub fn byte_capacity(self, ecl: QrCodeEcc) -> usize {
        usize::from(BYTE_CAPACITY[usize::from(self.0) - 1][ecl.ordinal()])
    }

    /// Width of the byte-mode character count field.
    pub fn length_bits(self) -> u8 {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    /// Returns the smallest version whose capacity at `ecl` holds `len` bytes, and whether it
    /// does. When nothing fits, returns [`Version::MAX`] with `false`.
    pub fn for_byte_len(len: usize, ecl: QrCodeEcc) -> (Version, bool) {
        (Version::MIN.0..=Version::MAX.0)
            .map(Version)
            .find(|v| v.byte_capacity(ecl) >= len)
            .map_or((Version::MAX, false), |v| (v, true))
    }
}
