//! MIPI DCS commands and register values used by the JD9165BA.

/// Software reset
pub const SWRESET: u8 = 0x01;
/// Sleep out
pub const SLPOUT: u8 = 0x11;
/// Display inversion off
pub const INVOFF: u8 = 0x20;
/// Display inversion on
pub const INVON: u8 = 0x21;
/// Display off
pub const DISPOFF: u8 = 0x28;
/// Display on
pub const DISPON: u8 = 0x29;
/// Column address set
pub const CASET: u8 = 0x2A;
/// Row (page) address set
pub const RASET: u8 = 0x2B;
/// Memory write
pub const RAMWR: u8 = 0x2C;
/// Memory data access control
pub const MADCTL: u8 = 0x36;
/// Interface pixel format
pub const COLMOD: u8 = 0x3A;

/// JD9165BA register page select. The parameter picks the bank that the
/// following register writes land in.
pub const PAGE_SELECT: u8 = 0x30;

/// Memory Access Control (MADCTL) register bits
const MADCTL_MY: u8 = 0x80; // Row address order
const MADCTL_MX: u8 = 0x40; // Column address order
const MADCTL_MV: u8 = 0x20; // Row/Column exchange
const MADCTL_BGR: u8 = 0x08; // BGR color order

/// Value of the MADCTL register.
///
/// The panel keeps one of these as the single source of truth for
/// orientation and color order; every change is pushed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressMode(u8);

impl AddressMode {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn mirror_x(self) -> bool {
        self.0 & MADCTL_MX != 0
    }

    pub const fn mirror_y(self) -> bool {
        self.0 & MADCTL_MY != 0
    }

    pub const fn swap_xy(self) -> bool {
        self.0 & MADCTL_MV != 0
    }

    pub const fn color_order(self) -> ColorOrder {
        if self.0 & MADCTL_BGR != 0 {
            ColorOrder::Bgr
        } else {
            ColorOrder::Rgb
        }
    }

    #[must_use]
    pub const fn with_mirror_x(self, on: bool) -> Self {
        self.with(MADCTL_MX, on)
    }

    #[must_use]
    pub const fn with_mirror_y(self, on: bool) -> Self {
        self.with(MADCTL_MY, on)
    }

    #[must_use]
    pub const fn with_swap_xy(self, on: bool) -> Self {
        self.with(MADCTL_MV, on)
    }

    #[must_use]
    pub const fn with_color_order(self, order: ColorOrder) -> Self {
        self.with(MADCTL_BGR, matches!(order, ColorOrder::Bgr))
    }

    /// Sets every bit that is set in `other`; never clears.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    const fn with(self, bit: u8, on: bool) -> Self {
        if on {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }
}

/// Order of the color components the controller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Pixel format of the RAMWR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 24 bit, 3 bytes per pixel
    #[default]
    Rgb888,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb888 => 3,
        }
    }

    /// Value written to [`COLMOD`] for this format.
    pub const fn colmod(self) -> u8 {
        match self {
            Self::Rgb888 => 0x77,
        }
    }
}
