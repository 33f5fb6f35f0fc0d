//! JD9165BA 1024x600 MIPI-DSI panel controller.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use log::{debug, error, info, warn};

use crate::dcs::{
    AddressMode, ColorOrder, PixelFormat, CASET, DISPOFF, DISPON, INVOFF, INVON, MADCTL, RAMWR,
    RASET, SWRESET,
};
use crate::error::PanelError;
use crate::init_sequence::{InitSequence, JD9165BA_INIT_SEQUENCE};
use crate::io::PanelIo;
use crate::panel::Panel;
use crate::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Reset pulse hold time, both edges.
const RESET_PULSE_MS: u32 = 10;
/// Time the controller needs after SWRESET.
const SOFT_RESET_MS: u32 = 120;

/// Placeholder for panels without a wired reset line.
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Construction settings.
///
/// A zero width or height selects the native 1024x600 resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
    /// Level that holds the controller in reset.
    pub reset_active_high: bool,
}

impl PanelConfig {
    pub const fn new() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            reset_active_high: false,
        }
    }

    #[must_use]
    pub fn resolution(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn reset_active_high(mut self, reset_active_high: bool) -> Self {
        self.reset_active_high = reset_active_high;
        self
    }
}

/// Vendor settings applied in one MADCTL write by [`Jd9165ba::set_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VendorConfig {
    /// Ignored by [`Jd9165ba::set_config`]; the reset polarity comes from
    /// [`PanelConfig::reset_active_high`] at construction.
    pub reset_level: bool,
    pub color_space_bgr: bool,
    pub mirror_horizontal: bool,
    pub mirror_vertical: bool,
}

type Error<IO, RST> = PanelError<<IO as PanelIo>::Error, <RST as ErrorType>::Error>;

/// JD9165BA driver.
///
/// Holds the command channel, the optional reset line and the MADCTL value
/// last written to the controller.
pub struct Jd9165ba<IO, RST> {
    io: IO,
    reset: Option<RST>,
    reset_active_high: bool,
    width: u16,
    height: u16,
    pixel_format: PixelFormat,
    address_mode: AddressMode,
    inverted: bool,
    initialized: bool,
}

impl<IO> Jd9165ba<IO, NoResetPin>
where
    IO: PanelIo,
{
    /// Creates a panel that resets through SWRESET.
    pub fn without_reset(io: IO, config: PanelConfig) -> Self {
        Self::from_parts(io, None, config)
    }
}

impl<IO, RST> Jd9165ba<IO, RST>
where
    IO: PanelIo,
    RST: OutputPin,
{
    /// Creates a panel on `io`. A reset line, when given, is driven to its
    /// inactive level right away; a failure there is returned and nothing is
    /// kept.
    pub fn new(io: IO, reset: Option<RST>, config: PanelConfig) -> Result<Self, Error<IO, RST>> {
        let mut panel = Self::from_parts(io, reset, config);
        panel.release_reset_line().map_err(|err| {
            error!("configure reset line failed");
            err
        })?;
        Ok(panel)
    }

    fn from_parts(io: IO, reset: Option<RST>, config: PanelConfig) -> Self {
        let width = if config.width == 0 { DISPLAY_WIDTH } else { config.width };
        let height = if config.height == 0 { DISPLAY_HEIGHT } else { config.height };
        let pixel_format = PixelFormat::Rgb888;
        info!(
            "new jd9165ba panel, resolution: {width}x{height}, colmod: {:#04x}",
            pixel_format.colmod()
        );

        Self {
            io,
            reset,
            reset_active_high: config.reset_active_high,
            width,
            height,
            pixel_format,
            address_mode: AddressMode::default(),
            inverted: false,
            initialized: false,
        }
    }

    /// Releases the reset line and hands back the channel and the pin.
    pub fn release(mut self) -> (IO, Option<RST>) {
        if self.release_reset_line().is_err() {
            warn!("reset line could not be released");
        }
        info!("del jd9165ba panel");
        (self.io, self.reset)
    }

    pub fn address_mode(&self) -> AddressMode {
        self.address_mode
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last inversion state sent with [`Panel::invert_color`].
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Selects RGB or BGR component order.
    pub fn set_color_order(&mut self, order: ColorOrder) -> Result<(), Error<IO, RST>> {
        self.ensure_initialized()?;
        self.write_address_mode(self.address_mode.with_color_order(order))
    }

    /// Applies `config` with a single MADCTL write.
    ///
    /// Flags only ever set bits: a `false` flag leaves the corresponding bit
    /// as it is. Use [`Panel::mirror`] or [`Jd9165ba::set_color_order`] to
    /// clear them. `reset_level` is not applied.
    pub fn set_config(&mut self, config: &VendorConfig) -> Result<(), Error<IO, RST>> {
        self.ensure_initialized()?;

        let requested = AddressMode::default()
            .with_color_order(if config.color_space_bgr {
                ColorOrder::Bgr
            } else {
                ColorOrder::Rgb
            })
            .with_mirror_x(config.mirror_horizontal)
            .with_mirror_y(config.mirror_vertical);
        self.write_address_mode(self.address_mode.union(requested))
    }

    fn ensure_initialized(&self) -> Result<(), Error<IO, RST>> {
        if self.initialized {
            Ok(())
        } else {
            warn!("jd9165ba used before init");
            Err(PanelError::NotInitialized)
        }
    }

    /// Pushes `mode` and keeps it once the controller accepted it.
    fn write_address_mode(&mut self, mode: AddressMode) -> Result<(), Error<IO, RST>> {
        debug!("madctl {:#04x}", mode.bits());
        self.tx_param(MADCTL, &[mode.bits()])?;
        self.address_mode = mode;
        Ok(())
    }

    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), Error<IO, RST>> {
        self.io.tx_param(cmd, params).map_err(|err| {
            error!("send command {cmd:#04x} failed: {err:?}");
            PanelError::Transport(err)
        })
    }

    fn drive_reset_line(&mut self, active: bool) -> Result<(), Error<IO, RST>> {
        let high = active == self.reset_active_high;
        match self.reset.as_mut() {
            Some(pin) => pin.set_state(PinState::from(high)).map_err(PanelError::Gpio),
            None => Ok(()),
        }
    }

    fn release_reset_line(&mut self) -> Result<(), Error<IO, RST>> {
        self.drive_reset_line(false)
    }
}

/// Column or row range as sent with CASET/RASET: start and inclusive end,
/// both big endian.
fn window_bytes(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = (end - 1).to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}

impl<IO, RST> Panel for Jd9165ba<IO, RST>
where
    IO: PanelIo,
    RST: OutputPin,
{
    type Error = Error<IO, RST>;

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        self.initialized = false;
        self.address_mode = AddressMode::default();

        if self.reset.is_some() {
            self.drive_reset_line(true)?;
            delay.delay_ms(RESET_PULSE_MS);
            self.drive_reset_line(false)?;
            delay.delay_ms(RESET_PULSE_MS);
        } else {
            self.tx_param(SWRESET, &[])?;
            delay.delay_ms(SOFT_RESET_MS);
        }
        Ok(())
    }

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        info!("initializing jd9165ba panel...");
        self.initialized = false;

        InitSequence::new(JD9165BA_INIT_SEQUENCE)
            .run(&mut self.io, delay)
            .map_err(|err| {
                error!("jd9165ba init sequence failed");
                Error::<IO, RST>::from(err)
            })?;

        self.initialized = true;
        info!("jd9165ba panel initialized");
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
        pixels: &[u8],
    ) -> Result<(), Self::Error> {
        if x_start >= x_end {
            return Err(PanelError::InvalidArgument("start x must be < end x"));
        }
        if y_start >= y_end {
            return Err(PanelError::InvalidArgument("start y must be < end y"));
        }
        let len = usize::from(x_end - x_start)
            * usize::from(y_end - y_start)
            * self.pixel_format.bytes_per_pixel();
        let Some(pixels) = pixels.get(..len) else {
            return Err(PanelError::InvalidArgument("pixel buffer shorter than window"));
        };
        self.ensure_initialized()?;

        self.tx_param(CASET, &window_bytes(x_start, x_end))?;
        self.tx_param(RASET, &window_bytes(y_start, y_end))?;
        self.io.tx_color(RAMWR, pixels).map_err(|err| {
            error!("send color failed: {err:?}");
            PanelError::Transport(err)
        })
    }

    fn invert_color(&mut self, invert: bool) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.tx_param(if invert { INVON } else { INVOFF }, &[])?;
        self.inverted = invert;
        Ok(())
    }

    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.write_address_mode(
            self.address_mode
                .with_mirror_x(mirror_x)
                .with_mirror_y(mirror_y),
        )
    }

    fn swap_xy(&mut self, swap: bool) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.write_address_mode(self.address_mode.with_swap_xy(swap))
    }

    fn set_gap(&mut self, _x_gap: u16, _y_gap: u16) -> Result<(), Self::Error> {
        // JD9165BA has no gap register
        Ok(())
    }

    fn disp_on_off(&mut self, on: bool) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.tx_param(if on { DISPON } else { DISPOFF }, &[])
    }

    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }
}
