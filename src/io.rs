//! Command channel used to talk to the panel controller.

use core::fmt::Debug;

/// Command/data channel to the controller.
///
/// On ESP32-P4 this is the DBI command path of the DSI bus; any channel that
/// can send a command byte followed by parameter or pixel bytes works.
pub trait PanelIo {
    /// Error type
    type Error: Debug;

    /// Sends `cmd` followed by `params`. `params` may be empty.
    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error>;

    /// Sends `cmd` followed by a pixel payload.
    fn tx_color(&mut self, cmd: u8, pixels: &[u8]) -> Result<(), Self::Error>;
}

impl<T: PanelIo + ?Sized> PanelIo for &mut T {
    type Error = T::Error;

    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        T::tx_param(self, cmd, params)
    }

    fn tx_color(&mut self, cmd: u8, pixels: &[u8]) -> Result<(), Self::Error> {
        T::tx_color(self, cmd, pixels)
    }
}

/// Adapts a byte wide [`mipidsi`] interface (SPI or parallel) to [`PanelIo`].
///
/// Pixel payloads are forwarded as RGB888 triplets.
pub struct MipiInterface<DI> {
    di: DI,
}

impl<DI> MipiInterface<DI>
where
    DI: mipidsi::interface::Interface<Word = u8>,
{
    pub fn new(di: DI) -> Self {
        Self { di }
    }

    pub fn release(self) -> DI {
        self.di
    }
}

impl<DI> PanelIo for MipiInterface<DI>
where
    DI: mipidsi::interface::Interface<Word = u8>,
{
    type Error = DI::Error;

    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.di.send_command(cmd, params)
    }

    fn tx_color(&mut self, cmd: u8, pixels: &[u8]) -> Result<(), Self::Error> {
        self.di.send_command(cmd, &[])?;
        self.di.send_pixels(
            pixels
                .chunks_exact(3)
                .filter_map(|rgb| <[u8; 3]>::try_from(rgb).ok()),
        )
    }
}
