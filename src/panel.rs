use embedded_hal::delay::DelayNs;

/// Operations shared by panel controllers.
///
/// Each controller model implements this trait; the model is picked when the
/// driver is constructed. All operations are synchronous and expect a single
/// owner, which `&mut self` enforces.
pub trait Panel {
    /// Error type
    type Error;

    /// Brings the controller out of reset, through the reset line when one
    /// is wired and through a software reset otherwise.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Sends the controller's init sequence.
    fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Writes `pixels` into the window `[x_start, x_end) x [y_start, y_end)`.
    ///
    /// Rows are laid out back to back with a stride of `x_end - x_start`
    /// pixels.
    fn draw_bitmap(
        &mut self,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
        pixels: &[u8],
    ) -> Result<(), Self::Error>;

    fn invert_color(&mut self, invert: bool) -> Result<(), Self::Error>;

    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), Self::Error>;

    fn swap_xy(&mut self, swap: bool) -> Result<(), Self::Error>;

    /// Offsets the drawing window. Controllers without a gap register accept
    /// and ignore it.
    fn set_gap(&mut self, x_gap: u16, y_gap: u16) -> Result<(), Self::Error>;

    fn disp_on_off(&mut self, on: bool) -> Result<(), Self::Error>;

    fn width(&self) -> u16;

    fn height(&self) -> u16;
}
