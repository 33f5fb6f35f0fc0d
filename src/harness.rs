//! Manual test suite for bringing up a panel on real hardware.
//!
//! Every test draws full screen or boxed patterns and pauses so the result
//! can be checked by eye. The suite borrows one frame buffer from the caller
//! for its whole run; nothing is allocated and the buffer is free again when
//! the suite is dropped.

use core::fmt::{self, Debug};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_hal::delay::DelayNs;
use log::{error, info};

use crate::panel::Panel;
use crate::pattern::{self, PatternError};

const FILL_COLORS: [(&str, Rgb888); 8] = [
    ("Red", Rgb888::RED),
    ("Green", Rgb888::GREEN),
    ("Blue", Rgb888::BLUE),
    ("White", Rgb888::WHITE),
    ("Black", Rgb888::BLACK),
    ("Yellow", Rgb888::YELLOW),
    ("Cyan", Rgb888::CYAN),
    ("Magenta", Rgb888::MAGENTA),
];

const CHECKER_SQUARES: [u16; 4] = [64, 32, 16, 8];

const BOX_SIZE: u16 = 200;
const BOXES: [(u16, u16, Rgb888); 5] = [
    (100, 100, Rgb888::RED),
    (400, 100, Rgb888::GREEN),
    (700, 100, Rgb888::BLUE),
    (250, 300, Rgb888::YELLOW),
    (550, 300, Rgb888::MAGENTA),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCase {
    ColorFill,
    Gradient,
    Checkerboard,
    DisplayControl,
    PartialUpdate,
}

impl TestCase {
    /// Run order of [`TestSuite::run_all`].
    pub const ALL: [TestCase; 5] = [
        TestCase::ColorFill,
        TestCase::Gradient,
        TestCase::Checkerboard,
        TestCase::DisplayControl,
        TestCase::PartialUpdate,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TestCase::ColorFill => "Color Fill Test",
            TestCase::Gradient => "Gradient Pattern Test",
            TestCase::Checkerboard => "Checkerboard Pattern Test",
            TestCase::DisplayControl => "Display Control Test",
            TestCase::PartialUpdate => "Partial Update Test",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessError<E> {
    Panel(E),
    Pattern(PatternError),
}

impl<E> From<PatternError> for HarnessError<E> {
    fn from(err: PatternError) -> Self {
        Self::Pattern(err)
    }
}

/// The first failing test of a suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteError<E> {
    pub case: TestCase,
    pub error: HarnessError<E>,
}

impl<E: Debug> fmt::Display for SuiteError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {:?}", self.case.name(), self.error)
    }
}

pub struct TestSuite<'a, P, D> {
    panel: &'a mut P,
    delay: &'a mut D,
    buffer: &'a mut [u8],
}

impl<'a, P, D> TestSuite<'a, P, D>
where
    P: Panel,
    P::Error: Debug,
    D: DelayNs,
{
    /// `buffer` must hold a full frame of the panel in RGB888.
    pub fn new(panel: &'a mut P, delay: &'a mut D, buffer: &'a mut [u8]) -> Self {
        Self {
            panel,
            delay,
            buffer,
        }
    }

    /// Runs every test in order and stops at the first failure.
    pub fn run_all(&mut self) -> Result<heapless::Vec<TestCase, 5>, SuiteError<P::Error>> {
        info!("========================================");
        info!("  JD9165BA LCD Driver Test Suite");
        info!(
            "  Resolution: {}x{}",
            self.panel.width(),
            self.panel.height()
        );
        info!("========================================");

        let mut passed = heapless::Vec::<TestCase, 5>::new();
        for case in TestCase::ALL {
            if let Err(error) = self.run(case) {
                error!("{} failed: {error:?}", case.name());
                return Err(SuiteError { case, error });
            }
            passed.push(case).ok();
        }

        info!("========================================");
        info!("  ALL TESTS PASSED!");
        info!("========================================");
        Ok(passed)
    }

    pub fn run(&mut self, case: TestCase) -> Result<(), HarnessError<P::Error>> {
        info!("=== {} ===", case.name());
        match case {
            TestCase::ColorFill => self.color_fill(),
            TestCase::Gradient => self.gradient(),
            TestCase::Checkerboard => self.checkerboard(),
            TestCase::DisplayControl => self.display_control(),
            TestCase::PartialUpdate => self.partial_update(),
        }?;
        info!("{} completed successfully!", case.name());
        Ok(())
    }

    /// Solid fills in eight colors, one second each.
    pub fn color_fill(&mut self) -> Result<(), HarnessError<P::Error>> {
        for (name, color) in FILL_COLORS {
            info!("Filling screen with {name}...");
            self.fill_screen(color)?;
            self.delay.delay_ms(1000);
        }
        Ok(())
    }

    pub fn gradient(&mut self) -> Result<(), HarnessError<P::Error>> {
        info!("Drawing gradient pattern...");
        let (width, height) = self.size();
        pattern::fill_gradient(self.buffer, width, height)?;
        self.draw_screen()?;
        self.delay.delay_ms(3000);
        Ok(())
    }

    pub fn checkerboard(&mut self) -> Result<(), HarnessError<P::Error>> {
        let (width, height) = self.size();
        for square in CHECKER_SQUARES {
            info!("Drawing checkerboard with {square} pixel squares...");
            pattern::fill_checkerboard(self.buffer, width, height, square)?;
            self.draw_screen()?;
            self.delay.delay_ms(2000);
        }
        Ok(())
    }

    /// Display off/on and color inversion over a white screen.
    pub fn display_control(&mut self) -> Result<(), HarnessError<P::Error>> {
        self.fill_screen(Rgb888::WHITE)?;
        self.delay.delay_ms(500);

        info!("Testing display OFF...");
        self.panel.disp_on_off(false).map_err(HarnessError::Panel)?;
        self.delay.delay_ms(2000);

        info!("Testing display ON...");
        self.panel.disp_on_off(true).map_err(HarnessError::Panel)?;
        self.delay.delay_ms(2000);

        info!("Testing color inversion ON...");
        self.panel.invert_color(true).map_err(HarnessError::Panel)?;
        self.delay.delay_ms(2000);

        info!("Testing color inversion OFF...");
        self.panel.invert_color(false).map_err(HarnessError::Panel)?;
        self.delay.delay_ms(1000);
        Ok(())
    }

    /// Colored boxes drawn into windows over a black screen.
    pub fn partial_update(&mut self) -> Result<(), HarnessError<P::Error>> {
        self.fill_screen(Rgb888::BLACK)?;

        for (i, (x, y, color)) in BOXES.into_iter().enumerate() {
            info!("Drawing box {} at ({x}, {y})...", i + 1);
            pattern::fill_color(self.buffer, BOX_SIZE, BOX_SIZE, color)?;
            self.panel
                .draw_bitmap(x, y, x + BOX_SIZE, y + BOX_SIZE, self.buffer)
                .map_err(HarnessError::Panel)?;
            self.delay.delay_ms(500);
        }

        self.delay.delay_ms(2000);
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.panel.width(), self.panel.height())
    }

    fn fill_screen(&mut self, color: Rgb888) -> Result<(), HarnessError<P::Error>> {
        let (width, height) = self.size();
        pattern::fill_color(self.buffer, width, height, color)?;
        self.draw_screen()
    }

    fn draw_screen(&mut self) -> Result<(), HarnessError<P::Error>> {
        let (width, height) = self.size();
        self.panel
            .draw_bitmap(0, 0, width, height, self.buffer)
            .map_err(HarnessError::Panel)
    }
}

/// Logs what the suite is about to drive.
pub fn print_info<P: Panel>(panel: &P, reset_gpio: Option<u8>) {
    info!("========================================");
    info!("JD9165BA LCD Driver Information:");
    info!("  - Resolution: {}x{}", panel.width(), panel.height());
    info!("  - Interface: MIPI-DSI 4-lane");
    info!("  - Color Format: RGB888");
    match reset_gpio {
        Some(gpio) => info!("  - Reset GPIO: {gpio}"),
        None => info!("  - Reset GPIO: none (software reset)"),
    }
    info!("========================================");
}
