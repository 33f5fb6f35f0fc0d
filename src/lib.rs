//! # JD9165BA panel driver
//!
//! Driver for the JD9165BA controller found on 1024x600 MIPI-DSI panels
//! attached to ESP32-P4 class boards.
//!
//! The driver talks to the controller through a [`PanelIo`] command channel
//! (on the P4 this is the DSI DBI command path) and an optional reset line
//! implementing [`embedded_hal::digital::OutputPin`]. Delays are blocking and
//! supplied per call through [`embedded_hal::delay::DelayNs`].
//!
//! ## Usage
//!
//! ```ignore
//! use jd9165ba::{Jd9165ba, Panel, PanelConfig};
//!
//! let mut panel = Jd9165ba::new(io, Some(reset_pin), PanelConfig::default())?;
//! panel.reset(&mut delay)?;
//! panel.init(&mut delay)?;
//! panel.mirror(true, false)?;
//! panel.draw_bitmap(0, 0, 1024, 600, &frame)?;
//! ```
//!
//! Draw and control operations are rejected with
//! [`PanelError::NotInitialized`] until [`Panel::init`] succeeded.

#![cfg_attr(not(test), no_std)]

pub mod dcs;
pub mod error;
pub mod harness;
pub mod init_sequence;
pub mod io;
pub mod jd9165ba;
pub mod panel;
pub mod pattern;

pub use dcs::{AddressMode, ColorOrder, PixelFormat};
pub use error::PanelError;
pub use init_sequence::{InitRecord, InitSequence, JD9165BA_INIT_SEQUENCE};
pub use io::{MipiInterface, PanelIo};
pub use jd9165ba::{Jd9165ba, NoResetPin, PanelConfig, VendorConfig};
pub use panel::Panel;

/// Native horizontal resolution of the JD9165BA panel.
pub const DISPLAY_WIDTH: u16 = 1024;
/// Native vertical resolution of the JD9165BA panel.
pub const DISPLAY_HEIGHT: u16 = 600;

#[cfg(test)]
pub(crate) mod mock;
