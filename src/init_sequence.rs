//! Byte encoded init tables and the interpreter that replays them.
//!
//! A table is a flat run of records, each starting with a length byte `L`:
//!
//! | `L`    | record                                                    |
//! |--------|-----------------------------------------------------------|
//! | `0x00` | end of table                                              |
//! | `0xFF` | next byte is a delay in milliseconds                      |
//! | `0x01` | next byte is a command without parameters                 |
//! | other  | next byte is a command, followed by `L - 1` parameters    |
//!
//! Running out of bytes exactly on a record boundary ends the table like
//! `0x00` does.

use core::fmt;

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::dcs::{DISPON, PAGE_SELECT, SLPOUT};
use crate::error::PanelError;
use crate::io::PanelIo;

const END: u8 = 0x00;
const DELAY: u8 = 0xFF;

/// Vendor init for the 1024x600 JD9165BA with a 4-lane MIPI-DSI link.
#[rustfmt::skip]
pub const JD9165BA_INIT_SEQUENCE: &[u8] = &[
    // Page 0
    0x02, PAGE_SELECT, 0x00,
    0x05, 0xF7, 0x49, 0x61, 0x02, 0x00,

    // Page 1, MIPI configuration
    0x02, PAGE_SELECT, 0x01,
    0x02, 0x04, 0x0C,
    0x02, 0x05, 0x08,
    0x02, 0x20, 0x04, // lane select
    0x02, 0x0B, 0x13, // 4 lanes
    0x02, 0x1F, 0x05, // HS settle
    0x02, 0x23, 0x38,
    0x02, 0x28, 0x18,
    0x02, 0x29, 0x29,
    0x02, 0x2A, 0x01,
    0x02, 0x2B, 0x29,
    0x02, 0x2C, 0x01,

    // Page 2, display timing
    0x02, PAGE_SELECT, 0x02,
    0x02, 0x00, 0x05,
    0x02, 0x01, 0x22,
    0x02, 0x02, 0x08,
    0x02, 0x03, 0x12,
    0x02, 0x04, 0x16,
    0x02, 0x05, 0x64,
    0x02, 0x06, 0x00,
    0x02, 0x07, 0x00,
    0x02, 0x08, 0x78,
    0x02, 0x09, 0x00,
    0x02, 0x0A, 0x04,

    // Page 6, gamma
    0x02, PAGE_SELECT, 0x06,
    0x0F, 0x12, 0x3F, 0x26, 0x27, 0x35, 0x2D, 0x34, 0x3F, 0x3F, 0x3F, 0x35, 0x2A, 0x20, 0x16, 0x08,
    0x0F, 0x13, 0x3F, 0x26, 0x28, 0x35, 0x27, 0x29, 0x29, 0x2F, 0x35, 0x2F, 0x26, 0x20, 0x16, 0x08,

    // Page 0x0A
    0x02, PAGE_SELECT, 0x0A,
    0x02, 0x02, 0x4F,
    0x02, 0x0B, 0x40,

    // Page 0x0D, MIPI power
    0x02, PAGE_SELECT, 0x0D,
    0x02, 0x0D, 0x04,
    0x02, 0x10, 0x0C,
    0x02, 0x11, 0x0C,
    0x02, 0x12, 0x0C,
    0x02, 0x13, 0x0C,

    // Page 7
    0x02, PAGE_SELECT, 0x07,
    0x02, 0x0D, 0x01,

    // Back to page 0
    0x02, PAGE_SELECT, 0x00,

    0x01, SLPOUT,
    DELAY, 120,

    0x01, DISPON,
    DELAY, 20,

    END,
];

/// One decoded record of an init table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitRecord<'a> {
    /// Blocking wait in milliseconds.
    Delay(u8),
    /// Command without parameters.
    Command(u8),
    CommandWithParams(u8, &'a [u8]),
}

/// The table ended in the middle of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// Offset of the length byte of the incomplete record.
    pub offset: usize,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "init table truncated in record at offset {}", self.offset)
    }
}

/// Failure while replaying a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError<E> {
    Decode(DecodeError),
    Transport(E),
}

impl<E, P> From<SequenceError<E>> for PanelError<E, P> {
    fn from(err: SequenceError<E>) -> Self {
        match err {
            SequenceError::Decode(_) => PanelError::InvalidArgument("truncated init table"),
            SequenceError::Transport(err) => PanelError::Transport(err),
        }
    }
}

/// Decoder over a byte encoded init table, yielding [`InitRecord`]s.
#[derive(Debug, Clone)]
pub struct InitSequence<'a> {
    bytes: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> InitSequence<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            done: false,
        }
    }

    /// Walks the whole table without side effects and returns the number of
    /// records before the end marker.
    pub fn validate(&self) -> Result<usize, DecodeError> {
        let mut records = 0;
        for record in self.clone() {
            record?;
            records += 1;
        }
        Ok(records)
    }

    /// Replays the table: commands go to `io`, delays block on `delay`.
    ///
    /// The table is validated first, so a truncated table sends nothing.
    /// The first transport error stops the replay.
    pub fn run<IO, D>(self, io: &mut IO, delay: &mut D) -> Result<(), SequenceError<IO::Error>>
    where
        IO: PanelIo,
        D: DelayNs,
    {
        let records = self.validate().map_err(|err| {
            warn!("{err}");
            SequenceError::Decode(err)
        })?;
        debug!("replaying {records} init records");

        for record in self {
            let record = record.map_err(SequenceError::Decode)?;
            trace!("init record {record:?}");
            match record {
                InitRecord::Delay(ms) => delay.delay_ms(u32::from(ms)),
                InitRecord::Command(cmd) => io
                    .tx_param(cmd, &[])
                    .map_err(SequenceError::Transport)?,
                InitRecord::CommandWithParams(cmd, params) => io
                    .tx_param(cmd, params)
                    .map_err(SequenceError::Transport)?,
            }
        }
        Ok(())
    }

    fn truncated(&mut self, offset: usize) -> Option<Result<InitRecord<'a>, DecodeError>> {
        self.done = true;
        Some(Err(DecodeError { offset }))
    }
}

impl<'a> Iterator for InitSequence<'a> {
    type Item = Result<InitRecord<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.pos;
        let Some(&len) = self.bytes.get(start) else {
            self.done = true;
            return None;
        };

        match len {
            END => {
                self.done = true;
                None
            }
            DELAY => {
                let Some(&ms) = self.bytes.get(start + 1) else {
                    return self.truncated(start);
                };
                self.pos = start + 2;
                Some(Ok(InitRecord::Delay(ms)))
            }
            _ => {
                let Some(&cmd) = self.bytes.get(start + 1) else {
                    return self.truncated(start);
                };
                let params_start = start + 2;
                let params_end = params_start + usize::from(len - 1);
                let Some(params) = self.bytes.get(params_start..params_end) else {
                    return self.truncated(start);
                };
                self.pos = params_end;
                if params.is_empty() {
                    Some(Ok(InitRecord::Command(cmd)))
                } else {
                    Some(Ok(InitRecord::CommandWithParams(cmd, params)))
                }
            }
        }
    }
}
