//! Recording doubles for the command channel, the reset line and delays.
//!
//! All three append to one shared [`EventLog`] so tests can assert on the
//! interleaving of commands, pin levels and waits.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::io::PanelIo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Param(u8, Vec<u8>),
    /// Command and payload length; payload bytes are not kept.
    Color(u8, usize),
    DelayNs(u64),
    Pin(bool),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Only the transport calls, in order.
    pub fn commands(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Param(..) | Event::Color(..)))
            .collect()
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.events()
            .iter()
            .map(|e| match e {
                Event::DelayNs(ns) => *ns,
                _ => 0,
            })
            .sum::<u64>()
            / 1_000_000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoFault;

/// Transport that records every call and fails the `fail_at`-th one.
pub struct RecordingIo {
    log: EventLog,
    calls: usize,
    fail_at: Option<usize>,
}

impl RecordingIo {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            calls: 0,
            fail_at: None,
        }
    }

    /// Fails the call with zero based index `n`; earlier calls succeed.
    pub fn failing_at(log: &EventLog, n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::new(log)
        }
    }

    fn record(&mut self, event: Event) -> Result<(), IoFault> {
        let index = self.calls;
        self.calls += 1;
        if self.fail_at == Some(index) {
            return Err(IoFault);
        }
        self.log.push(event);
        Ok(())
    }
}

impl PanelIo for RecordingIo {
    type Error = IoFault;

    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.record(Event::Param(cmd, params.to_vec()))
    }

    fn tx_color(&mut self, cmd: u8, pixels: &[u8]) -> Result<(), Self::Error> {
        self.record(Event::Color(cmd, pixels.len()))
    }
}

pub struct RecordingDelay {
    log: EventLog,
}

impl RecordingDelay {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::DelayNs(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::DelayNs(u64::from(us) * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::DelayNs(u64::from(ms) * 1_000_000));
    }
}

/// Reset line that records levels; fails every write when `broken`.
pub struct RecordingPin {
    log: EventLog,
    broken: bool,
}

impl RecordingPin {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            broken: false,
        }
    }

    pub fn broken(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            broken: true,
        }
    }

    fn set(&mut self, high: bool) -> Result<(), ErrorKind> {
        if self.broken {
            return Err(ErrorKind::Other);
        }
        self.log.push(Event::Pin(high));
        Ok(())
    }
}

impl ErrorType for RecordingPin {
    type Error = ErrorKind;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}
