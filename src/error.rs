use core::fmt;

/// Errors returned by the panel driver.
///
/// `IoError` is the error of the [`PanelIo`](crate::PanelIo) command channel,
/// `PinError` the error of the reset line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError<IoError, PinError> {
    /// Bad window bounds, a pixel buffer shorter than the window or a
    /// truncated init table.
    InvalidArgument(&'static str),
    /// The command channel failed to send a command or pixel payload.
    Transport(IoError),
    /// Driving the reset line failed.
    Gpio(PinError),
    /// Draw or control operation before a successful init.
    NotInitialized,
}

impl<IoError, PinError> fmt::Display for PanelError<IoError, PinError>
where
    IoError: fmt::Debug,
    PinError: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
            Self::Transport(err) => write!(f, "panel io error: {err:?}"),
            Self::Gpio(err) => write!(f, "reset line error: {err:?}"),
            Self::NotInitialized => write!(f, "panel is not initialized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_reason() {
        let err: PanelError<(), ()> = PanelError::InvalidArgument("start x must be < end x");
        assert_eq!(
            std::format!("{err}"),
            "invalid argument: start x must be < end x"
        );
        let err: PanelError<(), ()> = PanelError::NotInitialized;
        assert_eq!(std::format!("{err}"), "panel is not initialized");
    }
}
