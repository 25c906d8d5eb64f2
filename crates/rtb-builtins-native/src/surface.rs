//! Capability traits over the builtins.
//!
//! `Builtins` is what every target provides. `ConsoleBuiltins` exists only when
//! the `console` feature is on, so code generic over `T: ConsoleBuiltins` does
//! not compile against a restricted build.

#[cfg(feature = "console")]
use std::io::Write;

pub use rtb_contracts::{RTB_TRAP_INTERNAL, RTB_TRAP_INVALID_HANDLE};

use crate::text::HandleFault;
#[cfg(feature = "console")]
use crate::text::Text;

#[derive(Debug)]
pub enum BuiltinError {
    InvalidHandle(HandleFault),
    Io(std::io::Error),
}

impl BuiltinError {
    pub fn trap_code(&self) -> i32 {
        match self {
            BuiltinError::InvalidHandle(_) => RTB_TRAP_INVALID_HANDLE,
            BuiltinError::Io(_) => RTB_TRAP_INTERNAL,
        }
    }
}

impl std::fmt::Display for BuiltinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuiltinError::InvalidHandle(fault) => write!(f, "invalid handle: {fault}"),
            BuiltinError::Io(err) => write!(f, "write output: {err}"),
        }
    }
}

impl std::error::Error for BuiltinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuiltinError::InvalidHandle(_) => None,
            BuiltinError::Io(err) => Some(err),
        }
    }
}

impl From<HandleFault> for BuiltinError {
    fn from(fault: HandleFault) -> Self {
        BuiltinError::InvalidHandle(fault)
    }
}

impl From<std::io::Error> for BuiltinError {
    fn from(err: std::io::Error) -> Self {
        BuiltinError::Io(err)
    }
}

/// Absolute value with wrapping overflow: `abs_i32(i32::MIN) == i32::MIN`.
#[inline]
pub fn abs_i32(x: i32) -> i32 {
    x.wrapping_abs()
}

pub trait Builtins {
    fn abs(&self, x: i32) -> i32 {
        abs_i32(x)
    }
}

#[cfg(feature = "console")]
pub trait ConsoleBuiltins: Builtins {
    /// Decimal rendering of `x`, no trailing newline.
    fn print_i32(&mut self, x: i32) -> Result<(), BuiltinError>;

    /// The text's bytes, verbatim.
    fn print_str(&mut self, text: Text<'_>) -> Result<(), BuiltinError>;

    fn print_newline(&mut self) -> Result<(), BuiltinError>;
}

/// Surface of a target without a console.
#[derive(Clone, Copy, Debug, Default)]
pub struct Restricted;

impl Builtins for Restricted {}

/// Full surface writing to `W`.
#[cfg(feature = "console")]
#[derive(Debug)]
pub struct Console<W> {
    out: W,
}

#[cfg(feature = "console")]
impl Console<std::io::Stdout> {
    pub fn stdout() -> Self {
        Console {
            out: std::io::stdout(),
        }
    }
}

#[cfg(feature = "console")]
impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Console { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Nothing stays buffered on our side once a builtin returns.
    fn emit(&mut self, bytes: &[u8]) -> Result<(), BuiltinError> {
        self.out.write_all(bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(feature = "console")]
impl<W: Write> Builtins for Console<W> {}

#[cfg(feature = "console")]
impl<W: Write> ConsoleBuiltins for Console<W> {
    fn print_i32(&mut self, x: i32) -> Result<(), BuiltinError> {
        let mut buf = itoa::Buffer::new();
        let s = buf.format(x);
        self.emit(s.as_bytes())
    }

    fn print_str(&mut self, text: Text<'_>) -> Result<(), BuiltinError> {
        self.emit(text.as_bytes())
    }

    fn print_newline(&mut self) -> Result<(), BuiltinError> {
        self.emit(b"\n")
    }
}

/// The surface compiled into this build.
#[cfg(feature = "console")]
pub type Surface = Console<std::io::Stdout>;
#[cfg(not(feature = "console"))]
pub type Surface = Restricted;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_of_non_min_values() {
        for x in [0, 1, -1, 7, -7, 42, -42, i32::MAX, -i32::MAX, i32::MIN + 1] {
            let want = if x >= 0 { x } else { -x };
            assert_eq!(abs_i32(x), want, "abs({x})");
            assert_eq!(Restricted.abs(x), want, "Restricted.abs({x})");
        }
    }

    #[test]
    fn abs_of_min_wraps_to_min() {
        assert_eq!(abs_i32(i32::MIN), i32::MIN);
        assert_eq!(Restricted.abs(i32::MIN), i32::MIN);
    }

    #[test]
    fn invalid_handle_maps_to_trap_code() {
        let err = BuiltinError::from(HandleFault::Null);
        assert_eq!(err.trap_code(), RTB_TRAP_INVALID_HANDLE);
        assert_eq!(err.to_string(), "invalid handle: null text handle");
    }

    #[cfg(feature = "console")]
    mod console {
        use super::super::*;
        use crate::text::TextBuf;

        fn printed(f: impl FnOnce(&mut Console<Vec<u8>>) -> Result<(), BuiltinError>) -> Vec<u8> {
            let mut console = Console::new(Vec::new());
            f(&mut console).expect("print");
            console.into_inner()
        }

        #[test]
        fn print_i32_writes_exact_decimal() {
            assert_eq!(printed(|c| c.print_i32(-42)), b"-42");
            assert_eq!(printed(|c| c.print_i32(0)), b"0");
            assert_eq!(printed(|c| c.print_i32(7)), b"7");
            assert_eq!(printed(|c| c.print_i32(i32::MAX)), b"2147483647");
            assert_eq!(printed(|c| c.print_i32(i32::MIN)), b"-2147483648");
        }

        #[test]
        fn print_str_writes_bytes_verbatim() {
            let buf = TextBuf::new(b"hi\0there\r\n\xff");
            assert_eq!(printed(|c| c.print_str(buf.text())), b"hi\0there\r\n\xff");
            assert_eq!(printed(|c| c.print_str(Text::from_bytes(b""))), b"");
        }

        #[test]
        fn calls_concatenate_without_separators() {
            let out = printed(|c| {
                c.print_i32(1)?;
                c.print_i32(-2)?;
                c.print_str(Text::from_bytes(b"x"))?;
                c.print_newline()
            });
            assert_eq!(out, b"1-2x\n");
        }

        #[test]
        fn console_still_provides_abs() {
            let console = Console::new(Vec::<u8>::new());
            assert_eq!(console.abs(-7), 7);
        }

        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        #[test]
        fn write_failure_surfaces_as_io_error() {
            let mut console = Console::new(Broken);
            let err = console.print_i32(1).unwrap_err();
            assert!(matches!(err, BuiltinError::Io(_)), "{err:?}");
            assert!(std::error::Error::source(&err).is_some());
        }
    }
}
