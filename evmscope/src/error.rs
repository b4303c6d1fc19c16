use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        $crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Errors only arise in the input layer: reading bytecode from disk, normalizing textual hex,
/// and out-of-range cursor operations on [`crate::Parser`]. The decoding core itself is total -
/// any byte sequence of any length decodes to a well-formed instruction stream and block graph,
/// with anomalies (unknown opcodes, truncated push data, unresolved jump targets) reported as
/// structured annotations on the produced data instead of errors.
///
/// # Examples
///
/// ```rust,no_run
/// use evmscope::{Error, File};
///
/// match File::from_hex("0x60ff") {
///     Ok(file) => println!("loaded {} bytes", file.len()),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("bad input: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input is damaged and could not be parsed.
    ///
    /// Raised by the hex normalization layer for odd-length or non-hexadecimal input.
    /// The error records the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted on a byte stream.
    ///
    /// Raised by [`crate::Parser`] when a seek or read moves past the end of the
    /// underlying data. The linear-sweep decoder never triggers this for in-range
    /// input; truncated push operands are clamped, not rejected.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or memory-mapping
    /// an input file.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}
