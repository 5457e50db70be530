//! In-memory conversion for library users.
//!
//! # Example
//!
//! ```
//! use sam2psl::{convert_str, ConversionConfig};
//!
//! let sam = "@SQ\tSN:chr1\tLN:1000\nread1\t0\tchr1\t5\t60\t10M\t*\t0\t0\t*\t*\n";
//! let (psl, stats) = convert_str(sam, &ConversionConfig::default()).unwrap();
//! assert_eq!(stats.records_written, 1);
//! assert!(psl.starts_with("10\t0\t0\t"));
//! ```

use crate::pipeline::{self, Stats};
use crate::psl::ConversionConfig;
use anyhow::Result;

/// Convert SAM text, returning the PSL lines and run counters.
pub fn convert_str(sam: &str, config: &ConversionConfig) -> Result<(String, Stats)> {
    let mut out = Vec::new();
    let stats = pipeline::run(sam.as_bytes(), &mut out, config)?;
    Ok((String::from_utf8(out)?, stats))
}
