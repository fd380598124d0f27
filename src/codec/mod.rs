//! Plain-text test block format.
//!
//! A test is written as a sequence of blocks, one per question:
//!
//! ```text
//! +++++ 2+2=?
//! ==== 3
//! ====# 4
//! ==== 5
//! ==== 22
//! ```
//!
//! `+++++` opens a block and is followed by the question text, each `====`
//! line is an answer choice labelled A to D by position, and `====#` marks
//! the correct one. [`decode`] turns text into [`Question`]s, skipping
//! blocks that are incomplete; [`encode`] writes questions back out.
//!
//! [`Question`]: crate::models::Question

mod decode;
mod encode;

pub use decode::{
    BlockDiagnostic, BlockOutcome, DecodeReport, DropReason, MarkPolicy, decode, decode_report,
    decode_with,
};
pub use encode::{encode, encode_records};

/// Opens a question block.
pub const BLOCK_DELIMITER: &str = "+++++";
/// Starts an answer choice line.
pub const OPTION_MARKER: &str = "====";
/// Follows [`OPTION_MARKER`] directly on the correct choice.
pub const CORRECT_MARK: char = '#';
