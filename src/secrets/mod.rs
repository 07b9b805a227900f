//! Secret masking for rendered command lines.
//!
//! - [`OutputMasker`] - Masks secret argument tokens such as repository passwords

pub mod mask;

pub use mask::OutputMasker;
