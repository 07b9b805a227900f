//! Masking of secret arguments in rendered command lines.

use std::collections::BTreeSet;

/// Replaces selected argument tokens with a mask string.
///
/// Masking works on whole tokens by position, so a secret that happens to
/// equal another argument (or a substring of one) leaves that argument
/// untouched.
///
/// # Example
///
/// ```
/// use helm3_step::secrets::OutputMasker;
///
/// let args: Vec<String> = ["repo", "add", "stable", "https://x/stable", "--password", "stable"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
///
/// let mut masker = OutputMasker::new();
/// masker.add_position(5);
///
/// assert_eq!(
///     masker.mask_args(&args).join(" "),
///     "repo add stable https://x/stable --password [REDACTED]"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct OutputMasker {
    /// Indices of the tokens to hide.
    positions: BTreeSet<usize>,
    /// The mask string to use.
    mask: String,
}

impl OutputMasker {
    /// Create a new masker with default mask string.
    pub fn new() -> Self {
        Self::with_mask("[REDACTED]")
    }

    /// Create a masker with a custom mask string.
    pub fn with_mask(mask: impl Into<String>) -> Self {
        Self {
            positions: BTreeSet::new(),
            mask: mask.into(),
        }
    }

    /// Hide the token at `index`.
    pub fn add_position(&mut self, index: usize) {
        self.positions.insert(index);
    }

    /// Hide every token at the given indices.
    pub fn add_positions(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.positions.extend(indices);
    }

    /// Copy of `args` with the registered positions masked.
    ///
    /// Positions past the end of `args` are ignored.
    pub fn mask_args(&self, args: &[String]) -> Vec<String> {
        args.iter()
            .enumerate()
            .map(|(i, arg)| {
                if self.positions.contains(&i) {
                    self.mask.clone()
                } else {
                    arg.clone()
                }
            })
            .collect()
    }

    /// Number of registered positions.
    pub fn masked_count(&self) -> usize {
        self.positions.len()
    }
}

impl Default for OutputMasker {
    fn default() -> Self {
        Self::new()
    }
}
