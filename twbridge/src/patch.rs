//! Offset-based text substitution.
//!
//! Patches always address the *original* string. They are applied in
//! ascending offset order while a running delta tracks how far earlier
//! replacements have shifted the rest of the text.

/// One substitution: replace `length` bytes at `offset` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub offset: usize,
    pub length: usize,
    pub replacement: String,
}

impl Patch {
    pub fn new(offset: usize, length: usize, replacement: impl Into<String>) -> Self {
        Patch {
            offset,
            length,
            replacement: replacement.into(),
        }
    }

    fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Applies `patches` to `input`.
///
/// # Panics
///
/// Panics if two patches overlap, or if a patch does not fall on character
/// boundaries of `input`. Both indicate a bug in whoever produced the patches.
pub fn apply_patches(input: &str, patches: &[Patch]) -> String {
    let mut ordered: Vec<&Patch> = patches.iter().collect();
    ordered.sort_by_key(|p| p.offset);

    for pair in ordered.windows(2) {
        assert!(
            pair[0].end() <= pair[1].offset,
            "overlapping patches at offsets {} and {}",
            pair[0].offset,
            pair[1].offset
        );
    }

    let mut out = input.to_string();
    let mut delta: isize = 0;
    for patch in ordered {
        let start = (patch.offset as isize + delta) as usize;
        out.replace_range(start..start + patch.length, &patch.replacement);
        delta += patch.replacement.len() as isize - patch.length as isize;
    }
    out
}
