use serde::Serialize;

/// Options resolved from the command line and handed to [`crate::report`].
#[derive(Debug, Clone, Serialize)]
pub struct GleuConfig {
    /// Bootstrap iterations over random reference choices. Ignored (treated
    /// as 1) when a single reference stream is loaded.
    pub iterations: usize,
    /// Iteration `j` seeds its generator with `j * seed_stride`.
    pub seed_stride: u64,
    /// Lowercase every corpus before tokenizing.
    pub lowercase: bool,
    /// Also score every sentence against every reference.
    pub sentence_level: bool,
}

impl Default for GleuConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            seed_stride: 101,
            lowercase: false,
            sentence_level: false,
        }
    }
}

impl GleuConfig {
    /// Iterations actually run for a corpus with `streams` reference streams.
    pub fn effective_iterations(&self, streams: usize) -> usize {
        if streams <= 1 {
            1
        } else {
            self.iterations.max(1)
        }
    }
}
