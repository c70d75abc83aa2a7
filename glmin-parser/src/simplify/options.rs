/// Options that control which rewrites the simplifier performs, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// The maximum number of rewrites to perform in one run. If [`None`], the simplifier runs
    /// until the tree stops changing.
    ///
    /// Every rewrite removes at least one leaf or one pair of delimiters, so a run always ends.
    /// The limit exists to bound the time spent on very large expressions.
    pub max_steps: Option<usize>,

    /// Whether to fold binary operators applied to two numeric literals.
    pub fold_constants: bool,

    /// Whether to remove parens around single-leaf expressions.
    pub strip_parens: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            max_steps: Some(10_000),
            fold_constants: true,
            strip_parens: true,
        }
    }
}

impl SimplifyOptions {
    /// Wraps the given [`SimplifyOptions`] into a builder for further customization.
    pub fn into_builder(self) -> SimplifyOptionsBuilder {
        SimplifyOptionsBuilder(self)
    }
}

/// Helper struct to build a [`SimplifyOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptionsBuilder(SimplifyOptions);

impl SimplifyOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of rewrites per run. See [`SimplifyOptions::max_steps`] for more
    /// information.
    pub fn max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.0.max_steps = max_steps;
        self
    }

    /// Sets whether constant folding is enabled.
    pub fn fold_constants(mut self, fold_constants: bool) -> Self {
        self.0.fold_constants = fold_constants;
        self
    }

    /// Sets whether redundant parens are removed.
    pub fn strip_parens(mut self, strip_parens: bool) -> Self {
        self.0.strip_parens = strip_parens;
        self
    }

    /// Builds the [`SimplifyOptions`] struct.
    pub fn build(self) -> SimplifyOptions {
        self.0
    }
}
