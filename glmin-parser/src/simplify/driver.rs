use crate::{error::Result, tree::TokenTree};
use super::SimplifyOptions;
use tracing::{debug, instrument};

/// The outcome of a [`Simplifier`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyReport {
    /// The number of rewrites performed.
    pub steps: usize,

    /// True if the tree reached a fixed point, false if the run stopped at the step limit.
    pub converged: bool,
}

/// Drives [`TokenTree::simplify_with`] until the tree stops changing.
///
/// Wrapper nodes left behind by a rewrite are collapsed with [`TokenTree::normalize`] after every
/// step, so that a literal freed from its parens can take part in folding on the next step:
/// `(2)+3` simplifies to `5`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Simplifier {
    options: SimplifyOptions,
}

impl Simplifier {
    /// Creates a simplifier with the given options.
    pub fn new(options: SimplifyOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this simplifier.
    pub fn options(&self) -> &SimplifyOptions {
        &self.options
    }

    /// Simplifies the tree in place until no rewrite applies, or until the step limit is
    /// reached.
    #[instrument(level = "debug", skip_all)]
    pub fn run(&self, tree: &mut TokenTree) -> Result<SimplifyReport> {
        let Some(root) = tree.root() else {
            return Ok(SimplifyReport { steps: 0, converged: true });
        };

        tree.normalize(root)?;
        let mut steps = 0;
        loop {
            if self.options.max_steps.is_some_and(|max| steps >= max) {
                debug!(steps, "step limit reached");
                return Ok(SimplifyReport { steps, converged: false });
            }

            if !tree.simplify_with(root, &self.options)? {
                break;
            }
            steps += 1;
            tree.normalize(root)?;
        }

        debug!(steps, "reached fixed point");
        Ok(SimplifyReport { steps, converged: true })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(source: &str) -> (String, SimplifyReport) {
        let mut tree = TokenTree::parse(source).unwrap();
        let report = Simplifier::default().run(&mut tree).unwrap();
        (tree.to_string(), report)
    }

    #[test]
    fn fixed_point_is_stable() {
        let mut tree = TokenTree::parse("((1 + 2) * 4) - x / (2.0 * 0.25)").unwrap();
        let report = Simplifier::default().run(&mut tree).unwrap();
        assert!(report.converged);
        assert_eq!(tree.to_string(), "12-x/.5");

        let root = tree.root().unwrap();
        assert!(!tree.simplify(root).unwrap());
        assert_eq!(Simplifier::default().run(&mut tree).unwrap(), SimplifyReport { steps: 0, converged: true });
    }

    #[test]
    fn folds_through_parens() {
        assert_eq!(simplified("(2)+3"), (String::from("5"), SimplifyReport { steps: 2, converged: true }));
        assert_eq!(simplified("(((a)))").0, "a");
        assert_eq!(simplified("f((x), (1+1))").0, "f(x,2)");
    }

    #[test]
    fn subtraction_chain_regression() {
        // the leftmost split groups `10 - 2 - 3` as `10 - (2 - 3)`
        assert_eq!(simplified("10 - 2 - 3").0, "11");
        assert_eq!(simplified("a - 2 - 3").0, "a- -1");
    }

    #[test]
    fn precision_preserved() {
        assert_eq!(simplified("2.0 + 3").0, "5.");
        assert_eq!(simplified("2 + 3").0, "5");
        assert_eq!(simplified("1.0lf / 4.0").0, ".25lf");
        assert_eq!(simplified("7u / 2").0, "3u");
    }

    #[test]
    fn step_limit() {
        let options = SimplifyOptions::default().into_builder().max_steps(Some(1)).build();
        let mut tree = TokenTree::parse("(a) + (b)").unwrap();
        let report = Simplifier::new(options).run(&mut tree).unwrap();
        assert_eq!(report, SimplifyReport { steps: 1, converged: false });
        assert_eq!(tree.to_string(), "a+(b)");
    }

    #[test]
    fn empty_tree() {
        let mut tree = TokenTree::new();
        assert_eq!(Simplifier::default().run(&mut tree).unwrap(), SimplifyReport { steps: 0, converged: true });
    }

    #[test]
    fn no_nodes_leak() {
        let mut tree = TokenTree::parse("v[(1 + 2) * 3] * (x)").unwrap();
        Simplifier::default().run(&mut tree).unwrap();
        assert_eq!(tree.to_string(), "v[9]*x");
        assert_eq!(tree.reachable(), tree.len());
    }
}
