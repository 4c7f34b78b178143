use crate::context::EquivalencyOptions;
use crate::engine::{Comparison, Report, Validator};
use std::sync::Arc;
use tracing::debug;

pub mod maybe;

pub use maybe::MaybeEquivalencyStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The comparison is settled; later steps are skipped.
    Handled,
    /// Let the next step in the pipeline try.
    Continue,
}

/// One pluggable unit of the structural comparison pipeline.
pub trait EquivalencyStep: Send + Sync {
    fn name(&self) -> &'static str;
    fn can_handle(&self, ctx: &Comparison<'_>, options: &EquivalencyOptions) -> bool;
    fn handle(
        &self,
        ctx: &Comparison<'_>,
        parent: &dyn Validator,
        report: &mut Report,
    ) -> Outcome;
}

/// Ordered list of steps, built by the caller and handed to the engine.
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Arc<Vec<Arc<dyn EquivalencyStep>>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut pipeline = Self::new();
        pipeline.push(builtins::ReferenceEquality);
        pipeline.push(builtins::AbsentEquality);
        pipeline.push(builtins::DepthLimit);
        pipeline.push(builtins::SimpleEquality);
        pipeline.push(builtins::SequenceEquivalency);
        pipeline.push(builtins::StructuralEquivalency);
        pipeline
    }

    /// Defaults with the Maybe step right after reference equality.
    pub fn with_maybe_support() -> Self {
        let mut pipeline = Self::with_defaults();
        pipeline.add_after(builtins::REFERENCE_EQUALITY, MaybeEquivalencyStep);
        pipeline
    }

    /// Puts `step` in front of every other step.
    pub fn insert<S: EquivalencyStep + 'static>(&mut self, step: S) {
        Arc::make_mut(&mut self.steps).insert(0, Arc::new(step));
    }

    pub fn push<S: EquivalencyStep + 'static>(&mut self, step: S) {
        Arc::make_mut(&mut self.steps).push(Arc::new(step));
    }

    /// Inserts `step` after the step named `anchor`, or last if there is none.
    pub fn add_after<S: EquivalencyStep + 'static>(&mut self, anchor: &str, step: S) {
        let at = self.position(anchor).map(|i| i + 1);
        self.insert_at(anchor, at, step);
    }

    /// Inserts `step` before the step named `anchor`, or last if there is none.
    pub fn add_before<S: EquivalencyStep + 'static>(&mut self, anchor: &str, step: S) {
        let at = self.position(anchor);
        self.insert_at(anchor, at, step);
    }

    /// Drops every step called `name`; returns whether any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.steps.len();
        Arc::make_mut(&mut self.steps).retain(|s| s.name() != name);
        before != self.steps.len()
    }

    pub fn clear(&mut self) {
        Arc::make_mut(&mut self.steps).clear();
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Arc<dyn EquivalencyStep>> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name() == name)
    }

    fn insert_at<S>(&mut self, anchor: &str, at: Option<usize>, step: S)
    where
        S: EquivalencyStep + 'static,
    {
        let steps = Arc::make_mut(&mut self.steps);
        match at {
            Some(i) => steps.insert(i, Arc::new(step)),
            None => {
                debug!(anchor, step = step.name(), "anchor step not found, appending");
                steps.push(Arc::new(step));
            }
        }
    }
}

pub mod builtins {
    use super::*;
    use crate::comparison::scalars_equal;
    use crate::structure::{Render, Shape};

    pub const REFERENCE_EQUALITY: &str = "reference_equality";
    pub const ABSENT_EQUALITY: &str = "absent_equality";
    pub const DEPTH_LIMIT: &str = "depth_limit";
    pub const SIMPLE_EQUALITY: &str = "simple_equality";
    pub const SEQUENCE_EQUIVALENCY: &str = "sequence_equivalency";
    pub const STRUCTURAL_EQUIVALENCY: &str = "structural_equivalency";

    /// `Expected {desc} to be {expectation}, but found {subject}.`
    fn expected_but_found(ctx: &Comparison<'_>) -> String {
        format!(
            "Expected {} to be {}, but found {}.",
            ctx.describe(),
            Render(ctx.expectation()),
            Render(ctx.subject())
        )
    }

    /// Same object on both sides.
    pub struct ReferenceEquality;
    impl EquivalencyStep for ReferenceEquality {
        fn name(&self) -> &'static str {
            REFERENCE_EQUALITY
        }

        fn can_handle(&self, _: &Comparison<'_>, _: &EquivalencyOptions) -> bool {
            true
        }

        fn handle(&self, ctx: &Comparison<'_>, _: &dyn Validator, _: &mut Report) -> Outcome {
            let same_place = std::ptr::addr_eq(ctx.subject(), ctx.expectation());
            if same_place && ctx.subject().runtime_type() == ctx.expectation().runtime_type() {
                Outcome::Handled
            } else {
                Outcome::Continue
            }
        }
    }

    /// Either side absent.
    pub struct AbsentEquality;
    impl EquivalencyStep for AbsentEquality {
        fn name(&self) -> &'static str {
            ABSENT_EQUALITY
        }

        fn can_handle(&self, ctx: &Comparison<'_>, _: &EquivalencyOptions) -> bool {
            matches!(ctx.subject().shape(), Shape::Absent)
                || matches!(ctx.expectation().shape(), Shape::Absent)
        }

        fn handle(&self, ctx: &Comparison<'_>, _: &dyn Validator, report: &mut Report) -> Outcome {
            match (ctx.subject().shape(), ctx.expectation().shape()) {
                (Shape::Absent, Shape::Absent) => {}
                _ => report.fail(ctx, expected_but_found(ctx)),
            }
            Outcome::Handled
        }
    }

    pub struct DepthLimit;
    impl EquivalencyStep for DepthLimit {
        fn name(&self) -> &'static str {
            DEPTH_LIMIT
        }

        fn can_handle(&self, ctx: &Comparison<'_>, options: &EquivalencyOptions) -> bool {
            ctx.depth() > options.max_depth
        }

        fn handle(&self, ctx: &Comparison<'_>, _: &dyn Validator, report: &mut Report) -> Outcome {
            report.fail(
                ctx,
                format!(
                    "The maximum recursion depth was reached while comparing {}.",
                    ctx.describe()
                ),
            );
            Outcome::Handled
        }
    }

    /// Scalar leaves.
    pub struct SimpleEquality;
    impl EquivalencyStep for SimpleEquality {
        fn name(&self) -> &'static str {
            SIMPLE_EQUALITY
        }

        fn can_handle(&self, ctx: &Comparison<'_>, _: &EquivalencyOptions) -> bool {
            matches!(ctx.expectation().shape(), Shape::Scalar(_))
        }

        fn handle(&self, ctx: &Comparison<'_>, _: &dyn Validator, report: &mut Report) -> Outcome {
            let equal = match (ctx.subject().shape(), ctx.expectation().shape()) {
                (Shape::Scalar(s), Shape::Scalar(e)) => scalars_equal(&s, &e),
                _ => false,
            };
            if !equal {
                report.fail(ctx, expected_but_found(ctx));
            }
            Outcome::Handled
        }
    }

    /// Sequences, index by index.
    pub struct SequenceEquivalency;
    impl EquivalencyStep for SequenceEquivalency {
        fn name(&self) -> &'static str {
            SEQUENCE_EQUIVALENCY
        }

        fn can_handle(&self, ctx: &Comparison<'_>, _: &EquivalencyOptions) -> bool {
            matches!(ctx.expectation().shape(), Shape::Sequence { .. })
        }

        fn handle(
            &self,
            ctx: &Comparison<'_>,
            parent: &dyn Validator,
            report: &mut Report,
        ) -> Outcome {
            let Shape::Sequence { element, items: expected } = ctx.expectation().shape() else {
                return Outcome::Continue;
            };
            let Shape::Sequence { items: actual, .. } = ctx.subject().shape() else {
                report.fail(ctx, expected_but_found(ctx));
                return Outcome::Handled;
            };
            if expected.len() != actual.len() {
                report.fail(
                    ctx,
                    format!(
                        "Expected {} to contain {} item(s), but found {}.",
                        ctx.describe(),
                        expected.len(),
                        actual.len()
                    ),
                );
            }
            for (i, (s, e)) in actual.iter().zip(expected.iter()).enumerate() {
                let child = ctx.for_index(i, *s, *e, element.clone());
                parent.assert_equality_using(&child, report);
            }
            Outcome::Handled
        }
    }

    /// Records, member by member of the expectation.
    pub struct StructuralEquivalency;
    impl EquivalencyStep for StructuralEquivalency {
        fn name(&self) -> &'static str {
            STRUCTURAL_EQUIVALENCY
        }

        fn can_handle(&self, ctx: &Comparison<'_>, _: &EquivalencyOptions) -> bool {
            matches!(ctx.expectation().shape(), Shape::Record(_))
        }

        fn handle(
            &self,
            ctx: &Comparison<'_>,
            parent: &dyn Validator,
            report: &mut Report,
        ) -> Outcome {
            let Shape::Record(expected) = ctx.expectation().shape() else {
                return Outcome::Continue;
            };
            let Shape::Record(actual) = ctx.subject().shape() else {
                report.fail(ctx, expected_but_found(ctx));
                return Outcome::Handled;
            };
            for member in expected {
                let subject = actual.iter().find(|m| m.name == member.name);
                let child = ctx.for_member(
                    member.name,
                    subject.map_or(member.value, |m| m.value),
                    member.value,
                    member.declared,
                );
                match subject {
                    Some(_) => parent.assert_equality_using(&child, report),
                    None => report.fail(
                        &child,
                        format!(
                            "Expected {} to exist, but the subject has no such member.",
                            child.describe()
                        ),
                    ),
                }
            }
            Outcome::Handled
        }
    }
}
