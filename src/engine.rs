use crate::context::EquivalencyOptions;
use crate::errors::{EquivalencyError, Mismatch, Result};
use crate::path::MemberPath;
use crate::steps::{Outcome, Pipeline};
use crate::structure::{Structure, TypeInfo};
use tracing::{debug, trace};

/// One in-progress comparison: what is compared, against what, and where.
#[derive(Clone)]
pub struct Comparison<'a> {
    subject: &'a dyn Structure,
    expectation: &'a dyn Structure,
    declared: TypeInfo,
    path: MemberPath,
    depth: usize,
    because: Option<String>,
}

impl<'a> Comparison<'a> {
    /// Top-level comparison; the declared type is the expectation's static type.
    pub fn root<S: Structure, E: Structure>(subject: &'a S, expectation: &'a E) -> Self {
        Self::new(subject, expectation, E::declared_type())
    }

    pub fn new(
        subject: &'a dyn Structure,
        expectation: &'a dyn Structure,
        declared: TypeInfo,
    ) -> Self {
        Self {
            subject,
            expectation,
            declared,
            path: MemberPath::root(),
            depth: 0,
            because: None,
        }
    }

    /// Attaches a reason that every mismatch below this point will carry.
    pub fn with_because(mut self, because: impl Into<String>) -> Self {
        self.because = Some(because.into());
        self
    }

    pub fn subject(&self) -> &'a dyn Structure {
        self.subject
    }

    pub fn expectation(&self) -> &'a dyn Structure {
        self.expectation
    }

    pub fn declared_type(&self) -> &TypeInfo {
        &self.declared
    }

    pub fn path(&self) -> &MemberPath {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn because(&self) -> Option<&str> {
        self.because.as_deref()
    }

    pub fn describe(&self) -> String {
        self.path.describe()
    }

    pub fn for_member(
        &self,
        name: &str,
        subject: &'a dyn Structure,
        expectation: &'a dyn Structure,
        declared: TypeInfo,
    ) -> Self {
        Self {
            subject,
            expectation,
            declared,
            path: self.path.member(name),
            depth: self.depth + 1,
            because: self.because.clone(),
        }
    }

    pub fn for_index(
        &self,
        index: usize,
        subject: &'a dyn Structure,
        expectation: &'a dyn Structure,
        declared: TypeInfo,
    ) -> Self {
        Self {
            subject,
            expectation,
            declared,
            path: self.path.index(index),
            depth: self.depth + 1,
            because: self.because.clone(),
        }
    }

    /// Same member, new values: used to compare the contents of a wrapper.
    pub fn for_payload(
        &self,
        subject: &'a dyn Structure,
        expectation: &'a dyn Structure,
        declared: TypeInfo,
    ) -> Self {
        Self {
            subject,
            expectation,
            declared,
            path: self.path.clone(),
            depth: self.depth,
            because: self.because.clone(),
        }
    }
}

/// Collects every mismatch found during one comparison.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    mismatches: Vec<Mismatch>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mismatch at `ctx`'s path, suffixed with its reason if it has one.
    pub fn fail(&mut self, ctx: &Comparison<'_>, message: impl Into<String>) {
        let mut message = message.into();
        if let Some(because) = ctx.because() {
            let trimmed = message.trim_end_matches('.').len();
            message.truncate(trimmed);
            message.push_str(&format!(" because {because}."));
        }
        let mismatch = Mismatch {
            path: ctx.path().to_string(),
            message,
        };
        trace!(path = %mismatch.path, message = %mismatch.message, "mismatch");
        self.mismatches.push(mismatch);
    }

    pub fn is_empty(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mismatches.len()
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn into_result(self) -> Result<()> {
        if self.mismatches.is_empty() {
            Ok(())
        } else {
            Err(EquivalencyError::Mismatches(self.mismatches))
        }
    }
}

/// The recursion hook handed to every step.
pub trait Validator {
    fn options(&self) -> &EquivalencyOptions;

    /// Runs the pipeline for `ctx`, recording failures into `report`.
    fn assert_equality_using(&self, ctx: &Comparison<'_>, report: &mut Report);
}

/// Structural comparison driven by an explicit, caller-built [`Pipeline`].
#[derive(Clone)]
pub struct Equivalency {
    pipeline: Pipeline,
    options: EquivalencyOptions,
}

impl Equivalency {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            options: EquivalencyOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EquivalencyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Compares `subject` against `expectation`, returning every mismatch found.
    pub fn compare<S: Structure, E: Structure>(&self, subject: &S, expectation: &E) -> Result<()> {
        self.run(Comparison::root(subject, expectation))
    }

    /// Like [`compare`](Self::compare), with `because` appended to every mismatch.
    pub fn compare_because<S: Structure, E: Structure>(
        &self,
        subject: &S,
        expectation: &E,
        because: &str,
    ) -> Result<()> {
        self.run(Comparison::root(subject, expectation).with_because(because))
    }

    fn run(&self, ctx: Comparison<'_>) -> Result<()> {
        debug!(declared = %ctx.declared_type(), because = ?ctx.because(), "comparing");
        let mut report = Report::new();
        self.assert_equality_using(&ctx, &mut report);
        debug!(mismatches = report.len(), "comparison finished");
        report.into_result()
    }
}

impl Validator for Equivalency {
    fn options(&self) -> &EquivalencyOptions {
        &self.options
    }

    fn assert_equality_using(&self, ctx: &Comparison<'_>, report: &mut Report) {
        for step in self.pipeline.steps() {
            if !step.can_handle(ctx, &self.options) {
                continue;
            }
            trace!(step = step.name(), path = %ctx.path(), "step claimed comparison");
            if step.handle(ctx, self, report) == Outcome::Handled {
                return;
            }
        }
        report.fail(
            ctx,
            format!(
                "No equivalency step was able to compare {} of type {}.",
                ctx.describe(),
                ctx.declared_type()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn payload_context_keeps_path_and_depth() {
        let (a, b) = (1, 2);
        let root = Comparison::root(&a, &b);
        let member = root.for_member("inner", &a, &b, i32::declared_type());
        let payload = member.for_payload(&b, &a, i32::declared_type());
        assert_eq!(payload.path().to_string(), "inner");
        assert_eq!(payload.depth(), 1);
        assert_eq!(payload.describe(), "member inner");
    }

    #[test]
    fn reason_follows_the_comparison_down() {
        let (a, b) = (1, 2);
        let root = Comparison::root(&a, &b).with_because("ids are stable");
        let member = root.for_member("inner", &a, &b, i32::declared_type());
        let item = member.for_index(0, &a, &b, i32::declared_type());
        let payload = item.for_payload(&a, &b, i32::declared_type());
        assert_eq!(payload.because(), Some("ids are stable"));

        let mut report = Report::new();
        report.fail(&payload, "Expected member inner[0] to be 2, but found 1.");
        assert_eq!(
            report.mismatches()[0].message,
            "Expected member inner[0] to be 2, but found 1 because ids are stable."
        );
    }

    #[test]
    fn empty_pipeline_reports_unhandled() {
        let engine = Equivalency::new(Pipeline::new());
        let err = engine.compare(&1, &1).unwrap_err();
        assert_eq!(err.mismatches().len(), 1);
        assert!(err.mismatches()[0].message.starts_with("No equivalency step"));
    }
}
