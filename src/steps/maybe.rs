use super::{EquivalencyStep, Outcome};
use crate::context::EquivalencyOptions;
use crate::engine::{Comparison, Report, Validator};
use crate::structure::{MaybeShape, Render, Shape, Slot, TypeInfo};
use tracing::trace;

/// Compares Maybe members by their empty/filled state, recursing into payloads.
///
/// Claims every comparison whose declared type is a Maybe of anything. Once
/// claimed, the comparison is always reported as handled so no later step
/// looks at the wrapper itself.
pub struct MaybeEquivalencyStep;

impl EquivalencyStep for MaybeEquivalencyStep {
    fn name(&self) -> &'static str {
        "maybe"
    }

    fn can_handle(&self, ctx: &Comparison<'_>, _: &EquivalencyOptions) -> bool {
        ctx.declared_type().is_maybe()
    }

    fn handle(&self, ctx: &Comparison<'_>, parent: &dyn Validator, report: &mut Report) -> Outcome {
        let subject = match ctx.subject().shape() {
            Shape::Maybe(m) => m,
            Shape::Absent => {
                report.fail(ctx, format!("Expected {} not to be <null>.", ctx.describe()));
                return Outcome::Handled;
            }
            _ => {
                report.fail(
                    ctx,
                    format!(
                        "Expected {} to be a Maybe<_>, but it was a {}.",
                        ctx.describe(),
                        ctx.subject().runtime_type()
                    ),
                );
                return Outcome::Handled;
            }
        };

        let expectation = match ctx.expectation().shape() {
            Shape::Maybe(m) => m,
            Shape::Absent => {
                report.fail(
                    ctx,
                    format!(
                        "Expected {} to be <null>, but found {}.",
                        ctx.describe(),
                        Render(ctx.subject())
                    ),
                );
                return Outcome::Handled;
            }
            _ => {
                report.fail(
                    ctx,
                    format!(
                        "Expected {} to be compared against a Maybe<_>, \
                         but the expectation was a {}.",
                        ctx.describe(),
                        ctx.expectation().runtime_type()
                    ),
                );
                return Outcome::Handled;
            }
        };

        let subject_contained = subject.contained_type();
        let expectation_contained = ctx
            .declared_type()
            .contained()
            .cloned()
            .unwrap_or_else(|| expectation.contained_type());
        trace!(
            path = %ctx.path(),
            subject = %subject_contained,
            expectation = %expectation_contained,
            "comparing maybe contents"
        );

        compare_contents(subject, expectation, expectation_contained, ctx, parent, report);
        Outcome::Handled
    }
}

fn compare_contents<'a>(
    subject: &'a dyn MaybeShape,
    expectation: &'a dyn MaybeShape,
    declared: TypeInfo,
    ctx: &Comparison<'a>,
    parent: &dyn Validator,
    report: &mut Report,
) {
    match (expectation.slot(), subject.slot()) {
        (Slot::Empty, Slot::Empty) => {}
        (Slot::Empty, Slot::Filled(_)) => report.fail(
            ctx,
            format!("Expected {} to be empty, but it was filled.", ctx.describe()),
        ),
        (Slot::Filled(_), Slot::Empty) => report.fail(
            ctx,
            format!("Expected {} to be filled, but it was empty.", ctx.describe()),
        ),
        (Slot::Filled(e), Slot::Filled(s)) => {
            parent.assert_equality_using(&ctx.for_payload(s, e, declared), report);
        }
    }
}
