//! Running steps and scenarios against a world.
//!
//! A scenario runs its background first, then its own steps in order,
//! firing the step hooks of the [`TestResult`] around each one. The first
//! undefined or failing step stops the scenario; the caller turns the
//! returned [`ExecutionError`] into exactly one outcome.

mod error;

#[cfg(test)]
mod tests;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::model::{Scenario, Step};
use crate::panic::panic_message;
use crate::registry::{StepContext, StepError};
use crate::result::{StepInfo, TestResult};

pub use error::ExecutionError;

impl<W> Step<W> {
    /// Invoke the bound callback with `world`.
    ///
    /// Panics raised by the callback are caught and returned as
    /// [`StepError::Panic`].
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Undefined`] for an unbound step, otherwise the
    /// callback's error.
    pub fn run(&self, world: &mut W) -> Result<(), StepError> {
        let Some(binding) = self.binding() else {
            return Err(StepError::Undefined(self.to_string()));
        };
        let mut context = StepContext::new(world, self, binding.args());
        catch_unwind(AssertUnwindSafe(|| binding.definition().call(&mut context)))
            .unwrap_or_else(|payload| Err(StepError::Panic(panic_message(payload.as_ref()))))
    }
}

impl<W> Scenario<W> {
    /// Run the background and the steps against `world`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::Skip`] for a scenario without steps,
    /// [`ExecutionError::Pending`] at the first undefined step and
    /// [`ExecutionError::StepFailed`] at the first failing one.
    pub fn run<R>(&self, world: &mut W, result: &mut R) -> Result<(), ExecutionError>
    where
        R: TestResult + ?Sized,
    {
        if self.steps().is_empty() {
            return Err(ExecutionError::skip("no steps defined"));
        }
        self.run_steps(world, result)
    }

    fn run_steps<R>(&self, world: &mut W, result: &mut R) -> Result<(), ExecutionError>
    where
        R: TestResult + ?Sized,
    {
        if let Some(background) = self.background() {
            background.run_steps(world, result)?;
        }
        for (index, step) in self.steps().iter().enumerate() {
            let info = StepInfo::from(step);
            result.start_step(&info);
            let outcome = step.run(world);
            match &outcome {
                Ok(()) => result.add_step_success(&info),
                Err(StepError::Undefined(_)) => result.add_step_undefined(&info),
                Err(error) if error.is_failure() => result.add_step_failure(&info, error),
                Err(error) => result.add_step_error(&info, error),
            }
            result.stop_step(&info);
            match outcome {
                Ok(()) => {}
                Err(StepError::Undefined(_)) => {
                    // Later steps never run, so only the halting step is pending.
                    return Err(ExecutionError::Pending {
                        steps: vec![step.to_string()],
                    });
                }
                Err(error) => {
                    return Err(ExecutionError::StepFailed {
                        index,
                        keyword: step.keyword(),
                        text: step.text().to_string(),
                        error: Arc::new(error),
                    });
                }
            }
        }
        Ok(())
    }
}
