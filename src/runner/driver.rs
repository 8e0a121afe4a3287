//! Sequential check driver.
//!
//! A [`Driver`] holds an ordered list of labelled check thunks. Running it
//! evaluates every thunk in order, never stopping early, and collects one
//! result per label into a [`RunSummary`].

use std::time::Instant;

use crate::checks::{CheckResult, Suite};
use crate::ui::UserInterface;

use super::command_runner::CommandRunner;
use super::summary::RunSummary;

/// A deferred check: runs when the driver reaches it.
pub type CheckThunk<'a> = Box<dyn FnOnce(&mut dyn UserInterface) -> CheckResult + 'a>;

/// Runs labelled checks in declaration order and tallies the results.
pub struct Driver<'a> {
    name: String,
    title: String,
    entries: Vec<(String, CheckThunk<'a>)>,
}

impl<'a> Driver<'a> {
    /// Create an empty driver with a header title.
    pub fn new(title: &str) -> Self {
        Self {
            name: title.to_string(),
            title: title.to_string(),
            entries: Vec::new(),
        }
    }

    /// Build a driver with one entry per check in `suite`.
    pub fn for_suite(runner: &'a CommandRunner<'a>, suite: &'a Suite) -> Self {
        let title = match &suite.description {
            Some(description) => description.clone(),
            None => format!("Running {} checks", suite.name),
        };

        let mut driver = Self::new(&title);
        driver.name = suite.name.clone();
        for check in &suite.checks {
            driver.push(&check.name, move |ui| runner.run(check, ui));
        }
        driver
    }

    /// Append a labelled check.
    pub fn push<F>(&mut self, label: &str, thunk: F) -> &mut Self
    where
        F: FnOnce(&mut dyn UserInterface) -> CheckResult + 'a,
    {
        self.entries.push((label.to_string(), Box::new(thunk)));
        self
    }

    /// Evaluate every check and show the summary.
    ///
    /// The returned summary always holds exactly one result per entry, named
    /// by the entry's label, in declaration order.
    pub fn run(self, ui: &mut dyn UserInterface) -> RunSummary {
        let started = Instant::now();
        let total = self.entries.len();

        ui.show_header(&self.title);
        if total == 0 {
            ui.warning("No checks declared");
        }

        let mut results = Vec::with_capacity(total);
        for (index, (label, thunk)) in self.entries.into_iter().enumerate() {
            ui.show_progress(index + 1, total);
            tracing::debug!(check = %label, "starting check");

            let mut result = thunk(&mut *ui);
            result.name = label;
            results.push(result);
        }

        let summary = RunSummary::new(&self.name, results, started.elapsed());
        tracing::debug!(
            passed = summary.passed(),
            total = summary.total(),
            "run finished"
        );
        ui.show_run_summary(&summary);
        summary
    }
}
