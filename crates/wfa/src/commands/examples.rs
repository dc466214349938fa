//! `wfa examples` command implementation.

use clap::Args;

use crate::catalog::Catalog;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the examples command.
#[derive(Args)]
pub(crate) struct ExamplesArgs {
    /// Print the workflow text of this example instead of the list.
    #[arg(long)]
    show: Option<String>,
}

impl ExamplesArgs {
    /// Execute the examples command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let catalog = Catalog::load()?;

        if let Some(name) = &self.show {
            let example = catalog
                .find(name)
                .ok_or_else(|| CliError::Validation(format!("Unknown example: {name}")))?;
            output.heading(&example.name);
            output.muted(&format!("Stakeholders: {}", example.stakeholders.join(", ")));
            output.info("");
            output.info(example.workflow.trim_end());
            return Ok(());
        }

        for (department, examples) in catalog.by_department() {
            output.heading(department);
            for example in examples {
                output.info(&format!("  {}", example.name));
            }
        }
        output.muted("\nRun `wfa analyze --example \"<name>\"` to analyze one.");

        Ok(())
    }
}
