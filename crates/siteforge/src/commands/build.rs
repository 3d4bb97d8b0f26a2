//! `siteforge build`: the full provisioning run.

use siteforge_core::{Operator, Outcome, Provisioner};

use crate::cli::{BuildArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::operator::TerminalOperator;
use crate::output;

const SITE_NAME_PROMPT: &str = "Enter a site name";

pub async fn handle(args: BuildArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let resolved = config::resolve(global, args.devices.as_deref())?;
    let provision = resolved.provision()?;
    let client = resolved.session.client()?;

    let mut operator = TerminalOperator;
    let site_name = match args.name {
        Some(name) => name,
        None => operator.ask(SITE_NAME_PROMPT)?,
    };

    let provisioner = Provisioner::new(client, provision);
    let outcome = provisioner.run(&site_name, &mut operator).await?;

    let color = output::should_color(&global.color);
    let out = output::render_single(&global.output, &outcome, |o| describe(o, color))?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Operator-facing lines for a finished run.
fn describe(outcome: &Outcome, color: bool) -> String {
    let site = outcome.site();
    let mut lines = vec![output::success(
        &format!("site '{}' created ({})", site.name, site.id),
        color,
    )];

    match outcome {
        Outcome::Assigned { report, .. } => {
            lines.push(output::success(&report.summary_line(), color));
            lines.extend(
                report
                    .failure_lines()
                    .iter()
                    .map(|line| output::failure(line, color)),
            );
        }
        other => {
            if let Some(reason) = other.stop_reason() {
                lines.push(output::warning(&reason, color));
            }
        }
    }

    lines.join("\n")
}
