//! Rendering of solve results.

use std::fmt::{self, Write};

use anyhow::Result;
use console::style;
use serde::Serialize;

use qroute_vrp::{ProblemInstance, VrpSolution};

/// Output formats for `qroute solve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SolveFormat {
    #[default]
    Table,
    Json,
}

/// Output formats for `qroute example`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Serialize)]
struct SolveReport<'a> {
    problem: &'a ProblemInstance,
    solution: &'a VrpSolution,
}

/// Render a solution in the requested format.
pub fn render_solution(
    problem: &ProblemInstance,
    solution: &VrpSolution,
    format: SolveFormat,
) -> Result<String> {
    match format {
        SolveFormat::Table => {
            let mut out = String::new();
            write_table(&mut out, problem, solution)?;
            Ok(out)
        }
        SolveFormat::Json => {
            let report = SolveReport { problem, solution };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

/// Render a problem instance as an editable document.
pub fn render_problem(problem: &ProblemInstance, format: DocumentFormat) -> Result<String> {
    Ok(match format {
        DocumentFormat::Yaml => serde_yaml_ng::to_string(problem)?,
        DocumentFormat::Json => serde_json::to_string_pretty(problem)?,
    })
}

fn write_table(
    out: &mut impl Write,
    problem: &ProblemInstance,
    solution: &VrpSolution,
) -> fmt::Result {
    writeln!(
        out,
        "{} Problem: {} customers, {} vehicles (capacity {}, not enforced)",
        style("→").cyan().bold(),
        problem.num_customers(),
        problem.num_vehicles(),
        solution.vehicle_capacity
    )?;
    writeln!(
        out,
        "  Rotated qubit {} by {:.4} rad (|amplitude| {:.4} at basis state {})",
        solution.optimization.target,
        solution.optimization.angle,
        solution.optimization.amplitude,
        solution.optimization.basis_index
    )?;
    writeln!(
        out,
        "  Majority outcome {} ({} of {} shots)",
        style(&solution.bitstring).cyan(),
        solution.frequency,
        solution.shots
    )?;

    writeln!(
        out,
        "\n{} Optimized Routes: {}",
        style("✓").green().bold(),
        solution.assignment
    )?;

    for (vehicle, tour) in solution.plan.tours.iter().enumerate() {
        let stops = if tour.is_empty() {
            style("idle".to_string()).dim().to_string()
        } else {
            tour.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" → ")
        };
        writeln!(out, "  Vehicle {vehicle}: {stops}")?;
    }

    if !solution.plan.unassigned.is_empty() {
        writeln!(
            out,
            "  {} unassigned customers: {:?}",
            style("!").yellow().bold(),
            solution.plan.unassigned
        )?;
    }
    if !solution.plan.conflicts.is_empty() {
        writeln!(
            out,
            "  {} customers selecting several vehicles: {:?}",
            style("!").yellow().bold(),
            solution.plan.conflicts
        )?;
    }

    writeln!(
        out,
        "\nTotal Distance: {}",
        style(solution.total_distance).yellow()
    )?;

    Ok(())
}
