//! Terminal form that collects a profile, shows the plan and offers a reset.
use super::{advise, ui};
use crate::core::config::OutputFormat;
use crate::core::profile::{FinancialProfile, Goal, RiskTolerance};
use anyhow::{Context, Result, anyhow, bail};
use std::io::{BufRead, Write};
use tracing::debug;

pub fn run(format: OutputFormat) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with(&mut stdin.lock(), &mut stdout.lock(), format)
}

/// Runs the form loop over arbitrary streams. Each pass starts from an empty
/// form; the loop ends when the user declines to start over.
pub fn run_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    format: OutputFormat,
) -> Result<()> {
    loop {
        writeln!(
            output,
            "{}",
            ui::style_text("Tell us about your finances", ui::StyleType::Title)
        )?;
        let profile = read_profile(input, output)?;
        debug!(?profile, "Form submitted");

        let report = advise::run(&profile, format)?;
        writeln!(output, "{report}")?;
        writeln!(output, "{}", ui::separator())?;

        let again = prompt(input, output, "Start over with a new profile? [y/N]")?;
        if !matches!(again.to_lowercase().as_str(), "y" | "yes") {
            return Ok(());
        }
    }
}

fn read_profile<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<FinancialProfile> {
    Ok(FinancialProfile {
        age: prompt_field(input, output, "Age", parse_age)?,
        income: prompt_field(input, output, "Monthly income", parse_amount)?,
        expenses: prompt_field(input, output, "Monthly expenses", parse_amount)?,
        savings: prompt_field(input, output, "Current savings", parse_amount)?,
        debt: prompt_field(input, output, "Total debt", parse_amount)?,
        risk: prompt_field(input, output, "Risk tolerance (low/medium/high)", parse_risk)?,
        goal: prompt_field(
            input,
            output,
            "Primary goal (debt/emergency/retirement/investment/wealth)",
            parse_goal,
        )?,
    })
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        bail!("Input closed before the form was completed");
    }
    Ok(line.trim().to_string())
}

/// Re-prompts until `parse` accepts the answer.
fn prompt_field<R, W, T>(
    input: &mut R,
    output: &mut W,
    label: &str,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        let answer = prompt(input, output, label)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(
                output,
                "{}",
                ui::style_text(&e.to_string(), ui::StyleType::Error)
            )?,
        }
    }
}

pub fn parse_age(s: &str) -> Result<i64> {
    s.trim()
        .parse()
        .map_err(|_| anyhow!("Age must be a whole number, got '{s}'"))
}

/// Accepts plain numbers plus an optional leading `$` and `,` separators.
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(anyhow!("Amount must be a number, got '{s}'")),
    }
}

pub fn parse_risk(s: &str) -> Result<RiskTolerance> {
    match RiskTolerance::from(s) {
        RiskTolerance::Other(_) => Err(anyhow!("Choose one of low, medium or high")),
        risk => Ok(risk),
    }
}

pub fn parse_goal(s: &str) -> Result<Goal> {
    match Goal::from(s) {
        Goal::Other(_) => Err(anyhow!(
            "Choose one of debt, emergency, retirement, investment or wealth"
        )),
        goal => Ok(goal),
    }
}
