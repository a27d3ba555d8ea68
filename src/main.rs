use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fadvisor::core::config::OutputFormat;
use fadvisor::core::log::init_logging;
use fadvisor::core::profile::{Goal, ProfileDraft, RiskTolerance};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ProfileArgs {
    /// Age in whole years
    #[arg(long, allow_negative_numbers = true)]
    age: Option<i64>,

    /// Monthly income
    #[arg(long, allow_negative_numbers = true)]
    income: Option<f64>,

    /// Monthly expenses
    #[arg(long, allow_negative_numbers = true)]
    expenses: Option<f64>,

    /// Current savings
    #[arg(long, allow_negative_numbers = true)]
    savings: Option<f64>,

    /// Total outstanding debt
    #[arg(long, allow_negative_numbers = true)]
    debt: Option<f64>,

    /// Risk tolerance: low, medium or high
    #[arg(long)]
    risk: Option<String>,

    /// Goal: debt, emergency, retirement, investment or wealth
    #[arg(long)]
    goal: Option<String>,
}

impl From<ProfileArgs> for ProfileDraft {
    fn from(args: ProfileArgs) -> ProfileDraft {
        ProfileDraft {
            age: args.age,
            income: args.income,
            expenses: args.expenses,
            savings: args.savings,
            debt: args.debt,
            risk: args.risk.map(RiskTolerance::from),
            goal: args.goal.map(Goal::from),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Evaluate a profile and print the recommended plan
    Advise {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format, overrides the config file
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Fill in the profile through prompts and review the plan
    Interactive {
        /// Output format, overrides the config file
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => fadvisor::cli::setup::setup(),
        Some(Commands::Advise { profile, format }) => fadvisor::run_command(
            fadvisor::AppCommand::Advise {
                overrides: profile.into(),
                format,
            },
            config_path,
        ),
        Some(Commands::Interactive { format }) => {
            fadvisor::run_command(fadvisor::AppCommand::Interactive { format }, config_path)
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
