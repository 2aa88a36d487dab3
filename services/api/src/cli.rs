use crate::demo::{print_questionnaire, run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use klima360::error::AppError;
use klima360::workflows::assessment::ScoringPolicyKind;

#[derive(Parser, Debug)]
#[command(
    name = "Klima360",
    about = "Enroll farmers and score their climate resilience from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a CSV export of completed questionnaires
    Score(ScoreArgs),
    /// Print the 23-question resilience questionnaire
    Questionnaire,
    /// Register sample farmers, assess them, and print the agent roster
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured scoring policy (weighted_sum or category_average)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<ScoringPolicyKind>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Questionnaire => {
            print_questionnaire();
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
