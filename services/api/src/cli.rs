use crate::report::{run_batch, run_estimate, BatchArgs, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crop_yield::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Crop Yield Estimator",
    about = "Serve and run the crop yield estimator from the command line",
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
    /// Estimate the yield of a single field
    Estimate(EstimateArgs),
    /// Estimate every field listed in a CSV file
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Batch(args) => run_batch(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crop_yield::estimation::{AreaUnit, SoilFertility};

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["crop-yield-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn estimate_arguments_parse_enums_case_insensitively() {
        let cli = Cli::try_parse_from([
            "crop-yield-api",
            "estimate",
            "--crop",
            "Wheat",
            "--area",
            "2.5",
            "--area-unit",
            "HA",
            "--soil-fertility",
            "High",
            "--rainfall-mm",
            "700",
            "--fertilizer-rate",
            "90",
            "--management-score",
            "7",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Estimate(args)) => {
                assert_eq!(args.area_unit, AreaUnit::Hectares);
                assert_eq!(args.soil_fertility, SoilFertility::High);
                assert_eq!(args.previous_yield, 0.0);
                assert!(!args.json);
            }
            other => panic!("expected estimate command, got {other:?}"),
        }
    }

    #[test]
    fn estimate_rejects_unknown_area_unit() {
        let parsed = Cli::try_parse_from([
            "crop-yield-api",
            "estimate",
            "--crop",
            "Wheat",
            "--area",
            "1",
            "--area-unit",
            "furlongs",
            "--soil-fertility",
            "low",
            "--rainfall-mm",
            "700",
            "--fertilizer-rate",
            "90",
            "--management-score",
            "7",
        ]);
        assert!(parsed.is_err());
    }
}
