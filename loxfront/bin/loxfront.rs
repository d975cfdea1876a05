use clap::Parser;
use loxfront::{
    cli::{AnsiStyles, LoxfrontArgs},
    config::{DriverConfig, EXIT_DATA_ERROR},
    Driver, LoxfrontError, LoxfrontResult,
};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions: main
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> LoxfrontResult<()> {
    // Parse command line arguments
    let args = LoxfrontArgs::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DriverConfig::load(args.config.as_deref())
        .await?
        .with_emit(args.emit);
    let driver = Driver::new(config);

    match args.script {
        Some(script) => match driver.run_file(&script).await {
            Ok(output) => println!("{output}"),
            Err(error @ LoxfrontError::Syntax(_)) => {
                report(&error);
                std::process::exit(EXIT_DATA_ERROR);
            }
            Err(error) => return Err(error),
        },
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            driver
                .run_prompt(stdin, tokio::io::stdout(), report)
                .await?;
        }
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// Prints each reported error on its own line of stderr.
fn report(error: &LoxfrontError) {
    match error.diagnostics() {
        Some(diagnostics) => {
            for line in diagnostics.to_string().lines() {
                eprintln!("{}", line.error());
            }
        }
        None => eprintln!("{}", error.to_string().error()),
    }
}
