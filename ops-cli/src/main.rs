use anyhow::Context;
use clap::Parser;
use error_common::{log_error, ErrorResponse};
use ops_cli::{commands, logging, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init_tracing(args.verbose, args.json_logs);

    match commands::execute(args).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            log_error("rebac", &err);
            let body = serde_json::to_string_pretty(&ErrorResponse::from_error(&err))
                .context("failed to render error response")?;
            eprintln!("{body}");
            std::process::exit(1);
        }
    }
}
