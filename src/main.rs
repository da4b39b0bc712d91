use std::process::ExitCode;

use clap::Parser;
use recalc::cli::{Cli, Command, run_project};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,recalc=info"))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project(args) => match run_project(&args) {
            Ok(output) => {
                print!("{}", output.rendered);
                if !output.rendered.ends_with('\n') {
                    println!();
                }
                if output.result.is_ok() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Command::Serve(args) => {
            if let Err(e) = recalc::api::run_http_server(args.bind, args.port).await {
                log::error!("server error: {e}");
                eprintln!("Server error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
