use crate::demo::{run_demo, DemoArgs};
use crate::server;
use casting_platform::casting::ApiDoc;
use casting_platform::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Casting Platform",
    about = "Run the casting platform API or exercise it from the command line",
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
    /// Run a casting call end to end against an in-memory store
    Demo(DemoArgs),
    /// Print the OpenAPI document for the casting endpoints
    Openapi(OpenapiArgs),
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

#[derive(Args, Debug, Default)]
pub(crate) struct OpenapiArgs {
    /// Write the document to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Openapi(args) => write_openapi(args),
    }
}

fn write_openapi(args: OpenapiArgs) -> Result<(), AppError> {
    let document = ApiDoc::json()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, document)?;
            println!("OpenAPI document written to {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}
