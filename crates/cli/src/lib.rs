use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quokka",
    version,
    about = "C/C++ editor commands: jump to Visual Studio, switch header/source, copy file name",
    long_about = "Quokka hosts its editor commands behind a language server. Editors start it \
                  with `quokka lsp` and invoke the commands through workspace/executeCommand."
)]
pub struct Cli {
    /// Also write logs to stderr (they always go to ~/.quokka/logs)
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server on stdio
    Lsp,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Lsp => "lsp",
    };
    let _guard = quokka_core::logging::init_logging(
        &quokka_core::logging::log_dir(),
        component,
        cli.log_stderr,
    )?;

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Lsp => {
            tracing::info!("Starting Quokka LSP server v{}", env!("CARGO_PKG_VERSION"));
            rt.block_on(quokka_lsp::run_server())?;
            Ok(())
        }
    }
}
