use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(long, global = true, help = "Path to a settings.json file")]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        #[arg(long, help = "Address to listen on, e.g. 127.0.0.1:3000")]
        bind: Option<String>,
    },
    /// Clean links from the command line and print the results
    Clean {
        #[arg(
            long,
            value_delimiter = ',',
            help = "Comma-separated list of links to clean"
        )]
        urls: Vec<String>,

        #[arg(
            long = "src-files",
            value_delimiter = ',',
            help = "Comma-separated list of CSV files containing links"
        )]
        src_files: Vec<String>,
    },
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let args = CommandLineArgs::parse();

        match &args.command {
            Some(Command::Clean { urls, src_files }) => {
                info!("Parsed {} URL(s) from --urls", urls.len());
                info!("Parsed {} file(s) from --src-files", src_files.len());
            }
            Some(Command::Serve { .. }) | None => {}
        }

        args
    }

    /// The subcommand to run; serving is the default.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { bind: None })
    }
}
