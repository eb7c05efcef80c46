use super::*;

mod run;
pub use run::*;

mod list;
pub use list::*;

/// All CLI commands available in this binary.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Solve grid problems and print their reports.
    #[command(alias = "r")]
    Run(Run),

    /// List the problem files under a directory.
    #[command(alias = "l")]
    List(List),
}

#[derive(clap::Args, Debug)]
pub struct Run {
    /// Paths of the problem files to solve.
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Save the report next to the problem file.
    #[arg(short, long, default_value_t = false)]
    save: bool,
    /// Print the report as JSON (Hint: redirect stdout)
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

#[derive(clap::Args, Debug)]
pub struct List {
    /// Path to the problems directory.
    #[arg(default_value = ".")]
    path: PathBuf,
}

impl Command {
    pub fn run(self) {
        match self {
            Command::Run(args) => args.run(),
            Command::List(args) => args.run(),
        }
    }
}
