use anyhow::Result;
use clap::{Parser, Subcommand};
use codekeeper::areas::repository::Repository;
use codekeeper::artifacts::core::batch_report::BatchReport;
use codekeeper::artifacts::core::pager::PagerWriter;
use codekeeper::commands::plumbing::hash_object::hash_object;
use codekeeper::commands::porcelain::merge_files::merge_files;
use codekeeper::config::Settings;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "codekeeper",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal local version-control engine",
    long_about = "Codekeeper snapshots files into a version store, records every snapshot \
    in an append-only commit log, and can retrieve, roll back, branch and merge them. \
    It works on a single machine, without a server.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a repository for the current directory",
        long_about = "This command creates the repository <CODEKEEPER_HOME>/<project> and points \
        the current directory at it. The project name defaults to the directory's name."
    )]
    Init {
        #[arg(index = 1, help = "The project name")]
        project: Option<String>,
    },
    #[command(name = "add", about = "Copy files into the staging area")]
    Add {
        #[arg(index = 1, required = true, help = "The files to stage")]
        paths: Vec<String>,
    },
    #[command(name = "reset", about = "Remove files from the staging area")]
    Reset {
        #[arg(index = 1, required = true, help = "The files to unstage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Snapshot files and record them in the commit log",
        long_about = "This command records the staged files, or the listed files when nothing \
        is staged, as a new commit with the specified message."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
        #[arg(index = 2, help = "The files to commit when nothing is staged")]
        files: Vec<String>,
    },
    #[command(name = "status", about = "Show staged, modified and untracked files")]
    Status,
    #[command(name = "history", about = "Show every commit in log order")]
    History,
    #[command(
        name = "retrieve",
        about = "Restore the files of the latest commit with the given message"
    )]
    Retrieve {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(
        name = "rollback",
        about = "Restore a file from its latest version or from a given commit",
        long_about = "This command restores a file from its most recent recorded version. \
        When a commit id (or a unique prefix of at least 4 characters) is given, the file \
        is restored from that commit instead."
    )]
    Rollback {
        #[arg(index = 1, help = "The file to restore")]
        target: String,
        #[arg(index = 2, help = "The commit to restore from")]
        commit_id: Option<String>,
    },
    #[command(
        name = "conflicts",
        about = "Report files that diverged from their recorded version"
    )]
    Conflicts {
        #[arg(index = 1, help = "The file to check; all tracked files when omitted")]
        file: Option<String>,
    },
    #[command(name = "resolve", about = "Replace a file with a resolution file")]
    Resolve {
        #[arg(index = 1, help = "The file to overwrite")]
        file: String,
        #[arg(index = 2, help = "The file holding the resolved content")]
        resolution: String,
    },
    #[command(name = "branch", about = "Create a branch, or list branches")]
    Branch {
        #[arg(index = 1, help = "The branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "switch",
        about = "Copy a branch's files over the working directory"
    )]
    Switch {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(
        name = "merge",
        about = "Merge the files two branches share into the first branch",
        long_about = "This command merges every file present in both branches and writes the \
        result as merged_<name> into the first branch. Nothing is applied or committed."
    )]
    Merge {
        #[arg(index = 1)]
        first: String,
        #[arg(index = 2)]
        second: String,
    },
    #[command(name = "merge-files", about = "Merge two files line by line")]
    MergeFiles {
        #[arg(index = 1)]
        first: String,
        #[arg(index = 2)]
        second: String,
        #[arg(index = 3, help = "The file to write the merge to")]
        output: String,
        #[arg(short, long, help = "Resolve each conflict on the terminal")]
        interactive: bool,
    },
    #[command(name = "hash-object", about = "Print the content hash of a file")]
    HashObject {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "verify",
        about = "Check the commit log and the version files it references"
    )]
    Verify,
}

fn main() -> ExitCode {
    let settings = Settings::from_env();
    init_tracing(&settings);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    match run(cli.command, &settings) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(settings: &Settings) {
    let filter =
        EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, settings: &Settings) -> Result<ExitCode> {
    let pwd = std::env::current_dir()?;

    match command {
        Commands::Init { project } => {
            Repository::init(&pwd, project.as_deref(), settings, stdout())?;
        }
        Commands::Add { paths } => return Ok(finish(&open(&pwd, settings)?.add(&paths)?)),
        Commands::Reset { paths } => return Ok(finish(&open(&pwd, settings)?.reset(&paths)?)),
        Commands::Commit { message, files } => {
            return Ok(finish(&open(&pwd, settings)?.commit(&message, &files)?));
        }
        Commands::Status => open(&pwd, settings)?.status()?,
        Commands::History => history(&pwd, settings)?,
        Commands::Retrieve { message } => {
            return Ok(finish(&open(&pwd, settings)?.retrieve(&message)?));
        }
        Commands::Rollback { target, commit_id } => {
            open(&pwd, settings)?.rollback(&target, commit_id.as_deref())?
        }
        Commands::Conflicts { file } => open(&pwd, settings)?.conflicts(file.as_deref())?,
        Commands::Resolve { file, resolution } => {
            open(&pwd, settings)?.resolve(&file, &resolution)?
        }
        Commands::Branch { name } => open(&pwd, settings)?.branch(name.as_deref())?,
        Commands::Switch { name } => open(&pwd, settings)?.switch(&name)?,
        Commands::Merge { first, second } => {
            open(&pwd, settings)?.merge_branches(&first, &second)?
        }
        Commands::MergeFiles {
            first,
            second,
            output,
            interactive,
        } => {
            merge_files(
                &pwd,
                &first,
                &second,
                &output,
                interactive,
                &mut std::io::stdout(),
            )?;
        }
        Commands::HashObject { file } => {
            hash_object(&pwd, &file, &mut std::io::stdout())?;
        }
        Commands::Verify => return Ok(finish(&open(&pwd, settings)?.verify()?)),
    }

    Ok(ExitCode::SUCCESS)
}

fn stdout() -> Box<dyn Write> {
    Box::new(std::io::stdout())
}

fn open(pwd: &Path, settings: &Settings) -> Result<Repository> {
    Repository::open(pwd, settings.clock()?, stdout())
}

/// Page `history` when a person is reading it
fn history(pwd: &Path, settings: &Settings) -> Result<()> {
    if settings.no_pager || !std::io::stdout().is_terminal() {
        return open(pwd, settings)?.history();
    }

    let pager = Pager::new();
    let repository = Repository::open(
        pwd,
        settings.clock()?,
        Box::new(PagerWriter::new(pager.clone())),
    )?;
    repository.history()?;
    drop(repository);

    minus::page_all(pager)?;
    Ok(())
}

/// Report skipped items on stderr; any skip fails the run
fn finish(report: &BatchReport) -> ExitCode {
    for (item, reason) in report.skipped() {
        eprintln!("error: {}: {}", item, reason);
    }

    if report.has_failures() {
        eprintln!("{}", report);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
