use anyhow::Result;
use clap::{Parser, Subcommand};
use nit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "nit",
    version = "0.1.0",
    about = "A minimal distributed version control system",
    long_about = "nit is a minimal version control system with content-addressed \
    storage, branches and three-way merging. It is not meant to replace git, \
    but to keep its core mechanics small enough to read in one sitting.",
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
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stores the given files as blobs and records them in the index."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the index as a tree and records a commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create a branch, or list branches",
        long_about = "With a name, this command creates a branch at the given revision (HEAD by default). \
        Without one, it lists all branches, marking the current branch with an asterisk."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
        #[arg(index = 2, help = "The revision the new branch should point at")]
        source: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or detach HEAD at a commit",
        long_about = "This command rewrites the worktree and index to match the target revision. \
        Checking out a branch makes it current; checking out a commit detaches HEAD."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch or revision to check out")]
        target: String,
    },
    #[command(
        name = "merge",
        about = "Merge another line of development into the current branch",
        long_about = "This command merges the target revision into the current branch, \
        fast-forwarding when possible and otherwise creating a merge commit. \
        Conflicting changes are marked in the affected files."
    )]
    Merge {
        #[arg(index = 1, help = "The branch or revision to merge")]
        target: String,
        #[arg(short, long, help = "The merge commit message")]
        message: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of the object the given revision resolves to."
    )]
    CatFile {
        #[arg(index = 1, help = "The revision or object ID to print")]
        revision: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path.as_ref(), Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd, Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::Add { paths } => {
            discover_repository()?.add(paths)?;
        }
        Commands::Commit { message } => {
            discover_repository()?.commit(message.as_str())?;
        }
        Commands::Branch { name, source } => {
            discover_repository()?.branch(name.as_deref(), source.as_deref())?;
        }
        Commands::Checkout { target } => {
            discover_repository()?.checkout(target)?;
        }
        Commands::Merge { target, message } => {
            discover_repository()?.merge(target, message.as_deref())?;
        }
        Commands::CatFile { revision } => {
            discover_repository()?.cat_file(revision)?;
        }
    }

    Ok(())
}

fn discover_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd, Box::new(std::io::stdout()))
}
