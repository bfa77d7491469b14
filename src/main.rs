use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ado_open::browser::{self, Launcher, PrintOnly, SystemBrowser};
use ado_open::config::{self, Overrides};
use ado_open::git::GitRemote;
use ado_open::links::{self, Resolver, Target};
use ado_open::output::{self, StdoutConsole};
use ado_open::pipelines::AzCli;

const EXIT_SUCCESS: i32 = 0;
const EXIT_BROWSER: i32 = 1;
const EXIT_TOOL: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open board view
    Board,
    /// Open current sprint view
    Sprint,
    /// Open repository view
    Repo,
    /// Open active PRs for repository view
    Prs,
    /// Open latest pipeline runs for repository view
    Pipe,
    /// Open a specific work item
    Issue {
        /// ID number of a work item
        issue_id: String,
    },
    /// Open all active issues view
    Issues,
    /// Open a specific pull request
    Pr {
        /// ID number of a pull request
        pullrequest_id: String,
    },
    /// Open a specific branch of the repository
    Branch {
        /// Name of the branch, e.g. feature/login
        branch_name: String,
    },
}

impl From<Commands> for Target {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Board => Target::Board,
            Commands::Sprint => Target::Sprint,
            Commands::Repo => Target::Repo,
            Commands::Prs => Target::Prs,
            Commands::Pipe => Target::Pipe,
            Commands::Issue { issue_id } => Target::Issue { issue_id },
            Commands::Issues => Target::Issues,
            Commands::Pr { pullrequest_id } => Target::Pr { pullrequest_id },
            Commands::Branch { branch_name } => Target::Branch { branch_name },
        }
    }
}

/// Context values, each falling back to the environment and then the config file
#[derive(Args, Debug)]
struct ContextArgs {
    /// Team name
    #[arg(long, global = true, env = "ADO_OPEN_TEAM")]
    team: Option<String>,

    /// Area path, e.g. 'Project\Team'
    #[arg(long, global = true, env = "ADO_OPEN_AREA")]
    area: Option<String>,

    /// Iteration path, e.g. 'Project\Sprint 12'
    #[arg(long, global = true, env = "ADO_OPEN_ITERATION")]
    iteration: Option<String>,

    /// Organization URL, e.g. https://dev.azure.com/contoso
    #[arg(long, global = true, env = "ADO_OPEN_ORGANIZATION")]
    organization: Option<String>,

    /// Project name
    #[arg(long, global = true, env = "ADO_OPEN_PROJECT")]
    project: Option<String>,
}

impl From<ContextArgs> for Overrides {
    fn from(args: ContextArgs) -> Self {
        Overrides {
            team: args.team,
            area: args.area,
            iteration: args.iteration,
            organization: args.organization,
            project: args.project,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ado-open")]
#[command(about = "Quickly open Azure DevOps links", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to the nearest .ado-open.yaml, then ~/.config/ado-open/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Print the URL instead of opening the browser
    #[arg(long, global = true)]
    print: bool,

    #[command(flatten)]
    context: ContextArgs,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Config error: cannot read current directory: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let loaded = match config::load_config(config_path, &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if verbose {
        match &loaded.source {
            Some(path) => eprintln!("Loaded config from {}", path.display()),
            None => eprintln!("No config file found, using flags and environment only"),
        }
    }

    let ctx = match config::resolve_context(&loaded.config, &cli.context.into()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if verbose {
        eprintln!("Context:");
        eprintln!("  organization: {}", ctx.organization);
        eprintln!("  project: {}", ctx.project);
        eprintln!("  team: {}", ctx.team);
        eprintln!("  area: {}", ctx.area);
        eprintln!("  iteration: {}", ctx.iteration);
    }

    let use_colors = !cli.no_color && output::should_use_colors();
    let mut console = StdoutConsole::new(use_colors);

    let repos = GitRemote::default();
    let pipelines = AzCli::new(verbose);
    let resolver = Resolver::new(&repos, &pipelines);
    let target = Target::from(cli.command);

    if verbose && target.needs_repo() {
        eprintln!("Resolving repository name from git remote");
    }

    let launcher: &dyn Launcher = if cli.print { &PrintOnly } else { &SystemBrowser };

    match links::open(&resolver, &ctx, &target, launcher, &mut console) {
        Ok(Some(url)) => {
            if verbose {
                eprintln!("Handed {} to the launcher", url);
            }
        }
        Ok(None) => {
            if verbose {
                eprintln!("Nothing to open");
            }
        }
        Err(e) if browser::is_launch_failure(&e) => {
            eprintln!("Browser error: {:#}", e);
            std::process::exit(EXIT_BROWSER);
        }
        Err(e) => {
            eprintln!("Tool error: {:#}", e);
            std::process::exit(EXIT_TOOL);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
