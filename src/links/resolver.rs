use anyhow::{Context as _, Result};
use std::cell::OnceCell;

use super::urls;
use crate::browser::{LaunchFailed, Launcher};
use crate::context::Context;
use crate::git::RepoSource;
use crate::output::{self, Console};
use crate::pipelines::PipelineLister;

/// A view that can be opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Board,
    Sprint,
    Repo,
    Prs,
    Pipe,
    Issue { issue_id: String },
    Issues,
    Pr { pullrequest_id: String },
    Branch { branch_name: String },
}

impl Target {
    /// Whether building the link needs the current repository's name
    pub fn needs_repo(&self) -> bool {
        matches!(
            self,
            Target::Repo | Target::Prs | Target::Pipe | Target::Pr { .. } | Target::Branch { .. }
        )
    }
}

/// Outcome of resolving a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Open this URL
    Open(String),
    /// Nothing to open; an explanation was already printed
    Nothing,
}

/// External collaborators used while resolving links
pub struct Resolver<'a> {
    repos: &'a dyn RepoSource,
    pipelines: &'a dyn PipelineLister,
    repo_name: OnceCell<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(repos: &'a dyn RepoSource, pipelines: &'a dyn PipelineLister) -> Self {
        Self {
            repos,
            pipelines,
            repo_name: OnceCell::new(),
        }
    }

    /// Repository name, looked up on first use only
    fn repo_name(&self) -> Result<&str> {
        if let Some(name) = self.repo_name.get() {
            return Ok(name.as_str());
        }
        let name = self
            .repos
            .repo_name()
            .context("Failed to determine the current repository")?;
        Ok(self.repo_name.get_or_init(|| name).as_str())
    }

    /// Build the URL for `target`. Informational lines go to `console`.
    pub fn resolve(
        &self,
        ctx: &Context,
        target: &Target,
        console: &mut dyn Console,
    ) -> Result<Resolution> {
        let url = match target {
            Target::Board => {
                let colors = console.use_colors();
                console.print(output::BOARD_HEADING);
                console.print(&output::format_filter_hint(
                    "iteration",
                    ctx.iteration_short(),
                    colors,
                ));
                console.print(&output::format_filter_hint("area", ctx.area_short(), colors));
                urls::board_url(ctx)
            }
            Target::Sprint => urls::sprint_url(ctx),
            Target::Repo => urls::repo_url(ctx, self.repo_name()?),
            Target::Prs => urls::prs_url(ctx, self.repo_name()?),
            Target::Pipe => {
                let repo_name = self.repo_name()?;
                let pipelines = self
                    .pipelines
                    .list_pipelines(repo_name)
                    .with_context(|| format!("Failed to list pipelines for {}", repo_name))?;

                // First entry wins; the listing's order is kept as-is.
                match pipelines.first() {
                    Some(pipeline) => urls::pipeline_url(ctx, &pipeline.id.to_string()),
                    None => {
                        let colors = console.use_colors();
                        console.print(&output::format_no_pipelines(repo_name, colors));
                        return Ok(Resolution::Nothing);
                    }
                }
            }
            Target::Issue { issue_id } => urls::issue_url(ctx, issue_id),
            Target::Issues => urls::issues_url(ctx),
            Target::Pr { pullrequest_id } => urls::pr_url(ctx, self.repo_name()?, pullrequest_id),
            Target::Branch { branch_name } => {
                urls::branch_url(ctx, self.repo_name()?, branch_name)
            }
        };

        Ok(Resolution::Open(url))
    }
}

/// Resolve `target` and hand the URL to `launcher`.
///
/// Returns the URL that was opened, or `None` when there was nothing to open.
/// Errors from the launcher carry a [`LaunchFailed`] context.
pub fn open(
    resolver: &Resolver<'_>,
    ctx: &Context,
    target: &Target,
    launcher: &dyn Launcher,
    console: &mut dyn Console,
) -> Result<Option<String>> {
    match resolver.resolve(ctx, target, console)? {
        Resolution::Open(url) => {
            launcher
                .launch(&url)
                .with_context(|| LaunchFailed { url: url.clone() })?;
            let colors = console.use_colors();
            console.print(&launcher.report(&url, colors));
            Ok(Some(url))
        }
        Resolution::Nothing => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::PrintOnly;
    use crate::output::BufferConsole;
    use crate::pipelines::{PipelineId, PipelineRecord};
    use anyhow::anyhow;
    use std::cell::{Cell, RefCell};

    struct FakeRepo {
        name: &'static str,
        calls: Cell<usize>,
    }

    impl FakeRepo {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                calls: Cell::new(0),
            }
        }
    }

    impl RepoSource for FakeRepo {
        fn repo_name(&self) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.name.to_string())
        }
    }

    struct FailingRepo;

    impl RepoSource for FailingRepo {
        fn repo_name(&self) -> Result<String> {
            Err(anyhow!("not a git repository"))
        }
    }

    struct FakePipelines {
        records: Vec<PipelineRecord>,
        seen_repo: RefCell<Option<String>>,
    }

    impl FakePipelines {
        fn new(records: Vec<PipelineRecord>) -> Self {
            Self {
                records,
                seen_repo: RefCell::new(None),
            }
        }
    }

    impl PipelineLister for FakePipelines {
        fn list_pipelines(&self, repo_name: &str) -> Result<Vec<PipelineRecord>> {
            *self.seen_repo.borrow_mut() = Some(repo_name.to_string());
            Ok(self.records.clone())
        }
    }

    #[derive(Default)]
    struct RecordingLauncher {
        launched: RefCell<Vec<String>>,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&self, url: &str) -> Result<()> {
            self.launched.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct BrokenLauncher;

    impl Launcher for BrokenLauncher {
        fn launch(&self, _url: &str) -> Result<()> {
            Err(anyhow!("no browser"))
        }
    }

    fn sample_context() -> Context {
        Context::new(
            "Team A",
            "Proj\\TeamA",
            "Proj\\Sprint 1",
            "https://dev.azure.com/contoso",
            "Proj",
        )
    }

    fn resolve_url(target: Target) -> String {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![PipelineRecord::new(5u64)]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();
        match resolver.resolve(&sample_context(), &target, &mut console).unwrap() {
            Resolution::Open(url) => url,
            Resolution::Nothing => panic!("expected a URL for {:?}", target),
        }
    }

    #[test]
    fn test_resolve_every_target() {
        let base = "https://dev.azure.com/contoso/Proj";
        let cases = vec![
            (Target::Board, format!("{}/_boards/board/t/Team A", base)),
            (Target::Sprint, format!("{}/_sprints/taskboard/Team A/Sprint 1", base)),
            (Target::Repo, format!("{}/_git/api", base)),
            (Target::Prs, format!("{}/_git/api/pullrequests?_a=active", base)),
            (Target::Pipe, format!("{}/_build?definitionId=5", base)),
            (
                Target::Issue { issue_id: "88".to_string() },
                format!("{}/_workitems/edit/88", base),
            ),
            (
                Target::Pr { pullrequest_id: "12".to_string() },
                format!("{}/_git/api/pullrequest/12", base),
            ),
            (
                Target::Branch { branch_name: "main".to_string() },
                format!("{}/_git/api?version=GBmain", base),
            ),
        ];
        for (target, expected) in cases {
            assert_eq!(resolve_url(target), expected);
        }

        let issues = resolve_url(Target::Issues);
        assert!(issues.starts_with(&format!("{}/_workitems/?_a=query&wiql=%0A%20%20%20%20SELECT%20", base)));
    }

    #[test]
    fn test_board_prints_filter_hints() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();

        resolver
            .resolve(&sample_context(), &Target::Board, &mut console)
            .unwrap();

        assert_eq!(
            console.lines,
            vec![
                output::BOARD_HEADING.to_string(),
                "\titeration = 'Sprint 1'".to_string(),
                "\tarea = 'TeamA'".to_string(),
            ]
        );
    }

    #[test]
    fn test_pipe_uses_first_pipeline() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![PipelineRecord::new(42u64), PipelineRecord::new(7u64)]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();

        let resolution = resolver
            .resolve(&sample_context(), &Target::Pipe, &mut console)
            .unwrap();

        match resolution {
            Resolution::Open(url) => assert!(url.ends_with("definitionId=42")),
            Resolution::Nothing => panic!("expected a pipeline URL"),
        }
        assert_eq!(pipes.seen_repo.borrow().as_deref(), Some("api"));
    }

    #[test]
    fn test_pipe_with_string_id() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![PipelineRecord::new(PipelineId::Text("9".to_string()))]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();

        let resolution = resolver
            .resolve(&sample_context(), &Target::Pipe, &mut console)
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::Open("https://dev.azure.com/contoso/Proj/_build?definitionId=9".to_string())
        );
    }

    #[test]
    fn test_pipe_without_pipelines_opens_nothing() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&repo, &pipes);
        let launcher = RecordingLauncher::default();
        let mut console = BufferConsole::new();

        let opened = open(&resolver, &sample_context(), &Target::Pipe, &launcher, &mut console)
            .unwrap();

        assert_eq!(opened, None);
        assert!(launcher.launched.borrow().is_empty());
        assert_eq!(console.lines, vec!["api has no pipelines defined currently"]);
    }

    #[test]
    fn test_targets_without_repo_never_call_git() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();
        let ctx = sample_context();

        for target in [
            Target::Board,
            Target::Sprint,
            Target::Issues,
            Target::Issue { issue_id: "1".to_string() },
        ] {
            assert!(!target.needs_repo());
            resolver.resolve(&ctx, &target, &mut console).unwrap();
        }
        assert_eq!(repo.calls.get(), 0);
    }

    #[test]
    fn test_repo_name_looked_up_once() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();
        let ctx = sample_context();

        resolver.resolve(&ctx, &Target::Repo, &mut console).unwrap();
        resolver.resolve(&ctx, &Target::Prs, &mut console).unwrap();
        // Empty pipeline list also reads the name for its message
        resolver.resolve(&ctx, &Target::Pipe, &mut console).unwrap();

        assert_eq!(repo.calls.get(), 1);
    }

    #[test]
    fn test_repo_failure_propagates() {
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&FailingRepo, &pipes);
        let mut console = BufferConsole::new();

        let err = resolver
            .resolve(&sample_context(), &Target::Repo, &mut console)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("not a git repository"));
    }

    #[test]
    fn test_open_launches_and_reports() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&repo, &pipes);
        let launcher = RecordingLauncher::default();
        let mut console = BufferConsole::new();

        let opened = open(
            &resolver,
            &sample_context(),
            &Target::Branch { branch_name: "feature/x".to_string() },
            &launcher,
            &mut console,
        )
        .unwrap();

        let expected = "https://dev.azure.com/contoso/Proj/_git/api?version=GBfeature/x";
        assert_eq!(opened.as_deref(), Some(expected));
        assert_eq!(*launcher.launched.borrow(), vec![expected.to_string()]);
        assert_eq!(console.lines, vec![format!("Opening {}", expected)]);
    }

    #[test]
    fn test_open_browser_failure_is_error() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();

        let result = open(
            &resolver,
            &sample_context(),
            &Target::Sprint,
            &BrokenLauncher,
            &mut console,
        );
        let err = result.unwrap_err();
        assert!(crate::browser::is_launch_failure(&err));
        assert!(format!("{:#}", err).contains("no browser"));
        assert!(console.lines.is_empty());
    }

    #[test]
    fn test_open_git_failure_is_not_a_launch_failure() {
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&FailingRepo, &pipes);
        let launcher = RecordingLauncher::default();
        let mut console = BufferConsole::new();

        let err = open(&resolver, &sample_context(), &Target::Repo, &launcher, &mut console)
            .unwrap_err();

        assert!(!crate::browser::is_launch_failure(&err));
        assert!(launcher.launched.borrow().is_empty());
    }

    #[test]
    fn test_open_with_print_only_prints_bare_url() {
        let repo = FakeRepo::new("api");
        let pipes = FakePipelines::new(vec![]);
        let resolver = Resolver::new(&repo, &pipes);
        let mut console = BufferConsole::new();

        let opened = open(
            &resolver,
            &sample_context(),
            &Target::Pr { pullrequest_id: "12".to_string() },
            &PrintOnly,
            &mut console,
        )
        .unwrap();

        let expected = "https://dev.azure.com/contoso/Proj/_git/api/pullrequest/12";
        assert_eq!(opened.as_deref(), Some(expected));
        assert_eq!(console.lines, vec![expected]);
    }
}
