//! URL templates for every view the tool can open.
//!
//! Everything here is pure string formatting. Values are substituted verbatim;
//! only the WIQL query of [`issues_url`] is percent-encoded.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::context::Context;

/// `{org}/{project}/_boards/board/t/{team}`
pub fn board_url(ctx: &Context) -> String {
    format!("{}/_boards/board/t/{}", ctx.project_url(), ctx.team)
}

/// `{org}/{project}/_sprints/taskboard/{team}/{iteration_short}`
pub fn sprint_url(ctx: &Context) -> String {
    format!(
        "{}/_sprints/taskboard/{}/{}",
        ctx.project_url(),
        ctx.team,
        ctx.iteration_short()
    )
}

/// `{org}/{project}/_git/{repo_name}`
pub fn repo_url(ctx: &Context, repo_name: &str) -> String {
    format!("{}/_git/{}", ctx.project_url(), repo_name)
}

/// Active pull requests of a repository
pub fn prs_url(ctx: &Context, repo_name: &str) -> String {
    format!("{}/pullrequests?_a=active", repo_url(ctx, repo_name))
}

/// Runs of a pipeline definition
pub fn pipeline_url(ctx: &Context, pipeline_id: &str) -> String {
    format!("{}/_build?definitionId={}", ctx.project_url(), pipeline_id)
}

pub fn issue_url(ctx: &Context, issue_id: &str) -> String {
    format!("{}/_workitems/edit/{}", ctx.project_url(), issue_id)
}

/// Query view listing the active and new work items of the area and iteration
pub fn issues_url(ctx: &Context) -> String {
    let query = active_items_query(&ctx.area, &ctx.iteration);
    format!(
        "{}/_workitems/?_a=query&wiql={}",
        ctx.project_url(),
        encode_query(&query)
    )
}

pub fn pr_url(ctx: &Context, repo_name: &str, pullrequest_id: &str) -> String {
    format!("{}/pullrequest/{}", repo_url(ctx, repo_name), pullrequest_id)
}

/// Repository view at a branch. `GB` marks a branch in the version selector.
pub fn branch_url(ctx: &Context, repo_name: &str, branch_name: &str) -> String {
    format!("{}?version=GB{}", repo_url(ctx, repo_name), branch_name)
}

/// WIQL selecting Active or New work items in `area` and under `iteration`.
///
/// The paths are inserted as given, backslashes included. The text opens with
/// a newline, and every clause is on its own four-space-indented line.
pub fn active_items_query(area: &str, iteration: &str) -> String {
    const INDENT: &str = "    ";
    let clauses = [
        "SELECT [System.Id],[System.AssignedTo],[System.WorkItemType],[System.Title],[System.Parent],[System.CreatedDate]".to_string(),
        "FROM WorkItems".to_string(),
        format!("WHERE [System.AreaPath]='{}'", area),
        "AND ([System.State] = 'Active' OR [System.State] = 'New')".to_string(),
        format!("AND [System.IterationPath] UNDER '{}'", iteration),
    ];

    let mut query = String::from("\n");
    for clause in &clauses {
        query.push_str(INDENT);
        query.push_str(clause);
        query.push('\n');
    }
    query.push_str(INDENT);
    query
}

/// Characters left as-is in a query value: ASCII alphanumerics and `_.-~/`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode text for use in a URL query value.
///
/// Every byte of the UTF-8 encoding outside [`QUERY_VALUE`] becomes `%XX`.
pub fn encode_query(text: &str) -> String {
    utf8_percent_encode(text, QUERY_VALUE).to_string()
}
