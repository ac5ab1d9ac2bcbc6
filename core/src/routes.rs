//! Client-side route table.
//!
//! # Design
//! The table is a static list of `RouteEntry` values: a path pattern, what to
//! do when it matches (render a page or redirect), and an optional function
//! deriving the page's props from the captured path parameters. Patterns use
//! `{name}` for a dynamic segment and `*` for the catch-all entry, which is
//! only consulted after every other entry failed to match.

use serde::Serialize;

use crate::error::RouteError;

const MAX_REDIRECTS: usize = 8;

/// Pages the application can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Login,
    EmployeeList,
    EmployeeDetail,
}

/// Props handed to a page.
///
/// Serializes untagged: `Employee` as `{"employeeId": n}`, `Fallback` as the
/// bare number. `Fallback` is produced when the employee id in the path is
/// not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RouteProps {
    Employee {
        #[serde(rename = "employeeId")]
        employee_id: i64,
    },
    Fallback(i64),
}

impl RouteProps {
    /// The employee id either way, `0` for the fallback.
    pub fn employee_id(&self) -> i64 {
        match *self {
            RouteProps::Employee { employee_id } => employee_id,
            RouteProps::Fallback(id) => id,
        }
    }
}

/// Parameters captured from `{name}` segments, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(&'static str, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub type PropsFn = fn(&PathParams) -> RouteProps;

#[derive(Debug, Clone, Copy)]
pub enum RouteAction {
    Render { page: Page, props: Option<PropsFn> },
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub action: RouteAction,
}

impl RouteEntry {
    pub const fn page(pattern: &'static str, page: Page) -> Self {
        Self {
            pattern,
            action: RouteAction::Render { page, props: None },
        }
    }

    pub const fn page_with_props(pattern: &'static str, page: Page, props: PropsFn) -> Self {
        Self {
            pattern,
            action: RouteAction::Render {
                page,
                props: Some(props),
            },
        }
    }

    pub const fn redirect(pattern: &'static str, to: &'static str) -> Self {
        Self {
            pattern,
            action: RouteAction::Redirect(to),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.pattern == "*"
    }

    fn capture(&self, path: &str) -> Option<PathParams> {
        if self.is_wildcard() {
            return Some(PathParams::default());
        }
        let mut pattern = segments(self.pattern);
        let mut actual = segments(path);
        let mut params = Vec::new();
        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return Some(PathParams(params)),
                (Some(expected), Some(segment)) => {
                    match expected.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                        Some(name) => params.push((name, segment.to_string())),
                        None if expected == segment => {}
                        None => return None,
                    }
                }
                _ => return None,
            }
        }
    }
}

/// The result of matching one path against the table, before redirects.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: PathParams,
}

/// Where a navigation ends up after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: String,
    pub page: Page,
    pub props: Option<RouteProps>,
    /// The navigated path when it was redirected elsewhere.
    pub redirected_from: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Routes of the employee application.
    pub fn employee_app() -> Self {
        Self::new(vec![
            RouteEntry::page("/login", Page::Login),
            RouteEntry::page("/employeeList", Page::EmployeeList),
            RouteEntry::page_with_props(
                "/employeeDetail/{employeeId}",
                Page::EmployeeDetail,
                employee_detail_props,
            ),
            RouteEntry::redirect("*", "/login"),
        ])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// First non-wildcard entry matching `path`, else the wildcard entry.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = strip_query(path);
        let (wildcards, specific): (Vec<&RouteEntry>, Vec<&RouteEntry>) =
            self.entries.iter().partition(|entry| entry.is_wildcard());
        specific
            .into_iter()
            .chain(wildcards)
            .find_map(|entry| entry.capture(path).map(|params| RouteMatch { entry, params }))
    }

    /// Follow redirects from `path` to the page that gets rendered.
    pub fn resolve(&self, path: &str) -> Result<Resolved, RouteError> {
        let mut current = path.to_string();
        for _ in 0..=MAX_REDIRECTS {
            let matched = self
                .match_path(&current)
                .ok_or_else(|| RouteError::NoMatch(current.clone()))?;
            match matched.entry.action {
                RouteAction::Render { page, props } => {
                    let redirected_from = (current != path).then(|| path.to_string());
                    return Ok(Resolved {
                        path: current,
                        page,
                        props: props.map(|extract| extract(&matched.params)),
                        redirected_from,
                    });
                }
                RouteAction::Redirect(to) => {
                    tracing::debug!(from = %current, to, "route redirect");
                    current = to.to_string();
                }
            }
        }
        Err(RouteError::RedirectLoop(path.to_string()))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::employee_app()
    }
}

/// `{employeeId: n}` when the segment is an integer, otherwise the bare `0`.
///
/// The whole segment must parse: `42abc` falls back to `0` rather than
/// reading the leading digits.
pub fn employee_detail_props(params: &PathParams) -> RouteProps {
    match params.get("employeeId").map(str::parse::<i64>) {
        Some(Ok(employee_id)) => RouteProps::Employee { employee_id },
        _ => RouteProps::Fallback(0),
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}
