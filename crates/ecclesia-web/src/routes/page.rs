//! Shared page plumbing: the frame around every page, select options and
//! template rendering.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use ecclesia_core::badge::Categorical;
use ecclesia_core::member::model::Member;
use ecclesia_core::session::{SessionProvider, User};

/// What every page shows around its content.
pub struct Frame {
    /// Navigation entry to highlight; also the table the page reloads on.
    pub nav: &'static str,
    pub user_email: String,
    pub user_initial: String,
    pub alert: Option<String>,
}

impl Frame {
    pub fn new(nav: &'static str, user: &User) -> Self {
        Self {
            nav,
            user_email: user.email.clone(),
            user_initial: user.initial(),
            alert: None,
        }
    }

    pub fn with_alert(mut self, alert: Option<String>) -> Self {
        self.alert = alert;
        self
    }
}

/// One `<option>` of a `<select>`.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Category filter options, "All" first.
pub fn filter_options<C: Categorical>(selected: Option<C>) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("all", "All", selected.is_none()))
        .chain(
            C::ALL
                .iter()
                .map(|c| SelectOption::new(c.as_str(), c.label(), selected == Some(*c))),
        )
        .collect()
}

/// Options for a status/kind field of a form.
pub fn choice_options<C: Categorical>(selected: C) -> Vec<SelectOption> {
    C::ALL
        .iter()
        .map(|c| SelectOption::new(c.as_str(), c.label(), *c == selected))
        .collect()
}

/// Member selector with a leading empty choice labelled `empty`.
///
/// A `selected` id missing from `members` still gets a selected option, so
/// submitting the form unchanged never clears the reference.
pub fn member_options(members: &[&Member], selected: &str, empty: &str) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> =
        std::iter::once(SelectOption::new("", empty, selected.is_empty()))
            .chain(
                members
                    .iter()
                    .map(|m| SelectOption::new(m.id.as_str(), m.name.as_str(), m.id == selected)),
            )
            .collect();

    if !selected.is_empty() && !members.iter().any(|m| m.id == selected) {
        options.push(SelectOption::new(selected, "Unknown", true));
    }
    options
}

/// Text for an optional field in a table cell.
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[derive(Template)]
#[template(path = "signin.html")]
struct SignInTemplate {
    loading: bool,
}

/// Page shown when nobody is signed in (or the session is still loading).
pub fn sign_in_required(loading: bool) -> Response {
    let status = if loading {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, render(&SignInTemplate { loading })).into_response()
}

/// The signed-in user, or the response to send instead.
#[allow(clippy::result_large_err)]
pub fn require_user(session: &dyn SessionProvider) -> Result<User, Response> {
    if session.is_loading() {
        return Err(sign_in_required(true));
    }
    session.current_user().ok_or_else(|| sign_in_required(false))
}

/// Render a template, turning template errors into a 500.
pub fn render<T: Template>(template: &T) -> Response {
    render_html(template.render())
}

/// Wrap rendered HTML, turning template errors into a 500.
pub fn render_html(rendered: askama::Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "template error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Template error: {}", e)),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecclesia_core::event::model::EventStatus;

    #[test]
    fn filter_options_start_with_all() {
        let options = filter_options::<EventStatus>(Some(EventStatus::Cancelled));
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].value, "all");
        assert!(!options[0].selected);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "Cancelled");
    }

    #[test]
    fn member_options_empty_choice() {
        let options = member_options(&[], "", "Anonymous");
        assert_eq!(options.len(), 1);
        assert!(options[0].selected);
        assert_eq!(options[0].label, "Anonymous");
    }

    #[test]
    fn member_options_keep_unlisted_selection() {
        let options = member_options(&[], "m-7", "No leader");
        assert_eq!(options.len(), 2);
        assert!(!options[0].selected);
        assert_eq!(options[1].value, "m-7");
        assert!(options[1].selected);
    }
}
