//! Page views and their lifecycle.
//!
//! A page view is mounted with a [`ViewScope`], fetches its model through a
//! [`ContentService`](crate::resolve::ContentService) and ends in a
//! [`ViewState`]. Session-wide state lives in an explicit [`ViewContext`].

mod context;
mod format;
mod models;
mod scope;
mod state;

pub use self::context::{Theme, ViewContext};
pub use self::format::{format_date, format_month_year, format_tenure, initials, truncate_text};
pub use self::models::{
    ABOUT_SLUG, AboutView, BlogsView, CONTACT_SLUG, ContactView, EXPERIENCES_SLUG,
    ExperienceEntry, ExperiencesView, HomeView, PROJECTS_PAGE_SIZE, PageView, ProjectDetailsView,
    ProjectsView, STACKS_SLUG, StacksView, Window,
};
pub use self::scope::ViewScope;
pub use self::state::ViewState;
