//! Page view models.
//!
//! Each view consumes one block shape (or one flat collection) and derives
//! the display values its page renders.

use crate::content::{
    AboutBlock, Blog, ContactBlock, Experience, ExperiencesBlock, HomeBlock, Page, Project,
    StacksBlock,
};
use crate::navigation::Navigation;
use crate::resolve::ContentService;
use crate::richtext::extract_plain_text;
use crate::view::format::format_tenure;
use crate::{Error, Result};

/// Slug of the about page.
pub const ABOUT_SLUG: &str = "about";
/// Slug of the experiences page.
pub const EXPERIENCES_SLUG: &str = "experiences";
/// Slug of the contact page.
pub const CONTACT_SLUG: &str = "contact";
/// Slug of the tech stacks page.
pub const STACKS_SLUG: &str = "stacks";

/// Number of projects revealed per "load more" step.
pub const PROJECTS_PAGE_SIZE: usize = 4;

/// A view model that can be fetched through a [`ContentService`].
#[async_trait::async_trait]
pub trait PageView: Sized + Send {
    /// View name used in logs and error messages.
    const NAME: &'static str;

    /// Fetches everything the view renders.
    async fn fetch(service: &ContentService) -> Result<Self>;
}

/// Landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub hero: HomeBlock,
    /// Greeting line, e.g. `Hi, I'm Ada`.
    pub greeting: String,
    /// Plain text of the whole description.
    pub description: String,
    pub navigation: Navigation,
}

impl HomeView {
    pub fn new(page: &Page, navigation: Navigation) -> Result<Self> {
        let hero = page.require_block::<HomeBlock>()?.clone();
        let greeting = match hero.greet_text.as_deref().map(str::trim) {
            Some(greet) if !greet.is_empty() => format!("{greet} {}", hero.name),
            _ => hero.name.clone(),
        };
        let description = extract_plain_text(hero.description.as_ref());

        Ok(Self {
            hero,
            greeting,
            description,
            navigation,
        })
    }
}

#[async_trait::async_trait]
impl PageView for HomeView {
    const NAME: &'static str = "home";

    async fn fetch(service: &ContentService) -> Result<Self> {
        let (page, navigation) = tokio::try_join!(service.resolve_home(), service.navigation())?;
        Self::new(&page, navigation)
    }
}

/// About page.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutView {
    pub about: AboutBlock,
    /// Biography, one entry per paragraph.
    pub biography: Vec<String>,
}

impl AboutView {
    pub fn new(page: &Page) -> Result<Self> {
        let about = page.require_block::<AboutBlock>()?.clone();
        let biography = about
            .about_yourself
            .as_ref()
            .map(|text| text.paragraphs())
            .unwrap_or_default();

        Ok(Self { about, biography })
    }
}

#[async_trait::async_trait]
impl PageView for AboutView {
    const NAME: &'static str = "about";

    async fn fetch(service: &ContentService) -> Result<Self> {
        Self::new(&service.resolve_by_slug(ABOUT_SLUG).await?)
    }
}

/// One position on the experiences page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceEntry {
    pub experience: Experience,
    /// E.g. `February 2021 - Present`.
    pub tenure: String,
    /// Plain text of each work detail.
    pub details: Vec<String>,
}

impl From<&Experience> for ExperienceEntry {
    fn from(experience: &Experience) -> Self {
        Self {
            tenure: format_tenure(
                experience.start_date,
                experience.end_date,
                experience.is_current(),
            ),
            details: experience
                .work_details
                .iter()
                .map(|detail| extract_plain_text(detail.description.as_ref()))
                .filter(|detail| !detail.is_empty())
                .collect(),
            experience: experience.clone(),
        }
    }
}

/// Work history page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperiencesView {
    pub heading: String,
    pub subheading: Option<String>,
    pub entries: Vec<ExperienceEntry>,
}

impl ExperiencesView {
    pub fn new(page: &Page) -> Result<Self> {
        let block: &ExperiencesBlock = page.require_block()?;
        Ok(Self {
            heading: block.heading.clone(),
            subheading: block.subheading.clone(),
            entries: block.experiences.iter().map(ExperienceEntry::from).collect(),
        })
    }
}

#[async_trait::async_trait]
impl PageView for ExperiencesView {
    const NAME: &'static str = "experiences";

    async fn fetch(service: &ContentService) -> Result<Self> {
        Self::new(&service.resolve_by_slug(EXPERIENCES_SLUG).await?)
    }
}

/// Contact page.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactView {
    pub contact: ContactBlock,
    pub submit_label: String,
}

impl ContactView {
    pub fn new(page: &Page) -> Result<Self> {
        let contact = page.require_block::<ContactBlock>()?.clone();
        let submit_label = contact.submit_label().to_owned();
        Ok(Self {
            contact,
            submit_label,
        })
    }
}

#[async_trait::async_trait]
impl PageView for ContactView {
    const NAME: &'static str = "contact";

    async fn fetch(service: &ContentService) -> Result<Self> {
        Self::new(&service.resolve_by_slug(CONTACT_SLUG).await?)
    }
}

/// Tech stacks page.
#[derive(Debug, Clone, PartialEq)]
pub struct StacksView {
    pub stacks: StacksBlock,
}

impl StacksView {
    pub fn new(page: &Page) -> Result<Self> {
        Ok(Self {
            stacks: page.require_block::<StacksBlock>()?.clone(),
        })
    }

    /// Returns the total number of technologies across categories.
    pub fn technology_count(&self) -> usize {
        self.stacks
            .tech_stacks
            .iter()
            .map(|stack| stack.technologies.len())
            .sum()
    }
}

#[async_trait::async_trait]
impl PageView for StacksView {
    const NAME: &'static str = "stacks";

    async fn fetch(service: &ContentService) -> Result<Self> {
        Self::new(&service.resolve_by_slug(STACKS_SLUG).await?)
    }
}

/// Blog listing, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogsView {
    pub blogs: Vec<Blog>,
}

impl BlogsView {
    /// Returns the `count` newest posts.
    pub fn latest(&self, count: usize) -> &[Blog] {
        &self.blogs[..count.min(self.blogs.len())]
    }
}

#[async_trait::async_trait]
impl PageView for BlogsView {
    const NAME: &'static str = "blogs";

    async fn fetch(service: &ContentService) -> Result<Self> {
        Ok(Self {
            blogs: service.blogs().await?,
        })
    }
}

/// A list revealed a fixed number of items at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Window<T> {
    items: Vec<T>,
    visible: usize,
    step: usize,
}

impl<T> Window<T> {
    /// Creates a window showing the first `step` items.
    pub fn new(items: Vec<T>, step: usize) -> Self {
        let visible = step.min(items.len());
        Self {
            items,
            visible,
            step,
        }
    }

    /// Returns the items currently shown.
    pub fn visible(&self) -> &[T] {
        &self.items[..self.visible]
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible < self.items.len()
    }

    /// Reveals the next step of items.
    pub fn load_more(&mut self) {
        self.visible = (self.visible + self.step).min(self.items.len());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Project listing split into showcased and smaller work.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectsView {
    pub major: Window<Project>,
    pub minor: Window<Project>,
}

impl ProjectsView {
    pub fn new(projects: Vec<Project>) -> Self {
        let (major, minor): (Vec<_>, Vec<_>) = projects.into_iter().partition(Project::is_major);
        Self {
            major: Window::new(major, PROJECTS_PAGE_SIZE),
            minor: Window::new(minor, PROJECTS_PAGE_SIZE),
        }
    }
}

#[async_trait::async_trait]
impl PageView for ProjectsView {
    const NAME: &'static str = "projects";

    async fn fetch(service: &ContentService) -> Result<Self> {
        Ok(Self::new(service.projects().await?))
    }
}

/// Single project page with links to its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetailsView {
    pub project: Project,
    /// Previous project in listing order, wrapping around.
    pub previous: Option<Project>,
    /// Next project in listing order, wrapping around.
    pub next: Option<Project>,
    /// Every other project, in listing order.
    pub others: Vec<Project>,
}

impl ProjectDetailsView {
    /// Selects the project with `slug` (ignoring case) out of `projects`.
    pub fn new(slug: &str, projects: Vec<Project>) -> Result<Self> {
        let wanted = slug.trim().to_lowercase();
        let index = projects
            .iter()
            .position(|project| project.slug().to_lowercase() == wanted)
            .ok_or_else(|| {
                Error::not_found().with_message(format!("no project with slug `{slug}`"))
            })?;

        let count = projects.len();
        let neighbour = |offset: usize| {
            (count > 1).then(|| projects[(index + offset) % count].clone())
        };
        let previous = neighbour(count - 1);
        let next = neighbour(1);

        let mut others = projects;
        let project = others.remove(index);

        Ok(Self {
            project,
            previous,
            next,
            others,
        })
    }

    /// Fetches the project with `slug` and its neighbours.
    pub async fn fetch(service: &ContentService, slug: &str) -> Result<Self> {
        Self::new(slug, service.projects().await?)
    }
}
