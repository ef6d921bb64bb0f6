//! Flat list collections: projects and blogs.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{ListCollection, Rows};
use crate::media::Media;
use crate::slug::slugify;

/// Whether a project is showcased or listed among smaller work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Major,
    #[default]
    Minor,
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub project_type: ProjectType,
    pub project_name: String,
    pub project_image: Media,
    pub summary: String,
    #[serde(default)]
    pub project_links: Rows<ProjectLink>,
    #[serde(default)]
    pub features: Rows<Feature>,
    #[serde(default)]
    pub tech_stack: Rows<ProjectTechnology>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Project {
    /// Returns the slug, deriving it from the project name when unset.
    pub fn slug(&self) -> String {
        self.slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| slugify(&self.project_name))
    }

    /// Returns true for showcased projects.
    #[must_use]
    pub fn is_major(&self) -> bool {
        self.project_type == ProjectType::Major
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLink {
    pub service_name: String,
    pub service_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub feature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTechnology {
    pub technology: String,
    #[serde(default)]
    pub technology_icon: Option<Media>,
}

/// Platform a blog post is published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlogPlatform {
    #[default]
    Medium,
    Devto,
    Hashnode,
    Other,
}

/// An externally hosted blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub platform: BlogPlatform,
    pub featured_image: Media,
    pub summary: String,
    pub external_link: String,
    pub published_date: Timestamp,
    #[serde(default)]
    pub tags: Rows<Tag>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Blog {
    /// Returns the slug, deriving it from the title when unset.
    pub fn slug(&self) -> String {
        self.slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| slugify(&self.title))
    }

    /// Returns the tag names, in order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.tag.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag: String,
}

/// An entry of a flat list collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Project(Box<Project>),
    Blog(Box<Blog>),
}

impl ListEntry {
    /// Returns the collection this entry belongs to.
    pub fn collection(&self) -> ListCollection {
        match self {
            Self::Project(_) => ListCollection::Projects,
            Self::Blog(_) => ListCollection::Blogs,
        }
    }

    /// Returns the display title of the entry.
    pub fn title(&self) -> &str {
        match self {
            Self::Project(project) => &project.project_name,
            Self::Blog(blog) => &blog.title,
        }
    }

    /// Returns the slug of the entry.
    pub fn slug(&self) -> String {
        match self {
            Self::Project(project) => project.slug(),
            Self::Blog(blog) => blog.slug(),
        }
    }
}
