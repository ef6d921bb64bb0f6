//! Typed layout blocks.
//!
//! A page layout is an ordered list of [`Block`]s. The `blockType`
//! discriminator selects which field structure the rest of the block has.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use super::Rows;
use crate::media::Media;
use crate::richtext::RichText;

/// Every block type known to the typed content model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    /// Landing hero with greeting, tagline and social links.
    HomeBlock,
    /// Technologies grouped by category.
    StacksBlock,
    /// Biography, detail lists and coding profiles.
    AboutBlock,
    /// Work history.
    ExperiencesBlock,
    /// Contact details and reasons.
    ContactBlock,
    /// Generic form definition.
    FormBlock,
    /// Disqus comment thread.
    DisqusCommentBlock,
    /// Titled listing of a flat collection.
    ListBlock,
    /// Untitled listing of a flat collection.
    DynamicContentBlock,
}

impl BlockType {
    /// Returns the `blockType` discriminator string.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A layout block with its common envelope fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Row token of the block within the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional editor-facing block name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_name: Option<String>,
    /// Type-specific fields.
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    /// Returns the block type, or `None` for unsupported blocks.
    pub fn block_type(&self) -> Option<BlockType> {
        self.content.block_type()
    }
}

impl From<BlockContent> for Block {
    fn from(content: BlockContent) -> Self {
        Self {
            id: None,
            block_name: None,
            content,
        }
    }
}

/// Type-specific block fields, tagged by `blockType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType", rename_all = "camelCase")]
pub enum BlockContent {
    /// `homeBlock`
    HomeBlock(HomeBlock),
    /// `stacksBlock`
    StacksBlock(StacksBlock),
    /// `aboutBlock`
    AboutBlock(AboutBlock),
    /// `experiencesBlock`
    ExperiencesBlock(ExperiencesBlock),
    /// `contactBlock`
    ContactBlock(ContactBlock),
    /// `formBlock`
    FormBlock(FormBlock),
    /// `disqusCommentBlock`
    DisqusCommentBlock(CommentsBlock),
    /// `listBlock`
    ListBlock(ListBlock),
    /// `dynamicContentBlock`
    DynamicContentBlock(DynamicContentBlock),
    /// A block type this model does not render.
    #[serde(other)]
    Unsupported,
}

impl BlockContent {
    /// Returns the block type, or `None` for unsupported blocks.
    pub fn block_type(&self) -> Option<BlockType> {
        let block_type = match self {
            Self::HomeBlock(_) => BlockType::HomeBlock,
            Self::StacksBlock(_) => BlockType::StacksBlock,
            Self::AboutBlock(_) => BlockType::AboutBlock,
            Self::ExperiencesBlock(_) => BlockType::ExperiencesBlock,
            Self::ContactBlock(_) => BlockType::ContactBlock,
            Self::FormBlock(_) => BlockType::FormBlock,
            Self::DisqusCommentBlock(_) => BlockType::DisqusCommentBlock,
            Self::ListBlock(_) => BlockType::ListBlock,
            Self::DynamicContentBlock(_) => BlockType::DynamicContentBlock,
            Self::Unsupported => return None,
        };
        Some(block_type)
    }
}

/// A typed block shape that can be selected out of a page layout.
pub trait BlockShape: Sized {
    /// Discriminator of this shape.
    const BLOCK_TYPE: BlockType;

    /// Borrows the shape out of block content of the matching type.
    fn from_content(content: &BlockContent) -> Option<&Self>;
}

macro_rules! impl_block_shape {
    ($($variant:ident => $shape:ty),* $(,)?) => {
        $(
            impl BlockShape for $shape {
                const BLOCK_TYPE: BlockType = BlockType::$variant;

                fn from_content(content: &BlockContent) -> Option<&Self> {
                    match content {
                        BlockContent::$variant(block) => Some(block),
                        _ => None,
                    }
                }
            }

            impl From<$shape> for BlockContent {
                fn from(block: $shape) -> Self {
                    Self::$variant(block)
                }
            }
        )*
    };
}

impl_block_shape! {
    HomeBlock => HomeBlock,
    StacksBlock => StacksBlock,
    AboutBlock => AboutBlock,
    ExperiencesBlock => ExperiencesBlock,
    ContactBlock => ContactBlock,
    FormBlock => FormBlock,
    DisqusCommentBlock => CommentsBlock,
    ListBlock => ListBlock,
    DynamicContentBlock => DynamicContentBlock,
}

/// Social platforms offered on the home block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Github,
    Linkedin,
    Twitter,
    Instagram,
    Facebook,
    Youtube,
}

/// A link to a social profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

/// Landing hero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeBlock {
    #[serde(default)]
    pub greet_text: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<RichText>,
    #[serde(default)]
    pub profile_image: Option<Media>,
    #[serde(default)]
    pub social_links: Rows<SocialLink>,
    /// Call-to-action label.
    #[serde(default)]
    pub button: Option<String>,
    #[serde(default)]
    pub button_path: Option<String>,
}

/// Technologies grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StacksBlock {
    pub heading: String,
    #[serde(default)]
    pub subheading: Option<String>,
    #[serde(default)]
    pub tech_stacks: Rows<TechStack>,
}

/// One technology category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechStack {
    pub category: String,
    #[serde(default)]
    pub technologies: Rows<Technology>,
}

/// A single technology with an optional icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    #[serde(default)]
    pub icon: Option<Media>,
}

/// Biography section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutBlock {
    pub heading: String,
    #[serde(default)]
    pub subheading: Option<String>,
    #[serde(default)]
    pub profile_image: Option<Media>,
    #[serde(default)]
    pub about_yourself: Option<RichText>,
    #[serde(default)]
    pub details: Rows<DetailSection>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_path: Option<String>,
    #[serde(default)]
    pub code_profiles: Option<CodeProfiles>,
}

/// A titled list of detail points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSection {
    pub details_title: String,
    #[serde(default)]
    pub detail_points: Rows<DetailPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPoint {
    pub detail_point: String,
}

/// Coding platform profiles group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeProfiles {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub profiles: Rows<CodeProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeProfile {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<Media>,
}

/// Work history section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperiencesBlock {
    pub heading: String,
    #[serde(default)]
    pub subheading: Option<String>,
    #[serde(default)]
    pub experiences: Rows<Experience>,
}

/// One position held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub company_link: Option<String>,
    #[serde(default)]
    pub company_logo: Option<Media>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub work_details: Rows<WorkDetail>,
    #[serde(default)]
    pub skills: Rows<Skill>,
    #[serde(default)]
    pub achievements_heading: Option<String>,
    #[serde(default)]
    pub achievements: Rows<Achievement>,
}

impl Experience {
    /// Returns true if this is the current position.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDetail {
    #[serde(default)]
    pub description: Option<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default)]
    pub description: Option<String>,
}

/// Default label of the contact form submit button.
pub const DEFAULT_CONTACT_SUBMIT: &str = "Send Message";

/// Default label of a generic form submit button.
pub const DEFAULT_FORM_SUBMIT: &str = "Submit";

/// Contact section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBlock {
    pub heading: String,
    #[serde(default)]
    pub subheading: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_reasons: Rows<ContactReason>,
    #[serde(default)]
    pub submit_button_text: Option<String>,
}

impl ContactBlock {
    /// Submit button label, falling back to the schema default.
    pub fn submit_label(&self) -> &str {
        self.submit_button_text
            .as_deref()
            .unwrap_or(DEFAULT_CONTACT_SUBMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReason {
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input types a form field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    Text,
    Email,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

/// Generic form definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBlock {
    pub heading: String,
    #[serde(default)]
    pub form_fields: Rows<FormField>,
    #[serde(default)]
    pub submit_button_text: Option<String>,
}

impl FormBlock {
    /// Submit button label, falling back to the schema default.
    pub fn submit_label(&self) -> &str {
        self.submit_button_text
            .as_deref()
            .unwrap_or(DEFAULT_FORM_SUBMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FormFieldType,
    #[serde(default)]
    pub required: Option<bool>,
}

/// Comment thread hosted by Disqus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsBlock {
    pub disqus_shortname: String,
    #[serde(default)]
    pub identifier: Option<String>,
}

/// Flat collections that list blocks can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListCollection {
    Blogs,
    Projects,
}

/// Titled listing of a flat collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    pub heading: String,
    pub collection_slug: ListCollection,
}

/// Untitled listing of a flat collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicContentBlock {
    pub collection_slug: ListCollection,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_block_type_strings() {
        assert_eq!(BlockType::HomeBlock.as_str(), "homeBlock");
        assert_eq!(BlockType::DisqusCommentBlock.to_string(), "disqusCommentBlock");
        assert_eq!(
            BlockType::from_str("experiencesBlock").unwrap(),
            BlockType::ExperiencesBlock
        );
        assert!(BlockType::from_str("heroBlock").is_err());
        assert_eq!(BlockType::iter().count(), 9);
    }

    #[test]
    fn test_decode_tagged_block() {
        let block: Block = serde_json::from_value(json!({
            "id": "65f0",
            "blockName": null,
            "blockType": "contactBlock",
            "heading": "Say hi",
            "contactReasons": [ { "id": "r1", "reason": "Work" } ]
        }))
        .unwrap();

        assert_eq!(block.id.as_deref(), Some("65f0"));
        assert_eq!(block.block_type(), Some(BlockType::ContactBlock));

        let contact = ContactBlock::from_content(&block.content).unwrap();
        assert_eq!(contact.heading, "Say hi");
        assert_eq!(contact.contact_reasons.len(), 1);
        assert_eq!(contact.submit_label(), DEFAULT_CONTACT_SUBMIT);
        assert!(AboutBlock::from_content(&block.content).is_none());
    }

    #[test]
    fn test_unknown_block_type_is_unsupported() {
        let block: Block = serde_json::from_value(json!({
            "blockType": "carouselBlock",
            "slides": []
        }))
        .unwrap();

        assert_eq!(block.content, BlockContent::Unsupported);
        assert!(block.block_type().is_none());
    }

    #[test]
    fn test_experience_dates_and_flags() {
        let block: ExperiencesBlock = serde_json::from_value(json!({
            "heading": "Work",
            "experiences": [ {
                "title": "Engineer",
                "company": "Acme",
                "startDate": "2021-02-01T00:00:00.000Z",
                "endDate": null,
                "current": true,
                "skills": [ { "skill": "Rust" } ]
            } ]
        }))
        .unwrap();

        let experience = block.experiences.first().unwrap();
        assert!(experience.is_current());
        assert!(experience.start_date.is_some());
        assert!(experience.end_date.is_none());
        assert_eq!(experience.skills.first().unwrap().skill, "Rust");
    }
}
