//! Field contracts of the standard layout blocks.

use super::{BlockSchema, FieldSchema};
use crate::content::{BlockType, DEFAULT_CONTACT_SUBMIT, DEFAULT_FORM_SUBMIT};

const SOCIAL_PLATFORMS: [&str; 6] = [
    "github",
    "linkedin",
    "twitter",
    "instagram",
    "facebook",
    "youtube",
];

const FORM_FIELD_TYPES: [&str; 6] = ["text", "email", "textarea", "select", "checkbox", "radio"];

const LIST_COLLECTIONS: [&str; 2] = ["blogs", "projects"];

/// Returns the schemas of every standard block type.
pub fn standard_blocks() -> Vec<BlockSchema> {
    vec![
        home(),
        stacks(),
        about(),
        experiences(),
        contact(),
        form(),
        comments(),
        list(),
        dynamic_content(),
    ]
}

fn home() -> BlockSchema {
    BlockSchema::new(BlockType::HomeBlock, vec![
        FieldSchema::text("greetText"),
        FieldSchema::text("name").required(),
        FieldSchema::rich_text("description"),
        FieldSchema::upload("profileImage"),
        FieldSchema::array("socialLinks", vec![
            FieldSchema::select("platform", SOCIAL_PLATFORMS).required(),
            FieldSchema::text("url").required(),
        ]),
        FieldSchema::text("button").with_label("Button Text"),
        FieldSchema::text("buttonPath"),
    ])
}

fn stacks() -> BlockSchema {
    BlockSchema::new(BlockType::StacksBlock, vec![
        FieldSchema::text("heading").required(),
        FieldSchema::text("subheading"),
        FieldSchema::array("techStacks", vec![
            FieldSchema::text("category").required(),
            FieldSchema::array("technologies", vec![
                FieldSchema::text("name").required(),
                FieldSchema::upload("icon"),
            ]),
        ]),
    ])
}

fn about() -> BlockSchema {
    BlockSchema::new(BlockType::AboutBlock, vec![
        FieldSchema::text("heading").required(),
        FieldSchema::text("subheading"),
        FieldSchema::upload("profileImage"),
        FieldSchema::rich_text("aboutYourself"),
        FieldSchema::array("details", vec![
            FieldSchema::text("detailsTitle").required(),
            FieldSchema::array("detailPoints", vec![
                FieldSchema::text("detailPoint").required(),
            ]),
        ]),
        FieldSchema::text("buttonText"),
        FieldSchema::text("buttonPath"),
        FieldSchema::group("codeProfiles", vec![
            FieldSchema::text("heading"),
            FieldSchema::array("profiles", vec![
                FieldSchema::text("title").required(),
                FieldSchema::text("url").required(),
                FieldSchema::upload("image"),
            ]),
        ]),
    ])
}

fn experiences() -> BlockSchema {
    BlockSchema::new(BlockType::ExperiencesBlock, vec![
        FieldSchema::text("heading").required(),
        FieldSchema::text("subheading"),
        FieldSchema::array("experiences", vec![
            FieldSchema::text("title").required(),
            FieldSchema::text("company").required(),
            FieldSchema::text("companyLink"),
            FieldSchema::upload("companyLogo"),
            FieldSchema::text("location"),
            FieldSchema::date("startDate"),
            FieldSchema::date("endDate"),
            FieldSchema::checkbox("current").with_default(false),
            FieldSchema::array("workDetails", vec![FieldSchema::rich_text("description")]),
            FieldSchema::array("skills", vec![FieldSchema::text("skill").required()]),
            FieldSchema::text("achievementsHeading"),
            FieldSchema::array("achievements", vec![FieldSchema::textarea("description")]),
        ]),
    ])
}

fn contact() -> BlockSchema {
    BlockSchema::new(BlockType::ContactBlock, vec![
        FieldSchema::text("heading").required(),
        FieldSchema::text("subheading"),
        FieldSchema::email("email"),
        FieldSchema::text("phone"),
        FieldSchema::array("contactReasons", vec![
            FieldSchema::text("reason").required(),
            FieldSchema::textarea("description"),
        ]),
        FieldSchema::text("submitButtonText").with_default(DEFAULT_CONTACT_SUBMIT),
    ])
}

fn form() -> BlockSchema {
    BlockSchema::new(BlockType::FormBlock, vec![
        FieldSchema::text("heading").required(),
        FieldSchema::array("formFields", vec![
            FieldSchema::text("label").required(),
            FieldSchema::select("type", FORM_FIELD_TYPES).required(),
            FieldSchema::checkbox("required").with_default(false),
        ]),
        FieldSchema::text("submitButtonText").with_default(DEFAULT_FORM_SUBMIT),
    ])
}

fn comments() -> BlockSchema {
    BlockSchema::new(BlockType::DisqusCommentBlock, vec![
        FieldSchema::text("disqusShortname").required(),
        FieldSchema::text("identifier"),
    ])
    .with_label("Comments")
}

fn list() -> BlockSchema {
    BlockSchema::new(BlockType::ListBlock, vec![
        FieldSchema::text("heading").required(),
        FieldSchema::select("collectionSlug", LIST_COLLECTIONS).required(),
    ])
}

fn dynamic_content() -> BlockSchema {
    BlockSchema::new(BlockType::DynamicContentBlock, vec![
        FieldSchema::select("collectionSlug", LIST_COLLECTIONS).required(),
    ])
}
