//! Field definitions and the recursive walks over them.

use serde_json::{Map, Value};

use crate::content::Collection;
use crate::media::MediaResolver;
use crate::{Error, Result};

/// Storage shape of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Number,
    Date,
    Checkbox,
    /// One of a fixed set of string options.
    Select(Vec<String>),
    /// Media reference: a numeric id or a media document.
    Upload,
    RichText,
    /// Reference to a document of another collection.
    Relationship(Collection),
    /// Fixed sub-object.
    Group(Vec<FieldSchema>),
    /// Repeatable ordered list of sub-objects.
    Array(Vec<FieldSchema>),
    /// Ordered list of layout blocks, each validated by its own block schema.
    Blocks,
}

impl FieldKind {
    /// Returns the name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Select(_) => "select",
            Self::Upload => "upload",
            Self::RichText => "richText",
            Self::Relationship(_) => "relationship",
            Self::Group(_) => "group",
            Self::Array(_) => "array",
            Self::Blocks => "blocks",
        }
    }

    /// Returns the nested fields of groups and arrays.
    pub fn sub_fields(&self) -> Option<&[FieldSchema]> {
        match self {
            Self::Group(fields) | Self::Array(fields) => Some(fields),
            _ => None,
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Text | Self::Textarea | Self::Email | Self::Date => value.is_string(),
            Self::Number => value.is_number(),
            Self::Checkbox => value.is_boolean(),
            Self::Select(options) => value
                .as_str()
                .is_some_and(|option| options.iter().any(|known| known == option)),
            Self::Upload | Self::Relationship(_) => {
                value.is_number() || value.is_string() || value.is_object()
            }
            Self::RichText | Self::Group(_) => value.is_object(),
            Self::Array(_) | Self::Blocks => value.is_array(),
        }
    }
}

/// Declaration of one field of a block or collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Storage key of the field.
    pub name: String,
    pub kind: FieldKind,
    /// Required fields must be present and non-null.
    pub required: bool,
    /// Admin label, when it differs from the name.
    pub label: Option<String>,
    /// Value the CMS fills in when the author leaves the field empty.
    pub default: Option<Value>,
}

impl FieldSchema {
    /// Creates an optional field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            label: None,
            default: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Textarea)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }

    pub fn select<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldKind::Select(options.into_iter().map(Into::into).collect()),
        )
    }

    pub fn upload(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Upload)
    }

    pub fn rich_text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::RichText)
    }

    pub fn relationship(name: impl Into<String>, collection: Collection) -> Self {
        Self::new(name, FieldKind::Relationship(collection))
    }

    pub fn group(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self::new(name, FieldKind::Group(fields))
    }

    pub fn array(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self::new(name, FieldKind::Array(fields))
    }

    pub fn blocks(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Blocks)
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the admin label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Checks `document` against `fields`, reporting the first violation.
pub(crate) fn validate_fields(fields: &[FieldSchema], document: &Value, prefix: &str) -> Result<()> {
    let Some(object) = document.as_object() else {
        return Err(Error::malformed()
            .with_message(format!("expected an object at `{}`", display_path(prefix))));
    };

    fields
        .iter()
        .try_for_each(|field| validate_field(field, object, prefix))
}

fn validate_field(field: &FieldSchema, object: &Map<String, Value>, prefix: &str) -> Result<()> {
    let path = join(prefix, &field.name);
    let value = match object.get(&field.name) {
        None | Some(Value::Null) if field.required => {
            return Err(Error::malformed()
                .with_message(format!("required field `{path}` is missing")));
        }
        None | Some(Value::Null) => return Ok(()),
        Some(value) => value,
    };

    if !field.kind.accepts(value) {
        return Err(Error::malformed()
            .with_message(format!("field `{path}` is not a valid {}", field.kind.name()))
            .with_context(format!("value: {value}")));
    }

    match (&field.kind, value) {
        (FieldKind::Group(sub_fields), _) => validate_fields(sub_fields, value, &path),
        (FieldKind::Array(sub_fields), Value::Array(items)) => {
            items.iter().enumerate().try_for_each(|(index, item)| {
                validate_fields(sub_fields, item, &format!("{path}.{index}"))
            })
        }
        _ => Ok(()),
    }
}

/// Rewrites every upload field under `fields` into a concrete media document.
///
/// Block lists are left untouched; each block is normalized by its own schema.
pub(crate) fn normalize_fields(
    fields: &[FieldSchema],
    document: &mut Value,
    resolver: &MediaResolver,
    prefix: &str,
) -> Result<()> {
    let Some(object) = document.as_object_mut() else {
        return Ok(());
    };

    for field in fields {
        let Some(value) = object.get_mut(&field.name) else {
            continue;
        };
        let path = join(prefix, &field.name);

        match &field.kind {
            FieldKind::Upload => resolver
                .normalize_value(value)
                .map_err(|error| error.with_context(format!("field: {path}")))?,
            FieldKind::Group(sub_fields) => {
                normalize_fields(sub_fields, value, resolver, &path)?;
            }
            FieldKind::Array(sub_fields) => {
                if let Value::Array(items) = value {
                    for (index, item) in items.iter_mut().enumerate() {
                        normalize_fields(sub_fields, item, resolver, &format!("{path}.{index}"))?;
                    }
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn display_path(prefix: &str) -> &str {
    if prefix.is_empty() { "<root>" } else { prefix }
}
