//! Typed schema nodes and levels.
//!
//! A raw schema is a mapping whose entries are either field names (a level)
//! or `#`-prefixed directives (a node description). Parsing turns it into
//! [`SchemaLevel`]s of [`SchemaNode`]s, each carrying a typed [`Rule`].

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::directive;
use super::enumeration::EnumRule;
use super::numeric::{FloatRule, IntegerRule};
use super::string::StringRule;

/// What a schema node checks, selected by its `#type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// `string`: text with optional length bounds.
    String(StringRule),
    /// `boolean`: only `true` or `false`.
    Boolean,
    /// `integer`: whole numbers with optional value bounds.
    Integer(IntegerRule),
    /// `float`: floating point numbers with optional value bounds.
    Float(FloatRule),
    /// `enum`: a literal option list or a discriminated union.
    Enum(EnumRule),
    /// `fieldset`: a nested mapping validated against its own level.
    Fieldset(SchemaLevel),
    /// `placeholder`: accepted at this position, checked through a union.
    Placeholder,
    /// Any other tag, resolved through the handler registry.
    Extension(String),
}

impl Rule {
    /// Returns the `#type` tag this rule was parsed from.
    pub fn tag(&self) -> &str {
        match self {
            Rule::String(_) => "string",
            Rule::Boolean => "boolean",
            Rule::Integer(_) => "integer",
            Rule::Float(_) => "float",
            Rule::Enum(_) => "enum",
            Rule::Fieldset(_) => "fieldset",
            Rule::Placeholder => "placeholder",
            Rule::Extension(tag) => tag,
        }
    }
}

impl From<StringRule> for Rule {
    fn from(rule: StringRule) -> Self {
        Rule::String(rule)
    }
}

impl From<IntegerRule> for Rule {
    fn from(rule: IntegerRule) -> Self {
        Rule::Integer(rule)
    }
}

impl From<FloatRule> for Rule {
    fn from(rule: FloatRule) -> Self {
        Rule::Float(rule)
    }
}

impl From<EnumRule> for Rule {
    fn from(rule: EnumRule) -> Self {
        Rule::Enum(rule)
    }
}

impl From<SchemaLevel> for Rule {
    fn from(level: SchemaLevel) -> Self {
        Rule::Fieldset(level)
    }
}

/// The description of a single field.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{SchemaNode, StringRule};
///
/// let node = SchemaNode::new(StringRule::new().max_len(200))
///     .required()
///     .validator("hello_world");
///
/// assert!(node.is_required());
/// assert_eq!(node.type_tag(), "string");
/// assert_eq!(node.validator_name(), Some("hello_world"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    rule: Rule,
    required: bool,
    validator: Option<String>,
    attributes: Map<String, Value>,
}

impl SchemaNode {
    /// Creates an optional node with no named validator.
    pub fn new(rule: impl Into<Rule>) -> Self {
        Self {
            rule: rule.into(),
            required: false,
            validator: None,
            attributes: Map::new(),
        }
    }

    /// A `string` node without length bounds.
    pub fn string() -> Self {
        Self::new(StringRule::new())
    }

    /// A `boolean` node.
    pub fn boolean() -> Self {
        Self::new(Rule::Boolean)
    }

    /// An `integer` node without bounds.
    pub fn integer() -> Self {
        Self::new(IntegerRule::new())
    }

    /// A `float` node without bounds.
    pub fn float() -> Self {
        Self::new(FloatRule::new())
    }

    /// A `placeholder` node.
    pub fn placeholder() -> Self {
        Self::new(Rule::Placeholder)
    }

    /// A node whose tag is resolved through the handler registry.
    pub fn extension(tag: impl Into<String>) -> Self {
        Self::new(Rule::Extension(tag.into()))
    }

    pub(crate) fn from_parts(
        rule: Rule,
        required: bool,
        validator: Option<String>,
        attributes: Map<String, Value>,
    ) -> Self {
        Self {
            rule,
            required,
            validator,
            attributes,
        }
    }

    /// Marks the field as mandatory at its level.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches a named post-validator.
    pub fn validator(mut self, name: impl Into<String>) -> Self {
        self.validator = Some(name.into());
        self
    }

    /// Stores an uninterpreted directive such as `#default` or `#weight`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// The rule selected by this node's type tag.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The `#type` tag of this node.
    pub fn type_tag(&self) -> &str {
        self.rule.tag()
    }

    /// Whether the field carries `#required`.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The `#validator` name, if any.
    pub fn validator_name(&self) -> Option<&str> {
        self.validator.as_deref()
    }

    /// Every raw directive of the node, interpreted or not.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Looks up one raw directive, with or without its `#` prefix.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).or_else(|| {
            if directive::is_directive(key) {
                None
            } else {
                self.attributes.get(&format!("{}{}", directive::PREFIX, key))
            }
        })
    }
}

/// One level of a schema: field names mapped to their nodes, in the order
/// they were declared.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{SchemaLevel, SchemaNode};
///
/// let level = SchemaLevel::new()
///     .field("name", SchemaNode::string().required())
///     .field("nickname", SchemaNode::string());
///
/// let required: Vec<_> = level.required_fields().map(|(name, _)| name).collect();
/// assert_eq!(required, vec!["name"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaLevel {
    fields: IndexMap<String, SchemaNode>,
}

impl SchemaLevel {
    /// Creates a level with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns self for chaining.
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.insert(name, node);
        self
    }

    /// Adds or replaces a field.
    pub fn insert(&mut self, name: impl Into<String>, node: SchemaNode) {
        self.fields.insert(name.into(), node);
    }

    /// Looks up a field's node.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    /// Returns true if the level declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Iterates the fields flagged `#required` directly at this level.
    pub fn required_fields(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields().filter(|(_, node)| node.is_required())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the level has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
