//! Entity schemas: declared fields, aliases, defaults, and hooks.
//!
//! A schema is the single source of truth for how one entity type is read
//! from and written to the wire. Hydration and serialization stay generic;
//! anything entity-specific is declared here.

use std::fmt;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::entity::{Entity, FieldValue};

/// Lazily-built, process-wide schema accessor.
///
/// Nested fields refer to their schema through a function pointer so that
/// schemas may reference each other (or themselves) without eager recursion.
pub type SchemaRef = fn() -> &'static EntitySchema;

/// Rewrites a private copy of the raw map before generic field resolution.
pub type PreHydrateHook = fn(&mut Map<String, Value>);

/// Adjusts a freshly hydrated entity; receives the (pre-hooked) raw map.
pub type PostHydrateHook = fn(&Map<String, Value>, &mut Entity);

/// Semantic type of a field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// Text.
    String,
    /// Signed integer.
    Int,
    /// Decimal number.
    Float,
    /// Boolean, with `"true"`/`"false"` string coercion.
    Bool,
    /// Date/time in any supported encoding.
    Temporal,
    /// Nested entity.
    Entity(SchemaRef),
    /// Ordered list of nested entities.
    List(SchemaRef),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Int => write!(f, "Int"),
            Self::Float => write!(f, "Float"),
            Self::Bool => write!(f, "Bool"),
            Self::Temporal => write!(f, "Temporal"),
            Self::Entity(schema) => write!(f, "Entity({})", schema().name()),
            Self::List(schema) => write!(f, "List({})", schema().name()),
        }
    }
}

/// One declared field of an entity schema.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
    nullable: bool,
    default: FieldValue,
    aliases: Vec<String>,
    wire_key: Option<&'static str>,
    keep_empty: bool,
}

impl FieldDescriptor {
    /// Declare a field. Aliases start as the name and its first-letter case
    /// variant (`accountId`, `AccountId`), in that precedence.
    #[must_use]
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        let mut aliases = vec![name.to_string()];
        let flipped = flip_first_letter(name);
        if flipped != name {
            aliases.push(flipped);
        }

        Self {
            name,
            kind,
            nullable: matches!(kind, FieldKind::Temporal | FieldKind::Entity(_)),
            default: zero_value(kind),
            aliases,
            wire_key: None,
            keep_empty: false,
        }
    }

    /// Text field.
    #[must_use]
    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Integer field.
    #[must_use]
    pub fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    /// Decimal field.
    #[must_use]
    pub fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Boolean field.
    #[must_use]
    pub fn bool(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// Date/time field. Always nullable.
    #[must_use]
    pub fn temporal(name: &'static str) -> Self {
        Self::new(name, FieldKind::Temporal)
    }

    /// Nested entity field. Always nullable: absent unless an alias was present.
    #[must_use]
    pub fn entity(name: &'static str, schema: SchemaRef) -> Self {
        Self::new(name, FieldKind::Entity(schema))
    }

    /// List-of-entity field. Never null: absence reads as an empty list.
    #[must_use]
    pub fn list(name: &'static str, schema: SchemaRef) -> Self {
        Self::new(name, FieldKind::List(schema))
    }

    /// Read as `None` when absent instead of the type's zero value.
    ///
    /// Ignored for list fields, which are never null.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        if !matches!(self.kind, FieldKind::List(_)) {
            self.nullable = true;
            self.default = FieldValue::Null;
        }
        self
    }

    /// Declare an explicit default for when the field is absent.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = value.into();
        self.nullable = self.default.is_null();
        self
    }

    /// Accept an extra wire key, probed after the declared ones.
    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        if !self.aliases.iter().any(|a| a == alias) {
            self.aliases.push(alias.to_string());
        }
        self
    }

    /// Serialize under a different key than the field name.
    #[must_use]
    pub const fn wire_key(mut self, key: &'static str) -> Self {
        self.wire_key = Some(key);
        self
    }

    /// Keep an explicit empty string on the wire instead of dropping it.
    #[must_use]
    pub const fn keep_empty(mut self) -> Self {
        self.keep_empty = true;
        self
    }

    /// Field name as exposed on the entity.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Semantic type.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field reads as `None` when absent.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Declared default.
    #[must_use]
    pub const fn default(&self) -> &FieldValue {
        &self.default
    }

    /// Accepted raw keys, in probing order.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Key used on the wire when serializing.
    #[must_use]
    pub fn serialized_key(&self) -> &'static str {
        self.wire_key.unwrap_or(self.name)
    }

    /// Whether an explicit empty string survives serialization.
    #[must_use]
    pub const fn keeps_empty(&self) -> bool {
        self.keep_empty
    }
}

/// Ordered field declarations plus optional hydration hooks.
#[derive(Debug)]
pub struct EntitySchema {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    pre_hydrate: Option<PreHydrateHook>,
    post_hydrate: Option<PostHydrateHook>,
}

impl EntitySchema {
    /// Start an empty schema.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            pre_hydrate: None,
            post_hydrate: None,
        }
    }

    /// Append a field declaration.
    #[must_use]
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Append several field declarations.
    #[must_use]
    pub fn fields(mut self, descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(descriptors);
        self
    }

    /// Run `hook` on a copy of the raw map before fields are resolved.
    #[must_use]
    pub const fn with_pre_hydrate(mut self, hook: PreHydrateHook) -> Self {
        self.pre_hydrate = Some(hook);
        self
    }

    /// Run `hook` on the entity after fields are resolved.
    #[must_use]
    pub const fn with_post_hydrate(mut self, hook: PostHydrateHook) -> Self {
        self.post_hydrate = Some(hook);
        self
    }

    /// Schema name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields, in order.
    #[must_use]
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field declaration by name.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|d| d.name == name)
    }

    pub(crate) const fn pre_hydrate(&self) -> Option<PreHydrateHook> {
        self.pre_hydrate
    }

    pub(crate) const fn post_hydrate(&self) -> Option<PostHydrateHook> {
        self.post_hydrate
    }
}

/// Declare a lazily-built `&'static EntitySchema` accessor.
///
/// ```rust,ignore
/// entity_schema! {
///     /// Order leg product.
///     pub fn product() => EntitySchema::new("Product")
///         .field(FieldDescriptor::string("symbol"))
/// }
/// ```
#[macro_export]
macro_rules! entity_schema {
    ($(#[$meta:meta])* $vis:vis fn $name:ident() => $build:expr) => {
        $(#[$meta])*
        #[must_use]
        $vis fn $name() -> &'static $crate::mapping::EntitySchema {
            static SCHEMA: std::sync::LazyLock<$crate::mapping::EntitySchema> =
                std::sync::LazyLock::new(|| $build);
            &SCHEMA
        }
    };
}

fn zero_value(kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::String => FieldValue::String(String::new()),
        FieldKind::Int => FieldValue::Int(0),
        FieldKind::Float => FieldValue::Float(Decimal::ZERO),
        FieldKind::Bool => FieldValue::Bool(false),
        FieldKind::List(_) => FieldValue::List(Vec::new()),
        FieldKind::Temporal | FieldKind::Entity(_) => FieldValue::Null,
    }
}

fn flip_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    entity_schema! {
        fn leaf() => EntitySchema::new("Leaf").field(FieldDescriptor::string("symbol"))
    }

    #[test]
    fn aliases_include_case_variant() {
        let d = FieldDescriptor::string("accountId");
        assert_eq!(d.aliases(), ["accountId", "AccountId"]);

        let d = FieldDescriptor::string("Product");
        assert_eq!(d.aliases(), ["Product", "product"]);
    }

    #[test]
    fn extra_aliases_follow_declared_ones() {
        let d = FieldDescriptor::string("accountId").alias("acctId").alias("accountId");
        assert_eq!(d.aliases(), ["accountId", "AccountId", "acctId"]);
    }

    #[test]
    fn defaults_follow_kind_and_nullability() {
        assert_eq!(FieldDescriptor::string("a").default(), &FieldValue::String(String::new()));
        assert_eq!(FieldDescriptor::int("a").default(), &FieldValue::Int(0));
        assert_eq!(FieldDescriptor::bool("a").default(), &FieldValue::Bool(false));
        assert_eq!(FieldDescriptor::string("a").nullable().default(), &FieldValue::Null);
        assert!(FieldDescriptor::temporal("a").is_nullable());
        assert!(FieldDescriptor::entity("a", leaf).is_nullable());
        assert_eq!(
            FieldDescriptor::list("a", leaf).nullable().default(),
            &FieldValue::List(Vec::new())
        );
    }

    #[test]
    fn explicit_default_is_kept() {
        let d = FieldDescriptor::string("quantityType").default_value("QUANTITY");
        assert_eq!(d.default(), &FieldValue::String("QUANTITY".to_string()));
        assert!(!d.is_nullable());
    }

    #[test]
    fn serialized_key_defaults_to_name() {
        assert_eq!(FieldDescriptor::string("symbol").serialized_key(), "symbol");
        assert_eq!(
            FieldDescriptor::entity("product", leaf).wire_key("Product").serialized_key(),
            "Product"
        );
    }

    #[test]
    fn schema_lookup_by_name() {
        let schema = leaf();
        assert_eq!(schema.name(), "Leaf");
        assert!(schema.descriptor("symbol").is_some());
        assert!(schema.descriptor("missing").is_none());
        assert!(std::ptr::eq(schema, leaf()));
    }
}
