/// Target-independent classification of a SQL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Float,
    Boolean,
    Text,
    Timestamp,
    Bytes,
    /// Nothing matched; rendered as the target's dynamic type.
    Any,
}

impl FieldKind {
    /// Classify by case-insensitive substring. Earlier checks win, so
    /// `interval` or `point` land in [`FieldKind::Integer`].
    pub fn from_sql(sql_type: &str) -> Self {
        let sql_type = sql_type.to_lowercase();
        let has = |needle: &str| sql_type.contains(needle);

        if has("int") {
            FieldKind::Integer
        } else if has("float") || has("double") || has("decimal") {
            FieldKind::Float
        } else if has("bool") {
            FieldKind::Boolean
        } else if has("char") || has("text") {
            FieldKind::Text
        } else if has("date") || has("time") {
            FieldKind::Timestamp
        } else if has("blob") || has("binary") {
            FieldKind::Bytes
        } else {
            FieldKind::Any
        }
    }

    /// Bytes and the dynamic type already admit absence and are never wrapped.
    pub fn has_optional_form(self) -> bool {
        !matches!(self, FieldKind::Bytes | FieldKind::Any)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappedType {
    pub kind: FieldKind,
    pub optional: bool,
}

/// Map a reported SQL type and its nullability to a field type.
pub fn map_type(sql_type: &str, nullable: bool) -> MappedType {
    let kind = FieldKind::from_sql(sql_type);
    MappedType {
        kind,
        optional: nullable && kind.has_optional_form(),
    }
}
