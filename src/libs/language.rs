use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::naming::{to_field_ident, to_upper_camel_case};
use crate::type_map::{FieldKind, MappedType, map_type};

/// Language the struct is generated in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Go,
    Rust,
}

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rs",
        }
    }

    /// Type name for a mapped column type.
    pub fn type_name(self, ty: MappedType) -> &'static str {
        use FieldKind::*;

        match (self, ty.kind, ty.optional) {
            (Language::Go, Integer, false) => "int64",
            (Language::Go, Integer, true) => "*int64",
            (Language::Go, Float, false) => "float64",
            (Language::Go, Float, true) => "*float64",
            (Language::Go, Boolean, false) => "bool",
            (Language::Go, Boolean, true) => "*bool",
            (Language::Go, Text, false) => "string",
            (Language::Go, Text, true) => "*string",
            (Language::Go, Timestamp, false) => "time.Time",
            (Language::Go, Timestamp, true) => "*time.Time",
            (Language::Go, Bytes, _) => "[]byte",
            (Language::Go, Any, _) => "interface{}",

            (Language::Rust, Integer, false) => "i64",
            (Language::Rust, Integer, true) => "Option<i64>",
            (Language::Rust, Float, false) => "f64",
            (Language::Rust, Float, true) => "Option<f64>",
            (Language::Rust, Boolean, false) => "bool",
            (Language::Rust, Boolean, true) => "Option<bool>",
            (Language::Rust, Text, false) => "String",
            (Language::Rust, Text, true) => "Option<String>",
            (Language::Rust, Timestamp, false) => "NaiveDateTime",
            (Language::Rust, Timestamp, true) => "Option<NaiveDateTime>",
            (Language::Rust, Bytes, _) => "Vec<u8>",
            (Language::Rust, Any, _) => "serde_json::Value",
        }
    }

    /// `map_type` followed by `type_name`.
    pub fn map_type(self, sql_type: &str, nullable: bool) -> &'static str {
        self.type_name(map_type(sql_type, nullable))
    }

    /// Import line contents that bring the timestamp type into scope.
    pub fn timestamp_import(self) -> &'static str {
        match self {
            Language::Go => "\"time\"",
            Language::Rust => "chrono::NaiveDateTime",
        }
    }

    pub fn struct_name(self, table: &str) -> String {
        match self {
            Language::Go => to_upper_camel_case(table),
            Language::Rust => to_field_ident(&to_upper_camel_case(table)),
        }
    }

    pub fn field_name(self, column: &str) -> String {
        match self {
            Language::Go => to_upper_camel_case(column),
            Language::Rust => to_field_ident(column),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}
