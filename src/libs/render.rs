use std::fmt::{self, Write};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::naming::to_field_ident;
use crate::schema::ColumnInfo;
use crate::type_map::{FieldKind, map_type};

const HEADER: &str = "// Code generated by slintgen. DO NOT EDIT.";

/// Ordered scheme → value pairs attached to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    pub fn push(&mut self, scheme: impl Into<String>, value: impl Into<String>) {
        self.0.push((scheme.into(), value.into()));
    }

    pub fn get(&self, scheme: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(s, _)| s == scheme)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, v)| (s.as_str(), v.as_str()))
    }

    /// `json:"id" db:"id"`
    pub fn joined(&self) -> String {
        join_tags(self.iter())
    }
}

fn join_tags<'a>(tags: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    tags.map(|(scheme, value)| format!("{scheme}:{}", go_quote(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Double-quoted Go string literal, readable by `strconv.Unquote`.
fn go_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Struct tag literal for one Go field. Raw strings cannot hold a backquote,
/// so such tags fall back to an interpreted string.
fn go_tag_literal(tags: &Tags) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let joined = tags.joined();
    if joined.contains('`') {
        go_quote(&joined)
    } else {
        format!("`{joined}`")
    }
}

/// Import lines in first-use order, each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Imports(Vec<String>);

impl Imports {
    pub fn insert(&mut self, import: &str) {
        if !self.0.iter().any(|i| i == import) {
            self.0.push(import.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldData {
    pub name: String,
    pub ty: &'static str,
    pub tags: Tags,
    pub comment: String,
}

/// Everything the renderer needs for one struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateData {
    pub language: Language,
    pub package_name: String,
    pub imports: Imports,
    pub struct_name: String,
    pub table_name: String,
    pub tag_schemes: Vec<String>,
    pub fields: Vec<FieldData>,
}

impl TemplateData {
    pub fn new(table: &str, columns: &[ColumnInfo], config: &GeneratorConfig) -> Self {
        let language = config.language;
        let tag_schemes = config.tag_schemes();
        let mut imports = Imports::default();
        let mut fields = Vec::with_capacity(columns.len());

        for column in columns {
            let mapped = map_type(&column.sql_type, column.nullable);
            if mapped.kind == FieldKind::Timestamp {
                imports.insert(language.timestamp_import());
            }

            let mut tags = Tags::default();
            for scheme in &tag_schemes {
                tags.push(*scheme, column.name.as_str());
            }
            if column.is_primary_key {
                tags.push("primary", "true");
            }

            fields.push(FieldData {
                name: language.field_name(&column.name),
                ty: language.type_name(mapped),
                tags,
                comment: column.comment.clone(),
            });
        }

        Self {
            language,
            package_name: config.package_name.clone(),
            imports,
            struct_name: language.struct_name(table),
            table_name: table.to_string(),
            tag_schemes: tag_schemes.into_iter().map(String::from).collect(),
            fields,
        }
    }
}

/// Render `data` as source text in its language.
pub fn render(data: &TemplateData) -> Result<String> {
    let mut out = String::new();
    let rendered = match data.language {
        Language::Go => render_go(data, &mut out),
        Language::Rust => render_rust(data, &mut out),
    };
    rendered.map_err(|source| Error::Render {
        table: data.table_name.clone(),
        source,
    })?;
    Ok(out)
}

fn single_line(comment: &str) -> String {
    comment.split_whitespace().collect::<Vec<_>>().join(" ")
}

// -------- Go --------

fn render_go(data: &TemplateData, out: &mut String) -> fmt::Result {
    writeln!(out, "{HEADER}")?;
    writeln!(out)?;
    writeln!(out, "package {}", data.package_name)?;

    if !data.imports.is_empty() {
        writeln!(out)?;
        writeln!(out, "import (")?;
        for import in data.imports.iter() {
            writeln!(out, "\t{import}")?;
        }
        writeln!(out, ")")?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "// {} maps to table {}.",
        data.struct_name, data.table_name
    )?;
    writeln!(out, "type {} struct {{", data.struct_name)?;

    // gofmt alignment
    let name_width = data
        .fields
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0);
    let type_width = data
        .fields
        .iter()
        .map(|f| f.ty.chars().count())
        .max()
        .unwrap_or(0);

    let tags: Vec<String> = data.fields.iter().map(|f| go_tag_literal(&f.tags)).collect();
    // Trailing comments share a column, so tags are padded only when one exists.
    let tag_width = if data.fields.iter().any(|f| !f.comment.is_empty()) {
        tags.iter().map(|t| t.chars().count()).max().unwrap_or(0)
    } else {
        0
    };
    let comment_column = 1
        + name_width
        + 1
        + type_width
        + if tag_width > 0 { 1 + tag_width } else { 0 };

    for (field, tag) in data.fields.iter().zip(&tags) {
        let line = format!(
            "\t{:<name_width$} {:<type_width$} {}",
            field.name, field.ty, tag
        );
        let line = line.trim_end();
        out.push_str(line);
        if !field.comment.is_empty() {
            let pad = comment_column.saturating_sub(line.chars().count());
            write!(
                out,
                "{:pad$} // {}",
                "",
                single_line(&field.comment)
            )?;
        }
        out.push('\n');
    }

    writeln!(out, "}}")
}

// -------- Rust --------

fn render_rust(data: &TemplateData, out: &mut String) -> fmt::Result {
    writeln!(out, "{HEADER}")?;
    writeln!(out)?;
    writeln!(out, "pub mod {} {{", to_field_ident(&data.package_name))?;

    if !data.imports.is_empty() {
        for import in data.imports.iter() {
            writeln!(out, "    use {import};")?;
        }
        writeln!(out)?;
    }

    let has_scheme = |scheme: &str| data.tag_schemes.iter().any(|s| s == scheme);
    let mut derives = vec!["Debug", "Clone"];
    if has_scheme("json") {
        derives.extend(["serde::Serialize", "serde::Deserialize"]);
    }
    if has_scheme("db") {
        derives.push("sqlx::FromRow");
    }

    writeln!(out, "    /// Maps to table `{}`.", data.table_name)?;
    writeln!(out, "    #[derive({})]", derives.join(", "))?;

    if data.fields.is_empty() {
        writeln!(out, "    pub struct {} {{}}", data.struct_name)?;
        return writeln!(out, "}}");
    }

    writeln!(out, "    pub struct {} {{", data.struct_name)?;
    for field in &data.fields {
        if !field.comment.is_empty() {
            for line in field.comment.lines() {
                writeln!(out, "        /// {}", line.trim_end())?;
            }
        }

        let mut rest = Vec::new();
        for (scheme, value) in field.tags.iter() {
            match scheme {
                "json" => writeln!(out, "        #[serde(rename = {value:?})]")?,
                "db" => writeln!(out, "        #[sqlx(rename = {value:?})]")?,
                _ => rest.push((scheme, value)),
            }
        }

        write!(out, "        pub {}: {},", field.name, field.ty)?;
        if !rest.is_empty() {
            write!(out, " // {}", join_tags(rest.into_iter()))?;
        }
        out.push('\n');
    }
    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}
