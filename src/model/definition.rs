//! Static entity definitions: table, route segment, columns and their rules.
//! Identifiers used in generated SQL come only from these definitions.

/// Storage type of a column. Timestamps and ids are stored as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

impl ColumnType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "BIGINT",
            ColumnType::Real => "DOUBLE PRECISION",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    Uuid,
}

/// Per-column request validation.
#[derive(Clone, Copy, Debug)]
pub struct ValidationRule {
    pub required: bool,
    pub format: Option<Format>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl ValidationRule {
    pub const NONE: ValidationRule = ValidationRule {
        required: false,
        format: None,
        min_length: None,
        max_length: None,
        pattern: None,
        minimum: None,
        maximum: None,
    };
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    /// Table whose `id` this column points at.
    pub references: Option<&'static str>,
    /// Never serialized into responses.
    pub sensitive: bool,
    pub rule: ValidationRule,
}

impl ColumnDef {
    const fn new(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef {
            name,
            ty,
            nullable: false,
            unique: false,
            references: None,
            sensitive: false,
            rule: ValidationRule::NONE,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    pub const fn real(name: &'static str) -> Self {
        Self::new(name, ColumnType::Real)
    }

    pub const fn required(mut self) -> Self {
        self.rule.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub const fn email(mut self) -> Self {
        self.rule.format = Some(Format::Email);
        self
    }

    /// UUID-formatted foreign key to `table`.
    pub const fn references(mut self, table: &'static str) -> Self {
        self.rule.format = Some(Format::Uuid);
        self.references = Some(table);
        self
    }

    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.rule.min_length = Some(min);
        self.rule.max_length = Some(max);
        self
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.rule.max_length = Some(max);
        self
    }

    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.rule.pattern = Some(pattern);
        self
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.rule.minimum = Some(min);
        self.rule.maximum = Some(max);
        self
    }

    pub const fn minimum(mut self, min: f64) -> Self {
        self.rule.minimum = Some(min);
        self
    }
}

/// Columns every table carries, in storage order.
pub const BASE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("id"),
    ColumnDef::text("create_time"),
    ColumnDef::text("update_time"),
];

/// Keys clients may send but never write.
pub const READ_ONLY_FIELDS: &[&str] = &["id", "create_time", "update_time"];

#[derive(Debug)]
pub struct EntityDef {
    pub table: &'static str,
    /// Route segment, e.g. `users`.
    pub path: &'static str,
    /// Singular name used in messages, e.g. `user`.
    pub label: &'static str,
    /// Domain columns; base columns are implicit.
    pub columns: &'static [ColumnDef],
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.all_columns().find(|c| c.name == name)
    }

    pub fn all_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        BASE_COLUMNS.iter().chain(self.columns.iter())
    }

    pub fn sensitive_columns(&self) -> impl Iterator<Item = &'static str> {
        let columns: &'static [ColumnDef] = self.columns;
        columns.iter().filter(|c| c.sensitive).map(|c| c.name)
    }

    pub fn invalid_id_message(&self) -> String {
        format!("Invalid {} ID", self.label)
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", capitalize(self.label))
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
