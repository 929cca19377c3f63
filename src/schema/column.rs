/// Broad column type classes driving value coercion and validation
///
/// This deliberately tracks classes rather than exact SQL types: the CRUD
/// layer only needs to know how to normalize and bind a value, not the full
/// type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Decimal,
    Text,
    Date,
    Timestamp,
    Bool,
}

impl ColumnType {
    /// Text-like columns accept any string, including the empty string,
    /// as a valid NOT NULL value
    pub fn is_text_like(&self) -> bool {
        matches!(self, ColumnType::Text)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Decimal)
    }
}

/// Static description of a single table column
///
/// Mirrors the fields a MySQL DESCRIBE would report (field, type, null,
/// default, extra) but is declared in code, next to the migrations that
/// create the actual table.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub ty: ColumnType,
    pub max_len: Option<u32>,
    pub nullable: bool,
    pub default_value: Option<&'static str>,
    pub auto_increment: bool,
    /// Sensitive columns are never serialized into responses
    pub sensitive: bool,
}

impl ColumnDescriptor {
    pub fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            max_len: None,
            nullable: true,
            default_value: None,
            auto_increment: false,
            sensitive: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn len(mut self, max_len: u32) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn default(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// A column is required on create when nothing else can supply a value
    pub fn required(&self) -> bool {
        !self.nullable && self.default_value.is_none() && !self.auto_increment
    }

    /// Declared type string, in the form DESCRIBE reports it
    pub fn declared_type(&self) -> String {
        match self.ty {
            ColumnType::Integer => "int".to_string(),
            ColumnType::Decimal => "decimal".to_string(),
            ColumnType::Text => match self.max_len {
                Some(n) => format!("varchar({})", n),
                None => "text".to_string(),
            },
            ColumnType::Date => "date".to_string(),
            ColumnType::Timestamp => "timestamp".to_string(),
            ColumnType::Bool => "tinyint(1)".to_string(),
        }
    }

    pub fn extra(&self) -> &'static str {
        if self.auto_increment {
            "auto_increment"
        } else {
            ""
        }
    }
}
