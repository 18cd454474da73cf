use serde::{Deserialize, Serialize};

use super::{CellReference, ColumnReference, RowReference, TextStyle};

/// A single cell as returned by the server. Replaced wholesale on every
/// delta that carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub reference: CellReference,
    #[serde(default)]
    pub formula: Formula,
    #[serde(default, skip_serializing_if = "TextStyle::is_empty")]
    pub style: TextStyle,
    /// Pattern used to format the value for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_pattern: Option<String>,
    /// Pattern used to parse edited text back into a value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_pattern: Option<String>,
    /// Formatted, rendered output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<TextNode>,
    /// Validation choice list; shown as a chooser while selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_choices: Option<Vec<String>>,
}

impl Cell {
    /// A cell holding only formula text.
    pub fn new(reference: CellReference, formula_text: &str) -> Self {
        Self {
            reference,
            formula: Formula::new(formula_text),
            style: TextStyle::default(),
            format_pattern: None,
            parse_pattern: None,
            formatted_value: None,
            validation_choices: None,
        }
    }

    /// Whether the evaluated value is numerically zero.
    pub fn is_zero(&self) -> bool {
        matches!(self.formula.value, Some(CellValue::Number(n)) if n == 0.0)
    }

    /// Display text: the formatted value, else nothing.
    pub fn formatted_text(&self) -> &str {
        self.formatted_value
            .as_ref()
            .map_or("", |node| node.text.as_str())
    }
}

/// Formula text plus its evaluation outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FormulaError>,
}

impl Formula {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            value: None,
            error: None,
        }
    }
}

/// Evaluated cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Boolean(bool),
    Text(String),
}

/// Formula evaluation error, e.g. `#DIV/0!`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaError {
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

/// Formatted output of a cell: text with an optional badge annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub text: String,
    /// Annotation text, shown as the cell tooltip in preference to errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "TextStyle::is_empty")]
    pub style: TextStyle,
}

impl TextNode {
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            badge: None,
            style: TextStyle::default(),
        }
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub reference: ColumnReference,
    #[serde(default)]
    pub hidden: bool,
}

/// Row metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub reference: RowReference,
    #[serde(default)]
    pub hidden: bool,
}
