use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Formats a raw row value for display. Missing values are passed as `Value::Null`.
pub type ValueFormatter = Rc<dyn Fn(&Value) -> String>;

/// Horizontal text alignment within a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Canvas `textAlign` value
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// X coordinate of the text anchor inside a box starting at `x` with `width`.
    pub fn text_x(self, x: f64, width: f64, padding: f64) -> f64 {
        match self {
            Self::Left => x + padding,
            Self::Center => x + width / 2.0,
            Self::Right => x + width - padding,
        }
    }
}

/// One schema entry. Order in the [`Schema`] is left-to-right column order.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub align: Alignment,
    #[serde(skip)]
    pub value_formatter: Option<ValueFormatter>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>, align: Alignment) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            align,
            value_formatter: None,
        }
    }

    /// Attach a formatter applied to every raw value of this column.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Fn(&Value) -> String + 'static) -> Self {
        self.value_formatter = Some(Rc::new(formatter));
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("align", &self.align)
            .field("value_formatter", &self.value_formatter.is_some())
            .finish()
    }
}

/// Ordered column list. Replaced wholesale; never edited in place.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by key. Keys are not validated for uniqueness; the last
    /// column with a matching key wins.
    pub fn find(&self, key: &str) -> Option<&Column> {
        self.columns.iter().rev().find(|c| c.key == key)
    }
}

impl From<Vec<Column>> for Schema {
    fn from(columns: Vec<Column>) -> Self {
        Self::new(columns)
    }
}

impl FromIterator<Column> for Schema {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Alignment::Left, 15.0 ; "left anchors after padding")]
    #[test_case(Alignment::Center, 30.0 ; "center anchors at midpoint")]
    #[test_case(Alignment::Right, 45.0 ; "right anchors before padding")]
    fn test_text_x(align: Alignment, expected: f64) {
        assert_eq!(align.text_x(10.0, 40.0, 5.0), expected);
    }

    #[test]
    fn test_find_last_duplicate_wins() {
        let schema = Schema::new(vec![
            Column::new("a", "First", Alignment::Left),
            Column::new("a", "Second", Alignment::Right),
        ]);
        assert_eq!(schema.find("a").unwrap().label, "Second");
        assert!(schema.find("missing").is_none());
    }

    #[test]
    fn test_column_deserializes_with_default_alignment() {
        let columns: Vec<Column> = serde_json::from_str(
            r#"[{"key": "name", "label": "Name"}, {"key": "qty", "label": "Qty", "align": "right"}]"#,
        )
        .unwrap();
        assert_eq!(columns[0].align, Alignment::Left);
        assert_eq!(columns[1].align, Alignment::Right);
        assert!(columns[1].value_formatter.is_none());
    }

    #[test]
    fn test_alignment_css() {
        assert_eq!(Alignment::Center.as_css(), "center");
    }
}
