use serde::{Deserialize, Serialize};

/// Resolved header style.
///
/// Immutable once built; a style change replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub vertical_padding: f64,
}

/// Resolved row style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub vertical_padding: f64,
    /// Padding on each side of the text. Header widths and header text anchors
    /// use this value too.
    pub horizontal_padding: f64,
}

/// Host-facing header style configuration; unset fields take defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderStyleProps {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub vertical_padding: Option<f64>,
}

/// Host-facing row style configuration; unset fields take defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowStyleProps {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub vertical_padding: Option<f64>,
    pub horizontal_padding: Option<f64>,
}

/// Compose a CSS font shorthand: `"{weight} {size}px {family}"`.
fn css_font(weight: &str, size: f64, family: &str) -> String {
    format!("{weight} {size}px {family}")
}

impl HeaderStyle {
    /// Total header band height: text plus vertical padding on both sides.
    pub fn height(&self) -> f64 {
        self.vertical_padding * 2.0 + self.font_size
    }

    /// Font descriptor for text measurement and drawing.
    pub fn font(&self) -> String {
        css_font(&self.font_weight, self.font_size, &self.font_family)
    }
}

impl RowStyle {
    /// Uniform row height.
    pub fn height(&self) -> f64 {
        self.vertical_padding * 2.0 + self.font_size
    }

    pub fn font(&self) -> String {
        css_font(&self.font_weight, self.font_size, &self.font_family)
    }
}

impl Default for HeaderStyle {
    fn default() -> Self {
        HeaderStyleProps::default().into()
    }
}

impl Default for RowStyle {
    fn default() -> Self {
        RowStyleProps::default().into()
    }
}

impl From<HeaderStyleProps> for HeaderStyle {
    fn from(props: HeaderStyleProps) -> Self {
        Self {
            font_family: props.font_family.unwrap_or_else(|| "sans-serif".to_string()),
            font_size: props.font_size.unwrap_or(16.0),
            font_weight: props.font_weight.unwrap_or_else(|| "normal".to_string()),
            color: props.color.unwrap_or_else(|| "#ffffff".to_string()),
            background_color: props.background_color.unwrap_or_else(|| "red".to_string()),
            border_color: props.border_color.unwrap_or_else(|| "black".to_string()),
            border_width: props.border_width.unwrap_or(1.0),
            vertical_padding: props.vertical_padding.unwrap_or(12.0),
        }
    }
}

impl From<RowStyleProps> for RowStyle {
    fn from(props: RowStyleProps) -> Self {
        Self {
            font_family: props.font_family.unwrap_or_else(|| "sans-serif".to_string()),
            font_size: props.font_size.unwrap_or(16.0),
            font_weight: props.font_weight.unwrap_or_else(|| "normal".to_string()),
            color: props.color.unwrap_or_else(|| "#212529".to_string()),
            background_color: props
                .background_color
                .unwrap_or_else(|| "#ffffff".to_string()),
            border_color: props.border_color.unwrap_or_else(|| "black".to_string()),
            border_width: props.border_width.unwrap_or(1.0),
            vertical_padding: props.vertical_padding.unwrap_or(10.0),
            horizontal_padding: props.horizontal_padding.unwrap_or(15.0),
        }
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

    #[test]
    fn test_header_defaults() {
        let style = HeaderStyle::default();
        assert_eq!(style.height(), 40.0);
        assert_eq!(style.font(), "normal 16px sans-serif");
        assert_eq!(style.background_color, "red");
    }

    #[test]
    fn test_row_height_from_padding() {
        let style: RowStyle = RowStyleProps {
            font_size: Some(10.0),
            vertical_padding: Some(5.0),
            ..Default::default()
        }
        .into();
        assert_eq!(style.height(), 20.0);
        assert_eq!(style.horizontal_padding, 15.0);
    }

    #[test]
    fn test_explicit_zero_padding_is_kept() {
        let style: RowStyle = RowStyleProps {
            horizontal_padding: Some(0.0),
            vertical_padding: Some(0.0),
            ..Default::default()
        }
        .into();
        assert_eq!(style.horizontal_padding, 0.0);
        assert_eq!(style.height(), 16.0);
    }

    #[test]
    fn test_fractional_font_size() {
        let style: HeaderStyle = HeaderStyleProps {
            font_size: Some(10.5),
            font_weight: Some("bold".into()),
            font_family: Some("Inter".into()),
            ..Default::default()
        }
        .into();
        assert_eq!(style.font(), "bold 10.5px Inter");
    }

    #[test]
    fn test_props_from_camel_case_json() {
        let props: RowStyleProps =
            serde_json::from_str(r##"{"horizontalPadding": 4, "backgroundColor": "#eee"}"##)
                .unwrap();
        let style = RowStyle::from(props);
        assert_eq!(style.horizontal_padding, 4.0);
        assert_eq!(style.background_color, "#eee");
        assert_eq!(style.font_size, 16.0);
    }
}
