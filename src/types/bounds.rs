use serde::Serialize;

/// Identifies what a [`BoundingBox`] belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BoxKey {
    /// Header box, keyed by column key
    Column(String),
    /// Row cell box, keyed by row index
    Row(usize),
}

impl BoxKey {
    pub fn as_column(&self) -> Option<&str> {
        match self {
            Self::Column(key) => Some(key),
            Self::Row(_) => None,
        }
    }

    pub fn as_row(&self) -> Option<usize> {
        match self {
            Self::Column(_) => None,
            Self::Row(row) => Some(*row),
        }
    }
}

/// On-screen rectangle of a header or a row cell.
///
/// Boxes are never clipped to the viewport: the first and last visible boxes may
/// extend past its edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub key: BoxKey,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Output of one measurement pass.
///
/// `rows` holds one contiguous run per visible row; the Nth box of a run lines up
/// with `headers[N]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisibleBoundingBoxes {
    pub headers: Vec<BoundingBox>,
    pub rows: Vec<BoundingBox>,
}

impl VisibleBoundingBoxes {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Right edge of the pinned band, given how many leading headers are pinned.
    pub fn pinned_right(&self, pinned_count: usize) -> f64 {
        match pinned_count.min(self.headers.len()) {
            0 => 0.0,
            n => self.headers.get(n - 1).map_or(0.0, BoundingBox::right),
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

    fn header(key: &str, x: f64, width: f64) -> BoundingBox {
        BoundingBox {
            key: BoxKey::Column(key.into()),
            x,
            y: 0.0,
            width,
            height: 10.0,
        }
    }

    #[test]
    fn test_pinned_right() {
        let boxes = VisibleBoundingBoxes {
            headers: vec![header("a", 0.0, 10.0), header("b", 10.0, 15.0)],
            rows: Vec::new(),
        };
        assert_eq!(boxes.pinned_right(0), 0.0);
        assert_eq!(boxes.pinned_right(1), 10.0);
        assert_eq!(boxes.pinned_right(5), 25.0);
    }

    #[test]
    fn test_key_serializes_untagged() {
        let json = serde_json::to_string(&BoxKey::Row(3)).unwrap();
        assert_eq!(json, "3");
        let json = serde_json::to_string(&BoxKey::Column("a".into())).unwrap();
        assert_eq!(json, "\"a\"");
    }
}
