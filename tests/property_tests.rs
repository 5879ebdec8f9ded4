//! Property-based invariants for visible bounding boxes.
//!
//! 1. With no pinned columns, header boxes are contiguous in schema order.
//! 2. At `viewport.x = 0` the first header starts at x = 0.
//! 3. Every header box intersects the horizontal viewport.
//! 4. Pinned headers come first, at positions independent of `viewport.x`,
//!    and no column appears twice.
//! 5. Every row box overlaps the band between the header and the viewport bottom.
//! 6. Column widths never shrink across refreshes.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::HashSet;

use canvasgrid::render::StubTextMeasurer;
use canvasgrid::{
    Alignment, CellMeasurer, Column, GridState, Row, RowStyleProps, Schema, Viewport,
    VisibleBoundingBoxes,
};
use proptest::prelude::*;
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────────

fn key(i: usize) -> String {
    format!("k{i}")
}

fn label(i: usize) -> String {
    format!("label {i}")
}

/// A state with one column per label width and `rows` rows of empty-width values.
fn state(label_widths: &[u16], rows: usize, viewport: Viewport, fixed: usize) -> GridState {
    let mut state = GridState::new();
    state.set_schema(Schema::new(
        (0..label_widths.len())
            .map(|i| Column::new(key(i), label(i), Alignment::Left))
            .collect(),
    ));
    state.set_row_style(
        RowStyleProps {
            horizontal_padding: Some(0.0),
            ..Default::default()
        }
        .into(),
    );
    state.set_rows((0..rows).map(|_| Row::new()).collect());
    state.set_viewport(viewport);
    state.set_fixed_column_count(fixed);
    state
}

fn measurer(label_widths: &[u16]) -> StubTextMeasurer {
    label_widths
        .iter()
        .enumerate()
        .fold(StubTextMeasurer::new(0.0), |m, (i, w)| {
            m.with_width(label(i), f64::from(*w))
        })
}

fn compute(state: &GridState, label_widths: &[u16]) -> VisibleBoundingBoxes {
    CellMeasurer::new().compute_visible_bounding_boxes(state, &mut measurer(label_widths))
}

fn widths_strategy() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1u16..=80, 1..12)
}

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (0u16..=600, 0u16..=2000, 1u16..=400, 1u16..=400).prop_map(|(x, y, w, h)| {
        Viewport::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Contiguous headers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn headers_contiguous_without_pinned(widths in widths_strategy(), vp in viewport_strategy()) {
        let boxes = compute(&state(&widths, 0, vp, 0), &widths);
        for pair in boxes.headers.windows(2) {
            prop_assert_eq!(pair[1].x, pair[0].x + pair[0].width, "gap between {:?}", pair);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. First header at the origin
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_header_at_origin(widths in widths_strategy(), w in 1u16..=400, fixed in 0usize..4) {
        let vp = Viewport::new(0.0, 0.0, f64::from(w), 100.0);
        let boxes = compute(&state(&widths, 0, vp, fixed), &widths);
        prop_assert!(!boxes.headers.is_empty());
        prop_assert_eq!(boxes.headers[0].x, 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Headers intersect the viewport
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scrollable_headers_intersect_viewport(widths in widths_strategy(), vp in viewport_strategy()) {
        let boxes = compute(&state(&widths, 0, vp, 0), &widths);
        for header in &boxes.headers {
            prop_assert!(header.x < vp.width, "{:?} starts past the right edge", header);
            prop_assert!(header.right() > 0.0, "{:?} ends before the left edge", header);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Pinned columns
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pinned_headers_first_and_unique(
        widths in widths_strategy(),
        fixed in 1usize..4,
        x1 in 0u16..=600,
        x2 in 0u16..=600,
        w in 1u16..=400,
    ) {
        let pinned = fixed.min(widths.len());
        let at = |x: u16| {
            let vp = Viewport::new(f64::from(x), 0.0, f64::from(w), 100.0);
            compute(&state(&widths, 0, vp, fixed), &widths)
        };
        let (a, b) = (at(x1), at(x2));

        let mut left = 0.0;
        for (i, header) in a.headers.iter().take(pinned).enumerate() {
            let expected = key(i);
            prop_assert_eq!(header.key.as_column(), Some(expected.as_str()));
            prop_assert_eq!(header.x, left);
            prop_assert_eq!(header, &b.headers[i]);
            left += header.width;
        }

        for boxes in [&a, &b] {
            let keys: HashSet<_> = boxes.headers.iter().filter_map(|h| h.key.as_column()).collect();
            prop_assert_eq!(keys.len(), boxes.headers.len());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Row virtualization window
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn row_boxes_overlap_body(widths in widths_strategy(), rows in 0usize..200, vp in viewport_strategy()) {
        let state = state(&widths, rows, vp, 0);
        let header_height = state.header_style().height();
        let boxes = compute(&state, &widths);

        prop_assert_eq!(boxes.rows.len() % boxes.headers.len().max(1), 0);
        for cell in &boxes.rows {
            prop_assert!(cell.y < vp.height, "{:?} starts below the viewport", cell);
            prop_assert!(cell.bottom() > header_height, "{:?} is hidden by the header", cell);
            prop_assert!(cell.key.as_row().is_some_and(|r| r < rows));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Width monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn widths_never_shrink(
        widths in widths_strategy(),
        first in 0u16..=200,
        second in 0u16..=200,
        vp in viewport_strategy(),
    ) {
        let value_row = |text: &str| {
            (0..widths.len())
                .map(|i| (key(i), Value::String(text.to_string())))
                .collect::<Row>()
        };
        let mut state = state(&widths, 0, Viewport::new(vp.x, 0.0, vp.width, 400.0), 0);
        let mut text = measurer(&widths)
            .with_width("first", f64::from(first))
            .with_width("second", f64::from(second));
        let mut cells = CellMeasurer::new();

        state.set_rows(vec![value_row("first")]);
        cells.compute_visible_bounding_boxes(&state, &mut text);
        let before: Vec<Option<f64>> = (0..widths.len()).map(|i| cells.column_width(&key(i))).collect();

        state.set_rows(vec![value_row("second")]);
        cells.compute_visible_bounding_boxes(&state, &mut text);
        for (i, old) in before.iter().enumerate() {
            if let Some(old) = old {
                let new = cells.column_width(&key(i)).unwrap();
                prop_assert!(new >= *old, "column {} shrank from {} to {}", i, old, new);
            }
        }
    }
}
