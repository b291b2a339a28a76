//! Scanline sweeps over a sorted edge list.
//!
//! Two sweeps are provided. [`sweep_convex`] keeps exactly two edges and
//! walks them down the shape, which is all a convex polygon needs.
//! [`sweep_nonzero`] keeps an active edge list, re-sorted by x on every
//! row, and emits the runs where the accumulated winding is non-zero.
//!
//! Both sweeps expect edges sorted with [`EdgeList::sort`] and report
//! half-open spans `[x0, x1)` to a [`SpanSink`].
//!
//! [`EdgeList::sort`]: crate::rasterizer_sl_clip::EdgeList::sort

use crate::rasterizer_sl_clip::Edge;

// ============================================================================
// SpanSink
// ============================================================================

/// Receives the covered spans of a sweep, top to bottom.
pub trait SpanSink {
    /// Cover pixels `[x0, x1)` of scanline `y`. `x0 < x1` always holds.
    fn blit_span(&mut self, y: i32, x0: i32, x1: i32);
}

impl<S: SpanSink + ?Sized> SpanSink for &mut S {
    fn blit_span(&mut self, y: i32, x0: i32, x1: i32) {
        (**self).blit_span(y, x0, x1);
    }
}

// ============================================================================
// Convex sweep
// ============================================================================

/// Two-edge sweep for convex shapes.
///
/// When an edge runs out, its successor is the next edge in the sorted
/// list. The sweep ends when an edge runs out and the list is exhausted.
pub fn sweep_convex<S: SpanSink>(edges: &[Edge], sink: &mut S) {
    if edges.len() < 2 {
        return;
    }
    let mut left = edges[0];
    let mut right = edges[1];
    let mut next = 2;
    let mut y = left.top;

    loop {
        while left.bottom <= y {
            let Some(e) = edges.get(next) else { return };
            left = *e;
            next += 1;
        }
        while right.bottom <= y {
            let Some(e) = edges.get(next) else { return };
            right = *e;
            next += 1;
        }

        let top = left.top.max(right.top);
        if y < top {
            y = top;
            continue;
        }

        let (a, b) = (left.x_at(y), right.x_at(y));
        let (x0, x1) = if a <= b { (a, b) } else { (b, a) };
        if x0 < x1 {
            sink.blit_span(y, x0, x1);
        }
        y += 1;
    }
}

// ============================================================================
// Nonzero sweep
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct ActiveEdge {
    idx: usize,
    x: i32,
}

/// Active-edge sweep with the nonzero winding rule.
pub fn sweep_nonzero<S: SpanSink>(edges: &[Edge], sink: &mut S) {
    let Some(first) = edges.first() else { return };
    let mut active: Vec<ActiveEdge> = Vec::with_capacity(8);
    let mut next = 0;
    let mut y = first.top;

    loop {
        while let Some(e) = edges.get(next) {
            if e.top > y {
                break;
            }
            if e.bottom > y {
                active.push(ActiveEdge { idx: next, x: 0 });
            }
            next += 1;
        }

        if active.is_empty() {
            match edges.get(next) {
                Some(e) => {
                    y = e.top;
                    continue;
                }
                None => return,
            }
        }

        for a in active.iter_mut() {
            a.x = edges[a.idx].x_at(y);
        }
        insertion_sort_by_x(&mut active);

        let mut winding = 0;
        let mut start = 0;
        for a in &active {
            let was = winding;
            winding += edges[a.idx].winding;
            if was == 0 && winding != 0 {
                start = a.x;
            } else if was != 0 && winding == 0 && a.x > start {
                sink.blit_span(y, start, a.x);
            }
        }

        y += 1;
        active.retain(|a| edges[a.idx].bottom > y);
    }
}

/// The active list is nearly sorted from one row to the next.
fn insertion_sort_by_x(active: &mut [ActiveEdge]) {
    for i in 1..active.len() {
        let cur = active[i];
        let mut j = i;
        while j > 0 && active[j - 1].x > cur.x {
            active[j] = active[j - 1];
            j -= 1;
        }
        active[j] = cur;
    }
}

// ============================================================================
// Tests
// ============================================================================
