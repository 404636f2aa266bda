//! Scrolling window onto the map

use crate::consts::VIEWPORT_MARGIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Scroll one axis so `pos` stays `VIEWPORT_MARGIN` cells inside the window
fn follow_axis(origin: usize, size: usize, pos: usize, map_size: usize) -> usize {
    let max_origin = map_size.saturating_sub(size);
    let origin = if pos < origin + VIEWPORT_MARGIN {
        pos.saturating_sub(VIEWPORT_MARGIN)
    } else if pos + VIEWPORT_MARGIN >= origin + size {
        (pos + VIEWPORT_MARGIN + 1).saturating_sub(size)
    } else {
        origin
    };
    origin.min(max_origin)
}

impl Viewport {
    /// Window of `width × height` cells (shrunk to fit the map), centred on `(px, py)`
    pub fn centered(
        width: usize,
        height: usize,
        px: usize,
        py: usize,
        map_width: usize,
        map_height: usize,
    ) -> Self {
        let width = width.clamp(1, map_width.max(1));
        let height = height.clamp(1, map_height.max(1));
        // floor(p - size / 2) in whole cells, so odd sizes lean left/up
        Self {
            x: ((2 * px).saturating_sub(width) / 2).min(map_width.saturating_sub(width)),
            y: ((2 * py).saturating_sub(height) / 2).min(map_height.saturating_sub(height)),
            width,
            height,
        }
    }

    /// Scroll only when the player nears an edge
    pub fn follow(&mut self, px: usize, py: usize, map_width: usize, map_height: usize) {
        self.x = follow_axis(self.x, self.width, px, map_width);
        self.y = follow_axis(self.y, self.height, py, map_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_scroll_inside_margin() {
        let mut vp = Viewport { x: 10, y: 10, width: 20, height: 20 };
        vp.follow(20, 20, 100, 100);
        assert_eq!((vp.x, vp.y), (10, 10));
    }

    #[test]
    fn test_scrolls_near_edges() {
        let mut vp = Viewport { x: 10, y: 10, width: 20, height: 20 };
        // Left margin: keep 5 cells before the player
        vp.follow(14, 20, 100, 100);
        assert_eq!(vp.x, 9);
        // Right margin: player.x - width + 6
        let mut vp = Viewport { x: 10, y: 10, width: 20, height: 20 };
        vp.follow(25, 25, 100, 100);
        assert_eq!((vp.x, vp.y), (11, 11));
    }

    #[test]
    fn test_scroll_clamped_to_map() {
        let mut vp = Viewport { x: 0, y: 0, width: 20, height: 20 };
        vp.follow(2, 2, 100, 100);
        assert_eq!((vp.x, vp.y), (0, 0));
        let mut vp = Viewport { x: 80, y: 80, width: 20, height: 20 };
        vp.follow(99, 99, 100, 100);
        assert_eq!((vp.x, vp.y), (80, 80));
    }

    #[test]
    fn test_centered_shrinks_to_map() {
        let vp = Viewport::centered(50, 40, 3, 3, 10, 8);
        assert_eq!(vp, Viewport { x: 0, y: 0, width: 10, height: 8 });
        let vp = Viewport::centered(10, 10, 50, 50, 100, 100);
        assert_eq!((vp.x, vp.y), (45, 45));
    }

    #[test]
    fn test_centered_odd_size_rounds_down() {
        let vp = Viewport::centered(11, 9, 50, 50, 100, 100);
        assert_eq!((vp.x, vp.y), (44, 45));
        let vp = Viewport::centered(11, 11, 5, 0, 100, 100);
        assert_eq!((vp.x, vp.y), (0, 0));
    }

    proptest! {
        #[test]
        fn prop_viewport_stays_on_map(
            map_w in 1usize..200,
            map_h in 1usize..200,
            w in 1usize..60,
            h in 1usize..60,
            moves in prop::collection::vec((0usize..200, 0usize..200), 1..50),
        ) {
            let mut vp = Viewport::centered(w, h, 0, 0, map_w, map_h);
            for (px, py) in moves {
                let (px, py) = (px.min(map_w - 1), py.min(map_h - 1));
                vp.follow(px, py, map_w, map_h);
                prop_assert!(vp.x + vp.width <= map_w);
                prop_assert!(vp.y + vp.height <= map_h);
            }
        }
    }
}
