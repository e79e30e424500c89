//! Vector primitives rasterized straight onto a [`Pixmap`](crate::Pixmap).
//!
//! Every primitive clips: pixels that fall outside the canvas are skipped
//! without error. Colours are clamped to the image's max value.

use alloc::vec::Vec;
use rgb::RGB8;

use crate::image::Image;

/// A canvas coordinate. May lie outside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer `n / d` rounded half away from zero. `d` must be positive and the
/// quotient must fit in `i64`.
#[inline]
fn div_round(n: i128, d: i128) -> i64 {
    debug_assert!(d > 0);
    let (q, r) = (n / d, n % d);
    let q = if 2 * r.abs() >= d { q + n.signum() } else { q };
    q as i64
}

/// X where the edge `a -> b` crosses row `y`. Needs `a.1 != b.1`.
#[inline]
fn edge_x(a: (i64, i64), b: (i64, i64), y: i64) -> i64 {
    let (lo, hi) = if a.1 < b.1 { (a, b) } else { (b, a) };
    let run = i128::from(hi.0 - lo.0) * i128::from(y - lo.1);
    lo.0 + div_round(run, i128::from(hi.1 - lo.1))
}

/// Step indices `0..=steps` at which `start + delta * i / steps` can round
/// into `0..len`, padded by one step on each side.
fn visible_steps(start: i64, delta: i64, steps: i64, len: i64) -> Option<(i64, i64)> {
    if delta == 0 {
        return (0..len).contains(&start).then_some((0, steps));
    }
    let steps_w = i128::from(steps);
    let a = i128::from(-1 - start) * steps_w / i128::from(delta);
    let b = i128::from(len - start) * steps_w / i128::from(delta);
    let lo = (a.min(b) - 1).max(0);
    let hi = (a.max(b) + 1).min(steps_w);
    (lo <= hi).then(|| (lo as i64, hi as i64))
}

#[inline]
fn wide(p: Point) -> (i64, i64) {
    (i64::from(p.x), i64::from(p.y))
}

impl Image<RGB8> {
    fn clamp_color(&self, color: RGB8) -> RGB8 {
        let max = self.max_value().unwrap_or(u8::MAX);
        RGB8::new(color.r.min(max), color.g.min(max), color.b.min(max))
    }

    fn plot(&mut self, x: i64, y: i64, color: RGB8) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(px) = self.parts_mut().1.get_mut(x, y) {
            *px = color;
        }
    }

    /// Horizontal run from `xa` to `xb` inclusive, in either order.
    fn span(&mut self, xa: i64, xb: i64, y: i64, color: RGB8) {
        if y < 0 || y >= i64::from(self.height()) {
            return;
        }
        let lo = xa.min(xb).max(0);
        let hi = xa.max(xb).min(i64::from(self.width()) - 1);
        for x in lo..=hi {
            self.plot(x, y, color);
        }
    }

    fn line(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: RGB8) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.plot(x0, y0, color);
            return;
        }
        let Some((xa, xb)) = visible_steps(x0, dx, steps, i64::from(self.width())) else {
            return;
        };
        let Some((ya, yb)) = visible_steps(y0, dy, steps, i64::from(self.height())) else {
            return;
        };
        let steps_w = i128::from(steps);
        for i in xa.max(ya)..=xb.min(yb) {
            let i = i128::from(i);
            self.plot(
                x0 + div_round(i128::from(dx) * i, steps_w),
                y0 + div_round(i128::from(dy) * i, steps_w),
                color,
            );
        }
    }

    /// Straight line from `p1` to `p2`, both endpoints included.
    pub fn draw_line(&mut self, p1: Point, p2: Point, color: RGB8) {
        log::trace!("line {p1:?} -> {p2:?}");
        let color = self.clamp_color(color);
        self.line(wide(p1), wide(p2), color);
    }

    /// Outline of the `width` x `height` box whose top-left pixel is `origin`.
    pub fn draw_rectangle(&mut self, origin: Point, width: i32, height: i32, color: RGB8) {
        if width <= 0 || height <= 0 {
            return;
        }
        let color = self.clamp_color(color);
        let (x0, y0) = wide(origin);
        let x1 = x0 + i64::from(width) - 1;
        let y1 = y0 + i64::from(height) - 1;
        self.line((x0, y0), (x1, y0), color);
        self.line((x1, y0), (x1, y1), color);
        self.line((x1, y1), (x0, y1), color);
        self.line((x0, y1), (x0, y0), color);
    }

    /// Fill the `width` x `height` box whose top-left pixel is `origin`.
    pub fn draw_filled_rectangle(&mut self, origin: Point, width: i32, height: i32, color: RGB8) {
        if width <= 0 || height <= 0 {
            return;
        }
        let color = self.clamp_color(color);
        let (x0, y0) = wide(origin);
        let x1 = x0 + i64::from(width) - 1;
        let top = y0.max(0);
        let bottom = (y0 + i64::from(height) - 1).min(i64::from(self.height()) - 1);
        for y in top..=bottom {
            self.span(x0, x1, y, color);
        }
    }

    /// One-pixel ring (midpoint circle). Radius 0 plots the centre.
    pub fn draw_circle(&mut self, center: Point, radius: i32, color: RGB8) {
        if radius < 0 {
            return;
        }
        let (cx, cy) = wide(center);
        let r = i64::from(radius);
        if cx + r < 0
            || cy + r < 0
            || cx - r >= i64::from(self.width())
            || cy - r >= i64::from(self.height())
        {
            return;
        }
        let color = self.clamp_color(color);
        let mut x = r;
        let mut y = 0i64;
        let mut err = 1 - x;
        while x >= y {
            for (ox, oy) in [(x, y), (y, x)] {
                self.plot(cx + ox, cy + oy, color);
                self.plot(cx - ox, cy + oy, color);
                self.plot(cx + ox, cy - oy, color);
                self.plot(cx - ox, cy - oy, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Every pixel with `dx² + dy² <= radius²`.
    pub fn draw_filled_circle(&mut self, center: Point, radius: i32, color: RGB8) {
        if radius < 0 {
            return;
        }
        let color = self.clamp_color(color);
        let (cx, cy) = wide(center);
        let r = i64::from(radius);
        let first = (-r).max(-cy);
        let last = r.min(i64::from(self.height()) - 1 - cy);
        for dy in first..=last {
            let half = (r * r - dy * dy).isqrt();
            self.span(cx - half, cx + half, cy + dy, color);
        }
    }

    pub fn draw_triangle(&mut self, p1: Point, p2: Point, p3: Point, color: RGB8) {
        let color = self.clamp_color(color);
        let (a, b, c) = (wide(p1), wide(p2), wide(p3));
        self.line(a, b, color);
        self.line(b, c, color);
        self.line(c, a, color);
    }

    /// Scanline fill between the long edge (top to bottom vertex) and the
    /// short edges, then the outline on top.
    pub fn draw_filled_triangle(&mut self, p1: Point, p2: Point, p3: Point, color: RGB8) {
        let color = self.clamp_color(color);
        let mut v = [wide(p1), wide(p2), wide(p3)];
        v.sort_by_key(|p| p.1);
        let [top, mid, bottom] = v;

        if top.1 == bottom.1 {
            let lo = top.0.min(mid.0).min(bottom.0);
            let hi = top.0.max(mid.0).max(bottom.0);
            self.span(lo, hi, top.1, color);
            return;
        }

        let first = top.1.max(0);
        let last = bottom.1.min(i64::from(self.height()) - 1);
        for y in first..=last {
            let long = edge_x(top, bottom, y);
            let short = if mid.1 > top.1 && y <= mid.1 {
                edge_x(top, mid, y)
            } else {
                edge_x(mid, bottom, y)
            };
            self.span(long, short, y, color);
        }

        self.line(top, mid, color);
        self.line(mid, bottom, color);
        self.line(bottom, top, color);
    }

    /// Closed outline through `points`.
    pub fn draw_polygon(&mut self, points: &[Point], color: RGB8) {
        let color = self.clamp_color(color);
        match points {
            [] => {}
            [only] => {
                let (x, y) = wide(*only);
                self.plot(x, y, color);
            }
            _ => {
                for (i, &p) in points.iter().enumerate() {
                    let next = points[(i + 1) % points.len()];
                    self.line(wide(p), wide(next), color);
                }
            }
        }
    }

    /// Even-odd scanline fill of the polygon through `points`, outline included.
    pub fn draw_filled_polygon(&mut self, points: &[Point], color: RGB8) {
        if points.len() < 3 {
            self.draw_polygon(points, color);
            return;
        }
        let color = self.clamp_color(color);
        let pts: Vec<(i64, i64)> = points.iter().copied().map(wide).collect();

        let (min_y, max_y) = pts
            .iter()
            .fold((i64::MAX, i64::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
        let first = min_y.max(0);
        let last = max_y.min(i64::from(self.height()) - 1);

        let mut crossings = Vec::with_capacity(pts.len());
        for y in first..=last {
            crossings.clear();
            for (i, &a) in pts.iter().enumerate() {
                let b = pts[(i + 1) % pts.len()];
                if a.1 == b.1 {
                    continue;
                }
                let (lo, hi) = (a.1.min(b.1), a.1.max(b.1));
                if lo <= y && y < hi {
                    crossings.push(edge_x(a, b, y));
                }
            }
            crossings.sort_unstable();
            for pair in crossings.chunks_exact(2) {
                self.span(pair[0], pair[1], y, color);
            }
        }

        self.draw_polygon(points, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixmap;
    use crate::pnm::Encoding;

    const RED: RGB8 = RGB8::new(255, 0, 0);

    fn canvas(w: u32, h: u32) -> Pixmap {
        Pixmap::new(w, h, 255, Encoding::Ascii).unwrap()
    }

    fn painted(img: &Pixmap) -> usize {
        img.raster().samples().iter().filter(|&&p| p == RED).count()
    }

    fn is_red(img: &Pixmap, x: u32, y: u32) -> bool {
        img.at(x, y).unwrap() == RED
    }

    #[test]
    fn rounding_division() {
        assert_eq!(div_round(3, 2), 2);
        assert_eq!(div_round(-3, 2), -2);
        assert_eq!(div_round(1, 3), 0);
        assert_eq!(div_round(-1, 3), 0);
        assert_eq!(div_round(0, 7), 0);
    }

    #[test]
    fn degenerate_line_is_one_pixel() {
        let mut img = canvas(3, 3);
        img.draw_line(Point::new(1, 1), Point::new(1, 1), RED);
        assert_eq!(painted(&img), 1);
        assert!(is_red(&img, 1, 1));
    }

    #[test]
    fn shallow_line_covers_every_column() {
        let mut img = canvas(8, 3);
        img.draw_line(Point::new(0, 0), Point::new(7, 2), RED);
        for x in 0..8 {
            assert!((0..3).any(|y| is_red(&img, x, y)), "column {x}");
        }
        assert_eq!(painted(&img), 8);
    }

    #[test]
    fn lines_clip_at_the_edges() {
        let mut img = canvas(4, 4);
        img.draw_line(Point::new(-5, -5), Point::new(10, 10), RED);
        assert_eq!(painted(&img), 4);
        for i in 0..4 {
            assert!(is_red(&img, i, i));
        }
    }

    #[test]
    fn rectangle_outline_and_fill_share_bounds() {
        let mut outline = canvas(5, 5);
        outline.draw_rectangle(Point::new(0, 0), 4, 3, RED);
        assert_eq!(painted(&outline), 10);
        assert!(is_red(&outline, 3, 2));
        assert!(!is_red(&outline, 4, 0));
        assert!(!is_red(&outline, 1, 1));

        let mut filled = canvas(5, 5);
        filled.draw_filled_rectangle(Point::new(1, 1), 2, 3, RED);
        assert_eq!(painted(&filled), 6);
        assert!(is_red(&filled, 2, 3));
        assert!(!is_red(&filled, 3, 1));
    }

    #[test]
    fn empty_rectangles_draw_nothing() {
        let mut img = canvas(3, 3);
        img.draw_rectangle(Point::new(0, 0), 0, 3, RED);
        img.draw_filled_rectangle(Point::new(0, 0), 3, -1, RED);
        assert_eq!(painted(&img), 0);
    }

    #[test]
    fn circle_is_a_thin_ring() {
        let mut img = canvas(5, 5);
        img.draw_circle(Point::new(2, 2), 2, RED);
        assert_eq!(painted(&img), 12);
        for (x, y) in [(4, 2), (0, 2), (2, 0), (2, 4), (3, 0), (0, 1)] {
            assert!(is_red(&img, x, y), "({x}, {y})");
        }
        assert!(!is_red(&img, 2, 2));
        assert!(!is_red(&img, 0, 0));
    }

    #[test]
    fn circles_off_the_canvas_draw_nothing() {
        let mut img = canvas(4, 4);
        img.draw_circle(Point::new(i32::MIN, i32::MIN), i32::MAX, RED);
        img.draw_circle(Point::new(i32::MAX, 1), 1_000_000, RED);
        img.draw_circle(Point::new(1, -3), 2, RED);
        assert_eq!(painted(&img), 0);

        // bounding box touching the edge still draws
        img.draw_circle(Point::new(-2, 1), 2, RED);
        assert!(is_red(&img, 0, 1));
    }

    #[test]
    fn filled_circle_of_radius_one_is_a_plus() {
        let mut img = canvas(3, 3);
        img.draw_filled_circle(Point::new(1, 1), 1, RED);
        assert_eq!(painted(&img), 5);
        assert!(!is_red(&img, 0, 0));
        assert!(is_red(&img, 1, 0));
    }

    #[test]
    fn filled_triangle_with_flat_top() {
        let mut img = canvas(5, 5);
        img.draw_filled_triangle(Point::new(0, 0), Point::new(4, 0), Point::new(0, 4), RED);
        assert_eq!(painted(&img), 15);
        assert!(is_red(&img, 1, 3));
        assert!(!is_red(&img, 2, 3));
    }

    #[test]
    fn filled_triangle_with_flat_bottom() {
        let mut img = canvas(5, 5);
        img.draw_filled_triangle(Point::new(2, 0), Point::new(0, 4), Point::new(4, 4), RED);
        for x in 0..5 {
            assert!(is_red(&img, x, 4));
        }
        assert!(is_red(&img, 2, 2));
        assert!(!is_red(&img, 0, 0));
    }

    #[test]
    fn collinear_triangle_is_a_span() {
        let mut img = canvas(5, 2);
        img.draw_filled_triangle(Point::new(3, 1), Point::new(0, 1), Point::new(1, 1), RED);
        assert_eq!(painted(&img), 4);
    }

    #[test]
    fn filled_square_polygon_matches_rectangle() {
        let mut poly = canvas(5, 5);
        poly.draw_filled_polygon(
            &[
                Point::new(1, 1),
                Point::new(3, 1),
                Point::new(3, 3),
                Point::new(1, 3),
            ],
            RED,
        );
        let mut rect = canvas(5, 5);
        rect.draw_filled_rectangle(Point::new(1, 1), 3, 3, RED);
        assert_eq!(poly, rect);
    }

    #[test]
    fn concave_polygon_leaves_notch_empty() {
        let mut img = canvas(5, 5);
        img.draw_filled_polygon(
            &[
                Point::new(0, 0),
                Point::new(4, 0),
                Point::new(4, 4),
                Point::new(3, 4),
                Point::new(3, 1),
                Point::new(1, 1),
                Point::new(1, 4),
                Point::new(0, 4),
            ],
            RED,
        );
        assert!(is_red(&img, 0, 3));
        assert!(is_red(&img, 4, 3));
        assert!(is_red(&img, 2, 1));
        assert!(!is_red(&img, 2, 2));
        assert!(!is_red(&img, 2, 3));
    }

    #[test]
    fn polygon_outline_closes_the_loop() {
        let mut img = canvas(4, 4);
        img.draw_polygon(
            &[Point::new(0, 0), Point::new(3, 0), Point::new(0, 3)],
            RED,
        );
        assert!(is_red(&img, 0, 2));
        assert!(is_red(&img, 2, 1));
        assert!(!is_red(&img, 1, 1));

        let mut empty = canvas(2, 2);
        empty.draw_polygon(&[], RED);
        empty.draw_filled_polygon(&[], RED);
        assert_eq!(painted(&empty), 0);
    }

    #[test]
    fn colours_clamp_to_max_value() {
        let mut img = Pixmap::new(1, 1, 15, Encoding::Binary).unwrap();
        img.draw_line(Point::new(0, 0), Point::new(0, 0), RGB8::new(200, 3, 15));
        assert_eq!(img.at(0, 0).unwrap(), RGB8::new(15, 3, 15));
    }
}
