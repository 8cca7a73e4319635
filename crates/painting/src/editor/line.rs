//! Integer line rasterization for gap-free pencil drags

use glam::IVec2;

/// Bresenham walk over every grid cell between two endpoints, both inclusive
#[derive(Debug, Clone)]
pub struct LineCells {
    current: IVec2,
    end: IVec2,
    delta: IVec2,
    step: IVec2,
    err: i32,
    done: bool,
}

impl LineCells {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        let delta = (end - start).abs();
        let step = IVec2::new(
            if start.x < end.x { 1 } else { -1 },
            if start.y < end.y { 1 } else { -1 },
        );
        Self {
            current: start,
            end,
            delta,
            step,
            err: delta.x - delta.y,
            done: false,
        }
    }
}

/// Clip the segment `start -> end` to the grid grown by one cell on every side.
///
/// Returns None when the segment never comes near the grid. Endpoints already
/// inside the grown box come back unchanged, so the walk only ever covers
/// cells within one step of the grid.
pub fn clip_to_grid(start: IVec2, end: IVec2, width: u32, height: u32) -> Option<(IVec2, IVec2)> {
    let (x0, y0) = (start.x as f64, start.y as f64);
    let (dx, dy) = (end.x as f64 - x0, end.y as f64 - y0);
    let (min_x, max_x) = (-1.0, width as f64);
    let (min_y, max_y) = (-1.0, height as f64);

    // Liang-Barsky: each edge as p * t <= q
    let edges = [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ];
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        IVec2::new(
            (x0 + t * dx).round().clamp(min_x, max_x) as i32,
            (y0 + t * dy).round().clamp(min_y, max_y) as i32,
        )
    };
    let clipped_start = if t0 == 0.0 { start } else { at(t0) };
    let clipped_end = if t1 == 1.0 { end } else { at(t1) };
    Some((clipped_start, clipped_end))
}

impl Iterator for LineCells {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.done {
            return None;
        }

        let cell = self.current;
        if cell == self.end {
            self.done = true;
            return Some(cell);
        }

        let e2 = 2 * self.err;
        if e2 > -self.delta.y {
            self.err -= self.delta.y;
            self.current.x += self.step.x;
        }
        if e2 < self.delta.x {
            self.err += self.delta.x;
            self.current.y += self.step.y;
        }
        Some(cell)
    }
}
