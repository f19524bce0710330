use crate::config::{CORNER_INSET, WRAP_MARGIN};

/// Axis-aligned rectangle, top-left anchored. Doors and hit areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn square(x: i32, y: i32, size: i32) -> Self {
        Self::new(x, y, size, size)
    }
}

/// Movable square body: integer position, velocity, and scene bounds.
///
/// Every moving thing in the scene (player, monsters) is one of these.
/// Invariant: outside an explicit `wrap`, the top-left corner stays inside
/// `[0, bound - size]` on both axes after any mutation.
#[derive(Debug, Clone)]
pub struct Body {
    x: i32,
    y: i32,
    vx: i32,
    vy: i32,
    size: i32,
    speed: i32,
    bound_w: i32,
    bound_h: i32,
}

impl Body {
    pub fn new(size: i32, speed: i32, bound_w: i32, bound_h: i32) -> Self {
        let mut body = Self {
            x: 0,
            y: 0,
            vx: 0,
            vy: 0,
            size,
            speed,
            bound_w: size,
            bound_h: size,
        };
        body.update_bounds(bound_w, bound_h);
        body
    }

    /// Resize the area the body may occupy and pull it back inside.
    pub fn update_bounds(&mut self, bound_w: i32, bound_h: i32) {
        self.bound_w = bound_w.max(self.size);
        self.bound_h = bound_h.max(self.size);
        self.clamp();
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.clamp();
    }

    pub fn set_velocity(&mut self, vx: i32, vy: i32) {
        self.vx = vx;
        self.vy = vy;
    }

    /// Step toward a target point at the body's base speed.
    pub fn follow(&mut self, target_x: i32, target_y: i32) {
        self.follow_at(target_x, target_y, self.speed);
    }

    /// Step toward a target point at a custom speed. Velocity is set per
    /// axis to `sign(target - self) * speed`, so diagonal approach covers
    /// more ground per tick than a straight one. Intentional.
    pub fn follow_at(&mut self, target_x: i32, target_y: i32, speed: i32) {
        self.vx = (target_x - self.x).signum() * speed;
        self.vy = (target_y - self.y).signum() * speed;
    }

    /// Integrate the current velocity into position, clamped.
    pub fn apply_velocity(&mut self) {
        self.move_by(self.vx, self.vy);
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
        self.clamp();
    }

    /// Clip position back inside the scene bounds.
    pub fn clamp(&mut self) {
        self.x = self.x.clamp(0, self.bound_w - self.size);
        self.y = self.y.clamp(0, self.bound_h - self.size);
    }

    /// Teleport to the opposite edge once the body has left the scene
    /// entirely, re-entering `WRAP_MARGIN` pixels inside the new edge.
    /// Partially visible bodies are left alone.
    pub fn wrap(&mut self) {
        if self.x + self.size < 0 {
            self.x = self.bound_w - self.size - WRAP_MARGIN;
        } else if self.x > self.bound_w {
            self.x = WRAP_MARGIN;
        }

        if self.y + self.size < 0 {
            self.y = self.bound_h - self.size - WRAP_MARGIN;
        } else if self.y > self.bound_h {
            self.y = WRAP_MARGIN;
        }
    }

    /// Resolve an existing overlap with `rect` by exiting through the
    /// shallowest penetration side, landing one pixel clear.
    pub fn push_outside(&mut self, rect: Rect) {
        if !self.intersects(rect) {
            return;
        }

        let overlap_left = self.x + self.size - rect.x;
        let overlap_right = rect.x + rect.w - self.x;
        let overlap_top = self.y + self.size - rect.y;
        let overlap_bottom = rect.y + rect.h - self.y;

        let min_overlap = overlap_left
            .min(overlap_right)
            .min(overlap_top)
            .min(overlap_bottom);

        if min_overlap == overlap_left {
            self.x = rect.x - self.size - 1;
        } else if min_overlap == overlap_right {
            self.x = rect.x + rect.w + 1;
        } else if min_overlap == overlap_top {
            self.y = rect.y - self.size - 1;
        } else {
            self.y = rect.y + rect.h + 1;
        }

        self.clamp();
    }

    /// AABB overlap test against a rectangle.
    pub fn intersects(&self, rect: Rect) -> bool {
        self.x < rect.x + rect.w
            && self.x + self.size > rect.x
            && self.y < rect.y + rect.h
            && self.y + self.size > rect.y
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.intersects(other.hitbox())
    }

    /// Squared distance from this body's center to a point. Range checks
    /// compare against squared radii; nothing here ever takes a root.
    pub fn distance_squared_to(&self, px: i32, py: i32) -> i32 {
        let dx = px - self.center_x();
        let dy = py - self.center_y();
        dx * dx + dy * dy
    }

    pub fn center_on_bounds(&mut self) {
        self.set_position(
            self.bound_w / 2 - self.size / 2,
            self.bound_h / 2 - self.size / 2,
        );
    }

    /// Drop the body at one of the four scene corners, inset by
    /// `CORNER_INSET`, chosen uniformly.
    pub fn spawn_at_corner(&mut self, rng: &mut fastrand::Rng) {
        let x = if rng.bool() {
            CORNER_INSET
        } else {
            (self.bound_w - self.size - CORNER_INSET).max(0)
        };
        let y = if rng.bool() {
            CORNER_INSET
        } else {
            (self.bound_h - self.size - CORNER_INSET).max(0)
        };
        self.set_position(x, y);
    }

    pub fn hitbox(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.size / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.size / 2
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn velocity(&self) -> (i32, i32) {
        (self.vx, self.vy)
    }

    pub fn bound_w(&self) -> i32 {
        self.bound_w
    }

    pub fn bound_h(&self) -> i32 {
        self.bound_h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Body {
        Body::new(32, 2, 800, 600)
    }

    #[test]
    fn set_position_clamps_to_bounds() {
        let mut b = body();
        b.set_position(-50, 700);
        assert_eq!((b.x(), b.y()), (0, 600 - 32));
    }

    #[test]
    fn follow_steps_by_sign_per_axis() {
        let mut b = body();
        b.set_position(100, 100);
        b.follow(400, 100);
        assert_eq!(b.velocity(), (2, 0));

        b.follow(0, 400);
        assert_eq!(b.velocity(), (-2, 2));

        b.follow(100, 100);
        assert_eq!(b.velocity(), (0, 0));
    }

    #[test]
    fn apply_velocity_stays_in_bounds() {
        let mut b = body();
        b.set_position(0, 0);
        b.set_velocity(-5, -5);
        b.apply_velocity();
        assert_eq!((b.x(), b.y()), (0, 0));
    }

    #[test]
    fn wrap_only_when_fully_outside() {
        let mut b = body();
        b.x = -10; // partially visible
        b.wrap();
        assert_eq!(b.x(), -10);

        b.x = -33; // fully out on the left
        b.wrap();
        assert_eq!(b.x(), 800 - 32 - WRAP_MARGIN);

        b.x = 801; // past the right edge
        b.wrap();
        assert_eq!(b.x(), WRAP_MARGIN);
    }

    #[test]
    fn wrap_vertical_edges() {
        let mut b = body();
        b.y = -40;
        b.wrap();
        assert_eq!(b.y(), 600 - 32 - WRAP_MARGIN);

        b.y = 601;
        b.wrap();
        assert_eq!(b.y(), WRAP_MARGIN);
    }

    #[test]
    fn push_outside_exits_shallowest_side() {
        let door = Rect::square(100, 100, 48);

        // Overlapping the left edge of the door: shallowest exit is left.
        let mut b = body();
        b.set_position(74, 110);
        b.push_outside(door);
        assert_eq!(b.x(), 100 - 32 - 1);
        assert_eq!(b.y(), 110);

        // Mostly below: exits downward.
        let mut b = body();
        b.set_position(110, 140);
        b.push_outside(door);
        assert_eq!(b.y(), 100 + 48 + 1);
        assert_eq!(b.x(), 110);
    }

    #[test]
    fn push_outside_ignores_non_overlap() {
        let mut b = body();
        b.set_position(500, 500);
        b.push_outside(Rect::square(100, 100, 48));
        assert_eq!((b.x(), b.y()), (500, 500));
    }

    #[test]
    fn distance_squared_is_center_to_point() {
        let mut b = body();
        b.set_position(100, 100); // center (116, 116)
        assert_eq!(b.distance_squared_to(116, 116), 0);
        assert_eq!(b.distance_squared_to(119, 120), 9 + 16);
    }

    #[test]
    fn corner_spawn_lands_on_an_inset_corner() {
        let mut rng = fastrand::Rng::with_seed(7);
        let expected_x = [CORNER_INSET, 800 - 32 - CORNER_INSET];
        let expected_y = [CORNER_INSET, 600 - 32 - CORNER_INSET];

        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let mut b = body();
            b.spawn_at_corner(&mut rng);
            assert!(expected_x.contains(&b.x()));
            assert!(expected_y.contains(&b.y()));
            seen.insert((b.x(), b.y()));
        }
        // 64 draws with a fair coin per axis hit all four corners.
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn bounds_never_collapse_below_size() {
        let mut b = Body::new(32, 2, 10, 10);
        assert_eq!((b.bound_w(), b.bound_h()), (32, 32));
        b.set_position(100, 100);
        assert_eq!((b.x(), b.y()), (0, 0));
    }
}
