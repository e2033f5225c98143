//! Collision detection for the bird against pipes and the playfield bounds
//!
//! The bird is a circle, pipes are two axis-aligned rectangles around a gap.
//! A bird overlapping a pipe horizontally survives only if its vertical
//! extent stays within the gap. Touching a gap edge is not a hit.

use glam::Vec2;

use super::state::Pipe;

/// Check whether the bird hits any of `pipes`.
///
/// `bird` is the circle center in pixels. Returns on the first pipe whose
/// horizontal span overlaps the bird and whose gap does not contain it.
pub fn collides(pipes: &[Pipe], pipe_width: f32, height: f32, bird: Vec2, radius: f32) -> bool {
    for pipe in pipes {
        if pipe.right(pipe_width) < bird.x - radius || pipe.x > bird.x + radius {
            continue;
        }
        let (top_edge, bottom_edge) = pipe.gap_edges_px(height);
        if bird.y - radius < top_edge || bird.y + radius > bottom_edge {
            return true;
        }
    }
    false
}

/// Check whether the bird touches the ceiling or the floor
#[inline]
pub fn touches_bounds(bird_y: f32, radius: f32, height: f32) -> bool {
    bird_y - radius <= 0.0 || bird_y + radius >= height
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f32 = 500.0;
    const PIPE_WIDTH: f32 = 60.0;

    fn pipe_at(x: f32, gap_center_y: f32) -> Pipe {
        Pipe {
            x,
            gap_center_y,
            gap_height: 0.2,
            scored: false,
        }
    }

    #[test]
    fn test_no_horizontal_overlap() {
        // Gap far away vertically, but pipe is right of the bird
        let pipes = [pipe_at(200.0, 0.1)];
        assert!(!collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 250.0), 10.0));

        // Pipe fully left of the bird
        let pipes = [pipe_at(20.0, 0.1)];
        assert!(!collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 250.0), 10.0));
    }

    #[test]
    fn test_inside_gap() {
        // Gap spans [200, 300] px
        let pipes = [pipe_at(90.0, 0.5)];
        assert!(!collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 250.0), 10.0));
    }

    #[test]
    fn test_hits_top_and_bottom_pipe() {
        let pipes = [pipe_at(90.0, 0.5)];
        assert!(collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 205.0), 10.0));
        assert!(collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 295.0), 10.0));
    }

    #[test]
    fn test_touching_gap_edge_survives() {
        // Gap spans [200, 300] px: top of the bird exactly on 200, then bottom on 300
        let pipes = [pipe_at(90.0, 0.5)];
        assert!(!collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 210.0), 10.0));
        assert!(!collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 290.0), 10.0));
        assert!(collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 209.5), 10.0));
        assert!(collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 290.5), 10.0));
    }

    #[test]
    fn test_edge_overlap_counts() {
        // Bird's right edge just reaches the pipe's left edge
        let pipes = [pipe_at(110.0, 0.1)];
        assert!(collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 250.0), 10.0));
    }

    #[test]
    fn test_any_pipe_collides() {
        let pipes = [pipe_at(300.0, 0.5), pipe_at(90.0, 0.9)];
        assert!(collides(&pipes, PIPE_WIDTH, HEIGHT, Vec2::new(100.0, 250.0), 10.0));
    }

    #[test]
    fn test_touches_bounds() {
        assert!(touches_bounds(10.0, 10.0, HEIGHT));
        assert!(touches_bounds(490.0, 10.0, HEIGHT));
        assert!(!touches_bounds(250.0, 10.0, HEIGHT));
        assert!(!touches_bounds(10.5, 10.0, HEIGHT));
    }
}
