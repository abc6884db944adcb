//! Shape generation for confetti pieces

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::{ConfettiPiece, PieceShape};

/// Segments used to approximate a round piece
const CIRCLE_SEGMENTS: usize = 10;
/// Strips are this fraction of their nominal height
const STRIP_ASPECT: f32 = 0.25;

/// Fallback color when the palette is empty
const FALLBACK_COLOR: [f32; 4] = [1.0, 0.42, 0.42, 1.0];

/// Triangle-list vertices (pixel space) for every confetti piece
pub fn confetti_vertices(pieces: &[ConfettiPiece], palette: &[[f32; 4]]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(pieces.len() * 6);
    for piece in pieces {
        let color = palette
            .get(piece.color as usize % palette.len().max(1))
            .copied()
            .unwrap_or(FALLBACK_COLOR);
        match piece.shape {
            PieceShape::Square => rotated_rect(&mut vertices, piece.pos, piece.size, piece.rotation, color),
            PieceShape::Strip => {
                let size = Vec2::new(piece.size.x, piece.size.y * STRIP_ASPECT);
                rotated_rect(&mut vertices, piece.pos, size, piece.rotation, color);
            }
            PieceShape::Circle => circle(&mut vertices, piece.pos, piece.size.x / 2.0, color),
        }
    }
    vertices
}

/// Two triangles for a rectangle of `size` centered on `center`
fn rotated_rect(out: &mut Vec<Vertex>, center: Vec2, size: Vec2, rotation: f32, color: [f32; 4]) {
    let rot = Vec2::from_angle(rotation);
    let half = size / 2.0;
    let corner = |x: f32, y: f32| {
        let p = center + rot.rotate(Vec2::new(x, y));
        Vertex::new(p.x, p.y, color)
    };
    let (a, b, c, d) = (
        corner(-half.x, -half.y),
        corner(half.x, -half.y),
        corner(half.x, half.y),
        corner(-half.x, half.y),
    );
    out.extend_from_slice(&[a, b, c, a, c, d]);
}

/// Triangle fan (as a list) approximating a circle
fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    let mid = Vertex::new(center.x, center.y, color);
    for i in 0..CIRCLE_SEGMENTS {
        let a0 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let a1 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let p0 = center + Vec2::from_angle(a0) * radius;
        let p1 = center + Vec2::from_angle(a1) * radius;
        out.push(mid);
        out.push(Vertex::new(p0.x, p0.y, color));
        out.push(Vertex::new(p1.x, p1.y, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(shape: PieceShape, color: u32) -> ConfettiPiece {
        ConfettiPiece {
            pos: Vec2::new(100.0, 50.0),
            vel: Vec2::ZERO,
            size: Vec2::new(10.0, 8.0),
            rotation: 0.0,
            spin: 0.0,
            color,
            shape,
        }
    }

    #[test]
    fn test_vertex_counts() {
        let palette = [[1.0, 0.0, 0.0, 1.0]];
        let pieces = [
            piece(PieceShape::Square, 0),
            piece(PieceShape::Strip, 0),
            piece(PieceShape::Circle, 0),
        ];
        let verts = confetti_vertices(&pieces, &palette);
        assert_eq!(verts.len(), 6 + 6 + CIRCLE_SEGMENTS * 3);
    }

    #[test]
    fn test_unrotated_square_bounds() {
        let verts = confetti_vertices(&[piece(PieceShape::Square, 0)], &[[0.0, 1.0, 0.0, 1.0]]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|x| (*x - 95.0).abs() < 1e-4 || (*x - 105.0).abs() < 1e-4));
        assert!(ys.iter().all(|y| (*y - 46.0).abs() < 1e-4 || (*y - 54.0).abs() < 1e-4));
    }

    #[test]
    fn test_palette_lookup_wraps() {
        let palette = [[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]];
        let verts = confetti_vertices(&[piece(PieceShape::Square, 3)], &palette);
        assert_eq!(verts[0].color, palette[1]);

        let verts = confetti_vertices(&[piece(PieceShape::Square, 3)], &[]);
        assert_eq!(verts[0].color, FALLBACK_COLOR);
    }
}
