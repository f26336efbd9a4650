use std::collections::HashMap;
use std::f32::consts::PI;

use eframe::egui::{Pos2, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::content::WordId;
use crate::util::stable_seed;

use super::RelationKind;

const CURVE_SAMPLES: usize = 10;

/// Perpendicular displacement parameters for one piece of a wave line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSegment {
    pub amplitude: f32,
    /// In `[-1, 1)`; sign picks the side of the straight line.
    pub direction: f32,
    pub irregularity: f32,
    pub frequency: f32,
}

impl WaveSegment {
    pub fn offset(&self) -> f32 {
        self.amplitude * self.direction * self.irregularity * self.frequency
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaveKey {
    pub source: WordId,
    pub target: WordId,
    pub kind: RelationKind,
}

impl WaveKey {
    pub fn seed(&self) -> u64 {
        stable_seed(&[self.source, self.target], self.kind.tag())
    }
}

/// Wave parameters per line, generated on first use and kept for the
/// lifetime of the process.
#[derive(Debug, Default)]
pub struct WavePathCache {
    segments: HashMap<WaveKey, Vec<WaveSegment>>,
}

impl WavePathCache {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Cached segments for `key`. The piece count is fixed by the on-screen
    /// distance at first use.
    pub fn segments(&mut self, key: WaveKey, distance: f32, segment_length: f32) -> &[WaveSegment] {
        self.segments
            .entry(key)
            .or_insert_with(|| generate_segments(key, distance, segment_length))
    }

    /// Wave path between two screen points, or the straight form when they
    /// are closer than `straight_below`.
    pub fn path(
        &mut self,
        key: WaveKey,
        start: Pos2,
        end: Pos2,
        straight_below: f32,
        segment_length: f32,
    ) -> LinePath {
        let distance = start.distance(end);
        if distance < straight_below || distance <= f32::EPSILON {
            return LinePath::straight(start, end);
        }
        let segments = self.segments(key, distance, segment_length);
        LinePath::wave(start, end, segments)
    }
}

fn generate_segments(key: WaveKey, distance: f32, segment_length: f32) -> Vec<WaveSegment> {
    let count = ((distance / segment_length.max(1.0)).floor() as usize).max(3);
    let (base, variation) = key.kind.amplitude_range();
    let mut rng = SmallRng::seed_from_u64(key.seed());

    (1..=count)
        .map(|index| {
            let phase = index as f32 * PI * 2.0 + rng.random::<f32>() * PI;
            WaveSegment {
                amplitude: base + rng.random::<f32>() * variation,
                direction: (rng.random::<f32>() - 0.5) * 2.0,
                irregularity: 0.7 + rng.random::<f32>() * 0.6,
                frequency: 1.0 + phase.sin() * 0.3,
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Pos2),
    /// Quadratic Bezier.
    Quad { control: Pos2, to: Pos2 },
    /// Smooth cubic: the first control point reflects the previous smooth
    /// segment's second control point, or is the current point otherwise.
    Smooth { control: Pos2, to: Pos2 },
    LineTo(Pos2),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinePath {
    pub commands: Vec<PathCommand>,
}

impl LinePath {
    pub fn straight(start: Pos2, end: Pos2) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(start), PathCommand::LineTo(end)],
        }
    }

    fn wave(start: Pos2, end: Pos2, segments: &[WaveSegment]) -> Self {
        let delta = end - start;
        let distance = delta.length();
        let normal = Vec2::new(-delta.y / distance, delta.x / distance);
        let count = segments.len() as f32;

        let mut commands = Vec::with_capacity(segments.len() + 2);
        commands.push(PathCommand::MoveTo(start));
        for (index, segment) in segments.iter().enumerate() {
            let t = (index + 1) as f32 / count;
            let base = start + delta * t;
            let offset = normal * segment.offset();

            if index == 0 {
                commands.push(PathCommand::Quad {
                    control: base + offset,
                    to: base,
                });
            } else {
                let previous = start + delta * (index as f32 / count);
                let midpoint = previous + (base - previous) * 0.5;
                commands.push(PathCommand::Smooth {
                    control: midpoint + offset * 0.5,
                    to: base,
                });
            }
        }
        commands.push(PathCommand::LineTo(end));

        Self { commands }
    }

    #[cfg(test)]
    pub fn is_straight(&self) -> bool {
        self.commands
            .iter()
            .all(|command| matches!(command, PathCommand::MoveTo(_) | PathCommand::LineTo(_)))
    }

    /// Polyline approximation for painting and hit testing.
    pub fn flatten(&self) -> Vec<Pos2> {
        let mut points = Vec::new();
        let mut current = Pos2::ZERO;
        let mut last_cubic_control: Option<Pos2> = None;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(to) => {
                    points.push(to);
                    current = to;
                    last_cubic_control = None;
                }
                PathCommand::LineTo(to) => {
                    points.push(to);
                    current = to;
                    last_cubic_control = None;
                }
                PathCommand::Quad { control, to } => {
                    for step in 1..=CURVE_SAMPLES {
                        let t = step as f32 / CURVE_SAMPLES as f32;
                        points.push(quadratic_point(current, control, to, t));
                    }
                    current = to;
                    last_cubic_control = None;
                }
                PathCommand::Smooth { control, to } => {
                    let first = last_cubic_control
                        .map(|previous| current + (current - previous))
                        .unwrap_or(current);
                    for step in 1..=CURVE_SAMPLES {
                        let t = step as f32 / CURVE_SAMPLES as f32;
                        points.push(cubic_point(current, first, control, to, t));
                    }
                    current = to;
                    last_cubic_control = Some(control);
                }
            }
        }

        points.dedup();
        points
    }

    pub fn distance_to(&self, point: Pos2) -> f32 {
        let points = self.flatten();
        match points.as_slice() {
            [] => f32::INFINITY,
            [only] => only.distance(point),
            _ => points
                .windows(2)
                .map(|pair| segment_distance(pair[0], pair[1], point))
                .fold(f32::INFINITY, f32::min),
        }
    }
}

fn quadratic_point(p0: Pos2, p1: Pos2, p2: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let v = p0.to_vec2() * (u * u) + p1.to_vec2() * (2.0 * u * t) + p2.to_vec2() * (t * t);
    v.to_pos2()
}

fn cubic_point(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let v = p0.to_vec2() * (u * u * u)
        + p1.to_vec2() * (3.0 * u * u * t)
        + p2.to_vec2() * (3.0 * u * t * t)
        + p3.to_vec2() * (t * t * t);
    v.to_pos2()
}

fn segment_distance(a: Pos2, b: Pos2, point: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq <= f32::EPSILON {
        return a.distance(point);
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(point)
}
