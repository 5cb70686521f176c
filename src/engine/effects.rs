//! Ephemeral visual effects: hard-drop trails and line-clear particles.
//!
//! These are presentation-only records. The core emits the triggering events
//! (trail descriptors, cleared rows); this module owns the live records and
//! ages them with the session clock. Nothing here feeds back into the rules.

use crate::core::board::Board;
use crate::core::game::TrailSpec;
use crate::core::rng::SimpleRng;
use crate::types::{MAX_PARTICLES, TRAIL_FADE_MS};

/// Fading column left behind by a hard drop.
#[derive(Debug, Clone, Copy)]
pub struct DropTrail {
    pub x: i8,
    pub start_y: i8,
    pub end_y: i8,
    pub color: (u8, u8, u8),
    pub timer_ms: u32,
}

impl DropTrail {
    /// Remaining intensity in [0, 1].
    pub fn fade(&self) -> f32 {
        self.timer_ms as f32 / TRAIL_FADE_MS as f32
    }
}

/// Spark thrown off a clearing row. Position and velocity are in board-cell
/// units; velocities are per nominal 16 ms frame.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub life: f32,
    decay: f32,
    pub color: (u8, u8, u8),
}

/// Owner of all live effect records.
#[derive(Debug)]
pub struct Effects {
    trails: Vec<DropTrail>,
    particles: Vec<Particle>,
    rng: SimpleRng,
}

impl Effects {
    pub fn new(seed: u32) -> Self {
        Self {
            trails: Vec::new(),
            particles: Vec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn trails(&self) -> &[DropTrail] {
        &self.trails
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.trails.clear();
        self.particles.clear();
    }

    /// Turn hard-drop descriptors into live fading trails.
    pub fn spawn_trails(&mut self, specs: &[TrailSpec]) {
        for spec in specs {
            self.trails.push(DropTrail {
                x: spec.x,
                start_y: spec.start_y,
                end_y: spec.end_y,
                color: spec.kind.color(),
                timer_ms: TRAIL_FADE_MS,
            });
        }
    }

    /// Scatter sparks across the rows about to be cleared, colored by the
    /// cells they fly out of.
    pub fn spawn_clear_particles(&mut self, board: &Board, rows: &[usize]) {
        for &row in rows {
            for x in 0..board.width() as i8 {
                let color = board
                    .get(x, row as i8)
                    .flatten()
                    .map(|kind| kind.color())
                    .unwrap_or((255, 255, 255));
                for _ in 0..3 {
                    if self.particles.len() >= MAX_PARTICLES {
                        return;
                    }
                    self.particles.push(Particle {
                        x: x as f32 + 0.5,
                        y: row as f32 + 0.5,
                        vx: (self.rng.next_f32() - 0.5) * 0.27,
                        vy: (self.rng.next_f32() - 1.0) * 0.2,
                        life: 1.0,
                        decay: 0.02 + self.rng.next_f32() * 0.02,
                        color,
                    });
                }
            }
        }
    }

    /// Age every record by `elapsed_ms`, dropping the dead ones. Velocities
    /// and decay are tuned per 16 ms frame, so scale by the real delta.
    pub fn age(&mut self, elapsed_ms: u32) {
        let steps = elapsed_ms as f32 / 16.0;

        self.trails.retain_mut(|trail| {
            trail.timer_ms = trail.timer_ms.saturating_sub(elapsed_ms);
            trail.timer_ms > 0
        });

        self.particles.retain_mut(|p| {
            p.x += p.vx * steps;
            p.y += p.vy * steps;
            p.vy += 0.005 * steps;
            p.life -= p.decay * steps;
            p.life > 0.0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn trail_spec() -> TrailSpec {
        TrailSpec {
            x: 3,
            start_y: 0,
            end_y: 15,
            kind: PieceKind::T,
        }
    }

    #[test]
    fn trails_fade_out_and_expire() {
        let mut effects = Effects::new(1);
        effects.spawn_trails(&[trail_spec()]);
        assert_eq!(effects.trails().len(), 1);
        assert!((effects.trails()[0].fade() - 1.0).abs() < f32::EPSILON);

        effects.age(TRAIL_FADE_MS / 2);
        assert!(effects.trails()[0].fade() < 1.0);

        effects.age(TRAIL_FADE_MS);
        assert!(effects.trails().is_empty());
    }

    #[test]
    fn particles_spawn_per_cleared_cell_and_die() {
        let mut board = Board::new();
        for x in 0..board.width() as i8 {
            board.set(x, 19, Some(PieceKind::Z));
        }

        let mut effects = Effects::new(1);
        effects.spawn_clear_particles(&board, &[19]);
        assert_eq!(effects.particles().len(), 30);
        assert_eq!(effects.particles()[0].color, PieceKind::Z.color());

        // Max decay 0.04 per step: everything is gone after 25+ steps.
        for _ in 0..60 {
            effects.age(16);
        }
        assert!(effects.particles().is_empty());
    }

    #[test]
    fn particle_population_is_capped() {
        let mut board = Board::new();
        for y in 15..20 {
            for x in 0..board.width() as i8 {
                board.set(x, y, Some(PieceKind::S));
            }
        }

        let mut effects = Effects::new(1);
        // Many rows, repeated spawns: never exceeds the cap.
        for _ in 0..4 {
            effects.spawn_clear_particles(&board, &[15, 16, 17, 18, 19]);
        }
        assert_eq!(effects.particles().len(), MAX_PARTICLES);
    }

    #[test]
    fn clear_drops_everything() {
        let mut effects = Effects::new(1);
        effects.spawn_trails(&[trail_spec()]);
        let board = Board::new();
        effects.spawn_clear_particles(&board, &[19]);
        effects.clear();
        assert!(effects.trails().is_empty());
        assert!(effects.particles().is_empty());
    }
}
