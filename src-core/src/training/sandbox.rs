// FICHIER : src-core/src/training/sandbox.rs

use super::clock::TrialClock;
use super::simulation::{Simulation, TrialEvent, TrialReport};
use crate::genetics::traits::Policy;
use crate::scenario::record::{Checkpoint, Pose};

const GRAVITY: f32 = -30.0;
const MOVE_SPEED: f32 = 6.0;
const JUMP_SPEED: f32 = 12.0;
const MAX_FALL_SPEED: f32 = 20.0;
const PICKUP_RADIUS: f32 = 0.75;
const COIN_REWARD: f32 = 10.0;
const GOAL_REWARD: f32 = 100.0;
const SENSOR_SCALE: f32 = 20.0;
const MIN_STEP: f32 = 1e-3;

const SENSORS: usize = 8;
const ACTUATORS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub checkpoint: Checkpoint,
    pub position: (f32, f32),
}

/// Parcours 2-D déterministe : sol plat, gravité, saut, pièces puis objectif.
///
/// Capteurs : `[x, y, vx, vy, au_sol, dx, dy, biais]` (dx/dy vers le prochain
/// checkpoint du parcours). Actionneurs : `[déplacement, saut]`.
///
/// Score d'un checkpoint : récompense (10 par pièce, 100 pour l'objectif) moins
/// le temps écoulé. Sur timeout : moins la distance au prochain checkpoint.
#[derive(Debug, Clone)]
pub struct CourseSimulation {
    start: Pose,
    ground_y: f32,
    bounds: (f32, f32),
    targets: Vec<Target>,
    collected: Vec<bool>,
    pose: Pose,
}

impl CourseSimulation {
    pub fn new(start: Pose, ground_y: f32, bounds: (f32, f32), targets: Vec<Target>) -> Self {
        let collected = vec![false; targets.len()];
        Self {
            start,
            ground_y,
            bounds,
            targets,
            collected,
            pose: start,
        }
    }

    /// Niveau de référence : trois pièces (dont une en hauteur) puis l'objectif.
    pub fn standard() -> Self {
        let start = Pose {
            position: (0.0, 0.0),
            facing_right: true,
            grounded: true,
            ..Default::default()
        };
        let targets = vec![
            Target {
                checkpoint: Checkpoint::coin("Coin (1)"),
                position: (3.0, 0.5),
            },
            Target {
                checkpoint: Checkpoint::coin("Coin (2)"),
                position: (7.0, 2.0),
            },
            Target {
                checkpoint: Checkpoint::coin("Coin (3)"),
                position: (11.0, 0.5),
            },
            Target {
                checkpoint: Checkpoint::Goal,
                position: (16.0, 0.5),
            },
        ];
        Self::new(start, 0.0, (-5.0, 25.0), targets)
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn remaining(&self) -> usize {
        self.collected.iter().filter(|c| !**c).count()
    }

    /// Premier checkpoint non ramassé, dans l'ordre du parcours.
    fn next_target(&self) -> Option<&Target> {
        self.targets
            .iter()
            .zip(&self.collected)
            .find(|(_, done)| !**done)
            .map(|(t, _)| t)
    }

    fn distance_to(&self, target: &Target) -> f32 {
        let dx = target.position.0 - self.pose.position.0;
        let dy = target.position.1 - self.pose.position.1;
        (dx * dx + dy * dy).sqrt()
    }

    fn sensors(&self) -> Vec<f32> {
        let p = &self.pose;
        let (dx, dy) = self
            .next_target()
            .map(|t| (t.position.0 - p.position.0, t.position.1 - p.position.1))
            .unwrap_or((0.0, 0.0));
        vec![
            p.position.0 / SENSOR_SCALE,
            p.position.1 / SENSOR_SCALE,
            p.velocity_x / MOVE_SPEED,
            p.velocity_y / JUMP_SPEED,
            if p.grounded { 1.0 } else { 0.0 },
            dx / SENSOR_SCALE,
            dy / SENSOR_SCALE,
            1.0,
        ]
    }

    fn step(&mut self, actions: &[f32], dt: f32) {
        let movement = actions.first().copied().unwrap_or(0.0).clamp(-1.0, 1.0);
        let wants_jump = actions.get(1).copied().unwrap_or(0.0) > 0.0;
        let p = &mut self.pose;

        p.velocity_x = movement * MOVE_SPEED;
        if p.velocity_x > 0.0 {
            p.facing_right = true;
        } else if p.velocity_x < 0.0 {
            p.facing_right = false;
        }

        if wants_jump && p.grounded {
            p.velocity_y = JUMP_SPEED;
            p.grounded = false;
            p.jump = true;
        }

        p.velocity_y = (p.velocity_y + GRAVITY * dt).max(-MAX_FALL_SPEED);
        p.position.0 = (p.position.0 + p.velocity_x * dt).clamp(self.bounds.0, self.bounds.1);
        p.position.1 += p.velocity_y * dt;

        if p.position.1 <= self.ground_y {
            p.position.1 = self.ground_y;
            p.velocity_y = 0.0;
            p.grounded = true;
            p.jump = false;
        }
    }

    /// Ramasse le premier checkpoint à portée (n'importe lequel restant).
    fn pickup(&mut self) -> Option<Checkpoint> {
        let index = self
            .targets
            .iter()
            .enumerate()
            .find(|(i, t)| !self.collected[*i] && self.distance_to(t) <= PICKUP_RADIUS)
            .map(|(i, _)| i)?;
        self.collected[index] = true;
        Some(self.targets[index].checkpoint.clone())
    }
}

impl Simulation for CourseSimulation {
    fn sensor_count(&self) -> usize {
        SENSORS
    }

    fn actuator_count(&self) -> usize {
        ACTUATORS
    }

    fn reset(&mut self) {
        self.pose = self.start;
        self.collected.iter_mut().for_each(|c| *c = false);
    }

    fn restore(&mut self, pose: &Pose, collected: &[Checkpoint]) {
        self.pose = *pose;
        for (target, done) in self.targets.iter().zip(self.collected.iter_mut()) {
            *done = collected.contains(&target.checkpoint);
        }
    }

    fn run_trial(&mut self, policy: &dyn Policy, clock: &mut TrialClock) -> TrialReport {
        let dt = clock.step_seconds().max(MIN_STEP);
        loop {
            let actions = policy.act(&self.sensors());
            self.step(&actions, dt);

            if let Some(checkpoint) = self.pickup() {
                let reward = if checkpoint.is_terminal() {
                    GOAL_REWARD
                } else {
                    COIN_REWARD
                };
                return TrialReport {
                    pose: self.pose,
                    score: reward - clock.elapsed(),
                    event: TrialEvent::Reached(checkpoint),
                };
            }

            if clock.tick(dt) {
                let distance = self.next_target().map(|t| self.distance_to(t)).unwrap_or(0.0);
                return TrialReport {
                    pose: self.pose,
                    score: -distance,
                    event: TrialEvent::TimedOut,
                };
            }
        }
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::TimingConfig;

    /// Politique scriptée : va vers la cible, saute sous une cible en hauteur.
    struct Runner;

    impl Policy for Runner {
        fn act(&self, inputs: &[f32]) -> Vec<f32> {
            let dx = inputs[5] * SENSOR_SCALE;
            let dy = inputs[6] * SENSOR_SCALE;
            let movement = if dx > 0.1 {
                1.0
            } else if dx < -0.1 {
                -1.0
            } else {
                0.0
            };
            let jump = if dy > 1.0 && dx.abs() < 2.5 { 1.0 } else { -1.0 };
            vec![movement, jump]
        }
    }

    struct Idle;

    impl Policy for Idle {
        fn act(&self, _inputs: &[f32]) -> Vec<f32> {
            vec![0.0, 0.0]
        }
    }

    fn clock() -> TrialClock {
        let mut c = TrialClock::new(&TimingConfig::default());
        c.begin_level();
        c
    }

    #[test]
    fn test_runner_collects_course_in_order() {
        let mut sim = CourseSimulation::standard();
        let mut names = Vec::new();
        for _ in 0..4 {
            let mut c = clock();
            let report = sim.run_trial(&Runner, &mut c);
            let checkpoint = report.checkpoint().cloned().expect("checkpoint atteint");
            assert!(report.score > 0.0);
            names.push(checkpoint.name().to_string());
        }
        assert_eq!(names, vec!["Coin (1)", "Coin (2)", "Coin (3)", "WinTrigger"]);
        assert_eq!(sim.remaining(), 0);
    }

    #[test]
    fn test_idle_policy_times_out_with_distance_penalty() {
        let mut sim = CourseSimulation::standard();
        let mut c = clock();
        let report = sim.run_trial(&Idle, &mut c);
        assert_eq!(report.event, TrialEvent::TimedOut);
        assert!(report.score < -2.9 && report.score > -3.1);
        assert!(report.pose.grounded);
    }

    #[test]
    fn test_restore_removes_collected_checkpoints() {
        let mut sim = CourseSimulation::standard();
        let pose = Pose {
            position: (3.0, 0.0),
            grounded: true,
            ..Default::default()
        };
        sim.restore(&pose, &[Checkpoint::coin("Coin (1)")]);
        assert_eq!(sim.remaining(), 3);
        assert_eq!(sim.pose().position, (3.0, 0.0));

        let mut c = clock();
        let report = sim.run_trial(&Runner, &mut c);
        assert_eq!(report.checkpoint().map(|c| c.name()), Some("Coin (2)"));

        sim.reset();
        assert_eq!(sim.remaining(), 4);
        assert_eq!(sim.pose().position, (0.0, 0.0));
    }

    #[test]
    fn test_sensor_layout() {
        let sim = CourseSimulation::standard();
        assert_eq!(sim.sensors().len(), sim.sensor_count());
        assert_eq!(sim.actuator_count(), 2);
    }
}
