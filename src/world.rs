use std::time::Instant;

use crate::{
    collision::{
        broadphase::BroadPhase, contact::ContactManifold, narrowphase::NarrowPhase,
        pair_cache::PairCache,
    },
    config::{PhysicsConfig, DEFAULT_TIME_STEP},
    core::{
        body_set::{BodyHandle, BodySet},
        filter::{should_collide, CollisionFilter, CollisionFilterFn},
        rigidbody::RigidBody,
    },
    dynamics::{integrator::Integrator, solver::ContactSolver},
    utils::{
        logging::{warn_if_frame_budget_exceeded, ScopedTimer},
        profiling::StepProfile,
    },
};

/// Central simulation container orchestrating all subsystems.
///
/// Each step runs, in order: broad phase, pair filtering and
/// deduplication, narrow phase, the first force half step, solver
/// initialization, impulse sweeps, pose integration with the second force
/// half step, positional correction and force clearing, followed by the
/// optional removal of bodies that left the world bounds.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: BodySet,
    broadphase: BroadPhase,
    narrowphase: NarrowPhase,
    pair_cache: PairCache,
    solver: ContactSolver,
    integrator: Integrator,
    contacts: Vec<ContactManifold>,
    collision_filter: Box<CollisionFilterFn>,
    time_accumulated: f32,
    frame_budget_ms: Option<f32>,
    profile: StepProfile,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("config", &self.config)
            .field("bodies", &self.bodies.len())
            .field("contacts", &self.contacts.len())
            .finish_non_exhaustive()
    }
}

impl PhysicsWorld {
    pub fn new(mut config: PhysicsConfig) -> Self {
        if !config.time_step.is_finite() || config.time_step <= 0.0 {
            log::warn!(
                "invalid time step {}, falling back to {DEFAULT_TIME_STEP}",
                config.time_step
            );
            config.time_step = DEFAULT_TIME_STEP;
        }

        Self {
            bodies: BodySet::new(),
            broadphase: BroadPhase::new(config.bounds),
            narrowphase: NarrowPhase::new(config.epsilon),
            pair_cache: PairCache::new(),
            solver: ContactSolver::from_config(&config),
            integrator: Integrator::new(config.effective_gravity()),
            contacts: Vec::new(),
            collision_filter: Box::new(should_collide),
            time_accumulated: 0.0,
            frame_budget_ms: None,
            profile: StepProfile::default(),
            config,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        log::debug!("added body {handle:?}");
        handle
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let removed = self.bodies.remove(handle);
        if removed.is_some() {
            self.contacts.retain(|m| m.body_a != handle && m.body_b != handle);
            log::debug!("removed body {handle:?}");
        }
        removed
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Manifolds found during the last step.
    pub fn contacts(&self) -> &[ContactManifold] {
        &self.contacts
    }

    /// Replaces the pair eligibility rule.
    pub fn set_collision_filter<F>(&mut self, filter: F)
    where
        F: Fn(&CollisionFilter, &CollisionFilter) -> bool + Send + Sync + 'static,
    {
        self.collision_filter = Box::new(filter);
    }

    pub fn reset_collision_filter(&mut self) {
        self.collision_filter = Box::new(should_collide);
    }

    /// Warn whenever a step takes longer than `budget_ms`.
    pub fn set_frame_budget(&mut self, budget_ms: Option<f32>) {
        self.frame_budget_ms = budget_ms;
    }

    pub fn last_profile(&self) -> &StepProfile {
        &self.profile
    }

    /// Advances by the configured time step.
    pub fn step(&mut self) {
        self.step_with_dt(self.config.time_step);
    }

    /// Runs as many fixed steps as fit into the accumulated `elapsed` time
    /// and returns how many were taken.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if elapsed > 0.0 {
            self.time_accumulated += elapsed;
        }
        let mut steps = 0;
        while self.time_accumulated >= self.config.time_step {
            self.time_accumulated -= self.config.time_step;
            self.step();
            steps += 1;
        }
        steps
    }

    /// Advances by `dt`. A zero (or negative) `dt` leaves the world untouched.
    pub fn step_with_dt(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            log::debug!("skipping step with dt {dt}");
            return;
        }

        let started = Instant::now();
        let mut profile = StepProfile {
            body_count: self.bodies.len(),
            ..StepProfile::default()
        };

        self.contacts.clear();
        self.pair_cache.clear();

        {
            let _timer = ScopedTimer::recording("broad_phase", &mut profile.broad_phase_time);
            let candidates = self.broadphase.get_potential_pairs(&self.bodies);
            profile.candidate_pairs = candidates.len();

            for (a, b) in candidates {
                let (Some(body_a), Some(body_b)) = (self.bodies.get(a), self.bodies.get(b)) else {
                    continue;
                };
                if body_a.is_static() && body_b.is_static() {
                    continue;
                }
                if !(self.collision_filter)(&body_a.filter, &body_b.filter) {
                    profile.filtered_pairs += 1;
                    continue;
                }
                self.pair_cache.insert(a, b);
            }
        }

        {
            let _timer = ScopedTimer::recording("narrow_phase", &mut profile.narrow_phase_time);
            for &(a, b) in self.pair_cache.pairs() {
                let (Some(body_a), Some(body_b)) = (self.bodies.get(a), self.bodies.get(b)) else {
                    continue;
                };
                let manifold = self.narrowphase.collide(body_a, body_b);
                if manifold.is_colliding() {
                    self.contacts.push(manifold);
                }
            }
            profile.manifold_count = self.contacts.len();
            profile.contact_count = self.contacts.iter().map(ContactManifold::contact_count).sum();
        }

        {
            let _timer = ScopedTimer::recording("forces", &mut profile.integrator_time);
            self.integrator.integrate_all_forces(&mut self.bodies, dt);
        }

        {
            let _timer = ScopedTimer::recording("solver", &mut profile.solver_time);
            let metrics = self.solver.solve(
                &mut self.contacts,
                &mut self.bodies,
                dt,
                self.config.effective_gravity(),
            );
            profile.resting_manifolds = metrics.resting_contacts;
        }

        {
            let _timer = ScopedTimer::recording("integrator", &mut profile.integrator_time);
            self.integrator.integrate_all_velocities(&mut self.bodies, dt);
        }

        {
            let _timer = ScopedTimer::recording("positional_correction", &mut profile.solver_time);
            for manifold in &self.contacts {
                self.solver.positional_correction(manifold, &mut self.bodies);
            }
        }

        for body in self.bodies.iter_mut() {
            body.clear_forces();
        }

        if self.config.remove_out_of_bounds {
            profile.removed_bodies = self.clear_out_of_bounds_bodies();
        }

        profile.total_step_time = started.elapsed();
        if let Some(budget) = self.frame_budget_ms {
            warn_if_frame_budget_exceeded(profile.total_step_time, budget);
        }
        profile.report();
        self.profile = profile;
    }

    fn clear_out_of_bounds_bodies(&mut self) -> usize {
        let bounds = self.config.bounds;
        let removed = self.bodies.retain(|body| bounds.contains_point(body.position));
        if removed.is_empty() {
            return 0;
        }
        log::warn!("removed {} bodies that left the world bounds", removed.len());
        let bodies = &self.bodies;
        self.contacts.retain(|m| bodies.contains(m.body_a) && bodies.contains(m.body_b));
        removed.len()
    }
}
