// FICHIER : src-core/src/training/clock.rs

use crate::utils::config::TimingConfig;

/// Horloge d'un niveau : temps écoulé, timeout et bascule en mode visionnage.
///
/// Le compteur de redémarrages appartient à l'horloge (et non à un état global) :
/// deux entraînements parallèles ne partagent rien.
#[derive(Debug, Clone)]
pub struct TrialClock {
    time_scale: f32,
    timeout_eval: f32,
    timeout_view: f32,
    view_every: u32,
    step_seconds: f32,
    restarts: u64,
    force_view: bool,
    viewing: bool,
    // f64 : en f32, un pas de 0.02 s n'avance plus au-delà de 2^19 s
    elapsed: f64,
    timeout: f32,
}

impl TrialClock {
    pub fn new(config: &TimingConfig) -> Self {
        Self {
            time_scale: config.time_scale,
            timeout_eval: config.timeout_eval,
            timeout_view: config.timeout_view,
            view_every: config.view_every,
            step_seconds: config.step_seconds,
            restarts: 0,
            force_view: false,
            viewing: false,
            elapsed: 0.0,
            timeout: config.timeout_eval,
        }
    }

    /// Démarre un niveau et renvoie `true` s'il se joue en visionnage.
    ///
    /// Visionnage si `restarts` est un multiple non nul de `view_every`, ou sur demande.
    pub fn begin_level(&mut self) -> bool {
        self.elapsed = 0.0;
        let scheduled = self.restarts > 0
            && self
                .restarts
                .checked_rem(u64::from(self.view_every))
                .is_some_and(|r| r == 0);

        if scheduled || self.force_view {
            self.viewing = true;
            self.timeout = self.timeout_view;
            self.force_view = false;
            tracing::debug!("Niveau {} en visionnage", self.restarts);
        } else {
            self.viewing = false;
            self.timeout = self.timeout_eval;
        }
        self.viewing
    }

    /// Avance d'un pas de simulation ; `true` quand le timeout est atteint.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += f64::from(dt);
        self.elapsed >= f64::from(self.timeout)
    }

    pub fn record_restart(&mut self) {
        self.restarts += 1;
    }

    /// Le prochain niveau sera joué en visionnage.
    pub fn request_view(&mut self) {
        self.force_view = true;
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        if scale > 0.0 {
            self.time_scale = scale;
        } else {
            tracing::warn!("Échelle de temps ignorée : {}", scale);
        }
    }

    pub fn set_eval_timeout(&mut self, timeout: f32) {
        if !(timeout > 0.0 && timeout.is_finite()) {
            tracing::warn!("Timeout d'évaluation ignoré : {}", timeout);
            return;
        }
        self.timeout_eval = timeout;
        self.timeout = timeout;
    }

    /// Accélération effective : temps réel en visionnage.
    pub fn time_scale(&self) -> f32 {
        if self.viewing {
            1.0
        } else {
            self.time_scale
        }
    }

    pub fn is_viewing(&self) -> bool {
        self.viewing
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn timeout(&self) -> f32 {
        self.timeout
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn step_seconds(&self) -> f32 {
        self.step_seconds
    }

    pub fn status_line(&self) -> String {
        format!("Time: {:.2} {}", self.elapsed, self.restarts)
    }
}

impl Default for TrialClock {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}
