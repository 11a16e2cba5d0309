mod common;

// Déclaration des sous-modules situés dans le dossier /scenario_suite/
pub mod scenario_suite {
    pub mod optimizing_flow_test;
    pub mod population_test;
    pub mod training_flow_test;
}
