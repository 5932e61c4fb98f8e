//! Performance simulator tests.

use wfm_core::simulator::{
    PerformanceSimulator, Rating, SimulatorInputs, OVERWORKED_RECOMMENDATION,
    SLA_RECOMMENDATION, UNDERUSED_RECOMMENDATION, WAIT_RECOMMENDATION,
};

fn inputs(agent_count: u32, calls_per_hour: f64) -> SimulatorInputs {
    SimulatorInputs { agent_count, calls_per_hour }
}

#[test]
fn default_scenario_predictions() {
    let sim = PerformanceSimulator::default();
    let defaults = sim.default_inputs();
    assert_eq!(defaults, inputs(45, 1200.0));

    // 40 agents break even, five spare.
    let view = sim.simulate(defaults);
    assert_eq!(view.metrics.sla, 92.5);
    assert_eq!(view.metrics.wait_time, 20);
    assert_eq!(view.metrics.occupancy, 89);

    assert_eq!(view.sla.rating, Rating::Good);
    assert_eq!(view.sla.recommendation, None);
    assert_eq!(view.wait_time.rating, Rating::Good);
    assert_eq!(view.wait_time.recommendation, None);
    assert_eq!(view.occupancy.rating, Rating::Warning);
    assert_eq!(view.occupancy.recommendation, Some(OVERWORKED_RECOMMENDATION));
}

#[test]
fn understaffed_floor_hits_every_clamp() {
    let sim = PerformanceSimulator::default();
    let view = sim.simulate(inputs(20, 2000.0));

    assert_eq!(view.metrics.sla, 10.0);
    assert!(view.metrics.wait_time > 60);
    assert_eq!(view.metrics.occupancy, 100);

    assert_eq!(view.sla.rating, Rating::Critical);
    assert_eq!(view.wait_time.rating, Rating::Critical);
    assert_eq!(view.occupancy.rating, Rating::Critical);
    assert_eq!(view.sla.recommendation, Some(SLA_RECOMMENDATION));
    assert_eq!(view.wait_time.recommendation, Some(WAIT_RECOMMENDATION));
    assert_eq!(view.occupancy.recommendation, Some(OVERWORKED_RECOMMENDATION));
}

#[test]
fn overstaffed_floor_is_underutilized() {
    let sim = PerformanceSimulator::default();
    let view = sim.simulate(inputs(80, 500.0));

    assert_eq!(view.metrics.sla, 99.9);
    assert_eq!(view.metrics.wait_time, 5);
    assert_eq!(view.metrics.occupancy, 40);
    assert_eq!(view.occupancy.rating, Rating::Critical);
    assert_eq!(view.occupancy.recommendation, Some(UNDERUSED_RECOMMENDATION));
}

#[test]
fn sla_is_reported_to_one_decimal() {
    let sim = PerformanceSimulator::default();
    // base 1210/30 = 40.333.., surplus 4.666.. -> 91.666.. -> 91.7
    let metrics = sim.predict(&inputs(45, 1210.0));
    assert_eq!(metrics.sla, 91.7);
}

#[test]
fn slider_clamps() {
    let sim = PerformanceSimulator::default();

    assert_eq!(sim.clamp_agents(5), 20);
    assert_eq!(sim.clamp_agents(45), 45);
    assert_eq!(sim.clamp_agents(200), 80);

    assert_eq!(sim.clamp_calls(10.0), 500.0);
    assert_eq!(sim.clamp_calls(1234.0), 1250.0);
    assert_eq!(sim.clamp_calls(1220.0), 1200.0);
    assert_eq!(sim.clamp_calls(5000.0), 2000.0);
    assert_eq!(sim.clamp_calls(f64::NAN), 500.0);
}

#[test]
fn rating_band_edges() {
    assert_eq!(Rating::for_sla(90.0), Rating::Good);
    assert_eq!(Rating::for_sla(89.9), Rating::Warning);
    assert_eq!(Rating::for_sla(80.0), Rating::Warning);
    assert_eq!(Rating::for_sla(79.9), Rating::Critical);

    assert_eq!(Rating::for_wait_time(29), Rating::Good);
    assert_eq!(Rating::for_wait_time(30), Rating::Warning);
    assert_eq!(Rating::for_wait_time(60), Rating::Warning);
    assert_eq!(Rating::for_wait_time(61), Rating::Critical);

    assert_eq!(Rating::for_occupancy(59), Rating::Critical);
    assert_eq!(Rating::for_occupancy(60), Rating::Warning);
    assert_eq!(Rating::for_occupancy(70), Rating::Good);
    assert_eq!(Rating::for_occupancy(85), Rating::Good);
    assert_eq!(Rating::for_occupancy(86), Rating::Warning);
    assert_eq!(Rating::for_occupancy(90), Rating::Warning);
    assert_eq!(Rating::for_occupancy(91), Rating::Critical);
}

#[test]
fn more_agents_never_hurt_predictions() {
    let sim = PerformanceSimulator::default();
    let mut prev = sim.predict(&inputs(20, 1200.0));
    for agents in 21..=80 {
        let next = sim.predict(&inputs(agents, 1200.0));
        assert!(next.sla >= prev.sla);
        assert!(next.wait_time <= prev.wait_time);
        assert!(next.occupancy <= prev.occupancy);
        prev = next;
    }
}
