// demos/demo.rs
use snowball_sde::mc::{simulate_scenarios, McScenarioConfig};
use snowball_sde::output;
use snowball_sde::paths::{generate_path, PathConfig, PricePath};
use snowball_sde::product::{ObservationStyle, ProductTerms};
use snowball_sde::scenario::{evaluate, evaluate_what_if, ScenarioKind, WhatIf};

fn main() {
    println!("Running snowball-sde Scenario Demo\n");

    let terms = ProductTerms::builder()
        .term(24)
        .knock_out_barrier(105.0)
        .knock_in_barrier(70.0)
        .coupon_rate(5.0)
        .knock_in_observation(ObservationStyle::Daily)
        .build()
        .expect("Valid terms");

    println!("Product terms:");
    for (name, value) in terms.summary() {
        println!("  {:<22} {}", name, value);
    }

    // One simulated path
    let path = generate_path(terms.term(), 0.0, 0.2, 12, Some(42)).expect("Valid simulation");
    let evaluation = evaluate(&path, &terms).expect("Path covers the term");
    println!("\nSimulated path (seed 42):");
    for event in &evaluation.events {
        println!("  {:?} at period {} (price {:.2})", event.kind, event.period, event.price);
    }
    println!("  Scenario: {}", evaluation.scenario.label());
    println!("  Terminal payoff: {:.4}%", evaluation.terminal_payoff);
    println!("  {}", evaluation.narrative);

    // Observed closes, normalised to 100 at inception
    let closes: Vec<f64> = (0..=24)
        .map(|m| 4000.0 * (1.0 - 0.015 * m as f64))
        .collect();
    let observed = PricePath::from_observed(&closes).expect("Valid closes");
    let observed_eval = evaluate(&observed, &terms).expect("Path covers the term");
    println!("\nSteadily falling market:");
    println!("  {}", observed_eval.narrative);
    println!("  Terminal payoff: {:.4}%", observed_eval.terminal_payoff);

    // What-if scenarios
    println!("\nWhat-if scenarios:");
    for label in [
        "early_knock_out",
        "maturity_no_event",
        "knock_in_no_knock_out",
        "knock_in_then_knock_out",
    ] {
        let what_if = WhatIf::defaults_for(label, &terms).expect("Known scenario");
        let result = evaluate_what_if(&terms, &what_if).expect("Valid timings");
        println!("  {:<26} {:>9.4}%  {}", label, result.terminal_payoff, result.narrative);
    }

    // Scenario distribution
    let cfg = McScenarioConfig {
        paths: 100_000,
        path: PathConfig {
            term_periods: terms.term(),
            seed: Some(12345),
            ..Default::default()
        },
    };
    let dist = simulate_scenarios(&cfg, &terms).expect("Valid configuration");
    println!("\nScenario distribution over {} paths:", dist.paths);
    println!("  Early knock-out:        {:.4}", dist.frequency(ScenarioKind::EarlyKnockOut));
    println!("  Maturity, no event:     {:.4}", dist.frequency(ScenarioKind::MaturityNoEvent));
    println!("  Knock-in, no knock-out: {:.4}", dist.frequency(ScenarioKind::KnockInNoKnockOut));
    println!(
        "  Terminal payoff:        {:.4} ± {:.4}",
        dist.mean_terminal_payoff, dist.std_terminal_payoff
    );

    match output::write_series_to_csv("snowball_series.csv", Some(&path), &evaluation.payoff) {
        Ok(()) => println!("\nPath and payoff series written to snowball_series.csv"),
        Err(e) => eprintln!("\nCould not write series: {}", e),
    }
}
