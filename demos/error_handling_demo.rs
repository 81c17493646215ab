// demos/error_handling_demo.rs
use snowball_sde::error::ScenarioError;
use snowball_sde::paths::{generate_path, PricePath};
use snowball_sde::product::{ObservationStyle, ProductTerms};
use snowball_sde::scenario::{evaluate, evaluate_what_if, WhatIf};

fn main() {
    println!("Error Handling Demo for snowball-sde");
    println!("====================================\n");

    // Test 1: Knock-in barrier above knock-out barrier
    println!("1. Testing inverted barriers...");
    match ProductTerms::builder()
        .knock_in_barrier(110.0)
        .knock_out_barrier(105.0)
        .build()
    {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Unparseable term label
    println!("\n2. Testing an unparseable term...");
    match ProductTerms::builder().term_label("two years") {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Unknown observation style
    println!("\n3. Testing an unknown observation style...");
    match "hourly".parse::<ObservationStyle>() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Zero-period simulation
    println!("\n4. Testing a zero-period simulation...");
    match generate_path(0, 0.0, 0.2, 12, Some(1)) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Path shorter than the note's term
    println!("\n5. Testing a path shorter than the term...");
    let terms = ProductTerms::builder().term(24).build().expect("Valid terms");
    let short = PricePath::from_prices(vec![100.0; 13]).expect("Valid path");
    match evaluate(&short, &terms) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(ScenarioError::InvalidPath { reason }) => println!("   ✓ Caught path error: {}", reason),
        Err(e) => println!("   Unexpected error kind: {}", e),
    }

    // Test 6: What-if knock-out after maturity
    println!("\n6. Testing a what-if knock-out at maturity...");
    match evaluate_what_if(&terms, &WhatIf::EarlyKnockOut { knock_out_period: 24 }) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Valid analysis
    println!("\n7. Testing a valid analysis...");
    let path = generate_path(24, 0.0, 0.2, 12, Some(42)).expect("Valid simulation");
    match evaluate(&path, &terms) {
        Ok(result) => println!("   ✓ {}: {:.4}%", result.narrative, result.terminal_payoff),
        Err(e) => println!("   Unexpected error: {}", e),
    }
}
