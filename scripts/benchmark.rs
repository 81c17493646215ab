// scripts/benchmark.rs
use snowball_sde::math_utils::Timer;
use snowball_sde::mc::{simulate_scenarios, McScenarioConfig};
use snowball_sde::paths::{generate_path, PathConfig};
use snowball_sde::product::ProductTerms;
use snowball_sde::scenario::evaluate;
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    mean_terminal_payoff: f64,
    knock_out_probability: f64,
}

fn benchmark_terms() -> ProductTerms {
    ProductTerms::builder()
        .term(24)
        .knock_out_barrier(105.0)
        .knock_in_barrier(70.0)
        .coupon_rate(5.0)
        .build()
        .expect("Valid terms")
}

fn run_distribution_benchmarks(terms: &ProductTerms) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();

    for &paths in &[10_000, 100_000, 1_000_000] {
        println!("Running scenario distribution with {} paths...", paths);

        let cfg = McScenarioConfig {
            paths,
            path: PathConfig {
                term_periods: terms.term(),
                seed: Some(42),
                ..Default::default()
            },
        };

        let mut timer = Timer::new();
        timer.start();
        let dist = simulate_scenarios(&cfg, terms).expect("Valid configuration");
        let time_ms = timer.elapsed_ms();

        results.push(BenchmarkResult {
            name: "Scenario Distribution (parallel)".to_string(),
            paths,
            time_ms,
            throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
            mean_terminal_payoff: dist.mean_terminal_payoff,
            knock_out_probability: dist.knock_out_probability,
        });
    }

    results
}

fn run_single_path_benchmark(terms: &ProductTerms) -> BenchmarkResult {
    let paths = 100_000;
    println!("Running {} sequential generate + evaluate calls...", paths);

    let mut timer = Timer::new();
    timer.start();
    let mut payoff_sum = 0.0;
    let mut knock_outs = 0usize;
    for i in 0..paths {
        let path = generate_path(terms.term(), 0.0, 0.2, 12, Some(i as u64)).expect("Valid path");
        let evaluation = evaluate(&path, terms).expect("Path covers the term");
        payoff_sum += evaluation.terminal_payoff;
        if evaluation.scenario.knock_out_period().is_some() {
            knock_outs += 1;
        }
    }
    let time_ms = timer.elapsed_ms();

    BenchmarkResult {
        name: "Single Path Evaluate (sequential)".to_string(),
        paths,
        time_ms,
        throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
        mean_terminal_payoff: payoff_sum / paths as f64,
        knock_out_probability: knock_outs as f64 / paths as f64,
    }
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Paths,Time_ms,Throughput_paths_per_sec,Mean_Terminal_Payoff,Knock_Out_Probability"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6},{:.6}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.mean_terminal_payoff,
            result.knock_out_probability
        )?;
    }
    Ok(())
}

fn main() {
    println!("snowball-sde Benchmark Suite");
    println!("============================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let terms = benchmark_terms();
    let mut all_results = run_distribution_benchmarks(&terms);
    all_results.push(run_single_path_benchmark(&terms));

    println!("\n{:=<90}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<90}", "");
    println!(
        "{:<35} {:>9} {:>12} {:>15} {:>10} {:>8}",
        "Benchmark", "Paths", "Time (ms)", "Throughput", "Payoff", "P(KO)"
    );
    println!("{:-<90}", "");
    for result in &all_results {
        println!(
            "{:<35} {:>9} {:>12.2} {:>15.0} {:>10.4} {:>8.4}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.mean_terminal_payoff,
            result.knock_out_probability
        );
    }
    println!("{:=<90}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("\nCould not write {}: {}", filename, e),
    }
}
