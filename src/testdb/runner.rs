//! Test runner for executing scenarios and generating reports
//!
//! Each scenario gets a fresh [`MockPhotoStore`] and a [`ScreenController`]
//! over it. Steps are played in order, then the store contents, the display
//! state and the last notice are compared with the expected results.

use super::mock_capture::{ScriptedConfirmer, ScriptedPhotoSource};
use super::mock_store::{MockPhotoStore, StoreOperation};
use super::scenarios::{ExpectedResults, ScenarioLibrary, ScenarioStep, TestScenario};
use crate::store::PhotoStore;
use crate::ui::{Notice, ProfileRoute, ScreenController};
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of running a single test scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Whether the test passed
    pub passed: bool,
    /// Execution time
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    /// Number of steps played
    pub steps_run: usize,
    /// Failure reason (if any)
    pub failure_reason: Option<String>,
}

fn as_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(duration.as_secs_f64() * 1000.0)
}

impl ScenarioResult {
    /// Create a new passing result
    pub fn passed(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            duration,
            steps_run: 0,
            failure_reason: None,
        }
    }

    /// Create a new failing result
    pub fn failed(name: &str, duration: Duration, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            duration,
            steps_run: 0,
            failure_reason: Some(reason.to_string()),
        }
    }

    /// Set the number of steps played
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps_run = steps;
        self
    }
}

/// Summary of test run results
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestSummary {
    /// Total scenarios run
    pub total: usize,
    /// Scenarios that passed
    pub passed: usize,
    /// Scenarios that failed
    pub failed: usize,
    /// Total execution time
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub total_duration: Duration,
    /// Individual results in run order
    pub results: Vec<ScenarioResult>,
}

impl TestSummary {
    /// Calculate pass rate as percentage
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Get all failed scenario names
    pub fn failed_scenarios(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Check if every scenario passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for test runner
#[derive(Debug, Clone, Default)]
pub struct TestRunnerConfig {
    /// Whether to run in verbose mode
    pub verbose: bool,
    /// Whether to stop on first failure
    pub fail_fast: bool,
    /// Filter scenarios by name pattern
    pub name_filter: Option<String>,
    /// Directory for a JSON report
    pub report_dir: Option<String>,
}

/// Test runner for executing scenarios
pub struct TestRunner {
    /// Configuration
    config: TestRunnerConfig,
    /// Results from the last run
    results: Vec<ScenarioResult>,
}

impl TestRunner {
    /// Create a new test runner with default configuration
    pub fn new() -> Self {
        Self::with_config(TestRunnerConfig::default())
    }

    /// Create a new test runner with configuration
    pub fn with_config(config: TestRunnerConfig) -> Self {
        Self {
            config,
            results: Vec::new(),
        }
    }

    /// Run all available scenarios
    pub async fn run_all(&mut self) -> TestSummary {
        self.run_scenarios(ScenarioLibrary::all_scenarios()).await
    }

    /// Run scenarios filtered by tag
    pub async fn run_by_tag(&mut self, tag: &str) -> TestSummary {
        self.run_scenarios(ScenarioLibrary::scenarios_by_tag(tag))
            .await
    }

    /// Run a list of scenarios
    pub async fn run_scenarios(&mut self, scenarios: Vec<TestScenario>) -> TestSummary {
        let start = Instant::now();
        self.results.clear();

        let scenarios = self.filter_scenarios(scenarios);

        if self.config.verbose {
            println!("\n╔══════════════════════════════════════════════════════════════╗");
            println!("║                PHOTO PROFILE - SCENARIO RUNNER               ║");
            println!("╚══════════════════════════════════════════════════════════════╝");
            println!("  Running {} scenario(s)\n", scenarios.len());
        }

        for scenario in scenarios {
            let result = self.run_single_scenario(scenario).await;

            if self.config.verbose {
                print_result(&result);
            }

            let should_stop = self.config.fail_fast && !result.passed;
            self.results.push(result);

            if should_stop {
                if self.config.verbose {
                    println!("\n⚠️  Stopping early due to fail-fast mode\n");
                }
                break;
            }
        }

        let summary = TestSummary {
            total: self.results.len(),
            passed: self.results.iter().filter(|r| r.passed).count(),
            failed: self.results.iter().filter(|r| !r.passed).count(),
            total_duration: start.elapsed(),
            results: self.results.clone(),
        };

        if self.config.verbose {
            print_summary(&summary);
        }

        if let Some(ref dir) = self.config.report_dir {
            if let Err(e) = self.generate_json_report(dir, &summary) {
                log::warn!("Could not write test report to {}: {}", dir, e);
            }
        }

        summary
    }

    /// Get all results of the last run
    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    fn filter_scenarios(&self, scenarios: Vec<TestScenario>) -> Vec<TestScenario> {
        match self.config.name_filter {
            Some(ref pattern) => {
                let pattern = pattern.to_lowercase();
                scenarios
                    .into_iter()
                    .filter(|s| s.name.to_lowercase().contains(&pattern))
                    .collect()
            }
            None => scenarios,
        }
    }

    async fn run_single_scenario(&self, scenario: TestScenario) -> ScenarioResult {
        let start = Instant::now();

        if self.config.verbose {
            println!("▶ Running: {} - {}", scenario.name, scenario.description);
        }

        let steps = scenario.steps.len();
        let outcome = execute_scenario(&scenario).await;
        let duration = start.elapsed();

        match outcome {
            Ok(()) => ScenarioResult::passed(&scenario.name, duration).with_steps(steps),
            Err(reason) => {
                ScenarioResult::failed(&scenario.name, duration, &reason).with_steps(steps)
            }
        }
    }

    fn generate_json_report(&self, dir: &str, summary: &TestSummary) -> std::io::Result<()> {
        fs::create_dir_all(dir)?;
        let path = Path::new(dir).join("scenario_report.json");
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, summary)?;

        if self.config.verbose {
            println!("📄 JSON report generated: {}", path.display());
        }
        Ok(())
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Play a scenario against a fresh store and compare the outcome
async fn execute_scenario(scenario: &TestScenario) -> Result<(), String> {
    let store = Arc::new(MockPhotoStore::with_photos(
        scenario.initial_photos.clone(),
        scenario.initial_current.clone(),
    ));
    let mut controller = ScreenController::new(store.clone());
    let mut last_notice: Option<Notice> = None;

    for step in &scenario.steps {
        let notice = match step {
            ScenarioStep::Open(photo) => {
                let route = ProfileRoute {
                    photo_ref: photo.clone(),
                };
                Some(controller.open(route).await)
            }
            ScenarioStep::Receive(photo) => Some(controller.receive_candidate(photo.clone()).await),
            ScenarioStep::CancelCapture => {
                let source = ScriptedPhotoSource::new(vec![Ok(None)]);
                Some(controller.pick_new(&source).await)
            }
            ScenarioStep::Save => Some(controller.save().await),
            ScenarioStep::Select(photo) => Some(controller.select(photo).await),
            ScenarioStep::Remove(photo, answer) => {
                let confirmer = ScriptedConfirmer::new(vec![*answer]);
                Some(controller.remove_with(photo.clone(), &confirmer).await)
            }
            ScenarioStep::FailOn(operation) => {
                store.fail_on(*operation, true);
                None
            }
            ScenarioStep::StoreUnavailable => {
                store.set_unavailable(true);
                None
            }
            ScenarioStep::Recover => {
                store.set_unavailable(false);
                for operation in [
                    StoreOperation::Add,
                    StoreOperation::LoadAll,
                    StoreOperation::SetCurrent,
                    StoreOperation::ClearCurrent,
                    StoreOperation::LoadCurrent,
                    StoreOperation::Remove,
                ] {
                    store.fail_on(operation, false);
                }
                None
            }
        };

        if notice.is_some() {
            last_notice = notice;
        }
    }

    compare_results(store.as_ref(), &controller, last_notice.as_ref(), &scenario.expected).await
}

/// Compare the actual outcome with the expected results
async fn compare_results(
    store: &MockPhotoStore,
    controller: &ScreenController,
    last_notice: Option<&Notice>,
    expected: &ExpectedResults,
) -> Result<(), String> {
    let photos = store
        .load_all_photos()
        .await
        .map_err(|e| format!("could not read photos: {}", e))?;
    if photos != expected.photos {
        return Err(format!(
            "photos: expected {:?}, got {:?}",
            expected.photos, photos
        ));
    }

    let current = store
        .load_current_photo()
        .await
        .map_err(|e| format!("could not read current photo: {}", e))?;
    if current != expected.current {
        return Err(format!(
            "current photo: expected {:?}, got {:?}",
            expected.current, current
        ));
    }

    if controller.display() != &expected.display {
        return Err(format!(
            "display: expected {:?}, got {:?}",
            expected.display,
            controller.display()
        ));
    }

    if let Some(level) = expected.last_notice {
        let actual = last_notice.map(|n| n.level);
        if actual != Some(level) {
            return Err(format!(
                "last notice: expected {:?}, got {:?}",
                level, actual
            ));
        }
    }

    Ok(())
}

fn print_result(result: &ScenarioResult) {
    let (status, color) = if result.passed {
        ("✓ PASS", "\x1b[32m")
    } else {
        ("✗ FAIL", "\x1b[31m")
    };

    println!(
        "  {}{}\x1b[0m - {} ({:.2}ms, {} steps)",
        color,
        status,
        result.name,
        result.duration.as_secs_f64() * 1000.0,
        result.steps_run
    );

    if let Some(ref reason) = result.failure_reason {
        println!("      └─ Reason: {}", reason);
    }
}

fn print_summary(summary: &TestSummary) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                        TEST SUMMARY                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!("  Total:     {:>4}", summary.total);
    println!("  Passed:    {:>4} \x1b[32m✓\x1b[0m", summary.passed);
    println!("  Failed:    {:>4} \x1b[31m✗\x1b[0m", summary.failed);
    println!("  Pass Rate: {:>5.1}%", summary.pass_rate());
    println!(
        "  Duration:  {:>5.2}ms\n",
        summary.total_duration.as_secs_f64() * 1000.0
    );

    let failed = summary.failed_scenarios();
    if !failed.is_empty() {
        println!("Failed scenarios:");
        for name in failed {
            println!("  • {}", name);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_all_scenarios_pass() {
        let mut runner = TestRunner::new();
        let summary = runner.run_all().await;

        assert!(summary.total > 0);
        assert!(
            summary.all_passed(),
            "failed: {:?}",
            summary
                .results
                .iter()
                .filter(|r| !r.passed)
                .map(|r| (&r.name, &r.failure_reason))
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_wrong_expectation_fails() {
        let scenario = ScenarioLibrary::current_photo_shown().expecting(ExpectedResults {
            photos: vec![],
            ..Default::default()
        });

        let mut runner = TestRunner::new();
        let summary = runner.run_scenarios(vec![scenario]).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_scenarios(), vec!["current_photo_shown"]);
        assert!(summary.results[0]
            .failure_reason
            .as_deref()
            .unwrap_or_default()
            .starts_with("photos"));
    }

    #[tokio::test]
    async fn test_fail_fast_stops_early() {
        let broken = ScenarioLibrary::current_photo_shown().expecting(ExpectedResults::default());
        let mut runner = TestRunner::with_config(TestRunnerConfig {
            fail_fast: true,
            ..Default::default()
        });

        let summary = runner
            .run_scenarios(vec![broken, ScenarioLibrary::save_unsaved_candidate()])
            .await;

        assert_eq!(summary.total, 1);
        assert_eq!(runner.results().len(), 1);
    }

    #[tokio::test]
    async fn test_name_filter() {
        let mut runner = TestRunner::with_config(TestRunnerConfig {
            name_filter: Some("REMOVE".into()),
            ..Default::default()
        });

        let summary = runner.run_all().await;
        assert!(summary.total >= 3);
        assert!(summary.results.iter().all(|r| r.name.contains("remove")));
    }

    #[tokio::test]
    async fn test_json_report_written() {
        let dir = TempDir::new().unwrap();
        let mut runner = TestRunner::with_config(TestRunnerConfig {
            report_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        });

        runner.run_by_tag("quick").await;

        let report = fs::read_to_string(dir.path().join("scenario_report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert!(value["total"].as_u64().unwrap() > 0);
        assert!(value["results"].is_array());
    }

    #[test]
    fn test_summary_pass_rate() {
        let summary = TestSummary {
            total: 10,
            passed: 8,
            failed: 2,
            ..Default::default()
        };

        assert!((summary.pass_rate() - 80.0).abs() < 0.001);
        assert!(!summary.all_passed());
    }
}
