use crate::algorithms::common::AlgorithmKind;
use crate::config::Config;
use crate::error::{MazeError, Result};
use crate::grid::Position;
use crate::maze::{validate_complexity, MazeGenerator};
use crate::statistics::{AlgorithmSummary, TimingData};
use clap::ValueEnum;
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::time::{Duration, Instant};

pub const CSV_HEADER: &str =
    "Algorithm,Maze_Size,Complexity,Distance_Case,Path_Length,Visited_Nodes,Time_Seconds";

/// How far the End marker is stamped from the fixed Start at (1, 1).
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceCase {
    Short,
    Medium,
    Long,
}

impl DistanceCase {
    pub const ALL: [DistanceCase; 3] =
        [DistanceCase::Short, DistanceCase::Medium, DistanceCase::Long];

    pub fn name(&self) -> &'static str {
        match self {
            DistanceCase::Short => "short",
            DistanceCase::Medium => "medium",
            DistanceCase::Long => "long",
        }
    }

    /// End coordinate for a `size` x `size` maze. Always inside the border.
    pub fn end_for(&self, size: usize) -> Position {
        match self {
            DistanceCase::Short => Position::new(2, 2),
            DistanceCase::Medium => Position::new(size / 2, size / 2),
            DistanceCase::Long => Position::new(size - 2, size - 2),
        }
    }
}

impl fmt::Display for DistanceCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One CSV row: one algorithm on one maze.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub algorithm: AlgorithmKind,
    pub maze_size: usize,
    pub complexity: f64,
    pub distance_case: DistanceCase,
    /// In nodes; zero when no path exists.
    pub path_length: usize,
    pub visited_nodes: usize,
    pub time_seconds: f64,
}

impl BatchResult {
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.9}",
            self.algorithm,
            self.maze_size,
            self.complexity,
            self.distance_case,
            self.path_length,
            self.visited_nodes,
            self.time_seconds
        )
    }
}

/// Sweep filter applied to the printed summary.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub maze_size: Option<usize>,
    pub complexity: Option<f64>,
    pub distance_case: Option<DistanceCase>,
}

impl ResultFilter {
    pub fn from_config(config: &Config) -> Self {
        ResultFilter {
            maze_size: config.filter_size,
            complexity: config.filter_complexity,
            distance_case: config.filter_distance,
        }
    }

    pub fn matches(&self, result: &BatchResult) -> bool {
        self.maze_size.map_or(true, |size| size == result.maze_size)
            && self
                .complexity
                .map_or(true, |c| (c - result.complexity).abs() < 1e-9)
            && self
                .distance_case
                .map_or(true, |case| case == result.distance_case)
    }
}

/// Runs every algorithm over sizes x complexities x distance cases and
/// streams the rows to CSV.
pub struct BatchSimulation {
    config: Config,
    generator: MazeGenerator,
    filter: ResultFilter,
    results: Vec<BatchResult>,
    summaries: FxHashMap<AlgorithmKind, AlgorithmSummary>,
    start_time: Instant,
    batch_size: usize,
    total_results_written: usize,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Self {
        BatchSimulation {
            generator: MazeGenerator::new(config.seed),
            filter: ResultFilter::from_config(&config),
            config,
            results: Vec::new(),
            summaries: FxHashMap::default(),
            start_time: Instant::now(),
            batch_size: 100,
            total_results_written: 0,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn total_results_written(&self) -> usize {
        self.total_results_written
    }

    pub fn summary(&self, kind: AlgorithmKind) -> Option<&AlgorithmSummary> {
        self.summaries.get(&kind)
    }

    pub fn run(&mut self) -> Result<()> {
        self.validate()?;
        self.initialize_csv_file()?;

        let total_configurations = self.count_total_configurations();
        info!(
            "Batch started: sizes {:?}, complexities {:?}, {} configurations, \
             algorithms {:?}, output {}",
            self.config.sizes,
            self.config.complexities,
            total_configurations,
            self.config.algorithm.kinds(),
            self.config.output_file
        );

        let timeout_duration = Duration::from_secs(self.config.timeout_seconds);
        let mut configuration_count = 0;
        let mut last_progress_report = Instant::now();
        let progress_interval = Duration::from_secs(10);

        let sizes = self.config.sizes.clone();
        let complexities = self.config.complexities.clone();

        'sweep: for &size in &sizes {
            for &complexity in &complexities {
                for case in DistanceCase::ALL {
                    if self.start_time.elapsed() > timeout_duration {
                        warn!(
                            "Timeout reached after {} of {} configurations",
                            configuration_count, total_configurations
                        );
                        break 'sweep;
                    }

                    configuration_count += 1;
                    if !self.config.quiet {
                        println!(
                            "Testing Size: {}x{}, Complexity: {}, Distance: {}",
                            size, size, complexity, case
                        );
                    }

                    if let Err(err) = self.run_configuration(size, complexity, case) {
                        self.flush_results_to_csv()?;
                        return Err(err);
                    }

                    if self.results.len() >= self.batch_size {
                        self.flush_results_to_csv()?;
                    }

                    if last_progress_report.elapsed() > progress_interval {
                        let progress =
                            configuration_count as f64 / total_configurations as f64 * 100.0;
                        info!(
                            "Progress: {:.1}% ({}/{}) - Elapsed: {:.1}s",
                            progress,
                            configuration_count,
                            total_configurations,
                            self.start_time.elapsed().as_secs_f64()
                        );
                        last_progress_report = Instant::now();
                    }
                }
            }
        }

        self.flush_results_to_csv()?;

        info!(
            "Batch completed: {} results in {:.1}s -> {}",
            self.total_results_written,
            self.start_time.elapsed().as_secs_f64(),
            self.config.output_file
        );
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(&size) = self.config.sizes.iter().find(|&&size| size < 4) {
            return Err(MazeError::invalid(format!(
                "batch maze size must be at least 4, got {}",
                size
            )));
        }
        for &complexity in &self.config.complexities {
            validate_complexity(complexity)?;
        }
        if self.config.repetitions == 0 {
            return Err(MazeError::invalid("repetitions must be at least 1"));
        }
        Ok(())
    }

    fn count_total_configurations(&self) -> usize {
        self.config.sizes.len() * self.config.complexities.len() * DistanceCase::ALL.len()
    }

    fn run_configuration(
        &mut self,
        size: usize,
        complexity: f64,
        case: DistanceCase,
    ) -> Result<()> {
        let mut maze = self.generator.generate(size, size, complexity)?;
        let start = Position::new(1, 1);
        let end = case.end_for(size);
        maze.restamp_endpoints(start, end)?;

        for kind in self.config.algorithm.kinds() {
            let algorithm = kind.algorithm();
            let mut timing_data = TimingData::new();
            let mut last = None;

            for _ in 0..self.config.repetitions {
                let find_path_start = Instant::now();
                let result = algorithm.find_path(&maze.grid, start, end)?;
                timing_data.record(find_path_start.elapsed());
                last = Some(result);
            }

            let Some(result) = last else {
                continue;
            };
            let batch_result = BatchResult {
                algorithm: kind,
                maze_size: size,
                complexity,
                distance_case: case,
                path_length: result.path_length(),
                visited_nodes: result.visited,
                time_seconds: timing_data.average_find_path_time().as_secs_f64(),
            };

            if self.filter.matches(&batch_result) {
                self.summaries.entry(kind).or_default().add(
                    batch_result.path_length,
                    batch_result.visited_nodes,
                    batch_result.time_seconds,
                );
            }
            self.results.push(batch_result);
        }
        Ok(())
    }

    fn flush_results_to_csv(&mut self) -> Result<()> {
        if self.results.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.output_file)?;

        for result in &self.results {
            writeln!(file, "{}", result.to_csv_row())?;
        }

        self.total_results_written += self.results.len();
        log::debug!(
            "Flushed {} results to CSV (total: {})",
            self.results.len(),
            self.total_results_written
        );
        self.results.clear();
        Ok(())
    }

    fn initialize_csv_file(&self) -> Result<()> {
        let mut file = File::create(&self.config.output_file)?;
        writeln!(file, "{}", CSV_HEADER)?;
        info!("Initialized CSV file: {}", self.config.output_file);
        Ok(())
    }

    pub fn print_summary(&self) {
        if self.summaries.is_empty() {
            println!("No results to summarize.");
            return;
        }

        println!("\n=== BATCH SIMULATION SUMMARY ===");
        for kind in AlgorithmKind::ALL {
            if let Some(summary) = self.summaries.get(&kind) {
                println!("\n{} Algorithm Results:", kind);
                print!("{}", summary);
            }
        }
    }
}
