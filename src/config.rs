use crate::algorithms::common::AlgorithmKind;
use crate::batch_simulation::DistanceCase;
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmChoice {
    All,
    Bfs,
    Dfs,
    AStar,
}

impl AlgorithmChoice {
    pub fn kinds(&self) -> Vec<AlgorithmKind> {
        match self {
            AlgorithmChoice::All => AlgorithmKind::ALL.to_vec(),
            AlgorithmChoice::Bfs => vec![AlgorithmKind::Bfs],
            AlgorithmChoice::Dfs => vec![AlgorithmKind::Dfs],
            AlgorithmChoice::AStar => vec![AlgorithmKind::AStar],
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Generate mazes and compare BFS, DFS and A*", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    #[arg(long, default_value_t = 20)]
    pub cols: usize,

    /// Share of the grid area used for extra wall-breaking attempts, in [0, 1]
    #[arg(long, default_value_t = 0.3)]
    pub complexity: f64,

    /// Seed for reproducible mazes
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = AlgorithmChoice::All)]
    pub algorithm: AlgorithmChoice,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Summary report written after a single-maze run
    #[arg(long, default_value = "report.txt")]
    pub report_file: String,

    /// Run the size x complexity x distance sweep instead of a single maze
    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    #[arg(long, value_delimiter = ',', default_values_t = vec![10, 20, 30, 40, 50])]
    pub sizes: Vec<usize>,

    #[arg(long, value_delimiter = ',', default_values_t = vec![0.1, 0.3, 0.5, 0.7])]
    pub complexities: Vec<f64>,

    /// Timed repetitions of each search in batch mode
    #[arg(long, default_value_t = 1)]
    pub repetitions: usize,

    #[arg(long, default_value_t = 300)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "experiment_results.csv")]
    pub output_file: String,

    /// Only summarize rows with this maze size
    #[arg(long)]
    pub filter_size: Option<usize>,

    /// Only summarize rows with this complexity
    #[arg(long)]
    pub filter_complexity: Option<f64>,

    /// Only summarize rows with this distance case
    #[arg(long, value_enum)]
    pub filter_distance: Option<DistanceCase>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: 20,
            cols: 20,
            complexity: 0.3,
            seed: None,
            algorithm: AlgorithmChoice::All,
            no_visualization: false,
            quiet: false,
            report_file: "report.txt".to_string(),
            batch_mode: false,
            sizes: vec![10, 20, 30, 40, 50],
            complexities: vec![0.1, 0.3, 0.5, 0.7],
            repetitions: 1,
            timeout_seconds: 300,
            output_file: "experiment_results.csv".to_string(),
            filter_size: None,
            filter_complexity: None,
            filter_distance: None,
        }
    }
}
