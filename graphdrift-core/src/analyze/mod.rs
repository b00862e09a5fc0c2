pub mod centrality;
pub mod features;

pub use centrality::{CentralityConfig, PageRank, compute_pagerank};
pub use features::FeatureExtractor;
