pub mod analysis;
pub mod etl;
pub mod export;
pub mod parser;

pub use crate::domain::model::{AnalysisReport, AnalysisResult, ChatRow};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
