use bw_core::BlockKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeliefError {
    #[error("belief store needs at least one goal block")]
    NoGoalBlocks,

    #[error("at most {max} goal blocks are supported, got {got}")]
    TooManyGoalBlocks { max: usize, got: usize },

    #[error("unknown goal block {0}")]
    UnknownBlock(BlockKey),
}

pub type BeliefResult<T> = Result<T, BeliefError>;
