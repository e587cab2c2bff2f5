//! Judge backends for the Infinity Recipe game.

pub mod openai_judge_agent;

pub use openai_judge_agent::OpenAIJudgeAgent;
