pub mod aggregator;
pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod input;
pub mod messages;
pub mod pipeline;
pub mod prompts;
pub mod repair;
pub mod report;
pub mod score_model;
pub mod validator;
