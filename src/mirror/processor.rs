//! Source processing API for the command line
//!
//! This module provides a small API for running Mirror source text through
//! the pipeline up to a chosen stage (tokens, ast, grouped) and rendering
//! the result in a chosen format (simple, json).

use std::fmt;

use crate::mirror::grouper::group;
use crate::mirror::lexer::tokenize;
use crate::mirror::parser::{parse_tokens, ParseError};

/// Represents the processing stage (how far to run the pipeline)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Tokens,
    Ast,
    Grouped,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
}

/// A complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "tokens-simple" or "grouped-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "tokens" => ProcessingStage::Tokens,
            "ast" => ProcessingStage::Ast,
            "grouped" => ProcessingStage::Grouped,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        Ok(ProcessingSpec { stage, format })
    }

    /// All valid processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let stages = [
            ProcessingStage::Tokens,
            ProcessingStage::Ast,
            ProcessingStage::Grouped,
        ];
        let formats = [OutputFormat::Simple, OutputFormat::Json];
        stages
            .iter()
            .flat_map(|&stage| formats.iter().map(move |&format| ProcessingSpec { stage, format }))
            .collect()
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Tokens => "tokens",
            ProcessingStage::Ast => "ast",
            ProcessingStage::Grouped => "grouped",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
        };
        write!(f, "{}-{}", stage, format)
    }
}

/// Errors that can occur during processing
#[derive(Debug)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    /// The source failed to parse; the message is surfaced verbatim
    Parse(ParseError),
    Serialize(serde_json::Error),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(format) => {
                write!(f, "Invalid format: {} (expected <stage>-<format>)", format)
            }
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::Parse(err) => write!(f, "{}", err),
            ProcessingError::Serialize(err) => write!(f, "Serialization failed: {}", err),
        }
    }
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessingError::Parse(err) => Some(err),
            ProcessingError::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

/// Run source text through the pipeline and render the requested stage
pub fn process_source(source: &str, spec: &ProcessingSpec) -> Result<String, ProcessingError> {
    let tokens = tokenize(source);

    if spec.stage == ProcessingStage::Tokens {
        return match spec.format {
            OutputFormat::Simple => Ok(tokens
                .iter()
                .map(|token| format!("{:?}", token))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&tokens).map_err(ProcessingError::Serialize)
            }
        };
    }

    let program = parse_tokens(tokens).map_err(ProcessingError::Parse)?;

    match (spec.stage, spec.format) {
        (ProcessingStage::Ast, OutputFormat::Simple) => Ok(format!("{:#?}", program)),
        (ProcessingStage::Ast, OutputFormat::Json) => {
            serde_json::to_string_pretty(&program).map_err(ProcessingError::Serialize)
        }
        (ProcessingStage::Grouped, OutputFormat::Simple) => Ok(format!("{:#?}", group(&program))),
        (ProcessingStage::Grouped, OutputFormat::Json) => {
            serde_json::to_string_pretty(&group(&program)).map_err(ProcessingError::Serialize)
        }
        (ProcessingStage::Tokens, _) => unreachable!("handled above"),
    }
}
