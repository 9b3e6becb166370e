//! Boundary to the external text-generation service
//!
//! Everything in this module is thin I/O glue around the core pipeline:
//! it formats the grouped AST into a natural-language prompt, sends it to
//! a local chat-completions endpoint, and returns the generated code. The
//! core never depends on these transport details: generation is modeled
//! as the [`Generate`] capability, and the HTTP client is just one
//! implementation of it.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mirror::grouper::{group, GroupedProgram};
use crate::mirror::parser::{parse, ParseError};

/// Base URL of the local generation service
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:1234";

/// Model used when a client is constructed without an explicit choice
pub const DEFAULT_MODEL: &str = "meta-llama-3-8b-instruct";

/// Model the `compile` entry point defaults to
pub const DEFAULT_COMPILE_MODEL: &str = "tinyllama-claude";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PROMPT_HEADER: &str = "\
I want you to generate the function body in JavaScript for the function signature that I give you.
I will also give you several examples of inputs with the expected results. Do not use any additional libraries. Do not give any explanation.
Do not format it as Markdown. Only give the function and the function call expressions afterwards if applicable. Do not include ANY extraneous text.";

const PROMPT_FOOTER: &str =
    "Generate JavaScript code that satisfies these function signatures, examples, and expressions.";

/// Format the grouped program into the instruction prompt.
///
/// The grouped signatures and the bare expressions are embedded as two
/// pretty-printed JSON documents between the instruction header and footer.
pub fn build_prompt(grouped: &GroupedProgram) -> Result<String, PromptError> {
    let signatures = serde_json::to_string_pretty(&grouped.signatures).map_err(PromptError)?;
    let expressions = serde_json::to_string_pretty(&grouped.expressions).map_err(PromptError)?;
    Ok(format!(
        "{}\n\n{}\n{}\n\n\n{}",
        PROMPT_HEADER, signatures, expressions, PROMPT_FOOTER
    ))
}

/// The grouped program could not be serialized for the prompt
#[derive(Debug)]
pub struct PromptError(serde_json::Error);

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to serialize program for prompt: {}", self.0)
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Failures of the generation capability
#[derive(Debug)]
pub enum GenerateError {
    /// The service could not be reached, timed out, or sent an unreadable body
    Network(reqwest::Error),
    /// The service answered with an error payload
    Service { message: String },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Network(err) => write!(f, "Network error: {}", err),
            GenerateError::Service { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Network(err) => Some(err),
            GenerateError::Service { .. } => None,
        }
    }
}

/// Capability interface the core hands its prompt to
#[async_trait]
pub trait Generate {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

// Wire format of the chat-completions endpoint

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for a local OpenAI-compatible generation service
pub struct LocalServiceClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl LocalServiceClient {
    /// Client against [`DEFAULT_ENDPOINT`] with [`DEFAULT_MODEL`]
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(base_url: impl Into<String>) -> Self {
        LocalServiceClient {
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Replace the model name sent with each request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// List the models the service has available (`GET /v1/models`)
    pub async fn available_models(&self) -> Result<Vec<String>, GenerateError> {
        #[derive(Deserialize)]
        struct ModelsResponse {
            models: Vec<String>,
        }

        let url = format!("{}/v1/models", self.base_url);
        debug!(%url, "requesting model list");
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(GenerateError::Network)?;

        if !response.status().is_success() {
            return Err(decode_service_error(response).await);
        }

        let body: ModelsResponse = response.json().await.map_err(GenerateError::Network)?;
        Ok(body.models)
    }
}

impl Default for LocalServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generate for LocalServiceClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, prompt_bytes = prompt.len(), "sending generation request");
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(GenerateError::Network)?;

        if !response.status().is_success() {
            return Err(decode_service_error(response).await);
        }

        let body: ChatResponse = response.json().await.map_err(GenerateError::Network)?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerateError::Service {
                message: "Response contained no choices".to_string(),
            })
    }
}

/// Decode an error body, falling back to the service's unhelpful default
async fn decode_service_error(response: reqwest::Response) -> GenerateError {
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.error.map(|err| err.message))
        .unwrap_or_else(|| "Unknown error".to_string());
    GenerateError::Service { message }
}

/// Errors of the full compilation pipeline
#[derive(Debug)]
pub enum CompileError {
    Parse(ParseError),
    Prompt(PromptError),
    Generate(GenerateError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the inner message is surfaced verbatim so the caller can fix
        // the source text
        match self {
            CompileError::Parse(err) => write!(f, "Compilation failed: {}", err),
            CompileError::Prompt(err) => write!(f, "Compilation failed: {}", err),
            CompileError::Generate(err) => write!(f, "Compilation failed: {}", err),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(err) => Some(err),
            CompileError::Prompt(err) => Some(err),
            CompileError::Generate(err) => Some(err),
        }
    }
}

/// Compile Mirror source text: parse, group, format the prompt, and ask
/// the generation service for the function bodies.
pub async fn compile(source: &str, generator: &impl Generate) -> Result<String, CompileError> {
    let program = parse(source).map_err(CompileError::Parse)?;
    let grouped = group(&program);
    debug!(
        signatures = grouped.signatures.len(),
        expressions = grouped.expressions.len(),
        "compiling program"
    );
    let prompt = build_prompt(&grouped).map_err(CompileError::Prompt)?;
    generator.generate(&prompt).await.map_err(CompileError::Generate)
}
