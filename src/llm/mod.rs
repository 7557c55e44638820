// ABOUTME: Shared chat types for the AI gateway: messages, requests, and stream chunks
// ABOUTME: Submodules provide SSE decoding, the gateway HTTP client, and prompt builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # AI Chat Types
//!
//! Message and request types exchanged with the OpenAI-compatible AI gateway.
//! The gateway itself is an opaque external collaborator; these types mirror
//! its wire contract (`{model, messages, stream}`) without wrapping more of
//! its API surface than the product consumes.

/// OpenAI-compatible chat-completion gateway client
pub mod gateway;
/// Nutritionist prompt builders for meal plans, tips, and coaching
pub mod prompts;
/// Line-buffering Server-Sent-Events decoder
pub mod sse_parser;

use crate::errors::AppError;
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

}

/// A chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages in order
    pub messages: Vec<ChatMessage>,
    /// Model identifier override; the gateway default applies when unset
    pub model: Option<String>,
    /// Whether to stream the response as SSE deltas
    pub stream: bool,
}

impl ChatRequest {
    /// Create a non-streaming request
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            stream: false,
        }
    }

    /// Mark the request for streaming delivery
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// A complete (non-streaming) chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Full assistant message content
    pub content: String,
    /// Model that produced the response
    pub model: String,
    /// Finish reason reported by the gateway, if any
    pub finish_reason: Option<String>,
}

/// One incremental piece of a streaming chat response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Text delta to append to the accumulated message
    pub delta: String,
    /// Whether this is the terminal chunk
    pub is_final: bool,
}

impl StreamChunk {
    /// A content delta
    #[must_use]
    pub fn delta(content: impl Into<String>) -> Self {
        Self {
            delta: content.into(),
            is_final: false,
        }
    }

    /// The terminal marker chunk
    #[must_use]
    pub const fn finished() -> Self {
        Self {
            delta: String::new(),
            is_final: true,
        }
    }
}

/// Async stream of chat deltas produced by a streaming completion
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, AppError>> + Send>>;
