// Resume evaluation: prompt templates, action selection, the interaction
// controller, and the HTTP surface (form page + JSON API).
// All model calls go through llm_client; all PDF handling through rasterizer.

pub mod action;
pub mod controller;
pub mod handlers;
pub mod page;
pub mod prompts;
