pub mod gemini;
pub mod mailersend;
pub mod recall_ai;
