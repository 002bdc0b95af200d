
pub const DEBUGGING_ASSISTANT: &str = include_str!("debugging_assistant.txt");
