mod openai_client;

pub use openai_client::{OPENAI_BASE_URL, OpenAiClient};
